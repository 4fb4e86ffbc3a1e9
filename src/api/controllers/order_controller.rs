use crate::api::response::{CartDetailResponse, OrderProductResponse, OrderResponse};
use crate::security::jwt::AccessClaims;
use crate::services::errors::OrderServiceError;
use crate::services::order_service::OrderService;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Get the acting user's cart: the open order with line items grouped by
/// product. An empty cart is a 200 with no order, not a 404.
pub async fn get_cart(claims: AccessClaims) -> impl IntoResponse {
    let service = OrderService::new();

    match service.get_cart_detail(claims.user_id()).await {
        Ok(Some(detail)) => (StatusCode::OK, Json(CartDetailResponse::from(detail))).into_response(),
        Ok(None) => (StatusCode::OK, Json(CartDetailResponse::empty())).into_response(),
        Err(OrderServiceError::ConsistencyViolation) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Multiple open orders found",
        )
            .into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Add one unit of a product to the acting user's cart.
pub async fn add_to_cart(claims: AccessClaims, Path(product_id): Path<i32>) -> impl IntoResponse {
    let service = OrderService::new();

    match service.add_to_cart(claims.user_id(), product_id).await {
        Ok(line) => (StatusCode::CREATED, Json(OrderProductResponse::from(line))).into_response(),
        Err(OrderServiceError::ProductNotFound) => {
            (StatusCode::NOT_FOUND, "Product not found").into_response()
        }
        Err(OrderServiceError::ConsistencyViolation) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Multiple open orders found",
        )
            .into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Remove exactly one unit of a product from the acting user's cart.
pub async fn remove_cart_item(
    claims: AccessClaims,
    Path(product_id): Path<i32>,
) -> impl IntoResponse {
    let service = OrderService::new();

    match service.remove_line_item(claims.user_id(), product_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(OrderServiceError::NoOpenOrder) => {
            (StatusCode::NOT_FOUND, "No open order").into_response()
        }
        Err(OrderServiceError::LineItemNotFound) => {
            (StatusCode::NOT_FOUND, "Line item not found").into_response()
        }
        Err(OrderServiceError::ConsistencyViolation) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Multiple open orders found",
        )
            .into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// All of the acting user's orders, open and completed.
pub async fn get_user_orders(claims: AccessClaims) -> impl IntoResponse {
    let service = OrderService::new();

    match service.get_user_orders(claims.user_id()).await {
        Ok(orders) => {
            let response: Vec<OrderResponse> =
                orders.into_iter().map(OrderResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Delete one of the acting user's orders.
pub async fn delete_order(claims: AccessClaims, Path(order_id): Path<i32>) -> impl IntoResponse {
    let service = OrderService::new();

    match service.delete_order(claims.user_id(), order_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(OrderServiceError::OrderNotFound) => {
            (StatusCode::NOT_FOUND, "Order not found").into_response()
        }
        Err(OrderServiceError::OrderHasLineItems) => (
            StatusCode::CONFLICT,
            "Order still has line items attached",
        )
            .into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

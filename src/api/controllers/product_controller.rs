use crate::api::controllers::dto::product_dto::{CreateProductRequest, UpdateProductRequest};
use crate::api::response::ProductResponse;
use crate::security::jwt::AccessClaims;
use crate::services::catalog_service::CatalogService;
use crate::services::errors::CatalogServiceError;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Get the catalog, alphabetical by title. Browsing needs no token.
pub async fn get_all_products() -> impl IntoResponse {
    let service = CatalogService::new();

    match service.list_products().await {
        Ok(products) => {
            let response: Vec<ProductResponse> =
                products.into_iter().map(ProductResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Substring search over product titles.
pub async fn search_products(Query(params): Query<SearchParams>) -> impl IntoResponse {
    let service = CatalogService::new();
    let term = params.q.unwrap_or_default();

    match service.search(&term).await {
        Ok(products) => {
            let response: Vec<ProductResponse> =
                products.into_iter().map(ProductResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Get product by ID
pub async fn get_product_by_id(Path(product_id): Path<i32>) -> impl IntoResponse {
    let service = CatalogService::new();

    match service.get_product(product_id).await {
        Ok(Some(product)) => {
            (StatusCode::OK, Json(ProductResponse::from(product))).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, "Product not found").into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Create a new product owned by the acting user.
pub async fn create_product(
    claims: AccessClaims,
    Json(payload): Json<CreateProductRequest>,
) -> impl IntoResponse {
    let service = CatalogService::new();

    match service.create_product(claims.user_id(), &payload).await {
        Ok(product) => {
            (StatusCode::CREATED, Json(ProductResponse::from(product))).into_response()
        }
        Err(CatalogServiceError::ValidationFailed(reason)) => {
            (StatusCode::BAD_REQUEST, reason).into_response()
        }
        Err(CatalogServiceError::ProductTypeNotFound) => {
            (StatusCode::BAD_REQUEST, "Product type not found").into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Edit a product. The payload carries the version the client read; a
/// stale version on a live row is reported as a conflict.
pub async fn update_product(
    _claims: AccessClaims,
    Path(product_id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> impl IntoResponse {
    let service = CatalogService::new();

    match service.update_product(product_id, &payload).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(CatalogServiceError::ValidationFailed(reason)) => {
            (StatusCode::BAD_REQUEST, reason).into_response()
        }
        Err(CatalogServiceError::ProductTypeNotFound) => {
            (StatusCode::BAD_REQUEST, "Product type not found").into_response()
        }
        Err(CatalogServiceError::ProductNotFound) => {
            (StatusCode::NOT_FOUND, "Product not found").into_response()
        }
        Err(CatalogServiceError::ConcurrencyConflict) => (
            StatusCode::CONFLICT,
            "Product was changed by another writer",
        )
            .into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Delete a product. Rejected while order line items reference it.
pub async fn delete_product(
    _claims: AccessClaims,
    Path(product_id): Path<i32>,
) -> impl IntoResponse {
    let service = CatalogService::new();

    match service.delete_product(product_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(CatalogServiceError::ProductNotFound) => {
            (StatusCode::NOT_FOUND, "Product not found").into_response()
        }
        Err(CatalogServiceError::ProductInUse) => (
            StatusCode::CONFLICT,
            "Product is referenced by order line items",
        )
            .into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

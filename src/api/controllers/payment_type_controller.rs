use crate::api::controllers::dto::payment_type_dto::{
    CreatePaymentTypeRequest, UpdatePaymentTypeRequest,
};
use crate::api::response::PaymentTypeResponse;
use crate::security::jwt::AccessClaims;
use crate::services::errors::PaymentTypeServiceError;
use crate::services::payment_type_service::PaymentTypeService;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// The acting user's payment profiles.
pub async fn get_payment_types(claims: AccessClaims) -> impl IntoResponse {
    let service = PaymentTypeService::new();

    match service.list_for_user(claims.user_id()).await {
        Ok(payment_types) => {
            let response: Vec<PaymentTypeResponse> = payment_types
                .into_iter()
                .map(PaymentTypeResponse::from)
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Get one of the acting user's payment profiles.
pub async fn get_payment_type_by_id(
    claims: AccessClaims,
    Path(payment_type_id): Path<i32>,
) -> impl IntoResponse {
    let service = PaymentTypeService::new();

    match service.get(payment_type_id, claims.user_id()).await {
        Ok(Some(payment_type)) => {
            (StatusCode::OK, Json(PaymentTypeResponse::from(payment_type))).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, "Payment type not found").into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Create a payment profile owned by the acting user.
pub async fn create_payment_type(
    claims: AccessClaims,
    Json(payload): Json<CreatePaymentTypeRequest>,
) -> impl IntoResponse {
    let service = PaymentTypeService::new();

    match service.create(claims.user_id(), &payload).await {
        Ok(payment_type) => (
            StatusCode::CREATED,
            Json(PaymentTypeResponse::from(payment_type)),
        )
            .into_response(),
        Err(PaymentTypeServiceError::ValidationFailed(reason)) => {
            (StatusCode::BAD_REQUEST, reason).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Edit a payment profile with a compare-and-swap on its version.
pub async fn update_payment_type(
    claims: AccessClaims,
    Path(payment_type_id): Path<i32>,
    Json(payload): Json<UpdatePaymentTypeRequest>,
) -> impl IntoResponse {
    let service = PaymentTypeService::new();

    match service
        .update(payment_type_id, claims.user_id(), &payload)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(PaymentTypeServiceError::ValidationFailed(reason)) => {
            (StatusCode::BAD_REQUEST, reason).into_response()
        }
        Err(PaymentTypeServiceError::PaymentTypeNotFound) => {
            (StatusCode::NOT_FOUND, "Payment type not found").into_response()
        }
        Err(PaymentTypeServiceError::ConcurrencyConflict) => (
            StatusCode::CONFLICT,
            "Payment type was changed by another writer",
        )
            .into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Delete one of the acting user's payment profiles.
pub async fn delete_payment_type(
    claims: AccessClaims,
    Path(payment_type_id): Path<i32>,
) -> impl IntoResponse {
    let service = PaymentTypeService::new();

    match service.delete(payment_type_id, claims.user_id()).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(PaymentTypeServiceError::PaymentTypeNotFound) => {
            (StatusCode::NOT_FOUND, "Payment type not found").into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

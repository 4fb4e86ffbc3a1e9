use crate::api::response::ProductTypeResponse;
use crate::services::catalog_service::CatalogService;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Reference data for the product category select list.
pub async fn get_all_product_types() -> impl IntoResponse {
    let service = CatalogService::new();

    match service.list_product_types().await {
        Ok(product_types) => {
            let response: Vec<ProductTypeResponse> = product_types
                .into_iter()
                .map(ProductTypeResponse::from)
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

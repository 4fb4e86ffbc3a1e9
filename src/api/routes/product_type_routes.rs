use crate::api::controllers::product_type_controller;
use axum::routing::get;
use axum::Router;

pub fn routes() -> Router {
    Router::new().route("/", get(product_type_controller::get_all_product_types))
}

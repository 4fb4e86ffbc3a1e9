use crate::api::controllers::order_controller;
use axum::routing::{delete, get, post};
use axum::Router;

pub fn routes() -> Router {
    Router::new()
        .route("/", get(order_controller::get_cart))
        .route("/items/{product_id}", post(order_controller::add_to_cart))
        .route(
            "/items/{product_id}",
            delete(order_controller::remove_cart_item),
        )
}

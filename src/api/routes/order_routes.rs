use crate::api::controllers::order_controller;
use axum::routing::{delete, get};
use axum::Router;

pub fn routes() -> Router {
    Router::new()
        .route("/", get(order_controller::get_user_orders))
        .route("/{id}", delete(order_controller::delete_order))
}

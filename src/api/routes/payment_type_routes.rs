use crate::api::controllers::payment_type_controller;
use axum::routing::{delete, get, post, put};
use axum::Router;

pub fn routes() -> Router {
    Router::new()
        .route("/", get(payment_type_controller::get_payment_types))
        .route("/", post(payment_type_controller::create_payment_type))
        .route(
            "/{id}",
            get(payment_type_controller::get_payment_type_by_id),
        )
        .route("/{id}", put(payment_type_controller::update_payment_type))
        .route(
            "/{id}",
            delete(payment_type_controller::delete_payment_type),
        )
}

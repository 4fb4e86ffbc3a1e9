use crate::api::controllers::user_controller;
use axum::routing::post;
use axum::Router;

pub fn routes() -> Router {
    Router::new()
        .route("/register", post(user_controller::register_user))
        .route("/login", post(user_controller::login))
}

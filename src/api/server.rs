use crate::api::config::Config;
use crate::api::routes::{
    auth_routes, cart_routes, order_routes, payment_type_routes, product_routes,
    product_type_routes,
};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

pub fn app() -> Router {
    let cors_layer = CorsLayer::new().allow_origin(Any);

    Router::new()
        .route("/api", get(|| async { "Bangazon API is running!" }))
        .nest("/api/v1/users", auth_routes::routes())
        .nest("/api/v1/products", product_routes::routes())
        .nest("/api/v1/product-types", product_type_routes::routes())
        .nest("/api/v1/cart", cart_routes::routes())
        .nest("/api/v1/orders", order_routes::routes())
        .nest("/api/v1/payment-types", payment_type_routes::routes())
        .layer(cors_layer)
}

pub async fn start() {
    let config = Config::new();

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server running on http://{}", config.bind_addr);

    axum::serve(listener, app())
        .await
        .expect("Failed to start the server");
}

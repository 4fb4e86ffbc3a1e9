pub mod auth_routes;
pub mod cart_routes;
pub mod order_routes;
pub mod payment_type_routes;
pub mod product_routes;
pub mod product_type_routes;

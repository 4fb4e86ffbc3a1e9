pub mod money;
pub mod order;
pub mod order_product;
pub mod payment_type;
pub mod product;
pub mod product_type;
pub mod schema;
pub mod user;

pub mod order_repo;
pub mod payment_type_repo;
pub mod product_repo;
pub mod product_type_repo;
pub mod user_repo;

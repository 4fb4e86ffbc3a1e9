pub mod dto;
pub mod order_controller;
pub mod payment_type_controller;
pub mod product_controller;
pub mod product_type_controller;
pub mod user_controller;

pub mod catalog_service;
pub mod errors;
pub mod order_service;
pub mod payment_type_service;

pub mod payment_type_dto;
pub mod product_dto;
pub mod user_dto;

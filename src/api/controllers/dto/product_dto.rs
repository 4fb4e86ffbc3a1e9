use bigdecimal::BigDecimal;
use serde::Deserialize;

/// Explicit input shape for product creation; only these fields are
/// accepted, everything else on the entity is derived server-side.
#[derive(Deserialize, Debug)]
pub struct CreateProductRequest {
    pub title: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub quantity: i32,
    pub city: Option<String>,
    pub image_path: Option<String>,
    pub product_type_id: i32,
}

/// Partial edit plus the version the client read, for the
/// compare-and-swap update.
#[derive(Deserialize, Debug)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub quantity: Option<i32>,
    pub city: Option<String>,
    pub image_path: Option<String>,
    pub product_type_id: Option<i32>,
    pub version: i32,
}

use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct CreatePaymentTypeRequest {
    pub description: String,
    pub account_number: String,
}

/// Partial edit plus the version the client read, for the
/// compare-and-swap update.
#[derive(Deserialize, Debug)]
pub struct UpdatePaymentTypeRequest {
    pub description: Option<String>,
    pub account_number: Option<String>,
    pub version: i32,
}

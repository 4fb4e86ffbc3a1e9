#[derive(Debug, PartialEq)]
pub enum OrderServiceError {
    ProductNotFound,
    OrderNotFound,
    NoOpenOrder,
    LineItemNotFound,
    OrderHasLineItems,
    /// More than one open order for a single user. The store constraint
    /// should make this unreachable; it is surfaced loudly, never treated
    /// as an empty cart.
    ConsistencyViolation,
    DatabaseError,
}

impl std::error::Error for OrderServiceError {}

impl std::fmt::Display for OrderServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderServiceError::ProductNotFound => write!(f, "Product not found"),
            OrderServiceError::OrderNotFound => write!(f, "Order not found"),
            OrderServiceError::NoOpenOrder => write!(f, "No open order"),
            OrderServiceError::LineItemNotFound => write!(f, "Line item not found"),
            OrderServiceError::OrderHasLineItems => {
                write!(f, "Order still has line items attached")
            }
            OrderServiceError::ConsistencyViolation => {
                write!(f, "Multiple open orders found for one user")
            }
            OrderServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum CatalogServiceError {
    ProductNotFound,
    ProductTypeNotFound,
    ValidationFailed(String),
    ConcurrencyConflict,
    ProductInUse,
    DatabaseError,
}

impl std::error::Error for CatalogServiceError {}

impl std::fmt::Display for CatalogServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogServiceError::ProductNotFound => write!(f, "Product not found"),
            CatalogServiceError::ProductTypeNotFound => write!(f, "Product type not found"),
            CatalogServiceError::ValidationFailed(reason) => {
                write!(f, "Validation failed: {}", reason)
            }
            CatalogServiceError::ConcurrencyConflict => {
                write!(f, "Product was changed by another writer")
            }
            CatalogServiceError::ProductInUse => {
                write!(f, "Product is referenced by order line items")
            }
            CatalogServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum PaymentTypeServiceError {
    PaymentTypeNotFound,
    ValidationFailed(String),
    ConcurrencyConflict,
    DatabaseError,
}

impl std::error::Error for PaymentTypeServiceError {}

impl std::fmt::Display for PaymentTypeServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentTypeServiceError::PaymentTypeNotFound => write!(f, "Payment type not found"),
            PaymentTypeServiceError::ValidationFailed(reason) => {
                write!(f, "Validation failed: {}", reason)
            }
            PaymentTypeServiceError::ConcurrencyConflict => {
                write!(f, "Payment type was changed by another writer")
            }
            PaymentTypeServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}

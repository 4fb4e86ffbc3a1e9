use bigdecimal::BigDecimal;
use diesel::expression::AsExpression;
use diesel::deserialize::FromSqlRow;
use serde::{Deserialize, Serialize};

/// Decimal amount stored as TEXT, since SQLite has no decimal column type.
/// The `FromSql`/`ToSql` impls live in `utils::mappers`.
#[derive(Debug, Clone, PartialEq, PartialOrd, AsExpression, FromSqlRow, Serialize, Deserialize)]
#[diesel(sql_type = diesel::sql_types::Text)]
#[serde(transparent)]
pub struct Money(pub BigDecimal);

impl From<BigDecimal> for Money {
    fn from(value: BigDecimal) -> Self {
        Money(value)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

use crate::data::models::money::Money;
use bigdecimal::BigDecimal;
use diesel::deserialize::{self, FromSql};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::backend::Backend;
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use std::str::FromStr;

// SQLite has no decimal column type, so Money round-trips through TEXT.
impl FromSql<Text, Sqlite> for Money {
    fn from_sql(bytes: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let raw = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
        let value = BigDecimal::from_str(&raw)?;
        Ok(Money(value))
    }
}

impl ToSql<Text, Sqlite> for Money {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.0.to_string());
        Ok(IsNull::No)
    }
}

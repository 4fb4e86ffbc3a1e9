use crate::data::models::schema::*;
use diesel::prelude::*;

/// Static reference data used to categorize catalog products.
#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = product_types)]
#[diesel(primary_key(product_type_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductType {
    pub product_type_id: i32,
    pub label: String,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = product_types)]
pub struct NewProductType<'a> {
    pub label: &'a str,
}

#[derive(AsChangeset, PartialEq, Debug)]
#[diesel(table_name = product_types)]
pub struct UpdateProductType<'a> {
    pub label: Option<&'a str>,
}

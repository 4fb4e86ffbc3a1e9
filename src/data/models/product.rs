use crate::data::models::money::Money;
use crate::data::models::product_type::ProductType;
use crate::data::models::schema::*;
use crate::data::models::user::User;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = products)]
#[diesel(primary_key(product_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(belongs_to(ProductType, foreign_key = product_type_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Product {
    pub product_id: i32,
    pub user_id: i32,
    pub product_type_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub price: Money,
    pub quantity: i32,
    pub city: Option<String>,
    pub image_path: Option<String>,
    pub version: i32,
    pub created_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = products)]
pub struct NewProduct<'a> {
    pub user_id: i32,
    pub product_type_id: i32,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub price: Money,
    pub quantity: i32,
    pub city: Option<&'a str>,
    pub image_path: Option<&'a str>,
}

/// Change set for product edits. The `version` column is bumped separately
/// by the repo as part of the compare-and-swap update.
#[derive(AsChangeset, PartialEq, Debug)]
#[diesel(table_name = products)]
pub struct UpdateProduct<'a> {
    pub product_type_id: Option<i32>,
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub price: Option<Money>,
    pub quantity: Option<i32>,
    pub city: Option<&'a str>,
    pub image_path: Option<&'a str>,
}

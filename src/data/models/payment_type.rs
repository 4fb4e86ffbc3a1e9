use crate::data::models::schema::*;
use crate::data::models::user::User;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = payment_types)]
#[diesel(primary_key(payment_type_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PaymentType {
    pub payment_type_id: i32,
    pub user_id: i32,
    pub description: String,
    pub account_number: String,
    pub version: i32,
    pub created_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = payment_types)]
pub struct NewPaymentType<'a> {
    pub user_id: i32,
    pub description: &'a str,
    pub account_number: &'a str,
}

/// Change set for payment type edits; `version` is bumped by the repo
/// as part of the compare-and-swap update.
#[derive(AsChangeset, PartialEq, Debug)]
#[diesel(table_name = payment_types)]
pub struct UpdatePaymentType<'a> {
    pub description: Option<&'a str>,
    pub account_number: Option<&'a str>,
}

use crate::data::models::payment_type::PaymentType;
use crate::data::models::schema::*;
use crate::data::models::user::User;
use diesel::prelude::*;

/// An order with no payment type assigned is the user's open cart.
/// At most one such order may exist per user at any time; the store
/// enforces this with a partial unique index on (user_id).
#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = orders)]
#[diesel(primary_key(order_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(belongs_to(PaymentType, foreign_key = payment_type_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Order {
    pub order_id: i32,
    pub user_id: i32,
    pub payment_type_id: Option<i32>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub completed_at: Option<chrono::NaiveDateTime>,
}

impl Order {
    pub fn is_open(&self) -> bool {
        self.payment_type_id.is_none()
    }
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = orders)]
pub struct NewOrder {
    pub user_id: i32,
    pub payment_type_id: Option<i32>,
}

#[derive(AsChangeset, PartialEq, Debug)]
#[diesel(table_name = orders)]
pub struct UpdateOrder {
    pub payment_type_id: Option<i32>,
    pub completed_at: Option<chrono::NaiveDateTime>,
}

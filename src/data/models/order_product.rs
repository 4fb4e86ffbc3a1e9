use crate::data::models::order::Order;
use crate::data::models::product::Product;
use crate::data::models::schema::*;
use diesel::prelude::*;

/// One row per unit of a product in an order. The quantity of a product
/// in a cart is the count of matching rows, not a stored integer.
#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = order_products)]
#[diesel(primary_key(order_product_id))]
#[diesel(belongs_to(Order, foreign_key = order_id))]
#[diesel(belongs_to(Product, foreign_key = product_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderProduct {
    pub order_product_id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub created_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = order_products)]
pub struct NewOrderProduct {
    pub order_id: i32,
    pub product_id: i32,
}

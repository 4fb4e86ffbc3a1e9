use crate::data::database::{Database, DbConnection};
use crate::data::models::order::{NewOrder, Order, UpdateOrder};
use crate::data::models::order_product::{NewOrderProduct, OrderProduct};
use crate::data::models::product::Product;
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::pooled_connection::deadpool::Object;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

/// Failures of the multi-statement cart operations. Everything that is not a
/// plain store error carries cart semantics the service layer maps onto the
/// user-facing taxonomy.
#[derive(Debug)]
pub enum CartOpError {
    /// The user has no open order to operate on.
    NoOpenOrder,
    /// The open order holds no line item for the requested product.
    LineItemNotFound,
    /// More than one open order exists for the user. The partial unique
    /// index makes this unreachable; if it is ever observed the data is
    /// corrupt and the operation must fail loudly.
    MultipleOpenOrders(usize),
    Database(result::Error),
}

impl From<result::Error> for CartOpError {
    fn from(e: result::Error) -> Self {
        CartOpError::Database(e)
    }
}

impl std::error::Error for CartOpError {}

impl std::fmt::Display for CartOpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartOpError::NoOpenOrder => write!(f, "No open order"),
            CartOpError::LineItemNotFound => write!(f, "Line item not found"),
            CartOpError::MultipleOpenOrders(n) => {
                write!(f, "Data integrity violation: {} open orders for one user", n)
            }
            CartOpError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

pub struct OrderRepo {}

impl OrderRepo {
    pub fn new() -> Self {
        OrderRepo {}
    }

    /// All orders with no payment type assigned for the given user.
    /// By invariant the result holds at most one element; callers decide
    /// what a longer result means.
    pub async fn get_open_orders(&self, user_id_query: i32) -> Result<Vec<Order>, result::Error> {
        use crate::data::models::schema::orders::dsl::{orders, payment_type_id, user_id};

        let db = Database::new().await;

        let mut conn: Object<DbConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        orders
            .filter(user_id.eq(user_id_query))
            .filter(payment_type_id.is_null())
            .load::<Order>(&mut conn)
            .await
    }

    /// Retrieves all orders for a specific user by user_id.
    pub async fn get_by_user_id(
        &self,
        user_id_query: i32,
    ) -> Result<Option<Vec<Order>>, result::Error> {
        use crate::data::models::schema::orders::dsl::{orders, user_id};

        let db = Database::new().await;

        let mut conn: Object<DbConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match orders
            .filter(user_id.eq(user_id_query))
            .load::<Order>(&mut conn)
            .await
        {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Appends one unit of a product to the user's open order, creating the
    /// order first when none exists. Both writes happen in one transaction:
    /// either the order and the line item land together or neither does.
    pub async fn add_to_cart(
        &self,
        acting_user: i32,
        product: i32,
    ) -> Result<OrderProduct, CartOpError> {
        use crate::data::models::schema::order_products::dsl::{order_product_id, order_products};
        use crate::data::models::schema::orders::dsl::{
            order_id, orders, payment_type_id, user_id,
        };

        let db = Database::new().await;

        let mut conn: Object<DbConnection> = db.get_connection().await.map_err(|e| {
            CartOpError::Database(result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            ))
        })?;

        conn.transaction::<OrderProduct, CartOpError, _>(|connection| {
            async move {
                let open: Vec<Order> = orders
                    .filter(user_id.eq(acting_user))
                    .filter(payment_type_id.is_null())
                    .load::<Order>(connection)
                    .await?;

                let current_order = match open.len() {
                    1 => open.into_iter().next().ok_or(CartOpError::NoOpenOrder)?,
                    0 => {
                        let new_order = NewOrder {
                            user_id: acting_user,
                            payment_type_id: None,
                        };

                        match diesel::insert_into(orders)
                            .values(&new_order)
                            .execute(connection)
                            .await
                        {
                            Ok(_) => {
                                let new_id: i32 = diesel::select(diesel::dsl::sql::<
                                    diesel::sql_types::Integer,
                                >(
                                    "last_insert_rowid()"
                                ))
                                .get_result(connection)
                                .await?;

                                orders
                                    .filter(order_id.eq(new_id))
                                    .first::<Order>(connection)
                                    .await?
                            }
                            Err(result::Error::DatabaseError(
                                result::DatabaseErrorKind::UniqueViolation,
                                _,
                            )) => {
                                // Lost the race to a concurrent first add;
                                // the open order now exists, use it.
                                orders
                                    .filter(user_id.eq(acting_user))
                                    .filter(payment_type_id.is_null())
                                    .first::<Order>(connection)
                                    .await?
                            }
                            Err(e) => return Err(e.into()),
                        }
                    }
                    n => return Err(CartOpError::MultipleOpenOrders(n)),
                };

                let line_item = NewOrderProduct {
                    order_id: current_order.order_id,
                    product_id: product,
                };

                diesel::insert_into(order_products)
                    .values(&line_item)
                    .execute(connection)
                    .await?;

                let new_line_id: i32 =
                    diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
                        "last_insert_rowid()",
                    ))
                    .get_result(connection)
                    .await?;

                let created = order_products
                    .filter(order_product_id.eq(new_line_id))
                    .first::<OrderProduct>(connection)
                    .await?;

                Ok(created)
            }
            .scope_boxed()
        })
        .await
    }

    /// Removes exactly one line item row for the product from the user's
    /// open order. Other rows for the same product are left alone.
    pub async fn remove_line_item(
        &self,
        acting_user: i32,
        product: i32,
    ) -> Result<(), CartOpError> {
        use crate::data::models::schema::order_products::dsl::{
            order_id as line_order_id, order_product_id, order_products,
            product_id as line_product_id,
        };
        use crate::data::models::schema::orders::dsl::{orders, payment_type_id, user_id};

        let db = Database::new().await;

        let mut conn: Object<DbConnection> = db.get_connection().await.map_err(|e| {
            CartOpError::Database(result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            ))
        })?;

        conn.transaction::<(), CartOpError, _>(|connection| {
            async move {
                let open: Vec<Order> = orders
                    .filter(user_id.eq(acting_user))
                    .filter(payment_type_id.is_null())
                    .load::<Order>(connection)
                    .await?;

                let current_order = match open.len() {
                    0 => return Err(CartOpError::NoOpenOrder),
                    1 => open.into_iter().next().ok_or(CartOpError::NoOpenOrder)?,
                    n => return Err(CartOpError::MultipleOpenOrders(n)),
                };

                let target: Option<i32> = order_products
                    .filter(line_order_id.eq(current_order.order_id))
                    .filter(line_product_id.eq(product))
                    .order(order_product_id.asc())
                    .select(order_product_id)
                    .first::<i32>(connection)
                    .await
                    .optional()?;

                let target = target.ok_or(CartOpError::LineItemNotFound)?;

                diesel::delete(order_products.filter(order_product_id.eq(target)))
                    .execute(connection)
                    .await?;

                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    /// Loads the user's open order together with its line items and the
    /// products they reference, in one intentional fetch. `Ok(None)` is the
    /// empty cart, a valid state, not an error.
    pub async fn get_open_order_with_items(
        &self,
        acting_user: i32,
    ) -> Result<Option<(Order, Vec<(OrderProduct, Product)>)>, CartOpError> {
        use crate::data::models::schema::order_products::dsl::{
            order_id as line_order_id, order_products,
        };
        use crate::data::models::schema::products::dsl::products;

        let open = self.get_open_orders(acting_user).await?;

        let current_order = match open.len() {
            0 => return Ok(None),
            1 => open.into_iter().next().ok_or(CartOpError::NoOpenOrder)?,
            n => return Err(CartOpError::MultipleOpenOrders(n)),
        };

        let db = Database::new().await;

        let mut conn: Object<DbConnection> = db.get_connection().await.map_err(|e| {
            CartOpError::Database(result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            ))
        })?;

        let items: Vec<(OrderProduct, Product)> = order_products
            .inner_join(products)
            .filter(line_order_id.eq(current_order.order_id))
            .load::<(OrderProduct, Product)>(&mut conn)
            .await
            .map_err(CartOpError::Database)?;

        Ok(Some((current_order, items)))
    }
}

#[async_trait]
impl Repository for OrderRepo {
    type Id = i32;
    type Item = Order;
    type NewItem<'a> = NewOrder;
    type UpdateForm<'a> = UpdateOrder;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error> {
        use crate::data::models::schema::orders::dsl::orders;

        let db = Database::new().await;

        let mut conn: Object<DbConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match orders.load::<Self::Item>(&mut conn).await {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::orders::dsl::{order_id, orders};

        let db = Database::new().await;

        let mut conn: Object<DbConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match orders
            .filter(order_id.eq(id))
            .first::<Self::Item>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn add<'a>(&self, item: Self::NewItem<'a>) -> Result<(), result::Error> {
        use crate::data::models::schema::orders::dsl::orders;

        let db = Database::new().await;

        let mut conn: Object<DbConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(orders)
                    .values(&item)
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn update<'a>(
        &self,
        id: Self::Id,
        item: Self::UpdateForm<'a>,
    ) -> Result<(), result::Error> {
        use crate::data::models::schema::orders::dsl::{order_id, orders};

        let db = Database::new().await;

        let mut conn: Object<DbConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction(|connection| {
            async move {
                diesel::update(orders.filter(order_id.eq(id)))
                    .set(&item)
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    /// Deleting an order that still has line items fails with a foreign key
    /// violation; callers surface that as a conflict.
    async fn delete(&self, id: Self::Id) -> Result<(), result::Error> {
        use crate::data::models::schema::orders::dsl::{order_id, orders};

        let db = Database::new().await;

        let mut conn: Object<DbConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction(|connection| {
            async move {
                diesel::delete(orders.filter(order_id.eq(id)))
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }
}

impl Default for OrderRepo {
    fn default() -> Self {
        Self::new()
    }
}

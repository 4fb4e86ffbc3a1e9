use crate::data::models::money::Money;
use crate::data::models::order::Order;
use crate::data::models::order_product::OrderProduct;
use crate::data::models::product::Product;
use crate::data::repos::implementors::order_repo::{CartOpError, OrderRepo};
use crate::data::repos::implementors::product_repo::ProductRepo;
use crate::data::repos::traits::repository::Repository;
use crate::services::errors::OrderServiceError;
use bigdecimal::BigDecimal;
use diesel::result;
use std::collections::BTreeMap;

/// One distinct product in a cart. Units are counted from line item rows;
/// cost is units times the product's price as it is right now, not as it
/// was when the rows were added.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineItem {
    pub product: Product,
    pub units: u32,
    pub cost: Money,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartDetail {
    pub order: Order,
    pub line_items: Vec<OrderLineItem>,
}

pub struct OrderService;

impl OrderService {
    pub fn new() -> Self {
        OrderService
    }

    /// The user's single open order, if any. Finding more than one is a
    /// data-integrity failure, not something to quietly pick from.
    pub async fn get_open_order(&self, user_id: i32) -> Result<Option<Order>, OrderServiceError> {
        let repo = OrderRepo::new();

        let mut open = repo
            .get_open_orders(user_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?;

        match open.len() {
            0 => Ok(None),
            1 => Ok(open.pop()),
            n => {
                tracing::error!(user_id, open_orders = n, "multiple open orders for one user");
                Err(OrderServiceError::ConsistencyViolation)
            }
        }
    }

    /// Adds one unit of the product to the user's cart, creating the open
    /// order lazily on the first add.
    pub async fn add_to_cart(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> Result<OrderProduct, OrderServiceError> {
        let product_repo = ProductRepo::new();

        product_repo
            .get_by_id(product_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?
            .ok_or(OrderServiceError::ProductNotFound)?;

        let repo = OrderRepo::new();

        repo.add_to_cart(user_id, product_id)
            .await
            .map_err(map_cart_error)
    }

    /// Removes exactly one unit of the product from the user's cart.
    pub async fn remove_line_item(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> Result<(), OrderServiceError> {
        let repo = OrderRepo::new();

        repo.remove_line_item(user_id, product_id)
            .await
            .map_err(map_cart_error)
    }

    /// The open order with its line items grouped by product. `Ok(None)` is
    /// the empty cart, an expected terminal state.
    pub async fn get_cart_detail(
        &self,
        user_id: i32,
    ) -> Result<Option<CartDetail>, OrderServiceError> {
        let repo = OrderRepo::new();

        let loaded = repo
            .get_open_order_with_items(user_id)
            .await
            .map_err(map_cart_error)?;

        let (order, items) = match loaded {
            Some(value) => value,
            None => return Ok(None),
        };

        let mut grouped: BTreeMap<i32, (Product, u32)> = BTreeMap::new();
        for (_, product) in items {
            let entry = grouped
                .entry(product.product_id)
                .or_insert_with(|| (product, 0));
            entry.1 += 1;
        }

        let line_items = grouped
            .into_values()
            .map(|(product, units)| {
                let cost = Money(product.price.0.clone() * BigDecimal::from(units));
                OrderLineItem {
                    product,
                    units,
                    cost,
                }
            })
            .collect();

        Ok(Some(CartDetail { order, line_items }))
    }

    /// All orders belonging to the user, open and completed.
    pub async fn get_user_orders(&self, user_id: i32) -> Result<Vec<Order>, OrderServiceError> {
        let repo = OrderRepo::new();

        let orders = repo
            .get_by_user_id(user_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?;

        Ok(orders.unwrap_or_default())
    }

    /// Deletes one of the user's orders. Rejected while line items still
    /// reference it.
    pub async fn delete_order(&self, user_id: i32, order_id: i32) -> Result<(), OrderServiceError> {
        let repo = OrderRepo::new();

        let order = repo
            .get_by_id(order_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?
            .ok_or(OrderServiceError::OrderNotFound)?;

        if order.user_id != user_id {
            return Err(OrderServiceError::OrderNotFound);
        }

        match repo.delete(order_id).await {
            Ok(()) => Ok(()),
            Err(result::Error::DatabaseError(
                result::DatabaseErrorKind::ForeignKeyViolation,
                _,
            )) => Err(OrderServiceError::OrderHasLineItems),
            Err(e) => {
                tracing::error!(order_id, error = %e, "order deletion failed");
                Err(OrderServiceError::DatabaseError)
            }
        }
    }
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new()
    }
}

fn map_cart_error(e: CartOpError) -> OrderServiceError {
    match e {
        CartOpError::NoOpenOrder => OrderServiceError::NoOpenOrder,
        CartOpError::LineItemNotFound => OrderServiceError::LineItemNotFound,
        CartOpError::MultipleOpenOrders(n) => {
            tracing::error!(open_orders = n, "multiple open orders for one user");
            OrderServiceError::ConsistencyViolation
        }
        CartOpError::Database(result::Error::DatabaseError(
            result::DatabaseErrorKind::ForeignKeyViolation,
            _,
        )) => OrderServiceError::ProductNotFound,
        CartOpError::Database(e) => {
            tracing::error!(error = %e, "cart operation failed");
            OrderServiceError::DatabaseError
        }
    }
}

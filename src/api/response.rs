use crate::data::models::order::Order;
use crate::data::models::order_product::OrderProduct;
use crate::data::models::payment_type::PaymentType;
use crate::data::models::product::Product;
use crate::data::models::product_type::ProductType;
use crate::services::order_service::{CartDetail, OrderLineItem};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Serialize, Debug, Clone)]
pub struct LoginResponse {
    pub token: String,
    pub message: String,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug)]
pub struct ProductResponse {
    pub product_id: i32,
    pub user_id: i32,
    pub product_type_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub quantity: i32,
    pub city: Option<String>,
    pub image_path: Option<String>,
    pub version: i32,
    pub created_at: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            product_id: product.product_id,
            user_id: product.user_id,
            product_type_id: product.product_type_id,
            title: product.title,
            description: product.description,
            price: product.price.0,
            quantity: product.quantity,
            city: product.city,
            image_path: product.image_path,
            version: product.version,
            created_at: product.created_at.map(|d| d.to_string()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ProductTypeResponse {
    pub product_type_id: i32,
    pub label: String,
}

impl From<ProductType> for ProductTypeResponse {
    fn from(product_type: ProductType) -> Self {
        Self {
            product_type_id: product_type.product_type_id,
            label: product_type.label,
        }
    }
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug)]
pub struct PaymentTypeResponse {
    pub payment_type_id: i32,
    pub user_id: i32,
    pub description: String,
    pub account_number: String,
    pub version: i32,
    pub created_at: Option<String>,
}

impl From<PaymentType> for PaymentTypeResponse {
    fn from(payment_type: PaymentType) -> Self {
        Self {
            payment_type_id: payment_type.payment_type_id,
            user_id: payment_type.user_id,
            description: payment_type.description,
            account_number: payment_type.account_number,
            version: payment_type.version,
            created_at: payment_type.created_at.map(|d| d.to_string()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct OrderResponse {
    pub order_id: i32,
    pub user_id: i32,
    pub payment_type_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.order_id,
            user_id: order.user_id,
            payment_type_id: order.payment_type_id,
            created_at: order.created_at.map(|d| d.to_string()),
            completed_at: order.completed_at.map(|d| d.to_string()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct OrderProductResponse {
    pub order_product_id: i32,
    pub order_id: i32,
    pub product_id: i32,
}

impl From<OrderProduct> for OrderProductResponse {
    fn from(line: OrderProduct) -> Self {
        Self {
            order_product_id: line.order_product_id,
            order_id: line.order_id,
            product_id: line.product_id,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct OrderLineItemResponse {
    pub product: ProductResponse,
    pub units: u32,
    pub cost: BigDecimal,
}

impl From<OrderLineItem> for OrderLineItemResponse {
    fn from(line: OrderLineItem) -> Self {
        Self {
            product: ProductResponse::from(line.product),
            units: line.units,
            cost: line.cost.0,
        }
    }
}

/// The cart view. An empty cart is `order: null` with no line items,
/// a valid response rather than an error.
#[derive(Serialize, Deserialize, Debug)]
pub struct CartDetailResponse {
    pub order: Option<OrderResponse>,
    pub line_items: Vec<OrderLineItemResponse>,
}

impl CartDetailResponse {
    pub fn empty() -> Self {
        Self {
            order: None,
            line_items: Vec::new(),
        }
    }
}

impl From<CartDetail> for CartDetailResponse {
    fn from(detail: CartDetail) -> Self {
        Self {
            order: Some(OrderResponse::from(detail.order)),
            line_items: detail
                .line_items
                .into_iter()
                .map(OrderLineItemResponse::from)
                .collect(),
        }
    }
}

//! Order wire types shared by the order handlers.

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pasal_app::domain::orders::models::{Order, OrderItem};

use crate::carts::models::PriceTotalsResponse;

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// The owning user
    pub user_uuid: Uuid,

    /// Payment method, `khalti` or `cash_on_delivery`
    pub payment_method: String,

    /// Payment lifecycle state
    pub payment_state: String,

    /// Frozen line items
    pub items: Vec<OrderItemResponse>,

    /// Frozen totals
    pub totals: PriceTotalsResponse,

    /// Whether the order is paid
    pub is_paid: bool,

    /// When the order was paid
    pub paid_at: Option<String>,

    /// Whether the order was delivered
    pub is_delivered: bool,

    /// When the order was delivered
    pub delivered_at: Option<String>,

    /// Whether the order was cancelled
    pub is_cancelled: bool,

    /// When the order was cancelled
    pub cancelled_at: Option<String>,

    /// Why the order was cancelled
    pub cancel_reason: Option<String>,

    /// The date and time the order was created
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid,
            user_uuid: order.user_uuid,
            payment_method: order.payment_method.as_str().to_string(),
            payment_state: order.payment_state.as_str().to_string(),
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            totals: order.totals.into(),
            is_paid: order.is_paid,
            paid_at: order.paid_at.as_ref().map(ToString::to_string),
            is_delivered: order.is_delivered,
            delivered_at: order.delivered_at.as_ref().map(ToString::to_string),
            is_cancelled: order.is_cancelled,
            cancelled_at: order.cancelled_at.as_ref().map(ToString::to_string),
            cancel_reason: order.cancel_reason,
            created_at: order.created_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    /// The unique identifier of the order item
    pub uuid: Uuid,

    /// The product this line froze
    pub product_uuid: Uuid,

    /// Product name at order time
    pub name: String,

    /// Quantity
    pub quantity: u32,

    /// Unit price at order time
    pub unit_price: String,

    /// Discount percentage in effect at order time
    pub discount_percentage: Option<String>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            uuid: item.uuid,
            product_uuid: item.product_uuid,
            name: item.name,
            quantity: item.quantity,
            unit_price: item.unit_price.to_string(),
            discount_percentage: item.discount_percentage.map(|p| p.to_string()),
        }
    }
}

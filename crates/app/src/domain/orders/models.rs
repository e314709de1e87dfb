//! Order Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use uuid::Uuid;

use pasal::{LineItem, PriceTotals};

/// Where an order sits in its payment lifecycle.
///
/// `Paid` and `Cancelled` are terminal and mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentState {
    /// Created, no charge initiated yet.
    Pending,

    /// A gateway charge has been initiated and awaits verification.
    Initiated,

    /// The charge was verified and stock committed.
    Paid,

    /// Cancelled before payment.
    Cancelled,
}

impl PaymentState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Initiated => "initiated",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }
}

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Online payment through the Khalti gateway.
    Khalti,

    /// Settled on delivery.
    CashOnDelivery,
}

impl PaymentMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Khalti => "khalti",
            Self::CashOnDelivery => "cash_on_delivery",
        }
    }
}

/// Order Model
///
/// Line items and totals are a snapshot frozen at creation time; they never
/// track later catalog changes.
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub payment_method: PaymentMethod,
    pub payment_state: PaymentState,
    pub items: Vec<OrderItem>,
    pub totals: PriceTotals,
    pub is_paid: bool,
    pub paid_at: Option<Timestamp>,
    pub is_delivered: bool,
    pub delivered_at: Option<Timestamp>,
    pub is_cancelled: bool,
    pub cancelled_at: Option<Timestamp>,
    pub cancel_reason: Option<String>,
    pub gateway_pidx: Option<String>,
    pub gateway_transaction_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One frozen line of an order.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub discount_percentage: Option<Decimal>,
}

/// New Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: Uuid,
    pub items: Vec<LineItem>,
    pub payment_method: PaymentMethod,
}

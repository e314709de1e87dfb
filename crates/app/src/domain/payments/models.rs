//! Payment Models

use jiff::Timestamp;
use uuid::Uuid;

use crate::domain::orders::models::Order;

/// Gateway status string for a completed charge.
pub const GATEWAY_STATUS_COMPLETED: &str = "Completed";

/// Everything the gateway needs to start a charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiateRequest {
    /// Charge amount in minor units (paisa).
    pub amount_paisa: i64,

    /// Merchant-side id correlating the charge to an order.
    pub purchase_order_id: Uuid,

    /// Human-readable label shown on the gateway's pay page.
    pub purchase_order_name: String,
}

/// The gateway's answer to an initiate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiatedPayment {
    /// Opaque payment session handle.
    pub pidx: String,

    /// Where to redirect the customer to complete payment.
    pub payment_url: String,
}

/// The gateway's authoritative view of a charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentLookup {
    pub pidx: String,

    /// Confirmed amount in minor units.
    pub total_paisa: i64,

    /// Gateway status, e.g. `"Completed"`, `"Pending"`, `"Expired"`.
    pub status: String,

    /// Gateway transaction id, present once the charge settled.
    pub transaction_id: Option<String>,
}

/// Lifecycle of a pending purchase record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseStatus {
    Pending,
    Completed,
}

impl PurchaseStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

/// Bridges an initiated charge to its order until confirmation.
#[derive(Debug, Clone)]
pub struct PendingPurchase {
    pub uuid: Uuid,
    pub order_uuid: Uuid,
    pub pidx: String,
    pub amount_paisa: i64,
    pub status: PurchaseStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Parameters delivered by the gateway's return redirect.
///
/// Untrusted: verification always re-reads the charge from the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCallback {
    /// The order the gateway claims this payment belongs to.
    pub purchase_order_id: Uuid,

    /// Session handle echoed by the gateway, if present.
    pub pidx: Option<String>,

    /// Amount the callback claims was paid, in minor units.
    pub amount_paisa: Option<i64>,
}

/// Outcome of a successful verification.
#[derive(Debug, Clone)]
pub enum VerifiedPayment {
    /// This call confirmed the charge and committed stock.
    Confirmed(Order),

    /// The order was already paid; nothing changed.
    AlreadyPaid(Order),
}

impl VerifiedPayment {
    /// The verified order, however we got there.
    #[must_use]
    pub fn order(&self) -> &Order {
        match self {
            Self::Confirmed(order) | Self::AlreadyPaid(order) => order,
        }
    }
}

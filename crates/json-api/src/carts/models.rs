//! Cart wire types shared by the cart and order handlers.

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pasal::{LineItem, PriceTotals, PricedLineItem};

use crate::extensions::ResultExt;

/// One line of a client-held cart.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LineItemBody {
    /// Product reference
    pub product: Uuid,

    /// Requested quantity
    pub quantity: u32,

    /// Claimed unit price, e.g. `"40.00"`
    pub unit_price: String,
}

impl LineItemBody {
    pub(crate) fn into_line_item(self) -> Result<LineItem, StatusError> {
        Ok(LineItem {
            product: self.product,
            quantity: self.quantity,
            unit_price: self
                .unit_price
                .parse()
                .or_400("could not parse unit price")?,
        })
    }
}

/// A verified, priced cart line.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PricedLineItemResponse {
    /// Product reference
    pub product: Uuid,

    /// Quantity
    pub quantity: u32,

    /// Verified unit price
    pub unit_price: String,

    /// Discount percentage in effect, if any
    pub discount_percentage: Option<String>,
}

impl From<PricedLineItem> for PricedLineItemResponse {
    fn from(item: PricedLineItem) -> Self {
        Self {
            product: item.product,
            quantity: item.quantity,
            unit_price: item.unit_price.to_string(),
            discount_percentage: item.discount_percentage.map(|p| p.to_string()),
        }
    }
}

/// Derived price totals.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PriceTotalsResponse {
    /// Sum of unit price × quantity
    pub items: String,

    /// Shipping fee
    pub shipping: String,

    /// Tax on the items total
    pub tax: String,

    /// Grand total
    pub total: String,

    /// Total saved through discounts
    pub savings: String,
}

impl From<PriceTotals> for PriceTotalsResponse {
    fn from(totals: PriceTotals) -> Self {
        Self {
            items: totals.items.to_string(),
            shipping: totals.shipping.to_string(),
            tax: totals.tax.to_string(),
            total: totals.total.to_string(),
            savings: totals.savings.to_string(),
        }
    }
}

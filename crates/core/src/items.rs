//! Line items and authoritative catalog entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jiff::Timestamp;

use crate::discounts::DiscountWindow;

/// One line of a cart as supplied by the caller.
///
/// The unit price is the caller's claim and is verified against the
/// catalog before any total is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product reference.
    pub product: Uuid,

    /// Requested quantity.
    pub quantity: u32,

    /// Caller-supplied unit price (already discounted, if applicable).
    pub unit_price: Decimal,
}

/// The authoritative view of a product used to verify a line item.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// List price.
    pub price: Decimal,

    /// Units currently in stock.
    pub stock: i64,

    /// Discount window, when the product carries a complete one.
    pub discount: Option<DiscountWindow>,
}

impl CatalogEntry {
    /// The expected unit price at `now` plus the percentage in effect,
    /// if any.
    #[must_use]
    pub fn unit_price_at(&self, now: Timestamp) -> (Decimal, Option<Decimal>) {
        match &self.discount {
            Some(window) if window.is_valid_at(now) => {
                (window.apply_to(self.price), Some(window.percentage))
            }
            _ => (self.price, None),
        }
    }
}

/// A line item that passed verification, priced from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedLineItem {
    /// Product reference.
    pub product: Uuid,

    /// Quantity.
    pub quantity: u32,

    /// Verified unit price.
    pub unit_price: Decimal,

    /// Percentage that produced `unit_price`, when a discount applied.
    pub discount_percentage: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_price_at_uses_list_price_without_discount() {
        let entry = CatalogEntry {
            price: Decimal::from(50),
            stock: 5,
            discount: None,
        };

        let now = "2026-06-01T00:00:00Z".parse().expect("timestamp literal");

        assert_eq!(entry.unit_price_at(now), (Decimal::from(50), None));
    }

    #[test]
    fn unit_price_at_applies_valid_discount() {
        let entry = CatalogEntry {
            price: Decimal::from(50),
            stock: 5,
            discount: Some(DiscountWindow {
                percentage: Decimal::from(20),
                active: true,
                starts_at: "2026-01-01T00:00:00Z".parse().expect("timestamp literal"),
                ends_at: "2026-12-31T00:00:00Z".parse().expect("timestamp literal"),
            }),
        };

        let now = "2026-06-01T00:00:00Z".parse().expect("timestamp literal");
        let (price, percentage) = entry.unit_price_at(now);

        assert_eq!(price.to_string(), "40.00");
        assert_eq!(percentage, Some(Decimal::from(20)));
    }

    #[test]
    fn unit_price_at_ignores_expired_discount() {
        let entry = CatalogEntry {
            price: Decimal::from(50),
            stock: 5,
            discount: Some(DiscountWindow {
                percentage: Decimal::from(20),
                active: true,
                starts_at: "2025-01-01T00:00:00Z".parse().expect("timestamp literal"),
                ends_at: "2025-12-31T00:00:00Z".parse().expect("timestamp literal"),
            }),
        };

        let now = "2026-06-01T00:00:00Z".parse().expect("timestamp literal");

        assert_eq!(entry.unit_price_at(now), (Decimal::from(50), None));
    }
}

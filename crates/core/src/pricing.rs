//! Totals computation and line-item verification.

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    items::{CatalogEntry, LineItem, PricedLineItem},
    money::{
        FREE_SHIPPING_THRESHOLD, PRICE_TOLERANCE, SHIPPING_FLAT_FEE, TAX_RATE, round_amount,
    },
};

/// Derived price totals for a set of line items.
///
/// Always recomputed from line items, never stored independently of them.
/// Every field carries exactly two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTotals {
    /// Sum of unit price × quantity across all items.
    pub items: Decimal,

    /// Flat fee, waived above the free-shipping threshold.
    pub shipping: Decimal,

    /// Tax on the items total.
    pub tax: Decimal,

    /// Grand total: items + shipping + tax.
    pub total: Decimal,

    /// Total saved through discounts, derived from discounted unit prices.
    pub savings: Decimal,
}

/// Rejections produced while verifying a batch of line items.
///
/// Any failing item rejects the whole batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// The batch contained no items.
    #[error("no line items supplied")]
    EmptyBatch,

    /// A line item referenced a product missing from the catalog.
    #[error("unknown product {0}")]
    UnknownProduct(Uuid),

    /// A supplied unit price deviated from the derived price beyond tolerance.
    #[error("price mismatch for product {product}: supplied {supplied}, expected {expected}")]
    PriceMismatch {
        /// The offending product.
        product: Uuid,

        /// The caller's claimed unit price.
        supplied: Decimal,

        /// The price derived from the catalog.
        expected: Decimal,
    },

    /// A line item requested a zero quantity.
    #[error("invalid quantity for product {0}")]
    InvalidQuantity(Uuid),

    /// A line item requested more units than are in stock.
    #[error("insufficient stock for product {product}: requested {requested}, available {available}")]
    InsufficientStock {
        /// The offending product.
        product: Uuid,

        /// Requested quantity.
        requested: u32,

        /// Units actually in stock.
        available: i64,
    },
}

/// Verify caller-supplied line items against the authoritative catalog.
///
/// Each supplied unit price is checked against the price independently
/// derived from the catalog entry (discount window evaluated at `now`);
/// a deviation beyond 0.01 rejects the whole batch naming the offending
/// product, as does an unknown product, a zero quantity, or a quantity
/// exceeding stock.
///
/// # Errors
///
/// Returns a [`PricingError`] describing the first rejected item.
pub fn verify_items(
    items: &[LineItem],
    catalog: &FxHashMap<Uuid, CatalogEntry>,
    now: Timestamp,
) -> Result<Vec<PricedLineItem>, PricingError> {
    if items.is_empty() {
        return Err(PricingError::EmptyBatch);
    }

    let mut priced = Vec::with_capacity(items.len());

    for item in items {
        let entry = catalog
            .get(&item.product)
            .ok_or(PricingError::UnknownProduct(item.product))?;

        if item.quantity == 0 {
            return Err(PricingError::InvalidQuantity(item.product));
        }

        if i64::from(item.quantity) > entry.stock {
            return Err(PricingError::InsufficientStock {
                product: item.product,
                requested: item.quantity,
                available: entry.stock,
            });
        }

        let (expected, discount_percentage) = entry.unit_price_at(now);
        let supplied = round_amount(item.unit_price);

        if (supplied - expected).abs() > PRICE_TOLERANCE {
            return Err(PricingError::PriceMismatch {
                product: item.product,
                supplied,
                expected,
            });
        }

        priced.push(PricedLineItem {
            product: item.product,
            quantity: item.quantity,
            unit_price: supplied,
            discount_percentage,
        });
    }

    Ok(priced)
}

/// Compute [`PriceTotals`] for verified line items.
///
/// Shipping is waived when the items total exceeds the free-shipping
/// threshold; tax applies to the items total; savings are derived from the
/// discounted unit price via `original = discounted / (1 − pct/100)`.
#[must_use]
pub fn price_totals(items: &[PricedLineItem]) -> PriceTotals {
    let mut items_total = Decimal::ZERO;
    let mut savings = Decimal::ZERO;

    for item in items {
        let quantity = Decimal::from(item.quantity);

        items_total += item.unit_price * quantity;

        if let Some(percentage) = item.discount_percentage {
            let multiplier = Decimal::ONE - percentage / Decimal::ONE_HUNDRED;

            // A 100% discount leaves no derivable original price.
            if multiplier > Decimal::ZERO {
                let original = item.unit_price / multiplier;

                savings += (original - item.unit_price) * quantity;
            }
        }
    }

    let items_total = round_amount(items_total);

    let shipping = if items_total > FREE_SHIPPING_THRESHOLD {
        round_amount(Decimal::ZERO)
    } else {
        round_amount(SHIPPING_FLAT_FEE)
    };

    let tax = round_amount(items_total * TAX_RATE);

    PriceTotals {
        items: items_total,
        shipping,
        tax,
        total: round_amount(items_total + shipping + tax),
        savings: round_amount(savings),
    }
}

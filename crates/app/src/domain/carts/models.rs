//! Cart Models

use pasal::{PriceTotals, PricedLineItem};

/// A priced cart snapshot: verified lines plus derived totals.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedCart {
    pub items: Vec<PricedLineItem>,
    pub totals: PriceTotals,
}

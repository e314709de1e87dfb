//! Discount windows.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::round_amount;

/// A percentage discount bounded by an activation flag and a time window.
///
/// Products carry at most one window. A product whose discount columns are
/// incomplete has no window at all, which evaluates as "not discounted".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountWindow {
    /// Discount percentage, in `(0, 100]`.
    pub percentage: Decimal,

    /// Whether the discount is switched on.
    pub active: bool,

    /// Start of the window, inclusive.
    pub starts_at: Timestamp,

    /// End of the window, inclusive.
    pub ends_at: Timestamp,
}

impl DiscountWindow {
    /// Whether the discount applies at `now`.
    ///
    /// Requires the active flag, a percentage in `(0, 100]`, and `now`
    /// within `[starts_at, ends_at]`.
    #[must_use]
    pub fn is_valid_at(&self, now: Timestamp) -> bool {
        self.active
            && self.percentage > Decimal::ZERO
            && self.percentage <= Decimal::ONE_HUNDRED
            && self.starts_at <= now
            && now <= self.ends_at
    }

    /// The unit price after applying this discount to `list_price`,
    /// rounded to two decimal places.
    #[must_use]
    pub fn apply_to(&self, list_price: Decimal) -> Decimal {
        let multiplier = Decimal::ONE - self.percentage / Decimal::ONE_HUNDRED;

        round_amount(list_price * multiplier)
    }
}

//! Monetary rounding and minor-unit conversion.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Orders above this items total ship for free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Flat shipping fee charged below the free-shipping threshold.
pub const SHIPPING_FLAT_FEE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Tax rate applied to the items total (15%).
pub const TAX_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Supplied prices may deviate from the derived price by at most this much.
pub const PRICE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

const MINOR_UNITS_PER_UNIT: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Round a monetary amount to exactly two decimal places.
///
/// Midpoints round away from zero, and the result always carries a scale of
/// two so `150` becomes `150.00`.
#[must_use]
pub fn round_amount(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    rounded
}

/// Convert a major-unit amount to the gateway's minor units (paisa).
///
/// Returns `None` when the amount does not fit in an `i64` after the fixed
/// ×100 conversion.
#[must_use]
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    round_amount(amount)
        .checked_mul(MINOR_UNITS_PER_UNIT)
        .and_then(|minor| minor.to_i64())
}

/// Convert a minor-unit amount back to a two-decimal major-unit amount.
#[must_use]
pub fn from_minor_units(minor: i64) -> Decimal {
    let mut amount = Decimal::from(minor) / MINOR_UNITS_PER_UNIT;
    amount.rescale(2);

    amount
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_amount_pads_scale_to_two() {
        assert_eq!(round_amount(Decimal::from(150)).to_string(), "150.00");
    }

    #[test]
    fn round_amount_rounds_midpoint_away_from_zero() {
        let amount: Decimal = "22.505".parse().expect("decimal literal");

        assert_eq!(round_amount(amount).to_string(), "22.51");
    }

    #[test]
    fn to_minor_units_multiplies_by_one_hundred() {
        let amount: Decimal = "172.50".parse().expect("decimal literal");

        assert_eq!(to_minor_units(amount), Some(17250));
    }

    #[test]
    fn from_minor_units_round_trips() {
        assert_eq!(from_minor_units(17250).to_string(), "172.50");
    }

    #[test]
    fn to_minor_units_rejects_overflow() {
        assert_eq!(to_minor_units(Decimal::MAX), None);
    }
}

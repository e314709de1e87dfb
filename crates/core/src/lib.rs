//! Pricing engine for the pasal storefront.
//!
//! Pure calculation over cart/order line items: discount-window evaluation,
//! price verification against the authoritative catalog, and totals
//! (items, shipping, tax, savings, grand total). No I/O — the same code
//! prices a cart quote and freezes an order snapshot.

pub mod discounts;
pub mod items;
pub mod money;
pub mod pricing;

pub use discounts::DiscountWindow;
pub use items::{CatalogEntry, LineItem, PricedLineItem};
pub use money::{from_minor_units, round_amount, to_minor_units};
pub use pricing::{PriceTotals, PricingError, price_totals, verify_items};

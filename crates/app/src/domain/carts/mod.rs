//! Carts
//!
//! Carts live client-side; this domain prices them. The same engine run
//! here is what freezes an order snapshot, so a quoted cart and the order
//! created from it always agree.

pub mod errors;
pub mod models;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;

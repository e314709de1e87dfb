//! Payments
//!
//! Reconciles orders against the external Khalti gateway: initiate a
//! charge, then confirm it from the verification callback with a second
//! authoritative lookup before any state is mutated.

pub mod errors;
pub mod khalti;
pub mod models;
mod repository;
pub mod service;

pub use errors::PaymentsServiceError;
pub use khalti::{KhaltiClient, KhaltiConfig, KhaltiError};
pub use service::*;

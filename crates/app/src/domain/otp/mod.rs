//! One-time codes
//!
//! Keyed store with explicit TTL. Codes live in Postgres (never process
//! memory), expiry is checked on read, and an entry is deleted on
//! successful consumption or on observed expiry.

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::OtpServiceError;
pub use service::*;

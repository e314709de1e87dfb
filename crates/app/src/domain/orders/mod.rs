//! Orders

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub(crate) use repository::PgOrdersRepository;

pub use errors::OrdersServiceError;
pub use service::*;

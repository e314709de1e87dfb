//! Bearer-token authentication and user provisioning.

pub mod errors;
pub mod models;
pub mod repository;
pub mod service;
pub mod token;

pub use errors::AuthServiceError;
pub use models::{Actor, Role};
pub use service::*;

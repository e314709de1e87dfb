//! Favorites

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::FavoritesServiceError;
pub use service::*;

//! Favorite Models

use jiff::Timestamp;
use uuid::Uuid;

/// A product a user has marked as a favorite.
#[derive(Debug, Clone)]
pub struct Favorite {
    pub user_uuid: Uuid,
    pub product_uuid: Uuid,
    pub created_at: Timestamp,
}

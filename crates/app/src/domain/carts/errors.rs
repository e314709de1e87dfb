//! Carts service errors.

use thiserror::Error;

use pasal::PricingError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}

//! Payments service errors.

use sqlx::Error;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::payments::khalti::KhaltiError;

#[derive(Debug, Error)]
pub enum PaymentsServiceError {
    #[error("order not found")]
    OrderNotFound,

    #[error("caller may not pay for this order")]
    Forbidden,

    #[error("order is {0}; payment cannot proceed")]
    StateConflict(&'static str),

    #[error("no payment was initiated for this order")]
    NotInitiated,

    #[error("order total does not fit in minor units")]
    AmountOverflow,

    #[error(transparent)]
    Gateway(#[from] KhaltiError),

    #[error("gateway reports payment status {0:?}, not Completed")]
    StatusNotCompleted(String),

    #[error("gateway amount {actual} does not match expected {expected}")]
    AmountMismatch {
        /// Minor-unit amount stored when the charge was initiated.
        expected: i64,

        /// Minor-unit amount the gateway reported.
        actual: i64,
    },

    #[error("product {0} disappeared while committing stock")]
    ProductMissing(Uuid),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PaymentsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::OrderNotFound;
        }

        Self::Sql(error)
    }
}

//! OTP service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OtpServiceError {
    #[error("no code issued for this key")]
    NotFound,

    #[error("code expired")]
    Expired,

    #[error("code does not match")]
    Mismatch,

    #[error("ttl must be positive")]
    InvalidTtl,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OtpServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}

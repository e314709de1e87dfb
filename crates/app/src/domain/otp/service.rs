//! OTP service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use rand::Rng;

use crate::{
    auth::token::hash_token,
    database::Db,
    domain::otp::{errors::OtpServiceError, models::IssuedOtp, repository::PgOtpRepository},
};

#[derive(Debug, Clone)]
pub struct PgOtpService {
    db: Db,
    repository: PgOtpRepository,
}

impl PgOtpService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOtpRepository::new(),
        }
    }
}

fn generate_code() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000u32))
}

#[async_trait]
impl OtpService for PgOtpService {
    async fn issue(&self, key: &str, ttl_seconds: i64) -> Result<IssuedOtp, OtpServiceError> {
        if ttl_seconds <= 0 {
            return Err(OtpServiceError::InvalidTtl);
        }

        let code = generate_code();

        let expires_at = Timestamp::now()
            .checked_add(SignedDuration::from_secs(ttl_seconds))
            .map_err(|_jiff_error| OtpServiceError::InvalidTtl)?;

        let mut tx = self.db.begin().await?;

        self.repository
            .upsert_otp(&mut tx, key, &hash_token(&code), expires_at)
            .await?;

        tx.commit().await?;

        Ok(IssuedOtp { code, expires_at })
    }

    async fn consume(&self, key: &str, code: &str, now: Timestamp) -> Result<(), OtpServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_otp(&mut tx, key).await?;

        if record.expires_at < now {
            // Expired entries are removed as soon as a read observes them.
            self.repository.delete_otp(&mut tx, key).await?;
            tx.commit().await?;

            return Err(OtpServiceError::Expired);
        }

        if record.code_hash != hash_token(code) {
            return Err(OtpServiceError::Mismatch);
        }

        self.repository.delete_otp(&mut tx, key).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OtpService: Send + Sync {
    /// Issue a one-time code for `key`, replacing any previous one.
    async fn issue(&self, key: &str, ttl_seconds: i64) -> Result<IssuedOtp, OtpServiceError>;

    /// Verify and consume the code stored for `key`.
    ///
    /// Deletes the entry on success or on observed expiry; a mismatching
    /// code leaves it in place.
    async fn consume(&self, key: &str, code: &str, now: Timestamp) -> Result<(), OtpServiceError>;
}

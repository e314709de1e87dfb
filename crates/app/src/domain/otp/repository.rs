//! OTP Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::otp::models::OtpRecord;

const UPSERT_OTP_SQL: &str = include_str!("sql/upsert_otp.sql");
const GET_OTP_SQL: &str = include_str!("sql/get_otp.sql");
const DELETE_OTP_SQL: &str = include_str!("sql/delete_otp.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOtpRepository;

impl PgOtpRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn upsert_otp(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
        code_hash: &str,
        expires_at: jiff::Timestamp,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_OTP_SQL)
            .bind(key)
            .bind(code_hash)
            .bind(SqlxTimestamp::from(expires_at))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_otp(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
    ) -> Result<OtpRecord, sqlx::Error> {
        query_as::<Postgres, OtpRecord>(GET_OTP_SQL)
            .bind(key)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_otp(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
    ) -> Result<(), sqlx::Error> {
        query(DELETE_OTP_SQL).bind(key).execute(&mut **tx).await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for OtpRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            code_hash: row.try_get("code_hash")?,
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
        })
    }
}

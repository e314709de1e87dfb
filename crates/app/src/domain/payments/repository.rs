//! Pending Purchases Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::payments::models::{PendingPurchase, PurchaseStatus};

const UPSERT_PENDING_PURCHASE_SQL: &str = include_str!("sql/upsert_pending_purchase.sql");
const GET_PENDING_PURCHASE_SQL: &str = include_str!("sql/get_pending_purchase.sql");
const COMPLETE_PENDING_PURCHASE_SQL: &str = include_str!("sql/complete_pending_purchase.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPendingPurchasesRepository;

impl PgPendingPurchasesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Record the expected charge for an order, replacing any earlier
    /// attempt.
    pub(crate) async fn upsert_pending_purchase(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        pidx: &str,
        amount_paisa: i64,
    ) -> Result<PendingPurchase, sqlx::Error> {
        query_as::<Postgres, PendingPurchase>(UPSERT_PENDING_PURCHASE_SQL)
            .bind(Uuid::now_v7())
            .bind(order)
            .bind(pidx)
            .bind(amount_paisa)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_pending_purchase(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<Option<PendingPurchase>, sqlx::Error> {
        query_as::<Postgres, PendingPurchase>(GET_PENDING_PURCHASE_SQL)
            .bind(order)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn complete_pending_purchase(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(COMPLETE_PENDING_PURCHASE_SQL)
            .bind(order)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for PendingPurchase {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = match status.as_str() {
            "pending" => PurchaseStatus::Pending,
            "completed" => PurchaseStatus::Completed,
            other => {
                return Err(sqlx::Error::ColumnDecode {
                    index: "status".to_string(),
                    source: format!("unknown purchase status {other:?}").into(),
                });
            }
        };

        Ok(Self {
            uuid: row.try_get("uuid")?,
            order_uuid: row.try_get("order_uuid")?,
            pidx: row.try_get("pidx")?,
            amount_paisa: row.try_get("amount_paisa")?,
            status,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

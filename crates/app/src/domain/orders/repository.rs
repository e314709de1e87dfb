//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use pasal::{PriceTotals, PricedLineItem};

use crate::domain::orders::models::{Order, OrderItem, PaymentMethod, PaymentState};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const LIST_ALL_ORDERS_SQL: &str = include_str!("sql/list_all_orders.sql");
const CANCEL_ORDER_SQL: &str = include_str!("sql/cancel_order.sql");
const MARK_DELIVERED_SQL: &str = include_str!("sql/mark_delivered.sql");
const SET_INITIATED_SQL: &str = include_str!("sql/set_initiated.sql");
const MARK_PAID_SQL: &str = include_str!("sql/mark_paid.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        user: Uuid,
        payment_method: PaymentMethod,
        totals: PriceTotals,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(order)
            .bind(user)
            .bind(payment_method.as_str())
            .bind(totals.items)
            .bind(totals.shipping)
            .bind(totals.tax)
            .bind(totals.total)
            .bind(totals.savings)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        name: &str,
        item: &PricedLineItem,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_ITEM_SQL)
            .bind(Uuid::now_v7())
            .bind(order)
            .bind(item.product)
            .bind(name)
            .bind(i64::from(item.quantity))
            .bind(item.unit_price)
            .bind(item.discount_percentage)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        query_as::<Postgres, OrderItem>(GET_ORDER_ITEMS_SQL)
            .bind(order)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: Uuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .bind(user)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_all_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ALL_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Cancel, guarded on the order still being unpaid.
    ///
    /// Returns `None` when no row matched the guard.
    pub(crate) async fn cancel_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        reason: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(CANCEL_ORDER_SQL)
            .bind(order)
            .bind(reason)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn mark_delivered(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(MARK_DELIVERED_SQL)
            .bind(order)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Store the gateway handle and move the order to `initiated`.
    ///
    /// Guarded on the order not being in a terminal state; re-initiating an
    /// already-initiated order replaces the handle.
    pub(crate) async fn set_initiated(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        pidx: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(SET_INITIATED_SQL)
            .bind(order)
            .bind(pidx)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Flip the order to `paid`, guarded on it being `initiated`.
    ///
    /// The guard makes the paid transition at-most-once under concurrent
    /// duplicate verification callbacks.
    pub(crate) async fn mark_paid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        transaction_id: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(MARK_PAID_SQL)
            .bind(order)
            .bind(transaction_id)
            .fetch_optional(&mut **tx)
            .await
    }
}

fn payment_state_from_column(value: &str, index: &str) -> Result<PaymentState, sqlx::Error> {
    match value {
        "pending" => Ok(PaymentState::Pending),
        "initiated" => Ok(PaymentState::Initiated),
        "paid" => Ok(PaymentState::Paid),
        "cancelled" => Ok(PaymentState::Cancelled),
        other => Err(sqlx::Error::ColumnDecode {
            index: index.to_string(),
            source: format!("unknown payment state {other:?}").into(),
        }),
    }
}

fn payment_method_from_column(value: &str, index: &str) -> Result<PaymentMethod, sqlx::Error> {
    match value {
        "khalti" => Ok(PaymentMethod::Khalti),
        "cash_on_delivery" => Ok(PaymentMethod::CashOnDelivery),
        other => Err(sqlx::Error::ColumnDecode {
            index: index.to_string(),
            source: format!("unknown payment method {other:?}").into(),
        }),
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let payment_state: String = row.try_get("payment_state")?;
        let payment_method: String = row.try_get("payment_method")?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            payment_method: payment_method_from_column(&payment_method, "payment_method")?,
            payment_state: payment_state_from_column(&payment_state, "payment_state")?,
            items: Vec::new(),
            totals: PriceTotals {
                items: row.try_get("items_price")?,
                shipping: row.try_get("shipping_price")?,
                tax: row.try_get("tax_price")?,
                total: row.try_get("total_price")?,
                savings: row.try_get("total_savings")?,
            },
            is_paid: row.try_get("is_paid")?,
            paid_at: row
                .try_get::<Option<SqlxTimestamp>, _>("paid_at")?
                .map(SqlxTimestamp::to_jiff),
            is_delivered: row.try_get("is_delivered")?,
            delivered_at: row
                .try_get::<Option<SqlxTimestamp>, _>("delivered_at")?
                .map(SqlxTimestamp::to_jiff),
            is_cancelled: row.try_get("is_cancelled")?,
            cancelled_at: row
                .try_get::<Option<SqlxTimestamp>, _>("cancelled_at")?
                .map(SqlxTimestamp::to_jiff),
            cancel_reason: row.try_get("cancel_reason")?,
            gateway_pidx: row.try_get("gateway_pidx")?,
            gateway_transaction_id: row.try_get("gateway_transaction_id")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity_i32: i32 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            name: row.try_get("name")?,
            quantity,
            unit_price: row.try_get::<Decimal, _>("unit_price")?,
            discount_percentage: row.try_get("discount_percentage")?,
        })
    }
}

//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Row, Transaction, query};
use uuid::Uuid;

use pasal::{price_totals, verify_items};

use crate::{
    auth::models::Actor,
    database::Db,
    domain::{
        orders::{
            errors::OrdersServiceError,
            models::{NewOrder, Order, PaymentState},
            repository::PgOrdersRepository,
        },
        products::PgProductsRepository,
    },
};

const GET_PRODUCT_NAMES_SQL: &str = include_str!("sql/get_product_names.sql");

/// Reason recorded when the caller does not supply one.
pub const DEFAULT_CANCEL_REASON: &str = "cancelled by customer";

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    products_repository: PgProductsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }

    async fn product_names(
        tx: &mut Transaction<'_, Postgres>,
        products: &[Uuid],
    ) -> Result<FxHashMap<Uuid, String>, sqlx::Error> {
        let rows = query(GET_PRODUCT_NAMES_SQL)
            .bind(products)
            .fetch_all(&mut **tx)
            .await?;

        let mut names = FxHashMap::default();

        for row in &rows {
            names.insert(row.try_get::<Uuid, _>("uuid")?, row.try_get("name")?);
        }

        Ok(names)
    }

    async fn get_owned_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        actor: Actor,
        order: Uuid,
    ) -> Result<Order, OrdersServiceError> {
        let order = self.repository.get_order(tx, order).await?;

        if !actor.may_access(order.user_uuid) {
            return Err(OrdersServiceError::Forbidden);
        }

        Ok(order)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(
        &self,
        actor: Actor,
        order: NewOrder,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let products: Vec<_> = order.items.iter().map(|item| item.product).collect();

        let catalog = self
            .products_repository
            .get_catalog_entries(&mut tx, &products)
            .await?;

        let names = Self::product_names(&mut tx, &products).await?;

        let priced = verify_items(&order.items, &catalog, Timestamp::now())?;
        let totals = price_totals(&priced);

        let mut created = self
            .repository
            .create_order(&mut tx, order.uuid, actor.user, order.payment_method, totals)
            .await?;

        for item in &priced {
            let name = names
                .get(&item.product)
                .ok_or(OrdersServiceError::InvalidReference)?;

            self.repository
                .create_order_item(&mut tx, created.uuid, name, item)
                .await?;
        }

        created.items = self.repository.get_order_items(&mut tx, created.uuid).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_order(&self, actor: Actor, order: Uuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut order = self.get_owned_order(&mut tx, actor, order).await?;

        order.items = self.repository.get_order_items(&mut tx, order.uuid).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(&self, actor: Actor) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx, actor.user).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_all_orders(&self, actor: Actor) -> Result<Vec<Order>, OrdersServiceError> {
        if !actor.is_admin() {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_all_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn cancel_order(
        &self,
        actor: Actor,
        order: Uuid,
        reason: Option<String>,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self.get_owned_order(&mut tx, actor, order).await?;

        match existing.payment_state {
            PaymentState::Paid => return Err(OrdersServiceError::StateConflict("already paid")),
            PaymentState::Cancelled => {
                return Err(OrdersServiceError::StateConflict("already cancelled"));
            }
            PaymentState::Pending | PaymentState::Initiated => {}
        }

        let reason = reason.unwrap_or_else(|| DEFAULT_CANCEL_REASON.to_string());

        // The guard re-checks the state; a concurrent transition wins.
        let Some(cancelled) = self.repository.cancel_order(&mut tx, order, &reason).await? else {
            return Err(OrdersServiceError::StateConflict("no longer cancellable"));
        };

        tx.commit().await?;

        Ok(cancelled)
    }

    async fn mark_delivered(&self, actor: Actor, order: Uuid) -> Result<Order, OrdersServiceError> {
        if !actor.is_admin() {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin().await?;

        let existing = self.repository.get_order(&mut tx, order).await?;

        if !existing.is_paid {
            return Err(OrdersServiceError::StateConflict("not paid"));
        }

        if existing.is_delivered {
            return Err(OrdersServiceError::StateConflict("already delivered"));
        }

        let Some(delivered) = self.repository.mark_delivered(&mut tx, order).await? else {
            return Err(OrdersServiceError::StateConflict("not deliverable"));
        };

        tx.commit().await?;

        Ok(delivered)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Price the supplied cart against the catalog and persist the order
    /// with a frozen line-item snapshot.
    async fn create_order(&self, actor: Actor, order: NewOrder)
    -> Result<Order, OrdersServiceError>;

    /// Retrieve a single order with its items. Owner or admin.
    async fn get_order(&self, actor: Actor, order: Uuid) -> Result<Order, OrdersServiceError>;

    /// The actor's own orders, newest first.
    async fn list_orders(&self, actor: Actor) -> Result<Vec<Order>, OrdersServiceError>;

    /// Every order in the store. Admin only.
    async fn list_all_orders(&self, actor: Actor) -> Result<Vec<Order>, OrdersServiceError>;

    /// Cancel an unpaid order. Owner or admin.
    async fn cancel_order(
        &self,
        actor: Actor,
        order: Uuid,
        reason: Option<String>,
    ) -> Result<Order, OrdersServiceError>;

    /// Mark a paid order as delivered. Admin only.
    async fn mark_delivered(&self, actor: Actor, order: Uuid)
    -> Result<Order, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use pasal::{LineItem, PricingError};

    use crate::{
        domain::{
            orders::models::PaymentMethod,
            products::{ProductsService, models::NewProduct},
        },
        test::TestContext,
    };

    use super::*;

    async fn seed_product(ctx: &TestContext, price: i64, stock: i64) -> Uuid {
        let uuid = Uuid::now_v7();

        ctx.products
            .create_product(
                ctx.admin,
                NewProduct {
                    uuid,
                    name: "Lokta notebook".to_string(),
                    price: Decimal::from(price),
                    stock,
                    discount: None,
                },
            )
            .await
            .expect("seed product should succeed");

        uuid
    }

    fn new_order(product: Uuid, quantity: u32, unit_price: i64) -> NewOrder {
        NewOrder {
            uuid: Uuid::now_v7(),
            items: vec![LineItem {
                product,
                quantity,
                unit_price: Decimal::from(unit_price),
            }],
            payment_method: PaymentMethod::Khalti,
        }
    }

    #[tokio::test]
    async fn create_order_freezes_verified_totals() -> TestResult {
        let ctx = TestContext::new().await;
        let product = seed_product(&ctx, 50, 10).await;

        let order = ctx
            .orders
            .create_order(ctx.customer, new_order(product, 3, 50))
            .await?;

        assert_eq!(order.payment_state, PaymentState::Pending);
        assert_eq!(order.totals.items.to_string(), "150.00");
        assert_eq!(order.totals.total.to_string(), "172.50");
        assert_eq!(order.items.len(), 1);
        assert!(!order.is_paid);
        assert!(order.paid_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn create_order_does_not_touch_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let product = seed_product(&ctx, 50, 10).await;

        ctx.orders
            .create_order(ctx.customer, new_order(product, 3, 50))
            .await?;

        let current = ctx.products.get_product(product).await?;

        assert_eq!(current.stock, 10, "stock only moves on payment");

        Ok(())
    }

    #[tokio::test]
    async fn create_order_rejects_insufficient_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let product = seed_product(&ctx, 50, 2).await;

        let result = ctx
            .orders
            .create_order(ctx.customer, new_order(product, 3, 50))
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::Pricing(PricingError::InsufficientStock { .. }))
            ),
            "expected InsufficientStock, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn order_snapshot_survives_later_price_change() -> TestResult {
        let ctx = TestContext::new().await;
        let product = seed_product(&ctx, 50, 10).await;

        let order = ctx
            .orders
            .create_order(ctx.customer, new_order(product, 3, 50))
            .await?;

        ctx.products
            .update_product(
                ctx.admin,
                product,
                crate::domain::products::models::ProductUpdate {
                    name: "Lokta notebook".to_string(),
                    price: Decimal::from(70),
                    stock: 10,
                    discount: None,
                },
            )
            .await?;

        let reread = ctx.orders.get_order(ctx.customer, order.uuid).await?;

        assert_eq!(reread.totals.items.to_string(), "150.00");

        let item = reread.items.first().expect("one frozen item");

        assert_eq!(item.unit_price, Decimal::from(50));

        Ok(())
    }

    #[tokio::test]
    async fn get_order_hidden_from_other_customers() -> TestResult {
        let ctx = TestContext::new().await;
        let product = seed_product(&ctx, 50, 10).await;

        let order = ctx
            .orders
            .create_order(ctx.customer, new_order(product, 1, 50))
            .await?;

        let other = ctx.create_customer("other@example.com").await;

        let result = ctx.orders.get_order(other, order.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        let as_admin = ctx.orders.get_order(ctx.admin, order.uuid).await;

        assert!(as_admin.is_ok(), "admin should see any order");

        Ok(())
    }

    #[tokio::test]
    async fn cancel_unpaid_order_records_reason_and_timestamp() -> TestResult {
        let ctx = TestContext::new().await;
        let product = seed_product(&ctx, 50, 10).await;

        let order = ctx
            .orders
            .create_order(ctx.customer, new_order(product, 1, 50))
            .await?;

        let cancelled = ctx
            .orders
            .cancel_order(ctx.customer, order.uuid, Some("ordered twice".to_string()))
            .await?;

        assert_eq!(cancelled.payment_state, PaymentState::Cancelled);
        assert!(cancelled.is_cancelled);
        assert!(cancelled.cancelled_at.is_some());
        assert_eq!(cancelled.cancel_reason.as_deref(), Some("ordered twice"));

        Ok(())
    }

    #[tokio::test]
    async fn cancel_without_reason_uses_default() -> TestResult {
        let ctx = TestContext::new().await;
        let product = seed_product(&ctx, 50, 10).await;

        let order = ctx
            .orders
            .create_order(ctx.customer, new_order(product, 1, 50))
            .await?;

        let cancelled = ctx.orders.cancel_order(ctx.customer, order.uuid, None).await?;

        assert_eq!(cancelled.cancel_reason.as_deref(), Some(DEFAULT_CANCEL_REASON));

        Ok(())
    }

    #[tokio::test]
    async fn cancel_paid_order_is_rejected_without_mutation() -> TestResult {
        let ctx = TestContext::new().await;
        let product = seed_product(&ctx, 50, 10).await;

        let order = ctx
            .orders
            .create_order(ctx.customer, new_order(product, 1, 50))
            .await?;

        ctx.force_paid(order.uuid).await;

        let result = ctx.orders.cancel_order(ctx.customer, order.uuid, None).await;

        assert!(
            matches!(result, Err(OrdersServiceError::StateConflict("already paid"))),
            "expected StateConflict, got {result:?}"
        );

        let reread = ctx.orders.get_order(ctx.customer, order.uuid).await?;

        assert!(reread.is_paid);
        assert!(!reread.is_cancelled);
        assert!(reread.cancelled_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn mark_delivered_requires_paid_order_and_admin() -> TestResult {
        let ctx = TestContext::new().await;
        let product = seed_product(&ctx, 50, 10).await;

        let order = ctx
            .orders
            .create_order(ctx.customer, new_order(product, 1, 50))
            .await?;

        let unpaid = ctx.orders.mark_delivered(ctx.admin, order.uuid).await;

        assert!(
            matches!(unpaid, Err(OrdersServiceError::StateConflict("not paid"))),
            "expected StateConflict for unpaid order, got {unpaid:?}"
        );

        ctx.force_paid(order.uuid).await;

        let as_customer = ctx.orders.mark_delivered(ctx.customer, order.uuid).await;

        assert!(
            matches!(as_customer, Err(OrdersServiceError::Forbidden)),
            "expected Forbidden for customer, got {as_customer:?}"
        );

        let delivered = ctx.orders.mark_delivered(ctx.admin, order.uuid).await?;

        assert!(delivered.is_delivered);
        assert!(delivered.delivered_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn list_all_orders_is_admin_only() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.orders.list_all_orders(ctx.customer).await;

        assert!(
            matches!(result, Err(OrdersServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }
}

//! Payments service.
//!
//! Order payment lifecycle: `pending → initiated → paid`, with `cancelled`
//! reachable only while unpaid. The paid transition is guarded by a
//! conditional update so duplicate verification callbacks commit stock at
//! most once.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{error, info, warn};
use uuid::Uuid;

use pasal::to_minor_units;

use crate::{
    auth::models::Actor,
    database::Db,
    domain::{
        orders::{
            PgOrdersRepository,
            models::{Order, PaymentState},
        },
        payments::{
            errors::PaymentsServiceError,
            khalti::{PaymentGateway, initiate_request_for},
            models::{GATEWAY_STATUS_COMPLETED, InitiatedPayment, VerifiedPayment, VerifyCallback},
            repository::PgPendingPurchasesRepository,
        },
        products::PgProductsRepository,
    },
};

#[derive(Clone)]
pub struct PgPaymentsService {
    db: Db,
    gateway: Arc<dyn PaymentGateway>,
    orders_repository: PgOrdersRepository,
    purchases_repository: PgPendingPurchasesRepository,
    products_repository: PgProductsRepository,
}

impl PgPaymentsService {
    #[must_use]
    pub fn new(db: Db, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            db,
            gateway,
            orders_repository: PgOrdersRepository::new(),
            purchases_repository: PgPendingPurchasesRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }

    async fn order_with_items(&self, mut order: Order) -> Result<Order, PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        order.items = self
            .orders_repository
            .get_order_items(&mut tx, order.uuid)
            .await?;

        tx.commit().await?;

        Ok(order)
    }
}

#[async_trait]
impl PaymentsService for PgPaymentsService {
    async fn initiate_payment(
        &self,
        actor: Actor,
        order: Uuid,
    ) -> Result<InitiatedPayment, PaymentsServiceError> {
        let mut tx = self.db.begin().await?;
        let existing = self.orders_repository.get_order(&mut tx, order).await?;
        tx.commit().await?;

        if !actor.may_access(existing.user_uuid) {
            return Err(PaymentsServiceError::Forbidden);
        }

        match existing.payment_state {
            PaymentState::Paid => {
                return Err(PaymentsServiceError::StateConflict("already paid"));
            }
            PaymentState::Cancelled => {
                return Err(PaymentsServiceError::StateConflict("cancelled"));
            }
            PaymentState::Pending | PaymentState::Initiated => {}
        }

        let amount_paisa = to_minor_units(existing.totals.total)
            .ok_or(PaymentsServiceError::AmountOverflow)?;

        // No transaction is held across the gateway call; a failure here
        // leaves the order exactly as it was found.
        let initiated = self
            .gateway
            .initiate(initiate_request_for(order, amount_paisa))
            .await?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .orders_repository
            .set_initiated(&mut tx, order, &initiated.pidx)
            .await?;

        if updated.is_none() {
            return Err(PaymentsServiceError::StateConflict("no longer payable"));
        }

        self.purchases_repository
            .upsert_pending_purchase(&mut tx, order, &initiated.pidx, amount_paisa)
            .await?;

        tx.commit().await?;

        info!(order = %order, pidx = %initiated.pidx, amount_paisa, "payment initiated");

        Ok(initiated)
    }

    async fn verify_payment(
        &self,
        callback: VerifyCallback,
    ) -> Result<VerifiedPayment, PaymentsServiceError> {
        let order_uuid = callback.purchase_order_id;

        let mut tx = self.db.begin().await?;
        let order = self.orders_repository.get_order(&mut tx, order_uuid).await?;
        let purchase = self
            .purchases_repository
            .get_pending_purchase(&mut tx, order_uuid)
            .await?;
        tx.commit().await?;

        // A repeat callback for a settled order is a no-op, not an error.
        if order.payment_state == PaymentState::Paid {
            return Ok(VerifiedPayment::AlreadyPaid(
                self.order_with_items(order).await?,
            ));
        }

        if order.payment_state == PaymentState::Cancelled {
            return Err(PaymentsServiceError::StateConflict("cancelled"));
        }

        let Some(purchase) = purchase else {
            return Err(PaymentsServiceError::NotInitiated);
        };

        if order.payment_state == PaymentState::Pending {
            return Err(PaymentsServiceError::NotInitiated);
        }

        // Re-verify with the stored session handle. Callback parameters
        // (pidx, amount) are never trusted on their own.
        let lookup = self.gateway.lookup(&purchase.pidx).await?;

        if lookup.status != GATEWAY_STATUS_COMPLETED {
            warn!(
                order = %order_uuid,
                status = %lookup.status,
                "verification found payment not completed"
            );

            return Err(PaymentsServiceError::StatusNotCompleted(lookup.status));
        }

        if lookup.total_paisa != purchase.amount_paisa {
            error!(
                order = %order_uuid,
                expected = purchase.amount_paisa,
                actual = lookup.total_paisa,
                "verification amount mismatch; order left initiated"
            );

            return Err(PaymentsServiceError::AmountMismatch {
                expected: purchase.amount_paisa,
                actual: lookup.total_paisa,
            });
        }

        let transaction_id = lookup
            .transaction_id
            .unwrap_or_else(|| purchase.pidx.clone());

        // One unit of work: flip the order, commit stock, close the
        // purchase. Any failure rolls the whole thing back.
        let mut tx = self.db.begin().await?;

        let Some(mut paid) = self
            .orders_repository
            .mark_paid(&mut tx, order_uuid, &transaction_id)
            .await?
        else {
            // A concurrent callback won the state guard.
            tx.rollback().await?;

            let mut tx = self.db.begin().await?;
            let current = self.orders_repository.get_order(&mut tx, order_uuid).await?;
            tx.commit().await?;

            if current.is_paid {
                return Ok(VerifiedPayment::AlreadyPaid(
                    self.order_with_items(current).await?,
                ));
            }

            return Err(PaymentsServiceError::StateConflict("no longer payable"));
        };

        let items = self
            .orders_repository
            .get_order_items(&mut tx, order_uuid)
            .await?;

        for item in &items {
            let rows_affected = self
                .products_repository
                .decrement_stock(&mut tx, item.product_uuid, item.quantity)
                .await?;

            if rows_affected == 0 {
                return Err(PaymentsServiceError::ProductMissing(item.product_uuid));
            }
        }

        self.purchases_repository
            .complete_pending_purchase(&mut tx, order_uuid)
            .await?;

        tx.commit().await?;

        paid.items = items;

        info!(
            order = %order_uuid,
            transaction = %transaction_id,
            "payment verified and stock committed"
        );

        Ok(VerifiedPayment::Confirmed(paid))
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Initiate a gateway charge for an unpaid order. Owner or admin.
    ///
    /// The expected amount is the order's frozen total converted to minor
    /// units; the order's uuid doubles as the gateway purchase-order id.
    async fn initiate_payment(
        &self,
        actor: Actor,
        order: Uuid,
    ) -> Result<InitiatedPayment, PaymentsServiceError>;

    /// Confirm a charge from the gateway's return callback.
    ///
    /// Re-verifies status and amount against the gateway, then commits the
    /// paid transition and the stock decrement as one unit of work.
    /// Verifying an already-paid order is an idempotent no-op.
    async fn verify_payment(
        &self,
        callback: VerifyCallback,
    ) -> Result<VerifiedPayment, PaymentsServiceError>;
}

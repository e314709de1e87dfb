//! Verify Payment Handler
//!
//! The gateway's return leg. The gateway expects a redirect whatever the
//! outcome, so this handler never renders a JSON error: every path ends in
//! a 303 to the client order-status page, carrying `status=ok` or
//! `status=error&reason=...`, and the order is left in its last consistent
//! state.

use std::sync::Arc;

use salvo::{prelude::*, writing::Redirect};
use tracing::warn;
use uuid::Uuid;

use pasal_app::domain::payments::{
    PaymentsService,
    models::{VerifiedPayment, VerifyCallback},
};

use crate::{payments::errors::redirect_reason, state::State};

#[salvo::handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Ok(state) = depot.obtain::<Arc<State>>() else {
        res.render(Redirect::other("/"));

        return;
    };

    let base = state.client_order_url.as_str();

    let Some(order) = req.query::<Uuid>("purchase_order_id") else {
        warn!("verify callback without a purchase_order_id");

        res.render(Redirect::other(format!(
            "{base}?status=error&reason=missing-order"
        )));

        return;
    };

    let callback = VerifyCallback {
        purchase_order_id: order,
        pidx: req.query::<String>("pidx"),
        amount_paisa: req.query::<i64>("amount"),
    };

    let location = match state.app.payments.verify_payment(callback).await {
        Ok(VerifiedPayment::Confirmed(_) | VerifiedPayment::AlreadyPaid(_)) => {
            format!("{base}/{order}?status=ok")
        }
        Err(error) => {
            warn!(order = %order, "payment verification failed: {error}");

            format!("{base}/{order}?status=error&reason={}", redirect_reason(&error))
        }
    };

    res.render(Redirect::other(location));
}

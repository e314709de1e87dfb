//! Initiate Payment Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pasal_app::domain::payments::PaymentsService;

use crate::{extensions::*, payments::errors::into_status_error, state::State};

/// Initiate Payment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InitiatePaymentRequest {
    /// The order to charge
    pub order: Uuid,
}

/// Initiate Payment Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InitiatePaymentResponse {
    /// Gateway payment session handle
    pub pidx: String,

    /// Where to send the customer to complete payment
    pub payment_url: String,
}

/// Initiate Payment Handler
///
/// Starts a gateway charge for an unpaid order and returns the redirect
/// payload. A gateway failure leaves the order unchanged and retryable.
#[endpoint(
    tags("payments"),
    summary = "Initiate Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Charge initiated"),
        (status_code = StatusCode::CONFLICT, description = "Order already paid or cancelled"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Gateway unavailable"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the owner"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<InitiatePaymentRequest>,
    depot: &mut Depot,
) -> Result<Json<InitiatePaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let initiated = state
        .app
        .payments
        .initiate_payment(actor, json.into_inner().order)
        .await
        .map_err(into_status_error)?;

    Ok(Json(InitiatePaymentResponse {
        pidx: initiated.pidx,
        payment_url: initiated.payment_url,
    }))
}

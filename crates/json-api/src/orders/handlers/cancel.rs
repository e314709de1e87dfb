//! Cancel Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pasal_app::domain::orders::OrdersService;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Cancel Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CancelOrderRequest {
    /// Why the order is being cancelled
    pub reason: Option<String>,
}

/// Cancel Order Handler
///
/// Cancels an unpaid order. Owner or admin; paid orders conflict.
#[endpoint(
    tags("orders"),
    summary = "Cancel Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order cancelled"),
        (status_code = StatusCode::CONFLICT, description = "Order already paid or cancelled"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the owner"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<CancelOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let cancelled = state
        .app
        .orders
        .cancel_order(actor, order.into_inner(), json.into_inner().reason)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cancelled.into()))
}

//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pasal_app::domain::orders::{OrdersService, models::{NewOrder, PaymentMethod}};

use crate::{
    carts::models::LineItemBody,
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub uuid: Uuid,

    /// The cart's line items, priced as last quoted
    pub items: Vec<LineItemBody>,

    /// Payment method, `khalti` or `cash_on_delivery`
    pub payment_method: String,
}

impl CreateOrderRequest {
    fn into_new_order(self) -> Result<NewOrder, StatusError> {
        let payment_method = match self.payment_method.as_str() {
            "khalti" => PaymentMethod::Khalti,
            "cash_on_delivery" => PaymentMethod::CashOnDelivery,
            other => {
                return Err(
                    StatusError::bad_request().brief(format!("unknown payment method {other:?}"))
                );
            }
        };

        Ok(NewOrder {
            uuid: self.uuid,
            items: self
                .items
                .into_iter()
                .map(LineItemBody::into_line_item)
                .collect::<Result<Vec<_>, _>>()?,
            payment_method,
        })
    }
}

/// Create Order Handler
///
/// Prices the supplied cart against the catalog and persists the order
/// with a frozen snapshot of lines and totals.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart rejected"),
        (status_code = StatusCode::CONFLICT, description = "Order already exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let order = state
        .app
        .orders
        .create_order(actor, json.into_inner().into_new_order()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

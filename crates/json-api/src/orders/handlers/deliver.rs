//! Deliver Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use pasal_app::domain::orders::OrdersService;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Deliver Order Handler
///
/// Marks a paid order as delivered. Admin only.
#[endpoint(
    tags("orders"),
    summary = "Deliver Order",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let delivered = state
        .app
        .orders
        .mark_delivered(actor, order.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(delivered.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use pasal_app::domain::orders::{MockOrdersService, OrdersServiceError};

    use crate::test_helpers::{MockServices, TEST_ADMIN, make_order, service_as};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        let state = MockServices {
            orders,
            ..MockServices::default()
        }
        .into_state();

        service_as(
            state,
            TEST_ADMIN,
            Router::with_path("orders/{order}/deliver").post(handler),
        )
    }

    #[tokio::test]
    async fn test_deliver_returns_200() -> TestResult {
        let uuid = Uuid::now_v7();
        let order = make_order(uuid, TEST_ADMIN.user);

        let mut orders = MockOrdersService::new();

        orders
            .expect_mark_delivered()
            .once()
            .withf(move |actor, o| *actor == TEST_ADMIN && *o == uuid)
            .return_once(move |_, _| Ok(order));

        let res = TestClient::post(format!("http://example.com/orders/{uuid}/deliver"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_deliver_unpaid_order_returns_409() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut orders = MockOrdersService::new();

        orders
            .expect_mark_delivered()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::StateConflict("not paid")));

        let res = TestClient::post(format!("http://example.com/orders/{uuid}/deliver"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}

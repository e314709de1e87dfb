//! Price Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use pasal_app::domain::carts::CartsService;

use crate::{
    carts::{
        errors::into_status_error,
        models::{LineItemBody, PriceTotalsResponse, PricedLineItemResponse},
    },
    extensions::*,
    state::State,
};

/// Price Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PriceCartRequest {
    /// The cart's line items
    pub items: Vec<LineItemBody>,
}

/// Priced Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PricedCartResponse {
    /// Verified cart lines, priced from the catalog
    pub items: Vec<PricedLineItemResponse>,

    /// Derived totals
    pub totals: PriceTotalsResponse,
}

/// Price Cart Handler
///
/// Verifies the supplied lines against the catalog and returns the totals
/// an order created from this cart would freeze.
#[endpoint(
    tags("carts"),
    summary = "Price Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart priced"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart rejected"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<PriceCartRequest>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<PricedCartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;

    let items = json
        .into_inner()
        .items
        .into_iter()
        .map(LineItemBody::into_line_item)
        .collect::<Result<Vec<_>, _>>()?;

    let cart = state
        .app
        .carts
        .price_cart(items, point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(PricedCartResponse {
        items: cart
            .items
            .into_iter()
            .map(PricedLineItemResponse::from)
            .collect(),
        totals: cart.totals.into(),
    }))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use pasal::{PricedLineItem, PricingError};
    use pasal_app::domain::carts::{CartsServiceError, MockCartsService, models::PricedCart};

    use crate::test_helpers::{MockServices, TEST_ACTOR, make_totals, service_as};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        let state = MockServices {
            carts,
            ..MockServices::default()
        }
        .into_state();

        service_as(state, TEST_ACTOR, Router::with_path("cart/price").post(handler))
    }

    #[tokio::test]
    async fn test_price_cart_returns_totals() -> TestResult {
        let product = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_price_cart()
            .once()
            .withf(move |items, _at| {
                items.len() == 1
                    && items.iter().all(|i| i.product == product && i.quantity == 3)
            })
            .return_once(move |_, _| {
                Ok(PricedCart {
                    items: vec![PricedLineItem {
                        product,
                        quantity: 3,
                        unit_price: Decimal::new(5000, 2),
                        discount_percentage: None,
                    }],
                    totals: make_totals(),
                })
            });

        let mut res = TestClient::post("http://example.com/cart/price")
            .json(&json!({
                "items": [{ "product": product, "quantity": 3, "unit_price": "50.00" }],
            }))
            .send(&make_service(carts))
            .await;

        let body: PricedCartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.totals.items, "150.00");
        assert_eq!(body.totals.total, "172.50");

        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_cart_returns_400() -> TestResult {
        let product = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts.expect_price_cart().once().return_once(move |_, _| {
            Err(CartsServiceError::Pricing(PricingError::UnknownProduct(
                product,
            )))
        });

        let res = TestClient::post("http://example.com/cart/price")
            .json(&json!({
                "items": [{ "product": product, "quantity": 1, "unit_price": "50.00" }],
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unparseable_price_returns_400() -> TestResult {
        let carts = MockCartsService::new();

        let res = TestClient::post("http://example.com/cart/price")
            .json(&json!({
                "items": [{ "product": Uuid::now_v7(), "quantity": 1, "unit_price": "five" }],
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}

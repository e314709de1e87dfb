//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pasal_app::domain::products::{ProductsService, models::NewProduct};

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        models::{DiscountBody, ProductResponse},
    },
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// List price, e.g. `"49.99"`
    pub price: String,

    /// Units in stock
    pub stock: i64,

    /// Optional discount window
    pub discount: Option<DiscountBody>,
}

impl CreateProductRequest {
    fn into_new_product(self) -> Result<NewProduct, StatusError> {
        Ok(NewProduct {
            uuid: self.uuid,
            name: self.name,
            price: self.price.parse().or_400("could not parse price")?,
            stock: self.stock,
            discount: self.discount.map(DiscountBody::into_window).transpose()?,
        })
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let product = state
        .app
        .products
        .create_product(actor, json.into_inner().into_new_product()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use pasal_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{MockServices, TEST_ACTOR, TEST_ADMIN, make_product, service_as};

    use super::*;

    fn make_service(products: MockProductsService, admin: bool) -> Service {
        let state = MockServices {
            products,
            ..MockServices::default()
        }
        .into_state();

        let actor = if admin { TEST_ADMIN } else { TEST_ACTOR };

        service_as(state, actor, Router::with_path("products").post(handler))
    }

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(move |actor, new| {
                *actor == TEST_ADMIN && new.uuid == uuid && new.price.to_string() == "49.99"
            })
            .return_once(move |_, _| Ok(make_product(uuid)));

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({
                "uuid": uuid,
                "name": "Woven scarf",
                "price": "49.99",
                "stock": 12,
            }))
            .send(&make_service(products, true))
            .await;

        let body: ProductResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/products/{uuid}").as_str()));
        assert_eq!(body.uuid, uuid);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_as_customer_returns_403() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::Forbidden));

        let res = TestClient::post("http://example.com/products")
            .json(&json!({
                "uuid": uuid,
                "name": "Woven scarf",
                "price": "49.99",
                "stock": 12,
            }))
            .send(&make_service(products, false))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_bad_price_returns_400() -> TestResult {
        let products = MockProductsService::new();

        let res = TestClient::post("http://example.com/products")
            .json(&json!({
                "uuid": Uuid::now_v7(),
                "name": "Woven scarf",
                "price": "not-a-price",
                "stock": 12,
            }))
            .send(&make_service(products, true))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}

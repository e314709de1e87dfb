//! Update Product Handler

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

use pasal_app::domain::products::{ProductsService, models::ProductUpdate};

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        models::{DiscountBody, ProductResponse},
    },
    state::State,
};

/// Update Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    /// Display name
    pub name: String,

    /// List price, e.g. `"49.99"`
    pub price: String,

    /// Units in stock
    pub stock: i64,

    /// Optional discount window; omitting it clears any existing one
    pub discount: Option<DiscountBody>,
}

impl UpdateProductRequest {
    fn into_update(self) -> Result<ProductUpdate, StatusError> {
        Ok(ProductUpdate {
            name: self.name,
            price: self.price.parse().or_400("could not parse price")?,
            stock: self.stock,
            discount: self.discount.map(DiscountBody::into_window).transpose()?,
        })
    }
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let updated = state
        .app
        .products
        .update_product(actor, product.into_inner(), json.into_inner().into_update()?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

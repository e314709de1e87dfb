//! Product wire types shared by the product handlers.

use std::string::ToString;

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pasal::DiscountWindow;
use pasal_app::domain::products::models::Product;

use crate::extensions::ResultExt;

/// Discount window as carried on the wire.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DiscountBody {
    /// Discount percentage, e.g. `"20"`
    pub percentage: String,

    /// Whether the discount is switched on
    pub active: bool,

    /// Window start, RFC 3339
    pub starts_at: String,

    /// Window end, RFC 3339
    pub ends_at: String,
}

impl DiscountBody {
    pub(crate) fn into_window(self) -> Result<DiscountWindow, StatusError> {
        Ok(DiscountWindow {
            percentage: self
                .percentage
                .parse()
                .or_400("could not parse discount percentage")?,
            active: self.active,
            starts_at: self
                .starts_at
                .parse()
                .or_400("could not parse discount start")?,
            ends_at: self.ends_at.parse().or_400("could not parse discount end")?,
        })
    }
}

impl From<DiscountWindow> for DiscountBody {
    fn from(window: DiscountWindow) -> Self {
        Self {
            percentage: window.percentage.to_string(),
            active: window.active,
            starts_at: window.starts_at.to_string(),
            ends_at: window.ends_at.to_string(),
        }
    }
}

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// List price, two decimal places
    pub price: String,

    /// Units in stock
    pub stock: i64,

    /// Discount window, when one is configured
    pub discount: Option<DiscountBody>,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,

    /// The date and time the product was deleted
    pub deleted_at: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            uuid: product.uuid,
            name: product.name,
            price: product.price.to_string(),
            stock: product.stock,
            discount: product.discount.map(DiscountBody::from),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
            deleted_at: product.deleted_at.as_ref().map(ToString::to_string),
        }
    }
}

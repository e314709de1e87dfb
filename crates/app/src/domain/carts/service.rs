//! Carts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use pasal::{LineItem, price_totals, verify_items};

use crate::{
    database::Db,
    domain::{
        carts::{errors::CartsServiceError, models::PricedCart},
        products::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            products_repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn price_cart(
        &self,
        items: Vec<LineItem>,
        point_in_time: Timestamp,
    ) -> Result<PricedCart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let products: Vec<_> = items.iter().map(|item| item.product).collect();

        let catalog = self
            .products_repository
            .get_catalog_entries(&mut tx, &products)
            .await?;

        tx.commit().await?;

        let priced = verify_items(&items, &catalog, point_in_time)?;
        let totals = price_totals(&priced);

        Ok(PricedCart {
            items: priced,
            totals,
        })
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Verify and price a client-held cart at `point_in_time`.
    async fn price_cart(
        &self,
        items: Vec<LineItem>,
        point_in_time: Timestamp,
    ) -> Result<PricedCart, CartsServiceError>;
}

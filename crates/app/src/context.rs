//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        favorites::{FavoritesService, PgFavoritesService},
        orders::{OrdersService, PgOrdersService},
        otp::{OtpService, PgOtpService},
        payments::{PaymentsService, PgPaymentsService, khalti::PaymentGateway},
        products::{PgProductsService, ProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub payments: Arc<dyn PaymentsService>,
    pub favorites: Arc<dyn FavoritesService>,
    pub otp: Arc<dyn OtpService>,
}

impl AppContext {
    /// Build application context from a database URL and a payment gateway.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        Ok(Self {
            auth: Arc::new(PgAuthService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            payments: Arc::new(PgPaymentsService::new(db.clone(), gateway)),
            favorites: Arc::new(PgFavoritesService::new(db.clone())),
            otp: Arc::new(PgOtpService::new(db)),
        })
    }
}

//! Products service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    auth::models::Actor,
    database::Db,
    domain::products::{
        errors::ProductsServiceError,
        models::{NewProduct, Product, ProductUpdate},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: Uuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        actor: Actor,
        product: NewProduct,
    ) -> Result<Product, ProductsServiceError> {
        if !actor.is_admin() {
            return Err(ProductsServiceError::Forbidden);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        actor: Actor,
        product: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        if !actor.is_admin() {
            return Err(ProductsServiceError::Forbidden);
        }

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(
        &self,
        actor: Actor,
        product: Uuid,
    ) -> Result<(), ProductsServiceError> {
        if !actor.is_admin() {
            return Err(ProductsServiceError::Forbidden);
        }

        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all live products.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: Uuid) -> Result<Product, ProductsServiceError>;

    /// Creates a new product. Admin only.
    async fn create_product(
        &self,
        actor: Actor,
        product: NewProduct,
    ) -> Result<Product, ProductsServiceError>;

    /// Replaces a product's mutable fields. Admin only.
    async fn update_product(
        &self,
        actor: Actor,
        product: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Soft-deletes a product. Admin only.
    async fn delete_product(&self, actor: Actor, product: Uuid)
    -> Result<(), ProductsServiceError>;
}

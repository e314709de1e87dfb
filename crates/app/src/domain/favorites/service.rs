//! Favorites service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    auth::models::Actor,
    database::Db,
    domain::favorites::{
        errors::FavoritesServiceError, models::Favorite, repository::PgFavoritesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgFavoritesService {
    db: Db,
    repository: PgFavoritesRepository,
}

impl PgFavoritesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgFavoritesRepository::new(),
        }
    }
}

#[async_trait]
impl FavoritesService for PgFavoritesService {
    async fn add_favorite(
        &self,
        actor: Actor,
        product: Uuid,
    ) -> Result<Favorite, FavoritesServiceError> {
        let mut tx = self.db.begin().await?;

        let favorite = self
            .repository
            .create_favorite(&mut tx, actor.user, product)
            .await?;

        tx.commit().await?;

        Ok(favorite)
    }

    async fn remove_favorite(
        &self,
        actor: Actor,
        product: Uuid,
    ) -> Result<(), FavoritesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_favorite(&mut tx, actor.user, product)
            .await?;

        if rows_affected == 0 {
            return Err(FavoritesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_favorites(&self, actor: Actor) -> Result<Vec<Favorite>, FavoritesServiceError> {
        let mut tx = self.db.begin().await?;

        let favorites = self.repository.list_favorites(&mut tx, actor.user).await?;

        tx.commit().await?;

        Ok(favorites)
    }
}

#[automock]
#[async_trait]
pub trait FavoritesService: Send + Sync {
    /// Mark a product as one of the actor's favorites.
    async fn add_favorite(
        &self,
        actor: Actor,
        product: Uuid,
    ) -> Result<Favorite, FavoritesServiceError>;

    /// Remove a product from the actor's favorites.
    async fn remove_favorite(
        &self,
        actor: Actor,
        product: Uuid,
    ) -> Result<(), FavoritesServiceError>;

    /// The actor's favorites, newest first.
    async fn list_favorites(&self, actor: Actor) -> Result<Vec<Favorite>, FavoritesServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::products::{ProductsService, models::NewProduct},
        test::TestContext,
    };

    use super::*;

    async fn seed_product(ctx: &TestContext) -> Uuid {
        let uuid = Uuid::now_v7();

        ctx.products
            .create_product(
                ctx.admin,
                NewProduct {
                    uuid,
                    name: "Prayer flags".to_string(),
                    price: Decimal::from(12),
                    stock: 40,
                    discount: None,
                },
            )
            .await
            .expect("seed product should succeed");

        uuid
    }

    #[tokio::test]
    async fn add_then_list_returns_favorite() -> TestResult {
        let ctx = TestContext::new().await;
        let product = seed_product(&ctx).await;

        ctx.favorites.add_favorite(ctx.customer, product).await?;

        let favorites = ctx.favorites.list_favorites(ctx.customer).await?;

        assert_eq!(favorites.len(), 1);
        assert!(favorites.iter().any(|f| f.product_uuid == product));

        Ok(())
    }

    #[tokio::test]
    async fn adding_twice_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let product = seed_product(&ctx).await;

        ctx.favorites.add_favorite(ctx.customer, product).await?;

        let result = ctx.favorites.add_favorite(ctx.customer, product).await;

        assert!(
            matches!(result, Err(FavoritesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn favorites_are_scoped_per_user() -> TestResult {
        let ctx = TestContext::new().await;
        let product = seed_product(&ctx).await;
        let other = ctx.create_customer("other@example.com").await;

        ctx.favorites.add_favorite(ctx.customer, product).await?;

        let theirs = ctx.favorites.list_favorites(other).await?;

        assert!(theirs.is_empty(), "other users see their own favorites only");

        Ok(())
    }

    #[tokio::test]
    async fn removing_missing_favorite_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .favorites
            .remove_favorite(ctx.customer, Uuid::now_v7())
            .await;

        assert!(
            matches!(result, Err(FavoritesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}

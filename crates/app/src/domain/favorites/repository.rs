//! Favorites Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::favorites::models::Favorite;

const CREATE_FAVORITE_SQL: &str = include_str!("sql/create_favorite.sql");
const DELETE_FAVORITE_SQL: &str = include_str!("sql/delete_favorite.sql");
const LIST_FAVORITES_SQL: &str = include_str!("sql/list_favorites.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgFavoritesRepository;

impl PgFavoritesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_favorite(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: Uuid,
        product: Uuid,
    ) -> Result<Favorite, sqlx::Error> {
        query_as::<Postgres, Favorite>(CREATE_FAVORITE_SQL)
            .bind(user)
            .bind(product)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_favorite(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: Uuid,
        product: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_FAVORITE_SQL)
            .bind(user)
            .bind(product)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_favorites(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: Uuid,
    ) -> Result<Vec<Favorite>, sqlx::Error> {
        query_as::<Postgres, Favorite>(LIST_FAVORITES_SQL)
            .bind(user)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Favorite {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_uuid: row.try_get("user_uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

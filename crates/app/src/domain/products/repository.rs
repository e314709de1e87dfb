//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use pasal::{CatalogEntry, DiscountWindow};

use crate::domain::products::models::{NewProduct, Product, ProductUpdate};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const GET_CATALOG_ENTRIES_SQL: &str = include_str!("sql/get_catalog_entries.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: Uuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(product.uuid)
            .bind(&product.name)
            .bind(product.price)
            .bind(product.stock)
            .bind(product.discount.as_ref().map(|d| d.percentage))
            .bind(product.discount.as_ref().map(|d| d.active))
            .bind(
                product
                    .discount
                    .as_ref()
                    .map(|d| SqlxTimestamp::from(d.starts_at)),
            )
            .bind(
                product
                    .discount
                    .as_ref()
                    .map(|d| SqlxTimestamp::from(d.ends_at)),
            )
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(UPDATE_PRODUCT_SQL)
            .bind(product)
            .bind(&update.name)
            .bind(update.price)
            .bind(update.stock)
            .bind(update.discount.as_ref().map(|d| d.percentage))
            .bind(update.discount.as_ref().map(|d| d.active))
            .bind(
                update
                    .discount
                    .as_ref()
                    .map(|d| SqlxTimestamp::from(d.starts_at)),
            )
            .bind(
                update
                    .discount
                    .as_ref()
                    .map(|d| SqlxTimestamp::from(d.ends_at)),
            )
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Fetch the authoritative pricing view for the given products.
    ///
    /// Products missing from the result were unknown or deleted; the
    /// pricing engine reports those as batch rejections.
    pub(crate) async fn get_catalog_entries(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[Uuid],
    ) -> Result<FxHashMap<Uuid, CatalogEntry>, sqlx::Error> {
        let rows = query(GET_CATALOG_ENTRIES_SQL)
            .bind(products)
            .fetch_all(&mut **tx)
            .await?;

        let mut catalog = FxHashMap::default();

        for row in &rows {
            let uuid: Uuid = row.try_get("uuid")?;

            catalog.insert(
                uuid,
                CatalogEntry {
                    price: row.try_get("price")?,
                    stock: row.try_get("stock")?,
                    discount: discount_from_row(row)?,
                },
            );
        }

        Ok(catalog)
    }

    /// Decrement stock, flooring at zero.
    ///
    /// Returns the number of matched rows; zero means the product vanished
    /// and the caller must treat the whole unit of work as failed.
    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: Uuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DECREMENT_STOCK_SQL)
            .bind(product)
            .bind(i64::from(quantity))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

/// Assemble a discount window from nullable columns.
///
/// Any missing column yields `None`: an incomplete window never discounts.
fn discount_from_row(row: &PgRow) -> sqlx::Result<Option<DiscountWindow>> {
    let percentage: Option<Decimal> = row.try_get("discount_percentage")?;
    let active: Option<bool> = row.try_get("discount_active")?;
    let starts_at: Option<SqlxTimestamp> = row.try_get("discount_starts_at")?;
    let ends_at: Option<SqlxTimestamp> = row.try_get("discount_ends_at")?;

    Ok(
        match (percentage, active, starts_at, ends_at) {
            (Some(percentage), Some(active), Some(starts_at), Some(ends_at)) => {
                Some(DiscountWindow {
                    percentage,
                    active,
                    starts_at: starts_at.to_jiff(),
                    ends_at: ends_at.to_jiff(),
                })
            }
            _ => None,
        },
    )
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            stock: row.try_get("stock")?,
            discount: discount_from_row(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

//! # Product Repository
//!
//! Database operations for the catalog.
//!
//! ## Key Operations
//! - Upsert keyed on product code
//! - Delta stock updates
//! - Listing for the inventory view
//!
//! The connection-level functions (`fetch_by_code`, `apply_stock_delta`)
//! take any `SqliteConnection` so the sale transaction can run them on its
//! own connection.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use till_core::{Money, Product};

/// Row shape of the `products` table.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    code: String,
    description: String,
    price: f64,
    stock: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            code: row.code,
            description: row.description,
            unit_price: Money::from_major_f64(row.price),
            stock_quantity: row.stock,
        }
    }
}

/// Looks a product up by code on an existing connection.
pub(crate) async fn fetch_by_code(
    conn: &mut SqliteConnection,
    code: &str,
) -> DbResult<Option<Product>> {
    let row = sqlx::query_as::<_, ProductRow>(
        "SELECT code, description, price, stock FROM products WHERE code = ?1",
    )
    .bind(code)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.map(Product::from))
}

/// Applies `stock = stock + delta` on an existing connection.
///
/// ## Delta Pattern
/// ```text
/// ❌ Absolute update:  UPDATE products SET stock = 2 WHERE code = ?
/// ✅ Delta update:     UPDATE products SET stock = stock - 3 WHERE code = ?
/// ```
///
/// The statement is guarded so the count can never go below zero or past
/// `i64::MAX`; SQLite would otherwise turn the overflowing sum into a `REAL`.
/// Returns `false` when no row changed: the code is unknown, the delta is
/// larger than the shelf, or the shelf cannot take that many more units.
pub(crate) async fn apply_stock_delta(
    conn: &mut SqliteConnection,
    code: &str,
    delta: i64,
) -> DbResult<bool> {
    debug!(code = %code, delta = %delta, "Updating stock");

    let ceiling = i64::MAX - delta.max(0);

    let result = sqlx::query(
        r#"
        UPDATE products
        SET stock = stock + ?2
        WHERE code = ?1 AND stock <= ?3 AND stock + ?2 >= 0
        "#,
    )
    .bind(code)
    .bind(delta)
    .bind(ceiling)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
/// repo.upsert("A1", "Widget", Money::from_cents(1000)).await?;
/// let product = repo.get_by_code("A1").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists the whole catalog ordered by code.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT code, description, price, stock FROM products ORDER BY code",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Gets a product by its code.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Product>> {
        let mut conn = self.pool.acquire().await?;
        fetch_by_code(&mut conn, code).await
    }

    /// Inserts a product or overwrites the catalog fields of an existing one.
    ///
    /// New codes start with zero stock. An existing code keeps its stock
    /// count; only description and price are replaced.
    ///
    /// ## Returns
    /// The row as stored after the write.
    pub async fn upsert(&self, code: &str, description: &str, price: Money) -> DbResult<Product> {
        debug!(code = %code, price = %price, "Upserting product");

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (code, description, price, stock)
            VALUES (?1, ?2, ?3, 0)
            ON CONFLICT(code) DO UPDATE SET
                description = excluded.description,
                price = excluded.price
            RETURNING code, description, price, stock
            "#,
        )
        .bind(code)
        .bind(description)
        .bind(price.to_major_f64())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    /// Applies a stock delta. See [`apply_stock_delta`].
    pub async fn update_stock(&self, code: &str, delta: i64) -> DbResult<bool> {
        let mut conn = self.pool.acquire().await?;
        apply_stock_delta(&mut conn, code, delta).await
    }

    /// Counts catalog entries (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use till_core::Money;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_upsert_inserts_with_zero_stock() {
        let db = db().await;
        let product = db
            .products()
            .upsert("A1", "Widget", Money::from_cents(1099))
            .await
            .unwrap();

        assert_eq!(product.code, "A1");
        assert_eq!(product.unit_price, Money::from_cents(1099));
        assert_eq!(product.stock_quantity, 0);
        assert_eq!(db.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_catalog_fields_and_keeps_stock() {
        let db = db().await;
        let repo = db.products();
        repo.upsert("A1", "Widget", Money::from_cents(1000))
            .await
            .unwrap();
        assert!(repo.update_stock("A1", 5).await.unwrap());

        let updated = repo
            .upsert("A1", "Blue widget", Money::from_cents(1250))
            .await
            .unwrap();

        assert_eq!(updated.description, "Blue widget");
        assert_eq!(updated.unit_price, Money::from_cents(1250));
        assert_eq!(updated.stock_quantity, 5);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_stock_guard() {
        let db = db().await;
        let repo = db.products();
        repo.upsert("A1", "Widget", Money::from_cents(1000))
            .await
            .unwrap();

        assert!(repo.update_stock("A1", 3).await.unwrap());
        assert!(repo.update_stock("A1", -3).await.unwrap());
        // Would go negative
        assert!(!repo.update_stock("A1", -1).await.unwrap());
        // Unknown code
        assert!(!repo.update_stock("ZZ", 1).await.unwrap());

        let product = repo.get_by_code("A1").await.unwrap().unwrap();
        assert_eq!(product.stock_quantity, 0);
    }

    #[tokio::test]
    async fn test_update_stock_stops_at_i64_max() {
        let db = db().await;
        let repo = db.products();
        repo.upsert("A1", "Widget", Money::from_cents(1000))
            .await
            .unwrap();

        assert!(repo.update_stock("A1", i64::MAX - 1).await.unwrap());
        assert!(repo.update_stock("A1", 1).await.unwrap());
        assert!(!repo.update_stock("A1", 1).await.unwrap());
        assert!(!repo.update_stock("A1", i64::MAX).await.unwrap());

        // The column stays an INTEGER and still decodes
        let listed = repo.list_all().await.unwrap();
        assert_eq!(listed[0].stock_quantity, i64::MAX);

        assert!(repo.update_stock("A1", -i64::MAX).await.unwrap());
        assert_eq!(
            repo.get_by_code("A1").await.unwrap().unwrap().stock_quantity,
            0
        );
    }

    #[tokio::test]
    async fn test_list_all_ordered_by_code() {
        let db = db().await;
        let repo = db.products();
        for code in ["C3", "A1", "B2"] {
            repo.upsert(code, "Item", Money::from_cents(100))
                .await
                .unwrap();
        }

        let codes: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.code)
            .collect();
        assert_eq!(codes, vec!["A1", "B2", "C3"]);
        assert!(repo.get_by_code("ZZ").await.unwrap().is_none());
    }
}

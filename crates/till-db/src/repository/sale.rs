//! # Sale Repository
//!
//! Database operations for the sales log.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  1. RECORD (inside the Ledger transaction)                             │
//! │     └── insert() → id assigned by AUTOINCREMENT                        │
//! │                                                                         │
//! │  2. READ                                                               │
//! │     └── list_all() / get_by_id() for the day book                      │
//! │                                                                         │
//! │  3. PURGE (end of day)                                                 │
//! │     └── purge() → every row deleted, nothing archived                  │
//! │                                                                         │
//! │  Sales are never updated.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Description and unit price are copied into the row at sale time, so a
//! later catalog edit never rewrites history.

use chrono::NaiveDateTime;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use till_core::{Money, NewSale, Sale, SALE_TIMESTAMP_FORMAT};

/// Row shape of the `sales` table.
#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: i64,
    date: String,
    code: String,
    description: String,
    quantity: i64,
    price: f64,
    total: f64,
    customer: String,
}

impl TryFrom<SaleRow> for Sale {
    type Error = DbError;

    fn try_from(row: SaleRow) -> Result<Self, Self::Error> {
        let timestamp = NaiveDateTime::parse_from_str(&row.date, SALE_TIMESTAMP_FORMAT)
            .map_err(|e| DbError::decode("sales.date", e))?;

        Ok(Sale {
            id: row.id,
            timestamp,
            product_code: row.code,
            description: row.description,
            quantity: row.quantity,
            unit_price: Money::from_major_f64(row.price),
            total: Money::from_major_f64(row.total),
            customer_id: row.customer,
        })
    }
}

/// Inserts a sale row on an existing connection and returns its id.
pub(crate) async fn insert(conn: &mut SqliteConnection, sale: &NewSale) -> DbResult<i64> {
    debug!(
        code = %sale.product_code,
        quantity = sale.quantity,
        customer = %sale.customer_id,
        "Inserting sale"
    );

    let result = sqlx::query(
        r#"
        INSERT INTO sales (date, code, description, quantity, price, total, customer)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(sale.timestamp_text())
    .bind(&sale.product_code)
    .bind(&sale.description)
    .bind(sale.quantity)
    .bind(sale.unit_price.to_major_f64())
    .bind(sale.total.to_major_f64())
    .bind(&sale.customer_id)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Lists every sale in the order it was recorded.
    pub async fn list_all(&self) -> DbResult<Vec<Sale>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, date, code, description, quantity, price, total, customer
            FROM sales
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Sale::try_from).collect()
    }

    /// Gets a sale by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let row = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, date, code, description, quantity, price, total, customer
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Sale::try_from).transpose()
    }

    /// Deletes every sale. Irreversible.
    ///
    /// ## Returns
    /// The number of rows removed.
    pub async fn purge(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM sales")
            .execute(&self.pool)
            .await?;

        debug!(deleted = result.rows_affected(), "Purged sales");
        Ok(result.rows_affected())
    }

    /// Counts recorded sales (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
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
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::NaiveDate;

    fn new_sale(code: &str) -> NewSale {
        NewSale {
            timestamp: NaiveDate::from_ymd_opt(2026, 10, 16)
                .and_then(|d| d.and_hms_opt(18, 45, 2))
                .unwrap(),
            product_code: code.to_string(),
            description: "Widget".to_string(),
            quantity: 3,
            unit_price: Money::from_cents(1099),
            total: Money::from_cents(3297),
            customer_id: "1234567890".to_string(),
        }
    }

    async fn insert_via_pool(db: &Database, sale: &NewSale) -> i64 {
        let mut conn = db.pool().acquire().await.unwrap();
        insert(&mut conn, sale).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_read_back() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let pending = new_sale("A1");
        let id = insert_via_pool(&db, &pending).await;

        let stored = db.sales().get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored, pending.into_sale(id));
    }

    #[tokio::test]
    async fn test_date_column_format() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let id = insert_via_pool(&db, &new_sale("A1")).await;

        let date: String = sqlx::query_scalar("SELECT date FROM sales WHERE id = ?1")
            .bind(id)
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(date, "2026-10-16 18:45:02");
    }

    #[tokio::test]
    async fn test_ids_increase_and_list_in_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let first = insert_via_pool(&db, &new_sale("A1")).await;
        let second = insert_via_pool(&db, &new_sale("B2")).await;
        assert!(second > first);

        let codes: Vec<String> = db
            .sales()
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.product_code)
            .collect();
        assert_eq!(codes, vec!["A1", "B2"]);
    }

    #[tokio::test]
    async fn test_purge_removes_everything() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        insert_via_pool(&db, &new_sale("A1")).await;
        insert_via_pool(&db, &new_sale("A1")).await;

        assert_eq!(db.sales().purge().await.unwrap(), 2);
        assert_eq!(db.sales().count().await.unwrap(), 0);
        assert_eq!(db.sales().purge().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_malformed_date_is_a_decode_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query(
            "INSERT INTO sales (date, code, description, quantity, price, total, customer)
             VALUES ('yesterday', 'A1', 'Widget', 1, 1.0, 1.0, '1234567890')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = db.sales().list_all().await.unwrap_err();
        assert!(matches!(err, DbError::Decode { .. }));
    }
}

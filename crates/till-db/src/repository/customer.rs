//! # Customer Repository
//!
//! Database operations for the customer registry.
//!
//! Customers are keyed by national id. Registration is an upsert: the same
//! id registered twice leaves one row holding the latest details.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use till_core::Customer;

/// Row shape of the `customers` table.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    name: String,
    id: String,
    address: String,
    phone: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            full_name: row.name,
            national_id: row.id,
            address: row.address,
            phone: row.phone,
        }
    }
}

/// Looks a customer up by national id on an existing connection.
pub(crate) async fn fetch_by_id(
    conn: &mut SqliteConnection,
    national_id: &str,
) -> DbResult<Option<Customer>> {
    let row = sqlx::query_as::<_, CustomerRow>(
        "SELECT name, id, address, phone FROM customers WHERE id = ?1",
    )
    .bind(national_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.map(Customer::from))
}

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists every customer ordered by name, then id.
    pub async fn list_all(&self) -> DbResult<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT name, id, address, phone FROM customers ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    /// Gets a customer by national id.
    pub async fn get_by_id(&self, national_id: &str) -> DbResult<Option<Customer>> {
        let mut conn = self.pool.acquire().await?;
        fetch_by_id(&mut conn, national_id).await
    }

    /// Inserts a customer or replaces the details stored under its id.
    pub async fn upsert(&self, customer: &Customer) -> DbResult<()> {
        debug!(national_id = %customer.national_id, "Upserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (name, id, address, phone)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                address = excluded.address,
                phone = excluded.phone
            "#,
        )
        .bind(&customer.full_name)
        .bind(&customer.national_id)
        .bind(&customer.address)
        .bind(&customer.phone)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Counts registered customers (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

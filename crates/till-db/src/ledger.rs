//! # Ledger
//!
//! The operations the presentation layer calls. Every method takes raw form
//! text, runs the rules from till-core, and writes through the repositories.
//!
//! ## Sale Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record_sale("A1", "3", "1234567890")                                   │
//! │                                                                         │
//! │  SaleRequest::parse ─────── fields present, quantity > 0               │
//! │       │                                                                 │
//! │  BEGIN ─────────────────────────────────────────────────────────────┐   │
//! │  │   fetch product, fetch customer                                  │   │
//! │  │   prepare_sale ───────── exists? exists? enough stock?           │   │
//! │  │   INSERT INTO sales                                              │   │
//! │  │   UPDATE products SET stock = stock - 3                          │   │
//! │  COMMIT ────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │  SaleReceipt { sale_id, total, timestamp }                             │
//! │                                                                         │
//! │  Any error before COMMIT drops the transaction, which rolls back.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, NaiveDateTime};
use tracing::{debug, error, info, warn};

use crate::error::{DbError, LedgerError, LedgerResult};
use crate::pool::{Database, DbConfig};
use crate::repository::{customer, product, sale};
use till_core::validation::{
    parse_price, parse_quantity, require, validate_description, validate_national_id,
    validate_product_code,
};
use till_core::{
    prepare_sale, CoreError, Customer, DayBook, Product, Sale, SaleReceipt, SaleRequest,
    ValidationError,
};

/// Handle to an open store ledger.
///
/// Created once at process start and passed by reference to whatever
/// drives it. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Ledger {
    db: Database,
}

impl Ledger {
    pub fn new(db: Database) -> Self {
        Ledger { db }
    }

    /// Opens the database described by `config` and wraps it.
    pub async fn open(config: DbConfig) -> LedgerResult<Self> {
        Ok(Ledger::new(Database::new(config).await?))
    }

    /// The underlying database, for diagnostics.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Closes the pool. Later calls fail with a storage error.
    pub async fn close(&self) {
        self.db.close().await;
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Adds a product or overwrites the description and price of an
    /// existing code. Stock is never touched here.
    pub async fn add_product(
        &self,
        code: &str,
        description: &str,
        price_text: &str,
    ) -> LedgerResult<Product> {
        let code = require("product code", code)?;
        let description = require("description", description)?;
        let price_text = require("price", price_text)?;

        validate_product_code(code)?;
        validate_description(description)?;
        let price = parse_price(price_text)?;

        let product = self.db.products().upsert(code, description, price).await?;
        info!(code = %product.code, price = %product.unit_price, "Product saved");
        Ok(product)
    }

    /// The stock replenishment form: adds a positive quantity to a product.
    ///
    /// ## Returns
    /// The product with its new stock count.
    pub async fn replenish_stock(&self, code: &str, quantity_text: &str) -> LedgerResult<Product> {
        let code = require("product code", code)?;
        let quantity_text = require("quantity", quantity_text)?;
        let quantity = parse_quantity(quantity_text)?;

        self.adjust_stock(code, quantity).await?;

        self.find_product(code)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(code.to_string()).into())
    }

    /// Applies `stock += delta`.
    ///
    /// A negative delta larger than the shelf is refused with
    /// `InsufficientStock`; a positive delta that would push the count past
    /// `i64::MAX` is refused with `InvalidQuantity`. Either way the row is
    /// left unchanged.
    pub async fn adjust_stock(&self, code: &str, delta: i64) -> LedgerResult<()> {
        let code = code.trim();
        let mut conn = self.db.pool().acquire().await?;

        if product::apply_stock_delta(&mut conn, code, delta).await? {
            info!(code = %code, delta = delta, "Stock adjusted");
            return Ok(());
        }

        // Nothing changed: find out which rule stopped it
        match product::fetch_by_code(&mut conn, code).await? {
            None => Err(CoreError::ProductNotFound(code.to_string()).into()),
            Some(found) if delta > 0 => {
                warn!(
                    code = %code,
                    stock = found.stock_quantity,
                    delta = delta,
                    "Stock count would overflow"
                );
                Err(ValidationError::InvalidQuantity {
                    value: delta.to_string(),
                }
                .into())
            }
            Some(found) => Err(CoreError::InsufficientStock {
                code: found.code,
                available: found.stock_quantity,
                requested: delta.saturating_neg(),
            }
            .into()),
        }
    }

    pub async fn list_products(&self) -> LedgerResult<Vec<Product>> {
        Ok(self.db.products().list_all().await?)
    }

    pub async fn find_product(&self, code: &str) -> LedgerResult<Option<Product>> {
        Ok(self.db.products().get_by_code(code.trim()).await?)
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Registers a customer, or replaces the details held under the id.
    ///
    /// Every field must be filled in (checked in form order) before the
    /// national id shape is checked. Nothing is written on rejection.
    pub async fn register_customer(
        &self,
        full_name: &str,
        national_id: &str,
        address: &str,
        phone: &str,
    ) -> LedgerResult<Customer> {
        let full_name = require("name", full_name)?;
        let national_id = require("national id", national_id)?;
        let address = require("address", address)?;
        let phone = require("phone", phone)?;

        validate_national_id(national_id)?;

        let customer = Customer {
            full_name: full_name.to_string(),
            national_id: national_id.to_string(),
            address: address.to_string(),
            phone: phone.to_string(),
        };
        self.db.customers().upsert(&customer).await?;

        info!(national_id = %customer.national_id, "Customer registered");
        Ok(customer)
    }

    pub async fn list_customers(&self) -> LedgerResult<Vec<Customer>> {
        Ok(self.db.customers().list_all().await?)
    }

    pub async fn find_customer(&self, national_id: &str) -> LedgerResult<Option<Customer>> {
        Ok(self.db.customers().get_by_id(national_id.trim()).await?)
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Records a sale stamped with the local wall clock.
    pub async fn record_sale(
        &self,
        product_code: &str,
        quantity_text: &str,
        customer_id: &str,
    ) -> LedgerResult<SaleReceipt> {
        self.record_sale_at(
            product_code,
            quantity_text,
            customer_id,
            Local::now().naive_local(),
        )
        .await
    }

    /// Records a sale stamped with `now`.
    ///
    /// Rejections are logged at warn; storage failures at error.
    pub async fn record_sale_at(
        &self,
        product_code: &str,
        quantity_text: &str,
        customer_id: &str,
        now: NaiveDateTime,
    ) -> LedgerResult<SaleReceipt> {
        let result = self
            .commit_sale(product_code, quantity_text, customer_id, now)
            .await;

        match &result {
            Ok(receipt) => info!(
                sale_id = receipt.sale_id,
                total = %receipt.total,
                "Sale recorded"
            ),
            Err(LedgerError::Rejected(reason)) => warn!(
                code = %product_code.trim(),
                customer = %customer_id.trim(),
                reason = %reason,
                "Sale rejected"
            ),
            Err(LedgerError::Storage(err)) => error!(error = %err, "Sale not recorded"),
        }

        result
    }

    async fn commit_sale(
        &self,
        product_code: &str,
        quantity_text: &str,
        customer_id: &str,
        now: NaiveDateTime,
    ) -> LedgerResult<SaleReceipt> {
        let request = SaleRequest::parse(product_code, quantity_text, customer_id)?;

        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let found_product = product::fetch_by_code(&mut tx, &request.product_code).await?;
        let found_customer = customer::fetch_by_id(&mut tx, &request.customer_id).await?;

        let pending = prepare_sale(
            &request,
            found_product.as_ref(),
            found_customer.as_ref(),
            now,
        )?;

        let sale_id = sale::insert(&mut tx, &pending).await?;

        let decremented =
            product::apply_stock_delta(&mut tx, &pending.product_code, -pending.quantity).await?;
        if !decremented {
            // Checked above on this transaction; only a concurrent writer gets here
            return Err(CoreError::InsufficientStock {
                code: pending.product_code.clone(),
                available: found_product.map_or(0, |p| p.stock_quantity),
                requested: pending.quantity,
            }
            .into());
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(sale_id = sale_id, "Sale transaction committed");
        Ok(pending.receipt(sale_id))
    }

    pub async fn list_sales(&self) -> LedgerResult<Vec<Sale>> {
        Ok(self.db.sales().list_all().await?)
    }

    /// Every sale since the last purge, with the running total.
    pub async fn day_book(&self) -> LedgerResult<DayBook> {
        let book = DayBook::from_sales(self.list_sales().await?)?;
        Ok(book)
    }

    /// Deletes every sale. The caller is expected to have asked first.
    ///
    /// ## Returns
    /// The number of sales removed.
    pub async fn purge_sales(&self) -> LedgerResult<u64> {
        let deleted = self.db.sales().purge().await?;
        info!(deleted = deleted, "Sales purged");
        Ok(deleted)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

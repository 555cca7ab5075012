//! # Domain Types
//!
//! Core domain types used throughout Till.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Customer     │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  code (key)     │   │  national_id    │   │  id (autoinc)   │       │
//! │  │  description    │   │   (key, 10 dig) │   │  timestamp      │       │
//! │  │  unit_price     │   │  full_name      │   │  product_code ──┼──► P  │
//! │  │  stock_quantity │   │  address, phone │   │  customer_id ───┼──► C  │
//! │  └─────────────────┘   └─────────────────┘   │  description *  │       │
//! │                                               │  unit_price  *  │       │
//! │                                               │  quantity,total │       │
//! │                                               └─────────────────┘       │
//! │  * snapshot fields: copied at sale time, never follow catalog edits    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::SALE_TIMESTAMP_FORMAT;

// =============================================================================
// Product
// =============================================================================

/// A catalog entry with its shelf count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Business key typed by the operator.
    pub code: String,

    pub description: String,

    pub unit_price: Money,

    /// Units currently on the shelf. Never negative.
    pub stock_quantity: i64,
}

impl Product {
    /// Checks whether `quantity` units can leave the shelf.
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity <= self.stock_quantity
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A registered customer, keyed by national id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub full_name: String,

    /// Exactly ten ASCII digits.
    pub national_id: String,

    pub address: String,

    pub phone: String,
}

// =============================================================================
// Sale
// =============================================================================

/// A committed line in the sales ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub product_code: String,
    /// Product description at time of sale (frozen).
    pub description: String,
    pub quantity: i64,
    /// Unit price at time of sale (frozen).
    pub unit_price: Money,
    pub total: Money,
    pub customer_id: String,
}

impl Sale {
    /// Timestamp rendered the way it is stored.
    pub fn timestamp_text(&self) -> String {
        self.timestamp.format(SALE_TIMESTAMP_FORMAT).to_string()
    }
}

/// A sale that passed every rule and is ready to be written.
///
/// Produced only by [`crate::sale::prepare_sale`]; the database assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    pub timestamp: NaiveDateTime,
    pub product_code: String,
    pub description: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub total: Money,
    pub customer_id: String,
}

impl NewSale {
    /// Timestamp rendered the way it is stored.
    pub fn timestamp_text(&self) -> String {
        self.timestamp.format(SALE_TIMESTAMP_FORMAT).to_string()
    }

    /// Builds the receipt once the row has an id.
    pub fn receipt(&self, sale_id: i64) -> SaleReceipt {
        SaleReceipt {
            sale_id,
            total: self.total,
            timestamp: self.timestamp,
        }
    }

    /// Attaches the database id, giving the stored row.
    pub fn into_sale(self, id: i64) -> Sale {
        Sale {
            id,
            timestamp: self.timestamp,
            product_code: self.product_code,
            description: self.description,
            quantity: self.quantity,
            unit_price: self.unit_price,
            total: self.total,
            customer_id: self.customer_id,
        }
    }
}

// =============================================================================
// Receipt & Day Book
// =============================================================================

/// What the operator gets back from a successful sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleReceipt {
    pub sale_id: i64,
    pub total: Money,
    pub timestamp: NaiveDateTime,
}

/// Every sale since the last purge and the sum of their totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBook {
    pub sales: Vec<Sale>,
    pub total: Money,
}

impl DayBook {
    /// Builds the day book, summing the sale totals.
    ///
    /// ## Errors
    /// `AmountOutOfRange` when the sum does not fit in an `i64` of cents.
    pub fn from_sales(sales: Vec<Sale>) -> CoreResult<Self> {
        let total = Money::checked_sum(sales.iter().map(|s| s.total))
            .ok_or_else(|| CoreError::AmountOutOfRange("day book total".to_string()))?;
        Ok(DayBook { sales, total })
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

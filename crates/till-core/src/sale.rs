//! # Sale Rules
//!
//! The decision half of recording a sale. The database crate looks up the
//! product and customer, hands them here, and writes whatever comes back.
//!
//! ## Check Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record_sale("A1", "3", "1234567890")                                   │
//! │                                                                         │
//! │  SaleRequest::parse                                                     │
//! │  ├── 1. all three fields present ──────────► Required                   │
//! │  └── 2. quantity is a positive integer ────► InvalidQuantity            │
//! │                                                                         │
//! │  (lookups happen in till-db)                                            │
//! │                                                                         │
//! │  prepare_sale                                                           │
//! │  ├── 3. product exists ────────────────────► ProductNotFound            │
//! │  ├── 4. customer exists ───────────────────► CustomerNotFound           │
//! │  ├── 5. quantity <= stock ─────────────────► InsufficientStock          │
//! │  └── total = unit_price × quantity, snapshot description + price        │
//! │                                                                         │
//! │  First failure wins; nothing is aggregated.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDateTime, Timelike};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Customer, NewSale, Product};
use crate::validation::{parse_quantity, ValidationResult};

/// The three form fields of a sale, checked for shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRequest {
    pub product_code: String,
    pub quantity: i64,
    pub customer_id: String,
}

impl SaleRequest {
    /// Runs checks 1 and 2 on raw form text.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::SaleRequest;
    ///
    /// let request = SaleRequest::parse("A1", "3", "1234567890").unwrap();
    /// assert_eq!(request.quantity, 3);
    /// assert!(SaleRequest::parse("A1", "", "1234567890").is_err());
    /// ```
    pub fn parse(
        product_code: &str,
        quantity_text: &str,
        customer_id: &str,
    ) -> ValidationResult<Self> {
        let product_code = product_code.trim();
        let quantity_text = quantity_text.trim();
        let customer_id = customer_id.trim();

        // Report the first blank field in form order
        for (field, value) in [
            ("product code", product_code),
            ("quantity", quantity_text),
            ("customer id", customer_id),
        ] {
            if value.is_empty() {
                return Err(ValidationError::required(field));
            }
        }

        Ok(SaleRequest {
            product_code: product_code.to_string(),
            quantity: parse_quantity(quantity_text)?,
            customer_id: customer_id.to_string(),
        })
    }
}

/// Runs checks 3 to 5 and builds the sale to be written.
///
/// `now` is the caller's wall clock; it is truncated to whole seconds so the
/// value stored and the value returned on the receipt agree.
pub fn prepare_sale(
    request: &SaleRequest,
    product: Option<&Product>,
    customer: Option<&Customer>,
    now: NaiveDateTime,
) -> CoreResult<NewSale> {
    let product =
        product.ok_or_else(|| CoreError::ProductNotFound(request.product_code.clone()))?;
    let customer =
        customer.ok_or_else(|| CoreError::CustomerNotFound(request.customer_id.clone()))?;

    if !product.can_sell(request.quantity) {
        return Err(CoreError::InsufficientStock {
            code: product.code.clone(),
            available: product.stock_quantity,
            requested: request.quantity,
        });
    }

    let total = product
        .unit_price
        .checked_multiply_quantity(request.quantity)
        .filter(Money::is_storable)
        .ok_or_else(|| ValidationError::InvalidQuantity {
            value: request.quantity.to_string(),
        })?;

    Ok(NewSale {
        timestamp: now.with_nanosecond(0).unwrap_or(now),
        product_code: product.code.clone(),
        description: product.description.clone(),
        quantity: request.quantity,
        unit_price: product.unit_price,
        total,
        customer_id: customer.national_id.clone(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

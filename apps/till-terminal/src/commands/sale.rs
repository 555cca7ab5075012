//! # Sale Commands
//!
//! Recording a sale, reading the day book, and the end-of-day purge.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Operator fills: code "A1", quantity "3", customer "1234567890"        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  record_sale() ──► Ledger::record_sale (one transaction)              │
//! │       │                                                                 │
//! │       ├── rejected ──► ApiError, nothing written                       │
//! │       │                                                                 │
//! │       └── ok ──► RecordSaleResponse { saleId, total, timestamp }       │
//! │                                                                         │
//! │  End of day: day_book() to review, purge_sales(confirmed) to clear     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::LedgerState;
use till_core::{Money, Sale, SaleReceipt, SALE_TIMESTAMP_FORMAT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSaleResponse {
    pub sale_id: i64,
    pub total: Money,
    pub timestamp: String,
}

impl From<SaleReceipt> for RecordSaleResponse {
    fn from(r: SaleReceipt) -> Self {
        RecordSaleResponse {
            sale_id: r.sale_id,
            total: r.total,
            timestamp: r.timestamp.format(SALE_TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// One line of the day book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDto {
    pub id: i64,
    pub timestamp: String,
    pub product_code: String,
    pub description: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub total: Money,
    pub customer_id: String,
}

impl From<Sale> for SaleDto {
    fn from(s: Sale) -> Self {
        SaleDto {
            id: s.id,
            timestamp: s.timestamp_text(),
            product_code: s.product_code,
            description: s.description,
            quantity: s.quantity,
            unit_price: s.unit_price,
            total: s.total,
            customer_id: s.customer_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBookResponse {
    pub sales: Vec<SaleDto>,
    pub total: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeResponse {
    pub deleted: u64,
}

/// Records a sale from the three form fields.
pub async fn record_sale(
    ledger: &LedgerState,
    product_code: &str,
    quantity: &str,
    customer_id: &str,
) -> Result<RecordSaleResponse, ApiError> {
    debug!(
        code = %product_code,
        quantity = %quantity,
        customer = %customer_id,
        "record_sale command"
    );

    let receipt = ledger
        .inner()
        .record_sale(product_code, quantity, customer_id)
        .await?;
    Ok(receipt.into())
}

/// Every sale since the last purge with the summed total.
pub async fn day_book(ledger: &LedgerState) -> Result<DayBookResponse, ApiError> {
    let book = ledger.inner().day_book().await?;
    Ok(DayBookResponse {
        sales: book.sales.into_iter().map(SaleDto::from).collect(),
        total: book.total,
    })
}

/// Clears the day book.
///
/// Refuses unless the operator confirmed; there is no undo.
pub async fn purge_sales(ledger: &LedgerState, confirmed: bool) -> Result<PurgeResponse, ApiError> {
    if !confirmed {
        info!("Purge cancelled by operator");
        return Err(ApiError::validation("Purge not confirmed"));
    }

    let deleted = ledger.inner().purge_sales().await?;
    Ok(PurgeResponse { deleted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use till_db::{DbConfig, Ledger};

    async fn stocked() -> LedgerState {
        let ledger = Ledger::open(DbConfig::in_memory()).await.unwrap();
        ledger.add_product("A1", "Widget", "10.00").await.unwrap();
        ledger.adjust_stock("A1", 5).await.unwrap();
        ledger
            .register_customer("Ana", "1234567890", "Calle 5", "0991")
            .await
            .unwrap();
        LedgerState::new(ledger)
    }

    #[tokio::test]
    async fn test_record_sale_response() {
        let ledger = stocked().await;
        let response = record_sale(&ledger, "A1", "3", "1234567890").await.unwrap();

        assert_eq!(response.total, Money::from_cents(3000));
        assert_eq!(response.timestamp.len(), "YYYY-MM-DD HH:MM:SS".len());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["saleId"], response.sale_id);
        assert_eq!(json["total"], 3000);
    }

    #[tokio::test]
    async fn test_insufficient_stock_code() {
        let ledger = stocked().await;
        let err = record_sale(&ledger, "A1", "6", "1234567890")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
    }

    #[tokio::test]
    async fn test_purge_requires_confirmation() {
        let ledger = stocked().await;
        record_sale(&ledger, "A1", "1", "1234567890").await.unwrap();

        let err = purge_sales(&ledger, false).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(day_book(&ledger).await.unwrap().sales.len(), 1);

        let purged = purge_sales(&ledger, true).await.unwrap();
        assert_eq!(purged.deleted, 1);

        let book = day_book(&ledger).await.unwrap();
        assert!(book.sales.is_empty());
        assert_eq!(book.total, Money::zero());
    }
}

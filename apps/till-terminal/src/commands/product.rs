//! # Product Commands
//!
//! Catalog maintenance and the inventory listing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::LedgerState;
use till_core::{Money, Product};

/// Product as shown on the inventory screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub code: String,
    pub description: String,
    pub unit_price: Money,
    pub stock_quantity: i64,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            code: p.code,
            description: p.description,
            unit_price: p.unit_price,
            stock_quantity: p.stock_quantity,
        }
    }
}

/// Adds a product, or updates description and price of an existing code.
pub async fn add_product(
    ledger: &LedgerState,
    code: &str,
    description: &str,
    price: &str,
) -> Result<ProductDto, ApiError> {
    debug!(code = %code, "add_product command");

    let product = ledger
        .inner()
        .add_product(code, description, price)
        .await?;
    Ok(product.into())
}

/// Adds received units to a product's stock.
pub async fn replenish_stock(
    ledger: &LedgerState,
    code: &str,
    quantity: &str,
) -> Result<ProductDto, ApiError> {
    debug!(code = %code, quantity = %quantity, "replenish_stock command");

    let product = ledger.inner().replenish_stock(code, quantity).await?;
    Ok(product.into())
}

/// Lists the catalog ordered by code.
pub async fn list_products(ledger: &LedgerState) -> Result<Vec<ProductDto>, ApiError> {
    let products = ledger.inner().list_products().await?;
    Ok(products.into_iter().map(ProductDto::from).collect())
}

/// Looks a single product up.
///
/// ## Errors
/// `NOT_FOUND` when the code is not in the catalog.
pub async fn get_product(ledger: &LedgerState, code: &str) -> Result<ProductDto, ApiError> {
    ledger
        .inner()
        .find_product(code)
        .await?
        .map(ProductDto::from)
        .ok_or_else(|| ApiError::not_found("Product", code.trim()))
}

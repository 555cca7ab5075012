//! # Customer Commands

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::LedgerState;
use till_core::Customer;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub full_name: String,
    pub national_id: String,
    pub address: String,
    pub phone: String,
}

impl From<Customer> for CustomerDto {
    fn from(c: Customer) -> Self {
        CustomerDto {
            full_name: c.full_name,
            national_id: c.national_id,
            address: c.address,
            phone: c.phone,
        }
    }
}

/// Registers a customer; an existing id has its details replaced.
pub async fn register_customer(
    ledger: &LedgerState,
    full_name: &str,
    national_id: &str,
    address: &str,
    phone: &str,
) -> Result<CustomerDto, ApiError> {
    debug!(national_id = %national_id, "register_customer command");

    let customer = ledger
        .inner()
        .register_customer(full_name, national_id, address, phone)
        .await?;
    Ok(customer.into())
}

pub async fn list_customers(ledger: &LedgerState) -> Result<Vec<CustomerDto>, ApiError> {
    let customers = ledger.inner().list_customers().await?;
    Ok(customers.into_iter().map(CustomerDto::from).collect())
}

pub async fn get_customer(ledger: &LedgerState, national_id: &str) -> Result<CustomerDto, ApiError> {
    ledger
        .inner()
        .find_customer(national_id)
        .await?
        .map(CustomerDto::from)
        .ok_or_else(|| ApiError::not_found("Customer", national_id.trim()))
}

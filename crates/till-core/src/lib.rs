//! # till-core: Pure Business Logic for Till
//!
//! This crate holds the rules of the store ledger as pure functions with
//! zero I/O dependencies. The database crate looks rows up and writes them;
//! every decision about whether a sale may happen is made here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (till-terminal)                    │   │
//! │  │    Add Product ─► Register Customer ─► Record Sale ─► Day Book │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ text fields                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Ledger facade (till-db)                         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   sale    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ SaleReq.  │  │   rules   │  │   │
//! │  │   │  Customer │  │           │  │ prepare   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Customer, Sale, SaleReceipt)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation for forms
//! - [`sale`] - The sale recording rules
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::money::Money;
//!
//! let price = Money::parse_decimal("10.00").unwrap();
//! let total = price.checked_multiply_quantity(3);
//! assert_eq!(total.map(|m| m.cents()), Some(3000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod sale;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use sale::{prepare_sale, SaleRequest};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Format of the `sales.date` column and of receipt timestamps.
pub const SALE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Exact length of a customer's national identification number.
pub const NATIONAL_ID_LENGTH: usize = 10;

/// Longest product code accepted by catalog maintenance.
pub const MAX_PRODUCT_CODE_LEN: usize = 50;

/// Longest product description accepted by catalog maintenance.
pub const MAX_DESCRIPTION_LEN: usize = 200;

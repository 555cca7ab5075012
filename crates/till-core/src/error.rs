//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Business rule rejections                       │
//! │  └── ValidationError  - Malformed form input                           │
//! │                                                                         │
//! │  till-db errors (separate crate)                                       │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── LedgerError      - Rejected(CoreError) | Storage(DbError)         │
//! │                                                                         │
//! │  till-terminal errors (in app)                                         │
//! │  └── ApiError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → LedgerError → ApiError            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, id, offending value)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule rejections.
///
/// Every variant is a refused operation, never a fault: the ledger is left
/// exactly as it was before the call.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product carries the given code.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No customer is registered under the given national id.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Selling (or removing) more units than are on the shelf.
    ///
    /// ## User Workflow
    /// ```text
    /// Record Sale (qty: 6)
    ///      │
    ///      ▼
    /// Check stock: available=5
    ///      │
    ///      ▼
    /// InsufficientStock { code: "A1", available: 5, requested: 6 }
    ///      │
    ///      ▼
    /// Operator sees: "Insufficient stock for A1: available 5, requested 6"
    /// ```
    #[error("Insufficient stock for {code}: available {available}, requested {requested}")]
    InsufficientStock {
        code: String,
        available: i64,
        requested: i64,
    },

    /// A computed amount left the range the ledger can hold.
    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any lookup happens, straight from the text the operator
/// typed into a form.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. a product code with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Quantity text is not a positive whole number.
    #[error("Quantity must be a positive whole number, got '{value}'")]
    InvalidQuantity { value: String },

    /// Price text is not a non-negative amount with at most two decimals.
    #[error("Price must be a non-negative amount with at most two decimals, got '{value}'")]
    InvalidPrice { value: String },

    /// National id is not exactly ten digits.
    #[error("National id must be exactly 10 digits, got '{value}'")]
    InvalidNationalId { value: String },
}

impl ValidationError {
    /// Creates a Required error for the named field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

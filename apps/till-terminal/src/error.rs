//! # Command Error Types
//!
//! Unified error type for terminal commands.
//!
//! ## Error Conversion Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Conversion Pipeline                            │
//! │                                                                         │
//! │  Ledger operation fails                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LedgerError ─┬─ Rejected(CoreError) ──► NOT_FOUND / INSUFFICIENT_STOCK │
//! │               │                          / VALIDATION_ERROR             │
//! │               └─ Storage(DbError) ─────► DATABASE_ERROR (logged)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError { code, message }                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Shell prints "error [CODE] message" and returns to the menu           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fmt;
use till_core::CoreError;
use till_db::{DbError, LedgerError};
use tracing::error;

/// Error returned from terminal commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock for A1: available 5, requested 6"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message for the operator
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or customer not found
    NotFound,

    /// A form field is missing or malformed
    ValidationError,

    /// Sale or adjustment larger than the shelf
    InsufficientStock,

    /// SQLite failed
    DatabaseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InsufficientStock => "INSUFFICIENT_STOCK",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts storage errors to API errors.
///
/// The operator gets a generic message; the detail goes to the log.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::TransactionFailed(e) => {
                error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database is busy")
            }
            DbError::Decode { column, reason } => {
                error!(column = %column, "Stored value unreadable: {}", reason);
                ApiError::new(ErrorCode::DatabaseError, "Stored data is unreadable")
            }
            other => {
                error!("Database operation failed: {}", other);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts business rejections to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(code) => ApiError::not_found("Product", &code),
            CoreError::CustomerNotFound(id) => ApiError::not_found("Customer", &id),
            err @ CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            err @ CoreError::AmountOutOfRange(_) => ApiError::validation(err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Rejected(e) => e.into(),
            LedgerError::Storage(e) => e.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

//! # Validation Module
//!
//! Form-field validation for Till.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation                                                 │
//! │  └── Collects every field as raw text                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, lengths, character sets                          │
//! │  └── Text → quantity / price / national id                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Sale rules (crate::sale)                                     │
//! │  └── Existence and stock, checked against looked-up rows               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{parse_quantity, validate_national_id};
//!
//! assert_eq!(parse_quantity("3").unwrap(), 3);
//! assert!(validate_national_id("1234567890").is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_DESCRIPTION_LEN, MAX_PRODUCT_CODE_LEN, NATIONAL_ID_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Checks that a field is not blank and returns it trimmed.
///
/// ## Example
/// ```rust
/// use till_core::validation::require;
///
/// assert_eq!(require("code", "  A1 ").unwrap(), "A1");
/// assert!(require("code", "   ").is_err());
/// ```
pub fn require<'a>(field: &str, value: &'a str) -> ValidationResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(value)
}

/// Validates a product code.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only letters, digits, hyphens and underscores
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    let code = require("product code", code)?;

    if code.chars().count() > MAX_PRODUCT_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "product code".to_string(),
            max: MAX_PRODUCT_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "product code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product description.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = require("description", description)?;

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates a national identification number.
///
/// ## Rules
/// - Exactly 10 characters
/// - Every character an ASCII digit
///
/// The id is the key every sale points at, so nothing else is accepted.
///
/// ## Example
/// ```rust
/// use till_core::validation::validate_national_id;
///
/// assert!(validate_national_id("1234567890").is_ok());
/// assert!(validate_national_id("123456789").is_err());
/// assert!(validate_national_id("12345abcde").is_err());
/// ```
pub fn validate_national_id(id: &str) -> ValidationResult<()> {
    if id.len() != NATIONAL_ID_LENGTH || !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidNationalId {
            value: id.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Parsers
// =============================================================================

/// Parses a quantity typed by the operator.
///
/// ## Rules
/// - ASCII digits only (no sign, no decimal point)
/// - Must fit in an `i64`
/// - Must be greater than zero
///
/// ## User Workflow
/// ```text
/// Operator types "3"
///      │
///      ▼
/// parse_quantity("3") ← THIS FUNCTION
///      │
///      ├── not digits?  → InvalidQuantity
///      ├── zero?        → InvalidQuantity
///      └── OK → 3
/// ```
pub fn parse_quantity(text: &str) -> ValidationResult<i64> {
    let trimmed = text.trim();
    let invalid = || ValidationError::InvalidQuantity {
        value: text.to_string(),
    };

    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    match trimmed.parse::<i64>() {
        Ok(qty) if qty > 0 => Ok(qty),
        _ => Err(invalid()),
    }
}

/// Parses a unit price typed by the operator.
///
/// See [`Money::parse_decimal`] for the accepted shapes.
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    Money::parse_decimal(text).ok_or_else(|| ValidationError::InvalidPrice {
        value: text.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

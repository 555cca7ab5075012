//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 * 3 = 0.30000000000000004  ❌ WRONG!                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    10 cents * 3 = 30 cents         ✅ exact                            │
//! │                                                                         │
//! │  The ledger file keeps REAL columns. Floats are converted at the       │
//! │  repository boundary only, rounding to the nearest cent.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::Money;
//!
//! let price = Money::from_cents(1099); // 10.99
//! let total = price.checked_multiply_quantity(2).unwrap();
//! assert_eq!(total.cents(), 2198);
//! assert_eq!(total.to_string(), "21.98");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Minor units per major unit.
const CENTS_PER_UNIT: i64 = 100;

/// Largest amount a price or sale total may carry: 99,999,999,999.99.
///
/// Amounts are stored as `REAL` major units. Up to this bound the
/// cents -> float -> cents trip is exact, well inside the 2^53 range
/// where `f64` still holds every integer.
pub const MAX_AMOUNT_CENTS: i64 = 9_999_999_999_999;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Product.unit_price ──► prepare_sale(quantity) ──► Sale.total
///                                                      │
///                                                      ▼
///                                      DayBook.total = Σ Sale.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / CENTS_PER_UNIT
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % CENTS_PER_UNIT).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Checks that the value fits in a `REAL` column without losing cents.
    #[inline]
    pub const fn is_storable(&self) -> bool {
        self.0 >= -MAX_AMOUNT_CENTS && self.0 <= MAX_AMOUNT_CENTS
    }

    /// Parses an operator-typed amount such as `"10"`, `"10.5"` or `"10.50"`.
    ///
    /// ## Rules
    /// - Digits, optionally followed by `.` and one or two digits
    /// - No sign, no exponent, no thousands separators
    /// - Surrounding whitespace is ignored
    ///
    /// Returns `None` for anything else, including amounts above
    /// [`MAX_AMOUNT_CENTS`].
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("10.5"), Some(Money::from_cents(1050)));
    /// assert_eq!(Money::parse_decimal("7"), Some(Money::from_cents(700)));
    /// assert_eq!(Money::parse_decimal("1.999"), None);
    /// assert_eq!(Money::parse_decimal("-3"), None);
    /// assert_eq!(Money::parse_decimal("100000000000"), None);
    /// ```
    pub fn parse_decimal(text: &str) -> Option<Money> {
        let text = text.trim();
        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (text, None),
        };

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let fraction_cents = match fraction {
            None => 0,
            Some(f) if (1..=2).contains(&f.len()) && f.chars().all(|c| c.is_ascii_digit()) => {
                // "5" means 50 cents, "05" means 5 cents
                let value: i64 = f.parse().ok()?;
                if f.len() == 1 {
                    value * 10
                } else {
                    value
                }
            }
            Some(_) => return None,
        };

        let whole: i64 = whole.parse().ok()?;
        whole
            .checked_mul(CENTS_PER_UNIT)?
            .checked_add(fraction_cents)
            .map(Money)
            .filter(Money::is_storable)
    }

    /// Converts a stored `REAL` column value to Money, rounding to the
    /// nearest cent.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_f64(10.99).cents(), 1099);
    /// assert_eq!(Money::from_major_f64(0.1 + 0.2).cents(), 30);
    /// ```
    pub fn from_major_f64(value: f64) -> Money {
        Money((value * CENTS_PER_UNIT as f64).round() as i64)
    }

    /// Converts to the float written into `REAL` columns.
    pub fn to_major_f64(&self) -> f64 {
        self.0 as f64 / CENTS_PER_UNIT as f64
    }

    /// Multiplies money by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.checked_multiply_quantity(3), Some(Money::from_cents(897)));
    /// assert_eq!(unit_price.checked_multiply_quantity(i64::MAX), None);
    /// ```
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Sums amounts, returning `None` if the running total overflows.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let totals = [Money::from_cents(3000), Money::from_cents(1099)];
    /// assert_eq!(Money::checked_sum(totals), Some(Money::from_cents(4099)));
    /// assert_eq!(Money::checked_sum([Money::from_cents(i64::MAX), Money::from_cents(1)]), None);
    /// ```
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain `major.minor` rendering; the currency symbol belongs to the
/// presentation config.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("10"), Some(Money::from_cents(1000)));
        assert_eq!(Money::parse_decimal("10.5"), Some(Money::from_cents(1050)));
        assert_eq!(Money::parse_decimal("10.05"), Some(Money::from_cents(1005)));
        assert_eq!(Money::parse_decimal(" 0.99 "), Some(Money::from_cents(99)));
        assert_eq!(Money::parse_decimal("0"), Some(Money::zero()));

        assert_eq!(Money::parse_decimal(""), None);
        assert_eq!(Money::parse_decimal("abc"), None);
        assert_eq!(Money::parse_decimal("10."), None);
        assert_eq!(Money::parse_decimal(".5"), None);
        assert_eq!(Money::parse_decimal("1.234"), None);
        assert_eq!(Money::parse_decimal("+1"), None);
        assert_eq!(Money::parse_decimal("-1"), None);
        assert_eq!(Money::parse_decimal("1e3"), None);
        assert_eq!(Money::parse_decimal("1.2.3"), None);
        assert_eq!(Money::parse_decimal("99999999999999999999"), None);
    }

    #[test]
    fn test_parse_decimal_upper_bound() {
        assert_eq!(
            Money::parse_decimal("99999999999.99"),
            Some(Money::from_cents(MAX_AMOUNT_CENTS))
        );
        assert_eq!(Money::parse_decimal("100000000000"), None);
        assert_eq!(Money::parse_decimal("100000000000.00"), None);
        // 2^53 cents, where a REAL column would start dropping cents
        assert_eq!(Money::parse_decimal("90071992547409.93"), None);
        assert_eq!(Money::parse_decimal("92233720368547758.07"), None);
    }

    #[test]
    fn test_float_boundary_round_trip() {
        for cents in [0, 1, 10, 99, 1099, 123_456] {
            let money = Money::from_cents(cents);
            assert_eq!(Money::from_major_f64(money.to_major_f64()), money);
        }
    }

    #[test]
    fn test_float_round_trip_near_max() {
        for cents in (MAX_AMOUNT_CENTS - 1_000)..=MAX_AMOUNT_CENTS {
            let money = Money::from_cents(cents);
            assert!(money.is_storable());
            assert_eq!(Money::from_major_f64(money.to_major_f64()), money);
        }
        assert!(!Money::from_cents(MAX_AMOUNT_CENTS + 1).is_storable());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let mut c = a;
        c += b;
        assert_eq!(c.cents(), 1500);
    }

    #[test]
    fn test_multiply_quantity_is_exact() {
        // 0.10 three times is exactly 0.30 in cents
        let dime = Money::parse_decimal("0.10").unwrap();
        assert_eq!(dime.checked_multiply_quantity(3), Some(Money::from_cents(30)));
        assert_eq!(
            Money::from_cents(i64::MAX).checked_multiply_quantity(2),
            None
        );
    }

    #[test]
    fn test_checked_sum() {
        let totals = vec![
            Money::from_cents(3000),
            Money::from_cents(1099),
            Money::from_cents(1),
        ];
        assert_eq!(Money::checked_sum(totals), Some(Money::from_cents(4100)));
        assert_eq!(Money::checked_sum(Vec::new()), Some(Money::zero()));

        let near_max = Money::from_cents(i64::MAX - 1);
        assert_eq!(
            Money::checked_sum([near_max, Money::from_cents(1)]),
            Some(Money::from_cents(i64::MAX))
        );
        assert_eq!(Money::checked_sum([near_max, Money::from_cents(2)]), None);
        assert_eq!(near_max.checked_add(Money::from_cents(2)), None);
    }
}

//! # Money Module
//!
//! Provides the `Money` type for handling prices and stock values safely.
//!
//! ## Stock Value in Cents
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  3 laptops at 999.99                                                    │
//! │                                                                         │
//! │    f64:    3.0 * 999.99  = 2999.9700000000003                           │
//! │    Money:  3   * 99999   = 299997 cents ──► "2999.97"                   │
//! │                                                                         │
//! │  Prices are parsed once at the edge (form, CSV) and stay integral       │
//! │  through every sum and product after that.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::money::Money;
//!
//! let price: Money = "999.99".parse().unwrap();
//! assert_eq!(price.cents(), 99999);
//!
//! let value = price.multiply_quantity(15).unwrap();
//! assert_eq!(value.to_decimal_string(), "14999.85");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Negative values are representable so validation can
///   report them instead of the parser silently rejecting them
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as cents**: The wire format is an integer, never a float
///
/// ## Where Money is Used
/// ```text
/// Item.sell_price ──┬──► quantity × price ──► Report.total_stock_value
///                   │
///                   ├──► CSV "Price" column ("999.99")
///                   │
///                   └──► profit margin (with Item.cost_price)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let price = Money::from_cents(2999); // Represents 29.99
    /// assert_eq!(price.cents(), 2999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a stock quantity, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(24999);
    /// assert_eq!(unit_price.multiply_quantity(8).map(|m| m.cents()), Some(199992));
    /// assert_eq!(unit_price.multiply_quantity(i64::MAX), None);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Sums amounts, `None` as soon as the running total overflows.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |total, amount| total.checked_add(amount))
    }

    /// Formats the amount with exactly two decimals and no currency symbol.
    ///
    /// This is the format used by the dashboard's stock value card and the
    /// CSV "Price" column.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1699977).to_decimal_string(), "16999.77");
    /// assert_eq!(Money::from_cents(500).to_decimal_string(), "5.00");
    /// assert_eq!(Money::from_cents(-550).to_decimal_string(), "-5.50");
    /// ```
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Error returned when a decimal string is not a valid amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' is not a valid amount")]
pub struct ParseMoneyError {
    pub input: String,
}

/// Parses a plain decimal amount: `"10"`, `"10.5"`, `"999.99"`, `"-3.25"`.
///
/// At most two fractional digits are accepted; anything else (currency
/// symbols, thousands separators, exponents) is rejected.
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMoneyError {
            input: s.to_string(),
        };

        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (major_str, minor_str) = match digits.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };

        if major_str.is_empty() && minor_str.is_empty() {
            return Err(err());
        }
        if minor_str.len() > 2 {
            return Err(err());
        }
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(major_str) || !all_digits(minor_str) {
            return Err(err());
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str.parse().map_err(|_| err())?
        };
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| err())? * 10,
            _ => minor_str.parse().map_err(|_| err())?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(err)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money with a dollar sign, e.g. `$999.99`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.minor())
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
        let money = Money::from_cents(99999);
        assert_eq!(money.cents(), 99999);
        assert_eq!(money.major(), 999);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(249, 99).cents(), 24999);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(99999)), "$999.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(2999).to_decimal_string(), "29.99");
        assert_eq!(Money::from_cents(7).to_decimal_string(), "0.07");
        assert_eq!(Money::zero().to_decimal_string(), "0.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!("999.99".parse::<Money>().unwrap().cents(), 99999);
        assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<Money>().unwrap().cents(), 1050);
        assert_eq!(".75".parse::<Money>().unwrap().cents(), 75);
        assert_eq!(" 3.25 ".parse::<Money>().unwrap().cents(), 325);
        assert_eq!("-3.25".parse::<Money>().unwrap().cents(), -325);

        assert!("".parse::<Money>().is_err());
        assert!(".".parse::<Money>().is_err());
        assert!("1.234".parse::<Money>().is_err());
        assert!("$5".parse::<Money>().is_err());
        assert!("1,000".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
    }

    #[test]
    fn test_stock_value_is_exact() {
        let laptops = Money::from_cents(99999).multiply_quantity(15).unwrap();
        let chairs = Money::from_cents(24999).multiply_quantity(8).unwrap();
        let total = Money::checked_sum([laptops, chairs]).unwrap();
        assert_eq!(total.cents(), 1699977);
        assert_eq!(total.to_decimal_string(), "16999.77");
    }

    #[test]
    fn test_overflow_is_none() {
        let price = Money::from_cents(99999);
        assert_eq!(price.multiply_quantity(i64::MAX / 2), None);
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
        assert_eq!(
            Money::checked_sum([Money::from_cents(i64::MAX - 1), Money::from_cents(2)]),
            None
        );
        assert_eq!(Money::checked_sum([]), Some(Money::zero()));
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert!((b - a).is_negative());
    }
}

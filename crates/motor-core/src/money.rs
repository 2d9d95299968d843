//! # Money Module
//!
//! Provides the `Money` type: a price held in integer cents that is always
//! observed with exactly two fractional digits.
//!
//! ## The Two-Decimal Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WRITE PATH (request → storage)                                         │
//! │                                                                         │
//! │    100.555  ──► round half-up at 3rd digit ──► "100.56"                 │
//! │    100      ──►                            ──► "100.00"                 │
//! │                                                                         │
//! │  READ PATH (storage → response)                                         │
//! │                                                                         │
//! │    "100.999" ──► parse, round half-up      ──► 101.00                   │
//! │    "100.123" ──►                           ──► 100.12                   │
//! │                                                                         │
//! │  Both paths go through integer cents, so a third decimal digit can     │
//! │  never be persisted or returned.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why parse floats through their decimal text?
//! `100.555_f64` is really `100.55499999...` in binary. Rounding the binary
//! value would give `100.55`. Rust prints the shortest text that round-trips
//! (`"100.555"`), and rounding that text exactly gives the `100.56` a human
//! expects.
//!
//! ## Usage
//! ```rust
//! use motor_core::money::Money;
//!
//! let price = Money::from_f64(100.555).unwrap();
//! assert_eq!(price.cents(), 10056);
//! assert_eq!(price.to_storage(), "100.56");
//!
//! let stored = Money::from_storage("100.999").unwrap();
//! assert_eq!(stored.to_storage(), "101.00");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::MoneyError;

/// Fractional digits kept for every amount.
pub const SCALE: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Design Decisions
/// - **i64 cents**: the stored and returned form can only ever have two
///   fractional digits
/// - **Rounding at construction**: every constructor from external input
///   rounds half-up (away from zero on the midpoint), so no code path can
///   hold an unrounded price
/// - **Serde as a JSON number**: `100.56`, matching what API clients send
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use motor_core::money::Money;
    ///
    /// let price = Money::from_cents(10056);
    /// assert_eq!(price.to_string(), "100.56");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Rounds a decimal string to the cent.
    ///
    /// Accepts anything `rust_decimal` parses (`"100"`, `"100.5"`,
    /// `"-3.005"`); surrounding whitespace is ignored.
    pub fn from_decimal_str(text: &str) -> Result<Self, MoneyError> {
        let trimmed = text.trim();
        let value = Decimal::from_str(trimmed)
            .map_err(|_| MoneyError::Unparseable(trimmed.to_string()))?;
        Self::from_decimal(value).ok_or_else(|| MoneyError::OutOfRange(trimmed.to_string()))
    }

    /// Write path: rounds a JSON/float amount to the cent.
    ///
    /// ## Example
    /// ```rust
    /// use motor_core::money::Money;
    ///
    /// assert_eq!(Money::from_f64(100.5).unwrap().to_storage(), "100.50");
    /// assert_eq!(Money::from_f64(0.0).unwrap().to_storage(), "0.00");
    /// assert!(Money::from_f64(f64::NAN).is_err());
    /// ```
    pub fn from_f64(value: f64) -> Result<Self, MoneyError> {
        if !value.is_finite() {
            return Err(MoneyError::NotFinite);
        }
        // Display for f64 never uses exponent notation
        let text = value.to_string();
        let decimal =
            Decimal::from_str(&text).map_err(|_| MoneyError::OutOfRange(text.clone()))?;
        Self::from_decimal(decimal).ok_or(MoneyError::OutOfRange(text))
    }

    /// Read path: parses the stored column text, rounding to the cent.
    #[inline]
    pub fn from_storage(text: &str) -> Result<Self, MoneyError> {
        Self::from_decimal_str(text)
    }

    /// The fixed two-decimal text written to the `price` column.
    #[inline]
    pub fn to_storage(&self) -> String {
        self.to_string()
    }

    /// The amount as a float, for JSON output.
    ///
    /// `cents / 100` is correctly rounded, so it prints back as the same two
    /// decimals.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    fn from_decimal(value: Decimal) -> Option<Self> {
        value
            .round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)?
            .to_i64()
            .map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the storage form: `100.56`, `-5.50`, `0.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_decimal_str(s)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_f64(value).map_err(D::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn write(value: f64) -> String {
        Money::from_f64(value).unwrap().to_storage()
    }

    fn read(text: &str) -> f64 {
        Money::from_storage(text).unwrap().to_f64()
    }

    #[test]
    fn test_write_path_formats_two_decimals() {
        assert_eq!(write(100.0), "100.00");
        assert_eq!(write(100.5), "100.50");
        assert_eq!(write(100.55), "100.55");
        assert_eq!(write(100.555), "100.56");
        assert_eq!(write(0.0), "0.00");
    }

    #[test]
    fn test_read_path_rounds_to_cents() {
        assert_eq!(read("100"), 100.0);
        assert_eq!(read("100.5"), 100.5);
        assert_eq!(read("100.55"), 100.55);
        assert_eq!(read("100.555"), 100.56);
        assert_eq!(read("0"), 0.0);
    }

    #[test]
    fn test_read_path_with_more_than_two_decimals() {
        assert_eq!(read("100.123"), 100.12);
        assert_eq!(read("100.567"), 100.57);
        assert_eq!(read("100.999"), 101.0);
    }

    #[test]
    fn test_half_up_at_third_digit() {
        assert_eq!(write(0.005), "0.01");
        assert_eq!(write(0.004), "0.00");
        assert_eq!(write(2.675), "2.68");
        assert_eq!(write(-3.005), "-3.01");
    }

    #[test]
    fn test_write_is_idempotent() {
        for text in ["0.00", "1.10", "100.56", "99999.99"] {
            let once = Money::from_storage(text).unwrap();
            let twice = Money::from_storage(&once.to_storage()).unwrap();
            assert_eq!(once, twice);
            assert_eq!(twice.to_storage(), text);
        }
    }

    #[test]
    fn test_read_then_write_round_trips() {
        let read = Money::from_storage("100.999").unwrap();
        let written = Money::from_f64(read.to_f64()).unwrap();
        assert_eq!(written.to_storage(), "101.00");
    }

    #[test]
    fn test_display_negative_and_small() {
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(Money::from_f64(f64::INFINITY), Err(MoneyError::NotFinite));
        assert!(matches!(
            Money::from_decimal_str("abc"),
            Err(MoneyError::Unparseable(_))
        ));
        assert!(Money::from_f64(1e300).is_err());
    }

    #[test]
    fn test_json_number_in_and_out() {
        let price: Money = serde_json::from_str("100.555").unwrap();
        assert_eq!(price.cents(), 10056);
        assert_eq!(serde_json::to_string(&price).unwrap(), "100.56");

        let whole: Money = serde_json::from_str("100").unwrap();
        assert_eq!(whole.to_storage(), "100.00");

        assert!(serde_json::from_str::<Money>("\"100\"").is_err());
    }
}

//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  The legacy dashboard parsed currency strings into floats:          │
//! │    parseFloat("0.1") + parseFloat("0.2") = 0.30000000000000004      │
//! │                                                                     │
//! │  A reconciliation figure that is off by a fraction of a cent is     │
//! │  worse than useless - it gets matched against physical cash.        │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Cents                                        │
//! │    Every amount is an i64 count of the smallest currency unit.      │
//! │    Addition and subtraction are exact; there is nothing to round    │
//! │    mid-computation.                                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Money crosses every serialization boundary as a fixed-point decimal
//! string (`"150.00"`, `"-3.50"`), never as a binary float. Parsing accepts
//! at most two fraction digits; anything finer is rejected rather than
//! silently rounded.
//!
//! ## Usage
//! ```rust
//! use tillkeep_core::money::Money;
//!
//! let amount: Money = "150.00".parse().unwrap();
//! assert_eq!(amount.cents(), 15_000);
//! assert_eq!(amount.to_string(), "150.00");
//!
//! let total = amount + Money::from_cents(50);
//! assert_eq!(total.to_string(), "150.50");
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: net cash legitimately goes negative when withdrawals
///   exceed cash sales for a period
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **String serde**: serialized as `"12.34"`, never a float
///
/// The database stores the raw cents integer; the `sqlx` feature makes the
/// type transparent over `INTEGER` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
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

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is strictly negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Major unit (whole currency) portion, sign included.
    #[inline]
    const fn whole_part(&self) -> i64 {
        self.0 / 100
    }

    /// Minor unit portion, always 0-99.
    #[inline]
    const fn fraction_part(&self) -> i64 {
        (self.0 % 100).abs()
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Error produced when a decimal money string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    /// Input was empty or whitespace.
    #[error("amount is empty")]
    Empty,

    /// Input contained a character outside `[-0-9.]` or was malformed.
    #[error("amount '{0}' is not a valid decimal number")]
    Malformed(String),

    /// More than two fraction digits. Sub-cent amounts are rejected, not
    /// rounded: rounding happens at presentation only, never on input.
    #[error("amount '{0}' has more than two decimal places")]
    TooPrecise(String),

    /// Magnitude does not fit in an i64 cents count.
    #[error("amount '{0}' is out of range")]
    OutOfRange(String),
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    /// Parses a fixed-point decimal string: `"150"`, `"150.5"`, `"-3.50"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseMoneyError::Empty);
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (unsigned, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseMoneyError::Malformed(trimmed.to_string()));
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseMoneyError::Malformed(trimmed.to_string()));
        }
        if fraction.len() > 2 {
            return Err(ParseMoneyError::TooPrecise(trimmed.to_string()));
        }

        let whole: i64 = whole
            .parse()
            .map_err(|_| ParseMoneyError::OutOfRange(trimmed.to_string()))?;

        // "5" -> 0 cents, "5.5" -> 50 cents, "5.50" -> 50 cents
        let fraction_cents: i64 = match fraction.len() {
            0 => 0,
            1 => {
                fraction
                    .parse::<i64>()
                    .map_err(|_| ParseMoneyError::Malformed(trimmed.to_string()))?
                    * 10
            }
            _ => fraction
                .parse()
                .map_err(|_| ParseMoneyError::Malformed(trimmed.to_string()))?,
        };

        let magnitude = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction_cents))
            .ok_or_else(|| ParseMoneyError::OutOfRange(trimmed.to_string()))?;

        Ok(Money(if negative { -magnitude } else { magnitude }))
    }
}

// =============================================================================
// Formatting & Serde
// =============================================================================

/// Formats the amount as a plain fixed-point decimal: `"150.00"`, `"-5.50"`.
///
/// This is the wire format, not a localized display string - currency
/// symbols and grouping are presentation concerns that live with the UI.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02}",
            sign,
            self.whole_part().abs(),
            self.fraction_part()
        )
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Arithmetic
// =============================================================================

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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Summation is exact: addition over integer cents is associative and
/// commutative, so aggregation order never changes a total.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fraction() {
        assert_eq!("150.00".parse::<Money>().unwrap().cents(), 15_000);
        assert_eq!("150".parse::<Money>().unwrap().cents(), 15_000);
        assert_eq!("150.5".parse::<Money>().unwrap().cents(), 15_050);
        assert_eq!("0.07".parse::<Money>().unwrap().cents(), 7);
        assert_eq!("-3.50".parse::<Money>().unwrap().cents(), -350);
        assert_eq!("  12.34 ".parse::<Money>().unwrap().cents(), 1_234);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<Money>(), Err(ParseMoneyError::Empty));
        assert_eq!("   ".parse::<Money>(), Err(ParseMoneyError::Empty));
        assert!(matches!(
            "abc".parse::<Money>(),
            Err(ParseMoneyError::Malformed(_))
        ));
        assert!(matches!(
            "12.3.4".parse::<Money>(),
            Err(ParseMoneyError::Malformed(_))
        ));
        assert!(matches!(
            ".50".parse::<Money>(),
            Err(ParseMoneyError::Malformed(_))
        ));
        assert!(matches!(
            "1e3".parse::<Money>(),
            Err(ParseMoneyError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_rejects_sub_cent_precision() {
        // Never silently rounded - the ledger is matched against physical cash
        assert!(matches!(
            "1.005".parse::<Money>(),
            Err(ParseMoneyError::TooPrecise(_))
        ));
    }

    #[test]
    fn test_display_is_wire_format() {
        assert_eq!(Money::from_cents(15_000).to_string(), "150.00");
        assert_eq!(Money::from_cents(15_050).to_string(), "150.50");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
        assert_eq!(Money::from_cents(-350).to_string(), "-3.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_display_parse_round_trip() {
        for cents in [0, 1, 99, 100, 12_345, -1, -99, -12_345] {
            let money = Money::from_cents(cents);
            let back: Money = money.to_string().parse().unwrap();
            assert_eq!(back, money);
        }
    }

    #[test]
    fn test_serde_uses_strings() {
        let json = serde_json::to_string(&Money::from_cents(15_000)).unwrap();
        assert_eq!(json, "\"150.00\"");

        let back: Money = serde_json::from_str("\"-3.50\"").unwrap();
        assert_eq!(back.cents(), -350);

        // Floats on the wire are a type error, not a lossy parse
        assert!(serde_json::from_str::<Money>("150.0").is_err());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1_000);
        let b = Money::from_cents(250);

        assert_eq!((a + b).cents(), 1_250);
        assert_eq!((a - b).cents(), 750);
        assert_eq!((-a).cents(), -1_000);

        let mut acc = Money::zero();
        acc += a;
        acc -= b;
        assert_eq!(acc.cents(), 750);
    }

    #[test]
    fn test_sum_is_order_independent() {
        let amounts = [
            Money::from_cents(101),
            Money::from_cents(-33),
            Money::from_cents(9_999),
        ];
        let forward: Money = amounts.iter().sum();
        let backward: Money = amounts.iter().rev().sum();
        assert_eq!(forward, backward);
        assert_eq!(forward.cents(), 10_067);
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(1).is_positive());
        assert!(Money::from_cents(-1).is_negative());
        assert_eq!(Money::from_cents(-550).abs().cents(), 550);
    }
}

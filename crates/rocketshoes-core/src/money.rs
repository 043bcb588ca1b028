//! # Money Module
//!
//! Provides the `Money` type for prices and cart totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The product API sends prices as JSON numbers: 179.9                    │
//! │  Summed as floats:  0.1 + 0.2 = 0.30000000000000004  ❌                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    179.9  ──decode──►  17990 cents  ──math──►  exact totals             │
//! │    17990 cents  ──encode──►  179.9  (same shape the API sent)           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The float only exists at the JSON boundary. Decoding rounds to the
//! nearest cent, so an encode-then-decode of any cent value is exact.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::messages::Locale;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents (centavos for BRL).
///
/// ## Design Decisions
/// - **i64 (signed)**: a price is never negative, but the arithmetic stays
///   total and validation rejects negatives at the edge
/// - **Saturating arithmetic**: sums and products clamp at the `i64` bounds
///   instead of overflowing
/// - **Serialized as a decimal number**: matches the product API and the
///   mirror format older builds wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use rocketshoes_core::money::Money;
    ///
    /// let price = Money::from_cents(17990); // R$ 179,90
    /// assert_eq!(price.cents(), 17990);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount (as sent by the API) to cents.
    ///
    /// Returns `None` for NaN or infinite input.
    pub fn from_decimal(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Some(Money((value * 100.0).round() as i64))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as a decimal number, for the wire format only.
    #[inline]
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
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

    /// Multiplies money by a line amount.
    ///
    /// ## Example
    /// ```rust
    /// use rocketshoes_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(13990);
    /// assert_eq!(unit_price.multiply_amount(3).cents(), 41970);
    /// ```
    #[inline]
    pub const fn multiply_amount(&self, amount: i64) -> Self {
        Money(self.0.saturating_mul(amount))
    }

    /// Formats the value as Brazilian reais for the given locale.
    ///
    /// ```rust
    /// use rocketshoes_core::{Locale, Money};
    ///
    /// let price = Money::from_cents(123456);
    /// assert_eq!(price.format(Locale::PtBr), "R$ 1.234,56");
    /// assert_eq!(price.format(Locale::En), "R$1,234.56");
    /// ```
    pub fn format(&self, locale: Locale) -> String {
        let (group_sep, decimal_sep, symbol) = match locale {
            Locale::PtBr => ('.', ',', "R$ "),
            Locale::En => (',', '.', "R$"),
        };

        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = (self.0 / 100).unsigned_abs().to_string();
        let frac = (self.0 % 100).unsigned_abs();

        // Group the integer part in thousands, right to left
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(group_sep);
            }
            grouped.push(ch);
        }

        format!("{sign}{symbol}{grouped}{decimal_sep}{frac:02}")
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering, used in logs. UI code should call [`Money::format`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02}",
            sign,
            (self.0 / 100).abs(),
            (self.0 % 100).abs()
        )
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_decimal(value)
            .ok_or_else(|| serde::de::Error::custom("price must be a finite number"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

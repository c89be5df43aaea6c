//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing decimal prices as floats:                                      │
//! │    1.25 × 2 + 0.9 = 3.4000000000000004  ❌ WRONG!                       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    125 × 2 + 90 = 340 cents  →  3.40                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The front-ends and the snapshot file carry prices and totals as JSON
//! decimal numbers (`"price": 1.25`, `"total": 3.4`). `Money` converts at the
//! serde boundary only; inside the process every amount is cents.
//!
//! ## Usage
//! ```rust
//! use tiendita_core::money::Money;
//!
//! let price = Money::from_cents(125); // $1.25
//! let line = price.multiply_quantity(2).unwrap(); // $2.50
//! assert_eq!(line.cents(), 250);
//!
//! // Arithmetic is checked; overflow is `None`, never a panic or a wrap
//! assert!(Money::from_cents(i64::MAX).multiply_quantity(2).is_none());
//!
//! // Decimal input is rounded to the nearest cent
//! assert_eq!(Money::from_decimal(0.9).unwrap().cents(), 90);
//! assert!(Money::from_decimal(f64::NAN).is_none());
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: negative prices are rejected by validation, not by
///   the type
/// - **Checked arithmetic only**: no `Add`/`Mul` impls, every operation
///   returns `None` on overflow
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Manual serde**: decimal numbers on the wire, cents in memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal amount, rounding to the nearest
    /// cent (half away from zero).
    ///
    /// Returns `None` for NaN and infinities.
    ///
    /// ## Example
    /// ```rust
    /// use tiendita_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(1.25).unwrap().cents(), 125);
    /// assert_eq!(Money::from_decimal(2.005).unwrap().cents(), 200);
    /// assert_eq!(Money::from_decimal(0.125).unwrap().cents(), 13);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let cents = (amount * 100.0).round();
        if cents.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as a decimal amount (for the wire format only).
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
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

    /// Multiplies money by a quantity, or `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use tiendita_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(90);
    /// assert_eq!(unit_price.multiply_quantity(3), Some(Money::from_cents(270)));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Option<Self> {
        match self.0.checked_mul(qty as i64) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$D.CC`. Debugging and logs only; the front-ends
/// format their own amounts.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_decimal(amount)
            .ok_or_else(|| serde::de::Error::custom("money amount must be a finite number"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

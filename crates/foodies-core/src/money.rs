//! # Money Module
//!
//! Integer-cent money for cart subtotals.
//!
//! ## Where Floats Stop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The menu feed publishes prices as JSON numbers (12.99).               │
//! │  The number is kept verbatim on the MenuItem so the cart line is an    │
//! │  exact snapshot of what the feed sent.                                 │
//! │                                                                         │
//! │  Arithmetic never touches the float:                                   │
//! │    MenuItem.price ──► Money::from_price() ──► cents (i64)              │
//! │    cents × quantity ──► line total ──► Σ ──► subtotal                  │
//! │                                                                         │
//! │    0.1 + 0.2 as floats   = 0.30000000000000004                          │
//! │    10 + 20 as cents      = 30                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use foodies_core::money::Money;
//!
//! let price = Money::from_price(10.99);
//! assert_eq!(price.cents(), 1099);
//! assert_eq!((price * 3).to_string(), "$32.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// Signed so a bad feed price (negative) still sums without panicking.
/// Arithmetic saturates instead of overflowing: feed prices are untrusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use foodies_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a feed price (dollars as a float) to cents, rounding to the
    /// nearest cent. Non-finite prices count as zero; prices beyond the `i64`
    /// cent range clamp to its bounds.
    ///
    /// ## Example
    /// ```rust
    /// use foodies_core::money::Money;
    ///
    /// assert_eq!(Money::from_price(12.99).cents(), 1299);
    /// assert_eq!(Money::from_price(0.1 + 0.2).cents(), 30);
    /// assert_eq!(Money::from_price(f64::NAN).cents(), 0);
    /// ```
    pub fn from_price(price: f64) -> Self {
        if !price.is_finite() {
            return Money::zero();
        }
        Money((price * 100.0).round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion (truncated toward zero).
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies money by a line quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use foodies_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as US dollars, the feed's currency.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

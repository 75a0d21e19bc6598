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
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A running customer balance accumulates hundreds of increments and      │
//! │  decrements; float drift would make the balance audit useless.          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paisa                                            │
//! │    Rs 350.00 is stored as 35000 paisa; addition and subtraction are     │
//! │    exact, so `due == total - paid` holds to the last paisa.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ampere_core::money::Money;
//!
//! // Create from paisa (preferred) or whole rupees
//! let price = Money::from_rupees(350);        // Rs 350.00
//! let precise = Money::from_paisa(35_050);    // Rs 350.50
//!
//! // Arithmetic operations
//! let line_total = price * 2;                 // Rs 700.00
//! let with_fee = price + Money::from_paisa(500);
//!
//! // NEVER from floats - no such constructor exists.
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paisa).
///
/// ## Design Decisions
/// - **i64 (signed)**: balance deltas and audit drift can be negative
/// - **Single-field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support, total ordering for `max`/comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paisa (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use ampere_core::money::Money;
    ///
    /// let price = Money::from_paisa(35_050); // Rs 350.50
    /// assert_eq!(price.paisa(), 35_050);
    /// ```
    #[inline]
    pub const fn from_paisa(paisa: i64) -> Self {
        Money(paisa)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// Shop prices are quoted in whole rupees, so this is the constructor
    /// most calling code reaches for.
    ///
    /// ## Example
    /// ```rust
    /// use ampere_core::money::Money;
    ///
    /// let price = Money::from_rupees(350);
    /// assert_eq!(price.paisa(), 35_000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paisa.
    #[inline]
    pub const fn paisa(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    ///
    /// ## Example
    /// ```rust
    /// use ampere_core::money::Money;
    ///
    /// assert_eq!(Money::from_paisa(35_050).rupees(), 350);
    /// assert_eq!(Money::from_paisa(-550).rupees(), -5);
    /// ```
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paisa portion (always 0-99).
    #[inline]
    pub const fn paisa_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns the larger of `self` and zero.
    ///
    /// The remaining due on an invoice is floored at zero: an overpayment at
    /// creation time is change handed back, not negative debt.
    ///
    /// ## Example
    /// ```rust
    /// use ampere_core::money::Money;
    ///
    /// let due = (Money::from_rupees(700) - Money::from_rupees(900)).floor_zero();
    /// assert!(due.is_zero());
    /// ```
    #[inline]
    pub const fn floor_zero(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Calculates tax for this amount at the given rate.
    ///
    /// ## Implementation
    /// Integer math with round-half-up: `(amount * bps + 5000) / 10000`.
    /// Uses i128 internally so large invoice totals cannot overflow.
    ///
    /// ## Example
    /// ```rust
    /// use ampere_core::money::Money;
    /// use ampere_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_rupees(1000);
    /// let gst = TaxRate::from_bps(1700); // 17%
    ///
    /// assert_eq!(subtotal.calculate_tax(gst), Money::from_rupees(170));
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_paisa = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paisa(tax_paisa as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use ampere_core::money::Money;
    ///
    /// let unit_price = Money::from_rupees(120); // copper wire, per meter
    /// assert_eq!(unit_price.multiply_quantity(25), Money::from_rupees(3_000));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for receipts and debugging; UI localization happens elsewhere.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rs {}.{:02}", sign, self.rupees().abs(), self.paisa_part())
    }
}

/// Default money is zero.
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Summing an iterator of Money values (line totals, payment amounts).
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Money::from_rupees(350).paisa(), 35_000);
        assert_eq!(Money::from_paisa(35_050).rupees(), 350);
        assert_eq!(Money::from_paisa(35_050).paisa_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paisa(35_050)), "Rs 350.50");
        assert_eq!(format!("{}", Money::from_rupees(5)), "Rs 5.00");
        assert_eq!(format!("{}", Money::from_paisa(-550)), "-Rs 5.50");
        assert_eq!(format!("{}", Money::zero()), "Rs 0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(10);
        let b = Money::from_rupees(5);

        assert_eq!((a + b).paisa(), 1_500);
        assert_eq!((a - b).paisa(), 500);
        assert_eq!((a * 3i64).paisa(), 3_000);

        let mut acc = Money::zero();
        acc += a;
        acc -= b;
        assert_eq!(acc, b);
    }

    #[test]
    fn test_sum() {
        let total: Money = [350, 120, 280]
            .iter()
            .map(|r| Money::from_rupees(*r))
            .sum();
        assert_eq!(total, Money::from_rupees(750));
    }

    #[test]
    fn test_floor_zero() {
        let overpaid = Money::from_rupees(700) - Money::from_rupees(900);
        assert!(overpaid.is_negative());
        assert!(overpaid.floor_zero().is_zero());

        let due = Money::from_rupees(400);
        assert_eq!(due.floor_zero(), due);
    }

    #[test]
    fn test_tax_zero_rate() {
        let subtotal = Money::from_rupees(700);
        assert!(subtotal.calculate_tax(TaxRate::zero()).is_zero());
    }

    #[test]
    fn test_tax_with_rounding() {
        // Rs 10.00 at 8.25% = Rs 0.825 -> rounds to Rs 0.83
        let amount = Money::from_paisa(1000);
        let tax = amount.calculate_tax(TaxRate::from_bps(825));
        assert_eq!(tax.paisa(), 83);
    }

    #[test]
    fn test_multiply_quantity() {
        let per_meter = Money::from_rupees(120);
        assert_eq!(per_meter.multiply_quantity(1000), Money::from_rupees(120_000));
    }
}

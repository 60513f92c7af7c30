//! Money value object.
//!
//! Amounts are stored in the minor currency unit (cents, rupiah, yen) as
//! unsigned integers, so a computed amount can never go below zero and
//! floating-point drift never reaches a stored price.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents money in minor currency units to avoid floating-point errors
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(u64);

impl Money {
    /// Zero amount
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from minor units
    #[must_use]
    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Returns the amount in minor units
    #[must_use]
    pub const fn minor(&self) -> u64 {
        self.0
    }

    /// Checks if the amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two money amounts, saturating at the numeric bound
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtracts two money amounts, flooring at zero
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Adds two money amounts with overflow checking
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }

    /// Multiplies money by a quantity, saturating at the numeric bound
    #[must_use]
    pub const fn saturating_multiply(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }

    /// Returns the smaller of two amounts
    #[must_use]
    pub const fn min(self, other: Self) -> Self {
        if self.0 <= other.0 { self } else { other }
    }

    /// Computes `percent`% of this amount, rounded down
    ///
    /// Integer math throughout; `floor(amount × percent / 100)`. Saturates
    /// rather than overflowing for absurdly large percentages.
    #[must_use]
    pub const fn percentage(self, percent: u64) -> Self {
        match self.0.checked_mul(percent) {
            Some(product) => Self(product / 100),
            None => Self((self.0 / 100).saturating_mul(percent)),
        }
    }

    /// Computes a tax amount at the given fractional rate, rounded half away
    /// from zero
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // amounts < 2^53 in practice
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // result of round() is non-negative
    pub fn tax_at(self, rate: f64) -> Self {
        if rate <= 0.0 {
            return Self::ZERO;
        }
        Self((self.0 as f64 * rate).round() as u64)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturating_sub_floors_at_zero() {
        let a = Money::from_minor(100);
        let b = Money::from_minor(250);
        assert_eq!(a.saturating_sub(b), Money::ZERO);
        assert_eq!(b.saturating_sub(a), Money::from_minor(150));
    }

    #[test]
    fn percentage_rounds_down() {
        // 33% of 100 = 33, 10% of 1005 = 100 (floor of 100.5)
        assert_eq!(Money::from_minor(100).percentage(33), Money::from_minor(33));
        assert_eq!(Money::from_minor(1005).percentage(10), Money::from_minor(100));
    }

    #[test]
    fn tax_rounds_half_away_from_zero() {
        assert_eq!(Money::from_minor(1000).tax_at(0.10), Money::from_minor(100));
        // 0.105 * 10 = 1.05 -> 1; 15 * 0.10 = 1.5 -> 2
        assert_eq!(Money::from_minor(15).tax_at(0.10), Money::from_minor(2));
        assert_eq!(Money::from_minor(1000).tax_at(0.0), Money::ZERO);
    }

    #[test]
    fn multiply_by_quantity() {
        assert_eq!(
            Money::from_minor(100_000).saturating_multiply(2),
            Money::from_minor(200_000)
        );
        assert_eq!(Money::ZERO.saturating_multiply(10), Money::ZERO);
    }

    #[test]
    fn min_picks_smaller() {
        let a = Money::from_minor(5);
        let b = Money::from_minor(7);
        assert_eq!(a.min(b), a);
        assert_eq!(b.min(a), a);
    }
}

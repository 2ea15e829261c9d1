//! # Money Module
//!
//! Provides the `Money` type for handling prices and totals safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    19.99 * 2 + 0.01 = 39.989999999999995  ❌ WRONG!                     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1999 cents * 2 = 3998 cents = $39.98  ✅ exact                       │
//! │                                                                         │
//! │  Prices enter as text from the listing form and are parsed straight    │
//! │  into cents. They never pass through a float.                           │
//! │                                                                         │
//! │  Arithmetic is checked: an overflowing total is `None`, never a        │
//! │  wrapped negative amount.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ecofinds_core::money::Money;
//!
//! let price = Money::parse("89.99").unwrap();
//! assert_eq!(price.cents(), 8999);
//!
//! let doubled = price.checked_mul(2).unwrap();
//! assert_eq!(doubled.to_string(), "$179.98");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Plenty of headroom for cart totals
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support, serialized as plain cents
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartItem.price (frozen) ──► CartItem.line_total()
///                                                      │
///                     CartStore::total_price() ◄───────┘
///                               │
///                               ▼
///                        Purchase.total (frozen at checkout)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use ecofinds_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole dollars and cents.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        Money(major * 100 + minor)
    }

    /// Parses a decimal amount as typed by a seller, e.g. `"19.99"`.
    ///
    /// ## Rules
    /// - Surrounding whitespace is ignored
    /// - Digits with an optional `.` and at most two fractional digits
    /// - No sign, no currency symbol, no thousands separators
    /// - Zero parses fine; positivity is a listing rule, see
    ///   [`validate_price`](crate::validation::validate_price)
    ///
    /// ## Example
    /// ```rust
    /// use ecofinds_core::money::Money;
    ///
    /// assert_eq!(Money::parse("19.99").unwrap().cents(), 1999);
    /// assert_eq!(Money::parse("150").unwrap().cents(), 15000);
    /// assert_eq!(Money::parse("4.5").unwrap().cents(), 450);
    /// assert!(Money::parse("abc").is_err());
    /// assert!(Money::parse("1.999").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Money, ValidationError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ValidationError::Required {
                field: "price".to_string(),
            });
        }

        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let (whole, frac) = input.split_once('.').unwrap_or((input, ""));

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("must be a decimal number"));
        }

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if !all_digits(whole) || !all_digits(frac) {
            return Err(invalid("must be a decimal number"));
        }

        if frac.len() > 2 {
            return Err(invalid("must have at most two decimal places"));
        }

        let too_large = || ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX / 100,
        };

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .map_err(|_| too_large())?
                .checked_mul(100)
                .ok_or_else(too_large)?
        };

        // "4.5" means 50 cents, not 5
        let frac_cents = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid("must be a decimal number"))? * 10,
            _ => frac.parse::<i64>().map_err(|_| invalid("must be a decimal number"))?,
        };

        whole_cents
            .checked_add(frac_cents)
            .map(Money)
            .ok_or_else(too_large)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Multiplies by a quantity, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use ecofinds_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(4599); // $45.99
    /// assert_eq!(unit_price.checked_mul(3).unwrap().cents(), 13797); // $137.97
    /// assert!(Money::from_cents(i64::MAX).checked_mul(2).is_none());
    /// ```
    #[inline]
    pub const fn checked_mul(self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Sums amounts, `None` if any partial sum overflows.
    pub fn checked_sum<I>(amounts: I) -> Option<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), Money::checked_add)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and the demo. The front-end does its own
/// locale-aware formatting.
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

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
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
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(89, 99).cents(), 8999);
        assert_eq!(Money::from_major_minor(150, 0).cents(), 15000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_parse_valid_amounts() {
        assert_eq!(Money::parse("19.99").unwrap().cents(), 1999);
        assert_eq!(Money::parse(" 250 ").unwrap().cents(), 25000);
        assert_eq!(Money::parse("4.5").unwrap().cents(), 450);
        assert_eq!(Money::parse("7.").unwrap().cents(), 700);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse("0").unwrap().cents(), 0);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Money::parse(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            Money::parse("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            Money::parse("."),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("-5").is_err());
        assert!(Money::parse("$5").is_err());
        assert!(Money::parse("1,000").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("1.999").is_err());
    }

    #[test]
    fn test_parse_overflow_is_out_of_range() {
        assert!(matches!(
            Money::parse("99999999999999999999"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            Money::parse("92233720368547759"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            Money::parse("92233720368547758.08"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(
            Money::parse("92233720368547758.07").unwrap().cents(),
            i64::MAX
        );
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a.checked_add(b), Some(Money::from_cents(1500)));
        assert_eq!(a.checked_mul(3), Some(Money::from_cents(3000)));
        assert_eq!(b.checked_mul(0), Some(Money::zero()));
    }

    #[test]
    fn test_sum_is_exact() {
        let lamp = Money::parse("19.99").unwrap();
        let total = Money::checked_sum([lamp, lamp]).unwrap();
        assert_eq!(total.cents(), 3998);
        assert_eq!(total.to_string(), "$39.98");

        assert_eq!(Money::checked_sum(Vec::<Money>::new()), Some(Money::zero()));
    }

    #[test]
    fn test_arithmetic_near_i64_limit() {
        let top = Money::parse("92233720368547758.07").unwrap();
        assert_eq!(top.cents(), i64::MAX);

        assert_eq!(top.checked_mul(1), Some(top));
        assert_eq!(top.checked_mul(2), None);
        assert_eq!(top.checked_add(Money::from_cents(1)), None);
        assert_eq!(Money::checked_sum([top, Money::from_cents(1)]), None);
        assert_eq!(
            Money::from_cents(i64::MAX - 1).checked_add(Money::from_cents(1)),
            Some(top)
        );
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());

        let positive = Money::from_cents(100);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(8999)).unwrap();
        assert_eq!(json, "8999");
    }
}

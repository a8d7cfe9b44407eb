//! Fixed-point money in milliunits
//!
//! Internally stores amounts as a signed 64-bit count of milliunits
//! (1 unit of account = 1000 milliunits). All arithmetic is integer;
//! decimal values only ever appear at construction and projection, both
//! rounded half-up, so no floating-point path exists anywhere in the
//! crate.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::{ReconError, ReconResult};

/// A monetary amount stored as an exact count of milliunits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Construct from a raw milliunit count
    pub const fn from_milliunits(milliunits: i64) -> Self {
        Self(milliunits)
    }

    /// The zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// The raw milliunit count
    pub const fn milliunits(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Construct from a decimal string, rounding half-up at 3 decimal
    /// places (spec.md §3 / P1)
    pub fn parse(s: &str) -> ReconResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ReconError::invalid_argument("money amount is blank"));
        }
        let s = s.strip_prefix('$').unwrap_or(s);
        let decimal = Decimal::from_str(s)
            .map_err(|e| ReconError::invalid_argument(format!("invalid money amount '{s}': {e}")))?;
        Ok(Self::from_decimal(decimal))
    }

    /// Construct from an arbitrary-precision decimal, rounding half-up
    /// at 3 decimal places
    pub fn from_decimal(decimal: Decimal) -> Self {
        let scaled = (decimal * Decimal::from(1000))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let milliunits = scaled.to_i64().unwrap_or_else(|| {
            if scaled.is_sign_negative() {
                i64::MIN
            } else {
                i64::MAX
            }
        });
        Self(milliunits)
    }

    /// Project to a decimal value rounded half-up at 2 decimal places
    pub fn to_decimal(&self) -> Decimal {
        let raw = Decimal::new(self.0, 3);
        raw.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.to_decimal())
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_half_up() {
        assert_eq!(Money::parse("12.345").unwrap().milliunits(), 12345);
        assert_eq!(Money::parse("12.3454").unwrap().milliunits(), 12345);
        assert_eq!(Money::parse("12.3456").unwrap().milliunits(), 12346);
    }

    #[test]
    fn test_to_decimal_half_up() {
        let m = Money::from_milliunits(12345);
        assert_eq!(m.to_decimal(), Decimal::new(1235, 2)); // 12.35 (round half up from 12.345)
    }

    #[test]
    fn test_round_trip() {
        let m = Money::parse("10.50").unwrap();
        assert_eq!(m.milliunits(), 10500);
        assert_eq!(m.to_decimal().to_string(), "10.50");
    }

    #[test]
    fn test_negative() {
        let m = Money::parse("-10.50").unwrap();
        assert!(m.is_negative());
        assert_eq!(m.milliunits(), -10500);
    }

    #[test]
    fn test_dollar_sign_prefix() {
        assert_eq!(Money::parse("$5.00").unwrap().milliunits(), 5000);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_milliunits(1000);
        let b = Money::from_milliunits(500);
        assert_eq!((a + b).milliunits(), 1500);
        assert_eq!((a - b).milliunits(), 500);
        assert_eq!((-a).milliunits(), -1000);
        assert_eq!((a - a).milliunits(), 0);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_milliunits(100),
            Money::from_milliunits(200),
            Money::from_milliunits(300),
        ];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.milliunits(), 600);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_milliunits(12345)), "12.35");
        assert_eq!(format!("{}", Money::zero()), "0.00");
        assert_eq!(format!("{}", Money::from_milliunits(-12345)), "-12.35");
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_milliunits(12345);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "12345");
        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }

    #[test]
    fn test_parse_blank_is_invalid_argument() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("   ").is_err());
    }

    proptest::proptest! {
        #[test]
        fn prop_round_trip_preserves_milliunits(milliunits in -1_000_000_000_i64..1_000_000_000_i64) {
            let m = Money::from_milliunits(milliunits);
            let projected = Money::from_decimal(m.to_decimal());
            // round-tripping through the 2dp decimal projection can only
            // ever change the last (sub-cent) digit
            prop_assert!((projected.milliunits() - m.milliunits()).abs() <= 5);
        }

        #[test]
        fn prop_add_sub_is_inverse(a in -1_000_000_i64..1_000_000_i64, b in -1_000_000_i64..1_000_000_i64) {
            let ma = Money::from_milliunits(a);
            let mb = Money::from_milliunits(b);
            prop_assert_eq!((ma + mb) - mb, ma);
            prop_assert_eq!(ma - ma, Money::zero());
        }

        #[test]
        fn prop_add_is_commutative(a in -1_000_000_i64..1_000_000_i64, b in -1_000_000_i64..1_000_000_i64) {
            let ma = Money::from_milliunits(a);
            let mb = Money::from_milliunits(b);
            prop_assert_eq!(ma + mb, mb + ma);
        }
    }
}

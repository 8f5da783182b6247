//! Integer price levels and signed quantities.
//!
//! The simulated exchange quotes whole-number price levels and whole-number
//! sizes. Derived statistics (VWAP, mid) are computed in `Decimal` so that
//! rounding to two places matches the exchange's reporting exactly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Integer price level.
///
/// Wraps `i64` to keep prices and quantities from being mixed up in
/// calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub i64);

impl Price {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> i64 {
        self.0
    }

    /// Exact decimal value, for VWAP and reservation-price arithmetic.
    #[inline]
    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Price {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

impl Add<i64> for Price {
    type Output = Self;

    fn add(self, rhs: i64) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl Sub for Price {
    type Output = i64;

    fn sub(self, rhs: Self) -> Self::Output {
        self.0 - rhs.0
    }
}

/// Signed quantity.
///
/// Positive = buy side, negative = sell side. The magnitude is the size.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Qty(pub i64);

impl Qty {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> i64 {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Unsigned size.
    #[inline]
    pub fn abs(&self) -> i64 {
        self.0.abs()
    }
}

impl fmt::Display for Qty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Qty {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

impl Neg for Qty {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_difference_is_integer() {
        assert_eq!(Price::new(10) - Price::new(8), 2);
        assert_eq!(Price::new(8) + 1, Price::new(9));
    }

    #[test]
    fn test_price_as_decimal() {
        assert_eq!(Price::new(10_002).as_decimal(), dec!(10002));
    }

    #[test]
    fn test_qty_sign_and_abs() {
        let q = Qty::new(-5);
        assert_eq!(q.abs(), 5);
        assert_eq!(-q, Qty::new(5));
        assert!(Qty::ZERO.is_zero());
    }
}

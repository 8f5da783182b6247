//! Position relative to the limit.
//!
//! Computes how much room is left on each side, the linear inventory skew
//! applied to quote sizes, and whether the stop-loss threshold is breached.
//! Bid sizes are non-negative, ask sizes non-positive.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Signed position together with its absolute limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionBand {
    pub position: i64,
    pub limit: i64,
}

impl PositionBand {
    pub fn new(position: i64, limit: i64) -> Self {
        Self { position, limit }
    }

    /// Largest buy that keeps the position within the limit.
    pub fn bid_room(&self) -> i64 {
        self.limit - self.position.max(0)
    }

    /// Largest sell (as a non-positive quantity) that keeps the position within the limit.
    pub fn ask_room(&self) -> i64 {
        -self.limit - self.position.min(0)
    }

    /// `|position| / limit`.
    pub fn utilization(&self) -> Decimal {
        if self.limit == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.position.abs()) / Decimal::from(self.limit)
    }

    /// True once `|position| >= fraction * limit`.
    pub fn stop_loss_breached(&self, fraction: Decimal) -> bool {
        Decimal::from(self.position.abs()) >= fraction * Decimal::from(self.limit)
    }

    /// Size reductions `(bid_skew, ask_skew)` for the current inventory.
    ///
    /// Long inventory shrinks the bid by `floor(scale * long)`; short inventory
    /// shrinks the ask magnitude by `ceil(scale * short)` (a non-positive value).
    pub fn skew(&self, scale: Decimal) -> (i64, i64) {
        let long = Decimal::from(self.position.max(0));
        let short = Decimal::from(self.position.min(0));
        (
            to_units((scale * long).floor()),
            to_units((scale * short).ceil()),
        )
    }

    /// Bid and ask sizes after inventory skew, before any signal shift.
    pub fn skewed_sizes(&self, scale: Decimal) -> (i64, i64) {
        let (bid_skew, ask_skew) = self.skew(scale);
        (
            (self.bid_room() - bid_skew).max(0),
            (self.ask_room() - ask_skew).min(0),
        )
    }

    pub fn clamp_bid(&self, size: i64) -> i64 {
        size.min(self.bid_room()).max(0)
    }

    pub fn clamp_ask(&self, size: i64) -> i64 {
        size.max(self.ask_room()).min(0)
    }
}

/// Integral decimal to `i64`, saturating on overflow.
pub(crate) fn to_units(value: Decimal) -> i64 {
    value.to_i64().unwrap_or(if value.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_room_flat() {
        let band = PositionBand::new(0, 20);
        assert_eq!(band.bid_room(), 20);
        assert_eq!(band.ask_room(), -20);
        assert_eq!(band.skewed_sizes(dec!(0.5)), (20, -20));
    }

    #[test]
    fn test_room_and_skew_long() {
        let band = PositionBand::new(7, 20);
        assert_eq!(band.bid_room(), 13);
        assert_eq!(band.ask_room(), -20);
        // floor(0.5 * 7) = 3
        assert_eq!(band.skew(dec!(0.5)), (3, 0));
        assert_eq!(band.skewed_sizes(dec!(0.5)), (10, -20));
    }

    #[test]
    fn test_room_and_skew_short() {
        let band = PositionBand::new(-7, 20);
        assert_eq!(band.bid_room(), 20);
        assert_eq!(band.ask_room(), -13);
        // ceil(0.5 * -7) = -3
        assert_eq!(band.skew(dec!(0.5)), (0, -3));
        assert_eq!(band.skewed_sizes(dec!(0.5)), (20, -10));
    }

    #[test]
    fn test_stop_loss_threshold() {
        let fraction = dec!(0.9);
        assert!(!PositionBand::new(17, 20).stop_loss_breached(fraction));
        assert!(PositionBand::new(18, 20).stop_loss_breached(fraction));
        assert!(PositionBand::new(-18, 20).stop_loss_breached(fraction));
        assert!(!PositionBand::new(0, 20).stop_loss_breached(fraction));
        assert_eq!(PositionBand::new(-5, 20).utilization(), dec!(0.25));
    }

    #[test]
    fn test_clamp() {
        let band = PositionBand::new(4, 20);
        assert_eq!(band.clamp_bid(30), 16);
        assert_eq!(band.clamp_bid(-3), 0);
        assert_eq!(band.clamp_ask(-30), -20);
        assert_eq!(band.clamp_ask(5), 0);
    }
}

//! Resting order book for one instrument.
//!
//! Levels are keyed by integer price. The exchange reports sell-side
//! quantities as negative numbers; every calculation here works on the
//! magnitude so either sign convention is accepted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::{Price, Qty};

/// One side of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookSide {
    Bid,
    Ask,
}

impl fmt::Display for BookSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bid => write!(f, "bid"),
            Self::Ask => write!(f, "ask"),
        }
    }
}

/// Buy and sell price levels with resting quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDepth {
    #[serde(default)]
    pub buy_orders: BTreeMap<Price, Qty>,
    #[serde(default)]
    pub sell_orders: BTreeMap<Price, Qty>,
}

impl OrderDepth {
    pub fn new(
        buy_orders: impl IntoIterator<Item = (i64, i64)>,
        sell_orders: impl IntoIterator<Item = (i64, i64)>,
    ) -> Self {
        Self {
            buy_orders: buy_orders
                .into_iter()
                .map(|(p, q)| (Price(p), Qty(q)))
                .collect(),
            sell_orders: sell_orders
                .into_iter()
                .map(|(p, q)| (Price(p), Qty(q)))
                .collect(),
        }
    }

    pub fn levels(&self, side: BookSide) -> &BTreeMap<Price, Qty> {
        match side {
            BookSide::Bid => &self.buy_orders,
            BookSide::Ask => &self.sell_orders,
        }
    }

    /// Highest resting bid price.
    pub fn best_bid(&self) -> Option<Price> {
        self.buy_orders.keys().next_back().copied()
    }

    /// Lowest resting ask price.
    pub fn best_ask(&self) -> Option<Price> {
        self.sell_orders.keys().next().copied()
    }

    /// Touch price on the given side.
    pub fn touch(&self, side: BookSide) -> Option<Price> {
        match side {
            BookSide::Bid => self.best_bid(),
            BookSide::Ask => self.best_ask(),
        }
    }

    /// Resting quantity at the touch, as reported (sign preserved).
    pub fn touch_quantity(&self, side: BookSide) -> Option<Qty> {
        let px = self.touch(side)?;
        self.levels(side).get(&px).copied()
    }

    /// Sum of resting magnitudes on one side. `None` on overflow.
    pub fn volume(&self, side: BookSide) -> Option<Decimal> {
        self.levels(side)
            .values()
            .try_fold(Decimal::ZERO, |acc, qty| acc.checked_add(Decimal::from(qty.abs())))
    }

    /// Quantity-weighted mean price over every level on one side.
    ///
    /// Returns `None` when the side is empty, its quantities sum to zero, or
    /// the notional does not fit in a `Decimal`.
    pub fn vwap(&self, side: BookSide) -> Option<Decimal> {
        let (notional, volume) = self.levels(side).iter().try_fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(notional, volume), (px, qty)| {
                let size = Decimal::from(qty.abs());
                let notional = notional.checked_add(px.as_decimal().checked_mul(size)?)?;
                Some((notional, volume.checked_add(size)?))
            },
        )?;
        if volume.is_zero() {
            return None;
        }
        notional.checked_div(volume)
    }
}

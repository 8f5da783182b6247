//! Outgoing orders.
//!
//! An order is a `(symbol, price, signed quantity)` triple: the sign of the
//! quantity encodes the side, matching the exchange submission contract.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Price, Qty, Symbol};

/// Order side: buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Returns the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    /// Returns 1 for buy, -1 for sell.
    pub fn sign(&self) -> i64 {
        match self {
            Self::Buy => 1,
            Self::Sell => -1,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// A limit order for one instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub symbol: Symbol,
    pub price: Price,
    /// Positive = bid, negative = ask.
    pub quantity: Qty,
}

impl Order {
    pub fn new(symbol: Symbol, price: Price, quantity: Qty) -> Self {
        Self {
            symbol,
            price,
            quantity,
        }
    }

    /// Buy order for `size` units (sign is forced positive).
    pub fn buy(symbol: Symbol, price: Price, size: i64) -> Self {
        Self::new(symbol, price, Qty::new(size.abs()))
    }

    /// Sell order for `size` units (sign is forced negative).
    pub fn sell(symbol: Symbol, price: Price, size: i64) -> Self {
        Self::new(symbol, price, Qty::new(-size.abs()))
    }

    /// Side implied by the quantity sign. Zero-sized orders report `None`.
    pub fn side(&self) -> Option<OrderSide> {
        match self.quantity.inner() {
            q if q > 0 => Some(OrderSide::Buy),
            q if q < 0 => Some(OrderSide::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.symbol, self.price, self.quantity)
    }
}

/// Total bid and ask quantity over a set of orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderTally {
    /// Sum of positive quantities.
    pub bid_quantity: i64,
    /// Sum of negative quantities (non-positive).
    pub ask_quantity: i64,
}

impl OrderTally {
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        orders
            .into_iter()
            .fold(Self::default(), |mut tally, order| {
                match order.side() {
                    Some(OrderSide::Buy) => tally.bid_quantity += order.quantity.inner(),
                    Some(OrderSide::Sell) => tally.ask_quantity += order.quantity.inner(),
                    None => {}
                }
                tally
            })
    }
}

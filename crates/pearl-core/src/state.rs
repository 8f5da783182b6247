//! Exchange state handed to the trader on every tick.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::{OrderDepth, Price, Symbol};

/// A fill, either our own or observed in the market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub symbol: Symbol,
    pub price: Price,
    /// Traded size (always positive on the exchange feed).
    pub quantity: i64,
    #[serde(default)]
    pub buyer: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    pub timestamp: i64,
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}, {}, {})",
            self.symbol,
            self.price,
            self.quantity,
            self.buyer.as_deref().unwrap_or("-"),
            self.seller.as_deref().unwrap_or("-"),
            self.timestamp
        )
    }
}

/// Per-tick input from the exchange simulator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingState {
    /// Simulation timestamp; advances by a fixed step every tick.
    pub timestamp: i64,
    #[serde(default)]
    pub order_depths: BTreeMap<Symbol, OrderDepth>,
    /// Signed net position per symbol. Absent = flat.
    #[serde(default)]
    pub position: BTreeMap<Symbol, i64>,
    #[serde(default)]
    pub own_trades: BTreeMap<Symbol, Vec<Trade>>,
    #[serde(default)]
    pub market_trades: BTreeMap<Symbol, Vec<Trade>>,
}

impl TradingState {
    pub fn position_of(&self, symbol: &Symbol) -> i64 {
        self.position.get(symbol).copied().unwrap_or(0)
    }

    /// Our own fills for `symbol` stamped exactly at `timestamp`.
    pub fn own_trades_at<'a>(
        &'a self,
        symbol: &Symbol,
        timestamp: i64,
    ) -> impl Iterator<Item = &'a Trade> + 'a {
        self.own_trades
            .get(symbol)
            .into_iter()
            .flatten()
            .filter(move |t| t.timestamp == timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATE_JSON: &str = r#"{
        "timestamp": 500,
        "order_depths": {
            "PEARLS": {"buy_orders": {"9998": 1, "9996": 30}, "sell_orders": {"10002": -1}}
        },
        "position": {"PEARLS": -4},
        "own_trades": {
            "PEARLS": [
                {"symbol": "PEARLS", "price": 9998, "quantity": 2, "buyer": "SUBMISSION", "timestamp": 400},
                {"symbol": "PEARLS", "price": 10002, "quantity": 1, "seller": "SUBMISSION", "timestamp": 300}
            ]
        }
    }"#;

    #[test]
    fn test_deserialize_state() {
        let state: TradingState = serde_json::from_str(STATE_JSON).unwrap();
        let pearls = Symbol::new("PEARLS");
        assert_eq!(state.timestamp, 500);
        assert_eq!(state.position_of(&pearls), -4);
        assert_eq!(state.position_of(&Symbol::new("BANANAS")), 0);
        assert_eq!(state.order_depths[&pearls].best_bid(), Some(Price(9998)));
        assert!(state.market_trades.is_empty());
    }

    #[test]
    fn test_own_trades_at_timestamp() {
        let state: TradingState = serde_json::from_str(STATE_JSON).unwrap();
        let pearls = Symbol::new("PEARLS");
        let trades: Vec<_> = state.own_trades_at(&pearls, 400).collect();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].price, Price(9998));
        assert_eq!(state.own_trades_at(&Symbol::new("BANANAS"), 400).count(), 0);
    }
}

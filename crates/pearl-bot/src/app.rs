//! Per-tick dispatcher.
//!
//! `Trader` owns the price history for the session and, on every tick,
//! runs the strategy for each active product:
//!
//! ```text
//! TradingState ─► MarketSnapshot ─► PriceHistory.update(mid)
//!                        │                    │
//!                        └──── compute_orders(snapshot, sma, params)
//!                                             │
//!                                      symbol → Vec<Order>
//! ```
//!
//! A product whose book cannot be snapshotted gets no orders this tick;
//! the other products are unaffected.

use std::collections::BTreeMap;

use pearl_core::{CoreError, MarketSnapshot, Order, OrderTally, Symbol, TradingState};
use pearl_mm::{compute_orders, PriceHistory};
use pearl_telemetry::Metrics;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, info, warn};

use crate::config::{AppConfig, ProductConfig};
use crate::error::AppResult;

/// Orders produced on one tick, keyed by symbol.
pub type TickResult = BTreeMap<Symbol, Vec<Order>>;

/// Tick dispatcher for all configured products.
#[derive(Debug)]
pub struct Trader {
    config: AppConfig,
    history: PriceHistory,
}

impl Trader {
    /// Create a trader with a fresh, empty price history.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;
        let history = PriceHistory::new(config.history.clone())?;
        Ok(Self { config, history })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn history(&self) -> &PriceHistory {
        &self.history
    }

    /// Decide this tick's orders for every active product.
    pub fn run(&mut self, state: &TradingState) -> TickResult {
        let Self { config, history } = self;
        let mut result = TickResult::new();

        for product in config.active_products() {
            match trade_product(history, config.tick_interval, state, product) {
                Ok(orders) => {
                    result.insert(product.symbol.clone(), orders);
                }
                Err(CoreError::UnknownSymbol(symbol)) => {
                    debug!(
                        symbol = %symbol,
                        timestamp = state.timestamp,
                        "No book for product this tick"
                    );
                }
                Err(e) => {
                    warn!(
                        symbol = %product.symbol,
                        timestamp = state.timestamp,
                        error = %e,
                        "Skipping product: unusable order book"
                    );
                    Metrics::snapshot_error(product.symbol.as_str(), e.kind());
                    result.insert(product.symbol.clone(), Vec::new());
                }
            }
        }

        report_orders(&result);
        result
    }
}

fn trade_product(
    history: &mut PriceHistory,
    tick_interval: i64,
    state: &TradingState,
    product: &ProductConfig,
) -> Result<Vec<Order>, CoreError> {
    let symbol = &product.symbol;
    Metrics::tick(symbol.as_str());

    for trade in state.own_trades_at(symbol, state.timestamp - tick_interval) {
        info!(symbol = %symbol, trade = %trade, "Own trade");
    }

    let snapshot = MarketSnapshot::from_state(state, symbol)?;
    info!(
        symbol = %symbol,
        timestamp = state.timestamp,
        position = snapshot.position,
        best_bid = %snapshot.best_bid,
        best_ask = %snapshot.best_ask,
        "Market"
    );
    Metrics::position(symbol.as_str(), snapshot.position);
    Metrics::effective_spread(
        symbol.as_str(),
        snapshot.effective_spread.to_f64().unwrap_or(0.0),
    );

    history.update(symbol, snapshot.mid_price, snapshot.timestamp);
    let sma = history.moving_average(symbol);

    let decision = compute_orders(&snapshot, sma, &product.params);
    Metrics::decision(symbol.as_str(), decision.kind());

    let orders = decision.into_orders();
    for order in &orders {
        if let Some(side) = order.side() {
            Metrics::order(symbol.as_str(), &side.to_string());
        }
    }
    Ok(orders)
}

fn report_orders(result: &TickResult) {
    for (symbol, orders) in result {
        for order in orders {
            info!(order = %order, "Order");
        }
        let tally = OrderTally::from_orders(orders);
        debug!(
            symbol = %symbol,
            bid_quantity = tally.bid_quantity,
            ask_quantity = tally.ask_quantity,
            "Order tally"
        );
    }
}

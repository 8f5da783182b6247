//! Market making strategy for pearl.
//!
//! Provides the per-tick decision logic for one instrument:
//! - Rolling mid-price history with a simple moving average
//! - Reservation price and quoted spread from book VWAP
//! - Inventory-skewed quote sizing within the position limit
//! - Stop-loss liquidation near the limit
//!
//! # Architecture
//!
//! ```text
//! OrderDepth + position → MarketSnapshot
//!                          ├─ PriceHistory.update(mid) → moving_average
//!                          └─ compute_orders(snapshot, sma, params)
//!                               ├─ StopLoss(order)
//!                               ├─ TwoSided { bid, ask }
//!                               └─ Rejected (quote would cross the book)
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod inventory;
pub mod quote_engine;

pub use config::{HistoryConfig, SmaDivisor, StrategyParams};
pub use error::{MmError, MmResult};
pub use history::PriceHistory;
pub use inventory::PositionBand;
pub use quote_engine::{
    compute_orders, inventory_skewed_sizes, quantity_shift, quote_prices, quoted_spread,
    reservation_price, stop_loss_order, QuoteDecision, QuotePrices,
};

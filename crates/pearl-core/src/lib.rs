//! Core domain types for the pearl market maker.
//!
//! This crate provides the fundamental types shared by the strategy and the
//! dispatcher:
//! - `Symbol`: instrument identifier
//! - `Price`, `Qty`: integer price levels and signed quantities
//! - `OrderDepth`: resting buy/sell levels for one instrument
//! - `MarketSnapshot`: per-tick derived statistics (touch, VWAP, mid)
//! - `TradingState`: everything the exchange hands over on one tick

pub mod book;
pub mod error;
pub mod market;
pub mod order;
pub mod snapshot;
pub mod state;
pub mod units;

pub use book::{BookSide, OrderDepth};
pub use error::{CoreError, Result};
pub use market::Symbol;
pub use order::{Order, OrderSide, OrderTally};
pub use snapshot::MarketSnapshot;
pub use state::{Trade, TradingState};
pub use units::{Price, Qty};

//! pearl tick dispatcher.
//!
//! Drives the market making strategy over exchange ticks:
//! - Loads per-product strategy parameters from TOML
//! - Builds a snapshot per active product and updates the price history
//! - Runs the quote engine and reports the resulting orders
//! - Replays recorded ticks from JSON lines

pub mod app;
pub mod config;
pub mod error;
pub mod replay;

pub use app::Trader;
pub use config::{AppConfig, ProductConfig};
pub use error::{AppError, AppResult};
pub use replay::{replay, ReplaySummary, TickOrders};

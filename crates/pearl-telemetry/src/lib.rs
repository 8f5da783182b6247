//! Prometheus metrics and structured logging for pearl.
//!
//! - Structured logging with tracing (pretty in development, JSON in production)
//! - Per-symbol decision counters and gauges, rendered as Prometheus text

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;

//! Prometheus metrics for pearl.
//!
//! Per-symbol counters for ticks, decisions and emitted orders, plus gauges
//! for the latest position and effective spread. Nothing is served over the
//! network; `Metrics::render` produces the text exposition on demand.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. A failure means a
//! duplicate metric name, which is a programming error caught on first use.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_gauge_vec, register_int_gauge_vec, CounterVec, Encoder,
    GaugeVec, IntGaugeVec, TextEncoder,
};

use crate::error::TelemetryResult;

/// Ticks processed per symbol.
pub static TICKS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pearl_ticks_total",
        "Ticks processed per symbol",
        &["symbol"]
    )
    .unwrap()
});

/// Quote decisions by kind.
/// Labels: kind (two_sided/stop_loss/rejected)
pub static DECISIONS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pearl_decisions_total",
        "Quote decisions per symbol and kind",
        &["symbol", "kind"]
    )
    .unwrap()
});

/// Orders emitted by side.
pub static ORDERS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pearl_orders_total",
        "Orders emitted per symbol and side",
        &["symbol", "side"]
    )
    .unwrap()
});

/// Ticks skipped because a snapshot could not be built.
pub static SNAPSHOT_ERRORS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pearl_snapshot_errors_total",
        "Ticks skipped because the order book was unusable",
        &["symbol", "reason"]
    )
    .unwrap()
});

/// Latest signed position.
pub static POSITION: Lazy<IntGaugeVec> = Lazy::new(|| {
    register_int_gauge_vec!(
        "pearl_position",
        "Latest signed net position",
        &["symbol"]
    )
    .unwrap()
});

/// Latest effective (VWAP) spread.
pub static EFFECTIVE_SPREAD: Lazy<GaugeVec> = Lazy::new(|| {
    register_gauge_vec!(
        "pearl_effective_spread",
        "Latest effective spread between ask and bid VWAP",
        &["symbol"]
    )
    .unwrap()
});

/// Metric recording helpers.
pub struct Metrics;

impl Metrics {
    pub fn tick(symbol: &str) {
        TICKS_TOTAL.with_label_values(&[symbol]).inc();
    }

    pub fn decision(symbol: &str, kind: &str) {
        DECISIONS_TOTAL.with_label_values(&[symbol, kind]).inc();
    }

    pub fn order(symbol: &str, side: &str) {
        ORDERS_TOTAL.with_label_values(&[symbol, side]).inc();
    }

    pub fn snapshot_error(symbol: &str, reason: &str) {
        SNAPSHOT_ERRORS_TOTAL
            .with_label_values(&[symbol, reason])
            .inc();
    }

    pub fn position(symbol: &str, position: i64) {
        POSITION.with_label_values(&[symbol]).set(position);
    }

    pub fn effective_spread(symbol: &str, spread: f64) {
        EFFECTIVE_SPREAD.with_label_values(&[symbol]).set(spread);
    }

    /// Render every registered metric in the Prometheus text format.
    pub fn render() -> TelemetryResult<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&prometheus::gather(), &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_recorded_metrics() {
        Metrics::tick("TEST_RENDER");
        Metrics::decision("TEST_RENDER", "two_sided");
        Metrics::order("TEST_RENDER", "buy");
        Metrics::position("TEST_RENDER", -3);

        let text = Metrics::render().unwrap();
        assert!(text.contains("pearl_ticks_total"));
        assert!(text.contains("pearl_decisions_total"));
        assert!(text.contains(r#"pearl_position{symbol="TEST_RENDER"} -3"#));
    }

    #[test]
    fn test_counters_accumulate() {
        let before = ORDERS_TOTAL
            .with_label_values(&["TEST_COUNT", "sell"])
            .get();
        Metrics::order("TEST_COUNT", "sell");
        Metrics::order("TEST_COUNT", "sell");
        let after = ORDERS_TOTAL
            .with_label_values(&["TEST_COUNT", "sell"])
            .get();
        assert_eq!(after - before, 2.0);
    }
}

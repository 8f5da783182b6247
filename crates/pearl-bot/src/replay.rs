//! Replay recorded ticks through a `Trader`.
//!
//! Input is JSON lines, one `TradingState` per line; blank lines are ignored.
//! Output is JSON lines, one `TickOrders` per processed tick.

use std::io::{BufRead, Write};

use pearl_core::{Order, Symbol, TradingState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use crate::app::Trader;
use crate::error::{AppError, AppResult};

/// Orders emitted on one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOrders {
    pub timestamp: i64,
    pub orders: BTreeMap<Symbol, Vec<Order>>,
}

/// Totals for a finished replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub ticks: usize,
    pub orders: usize,
}

/// Feed every tick in `input` to `trader`, writing the orders to `output`.
///
/// Stops at the first malformed line.
pub fn replay<R: BufRead, W: Write>(
    trader: &mut Trader,
    input: R,
    mut output: W,
) -> AppResult<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let state: TradingState = serde_json::from_str(&line).map_err(|source| AppError::Parse {
            line: idx + 1,
            source,
        })?;

        let orders = trader.run(&state);
        summary.ticks += 1;
        summary.orders += orders.values().map(Vec::len).sum::<usize>();

        let record = TickOrders {
            timestamp: state.timestamp,
            orders,
        };
        serde_json::to_writer(&mut output, &record)?;
        output.write_all(b"\n")?;
    }
    output.flush()?;

    info!(ticks = summary.ticks, orders = summary.orders, "Replay finished");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    const TICKS: &str = r#"{"timestamp":0,"order_depths":{"PEARLS":{"buy_orders":{"9996":10},"sell_orders":{"10004":-10}}}}

{"timestamp":100,"order_depths":{"PEARLS":{"buy_orders":{"9996":10},"sell_orders":{"10004":-10}}},"position":{"PEARLS":19}}
"#;

    #[test]
    fn test_replay_writes_one_line_per_tick() {
        let mut trader = Trader::new(AppConfig::default()).unwrap();
        let mut out = Vec::new();
        let summary = replay(&mut trader, TICKS.as_bytes(), &mut out).unwrap();

        assert_eq!(summary, ReplaySummary { ticks: 2, orders: 3 });

        let text = String::from_utf8(out).unwrap();
        let records: Vec<TickOrders> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].timestamp, 0);
        let stop = &records[1].orders[&Symbol::new("PEARLS")];
        assert_eq!(stop.len(), 1);
        assert_eq!(stop[0].quantity.inner(), -10);
    }

    #[test]
    fn test_replay_reports_bad_line() {
        let mut trader = Trader::new(AppConfig::default()).unwrap();
        let input = "{\"timestamp\":0}\nnot json\n";
        let err = replay(&mut trader, input.as_bytes(), Vec::new()).unwrap_err();
        assert!(matches!(err, AppError::Parse { line: 2, .. }));
    }
}

//! Rolling mid-price history per symbol.
//!
//! Each symbol owns an independent FIFO window. The tracker is an ordinary
//! value owned by whoever drives the ticks, so separate sessions (and tests)
//! never share state.

use std::collections::{HashMap, VecDeque};

use pearl_core::Symbol;
use rust_decimal::Decimal;
use tracing::trace;

use crate::config::{HistoryConfig, SmaDivisor};
use crate::error::MmResult;

/// Tracks recent mid-prices and exposes a simple moving average.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    windows: HashMap<Symbol, VecDeque<Decimal>>,
    config: HistoryConfig,
}

impl PriceHistory {
    /// Create an empty tracker. Rejects a zero-sized window.
    pub fn new(config: HistoryConfig) -> MmResult<Self> {
        config.validate()?;
        Ok(Self {
            windows: HashMap::new(),
            config,
        })
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Record the mid-price observed at `timestamp`.
    ///
    /// Once `timestamp` is past warm-up the oldest sample is dropped before
    /// the new one goes in. Independently of warm-up the window never grows
    /// past `window_size`.
    pub fn update(
        &mut self,
        symbol: &Symbol,
        mid_price: Decimal,
        timestamp: i64,
    ) -> &VecDeque<Decimal> {
        let capacity = self.config.window_size;
        let past_warmup = timestamp > self.config.warmup_timestamp;
        let window = self
            .windows
            .entry(symbol.clone())
            .or_insert_with(|| VecDeque::with_capacity(capacity));

        if past_warmup {
            window.pop_front();
        }
        while window.len() >= capacity {
            window.pop_front();
        }
        window.push_back(mid_price);

        trace!(
            symbol = %symbol,
            timestamp,
            mid = %mid_price,
            len = window.len(),
            "price history updated"
        );
        window
    }

    /// Samples currently held for `symbol`, oldest first.
    pub fn window(&self, symbol: &Symbol) -> Option<&VecDeque<Decimal>> {
        self.windows.get(symbol)
    }

    pub fn len(&self, symbol: &Symbol) -> usize {
        self.windows.get(symbol).map_or(0, VecDeque::len)
    }

    /// Simple moving average over the window.
    ///
    /// With `SmaDivisor::Capacity` the sum is divided by `window_size` and an
    /// unseen symbol averages to zero. With `SmaDivisor::Count` the sum is
    /// divided by the samples held, and `None` is returned when there are none.
    pub fn moving_average(&self, symbol: &Symbol) -> Option<Decimal> {
        let window = self.windows.get(symbol);
        let sum: Decimal = window.into_iter().flatten().copied().sum();
        match self.config.divisor {
            SmaDivisor::Capacity => Some(sum / Decimal::from(self.config.window_size)),
            SmaDivisor::Count => {
                let count = window.map_or(0, VecDeque::len);
                if count == 0 {
                    None
                } else {
                    Some(sum / Decimal::from(count))
                }
            }
        }
    }

    /// Drop all history.
    pub fn reset(&mut self) {
        self.windows.clear();
    }
}

impl Default for PriceHistory {
    fn default() -> Self {
        Self {
            windows: HashMap::new(),
            config: HistoryConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MmError;
    use rust_decimal_macros::dec;

    fn pearls() -> Symbol {
        Symbol::new("PEARLS")
    }

    #[test]
    fn test_warmup_fills_window() {
        let mut history = PriceHistory::default();
        for (i, ts) in (0..=400).step_by(100).enumerate() {
            history.update(&pearls(), Decimal::from(10_000 + i as i64), ts);
        }
        assert_eq!(history.len(&pearls()), 5);
        assert_eq!(history.moving_average(&pearls()), Some(dec!(10002)));
    }

    #[test]
    fn test_window_bound_after_warmup() {
        let mut history = PriceHistory::default();
        let mut mids = Vec::new();
        for step in 0..20i64 {
            let mid = Decimal::from(9_990 + step);
            mids.push(mid);
            let window = history.update(&pearls(), mid, step * 100);
            assert!(window.len() <= 5);
        }
        let held: Vec<Decimal> = history.window(&pearls()).unwrap().iter().copied().collect();
        assert_eq!(held, mids[mids.len() - 5..].to_vec());
    }

    #[test]
    fn test_capacity_divisor_reads_low_during_warmup() {
        let mut history = PriceHistory::default();
        history.update(&pearls(), dec!(10), 0);
        history.update(&pearls(), dec!(20), 100);
        // (10 + 20) / 5
        assert_eq!(history.moving_average(&pearls()), Some(dec!(6)));
        assert_eq!(history.moving_average(&Symbol::new("BANANAS")), Some(dec!(0)));
    }

    #[test]
    fn test_count_divisor() {
        let mut history = PriceHistory::new(HistoryConfig {
            divisor: SmaDivisor::Count,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(history.moving_average(&pearls()), None);
        history.update(&pearls(), dec!(10), 0);
        history.update(&pearls(), dec!(20), 100);
        assert_eq!(history.moving_average(&pearls()), Some(dec!(15)));
    }

    #[test]
    fn test_dense_ticks_respect_capacity() {
        // Ticks closer together than the reference step still cap the window.
        let mut history = PriceHistory::default();
        for ts in 0..10 {
            history.update(&pearls(), Decimal::from(ts), ts * 10);
        }
        assert_eq!(history.len(&pearls()), 5);
        let held: Vec<Decimal> = history.window(&pearls()).unwrap().iter().copied().collect();
        assert_eq!(held, vec![dec!(5), dec!(6), dec!(7), dec!(8), dec!(9)]);
    }

    #[test]
    fn test_symbols_are_independent() {
        let mut history = PriceHistory::default();
        history.update(&pearls(), dec!(10_000), 0);
        history.update(&Symbol::new("BANANAS"), dec!(4_900), 0);
        assert_eq!(history.len(&pearls()), 1);
        assert_eq!(history.window(&Symbol::new("BANANAS")).unwrap()[0], dec!(4900));

        history.reset();
        assert_eq!(history.len(&pearls()), 0);
    }

    #[test]
    fn test_zero_window_rejected() {
        let err = PriceHistory::new(HistoryConfig {
            window_size: 0,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, MmError::InvalidHistory(_)));
    }

    #[test]
    fn test_single_slot_window() {
        let mut history = PriceHistory::new(HistoryConfig {
            window_size: 1,
            ..Default::default()
        })
        .unwrap();
        for ts in 0..4 {
            history.update(&pearls(), Decimal::from(ts), ts * 100);
        }
        assert_eq!(history.len(&pearls()), 1);
        assert_eq!(history.moving_average(&pearls()), Some(dec!(3)));
    }
}

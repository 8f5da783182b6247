//! Strategy and history configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{MmError, MmResult};

/// Divisor used by the simple moving average.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SmaDivisor {
    /// Divide by the configured window size even before the window fills.
    /// Missing entries count as zero, so the average reads low during warm-up.
    #[default]
    Capacity,
    /// Divide by the number of samples actually held.
    Count,
}

/// Rolling mid-price window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of mid-prices retained per symbol.
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Past this timestamp every update evicts the oldest sample first.
    #[serde(default = "default_warmup_timestamp")]
    pub warmup_timestamp: i64,

    #[serde(default)]
    pub divisor: SmaDivisor,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            warmup_timestamp: default_warmup_timestamp(),
            divisor: SmaDivisor::default(),
        }
    }
}

impl HistoryConfig {
    pub fn validate(&self) -> MmResult<()> {
        if self.window_size == 0 {
            return Err(MmError::InvalidHistory(
                "window_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-instrument strategy constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StrategyParams {
    /// Absolute cap on net position, in units.
    #[serde(default = "default_position_limit")]
    pub position_limit: i64,

    /// Directional conviction in [0, 1]. Narrows the quoted spread:
    /// `quoted = effective_spread * (1 - trend)`.
    #[serde(default = "default_trend_coefficient")]
    pub trend_coefficient: Decimal,

    /// Reservation-price sensitivity to `mid - sma`.
    #[serde(default = "default_sma_shift_scale")]
    pub sma_shift_scale: Decimal,

    /// Linear size reduction per unit of inventory on the side that adds to it.
    #[serde(default = "default_inventory_skew_scale")]
    pub inventory_skew_scale: Decimal,

    /// Quote-size sensitivity to `mid - sma`.
    #[serde(default = "default_sma_quantity_shift_scale")]
    pub sma_quantity_shift_scale: Decimal,

    /// Fraction of the position limit at which quoting switches to liquidation.
    #[serde(default = "default_stop_loss_threshold_fraction")]
    pub stop_loss_threshold_fraction: Decimal,

    /// Before this timestamp the SMA signal is ignored.
    #[serde(default = "default_warmup_timestamp")]
    pub warmup_timestamp: i64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            position_limit: default_position_limit(),
            trend_coefficient: default_trend_coefficient(),
            sma_shift_scale: default_sma_shift_scale(),
            inventory_skew_scale: default_inventory_skew_scale(),
            sma_quantity_shift_scale: default_sma_quantity_shift_scale(),
            stop_loss_threshold_fraction: default_stop_loss_threshold_fraction(),
            warmup_timestamp: default_warmup_timestamp(),
        }
    }
}

impl StrategyParams {
    /// Check ranges the quote engine relies on.
    pub fn validate(&self) -> MmResult<()> {
        if self.position_limit <= 0 {
            return Err(MmError::InvalidParams(format!(
                "position_limit must be positive, got {}",
                self.position_limit
            )));
        }
        if self.trend_coefficient < Decimal::ZERO || self.trend_coefficient > Decimal::ONE {
            return Err(MmError::InvalidParams(format!(
                "trend_coefficient must be within [0, 1], got {}",
                self.trend_coefficient
            )));
        }
        if self.stop_loss_threshold_fraction <= Decimal::ZERO
            || self.stop_loss_threshold_fraction > Decimal::ONE
        {
            return Err(MmError::InvalidParams(format!(
                "stop_loss_threshold_fraction must be within (0, 1], got {}",
                self.stop_loss_threshold_fraction
            )));
        }
        if self.inventory_skew_scale < Decimal::ZERO {
            return Err(MmError::InvalidParams(format!(
                "inventory_skew_scale must not be negative, got {}",
                self.inventory_skew_scale
            )));
        }
        Ok(())
    }
}

fn default_window_size() -> usize {
    5
}
fn default_warmup_timestamp() -> i64 {
    400 // four ticks of 100
}
fn default_position_limit() -> i64 {
    20
}
fn default_trend_coefficient() -> Decimal {
    Decimal::new(2, 1) // 0.2
}
fn default_sma_shift_scale() -> Decimal {
    Decimal::new(75, 2) // 0.75
}
fn default_inventory_skew_scale() -> Decimal {
    Decimal::new(5, 1) // 0.5
}
fn default_sma_quantity_shift_scale() -> Decimal {
    Decimal::TWO
}
fn default_stop_loss_threshold_fraction() -> Decimal {
    Decimal::new(9, 1) // 0.9
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_params() {
        let params = StrategyParams::default();
        assert_eq!(params.position_limit, 20);
        assert_eq!(params.trend_coefficient, dec!(0.2));
        assert_eq!(params.sma_shift_scale, dec!(0.75));
        assert_eq!(params.inventory_skew_scale, dec!(0.5));
        assert_eq!(params.sma_quantity_shift_scale, dec!(2));
        assert_eq!(params.stop_loss_threshold_fraction, dec!(0.9));
        assert_eq!(params.warmup_timestamp, 400);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_default_history() {
        let history = HistoryConfig::default();
        assert_eq!(history.window_size, 5);
        assert_eq!(history.warmup_timestamp, 400);
        assert_eq!(history.divisor, SmaDivisor::Capacity);
        assert!(history.validate().is_ok());
    }

    #[test]
    fn test_params_serde_defaults() {
        let toml_str = r#"
trend_coefficient = 0.4
"#;
        let params: StrategyParams = toml::from_str(toml_str).unwrap();
        assert_eq!(params.trend_coefficient, dec!(0.4));
        assert_eq!(params.position_limit, 20);
        assert_eq!(params.stop_loss_threshold_fraction, dec!(0.9));
    }

    #[test]
    fn test_history_divisor_from_toml() {
        let history: HistoryConfig = toml::from_str(r#"divisor = "count""#).unwrap();
        assert_eq!(history.divisor, SmaDivisor::Count);
        assert_eq!(history.window_size, 5);
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let params = StrategyParams {
            position_limit: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = StrategyParams {
            trend_coefficient: dec!(1.5),
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = StrategyParams {
            stop_loss_threshold_fraction: dec!(0),
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let history = HistoryConfig {
            window_size: 0,
            ..Default::default()
        };
        assert!(history.validate().is_err());
    }
}

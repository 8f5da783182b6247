//! Application configuration.

use crate::error::{AppError, AppResult};
use pearl_core::Symbol;
use pearl_mm::{HistoryConfig, StrategyParams};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Strategy settings for one product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductConfig {
    pub symbol: Symbol,

    /// Only active products are traded; the rest are ignored by the dispatcher.
    #[serde(default = "default_true")]
    pub active: bool,

    #[serde(flatten)]
    pub params: StrategyParams,
}

impl ProductConfig {
    pub fn new(symbol: impl Into<Symbol>, active: bool, params: StrategyParams) -> Self {
        Self {
            symbol: symbol.into(),
            active,
            params,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Timestamp step between ticks. Own trades from the previous tick are
    /// stamped `timestamp - tick_interval`.
    #[serde(default = "default_tick_interval")]
    pub tick_interval: i64,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default = "default_products")]
    pub products: Vec<ProductConfig>,
}

fn default_true() -> bool {
    true
}

fn default_tick_interval() -> i64 {
    100
}

fn default_products() -> Vec<ProductConfig> {
    vec![
        ProductConfig::new(
            "PEARLS",
            true,
            StrategyParams {
                trend_coefficient: Decimal::new(2, 1),
                ..Default::default()
            },
        ),
        ProductConfig::new(
            "BANANAS",
            false,
            StrategyParams {
                trend_coefficient: Decimal::new(4, 1),
                ..Default::default()
            },
        ),
    ]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_interval: default_tick_interval(),
            history: HistoryConfig::default(),
            products: default_products(),
        }
    }
}

impl AppConfig {
    /// Load and validate configuration from a TOML file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.tick_interval <= 0 {
            return Err(AppError::Config(format!(
                "tick_interval must be positive, got {}",
                self.tick_interval
            )));
        }
        self.history.validate()?;

        let mut seen = HashSet::new();
        for product in &self.products {
            if !seen.insert(&product.symbol) {
                return Err(AppError::Config(format!(
                    "Duplicate product: {}",
                    product.symbol
                )));
            }
            product.params.validate()?;
        }
        Ok(())
    }

    /// Products the dispatcher trades, in configuration order.
    pub fn active_products(&self) -> impl Iterator<Item = &ProductConfig> {
        self.products.iter().filter(|p| p.active)
    }

    pub fn product(&self, symbol: &Symbol) -> Option<&ProductConfig> {
        self.products.iter().find(|p| &p.symbol == symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pearl_mm::SmaDivisor;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.tick_interval, 100);
        assert_eq!(config.history.window_size, 5);
        let active: Vec<_> = config.active_products().map(|p| p.symbol.as_str()).collect();
        assert_eq!(active, vec!["PEARLS"]);
        let bananas = config.product(&Symbol::new("BANANAS")).unwrap();
        assert_eq!(bananas.params.trend_coefficient, dec!(0.4));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_products_with_overrides() {
        let toml_str = r#"
tick_interval = 100

[history]
window_size = 8
divisor = "count"

[[products]]
symbol = "PEARLS"
position_limit = 20
trend_coefficient = 0.2

[[products]]
symbol = "BANANAS"
active = false
trend_coefficient = 0.4
stop_loss_threshold_fraction = 0.8
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.history.window_size, 8);
        assert_eq!(config.history.divisor, SmaDivisor::Count);
        assert_eq!(config.products.len(), 2);

        let pearls = &config.products[0];
        assert!(pearls.active);
        assert_eq!(pearls.params.sma_shift_scale, dec!(0.75));

        let bananas = &config.products[1];
        assert!(!bananas.active);
        assert_eq!(bananas.params.stop_loss_threshold_fraction, dec!(0.8));
        assert_eq!(config.active_products().count(), 1);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.products.len(), 2);
        assert_eq!(config.tick_interval, 100);
    }

    #[test]
    fn test_duplicate_product_rejected() {
        let toml_str = r#"
[[products]]
symbol = "PEARLS"

[[products]]
symbol = "PEARLS"
"#;
        let err = AppConfig::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("Duplicate")));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let toml_str = r#"
[[products]]
symbol = "PEARLS"
position_limit = -1
"#;
        let err = AppConfig::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, AppError::Strategy(_)));
    }
}

//! Session configuration
//!
//! Loaded from JSON. Every field has a default so a partial file only needs to
//! override what differs from the stock three-instrument session.

use crate::error::ConfigError;
use harbor_core::{Price, Quantity, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Quote offsets are clamped to this magnitude before rounding
pub const DEFAULT_MAX_OFFSET: f64 = 1e6;

/// Root configuration for one trading session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Instruments to track and how to trade each
    #[serde(default = "default_instruments")]
    pub instruments: Vec<InstrumentConfig>,

    /// Parameters shared by every quoting pipeline
    #[serde(default)]
    pub quoting: QuotingConfig,

    /// Conversion request returned with every tick's output
    #[serde(default)]
    pub conversions: i64,
}

/// Per-instrument settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    pub symbol: Symbol,
    /// Maximum absolute position
    pub position_limit: Quantity,
    #[serde(default)]
    pub strategy: StrategyKind,
}

/// Which pipeline runs for an instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyKind {
    /// Take mispriced liquidity, then quote around fair value
    #[default]
    CrossAndQuote,
    /// Symmetric passive quotes at a fixed distance from fair value
    FixedSpread { offset: Price, size: Quantity },
}

/// Parameters of the inventory-aware quoting model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuotingConfig {
    /// Risk aversion γ
    #[serde(default = "default_risk_aversion")]
    pub risk_aversion: f64,
    /// Clip size per quote; inventory is measured in these units
    #[serde(default = "default_unit_size")]
    pub unit_size: Quantity,
    #[serde(default = "default_max_offset")]
    pub max_offset: f64,
}

fn default_risk_aversion() -> f64 {
    0.1
}

fn default_unit_size() -> Quantity {
    20
}

fn default_max_offset() -> f64 {
    DEFAULT_MAX_OFFSET
}

fn default_instruments() -> Vec<InstrumentConfig> {
    ["RAINFOREST_RESIN", "KELP", "SQUID_INK"]
        .into_iter()
        .map(|symbol| InstrumentConfig::new(symbol, 50))
        .collect()
}

impl Default for QuotingConfig {
    fn default() -> Self {
        Self {
            risk_aversion: default_risk_aversion(),
            unit_size: default_unit_size(),
            max_offset: default_max_offset(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            instruments: default_instruments(),
            quoting: QuotingConfig::default(),
            conversions: 0,
        }
    }
}

impl InstrumentConfig {
    pub fn new(symbol: impl Into<Symbol>, position_limit: Quantity) -> Self {
        Self {
            symbol: symbol.into(),
            position_limit,
            strategy: StrategyKind::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }
}

impl SessionConfig {
    /// Session with a custom instrument list and default quoting parameters
    pub fn with_instruments(instruments: Vec<InstrumentConfig>) -> Self {
        Self {
            instruments,
            ..Default::default()
        }
    }

    /// Load and validate configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn instrument(&self, symbol: &str) -> Option<&InstrumentConfig> {
        self.instruments.iter().find(|i| i.symbol == symbol)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.instruments.is_empty() {
            return Err(ConfigError::Invalid("no instruments configured".to_string()));
        }

        let mut seen = HashSet::new();
        for instrument in &self.instruments {
            if instrument.symbol.is_empty() {
                return Err(ConfigError::Invalid("empty instrument symbol".to_string()));
            }
            if !seen.insert(instrument.symbol.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate instrument {}",
                    instrument.symbol
                )));
            }
            if instrument.position_limit <= 0 {
                return Err(ConfigError::Invalid(format!(
                    "{}: position_limit must be positive",
                    instrument.symbol
                )));
            }
            if let StrategyKind::FixedSpread { offset, size } = instrument.strategy {
                if size <= 0 || offset < 0 {
                    return Err(ConfigError::Invalid(format!(
                        "{}: fixed spread needs size > 0 and offset >= 0",
                        instrument.symbol
                    )));
                }
            }
        }

        self.quoting.validate()
    }
}

impl QuotingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.unit_size <= 0 {
            return Err(ConfigError::Invalid(
                "unit_size must be positive".to_string(),
            ));
        }
        if !self.risk_aversion.is_finite() || self.risk_aversion <= 0.0 {
            return Err(ConfigError::Invalid(
                "risk_aversion must be positive and finite".to_string(),
            ));
        }
        if self.max_offset.is_nan() || self.max_offset <= 0.0 {
            return Err(ConfigError::Invalid(
                "max_offset must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session() {
        let config = SessionConfig::default();
        assert_eq!(config.instruments.len(), 3);
        assert!(config.validate().is_ok());
        assert_eq!(config.instrument("KELP").unwrap().position_limit, 50);
        assert_eq!(config.quoting.unit_size, 20);
        assert_eq!(config.conversions, 0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SessionConfig::from_json(r#"{ "conversions": 1 }"#).unwrap();
        assert_eq!(config.conversions, 1);
        assert_eq!(config.instruments.len(), 3);
        assert_eq!(config.quoting.risk_aversion, 0.1);
    }

    #[test]
    fn test_fixed_spread_from_json() {
        let json = r#"{
            "instruments": [
                { "symbol": "RAINFOREST_RESIN", "position_limit": 50,
                  "strategy": { "kind": "fixed_spread", "offset": 1, "size": 5 } },
                { "symbol": "KELP", "position_limit": 50 }
            ],
            "quoting": { "unit_size": 10 }
        }"#;
        let config = SessionConfig::from_json(json).unwrap();
        assert_eq!(
            config.instrument("RAINFOREST_RESIN").unwrap().strategy,
            StrategyKind::FixedSpread { offset: 1, size: 5 }
        );
        assert_eq!(
            config.instrument("KELP").unwrap().strategy,
            StrategyKind::CrossAndQuote
        );
        assert_eq!(config.quoting.unit_size, 10);
        assert_eq!(config.quoting.max_offset, DEFAULT_MAX_OFFSET);
    }

    #[test]
    fn test_rejects_zero_unit_size() {
        let err = SessionConfig::from_json(r#"{ "quoting": { "unit_size": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_duplicate_symbols() {
        let config = SessionConfig::with_instruments(vec![
            InstrumentConfig::new("KELP", 50),
            InstrumentConfig::new("KELP", 20),
        ]);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_non_positive_limit() {
        let config = SessionConfig::with_instruments(vec![InstrumentConfig::new("KELP", 0)]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            SessionConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}

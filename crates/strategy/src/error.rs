//! Strategy errors

use harbor_core::{Quantity, Side, Symbol};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrategyError {
    #[error("Position limit exceeded for {symbol}: requested={requested}, limit={limit}")]
    PositionLimitExceeded {
        symbol: Symbol,
        requested: Quantity,
        limit: Quantity,
    },

    #[error("Invalid strategy parameter: {0}")]
    InvalidParameter(String),

    #[error("Non-finite {side:?} quote offset for {symbol}")]
    NonFiniteQuote { symbol: Symbol, side: Side },

    #[error("Numeric domain error for {symbol}: {detail}")]
    Domain { symbol: Symbol, detail: String },

    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),
}

impl StrategyError {
    /// Numeric failures only spoil the current quote; the session carries on
    /// without quoting that instrument for the tick.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StrategyError::InvalidParameter(_)
                | StrategyError::NonFiniteQuote { .. }
                | StrategyError::Domain { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, StrategyError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

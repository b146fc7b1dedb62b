//! Replay errors

use harbor_strategy::{ConfigError, StrategyError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Usage: {0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, ReplayError>;

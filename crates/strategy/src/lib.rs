//! Harbor Strategy Engine
//!
//! Per-tick decision engine for a simulated trading session:
//! - Order book views rebuilt from each snapshot, with top-of-book history
//! - Position ledgers tracking confirmed and live (speculative) positions
//! - Crossing: take liquidity priced through fair value
//! - Quoting: inventory-aware passive quotes around fair value
//! - Dispatch of every tracked instrument through its strategy pipeline
//!
//! ## Architecture
//!
//! ```text
//!  TickSnapshot ──► InstrumentDispatcher ──► TraderOutput
//!                        │
//!                        │ per instrument
//!                        ▼
//!        ┌───────────────────────────────────┐
//!        │ InstrumentState                   │
//!        │   OrderBookView + PositionLedger  │
//!        └───────────────┬───────────────────┘
//!                        │ fair = max-volume mid
//!                        ▼
//!        CrossingStrategy ──► QuotingStrategy
//!        (mutates book and live position)  (reads what is left)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use harbor_strategy::{InstrumentDispatcher, SessionConfig, SessionContext};
//!
//! let config = SessionConfig::default();
//! let dispatcher = InstrumentDispatcher::new(&config);
//! let mut context = SessionContext::new(&config);
//!
//! let output = dispatcher.run_tick(&mut context, &snapshot)?;
//! ```

pub mod config;
pub mod crossing;
pub mod dispatcher;
pub mod error;
pub mod fixed_spread;
pub mod history;
pub mod orderbook;
pub mod position;
pub mod quoting;
pub mod state;
pub mod strategy;

// Re-export main types
pub use config::{InstrumentConfig, QuotingConfig, SessionConfig, StrategyKind};
pub use crossing::CrossingStrategy;
pub use dispatcher::{InstrumentDispatcher, Pipeline, SessionContext, TraderOutput};
pub use error::{ConfigError, Result, StrategyError};
pub use fixed_spread::FixedSpreadStrategy;
pub use history::{DepthHistory, HISTORY_DEPTH};
pub use orderbook::{OrderBookView, RefreshKind};
pub use position::PositionLedger;
pub use quoting::{Potential, QuoteSide, QuotePrices, QuotingStrategy};
pub use state::InstrumentState;
pub use strategy::TickStrategy;

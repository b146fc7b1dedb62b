//! Harbor Runner - Offline Replay
//!
//! Replays recorded order books through the strategy engine:
//!
//! - **Loader**: semicolon CSV price and trade files
//! - **Ledger**: immediate full-fill settlement with per-symbol PnL
//! - **Replay**: day-by-day harness and multi-day summary
//!
//! ## Architecture
//!
//! ```text
//!   prices_day_N.csv ──► loader ──► TickSnapshot (per timestamp)
//!   trades_day_N.csv ──► loader ──► TradeLog ──┐          │
//!                                               ▼          ▼
//!                                        ┌──────────────────────┐
//!                                        │    ReplayHarness     │
//!                                        │  InstrumentDispatcher│
//!                                        └──────────┬───────────┘
//!                                                   │ orders
//!                                                   ▼
//!                                          SettlementLedger
//!                                                   │
//!                                                   ▼
//!                                     DayReport ──► ReplaySummary
//! ```

pub mod error;
pub mod ledger;
pub mod loader;
pub mod replay;

// Re-export main types
pub use error::{ReplayError, Result};
pub use ledger::SettlementLedger;
pub use loader::{TradeLog, load_order_books, load_trades, read_order_books, read_trades};
pub use replay::{DayReport, ReplayHarness, ReplaySummary};

//! Harbor Core Domain
//!
//! Pure domain types shared by the tick engine and the replay harness.
//! This crate contains no I/O and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    BookLevel, Level, MarketTrade, Observations, Order, OrderDepth, Side, TickSnapshot,
};
pub use values::{Price, Quantity, Symbol, Timestamp};

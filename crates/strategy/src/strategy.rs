//! Strategy trait
//!
//! Strategies run synchronously against one instrument's state per call.
//! They may mutate the state (taking liquidity, committing live position) so
//! that later strategies in the same tick see what is left.

use crate::error::Result;
use crate::state::InstrumentState;
use harbor_core::Order;

pub trait TickStrategy: Send + Sync {
    /// Strategy name for logging
    fn name(&self) -> &str;

    /// Emit this tick's orders for the instrument, given its fair value
    fn on_tick(&self, state: &mut InstrumentState, fair_value: f64) -> Result<Vec<Order>>;
}

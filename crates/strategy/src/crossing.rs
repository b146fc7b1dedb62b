//! Crossing strategy
//!
//! Takes resting liquidity that is priced through fair value:
//! - asks below fair are bought, bids above fair are sold
//! - an ask at fair is bought only to cover a short, a bid at fair is sold
//!   only to reduce a long
//!
//! Levels are walked best price first. Every fill is committed to the live
//! position and removed from the book before the next level is considered, so
//! capacity checks always see earlier fills from the same tick.

use crate::error::Result;
use crate::state::InstrumentState;
use crate::strategy::TickStrategy;
use harbor_core::{Order, Side};
use log::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct CrossingStrategy;

impl CrossingStrategy {
    pub fn new() -> Self {
        Self
    }

    fn take_asks(&self, state: &mut InstrumentState, fair_value: f64) -> Result<Vec<Order>> {
        let mut orders = Vec::new();

        for level in state.book.levels(Side::Sell) {
            let price = level.price as f64;
            let live = state.ledger.live();
            let amount = if price < fair_value {
                level.quantity.min(state.ledger.buy_capacity())
            } else if price == fair_value && live < 0 {
                level
                    .quantity
                    .min(-live)
                    .min(state.ledger.buy_capacity())
            } else {
                break;
            };

            if amount <= 0 {
                continue;
            }

            state.ledger.update_live(live + amount)?;
            state
                .book
                .apply_fill(Side::Sell, level.price, level.quantity - amount);
            debug!(
                "[{}] Cross: buy {} @ {} (fair {:.1}, live {})",
                state.symbol(),
                amount,
                level.price,
                fair_value,
                state.ledger.live()
            );
            orders.push(Order::buy(state.symbol(), level.price, amount));
        }

        Ok(orders)
    }

    fn take_bids(&self, state: &mut InstrumentState, fair_value: f64) -> Result<Vec<Order>> {
        let mut orders = Vec::new();

        for level in state.book.levels(Side::Buy) {
            let price = level.price as f64;
            let live = state.ledger.live();
            let amount = if price > fair_value {
                level.quantity.min(state.ledger.sell_capacity())
            } else if price == fair_value && live > 0 {
                level.quantity.min(live).min(state.ledger.sell_capacity())
            } else {
                break;
            };

            if amount <= 0 {
                continue;
            }

            state.ledger.update_live(live - amount)?;
            state
                .book
                .apply_fill(Side::Buy, level.price, level.quantity - amount);
            debug!(
                "[{}] Cross: sell {} @ {} (fair {:.1}, live {})",
                state.symbol(),
                amount,
                level.price,
                fair_value,
                state.ledger.live()
            );
            orders.push(Order::sell(state.symbol(), level.price, amount));
        }

        Ok(orders)
    }
}

impl TickStrategy for CrossingStrategy {
    fn name(&self) -> &str {
        "Crossing"
    }

    fn on_tick(&self, state: &mut InstrumentState, fair_value: f64) -> Result<Vec<Order>> {
        let mut orders = self.take_asks(state, fair_value)?;
        orders.extend(self.take_bids(state, fair_value)?);
        Ok(orders)
    }
}

//! Fixed-spread quoting
//!
//! Posts a bid and an ask `offset` ticks either side of ⌊fair⌋, each sized to
//! the configured clip or the remaining capacity.

use crate::error::{Result, StrategyError};
use crate::state::InstrumentState;
use crate::strategy::TickStrategy;
use harbor_core::{Order, Price, Quantity};
use log::debug;

#[derive(Debug, Clone, Copy)]
pub struct FixedSpreadStrategy {
    offset: Price,
    size: Quantity,
}

impl FixedSpreadStrategy {
    pub fn new(offset: Price, size: Quantity) -> Self {
        Self { offset, size }
    }
}

impl TickStrategy for FixedSpreadStrategy {
    fn name(&self) -> &str {
        "FixedSpread"
    }

    fn on_tick(&self, state: &mut InstrumentState, fair_value: f64) -> Result<Vec<Order>> {
        if self.offset < 0 || self.size <= 0 {
            return Err(StrategyError::InvalidParameter(format!(
                "fixed spread needs offset >= 0 and size > 0, got offset={} size={}",
                self.offset, self.size
            )));
        }
        if !fair_value.is_finite() {
            return Err(StrategyError::Domain {
                symbol: state.symbol().to_string(),
                detail: format!("fair value {}", fair_value),
            });
        }

        let anchor = fair_value.floor() as Price;
        let bid = anchor - self.offset;
        let ask = anchor + self.offset;
        let buy_size = self.size.min(state.ledger.buy_capacity());
        let sell_size = self.size.min(state.ledger.sell_capacity());

        let mut orders = Vec::new();
        if buy_size > 0 && bid > 0 {
            orders.push(Order::buy(state.symbol(), bid, buy_size));
        }
        if sell_size > 0 {
            orders.push(Order::sell(state.symbol(), ask, sell_size));
        }

        debug!(
            "[{}] FixedSpread: {}x{} / {}x{} around {:.1}",
            state.symbol(),
            bid,
            buy_size,
            ask,
            sell_size,
            fair_value
        );

        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harbor_core::{OrderDepth, TickSnapshot};

    fn resin(position: i64) -> InstrumentState {
        let snapshot = TickSnapshot::new(0)
            .with_depth(
                "RAINFOREST_RESIN",
                OrderDepth::new().with_bid(9998, 10).with_ask(10002, 10),
            )
            .with_position("RAINFOREST_RESIN", position);
        let mut state = InstrumentState::new("RAINFOREST_RESIN", 50);
        state.refresh(&snapshot);
        state
    }

    #[test]
    fn test_quotes_around_fair() {
        let mut state = resin(0);
        let orders = FixedSpreadStrategy::new(2, 10)
            .on_tick(&mut state, 10000.0)
            .unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!((orders[0].price, orders[0].quantity), (9998, 10));
        assert_eq!((orders[1].price, orders[1].quantity), (10002, -10));
    }

    #[test]
    fn test_fractional_fair_anchors_on_floor() {
        let mut state = resin(0);
        let orders = FixedSpreadStrategy::new(1, 5)
            .on_tick(&mut state, 10000.5)
            .unwrap();
        assert_eq!(orders[0].price, 9999);
        assert_eq!(orders[1].price, 10001);
    }

    #[test]
    fn test_capacity_caps_size() {
        let mut state = resin(46);
        let orders = FixedSpreadStrategy::new(1, 10)
            .on_tick(&mut state, 10000.0)
            .unwrap();
        assert_eq!(orders[0].quantity, 4);
        assert_eq!(orders[1].quantity, -10);

        let mut full = resin(50);
        let orders = FixedSpreadStrategy::new(1, 10)
            .on_tick(&mut full, 10000.0)
            .unwrap();
        assert_eq!(orders.len(), 1);
        assert!(orders[0].quantity < 0);
    }

    #[test]
    fn test_does_not_touch_state() {
        let mut state = resin(3);
        FixedSpreadStrategy::new(1, 10)
            .on_tick(&mut state, 10000.0)
            .unwrap();
        assert_eq!(state.ledger.live(), 3);
        assert_eq!(state.book.volume_at(harbor_core::Side::Buy, 9998), 10);
    }

    #[test]
    fn test_bad_size_is_recoverable() {
        let mut state = resin(0);
        let err = FixedSpreadStrategy::new(1, 0)
            .on_tick(&mut state, 10000.0)
            .unwrap_err();
        assert!(err.is_recoverable());
    }
}

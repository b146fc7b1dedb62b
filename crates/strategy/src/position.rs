//! Position ledger
//!
//! Tracks two positions per instrument:
//! 1. Confirmed: what the simulator reported at the start of the tick
//! 2. Live: confirmed plus every fill the strategies have assumed this tick
//!
//! Capacity checks take the tighter of the two.

use crate::error::{Result, StrategyError};
use crate::orderbook::RefreshKind;
use harbor_core::{Quantity, Symbol};
use log::warn;

#[derive(Debug, Clone)]
pub struct PositionLedger {
    symbol: Symbol,
    limit: Quantity,
    confirmed: Quantity,
    live: Quantity,
}

impl PositionLedger {
    pub fn new(symbol: impl Into<Symbol>, limit: Quantity) -> Self {
        Self {
            symbol: symbol.into(),
            limit: limit.abs(),
            confirmed: 0,
            live: 0,
        }
    }

    pub fn limit(&self) -> Quantity {
        self.limit
    }

    pub fn confirmed(&self) -> Quantity {
        self.confirmed
    }

    pub fn live(&self) -> Quantity {
        self.live
    }

    /// Take the confirmed position from a snapshot. The live position only
    /// resets on the first refresh of a tick.
    pub fn refresh(&mut self, confirmed: Quantity, kind: RefreshKind) {
        self.confirmed = confirmed;
        if kind == RefreshKind::NewTick {
            if confirmed.abs() > self.limit {
                warn!(
                    "[{}] Confirmed position {} outside limit {}",
                    self.symbol, confirmed, self.limit
                );
            }
            self.live = confirmed.clamp(-self.limit, self.limit);
        }
    }

    /// Commit a new live position
    pub fn update_live(&mut self, position: Quantity) -> Result<()> {
        if position.abs() > self.limit {
            return Err(StrategyError::PositionLimitExceeded {
                symbol: self.symbol.clone(),
                requested: position,
                limit: self.limit,
            });
        }
        self.live = position;
        Ok(())
    }

    /// Volume that can still be bought this tick
    pub fn buy_capacity(&self) -> Quantity {
        (self.limit - self.live).min(self.limit - self.confirmed).max(0)
    }

    /// Volume that can still be sold this tick
    pub fn sell_capacity(&self) -> Quantity {
        (self.limit + self.live).min(self.limit + self.confirmed).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ledger_is_flat() {
        let ledger = PositionLedger::new("KELP", 50);
        assert_eq!(ledger.live(), 0);
        assert_eq!(ledger.confirmed(), 0);
        assert_eq!(ledger.buy_capacity(), 50);
        assert_eq!(ledger.sell_capacity(), 50);
    }

    #[test]
    fn test_refresh_resets_live_on_new_tick_only() {
        let mut ledger = PositionLedger::new("KELP", 50);
        ledger.refresh(10, RefreshKind::NewTick);
        assert_eq!(ledger.live(), 10);

        ledger.update_live(25).unwrap();
        ledger.refresh(10, RefreshKind::SameTick);
        assert_eq!(ledger.live(), 25);
        assert_eq!(ledger.confirmed(), 10);

        ledger.refresh(-5, RefreshKind::NewTick);
        assert_eq!(ledger.live(), -5);
    }

    #[test]
    fn test_update_live_rejects_breach() {
        let mut ledger = PositionLedger::new("KELP", 50);
        assert!(ledger.update_live(50).is_ok());
        assert!(ledger.update_live(-50).is_ok());

        let err = ledger.update_live(51).unwrap_err();
        assert!(matches!(
            err,
            StrategyError::PositionLimitExceeded {
                requested: 51,
                limit: 50,
                ..
            }
        ));
        // Rejected update leaves the ledger untouched
        assert_eq!(ledger.live(), -50);
    }

    #[test]
    fn test_capacity_uses_tighter_constraint() {
        let mut ledger = PositionLedger::new("KELP", 50);
        ledger.refresh(30, RefreshKind::NewTick);
        ledger.update_live(10).unwrap();

        // live allows 40 more, confirmed only 20
        assert_eq!(ledger.buy_capacity(), 20);
        // live allows 60, confirmed 80
        assert_eq!(ledger.sell_capacity(), 60);
    }

    #[test]
    fn test_capacity_never_negative() {
        let mut ledger = PositionLedger::new("KELP", 50);
        ledger.refresh(70, RefreshKind::NewTick);
        assert_eq!(ledger.live(), 50);
        assert_eq!(ledger.buy_capacity(), 0);
        assert_eq!(ledger.sell_capacity(), 100);
    }

    #[test]
    fn test_capacity_shrinks_with_buys() {
        let mut ledger = PositionLedger::new("KELP", 50);
        let mut previous = ledger.buy_capacity();
        for fill in [7, 13, 30] {
            ledger.update_live(ledger.live() + fill).unwrap();
            let capacity = ledger.buy_capacity();
            assert!(capacity <= previous);
            assert!(capacity >= 0);
            previous = capacity;
        }
        assert_eq!(previous, 0);
    }
}

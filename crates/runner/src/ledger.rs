//! Settlement ledger
//!
//! Every order is treated as filled in full at its own price the moment it is
//! emitted. PnL is cash only: buys cost `price * quantity`, sells earn it.

use harbor_core::{Order, Quantity, Symbol};
use log::warn;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct SettlementLedger {
    positions: BTreeMap<Symbol, Quantity>,
    pnl: BTreeMap<Symbol, i64>,
    settled: usize,
    discarded: usize,
}

impl SettlementLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill `order` immediately. Orders that cannot trade are discarded;
    /// returns whether the order was settled.
    pub fn settle(&mut self, order: &Order) -> bool {
        if order.quantity == 0 || order.price <= 0 {
            warn!(
                "[{}] Discarding order {} @ {}",
                order.symbol, order.quantity, order.price
            );
            self.discarded += 1;
            return false;
        }

        *self.positions.entry(order.symbol.clone()).or_insert(0) += order.quantity;
        *self.pnl.entry(order.symbol.clone()).or_insert(0) += order.cash_flow();
        self.settled += 1;
        true
    }

    pub fn position(&self, symbol: &str) -> Quantity {
        self.positions.get(symbol).copied().unwrap_or(0)
    }

    pub fn pnl(&self, symbol: &str) -> i64 {
        self.pnl.get(symbol).copied().unwrap_or(0)
    }

    pub fn total_pnl(&self) -> i64 {
        self.pnl.values().sum()
    }

    pub fn positions(&self) -> &BTreeMap<Symbol, Quantity> {
        &self.positions
    }

    pub fn pnl_by_symbol(&self) -> &BTreeMap<Symbol, i64> {
        &self.pnl
    }

    pub fn settled(&self) -> usize {
        self.settled
    }

    pub fn discarded(&self) -> usize {
        self.discarded
    }
}

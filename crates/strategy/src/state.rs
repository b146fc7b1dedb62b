//! Per-instrument state: book view and position ledger, refreshed together

use crate::orderbook::{OrderBookView, RefreshKind};
use crate::position::PositionLedger;
use harbor_core::{Quantity, TickSnapshot};

#[derive(Debug, Clone)]
pub struct InstrumentState {
    pub book: OrderBookView,
    pub ledger: PositionLedger,
}

impl InstrumentState {
    pub fn new(symbol: &str, position_limit: Quantity) -> Self {
        Self {
            book: OrderBookView::new(symbol),
            ledger: PositionLedger::new(symbol, position_limit),
        }
    }

    pub fn symbol(&self) -> &str {
        self.book.symbol()
    }

    /// Pull this instrument's ladders and confirmed position from `snapshot`
    pub fn refresh(&mut self, snapshot: &TickSnapshot) -> RefreshKind {
        let symbol = self.book.symbol().to_string();
        let kind = self
            .book
            .refresh(snapshot.depth(&symbol), snapshot.timestamp);
        self.ledger.refresh(snapshot.position(&symbol), kind);
        kind
    }
}

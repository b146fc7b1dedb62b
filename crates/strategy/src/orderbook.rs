//! Per-instrument order book view
//!
//! Holds the ladders from the latest snapshot, as adjusted by fills taken
//! earlier in the same tick, plus the top-of-book history.
//!
//! Both ladders store unsigned volumes; the side is carried by which ladder a
//! level lives in. Snapshots may report asks with the platform's negative
//! sign, which is stripped on refresh.

use crate::history::{DepthHistory, HISTORY_DEPTH};
use harbor_core::{Level, OrderDepth, Price, Quantity, Side, Symbol, Timestamp};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Whether a refresh started a new tick or repeated the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshKind {
    NewTick,
    SameTick,
}

#[derive(Debug, Clone)]
pub struct OrderBookView {
    symbol: Symbol,
    /// Bid levels: price -> volume
    bids: BTreeMap<Price, Quantity>,
    /// Ask levels: price -> volume
    asks: BTreeMap<Price, Quantity>,
    history: DepthHistory,
    last_timestamp: Option<Timestamp>,
    ticks_seen: u64,
}

impl OrderBookView {
    pub fn new(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            history: DepthHistory::new(),
            last_timestamp: None,
            ticks_seen: 0,
        }
    }

    /// Replace both ladders with the snapshot's. A missing depth means an
    /// empty book. History is appended once per distinct timestamp.
    pub fn refresh(&mut self, depth: Option<&OrderDepth>, timestamp: Timestamp) -> RefreshKind {
        self.bids.clear();
        self.asks.clear();

        if let Some(depth) = depth {
            for (&price, &quantity) in &depth.buy_orders {
                if quantity > 0 {
                    self.bids.insert(price, quantity);
                }
            }
            for (&price, &quantity) in &depth.sell_orders {
                if quantity != 0 {
                    self.asks.insert(price, quantity.abs());
                }
            }
        }

        if self.last_timestamp == Some(timestamp) {
            return RefreshKind::SameTick;
        }

        self.last_timestamp = Some(timestamp);
        self.ticks_seen += 1;
        let bids = self.top_levels(Side::Buy, HISTORY_DEPTH);
        let asks = self.top_levels(Side::Sell, HISTORY_DEPTH);
        self.history.record(&bids, &asks);

        RefreshKind::NewTick
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn history(&self) -> &DepthHistory {
        &self.history
    }

    /// Number of distinct ticks refreshed
    pub fn ticks_seen(&self) -> u64 {
        self.ticks_seen
    }

    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.last_timestamp
    }

    // === Price Queries ===

    /// Highest bid. With no bids, one tick under the best ask.
    pub fn best_bid(&self) -> Option<Price> {
        self.top_bid().or_else(|| self.top_ask().map(|ask| ask - 1))
    }

    /// Lowest ask. With no asks, one tick over the best bid.
    pub fn best_ask(&self) -> Option<Price> {
        self.top_ask().or_else(|| self.top_bid().map(|bid| bid + 1))
    }

    fn top_bid(&self) -> Option<Price> {
        self.bids.keys().next_back().copied()
    }

    fn top_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// Price holding the most resting volume on `side`.
    /// Levels are scanned best-first, so ties go to the better price.
    /// None when the side is empty.
    pub fn price_at_max_volume(&self, side: Side) -> Option<Price> {
        let mut best: Option<Level> = None;
        for level in self.levels(side) {
            if best.is_none_or(|max| level.quantity > max.quantity) {
                best = Some(level);
            }
        }
        best.map(|level| level.price)
    }

    /// Liquidity-weighted mid: halfway between the max-volume bid and ask.
    /// A missing side falls back to its synthesized best price.
    pub fn max_volume_mid(&self) -> Option<f64> {
        let bid = self
            .price_at_max_volume(Side::Buy)
            .or_else(|| self.best_bid())?;
        let ask = self
            .price_at_max_volume(Side::Sell)
            .or_else(|| self.best_ask())?;
        Some((bid + ask) as f64 / 2.0)
    }

    // === Level Queries ===

    /// All levels on `side`, best price first
    pub fn levels(&self, side: Side) -> Vec<Level> {
        let to_level = |(&price, &quantity): (&Price, &Quantity)| Level::new(price, quantity);
        match side {
            Side::Buy => self.bids.iter().rev().map(to_level).collect(),
            Side::Sell => self.asks.iter().map(to_level).collect(),
        }
    }

    /// Top `n` levels on `side`, best price first
    pub fn top_levels(&self, side: Side, n: usize) -> Vec<Level> {
        let mut levels = self.levels(side);
        levels.truncate(n);
        levels
    }

    /// Resting volume at `price`, zero if no level
    pub fn volume_at(&self, side: Side, price: Price) -> Quantity {
        self.ladder(side).get(&price).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    // === Mutation ===

    /// Overwrite the level at `price` with the volume left after a fill.
    /// Zero removes the level. A negative remainder is rejected and the book
    /// is left unchanged; returns whether the book was updated.
    pub fn apply_fill(&mut self, side: Side, price: Price, remaining: Quantity) -> bool {
        if remaining < 0 {
            warn!(
                "[{}] Ignoring fill leaving negative volume {} at {} ({:?})",
                self.symbol, remaining, price, side
            );
            return false;
        }

        let symbol = &self.symbol;
        let ladder = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        if remaining == 0 {
            ladder.remove(&price);
        } else {
            ladder.insert(price, remaining);
        }
        debug!("[{}] {:?} level {} now {}", symbol, side, price, remaining);
        true
    }

    fn ladder(&self, side: Side) -> &BTreeMap<Price, Quantity> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }
}

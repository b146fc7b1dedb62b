//! Inventory-aware quoting
//!
//! Posts one passive bid and one passive ask around fair value. Offsets come
//! from a queueing model with reflecting walls at the position limit:
//!
//! ```text
//! q = live / unit          Q = limit / unit
//! κ_bid = 1 / max(f − best_bid − 1, 1)
//! κ_ask = 1 / max(best_ask − f − 1, 1)
//! V(x)  = ln(sin(π (x + Q + 1) / (2Q + 2)))      for |x| < Q + 1
//! δ_bid = (1/γ) ln(1 + γ/κ_bid) − (1/κ_bid) (V(q+1) − V(q))
//! δ_ask = (1/γ) ln(1 + γ/κ_ask) + (1/κ_ask) (V(q) − V(q−1))
//! ```
//!
//! At |x| = Q + 1 the potential diverges; that side's quote is withdrawn.
//! Candidate prices are then pulled inside the book:
//! - bid: at most best bid + 1, at least the max-volume bid + 1, at most ⌊f⌋
//! - ask: at least best ask − 1, at most the max-volume ask − 1, at least ⌈f⌉
//!
//! The fair-value bound is applied last, so a bid never sits above fair value
//! and an ask never below it.

use crate::config::QuotingConfig;
use crate::error::{Result, StrategyError};
use crate::state::InstrumentState;
use crate::strategy::TickStrategy;
use harbor_core::{Order, Price, Quantity, Side};
use log::debug;
use std::f64::consts::PI;

/// Value of the inventory potential at one point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Potential {
    Finite(f64),
    /// One unit past the position limit: the potential is −∞ here
    Boundary,
}

/// Evaluate the potential at inventory `x` (in units) for a limit of `q_max`
/// units. None when `x` lies beyond the reflecting walls.
pub fn potential(x: f64, q_max: f64) -> Option<Potential> {
    let wall = q_max + 1.0;
    if x == wall || x == -wall {
        return Some(Potential::Boundary);
    }

    let s = (PI * (x + wall) / (2.0 * wall)).sin();
    if s.is_nan() || s <= 0.0 {
        return None;
    }
    Some(Potential::Finite(s.ln()))
}

/// One side of a two-sided quote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteSide {
    Price(Price),
    Withdrawn,
}

impl QuoteSide {
    pub fn price(&self) -> Option<Price> {
        match self {
            QuoteSide::Price(price) => Some(*price),
            QuoteSide::Withdrawn => None,
        }
    }
}

/// Quote prices before sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotePrices {
    pub bid: QuoteSide,
    pub ask: QuoteSide,
}

#[derive(Debug, Clone)]
pub struct QuotingStrategy {
    config: QuotingConfig,
}

impl QuotingStrategy {
    pub fn new(config: QuotingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QuotingConfig {
        &self.config
    }

    /// Quote prices for the current book and live position.
    /// None when the book has no prices at all.
    pub fn quote_prices(
        &self,
        state: &InstrumentState,
        fair_value: f64,
    ) -> Result<Option<QuotePrices>> {
        let symbol = state.symbol();
        let gamma = self.config.risk_aversion;

        if self.config.unit_size <= 0 {
            return Err(StrategyError::InvalidParameter(format!(
                "unit_size must be positive, got {}",
                self.config.unit_size
            )));
        }
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(StrategyError::InvalidParameter(format!(
                "risk_aversion must be positive, got {}",
                gamma
            )));
        }
        if !fair_value.is_finite() {
            return Err(StrategyError::Domain {
                symbol: symbol.to_string(),
                detail: format!("fair value {}", fair_value),
            });
        }

        let (Some(best_bid), Some(best_ask)) = (state.book.best_bid(), state.book.best_ask())
        else {
            return Ok(None);
        };

        let unit = self.config.unit_size as f64;
        let q = state.ledger.live() as f64 / unit;
        let q_max = state.ledger.limit() as f64 / unit;

        let kappa_bid = 1.0 / (fair_value - best_bid as f64 - 1.0).max(1.0);
        let kappa_ask = 1.0 / (best_ask as f64 - fair_value - 1.0).max(1.0);

        let eval = |x: f64| {
            potential(x, q_max).ok_or_else(|| StrategyError::Domain {
                symbol: symbol.to_string(),
                detail: format!("inventory {:.3} outside ±{:.3} units", x, q_max + 1.0),
            })
        };
        let here = match eval(q)? {
            Potential::Finite(v) => v,
            Potential::Boundary => {
                return Err(StrategyError::Domain {
                    symbol: symbol.to_string(),
                    detail: format!("inventory {:.3} sits on the reflecting wall", q),
                });
            }
        };

        let spread_term = |kappa: f64| (1.0 + gamma / kappa).ln() / gamma;

        let bid_offset = match eval(q + 1.0)? {
            Potential::Boundary => None,
            Potential::Finite(up) => {
                let delta = spread_term(kappa_bid) - (up - here) / kappa_bid;
                Some(self.clamp_offset(delta, symbol, Side::Buy)?)
            }
        };
        let ask_offset = match eval(q - 1.0)? {
            Potential::Boundary => None,
            Potential::Finite(down) => {
                let delta = spread_term(kappa_ask) + (here - down) / kappa_ask;
                Some(self.clamp_offset(delta, symbol, Side::Sell)?)
            }
        };

        let bid = match bid_offset {
            None => QuoteSide::Withdrawn,
            Some(delta) => {
                let mut price = (fair_value - delta).round_ties_even() as Price;
                price = price.min(best_bid + 1);
                if let Some(anchor) = state.book.price_at_max_volume(Side::Buy) {
                    price = price.max(anchor + 1);
                }
                QuoteSide::Price(price.min(fair_value.floor() as Price))
            }
        };
        let ask = match ask_offset {
            None => QuoteSide::Withdrawn,
            Some(delta) => {
                let mut price = (fair_value + delta).round_ties_even() as Price;
                price = price.max(best_ask - 1);
                if let Some(anchor) = state.book.price_at_max_volume(Side::Sell) {
                    price = price.min(anchor - 1);
                }
                QuoteSide::Price(price.max(fair_value.ceil() as Price))
            }
        };

        Ok(Some(QuotePrices { bid, ask }))
    }

    fn clamp_offset(&self, delta: f64, symbol: &str, side: Side) -> Result<f64> {
        if delta.is_nan() {
            return Err(StrategyError::NonFiniteQuote {
                symbol: symbol.to_string(),
                side,
            });
        }
        let bound = self.config.max_offset.abs();
        Ok(delta.clamp(-bound, bound))
    }

    fn clip(&self, capacity: Quantity) -> Quantity {
        self.config.unit_size.min(capacity)
    }
}

impl TickStrategy for QuotingStrategy {
    fn name(&self) -> &str {
        "Quoting"
    }

    fn on_tick(&self, state: &mut InstrumentState, fair_value: f64) -> Result<Vec<Order>> {
        let Some(quote) = self.quote_prices(state, fair_value)? else {
            debug!("[{}] No book, skipping quotes", state.symbol());
            return Ok(Vec::new());
        };

        let mut orders = Vec::new();

        let buy_size = self.clip(state.ledger.buy_capacity());
        if let (Some(price), true) = (quote.bid.price(), buy_size > 0) {
            orders.push(Order::buy(state.symbol(), price, buy_size));
        }

        let sell_size = self.clip(state.ledger.sell_capacity());
        if let (Some(price), true) = (quote.ask.price(), sell_size > 0) {
            orders.push(Order::sell(state.symbol(), price, sell_size));
        }

        debug!(
            "[{}] Quoting: bid={:?}x{} ask={:?}x{} live={} fair={:.1}",
            state.symbol(),
            quote.bid,
            buy_size,
            quote.ask,
            sell_size,
            state.ledger.live(),
            fair_value
        );

        Ok(orders)
    }
}

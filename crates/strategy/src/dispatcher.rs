//! Instrument dispatcher
//!
//! Owns nothing mutable itself: per-instrument state lives in a
//! [`SessionContext`] passed into every tick. For each configured instrument
//! the dispatcher refreshes its state from the snapshot, derives fair value
//! from the book, and runs the instrument's pipeline in order.

use crate::config::{SessionConfig, StrategyKind};
use crate::crossing::CrossingStrategy;
use crate::error::{Result, StrategyError};
use crate::fixed_spread::FixedSpreadStrategy;
use crate::quoting::QuotingStrategy;
use crate::state::InstrumentState;
use crate::strategy::TickStrategy;
use harbor_core::{Order, Symbol, TickSnapshot};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Per-session state: one record per tracked instrument
#[derive(Debug, Clone)]
pub struct SessionContext {
    instruments: BTreeMap<Symbol, InstrumentState>,
}

impl SessionContext {
    pub fn new(config: &SessionConfig) -> Self {
        let instruments = config
            .instruments
            .iter()
            .map(|i| {
                (
                    i.symbol.clone(),
                    InstrumentState::new(&i.symbol, i.position_limit),
                )
            })
            .collect();
        Self { instruments }
    }

    pub fn state(&self, symbol: &str) -> Option<&InstrumentState> {
        self.instruments.get(symbol)
    }

    pub fn state_mut(&mut self, symbol: &str) -> Option<&mut InstrumentState> {
        self.instruments.get_mut(symbol)
    }
}

/// Everything returned to the platform for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraderOutput {
    pub orders: BTreeMap<Symbol, Vec<Order>>,
    pub conversions: i64,
    pub trader_data: String,
}

impl TraderOutput {
    pub fn orders_for(&self, symbol: &str) -> &[Order] {
        self.orders.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn order_count(&self) -> usize {
        self.orders.values().map(Vec::len).sum()
    }
}

/// Strategies run in order for one instrument
pub type Pipeline = Vec<Box<dyn TickStrategy>>;

pub struct InstrumentDispatcher {
    pipelines: BTreeMap<Symbol, Pipeline>,
    conversions: i64,
}

impl InstrumentDispatcher {
    pub fn new(config: &SessionConfig) -> Self {
        let pipelines = config
            .instruments
            .iter()
            .map(|instrument| {
                let pipeline: Pipeline = match instrument.strategy {
                    StrategyKind::CrossAndQuote => vec![
                        Box::new(CrossingStrategy::new()),
                        Box::new(QuotingStrategy::new(config.quoting)),
                    ],
                    StrategyKind::FixedSpread { offset, size } => {
                        vec![Box::new(FixedSpreadStrategy::new(offset, size))]
                    }
                };
                (instrument.symbol.clone(), pipeline)
            })
            .collect();

        Self {
            pipelines,
            conversions: config.conversions,
        }
    }

    /// Replace the strategies run for `symbol`
    pub fn set_pipeline(&mut self, symbol: &str, pipeline: Pipeline) -> Result<()> {
        match self.pipelines.get_mut(symbol) {
            Some(slot) => {
                *slot = pipeline;
                Ok(())
            }
            None => Err(StrategyError::UnknownInstrument(symbol.to_string())),
        }
    }

    /// Names of the strategies run for `symbol`, in order
    pub fn pipeline_names(&self, symbol: &str) -> Vec<&str> {
        self.pipelines
            .get(symbol)
            .map(|p| p.iter().map(|s| s.name()).collect())
            .unwrap_or_default()
    }

    /// Process one snapshot. Recoverable strategy errors drop that stage's
    /// orders for the instrument; anything else aborts the tick.
    pub fn run_tick(
        &self,
        context: &mut SessionContext,
        snapshot: &TickSnapshot,
    ) -> Result<TraderOutput> {
        let mut output = TraderOutput {
            orders: BTreeMap::new(),
            conversions: self.conversions,
            trader_data: snapshot.trader_data.clone(),
        };

        for (symbol, pipeline) in &self.pipelines {
            let state = context
                .state_mut(symbol)
                .ok_or_else(|| StrategyError::UnknownInstrument(symbol.clone()))?;
            state.refresh(snapshot);

            let Some(fair_value) = state.book.max_volume_mid() else {
                debug!("[{}] Empty book at {}, no orders", symbol, snapshot.timestamp);
                continue;
            };

            let mut orders = Vec::new();
            for stage in pipeline {
                match stage.on_tick(state, fair_value) {
                    Ok(mut emitted) => orders.append(&mut emitted),
                    Err(e) if e.is_recoverable() => {
                        warn!("[{}] {} skipped: {}", symbol, stage.name(), e);
                    }
                    Err(e) => return Err(e),
                }
            }

            output.orders.insert(symbol.clone(), orders);
        }

        Ok(output)
    }
}

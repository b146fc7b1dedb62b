//! Replay harness
//!
//! Stands in for the trading platform offline. Each day:
//! 1. Starts from a fresh session with flat positions
//! 2. Feeds snapshots through the dispatcher in time order, with the ledger's
//!    positions as the confirmed positions and the previous tick's trader data
//! 3. Settles every emitted order as an immediate full fill
//! 4. Records total PnL after every tick

use crate::error::Result;
use crate::ledger::SettlementLedger;
use crate::loader::TradeLog;
use harbor_core::{Quantity, Symbol, TickSnapshot, Timestamp};
use harbor_strategy::{InstrumentDispatcher, SessionConfig, SessionContext};
use log::info;
use std::collections::BTreeMap;

/// Outcome of one replayed day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayReport {
    pub pnl: BTreeMap<Symbol, i64>,
    pub positions: BTreeMap<Symbol, Quantity>,
    /// (timestamp, total PnL after the tick)
    pub timeline: Vec<(Timestamp, i64)>,
    pub ticks: usize,
    pub orders_settled: usize,
    pub orders_discarded: usize,
}

impl DayReport {
    pub fn total_pnl(&self) -> i64 {
        self.pnl.values().sum()
    }
}

/// Several days added together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplaySummary {
    pub pnl: BTreeMap<Symbol, i64>,
    pub positions: BTreeMap<Symbol, Quantity>,
    /// Each day's timeline, concatenated in day order
    pub timeline: Vec<(Timestamp, i64)>,
    pub days: usize,
}

impl ReplaySummary {
    pub fn from_days(days: &[DayReport]) -> Self {
        let mut summary = Self {
            days: days.len(),
            ..Default::default()
        };
        for day in days {
            for (symbol, pnl) in &day.pnl {
                *summary.pnl.entry(symbol.clone()).or_insert(0) += pnl;
            }
            for (symbol, position) in &day.positions {
                *summary.positions.entry(symbol.clone()).or_insert(0) += position;
            }
            summary.timeline.extend_from_slice(&day.timeline);
        }
        summary
    }

    pub fn total_pnl(&self) -> i64 {
        self.pnl.values().sum()
    }
}

pub struct ReplayHarness {
    config: SessionConfig,
    dispatcher: InstrumentDispatcher,
}

impl ReplayHarness {
    pub fn new(config: SessionConfig) -> Self {
        let dispatcher = InstrumentDispatcher::new(&config);
        Self { config, dispatcher }
    }

    /// Replay one day of snapshots. Trades are attached to the snapshot with
    /// the same timestamp.
    pub fn run_day(&self, snapshots: Vec<TickSnapshot>, trades: &TradeLog) -> Result<DayReport> {
        let mut context = SessionContext::new(&self.config);
        let mut ledger = SettlementLedger::new();
        let mut timeline = Vec::with_capacity(snapshots.len());
        let mut trader_data = String::new();

        for mut snapshot in snapshots {
            snapshot.position = ledger.positions().clone();
            snapshot.trader_data = std::mem::take(&mut trader_data);
            if let Some(printed) = trades.get(&snapshot.timestamp) {
                snapshot.market_trades = printed.clone();
            }

            let output = self.dispatcher.run_tick(&mut context, &snapshot)?;
            for order in output.orders.values().flatten() {
                ledger.settle(order);
            }
            trader_data = output.trader_data;
            timeline.push((snapshot.timestamp, ledger.total_pnl()));
        }

        let report = DayReport {
            pnl: ledger.pnl_by_symbol().clone(),
            positions: ledger.positions().clone(),
            ticks: timeline.len(),
            timeline,
            orders_settled: ledger.settled(),
            orders_discarded: ledger.discarded(),
        };

        info!(
            "Replayed {} ticks: pnl={} settled={} discarded={}",
            report.ticks,
            report.total_pnl(),
            report.orders_settled,
            report.orders_discarded
        );
        for (symbol, pnl) in &report.pnl {
            info!(
                "[{}] pnl={} position={}",
                symbol,
                pnl,
                report.positions.get(symbol).copied().unwrap_or(0)
            );
        }

        Ok(report)
    }
}

//! Historical data loaders
//!
//! Both files are semicolon-delimited with a header row. Order book rows carry
//! up to three levels per side; blank cells mean the level is absent. Volumes
//! are recorded unsigned, so ask volumes are negated on the way in.

use crate::error::Result;
use harbor_core::{MarketTrade, OrderDepth, Price, Quantity, Symbol, TickSnapshot, Timestamp};
use log::{debug, warn};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Market trades for one day, keyed by timestamp then symbol
pub type TradeLog = BTreeMap<Timestamp, BTreeMap<Symbol, Vec<MarketTrade>>>;

#[derive(Debug, Deserialize)]
struct BookRow {
    timestamp: Timestamp,
    product: Symbol,
    bid_price_1: Option<Price>,
    bid_volume_1: Option<Quantity>,
    bid_price_2: Option<Price>,
    bid_volume_2: Option<Quantity>,
    bid_price_3: Option<Price>,
    bid_volume_3: Option<Quantity>,
    ask_price_1: Option<Price>,
    ask_volume_1: Option<Quantity>,
    ask_price_2: Option<Price>,
    ask_volume_2: Option<Quantity>,
    ask_price_3: Option<Price>,
    ask_volume_3: Option<Quantity>,
}

impl BookRow {
    fn bids(&self) -> [(Option<Price>, Option<Quantity>); 3] {
        [
            (self.bid_price_1, self.bid_volume_1),
            (self.bid_price_2, self.bid_volume_2),
            (self.bid_price_3, self.bid_volume_3),
        ]
    }

    fn asks(&self) -> [(Option<Price>, Option<Quantity>); 3] {
        [
            (self.ask_price_1, self.ask_volume_1),
            (self.ask_price_2, self.ask_volume_2),
            (self.ask_price_3, self.ask_volume_3),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct TradeRow {
    timestamp: Timestamp,
    buyer: Option<String>,
    seller: Option<String>,
    symbol: Symbol,
    price: f64,
    quantity: Quantity,
}

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_reader(source)
}

/// Parse order book rows into one snapshot per timestamp, in time order
pub fn read_order_books<R: Read>(source: R) -> Result<Vec<TickSnapshot>> {
    let mut snapshots: BTreeMap<Timestamp, TickSnapshot> = BTreeMap::new();

    for row in reader(source).deserialize() {
        let row: BookRow = row?;
        let snapshot = snapshots
            .entry(row.timestamp)
            .or_insert_with(|| TickSnapshot::new(row.timestamp));
        let depth = snapshot
            .order_depths
            .entry(row.product.clone())
            .or_insert_with(OrderDepth::new);

        for (price, volume) in row.bids() {
            if let (Some(price), Some(volume)) = (price, volume) {
                depth.buy_orders.insert(price, volume);
            }
        }
        for (price, volume) in row.asks() {
            if let (Some(price), Some(volume)) = (price, volume) {
                depth.sell_orders.insert(price, -volume.abs());
            }
        }
    }

    debug!("Loaded {} order book ticks", snapshots.len());
    Ok(snapshots.into_values().collect())
}

pub fn load_order_books(path: impl AsRef<Path>) -> Result<Vec<TickSnapshot>> {
    let file = File::open(path.as_ref())?;
    read_order_books(file)
}

/// Parse trade rows grouped by timestamp and symbol
pub fn read_trades<R: Read>(source: R) -> Result<TradeLog> {
    let mut trades = TradeLog::new();
    let mut count = 0usize;

    for row in reader(source).deserialize() {
        let row: TradeRow = row?;
        if !row.price.is_finite() {
            warn!("[{}] Skipping trade with price {} at {}", row.symbol, row.price, row.timestamp);
            continue;
        }
        trades
            .entry(row.timestamp)
            .or_default()
            .entry(row.symbol.clone())
            .or_default()
            .push(MarketTrade {
                timestamp: row.timestamp,
                symbol: row.symbol,
                price: row.price,
                quantity: row.quantity,
                buyer: row.buyer.unwrap_or_default(),
                seller: row.seller.unwrap_or_default(),
            });
        count += 1;
    }

    debug!("Loaded {} trades over {} timestamps", count, trades.len());
    Ok(trades)
}

pub fn load_trades(path: impl AsRef<Path>) -> Result<TradeLog> {
    let file = File::open(path.as_ref())?;
    read_trades(file)
}

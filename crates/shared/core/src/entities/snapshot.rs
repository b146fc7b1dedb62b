use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{MarketTrade, OrderDepth};
use crate::values::{Quantity, Symbol, Timestamp};

/// Auxiliary per-tick observations (conversion prices, fees, index values).
/// Carried through untouched.
pub type Observations = BTreeMap<String, f64>;

/// Everything the simulator hands the engine for one tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickSnapshot {
    pub timestamp: Timestamp,
    /// Opaque state string returned by the previous tick
    #[serde(default)]
    pub trader_data: String,
    #[serde(default)]
    pub order_depths: BTreeMap<Symbol, OrderDepth>,
    /// Confirmed positions; a missing symbol means flat
    #[serde(default)]
    pub position: BTreeMap<Symbol, Quantity>,
    #[serde(default)]
    pub market_trades: BTreeMap<Symbol, Vec<MarketTrade>>,
    #[serde(default)]
    pub observations: Observations,
}

impl TickSnapshot {
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            ..Default::default()
        }
    }

    pub fn with_depth(mut self, symbol: impl Into<Symbol>, depth: OrderDepth) -> Self {
        self.order_depths.insert(symbol.into(), depth);
        self
    }

    pub fn with_position(mut self, symbol: impl Into<Symbol>, position: Quantity) -> Self {
        self.position.insert(symbol.into(), position);
        self
    }

    pub fn depth(&self, symbol: &str) -> Option<&OrderDepth> {
        self.order_depths.get(symbol)
    }

    /// Confirmed position for `symbol`, defaulting to flat
    pub fn position(&self, symbol: &str) -> Quantity {
        self.position.get(symbol).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_position_defaults_to_zero() {
        let snapshot = TickSnapshot::new(100).with_position("KELP", -7);
        assert_eq!(snapshot.position("KELP"), -7);
        assert_eq!(snapshot.position("SQUID_INK"), 0);
    }

    #[test]
    fn test_deserialize_platform_json() {
        let json = r#"{
            "timestamp": 200,
            "order_depths": {
                "KELP": { "buy_orders": { "2028": 12 }, "sell_orders": { "2031": -9 } }
            },
            "position": { "KELP": 3 }
        }"#;
        let snapshot: TickSnapshot = serde_json::from_str(json).unwrap();
        let depth = snapshot.depth("KELP").unwrap();
        assert_eq!(depth.buy_orders.get(&2028), Some(&12));
        assert_eq!(depth.sell_orders.get(&2031), Some(&-9));
        assert_eq!(snapshot.position("KELP"), 3);
        assert!(snapshot.trader_data.is_empty());
    }
}

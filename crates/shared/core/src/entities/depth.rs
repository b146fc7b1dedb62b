use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::values::{Price, Quantity};

/// Resting orders for one instrument as reported by the simulator.
///
/// `sell_orders` carry negative quantities on the platform; consumers must
/// treat the sign of an ask volume as informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDepth {
    #[serde(default)]
    pub buy_orders: BTreeMap<Price, Quantity>,
    #[serde(default)]
    pub sell_orders: BTreeMap<Price, Quantity>,
}

impl OrderDepth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper for tests and loaders
    pub fn with_bid(mut self, price: Price, quantity: Quantity) -> Self {
        self.buy_orders.insert(price, quantity);
        self
    }

    /// Adds an ask using the platform's negative-volume convention
    pub fn with_ask(mut self, price: Price, quantity: Quantity) -> Self {
        self.sell_orders.insert(price, -quantity.abs());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buy_orders.is_empty() && self.sell_orders.is_empty()
    }
}

use serde::{Deserialize, Serialize};

use crate::values::{Quantity, Symbol, Timestamp};

/// A trade printed by other market participants, passed through to strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketTrade {
    pub timestamp: Timestamp,
    pub symbol: Symbol,
    /// Historic trade prices are not always whole ticks
    pub price: f64,
    pub quantity: Quantity,
    #[serde(default)]
    pub buyer: String,
    #[serde(default)]
    pub seller: String,
}

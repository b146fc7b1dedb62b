use serde::{Deserialize, Serialize};

use super::Side;
use crate::values::{Price, Quantity, Symbol};

/// An order emitted for one tick.
///
/// The sign of `quantity` encodes the side: positive buys, negative sells.
/// Strategies never emit zero-quantity orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub symbol: Symbol,
    pub price: Price,
    pub quantity: Quantity,
}

impl Order {
    pub fn new(symbol: impl Into<Symbol>, price: Price, quantity: Quantity) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            quantity,
        }
    }

    /// Buy `quantity` (a positive magnitude) at `price`
    pub fn buy(symbol: impl Into<Symbol>, price: Price, quantity: Quantity) -> Self {
        Self::new(symbol, price, quantity.abs())
    }

    /// Sell `quantity` (a positive magnitude) at `price`
    pub fn sell(symbol: impl Into<Symbol>, price: Price, quantity: Quantity) -> Self {
        Self::new(symbol, price, -quantity.abs())
    }

    /// Side of the order, None for a zero-quantity order
    pub fn side(&self) -> Option<Side> {
        Side::from_signed(self.quantity)
    }

    pub fn abs_quantity(&self) -> Quantity {
        self.quantity.abs()
    }

    /// Signed cash flow if filled in full: buys pay, sells receive
    pub fn cash_flow(&self) -> i64 {
        -self.price * self.quantity
    }
}

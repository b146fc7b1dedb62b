use serde::{Deserialize, Serialize};

use crate::values::{Price, Quantity};

/// One resting price level: price and (unsigned) resting volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub price: Price,
    pub quantity: Quantity,
}

impl Level {
    pub fn new(price: Price, quantity: Quantity) -> Self {
        Self { price, quantity }
    }
}

/// A depth slot recorded in history: either a real level or an explicit gap
/// when the book had fewer levels than the slot's rank that tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookLevel {
    Present(Level),
    Absent,
}

impl BookLevel {
    pub fn present(price: Price, quantity: Quantity) -> Self {
        BookLevel::Present(Level::new(price, quantity))
    }

    pub fn is_present(&self) -> bool {
        matches!(self, BookLevel::Present(_))
    }

    pub fn price(&self) -> Option<Price> {
        match self {
            BookLevel::Present(level) => Some(level.price),
            BookLevel::Absent => None,
        }
    }

    pub fn quantity(&self) -> Option<Quantity> {
        match self {
            BookLevel::Present(level) => Some(level.quantity),
            BookLevel::Absent => None,
        }
    }
}

impl From<Level> for BookLevel {
    fn from(level: Level) -> Self {
        BookLevel::Present(level)
    }
}

impl From<Option<Level>> for BookLevel {
    fn from(level: Option<Level>) -> Self {
        level.map_or(BookLevel::Absent, BookLevel::Present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_has_no_fields() {
        assert!(!BookLevel::Absent.is_present());
        assert_eq!(BookLevel::Absent.price(), None);
        assert_eq!(BookLevel::Absent.quantity(), None);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(BookLevel::from(None), BookLevel::Absent);
        let level = BookLevel::from(Some(Level::new(10, 5)));
        assert_eq!(level.price(), Some(10));
        assert_eq!(level.quantity(), Some(5));
    }
}

//! Market State
//!
//! What an agent observes when it is asked to act.

use rust_decimal::Decimal;

/// Snapshot of the market handed to an agent at decision time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketObservation {
    /// Current unit price, including the impact of earlier trades this round
    pub price: Decimal,
    /// Zero-based round index
    pub round: u64,
    /// Units the market can still sell
    pub stock: u64,
}

impl MarketObservation {
    pub fn new(price: Decimal, round: u64, stock: u64) -> Self {
        Self {
            price,
            round,
            stock,
        }
    }

    /// Relative change from `previous` to the current price
    pub fn change_from(&self, previous: Decimal) -> Option<Decimal> {
        if previous <= Decimal::ZERO {
            return None;
        }
        Some((self.price - previous) / previous)
    }
}

//! Bounded price history
//!
//! Keeps the most recent `capacity` observed prices plus the lowest and
//! highest price ever observed (the extrema are not bounded by the window).

use rust_decimal::Decimal;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct PriceWindow {
    capacity: usize,
    prices: VecDeque<Decimal>,
    lowest: Option<Decimal>,
    highest: Option<Decimal>,
}

impl PriceWindow {
    /// Create an empty window. A zero capacity is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            prices: VecDeque::with_capacity(capacity + 1),
            lowest: None,
            highest: None,
        }
    }

    /// Record a price, dropping the oldest one once the window is full
    pub fn push(&mut self, price: Decimal) {
        self.prices.push_back(price);
        if self.prices.len() > self.capacity {
            self.prices.pop_front();
        }

        if self.lowest.is_none_or(|low| price < low) {
            self.lowest = Some(price);
        }
        if self.highest.is_none_or(|high| price > high) {
            self.highest = Some(price);
        }
    }

    /// Arithmetic mean of the prices currently in the window
    pub fn mean(&self) -> Option<Decimal> {
        if self.prices.is_empty() {
            return None;
        }
        let sum: Decimal = self.prices.iter().sum();
        Some(sum / Decimal::from(self.prices.len()))
    }

    pub fn lowest(&self) -> Option<Decimal> {
        self.lowest
    }

    pub fn highest(&self) -> Option<Decimal> {
        self.highest
    }
}

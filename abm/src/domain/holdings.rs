//! Agent holdings
//!
//! Capital and inventory owned by a single agent. Both are non-negative by
//! construction; every mutation goes through a validated path.

use super::error::{SimError, SimResult};
use rust_decimal::Decimal;
use serde::Serialize;

/// Liquid funds and units of the good held by one agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holdings {
    capital: Decimal,
    inventory: u64,
}

impl Holdings {
    /// Create holdings, rejecting negative capital or inventory
    pub fn new(capital: Decimal, inventory: i64) -> SimResult<Self> {
        if capital < Decimal::ZERO {
            return Err(SimError::InvalidCapital(capital));
        }
        let inventory = u64::try_from(inventory).map_err(|_| SimError::InvalidInventory(inventory))?;

        Ok(Self { capital, inventory })
    }

    pub fn capital(&self) -> Decimal {
        self.capital
    }

    pub fn inventory(&self) -> u64 {
        self.inventory
    }

    /// Replace the capital, failing on a negative value
    pub fn set_capital(&mut self, capital: Decimal) -> SimResult<()> {
        if capital < Decimal::ZERO {
            return Err(SimError::InvalidCapital(capital));
        }
        self.capital = capital;
        Ok(())
    }

    /// Replace the inventory, failing on a negative value
    pub fn set_inventory(&mut self, inventory: i64) -> SimResult<()> {
        self.inventory =
            u64::try_from(inventory).map_err(|_| SimError::InvalidInventory(inventory))?;
        Ok(())
    }

    pub fn can_afford(&self, price: Decimal) -> bool {
        self.capital >= price
    }

    pub fn has_inventory(&self) -> bool {
        self.inventory > 0
    }

    /// Pay `price` for one unit. Returns false and leaves both fields
    /// untouched when capital is short.
    pub(crate) fn debit_for_buy(&mut self, price: Decimal) -> bool {
        if !self.can_afford(price) {
            return false;
        }
        self.capital -= price;
        self.inventory += 1;
        true
    }

    /// Receive `price` for one unit. Returns false when nothing is held.
    pub(crate) fn credit_for_sell(&mut self, price: Decimal) -> bool {
        if self.inventory == 0 {
            return false;
        }
        self.capital += price;
        self.inventory -= 1;
        true
    }
}

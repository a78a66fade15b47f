//! Simulation errors
//!
//! Failed trades are not errors: an agent that cannot afford a unit, has
//! nothing to sell, or finds the market out of stock simply reports
//! `success = false`. Everything here aborts the run.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("Capital cannot be negative: {0}")]
    InvalidCapital(Decimal),

    #[error("Inventory cannot be negative: {0}")]
    InvalidInventory(i64),

    #[error("Market price must be positive: {0}")]
    InvalidPrice(Decimal),

    #[error("Market stock cannot be negative: {0}")]
    InvalidStock(i64),

    #[error("Round count cannot be negative: {0}")]
    InvalidRoundCount(i64),

    #[error("Trade price must be positive: {0}")]
    InvalidTradePrice(Decimal),

    #[error("No decision policy attached to agent {0}")]
    MissingPolicy(usize),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Unknown agent kind: {0}")]
    UnknownAgentKind(String),

    #[error("Price left the representable decimal range")]
    PriceOutOfRange,

    #[error("Simulation already finished after {0} rounds")]
    Finished(u64),

    #[error("Round report rejected: {0}")]
    Report(String),
}

pub type SimResult<T> = std::result::Result<T, SimError>;

/// Check that a probability parameter lies in `[0, 1]`.
pub(crate) fn check_probability(name: &'static str, value: f64) -> SimResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SimError::InvalidParameter {
            name,
            reason: format!("probability must be within [0, 1], got {value}"),
        });
    }
    Ok(())
}

/// Check that a relative threshold lies in `[0, 1)`.
pub(crate) fn check_fraction(name: &'static str, value: Decimal) -> SimResult<()> {
    if value < Decimal::ZERO || value >= Decimal::ONE {
        return Err(SimError::InvalidParameter {
            name,
            reason: format!("fraction must be within [0, 1), got {value}"),
        });
    }
    Ok(())
}

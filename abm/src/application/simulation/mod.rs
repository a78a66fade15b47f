//! Simulation Framework
//!
//! Provides the round loop and the audit trail for market simulations.
//!
//! # Architecture
//!
//! The market engine coordinates, every round:
//! - A fresh random ordering of the agents
//! - Agent decision making and execution (decide_and_act)
//! - Price impact and stock updates after each successful trade
//! - Round records, flushed to a [`RoundReporter`] once the round completes

mod record;
mod reporter;
mod runner;

pub use record::{KindTotals, RoundRecord, RoundReport, SimulationSummary};
pub use reporter::{NullReporter, RoundReporter};
pub use runner::{BUY_IMPACT, Market, MarketConfig, MarketPhase, SELL_IMPACT};

//! Round Records
//!
//! Audit trail of every agent interaction, grouped per round.

use crate::application::agents::{Action, AgentId, AgentKind};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// One agent's action and its effect, captured right after it executed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundRecord {
    /// Zero-based round index
    pub round: u64,
    /// One-based position of the interaction within the round
    pub interaction: usize,
    pub agent_id: AgentId,
    pub kind: AgentKind,
    /// Agent capital after the action
    pub capital: Decimal,
    /// Agent inventory after the action
    pub inventory: u64,
    pub action: Action,
    pub success: bool,
    /// Market stock after the action
    pub stock: u64,
    /// Market price after the action
    pub price: Decimal,
}

/// All interactions of one round, in execution order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    pub round: u64,
    pub records: Vec<RoundRecord>,
}

impl RoundReport {
    /// Number of interactions that moved the market
    pub fn fills(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.success && r.action.is_trade())
            .count()
    }

    /// Number of buy/sell attempts that did not execute
    pub fn rejections(&self) -> usize {
        self.records.iter().filter(|r| !r.success).count()
    }
}

/// Totals for one agent kind at the end of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KindTotals {
    pub agents: usize,
    pub capital: Decimal,
    pub inventory: u64,
}

/// Simulation metrics aggregated over the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationSummary {
    pub rounds_completed: u64,
    pub initial_price: Decimal,
    pub final_price: Decimal,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub final_stock: u64,
    /// Successful buys and sells
    pub total_fills: u64,
    /// Buy/sell attempts that did not execute
    pub total_rejections: u64,
    pub by_kind: BTreeMap<AgentKind, KindTotals>,
}

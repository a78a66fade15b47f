//! Agent Actions
//!
//! Actions an agent can choose each round, and the outcome of executing one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Actions an agent can take in a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Buy one unit from the market at the current price
    Buy,
    /// Sell one unit back to the market at the current price
    Sell,
    /// Sit the round out
    DoNothing,
}

impl Action {
    /// All actions, in the order used by the random policy
    pub const ALL: [Action; 3] = [Action::Buy, Action::Sell, Action::DoNothing];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Buy => "buy",
            Action::Sell => "sell",
            Action::DoNothing => "do_nothing",
        }
    }

    /// Whether this action can move the market if it succeeds
    pub fn is_trade(&self) -> bool {
        !matches!(self, Action::DoNothing)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chosen action and whether it executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub action: Action,
    pub success: bool,
}

impl ActionOutcome {
    pub fn new(action: Action, success: bool) -> Self {
        Self { action, success }
    }

    /// A successful buy
    pub fn is_fill_buy(&self) -> bool {
        self.success && self.action == Action::Buy
    }

    /// A successful sell
    pub fn is_fill_sell(&self) -> bool {
        self.success && self.action == Action::Sell
    }
}

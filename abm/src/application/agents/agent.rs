//! Agent
//!
//! A market participant: validated holdings plus the policy that decides
//! for it. The agent executes whatever its policy chooses against its own
//! holdings; it never touches the market price or stock.

use super::{Action, ActionOutcome, AgentKind, DecisionPolicy, MarketObservation, Policy};
use crate::domain::{Holdings, SimError, SimResult};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unique identifier for an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub usize);

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "agent-{}", self.0)
    }
}

/// A trading agent
#[derive(Debug, Clone)]
pub struct Agent {
    id: AgentId,
    holdings: Holdings,
    policy: Policy,
}

impl Agent {
    pub fn new(id: AgentId, holdings: Holdings, policy: impl Into<Policy>) -> Self {
        Self {
            id,
            holdings,
            policy: policy.into(),
        }
    }

    pub fn builder(id: AgentId) -> AgentBuilder {
        AgentBuilder::new(id)
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn kind(&self) -> AgentKind {
        self.policy.kind()
    }

    pub fn holdings(&self) -> &Holdings {
        &self.holdings
    }

    pub fn capital(&self) -> Decimal {
        self.holdings.capital()
    }

    pub fn inventory(&self) -> u64 {
        self.holdings.inventory()
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Buy one unit at `price` if affordable and the market has stock
    pub fn attempt_buy(&mut self, price: Decimal, market_stock: u64) -> SimResult<bool> {
        if price <= Decimal::ZERO {
            return Err(SimError::InvalidTradePrice(price));
        }
        if market_stock == 0 {
            return Ok(false);
        }
        Ok(self.holdings.debit_for_buy(price))
    }

    /// Sell one unit at `price` if any is held
    pub fn attempt_sell(&mut self, price: Decimal) -> SimResult<bool> {
        if price <= Decimal::ZERO {
            return Err(SimError::InvalidTradePrice(price));
        }
        Ok(self.holdings.credit_for_sell(price))
    }

    /// Ask the policy for an action and execute it
    pub fn decide_and_act<R: Rng + ?Sized>(
        &mut self,
        observation: &MarketObservation,
        rng: &mut R,
    ) -> SimResult<ActionOutcome> {
        let action = self.policy.decide(&self.holdings, observation, rng);

        let success = match action {
            Action::Buy => self.attempt_buy(observation.price, observation.stock)?,
            Action::Sell => self.attempt_sell(observation.price)?,
            Action::DoNothing => true,
        };

        Ok(ActionOutcome::new(action, success))
    }
}

/// Step-by-step agent construction
///
/// Setup code assembles agents from configuration; a missing policy is a
/// construction defect and is reported as [`SimError::MissingPolicy`].
#[derive(Debug, Clone)]
pub struct AgentBuilder {
    id: AgentId,
    capital: Decimal,
    inventory: i64,
    policy: Option<Policy>,
}

impl AgentBuilder {
    pub fn new(id: AgentId) -> Self {
        Self {
            id,
            capital: Decimal::ZERO,
            inventory: 0,
            policy: None,
        }
    }

    pub fn capital(mut self, capital: Decimal) -> Self {
        self.capital = capital;
        self
    }

    pub fn inventory(mut self, inventory: i64) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn policy(mut self, policy: impl Into<Policy>) -> Self {
        self.policy = Some(policy.into());
        self
    }

    pub fn build(self) -> SimResult<Agent> {
        let holdings = Holdings::new(self.capital, self.inventory)?;
        let policy = self.policy.ok_or(SimError::MissingPolicy(self.id.0))?;
        Ok(Agent::new(self.id, holdings, policy))
    }
}

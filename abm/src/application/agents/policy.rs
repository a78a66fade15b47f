//! Decision Policies
//!
//! The capability every agent type implements, and the closed set of
//! policy variants the engine dispatches through.

use super::contrarian::Contrarian;
use super::momentum::TrendFollower;
use super::noise::RandomPolicy;
use super::optimizing::OptimizingPolicy;
use super::{Action, MarketObservation};
use crate::domain::{Holdings, SimError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Agent type tag carried into round records
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Random,
    TrendFollower,
    Contrarian,
    #[serde(alias = "custom")]
    Optimizing,
}

impl AgentKind {
    pub const ALL: [AgentKind; 4] = [
        AgentKind::Random,
        AgentKind::TrendFollower,
        AgentKind::Contrarian,
        AgentKind::Optimizing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Random => "random",
            AgentKind::TrendFollower => "trend_follower",
            AgentKind::Contrarian => "contrarian",
            AgentKind::Optimizing => "optimizing",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(AgentKind::Random),
            "trend_follower" | "trend-follower" => Ok(AgentKind::TrendFollower),
            "contrarian" => Ok(AgentKind::Contrarian),
            "optimizing" | "custom" => Ok(AgentKind::Optimizing),
            other => Err(SimError::UnknownAgentKind(other.to_string())),
        }
    }
}

/// Maps what an agent holds and sees to an action
///
/// Implementations own their private history. Affordability checks made
/// here are advisory: the agent re-validates when it executes the action.
pub trait DecisionPolicy {
    /// Choose this round's action
    fn decide<R: Rng + ?Sized>(
        &mut self,
        holdings: &Holdings,
        observation: &MarketObservation,
        rng: &mut R,
    ) -> Action;

    /// Agent type name (for records and reports)
    fn kind(&self) -> AgentKind;
}

/// Closed set of policy variants
#[derive(Debug, Clone)]
pub enum Policy {
    Random(RandomPolicy),
    TrendFollower(TrendFollower),
    Contrarian(Contrarian),
    Optimizing(OptimizingPolicy),
}

impl DecisionPolicy for Policy {
    fn decide<R: Rng + ?Sized>(
        &mut self,
        holdings: &Holdings,
        observation: &MarketObservation,
        rng: &mut R,
    ) -> Action {
        match self {
            Policy::Random(p) => p.decide(holdings, observation, rng),
            Policy::TrendFollower(p) => p.decide(holdings, observation, rng),
            Policy::Contrarian(p) => p.decide(holdings, observation, rng),
            Policy::Optimizing(p) => p.decide(holdings, observation, rng),
        }
    }

    fn kind(&self) -> AgentKind {
        match self {
            Policy::Random(p) => p.kind(),
            Policy::TrendFollower(p) => p.kind(),
            Policy::Contrarian(p) => p.kind(),
            Policy::Optimizing(p) => p.kind(),
        }
    }
}

impl From<RandomPolicy> for Policy {
    fn from(policy: RandomPolicy) -> Self {
        Policy::Random(policy)
    }
}

impl From<TrendFollower> for Policy {
    fn from(policy: TrendFollower) -> Self {
        Policy::TrendFollower(policy)
    }
}

impl From<Contrarian> for Policy {
    fn from(policy: Contrarian) -> Self {
        Policy::Contrarian(policy)
    }
}

impl From<OptimizingPolicy> for Policy {
    fn from(policy: OptimizingPolicy) -> Self {
        Policy::Optimizing(policy)
    }
}

//! Configuration loading for the simulation driver
//!
//! Supports JSON configuration files for:
//! - Market parameters (initial price, rounds, stock, seed)
//! - The agent population and starting holdings
//! - Per-policy parameters
//! - Trace output

use crate::error::ConfigError;
use abm::{
    AgentKind, ContrarianConfig, Holdings, MarketConfig, OptimizingConfig, RandomPolicy,
    RandomWeights, TrendConfig,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Starting unit price
    pub initial_price: Decimal,
    /// Number of rounds to simulate
    pub rounds: i64,
    /// Units the market holds at the start
    pub stock: i64,
    /// Random seed (entropy when absent)
    pub seed: Option<u64>,
    /// Capital every agent starts with
    pub starting_capital: Decimal,
    /// Units every agent starts with
    pub starting_inventory: i64,
    /// How many agents of each kind
    pub population: PopulationConfig,
    /// Policy parameters shared by all agents of a kind
    pub policies: PolicyParams,
    /// Trace output
    pub report: ReportConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_price: Decimal::from(200),
            rounds: 1000,
            stock: 100_000,
            seed: None,
            starting_capital: Decimal::from(1000),
            starting_inventory: 0,
            population: PopulationConfig::default(),
            policies: PolicyParams::default(),
            report: ReportConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            source: e,
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Market parameters for the engine
    pub fn market_config(&self) -> MarketConfig {
        MarketConfig {
            initial_price: self.initial_price,
            rounds: self.rounds,
            stock: self.stock,
            seed: self.seed,
        }
    }

    /// Check every value before anything is built
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_price <= Decimal::ZERO {
            return Err(abm::SimError::InvalidPrice(self.initial_price).into());
        }
        if self.rounds < 0 {
            return Err(abm::SimError::InvalidRoundCount(self.rounds).into());
        }
        if self.stock < 0 {
            return Err(abm::SimError::InvalidStock(self.stock).into());
        }
        Holdings::new(self.starting_capital, self.starting_inventory)?;
        self.policies.validate()?;
        Ok(())
    }
}

/// Number of agents per kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub random: usize,
    pub trend_follower: usize,
    pub contrarian: usize,
    #[serde(alias = "custom")]
    pub optimizing: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            random: 51,
            trend_follower: 24,
            contrarian: 24,
            optimizing: 1,
        }
    }
}

impl PopulationConfig {
    pub fn count(&self, kind: AgentKind) -> usize {
        match kind {
            AgentKind::Random => self.random,
            AgentKind::TrendFollower => self.trend_follower,
            AgentKind::Contrarian => self.contrarian,
            AgentKind::Optimizing => self.optimizing,
        }
    }

    pub fn set(&mut self, kind: AgentKind, count: usize) {
        match kind {
            AgentKind::Random => self.random = count,
            AgentKind::TrendFollower => self.trend_follower = count,
            AgentKind::Contrarian => self.contrarian = count,
            AgentKind::Optimizing => self.optimizing = count,
        }
    }

    pub fn total(&self) -> usize {
        AgentKind::ALL.iter().map(|k| self.count(*k)).sum()
    }

    /// Apply `kind=count` pairs separated by commas, e.g. `random=10,custom=2`
    pub fn apply_overrides(&mut self, overrides: &str) -> Result<(), ConfigError> {
        for pair in overrides.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (kind, count) = pair.split_once('=').ok_or_else(|| {
                ConfigError::Argument(format!("expected kind=count, got '{pair}'"))
            })?;
            let kind: AgentKind = kind.parse()?;
            let count: usize = count.trim().parse().map_err(|_| {
                ConfigError::Argument(format!("invalid agent count '{}'", count.trim()))
            })?;
            self.set(kind, count);
        }
        Ok(())
    }
}

/// Parameters for each policy kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyParams {
    pub random: RandomWeights,
    pub trend_follower: TrendConfig,
    pub contrarian: ContrarianConfig,
    #[serde(alias = "custom")]
    pub optimizing: OptimizingConfig,
}

impl PolicyParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        RandomPolicy::new(self.random.clone())?;
        self.trend_follower.validate()?;
        self.contrarian.validate()?;
        self.optimizing.validate()?;
        Ok(())
    }
}

/// Where the round trace goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Log every round through the `abm::trace` target
    pub verbose: bool,
    /// Also write the trace to this file (truncated first)
    pub trace_file: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            verbose: true,
            trace_file: None,
        }
    }
}

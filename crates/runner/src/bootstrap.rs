//! Bootstrap - Population setup
//!
//! Turns a [`SimulationConfig`] into a ready-to-run [`Market`]:
//! - Building one policy per agent from the shared policy parameters
//! - Allocating starting capital and inventory
//! - Assigning sequential agent ids, grouped by kind

use crate::config::{PolicyParams, SimulationConfig};
use crate::error::RunnerResult;
use abm::{
    Agent, AgentId, AgentKind, Contrarian, Market, OptimizingPolicy, Policy, RandomPolicy,
    SimError, SimResult, TrendFollower,
};
use rust_decimal::Decimal;

/// Builds agents of a given kind
pub struct AgentFactory;

impl AgentFactory {
    /// Create one agent with its own policy state
    ///
    /// `total_rounds` is only used by the optimizing policy, which needs to
    /// know when the run ends so it can liquidate in time.
    pub fn create(
        kind: AgentKind,
        id: AgentId,
        capital: Decimal,
        inventory: i64,
        params: &PolicyParams,
        total_rounds: u64,
    ) -> SimResult<Agent> {
        let policy: Policy = match kind {
            AgentKind::Random => RandomPolicy::new(params.random.clone())?.into(),
            AgentKind::TrendFollower => TrendFollower::new(params.trend_follower.clone())?.into(),
            AgentKind::Contrarian => Contrarian::new(params.contrarian.clone())?.into(),
            AgentKind::Optimizing => {
                OptimizingPolicy::new(params.optimizing.clone(), total_rounds)?.into()
            }
        };

        Agent::builder(id)
            .capital(capital)
            .inventory(inventory)
            .policy(policy)
            .build()
    }
}

/// Simulation bootstrap - sets up the market and its agents
pub struct SimulationBootstrap;

impl SimulationBootstrap {
    /// Build every agent the config asks for
    ///
    /// Agents are created in kind order (random, trend followers,
    /// contrarians, optimizing) with ids starting at zero. Turn order is
    /// shuffled by the market each round, so this order only fixes ids.
    pub fn build_population(config: &SimulationConfig) -> SimResult<Vec<Agent>> {
        let total_rounds = u64::try_from(config.rounds)
            .map_err(|_| SimError::InvalidRoundCount(config.rounds))?;

        let mut agents = Vec::with_capacity(config.population.total());
        for kind in AgentKind::ALL {
            let count = config.population.count(kind);
            if count == 0 {
                continue;
            }

            log::info!(
                "Creating {} {} agent(s) with ${} capital and {} unit(s)",
                count,
                kind,
                config.starting_capital,
                config.starting_inventory
            );

            for _ in 0..count {
                let id = AgentId(agents.len());
                agents.push(AgentFactory::create(
                    kind,
                    id,
                    config.starting_capital,
                    config.starting_inventory,
                    &config.policies,
                    total_rounds,
                )?);
            }
        }

        Ok(agents)
    }

    /// Validate the config and build the market with its population
    pub fn from_config(config: &SimulationConfig) -> RunnerResult<Market> {
        config.validate()?;

        let agents = Self::build_population(config)?;
        let market = Market::new(config.market_config())?.with_agents(agents);

        log::info!(
            "Market ready: {} agents, price ${}, stock {}, {} rounds",
            market.agents().len(),
            market.price(),
            market.stock(),
            market.rounds()
        );

        Ok(market)
    }
}

//! Market Engine
//!
//! The core event loop: each round, shuffle the agents, let each one act in
//! turn, and move price and stock after every successful trade so later
//! agents in the round see the impact of earlier ones.

use super::{KindTotals, RoundRecord, RoundReport, RoundReporter, SimulationSummary};
use crate::application::agents::{ActionOutcome, Agent, MarketObservation};
use crate::domain::{SimError, SimResult};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Price multiplier after a successful buy (+0.5%)
pub const BUY_IMPACT: Decimal = Decimal::from_parts(1005, 0, 0, false, 3);

/// Price multiplier after a successful sell (-0.5%)
pub const SELL_IMPACT: Decimal = Decimal::from_parts(995, 0, 0, false, 3);

/// Configuration for the market
#[derive(Debug, Clone, PartialEq)]
pub struct MarketConfig {
    /// Starting unit price
    pub initial_price: Decimal,
    /// Number of rounds to simulate
    pub rounds: i64,
    /// Units the market holds at the start
    pub stock: i64,
    /// Random seed for determinism
    pub seed: Option<u64>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            initial_price: Decimal::from(200),
            rounds: 1000,
            stock: 100_000,
            seed: None,
        }
    }
}

/// Lifecycle of a market
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketPhase {
    /// Rounds left to run
    Running,
    /// All configured rounds completed
    Finished,
}

/// Price and stock, the only state shared between agents
#[derive(Debug, Clone)]
struct Clearing {
    price: Decimal,
    stock: u64,
    min_price: Decimal,
    max_price: Decimal,
}

impl Clearing {
    fn new(price: Decimal, stock: u64) -> Self {
        Self {
            price,
            stock,
            min_price: price,
            max_price: price,
        }
    }

    /// Apply the price impact of one executed action
    fn apply(&mut self, outcome: &ActionOutcome) -> SimResult<()> {
        let (price, stock) = if outcome.is_fill_buy() {
            // The agent only fills a buy when stock > 0
            (
                self.price.checked_mul(BUY_IMPACT),
                self.stock.checked_sub(1),
            )
        } else if outcome.is_fill_sell() {
            (
                self.price.checked_mul(SELL_IMPACT),
                self.stock.checked_add(1),
            )
        } else {
            return Ok(());
        };

        let price = price
            .filter(|p| *p > Decimal::ZERO)
            .ok_or(SimError::PriceOutOfRange)?;
        let stock = stock.ok_or(SimError::InvalidStock(-1))?;

        self.price = price;
        self.stock = stock;
        self.min_price = self.min_price.min(price);
        self.max_price = self.max_price.max(price);
        Ok(())
    }
}

/// The market engine
pub struct Market {
    rounds: u64,
    round: u64,
    initial_price: Decimal,
    clearing: Clearing,
    agents: Vec<Agent>,
    history: Vec<RoundRecord>,
    rng: StdRng,
    total_fills: u64,
    total_rejections: u64,
}

impl Market {
    /// Create a market, rejecting a non-positive price or negative counts
    pub fn new(config: MarketConfig) -> SimResult<Self> {
        if config.initial_price <= Decimal::ZERO {
            return Err(SimError::InvalidPrice(config.initial_price));
        }
        let rounds =
            u64::try_from(config.rounds).map_err(|_| SimError::InvalidRoundCount(config.rounds))?;
        let stock = u64::try_from(config.stock).map_err(|_| SimError::InvalidStock(config.stock))?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            rounds,
            round: 0,
            initial_price: config.initial_price,
            clearing: Clearing::new(config.initial_price, stock),
            agents: Vec::new(),
            history: Vec::new(),
            rng,
            total_fills: 0,
            total_rejections: 0,
        })
    }

    /// Add an agent to the market
    pub fn add_agent(&mut self, agent: Agent) {
        self.agents.push(agent);
    }

    pub fn with_agents(mut self, agents: impl IntoIterator<Item = Agent>) -> Self {
        self.agents.extend(agents);
        self
    }

    pub fn price(&self) -> Decimal {
        self.clearing.price
    }

    pub fn stock(&self) -> u64 {
        self.clearing.stock
    }

    /// Configured number of rounds
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Rounds completed so far
    pub fn current_round(&self) -> u64 {
        self.round
    }

    /// Agents in the order of the most recent round
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Every interaction so far, in chronological order
    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn phase(&self) -> MarketPhase {
        if self.round >= self.rounds {
            MarketPhase::Finished
        } else {
            MarketPhase::Running
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase() == MarketPhase::Finished
    }

    /// Units held by agents plus units left in the market
    pub fn total_units(&self) -> u64 {
        self.agents.iter().map(Agent::inventory).sum::<u64>() + self.clearing.stock
    }

    /// Run a single round
    pub fn run_round(&mut self) -> SimResult<RoundReport> {
        if self.is_finished() {
            return Err(SimError::Finished(self.rounds));
        }
        let round = self.round;

        // Fresh order every round so nobody keeps a first-mover edge
        self.agents.shuffle(&mut self.rng);

        let mut records = Vec::with_capacity(self.agents.len());
        for (idx, agent) in self.agents.iter_mut().enumerate() {
            let observation =
                MarketObservation::new(self.clearing.price, round, self.clearing.stock);
            let outcome = agent.decide_and_act(&observation, &mut self.rng)?;
            self.clearing.apply(&outcome)?;

            if outcome.action.is_trade() {
                if outcome.success {
                    self.total_fills += 1;
                } else {
                    self.total_rejections += 1;
                }
            }

            let record = RoundRecord {
                round,
                interaction: idx + 1,
                agent_id: agent.id(),
                kind: agent.kind(),
                capital: agent.capital(),
                inventory: agent.inventory(),
                action: outcome.action,
                success: outcome.success,
                stock: self.clearing.stock,
                price: self.clearing.price,
            };
            log::trace!(
                "round {} #{} {} ({}): {} success={} price={} stock={}",
                round,
                record.interaction,
                record.agent_id,
                record.kind,
                record.action,
                record.success,
                record.price,
                record.stock
            );
            records.push(record);
        }

        self.history.extend(records.iter().cloned());
        self.round += 1;

        let report = RoundReport { round, records };
        log::debug!(
            "Round {}: price={:.4}, stock={}, fills={}, rejections={}",
            round + 1,
            self.clearing.price,
            self.clearing.stock,
            report.fills(),
            report.rejections()
        );

        Ok(report)
    }

    /// Run every remaining round, handing each one to `reporter` as it completes
    pub fn run(&mut self, reporter: &mut dyn RoundReporter) -> SimResult<SimulationSummary> {
        log::info!(
            "Starting simulation: {} agents, {} rounds, price={}, stock={}",
            self.agents.len(),
            self.rounds - self.round,
            self.clearing.price,
            self.clearing.stock
        );

        while !self.is_finished() {
            let report = self.run_round()?;
            reporter.report(&report)?;
        }

        let summary = self.summary();
        log::info!(
            "Simulation finished after {} rounds: price={:.2}, stock={}, fills={}",
            summary.rounds_completed,
            summary.final_price.round_dp(2),
            summary.final_stock,
            summary.total_fills
        );
        Ok(summary)
    }

    /// Aggregate metrics for the rounds run so far
    pub fn summary(&self) -> SimulationSummary {
        let mut by_kind: BTreeMap<_, KindTotals> = BTreeMap::new();
        for agent in &self.agents {
            let totals = by_kind.entry(agent.kind()).or_default();
            totals.agents += 1;
            totals.capital += agent.capital();
            totals.inventory += agent.inventory();
        }

        SimulationSummary {
            rounds_completed: self.round,
            initial_price: self.initial_price,
            final_price: self.clearing.price,
            min_price: self.clearing.min_price,
            max_price: self.clearing.max_price,
            final_stock: self.clearing.stock,
            total_fills: self.total_fills,
            total_rejections: self.total_rejections,
            by_kind,
        }
    }
}

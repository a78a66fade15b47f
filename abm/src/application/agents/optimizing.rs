//! Optimizing Policy
//!
//! Buys dips, sells rallies, and unwinds its whole inventory before the run
//! ends.
//!
//! Strategy:
//! - Track the last N observed prices and their mean
//! - Once the remaining rounds no longer exceed inventory + safety margin,
//!   sell every round until flat (one unit per round is all an agent gets)
//! - Otherwise buy when price <= mean * (1 - buy_threshold) and affordable,
//!   sell when price >= mean * (1 + sell_threshold) and holding inventory

use super::{Action, AgentKind, DecisionPolicy, MarketObservation};
use crate::domain::{Holdings, PriceWindow, SimError, SimResult, check_fraction};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Configuration for the optimizing policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizingConfig {
    /// Number of recent prices in the moving average
    pub window: usize,
    /// Discount below the average required to buy
    pub buy_threshold: Decimal,
    /// Premium above the average required to sell
    pub sell_threshold: Decimal,
    /// Extra rounds kept in reserve when liquidating
    pub safety_margin: u64,
}

impl Default for OptimizingConfig {
    fn default() -> Self {
        Self {
            window: 10,
            buy_threshold: Decimal::new(10, 2),  // 10%
            sell_threshold: Decimal::new(5, 2), // 5%
            safety_margin: 1,
        }
    }
}

impl OptimizingConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.window == 0 {
            return Err(SimError::InvalidParameter {
                name: "optimizing.window",
                reason: "window must hold at least one price".to_string(),
            });
        }
        check_fraction("optimizing.buy_threshold", self.buy_threshold)?;
        check_fraction("optimizing.sell_threshold", self.sell_threshold)?;
        Ok(())
    }
}

/// Optimizing policy
#[derive(Debug, Clone)]
pub struct OptimizingPolicy {
    config: OptimizingConfig,
    total_rounds: u64,
    decisions: u64,
    prices: PriceWindow,
}

impl OptimizingPolicy {
    /// Create a policy that must be flat after `total_rounds` decisions
    pub fn new(config: OptimizingConfig, total_rounds: u64) -> SimResult<Self> {
        config.validate()?;
        let prices = PriceWindow::new(config.window);
        Ok(Self {
            config,
            total_rounds,
            decisions: 0,
            prices,
        })
    }

    pub fn with_defaults(total_rounds: u64) -> Self {
        let config = OptimizingConfig::default();
        let prices = PriceWindow::new(config.window);
        Self {
            config,
            total_rounds,
            decisions: 0,
            prices,
        }
    }

    pub fn config(&self) -> &OptimizingConfig {
        &self.config
    }

    pub fn total_rounds(&self) -> u64 {
        self.total_rounds
    }

    /// Decisions left in the budget, including the next one
    pub fn rounds_remaining(&self) -> u64 {
        self.total_rounds.saturating_sub(self.decisions)
    }

    pub fn average_price(&self) -> Option<Decimal> {
        self.prices.mean()
    }

    pub fn lowest_price(&self) -> Option<Decimal> {
        self.prices.lowest()
    }

    pub fn highest_price(&self) -> Option<Decimal> {
        self.prices.highest()
    }

    /// Whether the policy must unwind given the current inventory
    pub fn is_liquidating(&self, inventory: u64) -> bool {
        self.rounds_remaining() <= inventory.saturating_add(self.config.safety_margin)
    }
}

impl DecisionPolicy for OptimizingPolicy {
    fn decide<R: Rng + ?Sized>(
        &mut self,
        holdings: &Holdings,
        observation: &MarketObservation,
        _rng: &mut R,
    ) -> Action {
        let liquidating = self.is_liquidating(holdings.inventory());
        self.decisions += 1;

        // History is updated whether or not the eventual trade fills
        let price = observation.price;
        self.prices.push(price);
        let average = self.prices.mean().unwrap_or(price);

        if liquidating {
            return if holdings.has_inventory() {
                Action::Sell
            } else {
                Action::DoNothing
            };
        }

        let buy_below = average * (Decimal::ONE - self.config.buy_threshold);
        let sell_above = average * (Decimal::ONE + self.config.sell_threshold);

        if price <= buy_below && holdings.can_afford(price) {
            Action::Buy
        } else if price >= sell_above && holdings.has_inventory() {
            Action::Sell
        } else {
            Action::DoNothing
        }
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Optimizing
    }
}

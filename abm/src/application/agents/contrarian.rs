//! Contrarian Policy
//!
//! Bets against the last move.
//! Role: Dampens rallies, buys into weakness.
//!
//! Mirror image of the trend follower: a rise of at least the trigger is a
//! sell signal taken with the strong probability, while a fall, a flat
//! move, or a first observation is a buy signal taken with the weak one.

use super::{Action, AgentKind, DecisionPolicy, MarketObservation};
use crate::domain::{Holdings, SimResult, check_fraction, check_probability};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Configuration for the contrarian
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrarianConfig {
    /// Relative rise since last round that counts as overextended
    pub rise_trigger: Decimal,
    /// Probability of selling into a rise (otherwise do nothing)
    pub sell_probability: f64,
    /// Probability of buying when the price did not rise (otherwise do nothing)
    pub buy_probability: f64,
}

impl Default for ContrarianConfig {
    fn default() -> Self {
        Self {
            rise_trigger: Decimal::new(1, 2), // 1%
            sell_probability: 0.75,
            buy_probability: 0.20,
        }
    }
}

impl ContrarianConfig {
    pub fn validate(&self) -> SimResult<()> {
        check_fraction("contrarian.rise_trigger", self.rise_trigger)?;
        check_probability("contrarian.sell_probability", self.sell_probability)?;
        check_probability("contrarian.buy_probability", self.buy_probability)?;
        Ok(())
    }
}

/// Contrarian policy
#[derive(Debug, Clone, Default)]
pub struct Contrarian {
    config: ContrarianConfig,
    previous_price: Option<Decimal>,
}

impl Contrarian {
    pub fn new(config: ContrarianConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            previous_price: None,
        })
    }

    pub fn config(&self) -> &ContrarianConfig {
        &self.config
    }

    pub fn previous_price(&self) -> Option<Decimal> {
        self.previous_price
    }

    fn is_overextended(&self, observation: &MarketObservation) -> bool {
        self.previous_price
            .and_then(|p| observation.change_from(p))
            .is_some_and(|change| change >= self.config.rise_trigger)
    }
}

impl DecisionPolicy for Contrarian {
    fn decide<R: Rng + ?Sized>(
        &mut self,
        _holdings: &Holdings,
        observation: &MarketObservation,
        rng: &mut R,
    ) -> Action {
        let action = if self.is_overextended(observation) {
            if rng.gen_bool(self.config.sell_probability) {
                Action::Sell
            } else {
                Action::DoNothing
            }
        } else if rng.gen_bool(self.config.buy_probability) {
            Action::Buy
        } else {
            Action::DoNothing
        };

        self.previous_price = Some(observation.price);
        action
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Contrarian
    }
}

//! Trend Follower Policy
//!
//! Bets on trend continuation.
//! Role: Amplifies rallies, creates feedback loops.
//!
//! Strategy:
//! - Compare the current price to the one observed last round
//! - No previous observation, or a rise of at least 1%: buy (p=0.75) or wait
//! - Otherwise: sell (p=0.20) or wait

use super::{Action, AgentKind, DecisionPolicy, MarketObservation};
use crate::domain::{Holdings, SimResult, check_fraction, check_probability};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Configuration for the trend follower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Relative rise since last round that counts as an uptrend
    pub rise_trigger: Decimal,
    /// Probability of buying on an uptrend (otherwise do nothing)
    pub buy_probability: f64,
    /// Probability of selling without an uptrend (otherwise do nothing)
    pub sell_probability: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            rise_trigger: Decimal::new(1, 2), // 1%
            buy_probability: 0.75,
            sell_probability: 0.20,
        }
    }
}

impl TrendConfig {
    pub fn validate(&self) -> SimResult<()> {
        check_fraction("trend.rise_trigger", self.rise_trigger)?;
        check_probability("trend.buy_probability", self.buy_probability)?;
        check_probability("trend.sell_probability", self.sell_probability)?;
        Ok(())
    }
}

/// Trend follower policy
#[derive(Debug, Clone, Default)]
pub struct TrendFollower {
    config: TrendConfig,
    previous_price: Option<Decimal>,
}

impl TrendFollower {
    pub fn new(config: TrendConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            previous_price: None,
        })
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// Price seen on the previous decision, if any
    pub fn previous_price(&self) -> Option<Decimal> {
        self.previous_price
    }

    /// True when there is no history yet or the price rose past the trigger
    fn is_uptrend(&self, observation: &MarketObservation) -> bool {
        match self.previous_price.and_then(|p| observation.change_from(p)) {
            None => true,
            Some(change) => change >= self.config.rise_trigger,
        }
    }
}

impl DecisionPolicy for TrendFollower {
    fn decide<R: Rng + ?Sized>(
        &mut self,
        _holdings: &Holdings,
        observation: &MarketObservation,
        rng: &mut R,
    ) -> Action {
        let action = if self.is_uptrend(observation) {
            if rng.gen_bool(self.config.buy_probability) {
                Action::Buy
            } else {
                Action::DoNothing
            }
        } else if rng.gen_bool(self.config.sell_probability) {
            Action::Sell
        } else {
            Action::DoNothing
        };

        self.previous_price = Some(observation.price);
        action
    }

    fn kind(&self) -> AgentKind {
        AgentKind::TrendFollower
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;

    fn holdings() -> Holdings {
        Holdings::new(dec!(1000), 5).unwrap()
    }

    fn obs(price: Decimal) -> MarketObservation {
        MarketObservation::new(price, 1, 100)
    }

    #[test]
    fn test_default_trigger_is_one_percent() {
        assert_eq!(TrendConfig::default().rise_trigger, dec!(0.01));
    }

    #[test]
    fn test_rise_trigger_must_be_fraction() {
        for trigger in [dec!(-0.01), dec!(1), dec!(2.5)] {
            let config = TrendConfig {
                rise_trigger: trigger,
                ..Default::default()
            };
            assert!(matches!(
                TrendFollower::new(config),
                Err(crate::domain::SimError::InvalidParameter {
                    name: "trend.rise_trigger",
                    ..
                })
            ));
        }

        let config = TrendConfig {
            rise_trigger: Decimal::ZERO,
            ..Default::default()
        };
        assert!(TrendFollower::new(config).is_ok());
    }

    #[test]
    fn test_first_round_never_sells() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let mut trader = TrendFollower::default();
            let action = trader.decide(&holdings(), &obs(dec!(100)), &mut rng);
            assert!(matches!(action, Action::Buy | Action::DoNothing));
        }
    }

    #[test]
    fn test_buys_on_uptrend() {
        let config = TrendConfig {
            buy_probability: 1.0,
            ..Default::default()
        };
        let mut trader = TrendFollower::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        trader.decide(&holdings(), &obs(dec!(100)), &mut rng);
        // Exactly 1% counts as a rise
        let action = trader.decide(&holdings(), &obs(dec!(101)), &mut rng);
        assert_eq!(action, Action::Buy);
    }

    #[test]
    fn test_sells_or_waits_without_uptrend() {
        let config = TrendConfig {
            sell_probability: 1.0,
            ..Default::default()
        };
        let mut trader = TrendFollower::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        trader.decide(&holdings(), &obs(dec!(100)), &mut rng);
        // A 0.5% rise is below the trigger
        assert_eq!(
            trader.decide(&holdings(), &obs(dec!(100.5)), &mut rng),
            Action::Sell
        );
        assert_eq!(
            trader.decide(&holdings(), &obs(dec!(90)), &mut rng),
            Action::Sell
        );
    }

    #[test]
    fn test_previous_price_always_updated() {
        let mut trader = TrendFollower::default();
        let mut rng = StdRng::seed_from_u64(3);

        assert!(trader.previous_price().is_none());
        trader.decide(&holdings(), &obs(dec!(100)), &mut rng);
        assert_eq!(trader.previous_price(), Some(dec!(100)));
        trader.decide(&holdings(), &obs(dec!(97)), &mut rng);
        assert_eq!(trader.previous_price(), Some(dec!(97)));
    }

    #[test]
    fn test_rejects_bad_probability() {
        let config = TrendConfig {
            buy_probability: 1.2,
            ..Default::default()
        };
        assert!(TrendFollower::new(config).is_err());
    }
}

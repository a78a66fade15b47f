//! Random Policy
//!
//! A memoryless trader that draws its action independently every round.
//! Role: Provides baseline volume and counterparty flow.

use super::{Action, AgentKind, DecisionPolicy, MarketObservation};
use crate::domain::{Holdings, SimError, SimResult};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Relative weights for buy / sell / do nothing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomWeights {
    pub buy: f64,
    pub sell: f64,
    pub do_nothing: f64,
}

impl Default for RandomWeights {
    fn default() -> Self {
        // Uniform over the three actions
        Self {
            buy: 1.0,
            sell: 1.0,
            do_nothing: 1.0,
        }
    }
}

impl RandomWeights {
    /// Weights that always pick `action`
    pub fn always(action: Action) -> Self {
        let mut weights = Self {
            buy: 0.0,
            sell: 0.0,
            do_nothing: 0.0,
        };
        match action {
            Action::Buy => weights.buy = 1.0,
            Action::Sell => weights.sell = 1.0,
            Action::DoNothing => weights.do_nothing = 1.0,
        }
        weights
    }

    fn as_array(&self) -> [f64; 3] {
        // Same order as Action::ALL
        [self.buy, self.sell, self.do_nothing]
    }
}

/// Random policy
#[derive(Debug, Clone, Default)]
pub struct RandomPolicy {
    weights: RandomWeights,
}

impl RandomPolicy {
    pub fn new(weights: RandomWeights) -> SimResult<Self> {
        let values = weights.as_array();
        if values.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(SimError::InvalidParameter {
                name: "random_weights",
                reason: format!("weights must be finite and non-negative, got {values:?}"),
            });
        }
        if values.iter().sum::<f64>() <= 0.0 {
            return Err(SimError::InvalidParameter {
                name: "random_weights",
                reason: "at least one weight must be positive".to_string(),
            });
        }

        Ok(Self { weights })
    }

    /// Policy that always chooses `action`
    pub fn always(action: Action) -> Self {
        Self {
            weights: RandomWeights::always(action),
        }
    }

    pub fn weights(&self) -> &RandomWeights {
        &self.weights
    }
}

impl DecisionPolicy for RandomPolicy {
    fn decide<R: Rng + ?Sized>(
        &mut self,
        _holdings: &Holdings,
        _observation: &MarketObservation,
        rng: &mut R,
    ) -> Action {
        let weights = self.weights.as_array();
        let total: f64 = weights.iter().sum();
        let mut draw = rng.r#gen::<f64>() * total;

        for (action, weight) in Action::ALL.into_iter().zip(weights) {
            if draw < weight {
                return action;
            }
            draw -= weight;
        }
        // Rounding can leave the draw just past the last bucket
        Action::ALL
            .into_iter()
            .zip(weights)
            .rev()
            .find(|(_, w)| *w > 0.0)
            .map_or(Action::DoNothing, |(action, _)| action)
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Random
    }
}

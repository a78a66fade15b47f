//! Agent Framework
//!
//! Agents, the actions they take, and the policies that choose them.
//!
//! # Policy Types
//!
//! - **Random**: Draws buy / sell / do nothing independently each round
//! - **TrendFollower**: Buys after a rise, sometimes sells otherwise (amplifies trends)
//! - **Contrarian**: Sells into a rise, sometimes buys otherwise (dampens trends)
//! - **Optimizing**: Buys dips and sells rallies against a moving average,
//!   then liquidates before the run ends

mod action;
mod agent;
mod market_state;
mod policy;

pub use action::{Action, ActionOutcome};
pub use agent::{Agent, AgentBuilder, AgentId};
pub use market_state::MarketObservation;
pub use policy::{AgentKind, DecisionPolicy, Policy};

// Policy implementations
pub mod contrarian;
pub mod momentum;
pub mod noise;
pub mod optimizing;

// Re-export policy types and configs
pub use contrarian::{Contrarian, ContrarianConfig};
pub use momentum::{TrendConfig, TrendFollower};
pub use noise::{RandomPolicy, RandomWeights};
pub use optimizing::{OptimizingConfig, OptimizingPolicy};

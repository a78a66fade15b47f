//! Agent-Based Model (ABM) for a single-commodity market
//!
//! Heterogeneous agents buy, sell, or sit out each round; every executed
//! trade moves the price by a fixed ±0.5% step. The resulting price path is
//! emergent and reproducible for a fixed seed.

pub mod application;
pub mod domain;

// Re-export key types at crate root
pub use application::agents::{
    Action, ActionOutcome, Agent, AgentBuilder, AgentId, AgentKind, Contrarian, ContrarianConfig,
    DecisionPolicy, MarketObservation, OptimizingConfig, OptimizingPolicy, Policy, RandomPolicy,
    RandomWeights, TrendConfig, TrendFollower,
};
pub use application::simulation::{
    BUY_IMPACT, KindTotals, Market, MarketConfig, MarketPhase, NullReporter, RoundRecord,
    RoundReport, RoundReporter, SELL_IMPACT, SimulationSummary,
};
pub use domain::{Holdings, PriceWindow, SimError, SimResult};

//! Application layer: Use cases and orchestration
//!
//! Contains:
//! - **agents**: Agents and their decision policies (random, trend follower, contrarian, optimizing)
//! - **simulation**: The market engine that runs agents round by round

pub mod agents;
pub mod simulation;

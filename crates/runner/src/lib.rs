//! ABM Runner - drives the market simulation
//!
//! Everything around the simulation core:
//!
//! - **Config**: JSON configuration with defaults for every field
//! - **Bootstrap**: Builds the agent population and the market
//! - **Report**: Renders the per-round trace to the log and/or a file
//! - **CLI**: Argument parsing for the `abm-sim` binary
//!
//! ## Flow
//!
//! ```text
//!   config.json + flags
//!          │
//!          ▼
//!  ┌───────────────────┐     ┌───────────────────┐
//!  │ SimulationConfig  │────▶│ SimulationBootstrap│
//!  └───────────────────┘     └─────────┬─────────┘
//!                                      │ Market + agents
//!                                      ▼
//!                            ┌───────────────────┐  RoundReport  ┌───────────────┐
//!                            │    Market::run    │──────────────▶│ TraceReporter │
//!                            └─────────┬─────────┘               └───────────────┘
//!                                      │
//!                                      ▼
//!                              SimulationSummary
//! ```

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod report;

pub use bootstrap::{AgentFactory, SimulationBootstrap};
pub use cli::CliArgs;
pub use config::{PolicyParams, PopulationConfig, ReportConfig, SimulationConfig};
pub use error::{ConfigError, RunnerError, RunnerResult};
pub use report::{TRACE_TARGET, TraceReporter, format_record, format_round, to_cents};

use abm::{AgentKind, Market, SimulationSummary};

/// Run a configured simulation to completion
///
/// Builds the market, streams every round into a [`TraceReporter`] set up
/// from `config.report`, and returns the finished market with its summary.
pub fn run_simulation(config: &SimulationConfig) -> RunnerResult<(Market, SimulationSummary)> {
    let mut market = SimulationBootstrap::from_config(config)?;

    let summary = match &config.report.trace_file {
        Some(path) => {
            log::info!("Writing round trace to {}", path.display());
            let mut reporter = TraceReporter::to_file(path, config.report.verbose)?;
            let summary = market.run(&mut reporter)?;
            reporter.flush()?;
            summary
        }
        None => {
            let mut reporter = TraceReporter::new(config.report.verbose);
            market.run(&mut reporter)?
        }
    };

    Ok((market, summary))
}

/// Closing report: optimizing agents first, then the market
pub fn final_report(market: &Market) -> String {
    let mut out = String::new();
    for agent in market
        .agents()
        .iter()
        .filter(|a| a.kind() == AgentKind::Optimizing)
    {
        out.push_str(&format!(
            "Optimizing agent {} final capital: ${:.2}, units: {}\n",
            agent.id(),
            to_cents(agent.capital()),
            agent.inventory()
        ));
    }
    out.push_str(&format!("Final price: ${:.2}\n", to_cents(market.price())));
    out.push_str(&format!("Final stock: {}\n", market.stock()));
    out
}

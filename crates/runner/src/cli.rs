//! Command line arguments for `abm-sim`

use crate::config::SimulationConfig;
use crate::error::ConfigError;
use std::path::PathBuf;

pub const HELP: &str = r#"ABM Simulator - single-commodity agent-based market

USAGE:
    abm-sim [OPTIONS]

OPTIONS:
    --config <PATH>             Load configuration from JSON file
    --rounds <N>                Number of rounds to simulate
    --seed <N>                  Seed the random number generator
    --population <KIND=N,...>   Override agent counts
                                (random, trend_follower, contrarian, optimizing)
    --trace <PATH>              Write the round trace to a file
    --quiet                     Do not log the round trace
    --help                      Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG                    Log level filter (default: info)

EXAMPLES:
    # Run with defaults (100 agents, 1000 rounds)
    abm-sim

    # Reproducible short run
    abm-sim --rounds 50 --seed 42

    # Custom population, trace to file only
    abm-sim --population random=10,custom=2 --trace trace.txt --quiet
"#;

pub fn print_help() {
    eprintln!("{}", HELP);
}

/// Parsed command line; every flag overrides the config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub rounds: Option<i64>,
    pub seed: Option<u64>,
    pub population: Option<String>,
    pub trace: Option<PathBuf>,
    pub quiet: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parse arguments, program name excluded
    pub fn parse<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => parsed.help = true,
                "--quiet" | "-q" => parsed.quiet = true,
                "--config" | "-c" => {
                    parsed.config = Some(PathBuf::from(value(&mut args, &arg)?));
                }
                "--rounds" | "-r" => {
                    let raw = value(&mut args, &arg)?;
                    parsed.rounds = Some(raw.parse().map_err(|_| {
                        ConfigError::Argument(format!("invalid round count '{raw}'"))
                    })?);
                }
                "--seed" | "-s" => {
                    let raw = value(&mut args, &arg)?;
                    parsed.seed = Some(
                        raw.parse()
                            .map_err(|_| ConfigError::Argument(format!("invalid seed '{raw}'")))?,
                    );
                }
                "--population" | "-p" => parsed.population = Some(value(&mut args, &arg)?),
                "--trace" | "-t" => {
                    parsed.trace = Some(PathBuf::from(value(&mut args, &arg)?));
                }
                other => {
                    return Err(ConfigError::Argument(format!("unknown argument '{other}'")));
                }
            }
        }

        Ok(parsed)
    }

    /// Load the config file (or defaults) and apply the flags on top
    pub fn load_config(&self) -> Result<SimulationConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                SimulationConfig::from_file(path)?
            }
            None => {
                log::info!("Using default configuration");
                SimulationConfig::default()
            }
        };
        self.apply(&mut config)?;
        Ok(config)
    }

    pub fn apply(&self, config: &mut SimulationConfig) -> Result<(), ConfigError> {
        if let Some(rounds) = self.rounds {
            config.rounds = rounds;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(population) = &self.population {
            config.population.apply_overrides(population)?;
        }
        if let Some(trace) = &self.trace {
            config.report.trace_file = Some(trace.clone());
        }
        if self.quiet {
            config.report.verbose = false;
        }
        Ok(())
    }
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, ConfigError> {
    args.next()
        .ok_or_else(|| ConfigError::Argument(format!("{flag} requires a value")))
}

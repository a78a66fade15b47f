use abm_runner::{CliArgs, cli, final_report, run_simulation, to_cents};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            cli::print_help();
            std::process::exit(1);
        }
    };

    if args.help {
        cli::print_help();
        return Ok(());
    }

    let config = args.load_config()?;
    config.validate()?;

    log::info!("Starting ABM simulation");
    log::info!(
        "Population: {} agents ({} random, {} trend followers, {} contrarians, {} optimizing)",
        config.population.total(),
        config.population.random,
        config.population.trend_follower,
        config.population.contrarian,
        config.population.optimizing
    );
    if let Some(seed) = config.seed {
        log::info!("Seed: {}", seed);
    }

    let (market, summary) = run_simulation(&config)?;

    log::info!(
        "Done: {} rounds, {} fills, {} rejected, price range ${:.2} - ${:.2}",
        summary.rounds_completed,
        summary.total_fills,
        summary.total_rejections,
        to_cents(summary.min_price),
        to_cents(summary.max_price)
    );

    print!("{}", final_report(&market));

    Ok(())
}

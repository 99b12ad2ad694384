use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use intersection_sim::scenarios::{Scenario, DEFAULT_RUN_HOURS};
use intersection_sim::simulation::{RoundingPolicy, SimConfig, Simulation, DEFAULT_LIGHT_TIME};

#[derive(Parser)]
#[command(name = "intersection_sim")]
#[command(about = "Compare lane allocations at a signalized four-way intersection")]
struct Cli {
    /// Lane allocation to simulate (all scenarios when omitted)
    #[arg(long, value_enum)]
    scenario: Option<Scenario>,

    /// Simulated hours to run each scenario for
    #[arg(long, default_value_t = DEFAULT_RUN_HOURS)]
    hours: u64,

    /// Seed for reproducible arrivals
    #[arg(long)]
    seed: Option<u64>,

    /// Duration of one light phase in seconds
    #[arg(long, default_value_t = DEFAULT_LIGHT_TIME)]
    light_time: u32,

    /// How fractional clear-time shares are rounded
    #[arg(long, value_enum, default_value = "round-on-pop")]
    rounding: RoundingPolicy,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,intersection_sim=info"),
    )
    .init();

    let cli = Cli::parse();
    let config = SimConfig::new()
        .with_light_time(cli.light_time)
        .with_rounding(cli.rounding);
    let stop_time = cli
        .hours
        .checked_mul(60 * 60)
        .context("Run length in hours is too large")?;

    let scenarios = match cli.scenario {
        Some(scenario) => vec![scenario],
        None => Scenario::ALL.to_vec(),
    };

    for scenario in scenarios {
        info!("Starting scenario {}", scenario.name());
        let lanes = scenario.lanes();
        let mut simulation = match cli.seed {
            Some(seed) => Simulation::new_with_seed(stop_time, &lanes, config.clone(), seed)?,
            None => Simulation::new(stop_time, &lanes, config.clone())?,
        };
        let report = simulation.run()?;

        println!("=== Scenario: {} ===", scenario.name());
        println!("{}", report);
        println!();
    }

    Ok(())
}

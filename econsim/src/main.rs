use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use econsim::report::render_world;
use econsim::scenario::{load_config, load_scenario, Scenario};
use econsim_core::{step_world, FactoryOutput, ProductionModel, ReserveExtraction, SimConfig};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModelArg {
    /// Fuel from oil reserves and refineries
    Reserve,
    /// Oil and steel from factories, scaled by infrastructure
    Factory,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario JSON file (defaults to the built-in scenario)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Simulation config JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of days to simulate (overrides the config)
    #[arg(short, long)]
    days: Option<u32>,

    /// Production model (overrides the config)
    #[arg(long, value_enum)]
    model: Option<ModelArg>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    log::info!("Starting econsim...");

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimConfig::default(),
    };
    if let Some(days) = args.days {
        config.days = days;
    }
    apply_model_override(&mut config, args.model);
    config
        .economy
        .validate()
        .context("Invalid economy configuration")?;

    let scenario = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None => Scenario::builtin(),
    };
    let mut state = scenario.build(&config.economy)?;

    log::info!(
        "Production model: {}, simulating {} days",
        config.economy.production.name(),
        config.days
    );

    println!("=== INITIAL STATE ===");
    print!("{}", render_world(&state)?);

    for _ in 0..config.days {
        state = step_world(&state, &[]);
        log::debug!("Day {} checksum {:016x}", state.day, state.checksum());
    }

    println!();
    println!("=== AFTER {} DAYS ===", config.days);
    print!("{}", render_world(&state)?);

    log::info!(
        "Simulation finished on day {} (checksum {:016x})",
        state.day,
        state.checksum()
    );

    Ok(())
}

/// Switches the production model unless the config already selects it.
fn apply_model_override(config: &mut SimConfig, model: Option<ModelArg>) {
    let replacement = match (model, &config.economy.production) {
        (Some(ModelArg::Reserve), ProductionModel::FactoryOutput(_)) => {
            ProductionModel::ReserveExtraction(ReserveExtraction::default())
        }
        (Some(ModelArg::Factory), ProductionModel::ReserveExtraction(_)) => {
            ProductionModel::FactoryOutput(FactoryOutput::default())
        }
        _ => return,
    };
    config.economy.production = replacement;
}

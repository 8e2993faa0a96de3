use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use skirmish_app::pilot::Autopilot;
use skirmish_app::runner::{run_headless, run_realtime};
use skirmish_app::settings::{AppConfig, Overrides};
use skirmish_sim::engine::SimulationEngine;

#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Headless side-scrolling skirmish, played by an autopilot")]
struct Cli {
    /// JSON config file; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,
    /// Run on the paced game-loop thread instead of as fast as possible
    #[arg(long, default_value_t = false)]
    realtime: bool,
    /// World width in pixels
    #[arg(long)]
    width: Option<f64>,
    /// World height in pixels
    #[arg(long)]
    height: Option<f64>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            seed: self.seed,
            max_ticks: self.ticks,
            world_width: self.width,
            world_height: self.height,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    config.apply(&cli.overrides());
    config.validate()?;
    log::info!(
        "seed {}, world {}x{}, up to {} ticks{}",
        config.sim.seed,
        config.sim.world_width,
        config.sim.world_height,
        config.max_ticks,
        if cli.realtime { " (realtime)" } else { "" }
    );

    let mut pilot = Autopilot::new(config.autopilot.clone());
    let summary = if cli.realtime {
        run_realtime(&config, &mut pilot)?
    } else {
        let mut engine = SimulationEngine::new(config.sim.clone());
        run_headless(&mut engine, &mut pilot, config.max_ticks)
    };

    let json = serde_json::to_string_pretty(&summary).context("serializing run summary")?;
    println!("{json}");
    Ok(())
}

//! Coexist - headless simulation runner
//!
//! Generates a world from a seed, runs the requested number of ticks, logs
//! population counts as it goes, and can dump the per-tick stats series as
//! JSON for offline analysis.

use std::fs::File;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use coexist::core::config::WorldConfig;
use coexist::core::error::Result;
use coexist::simulation::tick::run_simulation_tick;
use coexist::world::World;

#[derive(Parser, Debug)]
#[command(name = "coexist", about = "Needs-driven predator/prey ecosystem simulation")]
struct Args {
    /// RNG seed; defaults to wall-clock seconds
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 10_000)]
    ticks: u64,

    /// TOML config file; defaults apply for missing keys
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the per-tick population stats series to this JSON file
    #[arg(long)]
    stats_json: Option<PathBuf>,

    /// Log population counts every N ticks
    #[arg(long, default_value_t = 100)]
    log_every: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("coexist=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => WorldConfig::from_toml_file(path)?,
        None => WorldConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });
    tracing::info!(seed, ticks = args.ticks, "starting simulation");

    let mut world = World::generate(config, seed)?;
    let mut series = Vec::new();

    for _ in 0..args.ticks {
        let report = run_simulation_tick(&mut world);

        if report.stats.tick % args.log_every == 0 {
            tracing::info!(
                tick = report.stats.tick,
                herbivores = report.stats.herbivores,
                predators = report.stats.predators,
                plants = report.stats.plants,
                "population"
            );
        }
        if args.stats_json.is_some() {
            series.push(report.stats);
        }

        if report.stats.herbivores == 0 && report.stats.predators == 0 {
            tracing::info!(tick = report.stats.tick, "all animals died out");
            break;
        }
    }

    tracing::info!(
        tick = world.current_tick,
        herbivores = world.herbivores.count(),
        predators = world.predators.count(),
        plants = world.plants.count(),
        "simulation finished"
    );

    if let Some(path) = &args.stats_json {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, &series)?;
        tracing::info!(path = %path.display(), samples = series.len(), "stats written");
    }

    Ok(())
}

//! sentry-run: headless driver for the SENTRY simulation.
//!
//! Runs the engine for a fixed number of ticks, applies a scripted command
//! list, logs every event, and prints the final snapshot as JSON.
//!
//! Usage:
//!   sentry-run [--config <file.json>] [--seed <n>] [--ticks <n>] [--script <file.json>] [--pretty]
//!
//! A script is a JSON array of `{ "tick": 120, "command": { "type": "ToggleJamming" } }`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde::Deserialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sentry_core::commands::Command;
use sentry_core::enums::AirspaceStatus;
use sentry_sim::{ConfigError, SimConfig, SimulationEngine};

#[derive(Debug, Parser)]
#[command(name = "sentry-run", version, about = "Headless airspace picture simulation")]
struct Args {
    /// Engine configuration (JSON). Defaults are used when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the configured RNG seed.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of ticks to run (60 per simulated second).
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Scripted commands (JSON array of { tick, command }).
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Pretty-print the final snapshot.
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Deserialize)]
struct ScriptedCommand {
    tick: u64,
    command: Command,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), ConfigError> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut script = match &args.script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };
    script.sort_by_key(|s| s.tick);
    let mut script = script.into_iter().peekable();

    info!(
        seed = config.seed,
        ticks = args.ticks,
        radius = config.radar_radius,
        "starting run"
    );
    let mut engine = SimulationEngine::new(config);
    let mut last_status = AirspaceStatus::Green;
    let mut snapshot = engine.snapshot();

    for tick in 0..args.ticks {
        while let Some(scripted) = script.next_if(|s| s.tick <= tick) {
            engine.queue_command(scripted.command);
        }
        snapshot = engine.tick();

        for event in &snapshot.events {
            info!("{event}");
        }
        if snapshot.airspace != last_status {
            info!(
                tick = snapshot.time.tick,
                from = ?last_status,
                to = ?snapshot.airspace,
                "airspace status changed"
            );
            last_status = snapshot.airspace;
        }
    }

    info!(
        tracked = snapshot.tracked().count(),
        targets = snapshot.targets.len(),
        missiles = snapshot.missile_count(),
        airspace = ?snapshot.airspace,
        "run complete"
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{json}");
    Ok(())
}

fn load_script(path: &Path) -> Result<Vec<ScriptedCommand>, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

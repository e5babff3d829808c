//! Pluton scenario replay
//!
//! Replays a scripted sequence of engine callbacks against the hook
//! dispatcher and prints what the subscribers saw.
//!
//! Usage:
//!   pluton-replay --scenario scenarios/skirmish.json --config pluton.toml

use anyhow::{Context, Result};
use clap::Parser;
use pluton_hooks::HookConfig;
use pluton_host::{Scenario, replay};
use std::path::PathBuf;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "pluton-replay")]
#[command(about = "Replay engine callbacks through the Pluton hook dispatcher")]
struct Args {
    /// Scenario file (JSON)
    #[arg(short, long)]
    scenario: PathBuf,

    /// Hook config file (TOML)
    #[arg(short, long, default_value = "pluton.toml")]
    config: PathBuf,

    /// Print the report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let config = HookConfig::load_from(&args.config);
    let scenario = Scenario::read(&args.scenario)
        .with_context(|| format!("loading scenario {:?}", args.scenario))?;
    info!(
        "Replaying {} steps in the {:?} realm",
        scenario.steps.len(),
        config.realm()
    );

    let report = replay(config, &scenario).context("replay failed")?;

    info!(
        steps = report.steps,
        hooks = report.hooks,
        skipped = report.skipped,
        delivered = report.delivered,
        offline = report.offline,
        "Replay finished"
    );
    if report.faulted > 0 {
        warn!("{} subscriber faults during replay", report.faulted);
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

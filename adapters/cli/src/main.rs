#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Dungeon Radar session in the terminal.

mod simulation;
mod terminal;

use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::Mutex,
    thread,
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};
use clap::Parser;
use dungeon_radar_core::TICK_INTERVAL;
use dungeon_radar_rendering::{InputSource, RenderingBackend};
use tracing_subscriber::EnvFilter;

use crate::{simulation::Simulation, terminal::Terminal};

/// First-person ASCII dungeon crawler with a rotating radar.
#[derive(Debug, Parser)]
#[command(name = "dungeon-radar", version)]
struct CliArgs {
    /// Seed for the dungeon layout, spawns and wall glyphs.
    #[arg(long)]
    seed: Option<u64>,
    /// Append structured logs to this file; logging is off otherwise.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Start with the radar panel hidden.
    #[arg(long)]
    hide_minimap: bool,
}

/// Entry point for the Dungeon Radar command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let seed = args.seed.unwrap_or_else(clock_seed);
    tracing::info!(seed, "starting session");
    let mut simulation = Simulation::new(seed, !args.hide_minimap);

    let mut terminal = Terminal::enter().context("failed to take over the terminal")?;
    run(&mut simulation, &mut terminal)?;
    let game_over = simulation.game_over();
    terminal.present_game_over(&game_over)?;
    drop(terminal);

    tracing::info!(kills = game_over.kills, end = ?game_over.end, "session finished");
    Ok(())
}

fn run<T>(simulation: &mut Simulation, terminal: &mut T) -> Result<()>
where
    T: RenderingBackend + InputSource,
{
    let mut last = Instant::now();
    loop {
        let now = Instant::now();
        let dt = now.duration_since(last);
        last = now;

        let action = terminal.poll_action()?;
        if !simulation.step(dt, action).is_running() {
            return Ok(());
        }
        terminal.present(&simulation.presentation())?;
        thread::sleep(TICK_INTERVAL);
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|error| anyhow::anyhow!(error))
        .context("failed to install the log subscriber")
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

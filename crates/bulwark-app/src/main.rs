use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bulwark_app::demo;
use bulwark_app::game_loop::{self, RunOptions};
use bulwark_app::input::SweepInput;
use bulwark_core::constants::DT;
use bulwark_core::settings::GameSettings;
use bulwark_sim::{GameSession, SessionConfig};

/// Run a headless BULWARK session and print a JSON summary.
#[derive(Debug, Parser)]
#[command(name = "bulwark", version)]
struct Cli {
    /// Settings JSON file. Built-in demo settings when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed. Same seed, same session.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of frames to run.
    #[arg(long, default_value_t = 3600)]
    ticks: u32,

    /// Seconds per frame.
    #[arg(long, default_value_t = DT)]
    dt: f32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => GameSettings::from_json_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => demo::demo_settings(),
    };

    let mut session =
        GameSession::new(settings, SessionConfig { seed: cli.seed }).context("composing game session")?;
    let options = RunOptions {
        ticks: cli.ticks,
        dt: cli.dt,
    };
    let summary = game_loop::run(&mut session, &mut SweepInput::default(), options);

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

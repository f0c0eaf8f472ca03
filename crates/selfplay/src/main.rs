//! Self-play driver - pits two configured opponents against each other.
//!
//! Reads `selfplay.toml` (or the file given with `--config`), plays one game
//! and prints the moves, the final position and the result.

mod config;
mod runner;

use chess_engine::GameState;
use clap::Parser;
use config::SelfplayConfig;
use runner::SelfPlay;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Self-play - plays an engine-vs-engine game.
#[derive(Parser)]
#[command(name = "selfplay")]
#[command(about = "Plays an engine-vs-engine chess game")]
struct Args {
    /// Path to the TOML configuration file [default: selfplay.toml]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for random move choices (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many plies (overrides the config file)
    #[arg(long)]
    max_plies: Option<usize>,

    /// Starting position in FEN (overrides the config file)
    #[arg(long)]
    fen: Option<String>,
}

impl Args {
    fn apply(self, config: &mut SelfplayConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(max_plies) = self.max_plies {
            config.max_plies = max_plies;
        }
        if let Some(fen) = self.fen {
            config.start_fen = Some(fen);
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(SelfplayConfig::default_path);
    let mut config = SelfplayConfig::load(&config_path)?;
    args.apply(&mut config);

    tracing::info!("Config: {:?}", config_path);
    tracing::info!(
        "White: {} level {}, black: {} level {}",
        config.white.strategy,
        config.white.level,
        config.black.strategy,
        config.black.level
    );
    tracing::info!("Seed: {}, max plies: {}", config.seed, config.max_plies);

    let start = match &config.start_fen {
        Some(fen) => GameState::from_fen(fen)?,
        None => GameState::initial(),
    };

    let record = SelfPlay::new(&config).play(start)?;
    println!("{}", record);
    Ok(())
}

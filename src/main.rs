//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pitchstats::cli::{Commands, PitchStats};
use pitchstats::commands::{handle_index, handle_player_stats, handle_regenerate};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app = PitchStats::parse();
    match app.command {
        Commands::Regenerate { common } => handle_regenerate(&common)?,
        Commands::PlayerStats { common, player, json } => {
            handle_player_stats(&common, &player, json)?
        }
        Commands::Index { common, player, weights, output } => {
            handle_index(&common, &player, &weights, output)?
        }
    }
    Ok(())
}

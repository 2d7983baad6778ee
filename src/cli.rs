//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Shared inputs: where the match data lives and how to process it.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Directory holding `<match_id>_events.json` files and `matches.json`.
    #[clap(long, short)]
    pub data_dir: PathBuf,

    /// Team whose players are being aggregated.
    #[clap(long, short)]
    pub team: String,

    /// JSON file mapping player names to positions.
    #[clap(long, short)]
    pub positions: PathBuf,

    /// Root of the stats cache (default: the platform data directory).
    #[clap(long)]
    pub cache_dir: Option<PathBuf>,

    /// Analysis config JSON overriding the built-in thresholds.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Recompute even when cached tables are fresh.
    #[clap(long)]
    pub refresh: bool,
}

#[derive(Debug, Parser)]
#[clap(name = "pitchstats", about = "Per-player statistics from match event logs")]
pub struct PitchStats {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Recompute every mapped player's stats and the team-wide tables.
    Regenerate {
        #[clap(flatten)]
        common: CommonArgs,
    },

    /// Compute (or load from cache) one player's rolled-up stats table.
    PlayerStats {
        #[clap(flatten)]
        common: CommonArgs,

        /// Player name, exactly as it appears in the event data.
        #[clap(long, short = 'n')]
        player: String,

        /// Output the table as JSON instead of TSV.
        #[clap(long)]
        json: bool,
    },

    /// Weighted performance index for one player.
    Index {
        #[clap(flatten)]
        common: CommonArgs,

        /// Player name, exactly as it appears in the event data.
        #[clap(long, short = 'n')]
        player: String,

        /// JSON file of metric weights (must sum to 1.0).
        #[clap(long, short)]
        weights: PathBuf,

        /// Where to write the index TSV; stdout when omitted.
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
}

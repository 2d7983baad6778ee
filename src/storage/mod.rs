//! On-disk layout of the stats cache.
//!
//! Everything lives under one data root (default: the platform data dir,
//! `pitchstats` subfolder):
//!
//! ```text
//! <root>/players/<player>/<player>_<match_id>_stats.tsv   per-match row
//! <root>/players/<player>/<player>_stats.tsv              rolled-up table
//! <root>/players/Team/Team_stats.tsv                      all outfielders
//! <root>/players/Team/Team_gk_stats.tsv                   all goalkeepers
//! ```

pub mod cache;
pub mod loader;
pub mod tables;

use std::path::{Path, PathBuf};

use crate::model::MatchId;

pub use loader::MatchInfo;
pub use tables::{PlayerMatchRow, PlayerTable};

/// Paths and freshness policy for the stats cache.
#[derive(Debug, Clone)]
pub struct StatsStore {
    root: PathBuf,
    grace_hours: i64,
}

impl StatsStore {
    /// `root = None` picks `<platform data dir>/pitchstats`.
    pub fn new(root: Option<PathBuf>, grace_hours: i64) -> Self {
        let root = root.unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("pitchstats")
        });
        Self { root, grace_hours }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn player_dir(&self, player: &str) -> PathBuf {
        self.root.join("players").join(player)
    }

    pub fn match_stats_path(&self, player: &str, match_id: MatchId) -> PathBuf {
        self.player_dir(player)
            .join(format!("{player}_{match_id}_stats.tsv"))
    }

    pub fn player_stats_path(&self, player: &str) -> PathBuf {
        self.player_dir(player).join(format!("{player}_stats.tsv"))
    }

    pub fn team_stats_path(&self) -> PathBuf {
        self.player_dir("Team").join("Team_stats.tsv")
    }

    pub fn team_gk_stats_path(&self) -> PathBuf {
        self.player_dir("Team").join("Team_gk_stats.tsv")
    }

    /// Whether a cached table can be reused instead of recomputed: its mtime
    /// must beat the newest source timestamp of every match it covers by more
    /// than the grace interval. Any ambiguity (no mtime, unparseable source
    /// timestamps) fails the check and forces recomputation.
    pub fn is_fresh(&self, path: &Path, matches: &[MatchInfo]) -> bool {
        let newest = matches
            .iter()
            .filter_map(MatchInfo::newest_source_timestamp)
            .max();
        match newest {
            Some(newest) => cache::is_newer_than(path, newest, self.grace_hours),
            None => false,
        }
    }
}

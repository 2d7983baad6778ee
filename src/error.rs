//! Error types for the pitchstats aggregation engine.

use thiserror::Error;

use crate::model::MatchId;

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TSV error: {0}")]
    Tsv(#[from] csv::Error),

    #[error("no Starting XI event found for team '{team}'")]
    MissingLineup { team: String },

    #[error("event log for match {match_id} is empty")]
    EmptyMatch { match_id: MatchId },

    #[error("no position mapping for player '{player}'; add them to the positions file")]
    UnknownPosition { player: String },

    #[error("metric weights must sum to 1.0, got {sum:.3}")]
    InvalidWeights { sum: f64 },

    #[error("column '{column}' missing from table {table}")]
    MissingColumn { column: String, table: String },

    #[error("tables have mismatched columns: {message}")]
    ColumnMismatch { message: String },

    #[error("cache error: {message}")]
    Cache { message: String },
}

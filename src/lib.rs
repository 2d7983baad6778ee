//! Per-player statistics aggregation from soccer match event logs.
//!
//! The pipeline: load a match's event log ([`storage::loader`]), resolve
//! each player's playing window ([`window`]), build a read-only per-player
//! view ([`view`]), run the metric catalogue ([`metrics`], orchestrated by
//! [`aggregate`]), and persist TSV tables with mtime-based cache freshness
//! ([`storage`]). [`index`] computes a weighted performance index over the
//! resulting tables.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod metrics;
pub mod model;
pub mod storage;
pub mod timing;
pub mod view;
pub mod window;

#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;

pub use aggregate::{aggregate_goalkeeper, aggregate_outfield, aggregate_player, StatRow};
pub use config::{AnalysisConfig, PositionGroup};
pub use error::{Result, StatsError};
pub use metrics::{MetricSet, MetricValue};
pub use model::{Event, EventData, MatchId};
pub use storage::StatsStore;
pub use view::PlayerContext;
pub use window::PlayerWindow;

//! Analysis configuration.
//!
//! One immutable [`AnalysisConfig`] is built at startup and passed by
//! reference to everything that needs pitch zones or tuning thresholds. The
//! defaults reproduce the tuning constants of the reference data pipeline;
//! load from JSON to override them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::error::Result;

/// Pitch zone boundaries, in provider coordinates (120 x 80 pitch, attacking
/// left to right).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchZones {
    /// x of the edge of the opposition penalty box.
    pub box_edge_x: f64,
    /// y of the near side of the box.
    pub box_y_left: f64,
    /// y of the far side of the box.
    pub box_y_right: f64,
    /// x where the final third begins.
    pub final_third_x: f64,
    /// x of the halfway line.
    pub opposition_half_x: f64,
}

impl Default for PitchZones {
    fn default() -> Self {
        Self {
            box_edge_x: 102.0,
            box_y_left: 18.0,
            box_y_right: 62.0,
            final_third_x: 80.0,
            opposition_half_x: 60.0,
        }
    }
}

impl PitchZones {
    /// Whether a point lies inside the opposition penalty box.
    pub fn in_box(&self, x: f64, y: f64) -> bool {
        x >= self.box_edge_x && y >= self.box_y_left && y <= self.box_y_right
    }
}

/// Point weights for the goalkeeper offensive-contribution score.
///
/// Undocumented tuning constants inherited from the reference pipeline; kept
/// configurable rather than derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GkContributionWeights {
    pub free_kick_opposition_half: f64,
    pub corner: f64,
    pub shot: f64,
    pub penalty_won: f64,
}

impl Default for GkContributionWeights {
    fn default() -> Self {
        Self {
            free_kick_opposition_half: 0.5,
            corner: 0.4,
            shot: 1.0,
            penalty_won: 7.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub pitch: PitchZones,
    /// Minimum pass length for a long ball.
    pub long_ball_length: f64,
    /// Longest pass still bucketed "short" in goalkeeper distribution.
    pub gk_short_pass_max: f64,
    /// Shortest pass bucketed "long" in goalkeeper distribution.
    pub gk_long_pass_min: f64,
    /// A defensive action regains the ball if the possession ends within this
    /// many seconds and the next possession belongs to the actor's team.
    pub pressure_regain_secs: f64,
    /// Window after an opponent ball receipt for aggressive actions.
    pub aggressive_action_secs: f64,
    /// Window after a set-piece pass during which events count as set-piece
    /// phase.
    pub set_piece_window_secs: f64,
    /// Window before a dangerous situation during which a goalkeeper pass
    /// counts as contributing.
    pub gk_contribution_secs: f64,
    pub gk_weights: GkContributionWeights,
    /// A cached table must be newer than the freshest source timestamp by
    /// more than this many hours to be trusted.
    pub cache_grace_hours: i64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pitch: PitchZones::default(),
            long_ball_length: 35.0,
            gk_short_pass_max: 15.0,
            gk_long_pass_min: 35.0,
            pressure_regain_secs: 6.0,
            aggressive_action_secs: 2.0,
            set_piece_window_secs: 15.0,
            gk_contribution_secs: 20.0,
            gk_weights: GkContributionWeights::default(),
            cache_grace_hours: 0,
        }
    }
}

impl AnalysisConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Coarse position grouping: it only matters whether a player gets the
/// outfield or the goalkeeper metric catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionGroup {
    Goalkeeper,
    #[serde(other)]
    Outfield,
}

impl FromStr for PositionGroup {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "Goalkeeper" => PositionGroup::Goalkeeper,
            _ => PositionGroup::Outfield,
        })
    }
}

/// Player name -> position group, from a JSON object like
/// `{"A. Keeper": "Goalkeeper", "B. Striker": "Forward"}`.
pub type PositionMap = HashMap<String, PositionGroup>;

pub fn load_position_map(path: &Path) -> Result<PositionMap> {
    let raw = std::fs::read_to_string(path)?;
    let names: HashMap<String, String> = serde_json::from_str(&raw)?;
    Ok(names
        .into_iter()
        .map(|(player, label)| {
            let group = label.parse().expect("infallible");
            (player, group)
        })
        .collect())
}

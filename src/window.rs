//! Per-player playing window.
//!
//! Every metric is computed over the slice of the match a player was actually
//! on the pitch for: from the Starting XI (or the substitution that brought
//! them on) to the substitution that took them off (or the final whistle).

use tracing::warn;

use crate::error::{Result, StatsError};
use crate::model::{Event, EventData};
use crate::timing::{seconds_to_minutes_decimal, seconds_to_mmss, MatchTiming};

/// Index range and playing time of one player in one match.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerWindow {
    /// First event index that falls inside the window.
    pub start_index: u32,
    /// Last event index that falls inside the window (inclusive).
    pub end_index: u32,
    pub played_seconds: i64,
    pub played_mmss: String,
    pub played_minutes: f64,
}

impl PlayerWindow {
    fn zero() -> Self {
        Self {
            start_index: 0,
            end_index: 0,
            played_seconds: 0,
            played_mmss: seconds_to_mmss(0),
            played_minutes: 0.0,
        }
    }

    fn from_seconds(start_index: u32, end_index: u32, played_seconds: i64) -> Self {
        Self {
            start_index,
            end_index,
            played_seconds,
            played_mmss: seconds_to_mmss(played_seconds),
            played_minutes: seconds_to_minutes_decimal(played_seconds),
        }
    }

    pub fn contains(&self, index: u32) -> bool {
        index >= self.start_index && index <= self.end_index && self.end_index > 0
    }

    pub fn is_empty(&self) -> bool {
        self.played_seconds == 0
    }
}

/// Resolve a player's window from a full, index-sorted match event log.
///
/// Starters run from the Starting XI to their substitution or the final
/// event; substitutes from the substitution that named them as replacement.
/// A player absent from the match gets a zero window rather than an error;
/// only a missing team lineup is fatal.
pub fn resolve_window(events: &[Event], team: &str, player: &str, timing: &MatchTiming) -> Result<PlayerWindow> {
    let lineup_event = events
        .iter()
        .find(|e| e.team == team && e.tactics().is_some())
        .ok_or_else(|| StatsError::MissingLineup { team: team.to_string() })?;
    let lineup = lineup_event.tactics().expect("checked above");

    let appeared = events.iter().any(|e| e.is_by(player));
    let subbed_on = events
        .iter()
        .find(|e| e.substitution().map(|s| s.replacement == player).unwrap_or(false));
    if !appeared && subbed_on.is_none() {
        return Ok(PlayerWindow::zero());
    }

    let in_starting_lineup = {
        let by_id = events
            .iter()
            .find(|e| e.is_by(player) && e.player_id.is_some())
            .and_then(|e| e.player_id)
            .map(|id| lineup.lineup.iter().any(|p| p.player_id == id));
        by_id.unwrap_or_else(|| lineup.lineup.iter().any(|p| p.player_name == player))
    };

    let last_event = events.last().ok_or(StatsError::ColumnMismatch {
        message: "empty event log".to_string(),
    })?;
    let subbed_off = events
        .iter()
        .find(|e| e.is_by(player) && matches!(e.data, EventData::Substitution { .. }));

    if in_starting_lineup {
        // Window opens with the match itself.
        let first_event = events.first().expect("non-empty");
        match subbed_off {
            Some(off) => {
                let seconds = elapsed_or_zero(timing, first_event, off, player);
                Ok(PlayerWindow::from_seconds(first_event.index, off.index, seconds))
            }
            None => Ok(PlayerWindow::from_seconds(
                first_event.index,
                last_event.index,
                timing.total_seconds(),
            )),
        }
    } else if let Some(on) = subbed_on {
        match subbed_off {
            Some(off) => {
                let seconds = elapsed_or_zero(timing, on, off, player);
                Ok(PlayerWindow::from_seconds(on.index, off.index, seconds))
            }
            None => {
                let seconds = elapsed_or_zero(timing, on, last_event, player);
                Ok(PlayerWindow::from_seconds(on.index, last_event.index, seconds))
            }
        }
    } else {
        warn!(player, team, "player has events but no lineup or substitution record");
        Ok(PlayerWindow::zero())
    }
}

fn elapsed_or_zero(timing: &MatchTiming, start: &Event, end: &Event, player: &str) -> i64 {
    match timing.elapsed_between(start, end) {
        Some(seconds) => seconds,
        None => {
            warn!(player, "period markers missing for playing window; reporting zero minutes");
            0
        }
    }
}

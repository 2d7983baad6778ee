//! Per-player view over one match event log.
//!
//! [`PlayerContext`] is built once per (match, player) pair and handed to
//! every aggregator: it owns the playing-window slice of the log, the
//! player's own events, and the lookup tables (by index, by id, by
//! possession) the cross-referencing metrics need.

use std::collections::HashMap;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::model::{CarryData, Event, PassData, ShotData};
use crate::timing::MatchTiming;
use crate::window::{resolve_window, PlayerWindow};

/// What happened to one possession: when it ended (period-relative seconds)
/// and which team had the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct Possession {
    pub end_secs: f64,
    pub next_team: Option<String>,
}

pub struct PlayerContext<'a> {
    pub cfg: &'a AnalysisConfig,
    pub team: &'a str,
    pub player: &'a str,
    pub timing: MatchTiming,
    pub window: PlayerWindow,
    /// Both teams' events inside the playing window, index order.
    pub match_events: Vec<&'a Event>,
    /// The player's own events inside the window, index order.
    pub player_events: Vec<&'a Event>,
    by_index: HashMap<u32, &'a Event>,
    by_id: HashMap<&'a str, &'a Event>,
    possessions: HashMap<u32, Possession>,
}

impl<'a> PlayerContext<'a> {
    /// Build the view. `events` must be the full match log sorted by index.
    pub fn new(
        events: &'a [Event],
        cfg: &'a AnalysisConfig,
        team: &'a str,
        player: &'a str,
    ) -> Result<Self> {
        let timing = MatchTiming::from_events(events);
        let window = resolve_window(events, team, player, &timing)?;

        let match_events: Vec<&Event> =
            events.iter().filter(|e| window.contains(e.index)).collect();
        let player_events: Vec<&Event> =
            match_events.iter().copied().filter(|e| e.is_by(player)).collect();

        let by_index = events.iter().map(|e| (e.index, e)).collect();
        let by_id = events
            .iter()
            .filter(|e| !e.id.is_empty())
            .map(|e| (e.id.as_str(), e))
            .collect();
        let possessions = index_possessions(&match_events);

        Ok(Self {
            cfg,
            team,
            player,
            timing,
            window,
            match_events,
            player_events,
            by_index,
            by_id,
            possessions,
        })
    }

    pub fn passes(&self) -> impl Iterator<Item = (&'a Event, &'a PassData)> + '_ {
        self.player_events.iter().filter_map(|e| e.pass().map(|p| (*e, p)))
    }

    pub fn shots(&self) -> impl Iterator<Item = (&'a Event, &'a ShotData)> + '_ {
        self.player_events.iter().filter_map(|e| e.shot().map(|s| (*e, s)))
    }

    pub fn carries(&self) -> impl Iterator<Item = (&'a Event, &'a CarryData)> + '_ {
        self.player_events.iter().filter_map(|e| e.carry().map(|c| (*e, c)))
    }

    /// Window events by the player's team, either side of the ball.
    pub fn team_events(&self) -> impl Iterator<Item = &'a Event> + '_ {
        self.match_events.iter().copied().filter(move |e| e.team == self.team)
    }

    pub fn opponent_events(&self) -> impl Iterator<Item = &'a Event> + '_ {
        self.match_events.iter().copied().filter(move |e| e.team != self.team)
    }

    pub fn event_by_index(&self, index: u32) -> Option<&'a Event> {
        self.by_index.get(&index).copied()
    }

    pub fn event_by_id(&self, id: &str) -> Option<&'a Event> {
        self.by_id.get(id).copied()
    }

    pub fn possession(&self, id: u32) -> Option<&Possession> {
        self.possessions.get(&id)
    }

    /// Seconds left in an event's possession when the event happened.
    pub fn secs_to_possession_end(&self, event: &Event) -> Option<f64> {
        self.possession(event.possession)
            .map(|p| p.end_secs - event.timestamp.as_secs())
    }

    /// Team that won the ball after an event's possession ended.
    pub fn next_possession_team(&self, event: &Event) -> Option<&str> {
        self.possession(event.possession)?.next_team.as_deref()
    }
}

/// Possession end times and successor teams, from a window-ordered slice.
fn index_possessions(events: &[&Event]) -> HashMap<u32, Possession> {
    let mut result: HashMap<u32, Possession> = HashMap::new();
    for (pos, event) in events.iter().enumerate() {
        let next_team = events
            .get(pos + 1)
            .map(|next| next.possession_team.clone());
        let entry = result.entry(event.possession).or_insert(Possession {
            end_secs: f64::NEG_INFINITY,
            next_team: None,
        });
        if event.timestamp.as_secs() > entry.end_secs {
            entry.end_secs = event.timestamp.as_secs();
        }
        // The slice is index-ordered, so the last write wins.
        entry.next_team = next_team;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{ev, one_half_match, AWAY, HOME};
    use crate::model::{EventData, PassData};

    fn pass(index: u32, minute: u32, second: u32, player: &str) -> Event {
        ev(index, EventData::Pass { pass: PassData::default() })
            .clock(1, minute, second)
            .player(player)
            .build()
    }

    #[test]
    fn window_filtering_drops_events_outside_the_window() {
        let sub = crate::fixtures::substitution(30, 1, 20, 0, HOME, "Alice", "Romy");
        let late = pass(40, 30, 0, "Bella");
        let events = one_half_match(vec![pass(10, 5, 0, "Alice"), sub, late], 45);
        let cfg = AnalysisConfig::default();

        let view = PlayerContext::new(&events, &cfg, HOME, "Alice").unwrap();
        assert!(view.match_events.iter().all(|e| e.index <= 30));
        assert_eq!(view.player_events.len(), 2); // the pass and the sub-off
    }

    #[test]
    fn possession_index_records_end_and_successor() {
        let a = ev(10, EventData::Pressure)
            .clock(1, 5, 0)
            .possession(2, HOME)
            .build();
        let b = ev(11, EventData::Pressure)
            .clock(1, 5, 30)
            .possession(2, HOME)
            .build();
        let c = ev(12, EventData::Pressure)
            .clock(1, 6, 0)
            .team(AWAY)
            .possession(3, AWAY)
            .build();
        let events = one_half_match(vec![a, b, c], 45);
        let cfg = AnalysisConfig::default();

        let view = PlayerContext::new(&events, &cfg, HOME, "Alice").unwrap();
        let possession = view.possession(2).unwrap();
        assert_eq!(possession.end_secs, 330.0);
        assert_eq!(possession.next_team.as_deref(), Some(AWAY));
    }

    #[test]
    fn lookup_tables_cover_the_full_log() {
        let events = one_half_match(vec![pass(10, 5, 0, "Alice")], 45);
        let cfg = AnalysisConfig::default();

        let view = PlayerContext::new(&events, &cfg, HOME, "Alice").unwrap();
        assert!(view.event_by_index(10).is_some());
        assert!(view.event_by_id("evt-10").is_some());
        assert!(view.event_by_index(999).is_none());
    }
}

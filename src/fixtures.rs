//! Synthetic match-event fixtures for tests.
//!
//! Only compiled for tests or with the `test-utils` feature.

use crate::model::{
    Event, EventData, LineupPlayer, Location, SubstitutionData, Tactics, Timestamp,
};

pub const HOME: &str = "Home";
pub const AWAY: &str = "Away";

/// Default home lineup used by [`one_half_match`].
pub fn home_lineup() -> Vec<(u64, &'static str)> {
    vec![(1, "Alice"), (2, "Bella"), (3, "Cara"), (4, "Dana")]
}

pub fn away_lineup() -> Vec<(u64, &'static str)> {
    vec![(11, "Vera"), (12, "Wanda"), (13, "Xena")]
}

fn period_clock_offset(period: u8) -> i64 {
    // The provider clock carries across periods while timestamps reset; the
    // second half starts at minute 45, extra time at 90/105.
    match period {
        0 | 1 => 0,
        2 => 45 * 60,
        3 => 90 * 60,
        4 => 105 * 60,
        _ => 120 * 60,
    }
}

/// Bare event with the given clock; team defaults to [`HOME`], possession 1
/// owned by [`HOME`].
pub fn raw_event(index: u32, period: u8, minute: u32, second: u32, data: EventData) -> Event {
    let ts = (minute as i64 * 60 + second as i64 - period_clock_offset(period)).max(0);
    Event {
        id: format!("evt-{index}"),
        index,
        period,
        timestamp: Timestamp::from_secs(ts as f64),
        minute,
        second,
        duration: None,
        possession: 1,
        possession_team: HOME.to_string(),
        play_pattern: Some("Regular Play".to_string()),
        team: HOME.to_string(),
        player: None,
        player_id: None,
        position: None,
        location: None,
        under_pressure: false,
        counterpress: false,
        obv_total_net: None,
        related_events: Vec::new(),
        data,
    }
}

pub fn half_start(index: u32, period: u8, minute: u32, second: u32) -> Event {
    raw_event(index, period, minute, second, EventData::HalfStart)
}

pub fn half_end(index: u32, period: u8, minute: u32, second: u32) -> Event {
    raw_event(index, period, minute, second, EventData::HalfEnd)
}

pub fn starting_xi(index: u32, team: &str, lineup: &[(u64, &str)]) -> Event {
    let tactics = Tactics {
        formation: Some(442),
        lineup: lineup
            .iter()
            .map(|(id, name)| LineupPlayer {
                player_id: *id,
                player_name: name.to_string(),
                jersey_number: None,
                position: None,
            })
            .collect(),
    };
    let mut event = raw_event(index, 1, 0, 0, EventData::StartingXi { tactics });
    event.team = team.to_string();
    event
}

pub fn substitution(
    index: u32,
    period: u8,
    minute: u32,
    second: u32,
    team: &str,
    player_off: &str,
    player_on: &str,
) -> Event {
    let mut event = raw_event(
        index,
        period,
        minute,
        second,
        EventData::Substitution {
            substitution: SubstitutionData {
                replacement: player_on.to_string(),
                outcome: None,
            },
        },
    );
    event.team = team.to_string();
    event.player = Some(player_off.to_string());
    event
}

/// Chainable tweaks on top of [`raw_event`].
pub struct EventBuilder {
    event: Event,
}

pub fn ev(index: u32, data: EventData) -> EventBuilder {
    EventBuilder { event: raw_event(index, 1, 0, 0, data) }
}

impl EventBuilder {
    pub fn clock(mut self, period: u8, minute: u32, second: u32) -> Self {
        let ts = (minute as i64 * 60 + second as i64 - period_clock_offset(period)).max(0);
        self.event.period = period;
        self.event.minute = minute;
        self.event.second = second;
        self.event.timestamp = Timestamp::from_secs(ts as f64);
        self
    }

    pub fn timestamp_secs(mut self, secs: f64) -> Self {
        self.event.timestamp = Timestamp::from_secs(secs);
        self
    }

    pub fn team(mut self, team: &str) -> Self {
        self.event.team = team.to_string();
        self
    }

    pub fn player(mut self, player: &str) -> Self {
        self.event.player = Some(player.to_string());
        self
    }

    pub fn player_id(mut self, id: u64) -> Self {
        self.event.player_id = Some(id);
        self
    }

    pub fn position(mut self, position: &str) -> Self {
        self.event.position = Some(position.to_string());
        self
    }

    pub fn possession(mut self, possession: u32, possession_team: &str) -> Self {
        self.event.possession = possession;
        self.event.possession_team = possession_team.to_string();
        self
    }

    pub fn play_pattern(mut self, pattern: &str) -> Self {
        self.event.play_pattern = Some(pattern.to_string());
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.event.location = Some(Location::new(x, y));
        self
    }

    pub fn under_pressure(mut self) -> Self {
        self.event.under_pressure = true;
        self
    }

    pub fn counterpress(mut self) -> Self {
        self.event.counterpress = true;
        self
    }

    pub fn duration(mut self, secs: f64) -> Self {
        self.event.duration = Some(secs);
        self
    }

    pub fn obv(mut self, value: f64) -> Self {
        self.event.obv_total_net = Some(value);
        self
    }

    pub fn id(mut self, id: &str) -> Self {
        self.event.id = id.to_string();
        self
    }

    pub fn related(mut self, ids: &[&str]) -> Self {
        self.event.related_events = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn build(self) -> Event {
        self.event
    }
}

/// A one-half match: both Starting XIs, Half Start markers, the given play
/// events (indices 5..), and a Half End at `end_minute`.
///
/// Play events keep whatever clock/team/possession they were built with.
pub fn one_half_match(play: Vec<Event>, end_minute: u32) -> Vec<Event> {
    let mut events = vec![
        starting_xi(1, HOME, &home_lineup()),
        starting_xi(2, AWAY, &away_lineup()),
        half_start(3, 1, 0, 0),
        half_start(4, 1, 0, 0),
    ];
    let last_index = play.iter().map(|e| e.index).max().unwrap_or(4);
    events.extend(play);
    events.push(half_end(last_index + 1, 1, end_minute, 0));
    events.push(half_end(last_index + 2, 1, end_minute, 0));
    events
}

/// A full 90-minute match with substitutions threaded into the second half.
pub fn two_half_match(mut play_first: Vec<Event>, mut play_second: Vec<Event>) -> Vec<Event> {
    let mut events = vec![
        starting_xi(1, HOME, &home_lineup()),
        starting_xi(2, AWAY, &away_lineup()),
        half_start(3, 1, 0, 0),
        half_start(4, 1, 0, 0),
    ];
    events.append(&mut play_first);
    let last_first = events.iter().map(|e| e.index).max().unwrap_or(4);
    events.push(half_end(last_first + 1, 1, 45, 0));
    events.push(half_end(last_first + 2, 1, 45, 0));
    events.push(half_start(last_first + 3, 2, 45, 0));
    events.push(half_start(last_first + 4, 2, 45, 0));
    events.append(&mut play_second);
    let last_second = events.iter().map(|e| e.index).max().unwrap_or(last_first + 4);
    events.push(half_end(last_second + 1, 2, 90, 0));
    events.push(half_end(last_second + 2, 2, 90, 0));
    events
}

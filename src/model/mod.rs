//! Typed match-event model.
//!
//! One [`Event`] per on-pitch action. The kind-specific attributes live in a
//! tagged union ([`EventData`]) so that pass fields only exist on passes, shot
//! fields only on shots, and so on. Implicit-success conventions of the source
//! data ("a pass with no outcome was complete") are encoded once, as serde
//! defaults on the outcome enums, instead of null checks scattered through the
//! aggregators.

pub mod attributes;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use attributes::{
    BallReceiptData, BallRecoveryData, BodyPart, CarryData, ClearanceData, DribbleData,
    DribbleOutcome, DuelData, DuelOutcome, DuelType, FiftyFiftyData, FiftyFiftyOutcome,
    FoulCommittedData, FoulWonData, GoalkeeperData, InterceptionData, LineupPlayer,
    MiscontrolData, PassData, PassOutcome, PassType, ReceiptOutcome, ShotData, ShotOutcome,
    ShotType, SubstitutionData, Tactics,
};

#[cfg(test)]
mod tests;

/// Type-safe wrapper for provider match identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(pub u64);

impl MatchId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MatchId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Pitch coordinates. `z` is only present on aerial data (shot end locations).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Location {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }
}

impl TryFrom<Vec<f64>> for Location {
    type Error = String;

    fn try_from(v: Vec<f64>) -> std::result::Result<Self, Self::Error> {
        match v.as_slice() {
            [x, y] => Ok(Location::new(*x, *y)),
            [x, y, z] => Ok(Location::with_z(*x, *y, *z)),
            other => Err(format!("location needs 2 or 3 coordinates, got {}", other.len())),
        }
    }
}

impl From<Location> for Vec<f64> {
    fn from(loc: Location) -> Self {
        match loc.z {
            Some(z) => vec![loc.x, loc.y, z],
            None => vec![loc.x, loc.y],
        }
    }
}

/// Period-relative wall clock, parsed from `HH:MM:SS.mmm`.
///
/// Stored as fractional seconds since the period start. Comparisons are only
/// meaningful between events of the same period.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Timestamp(f64);

impl Timestamp {
    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }
}

impl FromStr for Timestamp {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (h, m, sec) = match (parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(m), Some(sec)) => (h, m, sec),
            _ => return Err(format!("bad timestamp '{s}'")),
        };
        let hours: f64 = h.parse().map_err(|_| format!("bad timestamp '{s}'"))?;
        let minutes: f64 = m.parse().map_err(|_| format!("bad timestamp '{s}'"))?;
        let seconds: f64 = sec.parse().map_err(|_| format!("bad timestamp '{s}'"))?;
        Ok(Self(hours * 3600.0 + minutes * 60.0 + seconds))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.max(0.0);
        let hours = (total / 3600.0) as u64;
        let minutes = ((total / 60.0) as u64) % 60;
        let seconds = total - (hours * 3600 + minutes * 60) as f64;
        write!(f, "{:02}:{:02}:{:06.3}", hours, minutes, seconds)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One row of a match event log.
///
/// `index` is the primary ordering key: unique and strictly increasing within
/// a match. `minute`/`second` are period-relative and only reset at period
/// boundaries; elapsed time across periods goes through
/// [`crate::timing::MatchTiming`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: String,
    pub index: u32,
    pub period: u8,
    #[serde(default)]
    pub timestamp: Timestamp,
    pub minute: u32,
    pub second: u32,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub possession: u32,
    #[serde(default)]
    pub possession_team: String,
    #[serde(default)]
    pub play_pattern: Option<String>,
    pub team: String,
    #[serde(default)]
    pub player: Option<String>,
    #[serde(default)]
    pub player_id: Option<u64>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub under_pressure: bool,
    #[serde(default)]
    pub counterpress: bool,
    #[serde(default)]
    pub obv_total_net: Option<f64>,
    #[serde(default)]
    pub related_events: Vec<String>,
    #[serde(flatten)]
    pub data: EventData,
}

/// Kind-specific event payloads, tagged by the provider's `type` string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventData {
    Pass {
        #[serde(default)]
        pass: PassData,
    },
    Shot {
        #[serde(default)]
        shot: ShotData,
    },
    Carry {
        carry: CarryData,
    },
    #[serde(rename = "Ball Receipt*")]
    BallReceipt {
        #[serde(default)]
        ball_receipt: BallReceiptData,
    },
    #[serde(rename = "Ball Recovery")]
    BallRecovery {
        #[serde(default)]
        ball_recovery: BallRecoveryData,
    },
    Duel {
        #[serde(default)]
        duel: DuelData,
    },
    Dribble {
        #[serde(default)]
        dribble: DribbleData,
    },
    #[serde(rename = "Dribbled Past")]
    DribbledPast,
    Pressure,
    Block,
    Interception {
        #[serde(default)]
        interception: InterceptionData,
    },
    Clearance {
        #[serde(default)]
        clearance: ClearanceData,
    },
    Miscontrol {
        #[serde(default)]
        miscontrol: MiscontrolData,
    },
    Dispossessed,
    Error,
    #[serde(rename = "Foul Won")]
    FoulWon {
        #[serde(default)]
        foul_won: FoulWonData,
    },
    #[serde(rename = "Foul Committed")]
    FoulCommitted {
        #[serde(default)]
        foul_committed: FoulCommittedData,
    },
    #[serde(rename = "50/50")]
    FiftyFifty {
        #[serde(rename = "50_50", default)]
        fifty_fifty: FiftyFiftyData,
    },
    #[serde(rename = "Goal Keeper")]
    Goalkeeper {
        #[serde(default)]
        goalkeeper: GoalkeeperData,
    },
    Substitution {
        substitution: SubstitutionData,
    },
    #[serde(rename = "Starting XI")]
    StartingXi {
        tactics: Tactics,
    },
    #[serde(rename = "Half Start")]
    HalfStart,
    #[serde(rename = "Half End")]
    HalfEnd,
    /// Anything the aggregators never look at (injury stoppages, referee
    /// decisions, camera-off markers, ...).
    #[serde(other)]
    Other,
}

impl EventData {
    /// Short snake_case label used to build metric keys like
    /// `pass_inside_box`.
    pub fn label(&self) -> &'static str {
        match self {
            EventData::Pass { .. } => "pass",
            EventData::Shot { .. } => "shot",
            EventData::Carry { .. } => "carry",
            EventData::BallReceipt { .. } => "ball_receipt",
            EventData::BallRecovery { .. } => "ball_recovery",
            EventData::Duel { .. } => "duel",
            EventData::Dribble { .. } => "dribble",
            EventData::DribbledPast => "dribbled_past",
            EventData::Pressure => "pressure",
            EventData::Block => "block",
            EventData::Interception { .. } => "interception",
            EventData::Clearance { .. } => "clearance",
            EventData::Miscontrol { .. } => "miscontrol",
            EventData::Dispossessed => "dispossessed",
            EventData::Error => "error",
            EventData::FoulWon { .. } => "foul_won",
            EventData::FoulCommitted { .. } => "foul_committed",
            EventData::FiftyFifty { .. } => "50_50",
            EventData::Goalkeeper { .. } => "goalkeeper",
            EventData::Substitution { .. } => "substitution",
            EventData::StartingXi { .. } => "starting_xi",
            EventData::HalfStart => "half_start",
            EventData::HalfEnd => "half_end",
            EventData::Other => "other",
        }
    }
}

impl Event {
    pub fn x(&self) -> Option<f64> {
        self.location.map(|l| l.x)
    }

    pub fn y(&self) -> Option<f64> {
        self.location.map(|l| l.y)
    }

    /// Period-relative clock in whole seconds (`minute * 60 + second`).
    pub fn clock_secs(&self) -> i64 {
        self.minute as i64 * 60 + self.second as i64
    }

    pub fn pass(&self) -> Option<&PassData> {
        match &self.data {
            EventData::Pass { pass } => Some(pass),
            _ => None,
        }
    }

    pub fn shot(&self) -> Option<&ShotData> {
        match &self.data {
            EventData::Shot { shot } => Some(shot),
            _ => None,
        }
    }

    pub fn carry(&self) -> Option<&CarryData> {
        match &self.data {
            EventData::Carry { carry } => Some(carry),
            _ => None,
        }
    }

    pub fn duel(&self) -> Option<&DuelData> {
        match &self.data {
            EventData::Duel { duel } => Some(duel),
            _ => None,
        }
    }

    pub fn dribble(&self) -> Option<&DribbleData> {
        match &self.data {
            EventData::Dribble { dribble } => Some(dribble),
            _ => None,
        }
    }

    pub fn ball_receipt(&self) -> Option<&BallReceiptData> {
        match &self.data {
            EventData::BallReceipt { ball_receipt } => Some(ball_receipt),
            _ => None,
        }
    }

    pub fn goalkeeper(&self) -> Option<&GoalkeeperData> {
        match &self.data {
            EventData::Goalkeeper { goalkeeper } => Some(goalkeeper),
            _ => None,
        }
    }

    pub fn substitution(&self) -> Option<&SubstitutionData> {
        match &self.data {
            EventData::Substitution { substitution } => Some(substitution),
            _ => None,
        }
    }

    pub fn tactics(&self) -> Option<&Tactics> {
        match &self.data {
            EventData::StartingXi { tactics } => Some(tactics),
            _ => None,
        }
    }

    /// Whether this event is attributed to the given player.
    pub fn is_by(&self, player: &str) -> bool {
        self.player.as_deref() == Some(player)
    }

    /// Whether the event's team had the ball at that moment.
    pub fn in_possession(&self) -> bool {
        self.team == self.possession_team
    }

    /// Whether this player was listed at goalkeeper when acting.
    pub fn at_goalkeeper(&self) -> bool {
        self.position.as_deref() == Some("Goalkeeper")
    }

    /// On-ball action kinds that count as a touch.
    pub fn is_touch(&self) -> bool {
        matches!(
            self.data,
            EventData::Pass { .. }
                | EventData::BallReceipt { .. }
                | EventData::Carry { .. }
                | EventData::Clearance { .. }
                | EventData::FoulWon { .. }
                | EventData::Block
                | EventData::BallRecovery { .. }
                | EventData::Duel { .. }
                | EventData::Dribble { .. }
                | EventData::Interception { .. }
                | EventData::Miscontrol { .. }
                | EventData::Shot { .. }
        )
    }
}

/// All touch kinds, in the order the touch-count metrics report them.
pub const TOUCH_LABELS: [&str; 12] = [
    "pass",
    "ball_receipt",
    "carry",
    "clearance",
    "foul_won",
    "block",
    "ball_recovery",
    "duel",
    "dribble",
    "interception",
    "miscontrol",
    "shot",
];

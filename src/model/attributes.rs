//! Kind-specific event attributes and their outcome vocabularies.

use serde::{Deserialize, Serialize};

use super::Location;

/// Pass outcome. The provider omits the field entirely on completed passes,
/// so the serde default is `Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PassOutcome {
    #[default]
    Complete,
    Incomplete,
    Out,
    #[serde(rename = "Pass Offside")]
    Offside,
    #[serde(rename = "Injury Clearance")]
    InjuryClearance,
    Unknown,
}

impl PassOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, PassOutcome::Complete)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassType {
    #[serde(rename = "Throw-in")]
    ThrowIn,
    #[serde(rename = "Free Kick")]
    FreeKick,
    Corner,
    #[serde(rename = "Goal Kick")]
    GoalKick,
    #[serde(rename = "Kick Off")]
    Kickoff,
    Recovery,
    Interception,
}

impl PassType {
    /// Restart types, as opposed to open play.
    pub fn is_set_piece(&self) -> bool {
        matches!(
            self,
            PassType::ThrowIn | PassType::FreeKick | PassType::Corner | PassType::GoalKick
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyPart {
    Head,
    #[serde(rename = "Keeper Arm")]
    KeeperArm,
    #[serde(rename = "Left Foot")]
    LeftFoot,
    #[serde(rename = "Right Foot")]
    RightFoot,
    #[serde(rename = "Drop Kick")]
    DropKick,
    #[serde(rename = "No Touch")]
    NoTouch,
    Other,
}

impl BodyPart {
    pub fn is_foot(&self) -> bool {
        matches!(self, BodyPart::LeftFoot | BodyPart::RightFoot)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PassData {
    pub length: Option<f64>,
    pub angle: Option<f64>,
    pub end_location: Option<Location>,
    pub recipient: Option<String>,
    pub outcome: PassOutcome,
    #[serde(rename = "type")]
    pub kind: Option<PassType>,
    pub body_part: Option<BodyPart>,
    pub cross: bool,
    pub through_ball: bool,
    pub goal_assist: bool,
    pub shot_assist: bool,
    pub aerial_won: bool,
    pub line_breaking: bool,
    pub assisted_shot_id: Option<String>,
}

impl PassData {
    pub fn is_complete(&self) -> bool {
        self.outcome.is_complete()
    }

    pub fn is_set_piece(&self) -> bool {
        self.kind.map(|k| k.is_set_piece()).unwrap_or(false)
    }

    pub fn end_x(&self) -> Option<f64> {
        self.end_location.map(|l| l.x)
    }

    pub fn end_y(&self) -> Option<f64> {
        self.end_location.map(|l| l.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    Goal,
    Saved,
    #[serde(rename = "Saved to Post", alias = "Saved To Post")]
    SavedToPost,
    Blocked,
    #[serde(rename = "Off T")]
    OffTarget,
    Post,
    Wayward,
    #[serde(rename = "Saved Off Target", alias = "Saved Off T")]
    SavedOffTarget,
}

impl ShotOutcome {
    pub fn is_on_target(&self) -> bool {
        matches!(self, ShotOutcome::Saved | ShotOutcome::Goal | ShotOutcome::SavedToPost)
    }

    /// A keeper got a hand to it.
    pub fn is_saved(&self) -> bool {
        matches!(self, ShotOutcome::Saved | ShotOutcome::SavedToPost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotType {
    #[serde(rename = "Open Play")]
    OpenPlay,
    #[serde(rename = "Free Kick")]
    FreeKick,
    Penalty,
    Corner,
    #[serde(rename = "Kick Off")]
    Kickoff,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotData {
    pub outcome: Option<ShotOutcome>,
    pub statsbomb_xg: Option<f64>,
    /// Post-shot ("execution") expected goals, when the provider supplies it.
    pub execution_xg: Option<f64>,
    pub end_location: Option<Location>,
    #[serde(rename = "type")]
    pub kind: Option<ShotType>,
    pub key_pass_id: Option<String>,
    pub aerial_won: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarryData {
    pub end_location: Location,
}

impl CarryData {
    pub fn end_x(&self) -> f64 {
        self.end_location.x
    }
}

/// Ball receipt outcome; omitted means the receipt succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReceiptOutcome {
    #[default]
    Complete,
    Incomplete,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BallReceiptData {
    pub outcome: ReceiptOutcome,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BallRecoveryData {
    pub offensive: bool,
    pub recovery_failure: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuelType {
    Tackle,
    #[serde(rename = "Aerial Lost")]
    AerialLost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuelOutcome {
    Won,
    Success,
    #[serde(rename = "Success In Play")]
    SuccessInPlay,
    #[serde(rename = "Success Out")]
    SuccessOut,
    #[serde(rename = "Lost In Play")]
    LostInPlay,
    #[serde(rename = "Lost Out")]
    LostOut,
    Drawn,
}

impl DuelOutcome {
    pub fn is_won(&self) -> bool {
        matches!(
            self,
            DuelOutcome::Won
                | DuelOutcome::Success
                | DuelOutcome::SuccessInPlay
                | DuelOutcome::SuccessOut
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelData {
    #[serde(rename = "type")]
    pub kind: Option<DuelType>,
    pub outcome: Option<DuelOutcome>,
}

impl DuelData {
    pub fn is_tackle(&self) -> bool {
        self.kind == Some(DuelType::Tackle)
    }

    pub fn is_aerial_lost(&self) -> bool {
        self.kind == Some(DuelType::AerialLost)
    }
}

/// Dribble outcome; omitted means the take-on succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DribbleOutcome {
    #[default]
    Complete,
    Incomplete,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DribbleData {
    pub outcome: DribbleOutcome,
}

impl DribbleData {
    pub fn is_complete(&self) -> bool {
        matches!(self.outcome, DribbleOutcome::Complete)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InterceptionData {
    pub outcome: Option<DuelOutcome>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearanceData {
    pub aerial_won: bool,
    pub body_part: Option<BodyPart>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MiscontrolData {
    pub aerial_won: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FoulWonData {
    pub defensive: bool,
    pub advantage: bool,
    pub penalty: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FoulCommittedData {
    pub offensive: bool,
    pub advantage: bool,
    pub penalty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FiftyFiftyOutcome {
    Won,
    #[serde(rename = "Success To Team")]
    SuccessToTeam,
    Lost,
    #[serde(rename = "Success To Opposition")]
    SuccessToOpposition,
}

impl FiftyFiftyOutcome {
    pub fn is_won(&self) -> bool {
        matches!(self, FiftyFiftyOutcome::Won | FiftyFiftyOutcome::SuccessToTeam)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FiftyFiftyData {
    pub outcome: Option<FiftyFiftyOutcome>,
}

/// Goalkeeper action attributes.
///
/// The goalkeeper type/outcome vocabularies are long-tailed and open-ended
/// (the provider keeps adding variants), so they stay as strings; the
/// aggregators match on the handful of values they care about.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalkeeperData {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub outcome: Option<String>,
}

impl GoalkeeperData {
    pub fn kind_is(&self, kind: &str) -> bool {
        self.kind.as_deref() == Some(kind)
    }

    pub fn outcome_is(&self, outcome: &str) -> bool {
        self.outcome.as_deref() == Some(outcome)
    }

    pub fn outcome_in(&self, outcomes: &[&str]) -> bool {
        self.outcome
            .as_deref()
            .map(|o| outcomes.contains(&o))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstitutionData {
    /// Player coming on for the one this event is attributed to.
    pub replacement: String,
    #[serde(default)]
    pub outcome: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineupPlayer {
    pub player_id: u64,
    pub player_name: String,
    #[serde(default)]
    pub jersey_number: Option<u32>,
    #[serde(default)]
    pub position: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tactics {
    pub formation: Option<u32>,
    pub lineup: Vec<LineupPlayer>,
}

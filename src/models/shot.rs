//! ShotEvent and its enumerated tags (shot type, result).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a recorded shot.
pub type ShotId = Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Unique identifier for a player (hitter, receiver, rally winner).
pub type PlayerId = Uuid;

/// Kind of stroke. Only the two serves may open a rally.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum ShotType {
    #[serde(rename = "short serve")]
    ShortServe,
    #[serde(rename = "long serve")]
    LongServe,
    #[serde(rename = "clear")]
    Clear,
    #[serde(rename = "drop")]
    Drop,
    #[serde(rename = "smash")]
    Smash,
    #[serde(rename = "drive")]
    Drive,
    #[serde(rename = "net shot")]
    NetShot,
    #[serde(rename = "lift")]
    Lift,
    #[serde(rename = "push")]
    Push,
    #[serde(rename = "hairpin")]
    Hairpin,
    #[serde(rename = "block")]
    Block,
    #[serde(rename = "cut")]
    Cut,
    #[serde(rename = "kill")]
    Kill,
    /// Any tag we don't recognise. Never a serve.
    #[serde(rename = "unknown")]
    #[serde(other)]
    Unknown,
}

impl ShotType {
    /// True for the shot types that open a rally.
    pub fn is_serve(self) -> bool {
        matches!(self, ShotType::ShortServe | ShotType::LongServe)
    }
}

/// Outcome of a single shot.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotResult {
    /// The hitter won the rally with this shot.
    Point,
    /// The hitter faulted; the receiver wins the rally.
    Miss,
    #[default]
    Continue,
}

impl ShotResult {
    /// `Point` and `Miss` end a rally.
    pub fn is_terminal(self) -> bool {
        matches!(self, ShotResult::Point | ShotResult::Miss)
    }
}

/// One recorded shot. Read-only input to the rally engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShotEvent {
    pub id: ShotId,
    pub match_id: MatchId,
    /// Only used for ordering within a match; not assumed to be wall-clock time.
    pub timestamp: f64,
    pub shot_type: ShotType,
    pub hit_player: PlayerId,
    pub receive_player: PlayerId,
    #[serde(default)]
    pub result: ShotResult,
}

impl ShotEvent {
    /// Create a shot with a fresh id.
    pub fn new(
        match_id: MatchId,
        timestamp: f64,
        shot_type: ShotType,
        hit_player: PlayerId,
        receive_player: PlayerId,
        result: ShotResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            match_id,
            timestamp,
            shot_type,
            hit_player,
            receive_player,
            result,
        }
    }

    /// Winner implied by this shot's result, if it ends a rally.
    pub fn winner(&self) -> Option<PlayerId> {
        match self.result {
            ShotResult::Point => Some(self.hit_player),
            ShotResult::Miss => Some(self.receive_player),
            ShotResult::Continue => None,
        }
    }
}

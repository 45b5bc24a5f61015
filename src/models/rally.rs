//! Rally: a reconstructed, closed sequence of shots.

use crate::models::shot::{MatchId, PlayerId, ShotEvent, ShotType};
use serde::{Deserialize, Serialize};

/// Sequential rally number within one reconstruction run (starts at 1).
pub type RallyId = u32;

/// A completed rally. Built fresh on every analysis; never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rally {
    pub id: RallyId,
    pub match_id: MatchId,
    /// Ordered shots; never empty.
    pub shots: Vec<ShotEvent>,
    /// Rally length in shots (`shots.len()`).
    pub count: usize,
    /// None if the last shot carried no point/miss.
    pub winner: Option<PlayerId>,
    /// Shot type of the first shot. Usually a serve, but not enforced.
    pub serve_type: ShotType,
    /// Shot type of the last shot.
    pub winning_shot: ShotType,
    /// True iff a subject player was given and won this rally.
    pub is_win: bool,
}

impl Rally {
    /// Build a rally from its shots. Returns None for an empty slice.
    pub fn from_shots(id: RallyId, shots: Vec<ShotEvent>, subject: Option<PlayerId>) -> Option<Self> {
        let first = shots.first()?;
        let last = shots.last()?;
        let winner = last.winner();
        Some(Self {
            id,
            match_id: first.match_id,
            serve_type: first.shot_type,
            winning_shot: last.shot_type,
            is_win: subject.is_some() && subject == winner,
            winner,
            count: shots.len(),
            shots,
        })
    }
}

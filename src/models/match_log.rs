//! MatchLog: the recorded shots of one match, kept in timestamp order.

use crate::logic::{analyze_rallies, parse_shots_csv, reconstruct_rallies};
use crate::models::report::AnalysisReport;
use crate::models::rally::Rally;
use crate::models::shot::{MatchId, PlayerId, ShotEvent, ShotId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use uuid::Uuid;

/// Errors from editing or importing a match log.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchLogError {
    /// No match with this id.
    MatchNotFound(MatchId),
    /// Shot not found in this match.
    ShotNotFound(ShotId),
    /// A shot with this id is already recorded (or repeated in the same batch).
    DuplicateShot(ShotId),
    /// Shot belongs to a different match.
    WrongMatch { shot: ShotId, expected: MatchId, found: MatchId },
    /// Timestamp is NaN or infinite and cannot be ordered.
    InvalidTimestamp(ShotId),
    /// Match name is empty after trimming.
    InvalidName,
    /// Malformed CSV row.
    Csv { line: u64, message: String },
}

impl std::fmt::Display for MatchLogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchLogError::MatchNotFound(_) => write!(f, "Match not found"),
            MatchLogError::ShotNotFound(_) => write!(f, "Shot not found"),
            MatchLogError::DuplicateShot(id) => write!(f, "Shot {} is already recorded", id),
            MatchLogError::WrongMatch { shot, expected, found } => write!(
                f,
                "Shot {} belongs to match {}, not {}",
                shot, found, expected
            ),
            MatchLogError::InvalidTimestamp(id) => {
                write!(f, "Shot {} has a timestamp that is not a finite number", id)
            }
            MatchLogError::InvalidName => write!(f, "Match name must not be empty"),
            MatchLogError::Csv { line, message } => write!(f, "CSV line {}: {}", line, message),
        }
    }
}

impl std::error::Error for MatchLogError {}

/// One match: a name plus its shots in nondecreasing timestamp order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchLog {
    pub id: MatchId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Always sorted by timestamp (stable, so equal timestamps keep insertion order).
    pub shots: Vec<ShotEvent>,
}

impl MatchLog {
    /// Create an empty match log. A blank name falls back to "Untitled match".
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = name.trim();
        Self {
            id: Uuid::new_v4(),
            name: if name.is_empty() {
                "Untitled match".to_string()
            } else {
                name.to_string()
            },
            created_at: Utc::now(),
            shots: Vec::new(),
        }
    }

    /// Rename the match. Names are trimmed and must not be empty.
    pub fn rename(&mut self, name: &str) -> Result<(), MatchLogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MatchLogError::InvalidName);
        }
        self.name = name.to_string();
        Ok(())
    }

    /// Add a batch of shots. Either every shot is added or none is.
    ///
    /// Shots must belong to this match, have unique ids and finite timestamps.
    /// The log is re-sorted by timestamp afterwards, so callers may submit out of order.
    pub fn add_shots(&mut self, shots: Vec<ShotEvent>) -> Result<(), MatchLogError> {
        let mut seen: HashSet<ShotId> = self.shots.iter().map(|s| s.id).collect();
        for shot in &shots {
            if shot.match_id != self.id {
                return Err(MatchLogError::WrongMatch {
                    shot: shot.id,
                    expected: self.id,
                    found: shot.match_id,
                });
            }
            if !shot.timestamp.is_finite() {
                return Err(MatchLogError::InvalidTimestamp(shot.id));
            }
            if !seen.insert(shot.id) {
                return Err(MatchLogError::DuplicateShot(shot.id));
            }
        }
        self.shots.extend(shots);
        self.shots.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        Ok(())
    }

    /// Parse CSV text and add the shots (see [`parse_shots_csv`]). Returns how many were added.
    pub fn import_csv(&mut self, text: &str) -> Result<usize, MatchLogError> {
        let shots = parse_shots_csv(self.id, text)?;
        let added = shots.len();
        self.add_shots(shots)?;
        Ok(added)
    }

    /// Remove a shot by id.
    pub fn remove_shot(&mut self, shot_id: ShotId) -> Result<ShotEvent, MatchLogError> {
        let idx = self
            .shots
            .iter()
            .position(|s| s.id == shot_id)
            .ok_or(MatchLogError::ShotNotFound(shot_id))?;
        Ok(self.shots.remove(idx))
    }

    /// Distinct players that hit or received a shot in this match.
    pub fn players(&self) -> BTreeSet<PlayerId> {
        self.shots
            .iter()
            .flat_map(|s| [s.hit_player, s.receive_player])
            .collect()
    }

    /// Completed rallies of this match, with wins counted for `subject`.
    pub fn rallies(&self, subject: Option<PlayerId>) -> Vec<Rally> {
        reconstruct_rallies(&self.shots, Some(self.id), subject)
    }

    /// Rally statistics of this match for `subject`.
    pub fn analyze(&self, subject: Option<PlayerId>) -> AnalysisReport {
        analyze_rallies(&self.rallies(subject))
    }
}

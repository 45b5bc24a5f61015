//! CSV shot import.
//!
//! Expected header: `id,timestamp,shot_type,hit_player,receive_player,result`.
//! `id` may be left empty (a fresh id is assigned); an empty `result` means `continue`.

use crate::models::{MatchId, MatchLogError, PlayerId, ShotEvent, ShotId, ShotResult, ShotType};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
struct ShotRow {
    #[serde(default)]
    id: Option<ShotId>,
    timestamp: f64,
    shot_type: ShotType,
    hit_player: PlayerId,
    receive_player: PlayerId,
    #[serde(default)]
    result: Option<ShotResult>,
}

/// Parse CSV text into shots for `match_id`, in file order.
pub fn parse_shots_csv(match_id: MatchId, text: &str) -> Result<Vec<ShotEvent>, MatchLogError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut shots = Vec::new();
    for (idx, row) in reader.deserialize::<ShotRow>().enumerate() {
        // Header is line 1.
        let fallback_line = idx as u64 + 2;
        let row = row.map_err(|e| MatchLogError::Csv {
            line: e.position().map_or(fallback_line, |p| p.line()),
            message: e.to_string(),
        })?;
        shots.push(ShotEvent {
            id: row.id.unwrap_or_else(Uuid::new_v4),
            match_id,
            timestamp: row.timestamp,
            shot_type: row.shot_type,
            hit_player: row.hit_player,
            receive_player: row.receive_player,
            result: row.result.unwrap_or_default(),
        });
    }
    Ok(shots)
}

//! AnalysisReport and its breakdown tables.

use crate::models::shot::ShotType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `wins / total`, or 0 when there is nothing to divide by.
pub fn win_rate(wins: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        wins as f64 / total as f64
    }
}

/// Wins among rallies of one exact length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WinRateEntry {
    pub wins: usize,
    pub total: usize,
    /// Ratio in [0, 1].
    pub rate: f64,
}

impl WinRateEntry {
    pub fn new(wins: usize, total: usize) -> Self {
        Self {
            wins,
            total,
            rate: win_rate(wins, total),
        }
    }
}

/// Effectiveness of one serve type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServeStats {
    pub average_rally_length: f64,
    pub win_rate: f64,
    pub count: usize,
}

/// Per-serve breakdown. Rallies opened by anything else appear in neither bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServeAnalysis {
    pub short_serve: ServeStats,
    pub long_serve: ServeStats,
}

impl ServeAnalysis {
    /// Bucket for a serve type; None for non-serve types.
    pub fn get(&self, serve_type: ShotType) -> Option<&ServeStats> {
        match serve_type {
            ShotType::ShortServe => Some(&self.short_serve),
            ShotType::LongServe => Some(&self.long_serve),
            _ => None,
        }
    }
}

/// Coarse rally-length bucket.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RallyRange {
    /// 1-5 shots.
    Short,
    /// 6-10 shots.
    Medium,
    /// 11 shots or more.
    Long,
}

impl RallyRange {
    pub const ALL: [RallyRange; 3] = [RallyRange::Short, RallyRange::Medium, RallyRange::Long];

    /// Bucket a rally length falls into.
    pub fn for_count(count: usize) -> Self {
        match count {
            0..=5 => RallyRange::Short,
            6..=10 => RallyRange::Medium,
            _ => RallyRange::Long,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RallyRange::Short => "short (1-5)",
            RallyRange::Medium => "medium (6-10)",
            RallyRange::Long => "long (11+)",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeStats {
    pub label: String,
    pub win_rate: f64,
    pub count: usize,
}

impl RangeStats {
    pub fn new(range: RallyRange, wins: usize, count: usize) -> Self {
        Self {
            label: range.label().to_string(),
            win_rate: win_rate(wins, count),
            count,
        }
    }
}

/// Short/medium/long buckets; always all three present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RallyRangeAnalysis {
    pub short: RangeStats,
    pub medium: RangeStats,
    pub long: RangeStats,
}

impl RallyRangeAnalysis {
    pub fn get(&self, range: RallyRange) -> &RangeStats {
        match range {
            RallyRange::Short => &self.short,
            RallyRange::Medium => &self.medium,
            RallyRange::Long => &self.long,
        }
    }
}

impl Default for RallyRangeAnalysis {
    fn default() -> Self {
        Self {
            short: RangeStats::new(RallyRange::Short, 0, 0),
            medium: RangeStats::new(RallyRange::Medium, 0, 0),
            long: RangeStats::new(RallyRange::Long, 0, 0),
        }
    }
}

/// Statistics over a list of rallies. Maps are keyed by rally length.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub average_rally_count: f64,
    pub max_rally_count: usize,
    pub min_rally_count: usize,
    pub median_rally_count: f64,
    pub total_rallies: usize,
    pub win_rate_by_rally_count: BTreeMap<usize, WinRateEntry>,
    pub rally_count_distribution: BTreeMap<usize, usize>,
    pub serve_analysis: ServeAnalysis,
    pub rally_range_analysis: RallyRangeAnalysis,
}

impl AnalysisReport {
    /// Report for zero rallies: zero scalars, empty maps, three empty range buckets.
    pub fn empty() -> Self {
        Self::default()
    }
}

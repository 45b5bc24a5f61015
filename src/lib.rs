//! Badminton rally analysis: library with models and the rally/statistics engine.

pub mod logic;
pub mod models;

pub use logic::{analyze_rallies, analyze_shots, parse_shots_csv, reconstruct_rallies};
pub use models::{
    win_rate, AnalysisReport, MatchId, MatchLog, MatchLogError, PlayerId, Rally, RallyId,
    RallyRange, RallyRangeAnalysis, RangeStats, ServeAnalysis, ServeStats, ShotEvent, ShotId,
    ShotResult, ShotType, WinRateEntry,
};

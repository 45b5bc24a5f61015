//! Data structures for rally analysis: shots, rallies, reports, per-match shot logs.

mod match_log;
mod rally;
mod report;
mod shot;

pub use match_log::{MatchLog, MatchLogError};
pub use rally::{Rally, RallyId};
pub use report::{
    win_rate, AnalysisReport, RallyRange, RallyRangeAnalysis, RangeStats, ServeAnalysis,
    ServeStats, WinRateEntry,
};
pub use shot::{MatchId, PlayerId, ShotEvent, ShotId, ShotResult, ShotType};

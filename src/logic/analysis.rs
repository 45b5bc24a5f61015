//! Statistics over reconstructed rallies.

use crate::logic::rally::reconstruct_rallies;
use crate::models::{
    win_rate, AnalysisReport, MatchId, PlayerId, Rally, RallyRange, RallyRangeAnalysis,
    RangeStats, ServeAnalysis, ServeStats, ShotEvent, ShotType, WinRateEntry,
};
use std::collections::BTreeMap;

/// Running wins/total/length sum for one bucket.
#[derive(Clone, Copy, Default)]
struct Tally {
    wins: usize,
    total: usize,
    length_sum: usize,
}

impl Tally {
    fn add(&mut self, rally: &Rally) {
        self.total += 1;
        self.length_sum += rally.count;
        if rally.is_win {
            self.wins += 1;
        }
    }

    fn serve_stats(self) -> ServeStats {
        let average_rally_length = if self.total == 0 {
            0.0
        } else {
            self.length_sum as f64 / self.total as f64
        };
        ServeStats {
            average_rally_length,
            win_rate: win_rate(self.wins, self.total),
            count: self.total,
        }
    }
}

/// Compute the full report for a list of rallies.
///
/// Empty input gives [`AnalysisReport::empty`]. Every rate is a ratio in [0, 1]
/// and is 0 for an empty group.
pub fn analyze_rallies(rallies: &[Rally]) -> AnalysisReport {
    if rallies.is_empty() {
        return AnalysisReport::empty();
    }

    let mut counts: Vec<usize> = rallies.iter().map(|r| r.count).collect();
    counts.sort_unstable();
    let total_rallies = counts.len();
    let sum: usize = counts.iter().sum();

    // One grouping pass feeds both the win-rate table and the distribution.
    let mut by_count: BTreeMap<usize, Tally> = BTreeMap::new();
    let mut short_serve = Tally::default();
    let mut long_serve = Tally::default();
    let mut ranges = [Tally::default(); 3];
    let mut unbucketed = 0usize;

    for rally in rallies {
        by_count.entry(rally.count).or_default().add(rally);

        match rally.serve_type {
            ShotType::ShortServe => short_serve.add(rally),
            ShotType::LongServe => long_serve.add(rally),
            // Rallies not opened by a serve are left out of serve analysis on purpose.
            _ => unbucketed += 1,
        }

        let slot = match RallyRange::for_count(rally.count) {
            RallyRange::Short => 0,
            RallyRange::Medium => 1,
            RallyRange::Long => 2,
        };
        ranges[slot].add(rally);
    }

    if unbucketed > 0 {
        log::debug!(
            "{} rally(ies) excluded from serve analysis (not opened by a serve)",
            unbucketed
        );
    }

    let range_stats = |range: RallyRange, t: Tally| RangeStats::new(range, t.wins, t.total);

    AnalysisReport {
        average_rally_count: sum as f64 / total_rallies as f64,
        max_rally_count: counts[total_rallies - 1],
        min_rally_count: counts[0],
        median_rally_count: median(&counts),
        total_rallies,
        win_rate_by_rally_count: by_count
            .iter()
            .map(|(&len, t)| (len, WinRateEntry::new(t.wins, t.total)))
            .collect(),
        rally_count_distribution: by_count.iter().map(|(&len, t)| (len, t.total)).collect(),
        serve_analysis: ServeAnalysis {
            short_serve: short_serve.serve_stats(),
            long_serve: long_serve.serve_stats(),
        },
        rally_range_analysis: RallyRangeAnalysis {
            short: range_stats(RallyRange::Short, ranges[0]),
            medium: range_stats(RallyRange::Medium, ranges[1]),
            long: range_stats(RallyRange::Long, ranges[2]),
        },
    }
}

/// Median of an already sorted slice; mean of the two middle values for even length.
fn median(sorted: &[usize]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    let mid = n / 2;
    if n % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    }
}

/// Reconstruct rallies from `shots` and analyze them in one call.
pub fn analyze_shots(
    shots: &[ShotEvent],
    match_id: Option<MatchId>,
    subject: Option<PlayerId>,
) -> AnalysisReport {
    analyze_rallies(&reconstruct_rallies(shots, match_id, subject))
}

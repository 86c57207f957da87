//! Reduction of an evaluated window into a win/loss/push record.

use crate::data::models::{EnrichedGameLog, HitRateSummary, Outcome};

use super::stats::{mean, median};

/// Summarize a window of enriched logs into a hit-rate record.
///
/// The caller restricts the window (last 10, home-only, …); this function
/// reduces whatever it is given. Empty input yields the all-zero summary so
/// downstream consumers never divide by zero.
///
/// Invariant: `wins + losses + pushes == sample_size`, and the hit rate
/// excludes pushes from its denominator.
pub fn summarize_hit_rate(logs: &[EnrichedGameLog]) -> HitRateSummary {
    if logs.is_empty() {
        return HitRateSummary::empty();
    }

    let mut wins = 0u32;
    let mut losses = 0u32;
    let mut pushes = 0u32;
    for log in logs {
        match log.outcome {
            Outcome::Win => wins += 1,
            Outcome::Loss => losses += 1,
            Outcome::Push => pushes += 1,
        }
    }

    let decisive = wins + losses;
    let hit_rate = if decisive == 0 {
        0.0
    } else {
        wins as f64 / decisive as f64
    };

    let values: Vec<f64> = logs.iter().map(|l| l.stat_value).collect();

    HitRateSummary {
        sample_size: logs.len() as u32,
        wins,
        losses,
        pushes,
        hit_rate,
        average: mean(&values),
        median: median(&values),
    }
}

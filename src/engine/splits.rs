//! Situational splits, stat distribution, and line-proximity scoring.
//!
//! All scores are clamped to 0–100. The numeric thresholds are policy
//! constants carried over from the reference behaviour, not derived.

use crate::data::models::{
    DistributionBlock, EnrichedGameLog, HistogramBucket, Outcome, SensitivityBlock, SplitsBlock,
    StabilityBlock,
};

use super::hit_rate::summarize_hit_rate;
use super::stats::{mean, std_dev};

/// Number of histogram buckets (four below the line, four at/above).
pub const HISTOGRAM_BUCKETS: usize = 8;
/// Buckets never get narrower than this many stat units.
pub const MIN_BUCKET_WIDTH: f64 = 2.0;
/// Scale factor mapping the coefficient of variation onto 0–100.
pub const VOLATILITY_SCALE: f64 = 300.0;
/// A game counts as "near the line" within this absolute distance.
pub const NEAR_LINE_MARGIN: f64 = 1.0;
/// Blend weights for the sensitivity score.
pub const NEAR_LINE_WEIGHT: f64 = 0.7;
pub const PUSH_RATE_WEIGHT: f64 = 0.3;
/// Minutes std dev above which usage is flagged as highly volatile.
pub const MINUTES_HIGH_VOLATILITY: f64 = 6.0;
/// Minutes std dev above which usage is flagged as moderately volatile.
pub const MINUTES_MODERATE_VOLATILITY: f64 = 3.0;
/// Average minutes below which the sample is flagged as limited-minutes.
pub const LIMITED_MINUTES_FLOOR: f64 = 20.0;
/// A game is a "short outing" when this many minutes below the sample average.
pub const SHORT_OUTING_GAP: f64 = 5.0;
/// Short outings are only flagged once there are at least this many.
pub const SHORT_OUTING_FLAG_COUNT: usize = 3;

/// Partition a window (typically the last 20 games) by venue and rest days,
/// summarizing each partition independently.
pub fn compute_splits(logs: &[EnrichedGameLog]) -> SplitsBlock {
    let home: Vec<EnrichedGameLog> = logs.iter().filter(|l| l.log.home).cloned().collect();
    let away: Vec<EnrichedGameLog> = logs.iter().filter(|l| !l.log.home).cloned().collect();
    let rest0: Vec<EnrichedGameLog> = logs.iter().filter(|l| l.rest_days == 0).cloned().collect();
    let rest1: Vec<EnrichedGameLog> = logs.iter().filter(|l| l.rest_days == 1).cloned().collect();
    let rest2_plus: Vec<EnrichedGameLog> =
        logs.iter().filter(|l| l.rest_days >= 2).cloned().collect();

    SplitsBlock {
        home: summarize_hit_rate(&home),
        away: summarize_hit_rate(&away),
        rest0: summarize_hit_rate(&rest0),
        rest1: summarize_hit_rate(&rest1),
        rest2_plus: summarize_hit_rate(&rest2_plus),
    }
}

/// Stat-value distribution around the line over a window.
///
/// The histogram has [`HISTOGRAM_BUCKETS`] half-open buckets of width
/// `max(MIN_BUCKET_WIDTH, std/2)` centred on the line; values past either
/// edge fold into the outermost bucket. Volatility is the coefficient of
/// variation scaled by [`VOLATILITY_SCALE`], capped at 100 and defined as 0
/// when the mean is 0.
pub fn compute_distribution(logs: &[EnrichedGameLog], line: f64) -> DistributionBlock {
    let values: Vec<f64> = logs.iter().map(|l| l.stat_value).collect();
    let m = mean(&values);
    let sd = std_dev(&values, Some(m));

    let width = (sd / 2.0).max(MIN_BUCKET_WIDTH);
    let origin = line - width * (HISTOGRAM_BUCKETS as f64 / 2.0);

    let mut buckets: Vec<HistogramBucket> = (0..HISTOGRAM_BUCKETS)
        .map(|i| HistogramBucket {
            min: origin + width * i as f64,
            max: origin + width * (i + 1) as f64,
            count: 0,
        })
        .collect();
    for &v in &values {
        let idx = ((v - origin) / width).floor();
        let idx = idx.clamp(0.0, (HISTOGRAM_BUCKETS - 1) as f64) as usize;
        buckets[idx].count += 1;
    }

    let volatility_score = if m == 0.0 {
        0
    } else {
        ((sd / m) * VOLATILITY_SCALE).round().min(100.0) as u32
    };

    DistributionBlock {
        mean: m,
        std_dev: sd,
        buckets,
        volatility_score,
    }
}

/// How often results land within [`NEAR_LINE_MARGIN`] of the line, and how
/// often they push, blended into a 0–100 score.
pub fn compute_sensitivity(logs: &[EnrichedGameLog], line: f64) -> SensitivityBlock {
    if logs.is_empty() {
        return SensitivityBlock {
            near_line_rate: 0.0,
            push_rate: 0.0,
            sensitivity_score: 0,
        };
    }

    let n = logs.len() as f64;
    let near = logs
        .iter()
        .filter(|l| (l.stat_value - line).abs() <= NEAR_LINE_MARGIN)
        .count() as f64;
    let pushed = logs.iter().filter(|l| l.outcome == Outcome::Push).count() as f64;

    let near_line_rate = near / n;
    let push_rate = pushed / n;
    let sensitivity_score =
        ((near_line_rate * NEAR_LINE_WEIGHT + push_rate * PUSH_RATE_WEIGHT) * 100.0).round() as u32;

    SensitivityBlock {
        near_line_rate,
        push_rate,
        sensitivity_score,
    }
}

/// Minutes consistency over a window (typically the last 10 games), with
/// reliability notes in rule-declaration order.
pub fn compute_stability(logs: &[EnrichedGameLog]) -> StabilityBlock {
    let minutes: Vec<f64> = logs.iter().map(|l| l.log.minutes).collect();
    let avg = mean(&minutes);
    let sd = std_dev(&minutes, Some(avg));
    let stability_score = (100.0 - sd * 10.0).round().max(0.0) as u32;

    let mut notes = Vec::new();
    if sd > MINUTES_HIGH_VOLATILITY {
        notes.push("Minutes are highly volatile across the sample".to_string());
    } else if sd > MINUTES_MODERATE_VOLATILITY {
        notes.push("Minutes are moderately volatile across the sample".to_string());
    }
    if !minutes.is_empty() && avg < LIMITED_MINUTES_FLOOR {
        notes.push("Limited minutes: sample average is under 20 per game".to_string());
    }
    let short_outings = minutes
        .iter()
        .filter(|&&m| m < avg - SHORT_OUTING_GAP)
        .count();
    if short_outings >= SHORT_OUTING_FLAG_COUNT {
        notes.push(format!(
            "{} games ran more than {:.0} minutes below the sample average",
            short_outings, SHORT_OUTING_GAP
        ));
    }

    StabilityBlock {
        minutes_std_dev: sd,
        average_minutes: avg,
        stability_score,
        notes,
    }
}

//! Recent-form analysis: rolling averages, minutes usage, slope direction.

use crate::data::models::{
    EnrichedGameLog, GameRow, MinutesTrend, OutcomeStreak, StatType, TrendBlock, TrendDirection,
};

use super::outcome::last_n;
use super::stats::{linear_regression_slope, mean};

/// Slope magnitude (stat units per game) beyond which a trend counts as UP
/// or DOWN rather than FLAT. Policy constant, not derived.
pub const TREND_SLOPE_THRESHOLD: f64 = 0.3;

/// Games shown as verbatim display rows.
const DISPLAY_GAMES: usize = 5;
/// Games the regression and rolling-average math runs over.
const TREND_GAMES: usize = 10;
/// Trailing window of the rolling average.
const ROLLING_WINDOW: usize = 3;

/// Analyze recent form over the last [`TREND_GAMES`] games.
///
/// `enriched` is the full most-recent-first series for the player (the season
/// average in the minutes trend needs all of it); the trend math itself only
/// reads the most recent games. Regression and rolling averages are computed
/// oldest-first.
pub fn analyze_trend(enriched: &[EnrichedGameLog], stat_type: StatType) -> TrendBlock {
    let recent_games: Vec<GameRow> = last_n(enriched, DISPLAY_GAMES)
        .iter()
        .map(|e| GameRow {
            date: e.log.date,
            opponent: e.log.opponent.clone(),
            home: e.log.home,
            minutes: e.log.minutes,
            stat_value: e.stat_value,
            outcome: e.outcome,
            rest_days: e.rest_days,
        })
        .collect();

    // Oldest-first stat series for the last 10 games
    let mut stat_series: Vec<f64> = last_n(enriched, TREND_GAMES)
        .iter()
        .map(|e| e.stat_value)
        .collect();
    stat_series.reverse();

    let rolling_averages = rolling_average(&stat_series, ROLLING_WINDOW);

    let mut minutes_series: Vec<f64> = last_n(enriched, DISPLAY_GAMES)
        .iter()
        .map(|e| e.log.minutes)
        .collect();
    minutes_series.reverse();

    let slope = linear_regression_slope(&stat_series);
    let direction = if slope > TREND_SLOPE_THRESHOLD {
        TrendDirection::Up
    } else if slope < -TREND_SLOPE_THRESHOLD {
        TrendDirection::Down
    } else {
        TrendDirection::Flat
    };

    // Over the whole series, so a run longer than the display rows is not
    // understated
    let streak = enriched.first().map(|first| OutcomeStreak {
        outcome: first.outcome,
        length: enriched
            .iter()
            .take_while(|e| e.outcome == first.outcome)
            .count() as u32,
    });

    let season_minutes: Vec<f64> = enriched.iter().map(|e| e.log.minutes).collect();
    let last5_average = mean(&minutes_series);
    let season_average = mean(&season_minutes);
    let change = last5_average - season_average;
    let pct_change = if season_average == 0.0 {
        0.0
    } else {
        change / season_average * 100.0
    };

    TrendBlock {
        stat_type,
        recent_games,
        rolling_averages,
        minutes_series,
        slope,
        direction,
        streak,
        minutes_trend: MinutesTrend {
            last5_average,
            season_average,
            change,
            pct_change,
        },
    }
}

/// Trailing-window averages: element `i` averages `values[max(0, i−w+1)..=i]`.
fn rolling_average(values: &[f64], window: usize) -> Vec<f64> {
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let start = (i + 1).saturating_sub(window);
            mean(&values[start..=i])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::{GameLog, Outcome, PropQuery, Side};
    use crate::engine::outcome::enrich_logs;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn build_series(points: &[u32], minutes: &[f64]) -> Vec<EnrichedGameLog> {
        assert_eq!(points.len(), minutes.len());
        let logs: Vec<GameLog> = points
            .iter()
            .zip(minutes)
            .enumerate()
            .map(|(i, (&p, &m))| GameLog {
                date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
                    + chrono::Days::new(i as u64 * 2),
                minutes: m,
                points: p,
                rebounds: 6,
                assists: 5,
                home: i % 2 == 0,
                opponent: "LAL".into(),
            })
            .collect();
        let query = PropQuery {
            player_name: "Anthony Edwards".into(),
            stat_type: StatType::Points,
            line: 24.5,
            side: Side::Over,
            game_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        };
        enrich_logs(&logs, &query)
    }

    #[test]
    fn test_rolling_average_trailing_window() {
        let values = [10.0, 20.0, 30.0, 40.0];
        let rolled = rolling_average(&values, 3);
        assert_relative_eq!(rolled[0], 10.0, epsilon = 1e-9);
        assert_relative_eq!(rolled[1], 15.0, epsilon = 1e-9);
        assert_relative_eq!(rolled[2], 20.0, epsilon = 1e-9);
        assert_relative_eq!(rolled[3], 30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_trend_direction_up() {
        // Strictly rising scoring, oldest to newest
        let points: Vec<u32> = (0..10).map(|i| 18 + 2 * i).collect();
        let minutes = vec![34.0; 10];
        let enriched = build_series(&points, &minutes);
        let block = analyze_trend(&enriched, StatType::Points);
        assert_relative_eq!(block.slope, 2.0, epsilon = 1e-9);
        assert_eq!(block.direction, TrendDirection::Up);
    }

    #[test]
    fn test_trend_direction_down() {
        let points: Vec<u32> = (0..10).map(|i| 40 - 2 * i).collect();
        let minutes = vec![34.0; 10];
        let enriched = build_series(&points, &minutes);
        let block = analyze_trend(&enriched, StatType::Points);
        assert_eq!(block.direction, TrendDirection::Down);
    }

    #[test]
    fn test_trend_direction_flat_within_threshold() {
        let points = vec![25; 10];
        let minutes = vec![34.0; 10];
        let enriched = build_series(&points, &minutes);
        let block = analyze_trend(&enriched, StatType::Points);
        assert_relative_eq!(block.slope, 0.0, epsilon = 1e-9);
        assert_eq!(block.direction, TrendDirection::Flat);
    }

    #[test]
    fn test_recent_games_newest_first() {
        let points: Vec<u32> = (0..8).map(|i| 20 + i).collect();
        let minutes = vec![34.0; 8];
        let enriched = build_series(&points, &minutes);
        let block = analyze_trend(&enriched, StatType::Points);
        assert_eq!(block.recent_games.len(), 5);
        assert!(block.recent_games[0].date > block.recent_games[4].date);
        assert_relative_eq!(block.recent_games[0].stat_value, 27.0, epsilon = 1e-9);
    }

    #[test]
    fn test_minutes_series_oldest_first() {
        let points = vec![25; 6];
        let minutes = vec![30.0, 31.0, 32.0, 33.0, 34.0, 35.0];
        let enriched = build_series(&points, &minutes);
        let block = analyze_trend(&enriched, StatType::Points);
        assert_eq!(block.minutes_series, vec![31.0, 32.0, 33.0, 34.0, 35.0]);
    }

    #[test]
    fn test_minutes_trend_change() {
        // Season of 15 games at 30 minutes, last 5 at 36
        let points = vec![25; 15];
        let mut minutes = vec![30.0; 10];
        minutes.extend(vec![36.0; 5]);
        let enriched = build_series(&points, &minutes);
        let block = analyze_trend(&enriched, StatType::Points);
        assert_relative_eq!(block.minutes_trend.last5_average, 36.0, epsilon = 1e-9);
        assert_relative_eq!(block.minutes_trend.season_average, 32.0, epsilon = 1e-9);
        assert_relative_eq!(block.minutes_trend.change, 4.0, epsilon = 1e-9);
        assert_relative_eq!(block.minutes_trend.pct_change, 12.5, epsilon = 1e-9);
    }

    #[test]
    fn test_streak_spans_more_than_display_rows() {
        // Five losses, then seven straight wins against the 24.5 line
        let mut points = vec![20; 5];
        points.extend(vec![30; 7]);
        let minutes = vec![34.0; 12];
        let enriched = build_series(&points, &minutes);
        let block = analyze_trend(&enriched, StatType::Points);
        let streak = block.streak.expect("streak");
        assert_eq!(streak.outcome, Outcome::Win);
        assert_eq!(streak.length, 7);
    }

    #[test]
    fn test_streak_of_one_after_broken_run() {
        let points = vec![30, 30, 30, 20]; // newest game is a loss
        let minutes = vec![34.0; 4];
        let enriched = build_series(&points, &minutes);
        let streak = analyze_trend(&enriched, StatType::Points)
            .streak
            .expect("streak");
        assert_eq!(streak.outcome, Outcome::Loss);
        assert_eq!(streak.length, 1);
    }

    #[test]
    fn test_empty_series_is_safe() {
        let block = analyze_trend(&[], StatType::Points);
        assert!(block.recent_games.is_empty());
        assert!(block.rolling_averages.is_empty());
        assert!(block.streak.is_none());
        assert_relative_eq!(block.slope, 0.0, epsilon = 1e-9);
        assert_eq!(block.direction, TrendDirection::Flat);
        assert_relative_eq!(block.minutes_trend.pct_change, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_outcomes_carried_into_rows() {
        let points = vec![30, 20, 30, 20, 30];
        let minutes = vec![34.0; 5];
        let enriched = build_series(&points, &minutes);
        let block = analyze_trend(&enriched, StatType::Points);
        // Newest first: 30, 20, 30, 20, 30 oldest-first → newest is 30 (win vs 24.5)
        assert_eq!(block.recent_games[0].outcome, Outcome::Win);
        assert_eq!(block.recent_games[1].outcome, Outcome::Loss);
    }
}

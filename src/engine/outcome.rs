//! Outcome classification and per-query log enrichment.
//!
//! Classification is exact: a half-integer line (26.5) can never push against
//! integer stat values, and that is intentional — no tolerance band is
//! applied around the line.

use chrono::NaiveDate;

use crate::data::models::{EnrichedGameLog, GameLog, Outcome, PropQuery, Side};

/// Deemed rest days before the first game of a series, when no prior game
/// exists to measure against.
pub const FIRST_GAME_REST_DAYS: u32 = 3;

/// Classify a single stat value against a line and side.
///
/// WIN when the side's comparison is strictly satisfied (value > line for
/// OVER, value < line for UNDER), PUSH on an exact tie, LOSS otherwise.
/// Pure and total — no error conditions.
pub fn evaluate_outcome(stat_value: f64, line: f64, side: Side) -> Outcome {
    debug_assert!(line > 0.0, "line must be positive");
    if stat_value == line {
        return Outcome::Push;
    }
    let won = match side {
        Side::Over => stat_value > line,
        Side::Under => stat_value < line,
    };
    if won {
        Outcome::Win
    } else {
        Outcome::Loss
    }
}

/// Full rest days between two games: floor of the calendar-day gap minus the
/// game day itself, clamped to ≥ 0. A missing predecessor (first game of the
/// series) is deemed [`FIRST_GAME_REST_DAYS`].
pub fn rest_days_between(current: NaiveDate, previous: Option<NaiveDate>) -> u32 {
    match previous {
        None => FIRST_GAME_REST_DAYS,
        Some(prev) => {
            let gap = (current - prev).num_days() - 1;
            gap.max(0) as u32
        }
    }
}

/// Derive the per-query fields for every game log and apply the no-look-ahead
/// cutoff.
///
/// Rest days are computed over the full chronological series before the
/// cutoff is applied, so the predecessor of each game is its true prior game.
/// The result is stored most-recent-first; "last N" windows are its first N
/// elements.
pub fn enrich_logs(logs: &[GameLog], query: &PropQuery) -> Vec<EnrichedGameLog> {
    let mut chronological: Vec<GameLog> = logs.to_vec();
    chronological.sort_by_key(|g| g.date);

    let mut enriched: Vec<EnrichedGameLog> = Vec::with_capacity(chronological.len());
    let mut previous_date: Option<NaiveDate> = None;
    for log in chronological {
        let rest_days = rest_days_between(log.date, previous_date);
        previous_date = Some(log.date);

        // Games on or after the queried date carry no predictive information.
        if log.date >= query.game_date {
            continue;
        }

        let stat_value = log.stat(query.stat_type);
        let outcome = evaluate_outcome(stat_value, query.line, query.side);
        enriched.push(EnrichedGameLog {
            log,
            stat_value,
            outcome,
            rest_days,
        });
    }

    enriched.reverse();
    enriched
}

/// The chronologically nearest `n` games before the cutoff
/// (input is most-recent-first, as produced by [`enrich_logs`]).
pub fn last_n(enriched: &[EnrichedGameLog], n: usize) -> &[EnrichedGameLog] {
    &enriched[..n.min(enriched.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::StatType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_log(day: u32, points: u32) -> GameLog {
        GameLog {
            date: date(2026, 1, day),
            minutes: 34.0,
            points,
            rebounds: 5,
            assists: 4,
            home: day % 2 == 0,
            opponent: "DEN".into(),
        }
    }

    fn make_query(line: f64, side: Side, day: u32) -> PropQuery {
        PropQuery {
            player_name: "Anthony Edwards".into(),
            stat_type: StatType::Points,
            line,
            side,
            game_date: date(2026, 1, day),
        }
    }

    #[test]
    fn test_push_on_exact_tie() {
        assert_eq!(evaluate_outcome(27.5, 27.5, Side::Over), Outcome::Push);
        assert_eq!(evaluate_outcome(27.5, 27.5, Side::Under), Outcome::Push);
    }

    #[test]
    fn test_over_win_loss() {
        assert_eq!(evaluate_outcome(28.0, 27.5, Side::Over), Outcome::Win);
        assert_eq!(evaluate_outcome(27.0, 27.5, Side::Over), Outcome::Loss);
    }

    #[test]
    fn test_under_win_loss() {
        assert_eq!(evaluate_outcome(27.0, 27.5, Side::Under), Outcome::Win);
        assert_eq!(evaluate_outcome(28.0, 27.5, Side::Under), Outcome::Loss);
    }

    #[test]
    fn test_half_line_never_pushes_integer_stats() {
        for v in 0..60 {
            assert_ne!(evaluate_outcome(v as f64, 26.5, Side::Over), Outcome::Push);
        }
    }

    #[test]
    fn test_rest_days_first_game_deemed() {
        assert_eq!(rest_days_between(date(2026, 1, 10), None), 3);
    }

    #[test]
    fn test_rest_days_back_to_back() {
        assert_eq!(
            rest_days_between(date(2026, 1, 11), Some(date(2026, 1, 10))),
            0
        );
    }

    #[test]
    fn test_rest_days_gap() {
        assert_eq!(
            rest_days_between(date(2026, 1, 14), Some(date(2026, 1, 10))),
            3
        );
    }

    #[test]
    fn test_rest_days_same_day_clamped() {
        // Degenerate double-header; clamps to 0 rather than going negative
        assert_eq!(
            rest_days_between(date(2026, 1, 10), Some(date(2026, 1, 10))),
            0
        );
    }

    #[test]
    fn test_enrich_no_look_ahead() {
        let logs = vec![make_log(5, 20), make_log(10, 30), make_log(15, 25)];
        let query = make_query(26.5, Side::Over, 15);
        let enriched = enrich_logs(&logs, &query);
        assert_eq!(enriched.len(), 2);
        // Most recent first, and the day-15 game is excluded
        assert_eq!(enriched[0].log.date, date(2026, 1, 10));
        assert_eq!(enriched[1].log.date, date(2026, 1, 5));
    }

    #[test]
    fn test_enrich_outcomes_and_stat_values() {
        let logs = vec![make_log(5, 20), make_log(10, 30)];
        let query = make_query(26.5, Side::Over, 20);
        let enriched = enrich_logs(&logs, &query);
        assert_eq!(enriched[0].stat_value, 30.0);
        assert_eq!(enriched[0].outcome, Outcome::Win);
        assert_eq!(enriched[1].stat_value, 20.0);
        assert_eq!(enriched[1].outcome, Outcome::Loss);
    }

    #[test]
    fn test_enrich_rest_days_chain() {
        // Days 5, 6, 9: first deemed 3, then back-to-back, then 2 full rest days
        let logs = vec![make_log(9, 25), make_log(5, 25), make_log(6, 25)];
        let query = make_query(26.5, Side::Over, 20);
        let enriched = enrich_logs(&logs, &query);
        assert_eq!(enriched[2].rest_days, FIRST_GAME_REST_DAYS);
        assert_eq!(enriched[1].rest_days, 0);
        assert_eq!(enriched[0].rest_days, 2);
    }

    #[test]
    fn test_enrich_selects_query_stat() {
        let mut log = make_log(5, 20);
        log.rebounds = 12;
        let query = PropQuery {
            stat_type: StatType::Rebounds,
            ..make_query(9.5, Side::Over, 20)
        };
        let enriched = enrich_logs(&[log], &query);
        assert_eq!(enriched[0].stat_value, 12.0);
        assert_eq!(enriched[0].outcome, Outcome::Win);
    }

    #[test]
    fn test_last_n_window() {
        let logs: Vec<GameLog> = (1..=15).map(|d| make_log(d, 25)).collect();
        let query = make_query(26.5, Side::Over, 28);
        let enriched = enrich_logs(&logs, &query);
        let window = last_n(&enriched, 10);
        assert_eq!(window.len(), 10);
        // Nearest 10 before the cutoff: days 6..=15
        assert_eq!(window[0].log.date, date(2026, 1, 15));
        assert_eq!(window[9].log.date, date(2026, 1, 6));
        // Asking for more than exists returns everything
        assert_eq!(last_n(&enriched, 50).len(), 15);
    }
}

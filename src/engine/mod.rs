//! The prop-card computation engine.
//!
//! Pure, synchronous, single-threaded: every entry point is a deterministic
//! function over immutable in-memory inputs. Fetching, caching, and batching
//! live in the surrounding layers; nothing here reads the clock, touches IO,
//! or keeps state between calls.

pub mod context;
pub mod hit_rate;
pub mod insights;
pub mod outcome;
pub mod splits;
pub mod stats;
pub mod trend;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::data::models::{GameLog, InjurySnapshot, PropCard, PropQuery};

pub use context::resolve_context;
pub use hit_rate::summarize_hit_rate;
pub use insights::{generate_insights, generate_insights_with_policy, InsightPolicy};
pub use outcome::{enrich_logs, evaluate_outcome, last_n};
pub use splits::{compute_distribution, compute_sensitivity, compute_splits, compute_stability};
pub use trend::analyze_trend;

/// Window sizes for the three core hit-rate summaries.
pub const SHORT_WINDOW: usize = 10;
pub const LONG_WINDOW: usize = 20;

/// Fixed disclaimer carried on every card.
pub const DISCLAIMER: &str =
    "Historical research only. Past results do not predict future outcomes.";

#[derive(Debug, Error)]
pub enum EngineError {
    /// A parsed query failed validation; carries every violated rule.
    #[error("invalid query: {}", .0.join("; "))]
    InvalidQuery(Vec<String>),
}

/// Compute the full analytics report for one query.
///
/// `logs` is the player's raw game-log series in any order; `generated_at` is
/// supplied by the caller so identical inputs always produce identical cards.
pub fn build_prop_card(
    query: &PropQuery,
    logs: &[GameLog],
    injuries: Option<&InjurySnapshot>,
    team: &str,
    generated_at: DateTime<Utc>,
) -> PropCard {
    let enriched = outcome::enrich_logs(logs, query);
    let short = outcome::last_n(&enriched, SHORT_WINDOW);
    let long = outcome::last_n(&enriched, LONG_WINDOW);

    let last10 = hit_rate::summarize_hit_rate(short);
    let last20 = hit_rate::summarize_hit_rate(long);
    let season = hit_rate::summarize_hit_rate(&enriched);

    let trend = trend::analyze_trend(&enriched, query.stat_type);
    let splits = splits::compute_splits(long);
    let distribution = splits::compute_distribution(long, query.line);
    let sensitivity = splits::compute_sensitivity(long, query.line);
    let stability = splits::compute_stability(short);

    let context = context::resolve_context(
        injuries,
        &query.player_name,
        team,
        &enriched,
        query.game_date,
    );

    let notes = data_quality_notes(&enriched, season.sample_size, last20.sample_size);

    let mut card = PropCard {
        player_name: query.player_name.clone(),
        stat_type: query.stat_type,
        line: query.line,
        side: query.side,
        generated_at,
        disclaimer: DISCLAIMER.to_string(),
        last10,
        last20,
        season,
        trend,
        splits,
        distribution,
        sensitivity,
        stability,
        context,
        insights: [String::new(), String::new(), String::new()],
        notes,
    };
    card.insights = insights::generate_insights(&card);
    card
}

fn data_quality_notes(
    enriched: &[crate::data::models::EnrichedGameLog],
    season_size: u32,
    long_size: u32,
) -> Vec<String> {
    let mut notes = Vec::new();
    if season_size < SHORT_WINDOW as u32 {
        notes.push(format!(
            "Season sample is only {} game(s); treat every rate with caution",
            season_size
        ));
    } else if long_size < LONG_WINDOW as u32 {
        notes.push(format!(
            "Long window holds {} of {} games",
            long_size, LONG_WINDOW
        ));
    }
    let zero_minute_games = enriched.iter().filter(|e| e.log.minutes == 0.0).count();
    if zero_minute_games > 0 {
        notes.push(format!(
            "{} game(s) with zero minutes included in the sample",
            zero_minute_games
        ));
    }
    notes
}

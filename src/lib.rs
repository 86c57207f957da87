//! propcard — player-prop research engine.
//!
//! Given a player's game-log history, a stat category, and a wagering line,
//! the engine computes hit-rate windows, situational splits, distribution and
//! volatility scores, trend regression, and exactly three deterministic
//! natural-language insights screened against a content policy.
//!
//! The computation core ([`engine`]) is pure and synchronous; storage
//! ([`data`]), caching ([`cache`]) and fan-out ([`batch`]) wrap around it.

pub mod batch;
pub mod cache;
pub mod config;
pub mod data;
pub mod engine;
pub mod query;

pub use data::models::{
    EnrichedGameLog, GameLog, HitRateSummary, InjurySnapshot, Outcome, PlayerSnapshot, PropCard,
    PropQuery, Side, StatType,
};
pub use engine::{build_prop_card, evaluate_outcome, generate_insights};
pub use query::{parse_query_from_text, validate as validate_parsed_query, ParsedQuery};

//! Concurrent batch card generation.
//!
//! Each request is parsed, validated, and computed independently; a failure
//! in one item never aborts its siblings — the caller gets a per-item
//! `Result` vector in request order.

use chrono::{DateTime, NaiveDate, Utc};
use futures_util::future::join_all;
use tracing::debug;

use crate::cache::{card_cache_key, CardCache};
use crate::data::models::{PlayerSnapshot, PropCard, PropQuery};
use crate::engine::{build_prop_card, EngineError};
use crate::query;

/// One unit of batch work: a free-text question plus the pre-fetched data it
/// runs against.
#[derive(Debug, Clone)]
pub struct CardRequest {
    pub query_text: String,
    pub game_date: NaiveDate,
    pub snapshot: PlayerSnapshot,
}

/// Build cards for every request concurrently, consulting the shared cache.
///
/// `generated_at` is stamped onto every card so a batch is reproducible.
pub async fn build_cards(
    requests: Vec<CardRequest>,
    cache: &CardCache,
    generated_at: DateTime<Utc>,
) -> Vec<Result<PropCard, EngineError>> {
    let futures: Vec<_> = requests
        .into_iter()
        .map(|request| async move { build_one(request, cache, generated_at).await })
        .collect();
    join_all(futures).await
}

async fn build_one(
    request: CardRequest,
    cache: &CardCache,
    generated_at: DateTime<Utc>,
) -> Result<PropCard, EngineError> {
    let parsed = query::parse_query_from_text(&request.query_text);
    let verdict = query::validate(&parsed);
    if !verdict.valid {
        return Err(EngineError::InvalidQuery(verdict.errors));
    }

    let prop_query = PropQuery {
        player_name: parsed.player_name,
        stat_type: parsed.stat_type,
        line: parsed.line,
        side: parsed.side,
        game_date: request.game_date,
    };

    let key = card_cache_key(
        &prop_query,
        &request.snapshot.game_logs,
        request.snapshot.injuries.as_ref(),
    );
    if let Some(card) = cache.get(key, generated_at).await {
        debug!("Cache hit for {}", prop_query.player_name);
        return Ok(card);
    }

    let card = build_prop_card(
        &prop_query,
        &request.snapshot.game_logs,
        request.snapshot.injuries.as_ref(),
        &request.snapshot.team,
        generated_at,
    );
    cache.insert(key, card.clone(), generated_at).await;
    Ok(card)
}

//! In-memory TTL cache for computed prop cards.
//!
//! Explicitly constructed and passed into the orchestration layer — never a
//! process-wide singleton — so the pure engine stays testable in isolation.
//! Entries are keyed by a deterministic hash of every query-relevant input
//! and carry their own expiry; the map is bounded, evicting expired entries
//! first and the nearest-to-expiry entry when full.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::data::models::{GameLog, InjurySnapshot, PropCard, PropQuery};

/// Thread-safe, bounded TTL cache.
#[derive(Clone)]
pub struct CardCache {
    inner: Arc<RwLock<HashMap<u64, CacheEntry>>>,
    ttl: Duration,
    max_entries: usize,
}

struct CacheEntry {
    card: PropCard,
    expires_at: DateTime<Utc>,
}

impl CardCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        CardCache {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Look up a card; `now` is passed in so expiry is testable.
    pub async fn get(&self, key: u64, now: DateTime<Utc>) -> Option<PropCard> {
        let inner = self.inner.read().await;
        inner
            .get(&key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.card.clone())
    }

    /// Insert a card, evicting expired entries and, when still at capacity,
    /// the entry closest to expiry.
    pub async fn insert(&self, key: u64, card: PropCard, now: DateTime<Utc>) {
        let mut inner = self.inner.write().await;
        inner.retain(|_, entry| entry.expires_at > now);
        if inner.len() >= self.max_entries && !inner.contains_key(&key) {
            if let Some(oldest) = inner
                .iter()
                .min_by_key(|(_, entry)| entry.expires_at)
                .map(|(k, _)| *k)
            {
                inner.remove(&oldest);
                debug!("CardCache full; evicted entry {}", oldest);
            }
        }
        inner.insert(
            key,
            CacheEntry {
                card,
                expires_at: now + self.ttl,
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

/// Deterministic key over everything that can change the computed card.
pub fn card_cache_key(
    query: &PropQuery,
    logs: &[GameLog],
    injuries: Option<&InjurySnapshot>,
) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    query.player_name.hash(&mut hasher);
    query.stat_type.hash(&mut hasher);
    query.line.to_bits().hash(&mut hasher);
    query.side.hash(&mut hasher);
    query.game_date.hash(&mut hasher);
    for log in logs {
        log.date.hash(&mut hasher);
        log.minutes.to_bits().hash(&mut hasher);
        log.points.hash(&mut hasher);
        log.rebounds.hash(&mut hasher);
        log.assists.hash(&mut hasher);
        log.home.hash(&mut hasher);
        log.opponent.hash(&mut hasher);
    }
    if let Some(snapshot) = injuries {
        snapshot.reported_on.hash(&mut hasher);
        for record in &snapshot.records {
            record.player_name.hash(&mut hasher);
            record.team.hash(&mut hasher);
            record.status.hash(&mut hasher);
            record.note.hash(&mut hasher);
        }
    }
    hasher.finish()
}

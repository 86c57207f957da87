//! Storage boundary.
//!
//! The engine only ever sees pre-validated, in-memory snapshots. Whatever the
//! real document store looks like, it sits behind [`SnapshotStore`]; the JSON
//! file implementation here backs the CLI and tests. Field validation happens
//! exactly once, at this boundary, never inside the engine.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

pub mod models;

use models::PlayerSnapshot;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

/// Trait every snapshot source must implement.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the full snapshot (player info, game logs, injury report) for one
    /// player.
    async fn load_snapshot(&self, player_name: &str) -> Result<PlayerSnapshot, StoreError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// Snapshot source backed by a single JSON file on disk.
pub struct JsonSnapshotStore {
    path: String,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<String>) -> Self {
        JsonSnapshotStore { path: path.into() }
    }
}

#[async_trait]
impl SnapshotStore for JsonSnapshotStore {
    async fn load_snapshot(&self, _player_name: &str) -> Result<PlayerSnapshot, StoreError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        let snapshot = parse_snapshot(&raw)?;
        debug!(
            "Loaded snapshot for {} ({} game logs)",
            snapshot.player_name,
            snapshot.game_logs.len()
        );
        Ok(snapshot)
    }

    fn name(&self) -> &str {
        "json-file"
    }
}

/// Deserialize and validate a snapshot. All data-shape rules live here so the
/// engine can treat its inputs as trusted.
pub fn parse_snapshot(raw: &str) -> Result<PlayerSnapshot, StoreError> {
    let snapshot: PlayerSnapshot = serde_json::from_str(raw)?;
    validate_snapshot(&snapshot)?;
    Ok(snapshot)
}

fn validate_snapshot(snapshot: &PlayerSnapshot) -> Result<(), StoreError> {
    if snapshot.player_name.trim().is_empty() {
        return Err(StoreError::Invalid("player name is empty".into()));
    }
    let mut seen_dates = std::collections::HashSet::new();
    for log in &snapshot.game_logs {
        if !log.minutes.is_finite() || log.minutes < 0.0 {
            return Err(StoreError::Invalid(format!(
                "game on {} has invalid minutes {}",
                log.date, log.minutes
            )));
        }
        if log.opponent.trim().is_empty() {
            return Err(StoreError::Invalid(format!(
                "game on {} has no opponent",
                log.date
            )));
        }
        if !seen_dates.insert(log.date) {
            return Err(StoreError::Invalid(format!(
                "duplicate game log for {}",
                log.date
            )));
        }
    }
    Ok(())
}

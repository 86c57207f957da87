use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};

use propcard::config::Config;
use propcard::data::{JsonSnapshotStore, SnapshotStore};
use propcard::engine::build_prop_card;
use propcard::query;
use propcard::PropQuery;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let parsed = query::parse_query_from_text(&config.query);
    let verdict = query::validate(&parsed);
    if !verdict.valid {
        if verdict.confidence_only() && config.allow_low_confidence {
            warn!(
                "Low-confidence parse ({:.2}) accepted on request",
                parsed.confidence
            );
        } else {
            anyhow::bail!("query rejected: {}", verdict.errors.join("; "));
        }
    }

    let store = JsonSnapshotStore::new(config.snapshot.clone());
    let snapshot = store
        .load_snapshot(&parsed.player_name)
        .await
        .with_context(|| format!("loading snapshot from {}", config.snapshot))?;
    info!(
        "Snapshot loaded: {} ({} game logs)",
        snapshot.player_name,
        snapshot.game_logs.len()
    );

    // The engine never reads the clock; the research date and timestamp are
    // resolved here and passed down.
    let generated_at = Utc::now();
    let game_date = config.as_of.unwrap_or_else(|| generated_at.date_naive());
    let prop_query = PropQuery {
        player_name: parsed.player_name,
        stat_type: parsed.stat_type,
        line: parsed.line,
        side: parsed.side,
        game_date,
    };
    info!(
        "Query: {} {} {:.1} {} as of {}",
        prop_query.player_name,
        prop_query.side.label(),
        prop_query.line,
        prop_query.stat_type.code(),
        game_date
    );

    let card = build_prop_card(
        &prop_query,
        &snapshot.game_logs,
        snapshot.injuries.as_ref(),
        &snapshot.team,
        generated_at,
    );

    let rendered = if config.pretty {
        serde_json::to_string_pretty(&card)?
    } else {
        serde_json::to_string(&card)?
    };
    println!("{rendered}");

    Ok(())
}

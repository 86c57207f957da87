use clap::Parser;

/// Player-prop research card generator
#[derive(Parser, Debug, Clone)]
#[command(name = "propcard", version, about)]
pub struct Config {
    /// Free-text prop question, e.g. "Anthony Edwards over 26.5 points"
    pub query: String,

    /// Path to the player snapshot JSON (game logs + injury report)
    #[arg(long, env = "SNAPSHOT_PATH")]
    pub snapshot: String,

    /// Research date (YYYY-MM-DD); games on or after it are excluded.
    /// Defaults to today.
    #[arg(long)]
    pub as_of: Option<chrono::NaiveDate>,

    /// Pretty-print the JSON card
    #[arg(long, default_value = "false")]
    pub pretty: bool,

    /// Accept low-confidence parses instead of refusing them
    #[arg(long, env = "ALLOW_LOW_CONFIDENCE", default_value = "false")]
    pub allow_low_confidence: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.query.trim().is_empty() {
            anyhow::bail!("query text must not be empty");
        }
        if self.snapshot.trim().is_empty() {
            anyhow::bail!("snapshot path must not be empty");
        }
        Ok(())
    }
}

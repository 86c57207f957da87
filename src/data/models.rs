use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The three counting-stat categories a prop line can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatType {
    #[serde(rename = "PTS")]
    Points,
    #[serde(rename = "REB")]
    Rebounds,
    #[serde(rename = "AST")]
    Assists,
}

impl StatType {
    /// Short code used in queries and rendered output ("PTS" | "REB" | "AST").
    pub fn code(&self) -> &'static str {
        match self {
            StatType::Points => "PTS",
            StatType::Rebounds => "REB",
            StatType::Assists => "AST",
        }
    }

    /// Noun used in generated sentences ("points" | "rebounds" | "assists").
    pub fn noun(&self) -> &'static str {
        match self {
            StatType::Points => "points",
            StatType::Rebounds => "rebounds",
            StatType::Assists => "assists",
        }
    }
}

/// Which direction the stat value is compared against the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Over,
    Under,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Over => "OVER",
            Side::Under => "UNDER",
        }
    }
}

/// Classification of a single game against a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Win,
    Loss,
    /// Exact tie between stat value and line; excluded from the hit-rate
    /// denominator.
    Push,
}

/// One game's raw box-score row for a player, as supplied by the storage
/// collaborator. One per (player, game); immutable once ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLog {
    pub date: NaiveDate,
    /// Minutes played (non-negative; fractional minutes allowed)
    pub minutes: f64,
    pub points: u32,
    pub rebounds: u32,
    pub assists: u32,
    /// true when the player's team was at home
    pub home: bool,
    /// Opponent identifier, e.g. "DEN"
    pub opponent: String,
}

impl GameLog {
    /// The counting stat selected by a query's stat type.
    pub fn stat(&self, stat_type: StatType) -> f64 {
        match stat_type {
            StatType::Points => self.points as f64,
            StatType::Rebounds => self.rebounds as f64,
            StatType::Assists => self.assists as f64,
        }
    }
}

/// A game log enriched with the per-query derived fields. Recomputed for every
/// query, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedGameLog {
    #[serde(flatten)]
    pub log: GameLog,
    /// The stat selected by the query's stat type
    pub stat_value: f64,
    /// Classification against the query's line and side
    pub outcome: Outcome,
    /// Full rest days before this game (0 = back-to-back); the first game of
    /// a series is deemed to have had 3
    pub rest_days: u32,
}

/// A fully resolved prop query: which player, which stat, against what line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropQuery {
    pub player_name: String,
    pub stat_type: StatType,
    /// Must be strictly positive (e.g. 26.5)
    pub line: f64,
    pub side: Side,
    /// The game being researched; windows only include games strictly before
    /// this date
    pub game_date: NaiveDate,
}

/// Win/loss/push record and central tendency over one window of games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitRateSummary {
    pub sample_size: u32,
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    /// wins / (wins + losses), pushes excluded; 0.0 when no decisive games
    pub hit_rate: f64,
    pub average: f64,
    pub median: f64,
}

impl HitRateSummary {
    /// The all-zero summary returned for an empty window.
    pub fn empty() -> Self {
        HitRateSummary {
            sample_size: 0,
            wins: 0,
            losses: 0,
            pushes: 0,
            hit_rate: 0.0,
            average: 0.0,
            median: 0.0,
        }
    }

    /// Games that produced a win or loss (pushes excluded).
    pub fn decisive(&self) -> u32 {
        self.wins + self.losses
    }
}

/// A verbatim per-game row for the recent-games table, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRow {
    pub date: NaiveDate,
    pub opponent: String,
    pub home: bool,
    pub minutes: f64,
    pub stat_value: f64,
    pub outcome: Outcome,
    pub rest_days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

/// The uninterrupted run of identical outcomes ending at the most recent
/// game, measured over the whole series rather than the display rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeStreak {
    pub outcome: Outcome,
    pub length: u32,
}

/// Minutes usage over the last five games versus the season baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinutesTrend {
    pub last5_average: f64,
    pub season_average: f64,
    /// last5 − season, in minutes
    pub change: f64,
    /// change relative to the season average, as a percentage; 0 when the
    /// season average is 0
    pub pct_change: f64,
}

/// Recent-form block: display rows plus the series the trend math runs on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendBlock {
    pub stat_type: StatType,
    /// Last 5 games, newest first
    pub recent_games: Vec<GameRow>,
    /// 3-game trailing averages over the last 10 games, oldest to newest
    pub rolling_averages: Vec<f64>,
    /// Minutes for the last 5 games, oldest to newest
    pub minutes_series: Vec<f64>,
    /// OLS slope of the stat across the last 10 games, oldest first
    pub slope: f64,
    pub direction: TrendDirection,
    /// Current outcome run from the most recent game back; absent on an
    /// empty series
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak: Option<OutcomeStreak>,
    pub minutes_trend: MinutesTrend,
}

/// Hit-rate summaries for each situational partition of the last-20 window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitsBlock {
    pub home: HitRateSummary,
    pub away: HitRateSummary,
    /// Back-to-back games (0 rest days)
    pub rest0: HitRateSummary,
    /// Exactly 1 rest day
    pub rest1: HitRateSummary,
    /// 2 or more rest days
    pub rest2_plus: HitRateSummary,
}

/// One half-open histogram bucket [min, max).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub min: f64,
    pub max: f64,
    pub count: u32,
}

/// Stat-value dispersion over the last-20 window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionBlock {
    pub mean: f64,
    pub std_dev: f64,
    /// 8 buckets centred on the line: four below, four at/above
    pub buckets: Vec<HistogramBucket>,
    /// 0–100; dispersion relative to the mean, 0 when the mean is 0
    pub volatility_score: u32,
}

/// How tightly outcomes cluster around the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityBlock {
    /// Fraction of games with |stat − line| ≤ 1.0
    pub near_line_rate: f64,
    /// Fraction of games that pushed
    pub push_rate: f64,
    /// 0–100 blend of the two rates
    pub sensitivity_score: u32,
}

/// Minutes consistency over the last-10 window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityBlock {
    pub minutes_std_dev: f64,
    pub average_minutes: f64,
    /// 0–100; higher means steadier minutes
    pub stability_score: u32,
    /// Reliability notes in rule-declaration order; may be empty
    pub notes: Vec<String>,
}

/// One row of the most recent injury report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryRecord {
    pub player_name: String,
    pub team: String,
    /// e.g. "Questionable", "Out", "Probable"
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// The most recent injury report available to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjurySnapshot {
    pub reported_on: NaiveDate,
    pub records: Vec<InjuryRecord>,
}

/// Injury context attached to the card when the report mentions the player's
/// team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub own_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub own_note: Option<String>,
    /// Teammates currently listed OUT, excluding the player
    pub teammates_out: Vec<String>,
}

/// Schedule context for the queried game date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleContext {
    /// true when the queried game falls on zero rest days
    pub back_to_back: bool,
    pub rest_days: u32,
}

/// Situational context; sub-blocks are genuinely absent when no data applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injury: Option<InjuryContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleContext>,
}

/// The complete analytics report for one prop query. A value object:
/// constructed once, never mutated, trivially serializable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropCard {
    pub player_name: String,
    pub stat_type: StatType,
    pub line: f64,
    pub side: Side,
    pub generated_at: DateTime<Utc>,
    pub disclaimer: String,
    pub last10: HitRateSummary,
    pub last20: HitRateSummary,
    pub season: HitRateSummary,
    pub trend: TrendBlock,
    pub splits: SplitsBlock,
    pub distribution: DistributionBlock,
    pub sensitivity: SensitivityBlock,
    pub stability: StabilityBlock,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextBlock>,
    /// Exactly three natural-language insights, banned-term screened
    pub insights: [String; 3],
    /// Sample-size / data-quality notes; may be empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

/// Everything the storage collaborator hands the engine for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub player_name: String,
    pub team: String,
    pub game_logs: Vec<GameLog>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injuries: Option<InjurySnapshot>,
}

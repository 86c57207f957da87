//! Deterministic insight generation with a content policy.
//!
//! The generator is a pure rule engine over the computed card: identical
//! inputs always produce identical strings. Every candidate sentence passes
//! the banned-term screen before it can be emitted; a rejected candidate is
//! replaced by the next-priority alternative, and a neutral fallback
//! guarantees the output is always exactly three non-empty strings.

use crate::data::models::{Outcome, PropCard, TrendDirection};

/// Terms that must never appear in generated text, matched case-insensitively
/// as substrings. Fixed list; screening also covers dynamic content such as
/// injury notes quoted into a sentence.
pub const BANNED_TERMS: &[&str] = &[
    "lock",
    "best bet",
    "guaranteed",
    "free money",
    "profit",
    "roi",
    "cash",
    "bankroll",
    "max bet",
    "smash",
    "hammer",
    "play",
    "fade",
    "tail",
];

/// Emitted when every candidate for a slot fails the screen.
const NEUTRAL_FALLBACK: &str = "Not enough clean signal in this sample to add more here.";

/// Context-insight categories, checked in the order the policy lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextRule {
    Injury,
    BackToBack,
    HomeAwaySplit,
    LineSensitivity,
    Volatility,
}

/// Tunable thresholds and precedence for the insight engine. The defaults
/// mirror the reference behaviour; callers wanting different emphasis swap
/// fields rather than forking the rules.
#[derive(Debug, Clone)]
pub struct InsightPolicy {
    /// Windows below this size get the "limited sample" framing.
    pub small_sample_threshold: u32,
    /// Minimum uninterrupted run of recent outcomes worth mentioning.
    pub streak_min: usize,
    /// Minutes swing (last 5 vs season) considered significant.
    pub minutes_swing_threshold: f64,
    /// Home/away hit-rate gap considered a significant split.
    pub split_gap_threshold: f64,
    /// Each venue needs this many decisive games before the split counts.
    pub split_min_decisive: u32,
    /// Sensitivity score at or above which near-line clustering is called out.
    pub sensitivity_threshold: u32,
    /// Volatility score at or above which dispersion is called out.
    pub volatility_threshold: u32,
    /// Precedence order for the third insight slot.
    pub context_precedence: Vec<ContextRule>,
}

impl Default for InsightPolicy {
    fn default() -> Self {
        InsightPolicy {
            small_sample_threshold: 10,
            streak_min: 3,
            minutes_swing_threshold: 3.0,
            split_gap_threshold: 0.25,
            split_min_decisive: 3,
            sensitivity_threshold: 60,
            volatility_threshold: 70,
            context_precedence: vec![
                ContextRule::Injury,
                ContextRule::BackToBack,
                ContextRule::HomeAwaySplit,
                ContextRule::LineSensitivity,
                ContextRule::Volatility,
            ],
        }
    }
}

/// True when `text` contains any banned term, case-insensitively.
pub fn contains_banned_term(text: &str) -> bool {
    let lowered = text.to_lowercase();
    BANNED_TERMS.iter().any(|term| lowered.contains(term))
}

/// Generate the card's three insights under the default policy.
pub fn generate_insights(card: &PropCard) -> [String; 3] {
    generate_insights_with_policy(card, &InsightPolicy::default())
}

/// Generate exactly three insights: hit-rate, trend, context/volatility.
pub fn generate_insights_with_policy(card: &PropCard, policy: &InsightPolicy) -> [String; 3] {
    [
        screen(vec![hit_rate_insight(card, policy)]),
        screen(vec![trend_insight(card, policy)]),
        screen(context_candidates(card, policy)),
    ]
}

/// First candidate that survives the banned-term screen, else the neutral
/// fallback (which is itself clean by construction).
fn screen(candidates: Vec<String>) -> String {
    candidates
        .into_iter()
        .find(|c| !c.is_empty() && !contains_banned_term(c))
        .unwrap_or_else(|| NEUTRAL_FALLBACK.to_string())
}

// ── Slot 1: hit rate ─────────────────────────────────────────────────────────

fn hit_rate_insight(card: &PropCard, policy: &InsightPolicy) -> String {
    let summary = &card.last10;
    let noun = card.stat_type.noun();
    let side = card.side.label();

    if summary.decisive() == 0 {
        return format!(
            "No decisive results against the {:.1} {} line before this date (limited sample).",
            card.line, noun
        );
    }

    let mut sentence = format!(
        "{} {:.1} {} is {}-{} in the last {} games",
        side, card.line, noun, summary.wins, summary.losses, summary.sample_size
    );
    if summary.pushes == 1 {
        sentence.push_str(", with 1 push");
    } else if summary.pushes > 1 {
        sentence.push_str(&format!(", with {} pushes", summary.pushes));
    }
    if summary.sample_size < policy.small_sample_threshold {
        sentence.push_str(" (limited sample)");
    }
    if let Some((outcome, length)) = recent_streak(card, policy.streak_min) {
        let verb = match outcome {
            Outcome::Win => "hit",
            Outcome::Loss => "missed",
            Outcome::Push => "pushed",
        };
        sentence.push_str(&format!("; has {} {} straight", verb, length));
    }
    sentence.push('.');
    sentence
}

/// The card's current outcome run, when it reaches the policy minimum. The
/// trend block measures it over the whole series, so runs longer than the
/// display rows report their true length.
fn recent_streak(card: &PropCard, min_len: usize) -> Option<(Outcome, u32)> {
    let streak = card.trend.streak?;
    (streak.length as usize >= min_len).then_some((streak.outcome, streak.length))
}

// ── Slot 2: trend ────────────────────────────────────────────────────────────

fn trend_insight(card: &PropCard, policy: &InsightPolicy) -> String {
    let trend = &card.trend;
    let noun = card.stat_type.noun();

    let swing = trend.minutes_trend.change;
    if swing.abs() >= policy.minutes_swing_threshold && trend.minutes_trend.season_average > 0.0 {
        let word = if swing > 0.0 { "up" } else { "down" };
        return format!(
            "Minutes are {} {:.1} from the season average ({:.1} over the last 5 vs {:.1}).",
            word,
            swing.abs(),
            trend.minutes_trend.last5_average,
            trend.minutes_trend.season_average
        );
    }

    match trend.direction {
        TrendDirection::Up => format!(
            "Recent {} production is trending up, about {:.1} per game across the last {} outings.",
            noun,
            trend.slope,
            trend.rolling_averages.len()
        ),
        TrendDirection::Down => format!(
            "Recent {} production is trending down, about {:.1} per game across the last {} outings.",
            noun,
            trend.slope.abs(),
            trend.rolling_averages.len()
        ),
        TrendDirection::Flat => format!(
            "Production has held steady, averaging {:.1} {} over the sampled games.",
            card.last10.average, noun
        ),
    }
}

// ── Slot 3: context / volatility ─────────────────────────────────────────────

/// Ordered candidates for the third slot; the screen takes the first clean
/// one, and the distribution statement closes the list as a universal
/// fallback.
fn context_candidates(card: &PropCard, policy: &InsightPolicy) -> Vec<String> {
    let mut candidates = Vec::new();
    for rule in &policy.context_precedence {
        match rule {
            ContextRule::Injury => candidates.extend(injury_candidate(card)),
            ContextRule::BackToBack => candidates.extend(back_to_back_candidate(card)),
            ContextRule::HomeAwaySplit => candidates.extend(split_candidate(card, policy)),
            ContextRule::LineSensitivity => candidates.extend(sensitivity_candidate(card, policy)),
            ContextRule::Volatility => candidates.extend(volatility_candidate(card, policy)),
        }
    }
    candidates.push(distribution_fallback(card));
    candidates
}

fn injury_candidate(card: &PropCard) -> Option<String> {
    let injury = card.context.as_ref()?.injury.as_ref()?;
    if let Some(status) = &injury.own_status {
        let mut sentence = format!("Listed as {} on the latest injury report", status);
        if let Some(note) = &injury.own_note {
            sentence.push_str(&format!(" ({})", note));
        }
        sentence.push('.');
        return Some(sentence);
    }
    if !injury.teammates_out.is_empty() {
        let n = injury.teammates_out.len();
        let word = if n == 1 { "teammate" } else { "teammates" };
        return Some(format!(
            "{} {} listed as OUT on the latest report, which can shift usage.",
            n, word
        ));
    }
    None
}

fn back_to_back_candidate(card: &PropCard) -> Option<String> {
    let schedule = card.context.as_ref()?.schedule.as_ref()?;
    schedule.back_to_back.then(|| {
        "Second game of a back-to-back, with zero days of rest before this one.".to_string()
    })
}

fn split_candidate(card: &PropCard, policy: &InsightPolicy) -> Option<String> {
    let home = &card.splits.home;
    let away = &card.splits.away;
    if home.decisive() < policy.split_min_decisive || away.decisive() < policy.split_min_decisive {
        return None;
    }
    let gap = home.hit_rate - away.hit_rate;
    if gap.abs() < policy.split_gap_threshold {
        return None;
    }
    let (stronger, h_pct, a_pct) = if gap > 0.0 {
        ("at home", home.hit_rate * 100.0, away.hit_rate * 100.0)
    } else {
        ("on the road", home.hit_rate * 100.0, away.hit_rate * 100.0)
    };
    Some(format!(
        "Hits at a clearly higher rate {}: {:.0}% at home versus {:.0}% away in this window.",
        stronger, h_pct, a_pct
    ))
}

fn sensitivity_candidate(card: &PropCard, policy: &InsightPolicy) -> Option<String> {
    (card.sensitivity.sensitivity_score >= policy.sensitivity_threshold).then(|| {
        format!(
            "Results cluster within a point of the {:.1} line; small margins decide most of these.",
            card.line
        )
    })
}

fn volatility_candidate(card: &PropCard, policy: &InsightPolicy) -> Option<String> {
    (card.distribution.volatility_score >= policy.volatility_threshold).then(|| {
        format!(
            "Game-to-game {} totals swing sharply around the {:.1} average.",
            card.stat_type.noun(),
            card.distribution.mean
        )
    })
}

fn distribution_fallback(card: &PropCard) -> String {
    format!(
        "Recent {} totals center around {:.1} with a typical spread of {:.1}.",
        card.stat_type.noun(),
        card.distribution.mean,
        card.distribution.std_dev
    )
}

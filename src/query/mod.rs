//! Free-text prop-query parsing.
//!
//! Parsing never fails: ambiguous input lowers the confidence score instead.
//! A separate [`validate`] step collects every violated rule so callers can
//! surface all problems at once.

use serde::{Deserialize, Serialize};

use crate::data::models::{Side, StatType};

/// Base confidence before any component is detected.
pub const BASE_CONFIDENCE: f64 = 0.5;
/// Confidence added per detected component (name, stat, side, line).
pub const CONFIDENCE_STEP: f64 = 0.2;
/// Parsed queries below this confidence fail validation.
pub const MIN_CONFIDENCE: f64 = 0.6;

/// Whole-word stat-type synonyms.
const STAT_SYNONYMS: &[(&str, StatType)] = &[
    ("points", StatType::Points),
    ("pts", StatType::Points),
    ("pt", StatType::Points),
    ("rebounds", StatType::Rebounds),
    ("rebound", StatType::Rebounds),
    ("reb", StatType::Rebounds),
    ("boards", StatType::Rebounds),
    ("board", StatType::Rebounds),
    ("assists", StatType::Assists),
    ("assist", StatType::Assists),
    ("ast", StatType::Assists),
    ("dimes", StatType::Assists),
    ("dime", StatType::Assists),
];

/// Side keywords and symbols.
const SIDE_TOKENS: &[(&str, Side)] = &[
    ("over", Side::Over),
    ("o", Side::Over),
    ("above", Side::Over),
    (">", Side::Over),
    ("under", Side::Under),
    ("u", Side::Under),
    ("below", Side::Under),
    ("<", Side::Under),
];

/// Common shorthand → canonical full name. An exact case-insensitive match on
/// the extracted name overrides it.
const NICKNAMES: &[(&str, &str)] = &[
    ("lebron", "LeBron James"),
    ("bron", "LeBron James"),
    ("steph", "Stephen Curry"),
    ("kd", "Kevin Durant"),
    ("giannis", "Giannis Antetokounmpo"),
    ("greek freak", "Giannis Antetokounmpo"),
    ("ant", "Anthony Edwards"),
    ("luka", "Luka Doncic"),
    ("joker", "Nikola Jokic"),
    ("jokic", "Nikola Jokic"),
    ("dame", "Damian Lillard"),
    ("cp3", "Chris Paul"),
    ("wemby", "Victor Wembanyama"),
    ("sga", "Shai Gilgeous-Alexander"),
];

/// The structured result of parsing free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub player_name: String,
    pub stat_type: StatType,
    pub line: f64,
    pub side: Side,
    /// 0–1; starts at 0.5 and rises with each detected component
    pub confidence: f64,
}

/// Machine-readable identifier for each acceptance rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRule {
    PlayerName,
    Line,
    Confidence,
}

/// Validation verdict with every violated rule, not just the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryValidation {
    pub valid: bool,
    /// Human-readable message per violation, in rule order
    pub errors: Vec<String>,
    /// The violated rules themselves, parallel to `errors`
    pub violations: Vec<ValidationRule>,
}

impl QueryValidation {
    /// True when low confidence is the only rule the query violates.
    pub fn confidence_only(&self) -> bool {
        !self.valid
            && self
                .violations
                .iter()
                .all(|rule| *rule == ValidationRule::Confidence)
    }
}

/// Parse a free-text prop question like "Anthony Edwards over 26.5 points".
///
/// Defaults when detection fails: stat type = points, side = OVER, line = 0.
pub fn parse_query_from_text(text: &str) -> ParsedQuery {
    let mut stat_type: Option<StatType> = None;
    let mut side: Option<Side> = None;
    let mut decimal_line: Option<f64> = None;
    let mut integer_line: Option<f64> = None;
    let mut name_tokens: Vec<String> = Vec::new();

    for raw in text.split_whitespace() {
        let lower = raw.to_lowercase();

        // Symbols first: punctuation trimming below would erase "<" / ">"
        if let Some((_, s)) = SIDE_TOKENS.iter().find(|(t, _)| *t == lower) {
            side.get_or_insert(*s);
            continue;
        }

        // Keep '.' through the first trim so decimals survive, then strip
        // edge dots: "26.5." → "26.5", "points." → "points"
        let cleaned = lower
            .trim_matches(|c: char| !(c.is_ascii_alphanumeric() || c == '.'))
            .trim_matches('.')
            .to_string();
        if cleaned.is_empty() {
            continue;
        }

        // Side keywords followed by sentence punctuation ("over.", "under,")
        // only surface after cleaning
        if let Some((_, s)) = SIDE_TOKENS.iter().find(|(t, _)| *t == cleaned) {
            side.get_or_insert(*s);
            continue;
        }

        // Attached side prefix: "o27.5" / "U30"
        if let Some(rest) = side_prefixed_number(&cleaned) {
            if let Ok(v) = rest.parse::<f64>() {
                let s = if cleaned.starts_with('o') {
                    Side::Over
                } else {
                    Side::Under
                };
                side.get_or_insert(s);
                if rest.contains('.') {
                    decimal_line.get_or_insert(v);
                } else {
                    integer_line.get_or_insert(v);
                }
                continue;
            }
        }

        if let Some((_, st)) = STAT_SYNONYMS.iter().find(|(t, _)| *t == cleaned) {
            stat_type.get_or_insert(*st);
            continue;
        }

        if let Ok(v) = cleaned.parse::<f64>() {
            if cleaned.contains('.') {
                decimal_line.get_or_insert(v);
            } else {
                integer_line.get_or_insert(v);
            }
            continue;
        }

        name_tokens.push(title_case(raw));
    }

    // First decimal-looking number wins over the first integer-looking one
    let line = decimal_line.or(integer_line).unwrap_or(0.0);

    let extracted = name_tokens.join(" ");
    let player_name = resolve_alias(&extracted);

    let mut confidence = BASE_CONFIDENCE;
    if !player_name.is_empty() {
        confidence += CONFIDENCE_STEP;
    }
    if stat_type.is_some() {
        confidence += CONFIDENCE_STEP;
    }
    if side.is_some() {
        confidence += CONFIDENCE_STEP;
    }
    if line != 0.0 {
        confidence += CONFIDENCE_STEP;
    }
    let confidence = confidence.min(1.0);

    ParsedQuery {
        player_name,
        stat_type: stat_type.unwrap_or(StatType::Points),
        line,
        side: side.unwrap_or(Side::Over),
        confidence,
    }
}

/// Check a parsed query against the acceptance rules, collecting every
/// violation. Stat type and side are enums here, so the out-of-vocabulary
/// rules from looser representations cannot be violated by construction.
pub fn validate(parsed: &ParsedQuery) -> QueryValidation {
    let mut errors = Vec::new();
    let mut violations = Vec::new();
    if parsed.player_name.trim().len() < 2 {
        errors.push("player name is missing or too short".to_string());
        violations.push(ValidationRule::PlayerName);
    }
    if parsed.line <= 0.0 {
        errors.push("line must be a positive number".to_string());
        violations.push(ValidationRule::Line);
    }
    if parsed.confidence < MIN_CONFIDENCE {
        errors.push(format!(
            "confidence {:.2} is below the {:.2} minimum",
            parsed.confidence, MIN_CONFIDENCE
        ));
        violations.push(ValidationRule::Confidence);
    }
    QueryValidation {
        valid: errors.is_empty(),
        errors,
        violations,
    }
}

/// "o27.5" → Some("27.5"); anything not a lone o/u glued to a number → None.
fn side_prefixed_number(token: &str) -> Option<&str> {
    let first = token.chars().next()?;
    if (first == 'o' || first == 'u') && token.len() > 1 {
        let rest = &token[1..];
        if rest.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            return Some(rest);
        }
    }
    None
}

/// Uppercase the first alphabetic character, lowercase the rest, preserving
/// internal apostrophes and hyphens.
fn title_case(word: &str) -> String {
    let trimmed: String = word
        .trim_matches(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-'))
        .to_string();
    let mut chars = trimmed.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

fn resolve_alias(extracted: &str) -> String {
    let key = extracted.to_lowercase();
    NICKNAMES
        .iter()
        .find(|(nick, _)| *nick == key)
        .map(|(_, full)| full.to_string())
        .unwrap_or_else(|| extracted.to_string())
}

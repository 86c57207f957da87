//! Situational context: injury-report and schedule flags for the queried game.

use chrono::NaiveDate;

use crate::data::models::{
    ContextBlock, EnrichedGameLog, InjuryContext, InjurySnapshot, ScheduleContext,
};

use super::outcome::rest_days_between;

/// Attach injury and schedule context for a player/date.
///
/// Sub-blocks are `None` when no data applies (no injury report mentioning
/// the team, no prior games to measure rest against), and the whole block is
/// `None` when both are — absent context never appears as empty placeholders.
pub fn resolve_context(
    injuries: Option<&InjurySnapshot>,
    player_name: &str,
    team: &str,
    enriched: &[EnrichedGameLog],
    target_date: NaiveDate,
) -> Option<ContextBlock> {
    let injury = injuries.and_then(|snapshot| injury_context(snapshot, player_name, team));

    // `enriched` is most-recent-first; its head is the last game before the
    // queried date.
    let schedule = enriched.first().map(|last_game| {
        let rest_days = rest_days_between(target_date, Some(last_game.log.date));
        ScheduleContext {
            back_to_back: rest_days == 0,
            rest_days,
        }
    });

    if injury.is_none() && schedule.is_none() {
        return None;
    }
    Some(ContextBlock { injury, schedule })
}

fn injury_context(
    snapshot: &InjurySnapshot,
    player_name: &str,
    team: &str,
) -> Option<InjuryContext> {
    let own = snapshot
        .records
        .iter()
        .find(|r| names_match(&r.player_name, player_name));

    let teammates_out: Vec<String> = snapshot
        .records
        .iter()
        .filter(|r| {
            r.team.eq_ignore_ascii_case(team)
                && r.status.eq_ignore_ascii_case("out")
                && !names_match(&r.player_name, player_name)
        })
        .map(|r| r.player_name.clone())
        .collect();

    if own.is_none() && teammates_out.is_empty() {
        return None;
    }
    Some(InjuryContext {
        own_status: own.map(|r| r.status.clone()),
        own_note: own.and_then(|r| r.note.clone()),
        teammates_out,
    })
}

/// Case- and punctuation-insensitive name comparison ("Luka Dončić" listings
/// vary in spacing and case across report sources).
fn names_match(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}

fn normalize_name(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::{GameLog, InjuryRecord, Outcome};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn make_enriched(day: u32) -> EnrichedGameLog {
        EnrichedGameLog {
            log: GameLog {
                date: date(day),
                minutes: 33.0,
                points: 25,
                rebounds: 5,
                assists: 6,
                home: true,
                opponent: "PHX".into(),
            },
            stat_value: 25.0,
            outcome: Outcome::Win,
            rest_days: 1,
        }
    }

    fn make_snapshot(records: Vec<InjuryRecord>) -> InjurySnapshot {
        InjurySnapshot {
            reported_on: date(14),
            records,
        }
    }

    fn record(name: &str, team: &str, status: &str) -> InjuryRecord {
        InjuryRecord {
            player_name: name.into(),
            team: team.into(),
            status: status.into(),
            note: None,
        }
    }

    #[test]
    fn test_no_data_yields_no_block() {
        let ctx = resolve_context(None, "Anthony Edwards", "MIN", &[], date(15));
        assert!(ctx.is_none());
    }

    #[test]
    fn test_own_injury_listed() {
        let snapshot = make_snapshot(vec![InjuryRecord {
            note: Some("ankle".into()),
            ..record("Anthony Edwards", "MIN", "Questionable")
        }]);
        let ctx = resolve_context(Some(&snapshot), "Anthony Edwards", "MIN", &[], date(15))
            .expect("context");
        let injury = ctx.injury.expect("injury sub-block");
        assert_eq!(injury.own_status.as_deref(), Some("Questionable"));
        assert_eq!(injury.own_note.as_deref(), Some("ankle"));
        assert!(injury.teammates_out.is_empty());
    }

    #[test]
    fn test_teammates_out_excludes_player_and_other_teams() {
        let snapshot = make_snapshot(vec![
            record("Anthony Edwards", "MIN", "Out"),
            record("Rudy Gobert", "MIN", "Out"),
            record("Mike Conley", "MIN", "Questionable"),
            record("Nikola Jokic", "DEN", "Out"),
        ]);
        let ctx = resolve_context(Some(&snapshot), "Anthony Edwards", "MIN", &[], date(15))
            .expect("context");
        let injury = ctx.injury.expect("injury sub-block");
        assert_eq!(injury.teammates_out, vec!["Rudy Gobert".to_string()]);
    }

    #[test]
    fn test_irrelevant_report_omitted_entirely() {
        let snapshot = make_snapshot(vec![record("Nikola Jokic", "DEN", "Out")]);
        let ctx = resolve_context(Some(&snapshot), "Anthony Edwards", "MIN", &[], date(15));
        assert!(ctx.is_none());
    }

    #[test]
    fn test_back_to_back_flag() {
        let enriched = vec![make_enriched(14)];
        let ctx = resolve_context(None, "Anthony Edwards", "MIN", &enriched, date(15))
            .expect("context");
        let schedule = ctx.schedule.expect("schedule sub-block");
        assert!(schedule.back_to_back);
        assert_eq!(schedule.rest_days, 0);
    }

    #[test]
    fn test_rested_schedule() {
        let enriched = vec![make_enriched(11)];
        let ctx = resolve_context(None, "Anthony Edwards", "MIN", &enriched, date(15))
            .expect("context");
        let schedule = ctx.schedule.expect("schedule sub-block");
        assert!(!schedule.back_to_back);
        assert_eq!(schedule.rest_days, 3);
    }

    #[test]
    fn test_name_match_is_case_and_punctuation_insensitive() {
        let snapshot = make_snapshot(vec![record("ANTHONY  EDWARDS", "MIN", "Probable")]);
        let ctx = resolve_context(Some(&snapshot), "Anthony Edwards", "MIN", &[], date(15))
            .expect("context");
        assert_eq!(
            ctx.injury.unwrap().own_status.as_deref(),
            Some("Probable")
        );
    }
}

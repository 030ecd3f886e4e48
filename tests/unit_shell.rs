// Unit tests for the interactive shell grammar.

use chrono::NaiveDate;

use eventintel::shell::{parse_command, ShellCommand};
use eventintel::workflow::phase::Phase;

fn parse(line: &str) -> ShellCommand {
    parse_command(line).unwrap().unwrap()
}

#[test]
fn events_with_location_and_categories() {
    assert_eq!(
        parse("events Austin, TX | music, food"),
        ShellCommand::Events {
            location: "Austin, TX".to_string(),
            categories: vec!["music".to_string(), "food".to_string()],
            start: None,
            end: None,
        }
    );
}

#[test]
fn events_with_date_range() {
    let cmd = parse("events Denver | sports | 2026-11-01 | 2026-11-15");
    let ShellCommand::Events { start, end, .. } = cmd else {
        panic!("expected events command");
    };
    assert_eq!(start, NaiveDate::from_ymd_opt(2026, 11, 1));
    assert_eq!(end, NaiveDate::from_ymd_opt(2026, 11, 15));
}

#[test]
fn events_without_categories_parses_empty_list() {
    // The workflow rejects this later, without touching the network
    let ShellCommand::Events { categories, .. } = parse("events Denver") else {
        panic!("expected events command");
    };
    assert!(categories.is_empty());
}

#[test]
fn events_with_bad_date_is_error() {
    assert!(parse_command("events Denver | music | next tuesday").is_err());
}

#[test]
fn events_without_location_is_error() {
    assert!(parse_command("events").is_err());
    assert!(parse_command("events  | music").is_err());
}

#[test]
fn attendees_with_optional_date() {
    assert_eq!(
        parse("attendees Austin City Limits"),
        ShellCommand::Attendees {
            event_name: "Austin City Limits".to_string(),
            date: None,
        }
    );
    assert_eq!(
        parse("attendees ACL | Oct 4"),
        ShellCommand::Attendees {
            event_name: "ACL".to_string(),
            date: Some("Oct 4".to_string()),
        }
    );
}

#[test]
fn use_requires_positive_number() {
    assert_eq!(parse("use 3"), ShellCommand::Use(3));
    assert!(parse_command("use 0").is_err());
    assert!(parse_command("use first").is_err());
}

#[test]
fn selection_commands() {
    assert_eq!(parse("toggle @alice"), ShellCommand::Toggle("@alice".to_string()));
    assert_eq!(parse("all"), ShellCommand::SelectAll(true));
    assert_eq!(parse("none"), ShellCommand::SelectAll(false));
    assert_eq!(parse("promote"), ShellCommand::Promote);
    assert!(parse_command("toggle").is_err());
}

#[test]
fn queue_and_action_commands() {
    assert_eq!(parse("remove bob"), ShellCommand::Remove("bob".to_string()));
    assert_eq!(parse("act"), ShellCommand::Act);
    assert!(parse_command("remove").is_err());
}

#[test]
fn phase_command_parses_known_phases_only() {
    assert_eq!(parse("phase attendees"), ShellCommand::Phase(Phase::Attendees));
    assert_eq!(parse("PHASE notifications"), ShellCommand::Phase(Phase::Notifications));
    assert!(parse_command("phase lobby").is_err());
}

#[test]
fn quit_aliases() {
    for alias in ["quit", "exit", "q"] {
        assert_eq!(parse(alias), ShellCommand::Quit);
    }
}

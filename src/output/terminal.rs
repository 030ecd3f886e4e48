// Colored terminal rendering of the workflow state.
//
// Each function projects one piece of state onto stdout. Nothing here
// mutates state; the shell decides when to re-render.

use colored::Colorize;

use crate::api::types::{Attendee, EngagementType, Event};
use crate::workflow::actions::{ActionReport, RowStatus};
use crate::workflow::phase::Phase;
use crate::workflow::selection::{SelectAllState, SelectionStore};

/// Show the phase bar with the active phase highlighted.
pub fn display_phase_bar(active: Phase) {
    let parts: Vec<String> = Phase::ALL
        .iter()
        .enumerate()
        .map(|(i, phase)| {
            let label = format!("{}. {}", i + 1, phase.title());
            if *phase == active {
                format!("[{}]", label).bold().cyan().to_string()
            } else {
                label.dimmed().to_string()
            }
        })
        .collect();
    println!("\n  {}", parts.join("  >  "));
}

/// Display the discovered events table.
pub fn display_events(events: &[Event]) {
    if events.is_empty() {
        println!("No events found. Try a wider date range or more categories.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Events ({}) ===", events.len()).bold()
    );
    println!();
    println!(
        "  {:>3}  {:<36} {:<22} {:<24} {:<10} {:>5} {:>5}",
        "#".dimmed(),
        "Event".dimmed(),
        "Date".dimmed(),
        "Venue".dimmed(),
        "Category".dimmed(),
        "Conf".dimmed(),
        "Hype".dimmed(),
    );
    println!("  {}", "-".repeat(114).dimmed());

    for (i, event) in events.iter().enumerate() {
        println!(
            "  {:>3}. {:<36} {:<22} {:<24} {:<10} {:>5.2} {}",
            i + 1,
            super::truncate_chars(&event.event_name, 33),
            super::truncate_chars(&event.exact_date, 19),
            super::truncate_chars(event.venue_or_location(), 21),
            event.category,
            event.confidence_score,
            colorize_score(event.hype_score),
        );
    }
    println!();
}

/// Display the attendee table with selection checkboxes.
pub fn display_attendees(
    event_name: Option<&str>,
    attendees: &[Attendee],
    selection: &SelectionStore,
    select_all: SelectAllState,
) {
    if attendees.is_empty() {
        println!("No attendees found for this event.");
        return;
    }

    let title = match event_name {
        Some(name) => format!("=== Attendees of {} ({}) ===", name, attendees.len()),
        None => format!("=== Attendees ({}) ===", attendees.len()),
    };
    println!("\n{}", title.bold());
    println!();
    println!(
        "  {} {:<24} {:<22} {:>9} {:>5}  {}",
        select_all_marker(select_all),
        "Username".dimmed(),
        "Engagement".dimmed(),
        "Followers".dimmed(),
        "Conf".dimmed(),
        "Post".dimmed(),
    );
    println!("  {}", "-".repeat(100).dimmed());

    for attendee in attendees {
        let checkbox = if selection.contains(&attendee.username) {
            "[x]".green().to_string()
        } else {
            "[ ]".to_string()
        };
        let preview = super::truncate_chars(&super::single_line(&attendee.post_content), 60);
        println!(
            "  {} {} {:<22} {:>9} {:>5.2}  {}",
            checkbox,
            username_cell(&attendee.username, attendee.verified),
            colorize_engagement(attendee.engagement_type),
            attendee.followers_count,
            attendee.confidence_score,
            preview.dimmed(),
        );
    }

    println!(
        "\n  {} selected",
        selection.len().to_string().bold()
    );
}

/// Display the notification queue.
pub fn display_queue(queue: &[Attendee]) {
    if queue.is_empty() {
        println!("Notification queue is empty. Select attendees and run `promote`.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Notification Queue ({}) ===", queue.len()).bold()
    );
    println!();
    for (i, attendee) in queue.iter().enumerate() {
        println!(
            "  {:>3}. {:<24} {:<22} {}",
            i + 1,
            attendee.username,
            colorize_engagement(attendee.engagement_type),
            attendee.post_link.dimmed(),
        );
    }
    println!();
}

/// Display the action menu offered by `act`.
pub fn display_action_menu(queued: usize) {
    println!(
        "\nChoose an action for {} queued attendee(s):",
        queued.to_string().bold()
    );
    for (i, action) in crate::api::action::Action::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, action);
    }
    println!("  (blank to cancel)");
}

/// Display per-attendee results of an action, then the banner.
pub fn display_action_report(report: &ActionReport) {
    println!();
    for row in &report.rows {
        let status = match &row.status {
            RowStatus::Done(word) => word.green().to_string(),
            RowStatus::Failed(Some(reason)) => {
                format!("{} {}", "Failed".red(), format!("({reason})").dimmed())
            }
            RowStatus::Failed(None) => "Failed".red().to_string(),
        };
        println!("  {:<24} {}", row.username, status);
    }
    display_banner(&report.banner(), report.failed > 0);
}

/// Print a success banner; partial failures are shown in yellow.
pub fn display_banner(text: &str, partial: bool) {
    if partial {
        println!("\n{}", text.yellow().bold());
    } else {
        println!("\n{}", text.green().bold());
    }
}

/// Print a user-facing alert.
pub fn alert(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Print a user-facing warning.
pub fn warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow(), message);
}

fn select_all_marker(state: SelectAllState) -> colored::ColoredString {
    match state {
        SelectAllState::Unchecked => "[ ]".normal(),
        SelectAllState::Checked => "[x]".green(),
        SelectAllState::Indeterminate => "[-]".yellow(),
    }
}

fn colorize_engagement(engagement: EngagementType) -> colored::ColoredString {
    match engagement {
        EngagementType::ConfirmedAttendance => engagement.as_str().green(),
        EngagementType::Interested => engagement.as_str().yellow(),
        EngagementType::Mention => engagement.as_str().dimmed(),
    }
}

/// Username padded to a fixed 24 columns, verified mark included.
/// The mark is colored, so it has to be appended after padding.
fn username_cell(username: &str, verified: bool) -> String {
    let mark = if verified { " ✓".blue() } else { "  ".normal() };
    format!("{username:<22}{mark}")
}

/// Hotter events stand out; quiet ones stay plain.
fn colorize_score(score: f64) -> colored::ColoredString {
    let text = format!("{:>5.2}", score);
    match score {
        s if s >= 0.7 => text.green().bold(),
        s if s >= 0.4 => text.green(),
        _ => text.normal(),
    }
}

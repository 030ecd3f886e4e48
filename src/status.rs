// Session status display: where the workflow stands right now.

use crate::config::Config;
use crate::workflow::state::AppState;

/// Display a one-screen summary of the current session.
pub fn show(state: &AppState, config: &Config) {
    println!("Backend: {}", config.api_url);
    println!("Phase: {}", state.phase().title());

    if state.events().is_empty() {
        println!("Events: none discovered yet");
        println!("  Run `events <location> | <categories>` to search");
    } else {
        println!("Events: {} cached", state.events().len());
    }

    match state.attendee_event() {
        Some(event) => println!(
            "Attendees: {} for '{}' ({} selected)",
            state.attendees().len(),
            event,
            state.selection().len()
        ),
        None => println!("Attendees: none discovered yet"),
    }

    println!("Notification queue: {}", state.queue().len());

    match state.last_report() {
        Some(report) => println!("Last action: {} ({})", report.action, report.banner()),
        None => println!("Last action: never"),
    }

    if let Some(qps) = config.max_qps {
        println!("Request pacing: {qps} req/s");
    }
}

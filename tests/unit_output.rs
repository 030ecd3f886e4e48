// Unit tests for output helpers and the markdown export.

use serde_json::json;

use eventintel::api::action::Action;
use eventintel::api::types::{ActionResponse, Attendee};
use eventintel::output::markdown::{render_report, write_report};
use eventintel::output::{single_line, truncate_chars};
use eventintel::workflow::actions::build_report;

fn attendee(username: &str, link: &str) -> Attendee {
    serde_json::from_value(json!({
        "username": username,
        "engagement_type": "interested",
        "followers_count": 42,
        "confidence_score": 0.7,
        "post_link": link,
        "post_content": "Can't wait | for\nthe show",
    }))
    .unwrap()
}

// ============================================================
// truncate_chars / single_line
// ============================================================

#[test]
fn truncate_short_string_unchanged() {
    assert_eq!(truncate_chars("Expo", 10), "Expo");
}

#[test]
fn truncate_exact_length_unchanged() {
    assert_eq!(truncate_chars("abcde", 5), "abcde");
}

#[test]
fn truncate_respects_multibyte_chars() {
    assert_eq!(truncate_chars("🎉🎉🎉🎉", 2), "🎉🎉...");
    assert_eq!(truncate_chars("café au lait", 4), "café...");
}

#[test]
fn single_line_collapses_whitespace() {
    assert_eq!(single_line("going\n\nto   the\tshow"), "going to the show");
}

// ============================================================
// Markdown export
// ============================================================

#[test]
fn report_lists_queue_and_last_action() {
    let queue = vec![
        attendee("@a", "https://twitter.com/a/status/1"),
        attendee("@b", ""),
    ];
    let response: ActionResponse = serde_json::from_value(json!({
        "success": true,
        "liked_count": 1,
        "failed_count": 1,
        "results": [{"status": "liked"}, {"status": "error", "error": "protected account"}]
    }))
    .unwrap();
    let report = build_report(Action::Like, None, &queue, &response);

    let md = render_report(&queue, Some(&report), "2026-10-19 09:30");

    assert!(md.contains("Generated: 2026-10-19 09:30"));
    assert!(md.contains("## Notification Queue (2)"));
    assert!(md.contains("[post](https://twitter.com/a/status/1)"));
    // Post text without a link is inlined with pipes escaped and newlines collapsed
    assert!(md.contains("Can't wait \\| for the show"));
    assert!(md.contains("## Last Action: like"));
    assert!(md.contains("**Liked 1 post(s); 1 failed**"));
    assert!(md.contains("| @a | liked |"));
    assert!(md.contains("| @b | Failed (protected account) |"));
}

#[test]
fn write_report_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("out").join("report.md");
    let queue = vec![attendee("@a", "https://twitter.com/a/status/1")];

    write_report(&path, &queue, None).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# Event Intelligence Report"));
    assert!(written.contains("| 1 | @a | interested | 42 | 0.70 |"));
}

// Markdown export of the notification queue and the last action run.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::api::types::Attendee;
use crate::workflow::actions::{ActionReport, RowStatus};

/// Render the queue and (optionally) the last action report as markdown.
pub fn render_report(
    queue: &[Attendee],
    report: Option<&ActionReport>,
    generated_at: &str,
) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# Event Intelligence Report");
    let _ = writeln!(md);
    let _ = writeln!(md, "Generated: {generated_at}");
    let _ = writeln!(md);

    let _ = writeln!(md, "## Notification Queue ({})", queue.len());
    let _ = writeln!(md);
    if queue.is_empty() {
        let _ = writeln!(md, "_No attendees queued._");
    } else {
        let _ = writeln!(
            md,
            "| # | Username | Engagement | Followers | Confidence | Post |"
        );
        let _ = writeln!(md, "|---|---|---|---|---|---|");
        for (i, a) in queue.iter().enumerate() {
            let _ = writeln!(
                md,
                "| {} | {} | {} | {} | {:.2} | {} |",
                i + 1,
                escape_cell(&a.username),
                a.engagement_type,
                a.followers_count,
                a.confidence_score,
                post_cell(a),
            );
        }
    }
    let _ = writeln!(md);

    if let Some(report) = report {
        let _ = writeln!(md, "## Last Action: {}", report.action);
        let _ = writeln!(md);
        let _ = writeln!(md, "**{}**", report.banner());
        let _ = writeln!(md);
        if let Some(message) = &report.message {
            let _ = writeln!(md, "Message: \"{}\"", escape_cell(message));
            let _ = writeln!(md);
        }
        let _ = writeln!(md, "| Username | Status |");
        let _ = writeln!(md, "|---|---|");
        for row in &report.rows {
            let status = match &row.status {
                RowStatus::Done(word) => word.clone(),
                RowStatus::Failed(Some(reason)) => format!("Failed ({})", escape_cell(reason)),
                RowStatus::Failed(None) => "Failed".to_string(),
            };
            let _ = writeln!(md, "| {} | {} |", escape_cell(&row.username), status);
        }
        let _ = writeln!(md);
    }

    md
}

/// Write the report to `path`, creating parent directories as needed.
pub fn write_report(
    path: &Path,
    queue: &[Attendee],
    report: Option<&ActionReport>,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
    let md = render_report(queue, report, &generated_at);
    std::fs::write(path, md).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn post_cell(attendee: &Attendee) -> String {
    if attendee.post_link.is_empty() {
        escape_cell(&super::truncate_chars(
            &super::single_line(&attendee.post_content),
            80,
        ))
    } else {
        format!("[post]({})", attendee.post_link)
    }
}

/// Pipes would break the table; newlines too.
fn escape_cell(text: &str) -> String {
    super::single_line(text).replace('|', "\\|")
}

// Action dispatch: choosing an engagement action and interpreting its results.
//
// The backend answers with one result per attendee, positionally aligned
// with the request. A row counts as done only when its status is the
// action's own success word; anything else (including a missing entry) is
// shown as failed.

use tracing::warn;

use crate::api::action::Action;
use crate::api::types::{ActionResponse, Attendee};

/// Outcome of asking the user which action to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionChoice {
    Chosen(Action),
    Cancelled,
}

impl ActionChoice {
    /// Interpret a menu answer. Blank, "cancel", "q" and anything unrecognised
    /// all cancel; the user is not asked again.
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return ActionChoice::Cancelled;
        }
        match trimmed.parse::<Action>() {
            Ok(action) => ActionChoice::Chosen(action),
            Err(_) => ActionChoice::Cancelled,
        }
    }
}

/// The message to attach to a request, if any.
///
/// Only comments and quotes carry text, and only when it is non-blank.
pub fn message_for(action: Action, text: Option<&str>) -> Option<String> {
    if !action.takes_message() {
        return None;
    }
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Per-attendee display status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStatus {
    /// Holds the backend's status word ("liked", "quoted", ...).
    Done(String),
    /// Holds the backend's error text when it gave one.
    Failed(Option<String>),
}

impl RowStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, RowStatus::Done(_))
    }

    /// Text shown in the status column.
    pub fn label(&self) -> &str {
        match self {
            RowStatus::Done(status) => status,
            RowStatus::Failed(_) => "Failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionRow {
    pub username: String,
    pub post_link: String,
    pub status: RowStatus,
}

/// Everything the UI needs after a dispatch completes.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionReport {
    pub action: Action,
    pub message: Option<String>,
    pub succeeded: u64,
    pub failed: u64,
    pub rows: Vec<ActionRow>,
}

impl ActionReport {
    /// Success banner, with the failure count appended when non-zero.
    pub fn banner(&self) -> String {
        let mut banner = format!("{} {} post(s)", self.action.verb(), self.succeeded);
        if self.failed > 0 {
            banner.push_str(&format!("; {} failed", self.failed));
        }
        banner
    }
}

/// Pair each requested attendee with its positional result.
pub fn build_report(
    action: Action,
    message: Option<String>,
    attendees: &[Attendee],
    response: &ActionResponse,
) -> ActionReport {
    let success_word = action.success_status();

    let rows: Vec<ActionRow> = attendees
        .iter()
        .enumerate()
        .map(|(i, attendee)| {
            let result = response.results.get(i);

            if let Some(reported) = result.and_then(|r| r.username.as_deref()) {
                if reported != attendee.username {
                    warn!(
                        position = i,
                        expected = %attendee.username,
                        reported = reported,
                        "Action result out of order with request"
                    );
                }
            }

            let status = match result {
                Some(r) if r.status == success_word => RowStatus::Done(r.status.clone()),
                Some(r) => RowStatus::Failed(r.error.clone()),
                None => RowStatus::Failed(None),
            };

            ActionRow {
                username: attendee.username.clone(),
                post_link: attendee.post_link.clone(),
                status,
            }
        })
        .collect();

    let done = rows.iter().filter(|r| r.status.is_done()).count() as u64;
    let succeeded = response.count(action.count_field()).unwrap_or(done);
    let failed = response.failed_count.unwrap_or(0);

    ActionReport {
        action,
        message,
        succeeded,
        failed,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_invalid_input_cancel() {
        assert_eq!(ActionChoice::from_input(""), ActionChoice::Cancelled);
        assert_eq!(ActionChoice::from_input("   "), ActionChoice::Cancelled);
        assert_eq!(ActionChoice::from_input("9"), ActionChoice::Cancelled);
        assert_eq!(ActionChoice::from_input("cancel"), ActionChoice::Cancelled);
        assert_eq!(
            ActionChoice::from_input(" 2 "),
            ActionChoice::Chosen(Action::Like)
        );
    }

    #[test]
    fn message_only_for_comment_and_quote() {
        assert_eq!(message_for(Action::Like, Some("hi")), None);
        assert_eq!(message_for(Action::Retweet, Some("hi")), None);
        assert_eq!(message_for(Action::Comment, Some("  ")), None);
        assert_eq!(message_for(Action::Comment, None), None);
        assert_eq!(
            message_for(Action::Quote, Some(" see you there ")),
            Some("see you there".to_string())
        );
    }

    #[test]
    fn banner_omits_zero_failures() {
        let report = ActionReport {
            action: Action::Retweet,
            message: None,
            succeeded: 4,
            failed: 0,
            rows: vec![],
        };
        assert_eq!(report.banner(), "Retweeted 4 post(s)");
    }
}

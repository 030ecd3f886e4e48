// The three-phase workflow: discover events -> discover attendees -> act.
//
// `Workflow` owns the application state and the backend handle. Every
// operation that talks to the backend takes `&mut self` for its whole
// duration, so a second request can't start while one is in flight.

pub mod actions;
pub mod discovery;
pub mod phase;
pub mod queue;
pub mod selection;
pub mod state;

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::api::error::ApiError;
use crate::api::gateway::{ensure_success, EventApi, DISCOVER_ATTENDEES, DISCOVER_EVENTS};
use crate::api::types::{ActionRequest, Attendee, Event};
use crate::output::progress::{BusyGuard, Indicator};

use actions::{ActionChoice, ActionReport};
use discovery::{AttendeeQuery, EventQuery};
use phase::{Phase, PhaseChange};
use state::{AppState, Promotion};

/// Everything that can stop a workflow operation.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Bad user input; nothing was sent.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("No attendees selected. Select at least one attendee first.")]
    EmptySelection,

    #[error("The notification queue is empty. Promote some attendees first.")]
    EmptyQueue,

    #[error("{0} is not in the current attendee results")]
    UnknownAttendee(String),
}

/// What happened when the user was asked to pick an action.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Cancelled,
    Completed(ActionReport),
}

pub struct Workflow {
    api: Arc<dyn EventApi>,
    indicator: Box<dyn Indicator>,
    state: AppState,
}

impl Workflow {
    pub fn new(api: Arc<dyn EventApi>, indicator: Box<dyn Indicator>) -> Self {
        Self {
            api,
            indicator,
            state: AppState::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    // --- Local operations ---

    pub fn switch_phase(&mut self, phase: Phase) -> PhaseChange {
        self.state.switch_phase(phase)
    }

    pub fn toggle(&mut self, username: &str) -> Result<bool, WorkflowError> {
        self.state.toggle(username)
    }

    pub fn select_all(&mut self, select: bool) {
        self.state.select_all(select);
    }

    /// Move the selected attendees into the queue and show the queue.
    pub fn promote_selection(&mut self) -> Result<Promotion, WorkflowError> {
        let promotion = self.state.promote_selection()?;
        info!(
            added = promotion.added,
            skipped = promotion.skipped,
            queued = self.state.queue().len(),
            "Promoted selection to notification queue"
        );
        self.state.switch_phase(Phase::Notifications);
        Ok(promotion)
    }

    pub fn remove_from_queue(&mut self, username: &str) -> bool {
        self.state.remove_from_queue(username)
    }

    // --- Backend operations ---

    /// Run event discovery and replace the event cache on success.
    pub async fn discover_events(&mut self, query: &EventQuery) -> Result<&[Event], WorkflowError> {
        let request = query.validate()?;

        let response = {
            let _busy = BusyGuard::start(
                self.indicator.as_ref(),
                &format!("Discovering events in {}...", request.location),
            );
            self.api
                .discover_events(&request)
                .await
                .and_then(|r| ensure_success(DISCOVER_EVENTS, r))
        };

        let response = response.inspect_err(|e| log_api_failure("event discovery", e))?;

        info!(
            events = response.events.len(),
            total = ?response.total_events,
            requested = ?response.requested_limit,
            "Event discovery complete"
        );
        self.state.replace_events(response.events);
        Ok(self.state.events())
    }

    /// Run attendee discovery and replace the attendee cache on success.
    ///
    /// A successful load always clears the selection.
    pub async fn discover_attendees(
        &mut self,
        query: &AttendeeQuery,
    ) -> Result<&[Attendee], WorkflowError> {
        let request = query.validate()?;

        let response = {
            let _busy = BusyGuard::start(
                self.indicator.as_ref(),
                &format!("Finding attendees for '{}'...", request.event_name),
            );
            self.api
                .discover_attendees(&request)
                .await
                .and_then(|r| ensure_success(DISCOVER_ATTENDEES, r))
        };

        let response = response.inspect_err(|e| log_api_failure("attendee discovery", e))?;

        info!(
            event = %request.event_name,
            attendees = response.attendees.len(),
            total = ?response.total_attendees,
            "Attendee discovery complete"
        );
        self.state
            .replace_attendees(&request.event_name, response.attendees);
        Ok(self.state.attendees())
    }

    /// Run the chosen action on every queued attendee.
    ///
    /// An empty queue fails before the choice is looked at; a cancelled
    /// choice returns without contacting the backend.
    pub async fn dispatch(
        &mut self,
        choice: ActionChoice,
        message: Option<&str>,
    ) -> Result<DispatchOutcome, WorkflowError> {
        if self.state.queue().is_empty() {
            return Err(WorkflowError::EmptyQueue);
        }

        let action = match choice {
            ActionChoice::Chosen(action) => action,
            ActionChoice::Cancelled => {
                info!("Action dispatch cancelled");
                return Ok(DispatchOutcome::Cancelled);
            }
        };

        let attendees = self.state.queue().as_slice().to_vec();
        let request = ActionRequest {
            attendees,
            message: actions::message_for(action, message),
        };

        let response = {
            let _busy = BusyGuard::start(
                self.indicator.as_ref(),
                &format!(
                    "Running {} on {} attendee(s)...",
                    action,
                    request.attendees.len()
                ),
            );
            self.api
                .perform_action(action, &request)
                .await
                .and_then(|r| ensure_success(action.endpoint(), r))
        };

        let response = response.inspect_err(|e| log_api_failure(action.as_str(), e))?;

        let report =
            actions::build_report(action, request.message, &request.attendees, &response);
        info!(
            action = %action,
            succeeded = report.succeeded,
            failed = report.failed,
            "Action dispatch complete"
        );
        self.state.record_report(report.clone());
        Ok(DispatchOutcome::Completed(report))
    }
}

fn log_api_failure(operation: &str, error: &ApiError) {
    warn!(
        operation = operation,
        kind = error.kind(),
        endpoint = error.endpoint(),
        status = ?error.status(),
        error = %error,
        "Backend call failed"
    );
}

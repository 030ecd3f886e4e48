// Application state: the caches, selection and queue behind one owner.
//
// Discovery results are replaced wholesale, never merged. Replacing the
// attendee cache always clears the selection so it can't point at a
// previous result set. The notification queue is left alone by both.

use crate::api::types::{Attendee, Event};

use super::actions::ActionReport;
use super::phase::{Phase, PhaseChange, PhaseController};
use super::queue::NotificationQueue;
use super::selection::{SelectAllState, SelectionStore};
use super::WorkflowError;

/// Result of promoting the selection into the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Promotion {
    pub added: usize,
    /// Selected attendees that were already queued.
    pub skipped: usize,
}

#[derive(Debug, Default)]
pub struct AppState {
    phase: PhaseController,
    events: Vec<Event>,
    event_options: Vec<String>,
    attendees: Vec<Attendee>,
    attendee_event: Option<String>,
    selection: SelectionStore,
    queue: NotificationQueue,
    last_report: Option<ActionReport>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Phase ---

    pub fn phase(&self) -> Phase {
        self.phase.active()
    }

    pub fn switch_phase(&mut self, phase: Phase) -> PhaseChange {
        self.phase.switch(phase)
    }

    // --- Caches ---

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Event names offered when picking an event for attendee discovery.
    pub fn event_options(&self) -> &[String] {
        &self.event_options
    }

    pub fn attendees(&self) -> &[Attendee] {
        &self.attendees
    }

    /// Name of the event the current attendee table belongs to.
    pub fn attendee_event(&self) -> Option<&str> {
        self.attendee_event.as_deref()
    }

    pub fn replace_events(&mut self, events: Vec<Event>) {
        self.event_options = events.iter().map(|e| e.event_name.clone()).collect();
        self.events = events;
    }

    pub fn replace_attendees(&mut self, event_name: &str, attendees: Vec<Attendee>) {
        self.attendees = attendees;
        self.attendee_event = Some(event_name.to_string());
        self.selection.clear();
    }

    // --- Selection ---

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn select_all_state(&self) -> SelectAllState {
        self.selection.select_all_state(&self.attendees)
    }

    /// Find the cached username matching user input, with or without a leading '@'.
    pub fn resolve_username(&self, input: &str) -> Option<&str> {
        let input = input.trim();
        let bare = input.trim_start_matches('@');
        self.attendees
            .iter()
            .map(|a| a.username.as_str())
            .find(|u| *u == input || u.trim_start_matches('@') == bare)
    }

    /// Toggle an attendee of the current table. Returns the new membership.
    pub fn toggle(&mut self, input: &str) -> Result<bool, WorkflowError> {
        let username = self
            .resolve_username(input)
            .ok_or_else(|| WorkflowError::UnknownAttendee(input.trim().to_string()))?
            .to_string();
        Ok(self.selection.toggle(&username))
    }

    pub fn select_all(&mut self, select: bool) {
        let visible = self.attendees.iter().map(|a| a.username.as_str());
        self.selection.select_all(select, visible);
    }

    /// Append the selected attendees to the queue, skipping ones already in it.
    pub fn promote_selection(&mut self) -> Result<Promotion, WorkflowError> {
        let promoted = self.selection.promote(&self.attendees)?;
        let mut promotion = Promotion {
            added: 0,
            skipped: 0,
        };
        for attendee in promoted {
            if self.queue.contains(&attendee.username) {
                promotion.skipped += 1;
            } else {
                self.queue.push(attendee);
                promotion.added += 1;
            }
        }
        Ok(promotion)
    }

    // --- Queue ---

    pub fn queue(&self) -> &NotificationQueue {
        &self.queue
    }

    /// Remove one attendee from the queue by username (with or without '@').
    pub fn remove_from_queue(&mut self, input: &str) -> bool {
        let input = input.trim();
        if self.queue.remove(input) {
            return true;
        }
        let bare = input.trim_start_matches('@');
        let matched = self
            .queue
            .iter()
            .find(|a| a.username.trim_start_matches('@') == bare)
            .map(|a| a.username.clone());
        match matched {
            Some(username) => self.queue.remove(&username),
            None => false,
        }
    }

    // --- Action results ---

    pub fn last_report(&self) -> Option<&ActionReport> {
        self.last_report.as_ref()
    }

    pub fn record_report(&mut self, report: ActionReport) {
        self.last_report = Some(report);
    }
}

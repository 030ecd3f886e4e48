// Discovery queries: user input checked locally before any request is built.

use chrono::{Days, NaiveDate};

use crate::api::types::{DiscoverAttendeesRequest, DiscoverEventsRequest};

use super::WorkflowError;

/// Categories the backend knows how to search for. Others are passed
/// through unchanged but rarely match anything.
pub const KNOWN_CATEGORIES: [&str; 6] = ["music", "sports", "arts", "food", "festival", "conference"];

/// Wire format for dates sent to the backend.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Days ahead of today covered when no end date is given.
pub const DEFAULT_WINDOW_DAYS: u64 = 30;

/// Start and end dates used when the user doesn't give any.
pub fn default_date_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let end = today
        .checked_add_days(Days::new(DEFAULT_WINDOW_DAYS))
        .unwrap_or(today);
    (today, end)
}

/// Inputs of the event discovery form.
#[derive(Debug, Clone)]
pub struct EventQuery {
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub categories: Vec<String>,
    pub max_results: u32,
}

impl EventQuery {
    /// Check the form and build the request body.
    pub fn validate(&self) -> Result<DiscoverEventsRequest, WorkflowError> {
        let location = self.location.trim();
        if location.is_empty() {
            return Err(WorkflowError::Validation(
                "Please enter a location".to_string(),
            ));
        }

        let categories: Vec<String> = self
            .categories
            .iter()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        if categories.is_empty() {
            return Err(WorkflowError::Validation(
                "Please select at least one category".to_string(),
            ));
        }

        if self.end_date < self.start_date {
            return Err(WorkflowError::Validation(format!(
                "End date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }

        Ok(DiscoverEventsRequest {
            location: location.to_string(),
            start_date: self.start_date.format(DATE_FORMAT).to_string(),
            end_date: self.end_date.format(DATE_FORMAT).to_string(),
            categories,
            max_results: self.max_results.max(1),
        })
    }

    /// Categories in this query the backend doesn't recognise.
    pub fn unknown_categories(&self) -> Vec<&str> {
        self.categories
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .filter(|c| !KNOWN_CATEGORIES.contains(&c.to_lowercase().as_str()))
            .collect()
    }
}

/// Inputs of the attendee discovery form.
#[derive(Debug, Clone)]
pub struct AttendeeQuery {
    pub event_name: String,
    /// Free-form date as shown for the event; blank means "any date".
    pub event_date: Option<String>,
    pub max_results: u32,
}

impl AttendeeQuery {
    pub fn validate(&self) -> Result<DiscoverAttendeesRequest, WorkflowError> {
        let event_name = self.event_name.trim();
        if event_name.is_empty() {
            return Err(WorkflowError::Validation(
                "Please enter or select an event name".to_string(),
            ));
        }

        Ok(DiscoverAttendeesRequest {
            event_name: event_name.to_string(),
            event_date: self
                .event_date
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            max_results: self.max_results.max(1),
        })
    }
}

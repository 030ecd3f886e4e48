// Wire types for the event intelligence backend.
//
// Everything the backend returns is deserialized leniently: only the
// identifying field of each record is required, the rest default whether
// they are missing or `null`. The backend is the source of truth for
// scores, so nothing here recomputes them.

use serde::{Deserialize, Deserializer, Serialize};

/// Missing and `null` both mean "use the default".
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An event found by `/discover-events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(alias = "name")]
    pub event_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exact_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exact_venue: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hype_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub posted_by: String,
}

impl Event {
    /// Venue if the backend gave one, otherwise the coarse location.
    pub fn venue_or_location(&self) -> &str {
        if self.exact_venue.is_empty() {
            &self.location
        } else {
            &self.exact_venue
        }
    }
}

/// How an attendee relates to the event they posted about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementType {
    ConfirmedAttendance,
    #[serde(alias = "excited")]
    Interested,
    #[default]
    #[serde(other)]
    Mention,
}

impl EngagementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementType::ConfirmedAttendance => "confirmed_attendance",
            EngagementType::Interested => "interested",
            EngagementType::Mention => "mention",
        }
    }
}

impl std::fmt::Display for EngagementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A social-media account that posted about an event.
///
/// `username` is unique within one attendee result set and is the key used
/// by the selection store and the notification queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bio: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verified: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub engagement_type: EngagementType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub post_content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub post_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub followers_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub post_link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relevance_score: f64,
}

// -- Requests --

/// Body of `POST /discover-events`.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoverEventsRequest {
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub categories: Vec<String>,
    pub max_results: u32,
}

/// Body of `POST /discover-attendees`.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoverAttendeesRequest {
    pub event_name: String,
    /// Serialized as `null` when absent; the backend treats that as "any date".
    pub event_date: Option<String>,
    pub max_results: u32,
}

/// Body of every engagement action endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ActionRequest {
    pub attendees: Vec<Attendee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// -- Responses --

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverEventsResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<Event>,
    #[serde(default)]
    pub total_events: Option<u64>,
    #[serde(default)]
    pub requested_limit: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverAttendeesResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attendees: Vec<Attendee>,
    #[serde(default)]
    pub total_attendees: Option<u64>,
    #[serde(default)]
    pub requested_limit: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One per-attendee outcome from an action endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResultItem {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of an action endpoint.
///
/// The success count lives under an action-specific key (`liked_count`,
/// `quoted_count`, ...), so the whole payload is kept as a JSON object and
/// the count is looked up by name afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub failed_count: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<ActionResultItem>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ActionResponse {
    /// Read a numeric count field such as `liked_count`.
    pub fn count(&self, field: &str) -> Option<u64> {
        self.extra.get(field).and_then(|v| v.as_u64())
    }
}

/// Common view over discovery/action responses so the client can check the
/// application-level `success` flag generically.
pub trait ApiEnvelope {
    fn success(&self) -> bool;
    fn error_message(&self) -> Option<&str>;
}

impl ApiEnvelope for DiscoverEventsResponse {
    fn success(&self) -> bool {
        self.success
    }
    fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl ApiEnvelope for DiscoverAttendeesResponse {
    fn success(&self) -> bool {
        self.success
    }
    fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl ApiEnvelope for ActionResponse {
    fn success(&self) -> bool {
        self.success
    }
    fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

// The seam between the workflow and the backend.
//
// The workflow only ever talks to `dyn EventApi`, so tests drive it with an
// in-memory fake and the binary plugs in the HTTP `ApiClient`.

use async_trait::async_trait;

use super::action::Action;
use super::error::ApiError;
use super::types::{
    ActionRequest, ActionResponse, ApiEnvelope, DiscoverAttendeesRequest,
    DiscoverAttendeesResponse, DiscoverEventsRequest, DiscoverEventsResponse,
};

pub const DISCOVER_EVENTS: &str = "/discover-events";
pub const DISCOVER_ATTENDEES: &str = "/discover-attendees";

/// Backend operations. Implementations report transport-level problems
/// only; the application-level `success` flag is checked by the caller
/// with [`ensure_success`].
#[async_trait]
pub trait EventApi: Send + Sync {
    async fn discover_events(
        &self,
        request: &DiscoverEventsRequest,
    ) -> Result<DiscoverEventsResponse, ApiError>;

    async fn discover_attendees(
        &self,
        request: &DiscoverAttendeesRequest,
    ) -> Result<DiscoverAttendeesResponse, ApiError>;

    async fn perform_action(
        &self,
        action: Action,
        request: &ActionRequest,
    ) -> Result<ActionResponse, ApiError>;
}

/// Turn a `success: false` payload into [`ApiError::Application`].
pub fn ensure_success<T: ApiEnvelope>(endpoint: &str, response: T) -> Result<T, ApiError> {
    if response.success() {
        Ok(response)
    } else {
        Err(ApiError::Application {
            endpoint: endpoint.to_string(),
            message: response
                .error_message()
                .unwrap_or("backend reported an unsuccessful request")
                .to_string(),
        })
    }
}

// HTTP client for the event intelligence backend.
//
// A thin reqwest wrapper with one generic JSON POST helper. Every endpoint
// takes a JSON body and answers with JSON.

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::action::Action;
use super::error::ApiError;
use super::gateway::{EventApi, DISCOVER_ATTENDEES, DISCOVER_EVENTS};
use super::pacer::RequestPacer;
use super::types::{
    ActionRequest, ActionResponse, DiscoverAttendeesRequest, DiscoverAttendeesResponse,
    DiscoverEventsRequest, DiscoverEventsResponse,
};

/// Default backend address (the API container listens on port 8000).
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// HTTP implementation of [`EventApi`].
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    pacer: Option<RequestPacer>,
}

impl ApiClient {
    /// Create a client pointing at the given base URL.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("eventintel/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            pacer: None,
        })
    }

    /// Pace every call through the given pacer.
    pub fn with_pacer(mut self, pacer: RequestPacer) -> Self {
        self.pacer = Some(pacer);
        self
    }

    /// POST a JSON body to `path` and decode the JSON response.
    ///
    /// Only transport-level failures are reported here; the payload's
    /// `success` flag is left for the caller.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        if let Some(pacer) = &self.pacer {
            pacer.wait_turn(path).await;
        }

        let url = format!("{}{}", self.base_url, path);
        debug!(endpoint = path, "POST request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                endpoint: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Transport {
                endpoint: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|source| ApiError::Request {
            endpoint: path.to_string(),
            source,
        })?;

        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
            endpoint: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl EventApi for ApiClient {
    async fn discover_events(
        &self,
        request: &DiscoverEventsRequest,
    ) -> Result<DiscoverEventsResponse, ApiError> {
        self.post_json(DISCOVER_EVENTS, request).await
    }

    async fn discover_attendees(
        &self,
        request: &DiscoverAttendeesRequest,
    ) -> Result<DiscoverAttendeesResponse, ApiError> {
        self.post_json(DISCOVER_ATTENDEES, request).await
    }

    async fn perform_action(
        &self,
        action: Action,
        request: &ActionRequest,
    ) -> Result<ActionResponse, ApiError> {
        self.post_json(action.endpoint(), request).await
    }
}

// Failure classification for backend calls.
//
// A non-2xx status and a `success: false` payload both reach the user as an
// error alert, but they stay separate variants so logs can tell them apart.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connect, DNS, TLS...).
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-2xx status.
    #[error("{endpoint} returned HTTP {status}")]
    Transport {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The backend answered 2xx but flagged the call as unsuccessful.
    #[error("{endpoint} reported failure: {message}")]
    Application { endpoint: String, message: String },

    /// The body was not the JSON shape we expected.
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Short label for structured logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Request { .. } => "request",
            ApiError::Transport { .. } => "transport",
            ApiError::Application { .. } => "application",
            ApiError::Decode { .. } => "decode",
        }
    }

    /// HTTP status for transport failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::Request { endpoint, .. }
            | ApiError::Transport { endpoint, .. }
            | ApiError::Application { endpoint, .. }
            | ApiError::Decode { endpoint, .. } => endpoint,
        }
    }
}

//! Error types for requests against the provider API.

use thiserror::Error;

/// Errors that can occur when fetching a resource from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The request never completed (unreachable host, DNS, reset connection).
    #[error("Network error: {0}")]
    Transport(String),

    /// A response arrived with a non-success status.
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    /// The body did not match the expected JSON shape.
    #[error("Invalid response: {0}")]
    Parse(String),
}

impl RequestError {
    /// Build an HTTP error from a response status code.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        RequestError::Http {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RequestError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            RequestError::from_status(status)
        } else {
            RequestError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::Parse(err.to_string())
    }
}

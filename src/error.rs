//! Error types for the webhook helper
//!
//! Every fatal condition a webhook invocation can hit ends up as a
//! [`WebhookError`]. Non-fatal conditions (a missing form, an update that was
//! accepted without an acknowledgment id) are logged instead and never become
//! error values.

use thiserror::Error;

/// A network-level failure talking to the remote server
///
/// Produced by a [`Transport`](crate::http::Transport) when no HTTP response
/// could be obtained (connection refused, DNS failure, body read aborted).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// Create a transport error from a plain message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a transport error wrapping an underlying cause
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Human-readable failure message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Errors that terminate a webhook invocation
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Standard input was not a valid JSON document
    #[error("malformed input: {0}")]
    MalformedInput(#[source] serde_json::Error),

    /// Standard input could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A required key is absent from the payload
    #[error("missing field in payload: {0}")]
    MissingField(String),

    /// The configured server URL cannot be used for requests
    #[error("invalid server url '{url}': {reason}")]
    InvalidServerUrl {
        /// The offending URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The request never produced a response
    #[error("error making request to server: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a status other than 200
    #[error("request failed with status {status}")]
    RequestFailed {
        /// HTTP status code received
        status: u16,
    },

    /// A response body that had to be JSON was not
    #[error("malformed response body: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// The server returned no project for the requested id
    #[error("project {id} not found in server response")]
    ProjectNotFound {
        /// Requested project id
        id: u64,
    },

    /// A project document could not be encoded
    #[error("failed to serialize request: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Result alias used across the library
pub type Result<T, E = WebhookError> = std::result::Result<T, E>;

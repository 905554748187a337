//! Error types for questionnaire submission.

use thiserror::Error;

/// Errors that can occur while submitting a questionnaire.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),

    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// The backend answered with a 5xx status.
    #[error("server error: HTTP {status}")]
    ServerFault {
        /// HTTP status code.
        status: u16,
        /// Response body, kept for diagnostics.
        body: String,
    },

    /// The backend answered with a 4xx status. Not retried.
    #[error("request rejected: HTTP {status}: {reason}")]
    ClientFault {
        /// HTTP status code.
        status: u16,
        /// Response body or status reason.
        reason: String,
    },

    /// The backend accepted the request but reported a business failure.
    #[error("submission failed: {code}: {message}")]
    Business {
        /// Machine-readable error code from the response envelope.
        code: String,
        /// Human-readable message from the response envelope.
        message: String,
        /// Optional structured details from the response envelope.
        details: Option<serde_json::Value>,
    },

    /// The record failed validation before any request was made.
    #[error("validation failed with {} error(s)", errors.len())]
    Validation {
        /// One message per validation issue, in report order.
        errors: Vec<String>,
    },

    /// The response body was not a well-formed envelope.
    #[error("malformed response: {0}")]
    BadEnvelope(String),

    /// The record could not be serialized for transport.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ClientError {
    /// Returns whether this error is worth retrying with backoff.
    ///
    /// Only transport failures, timeouts and 5xx responses qualify. A 4xx
    /// response, a business failure or a validation failure will not get
    /// better on its own.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Timeout | Self::ServerFault { .. }
        )
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for submission operations.
pub type Result<T> = std::result::Result<T, ClientError>;

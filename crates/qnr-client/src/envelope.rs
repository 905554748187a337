//! Backend response envelope.
//!
//! Every submission response carries `{"success": bool, ...}`. Successful
//! responses add an `id`; failed ones add an `error` object with a
//! machine-readable code.

use serde::Deserialize;
use serde_json::Value;

use qnr_model::scalar_to_string;

/// Business error codes the backend considers worth retrying.
///
/// Advisory only: the caller decides whether to resubmit. Business
/// failures are never retried automatically.
const RETRYABLE_CODES: [&str; 3] = ["SERVER_ERROR", "NETWORK_ERROR", "DATABASE_ERROR"];

/// Parsed submission response.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope {
    /// Whether the backend accepted the submission.
    pub success: bool,
    /// Identifier assigned to the stored record, on success.
    #[serde(default)]
    pub id: Option<Value>,
    /// Failure description, on `success: false`.
    #[serde(default)]
    pub error: Option<ApiFault>,
}

/// Business failure reported inside a well-formed envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiFault {
    /// Machine-readable error code, e.g. `VALIDATION_ERROR`.
    pub code: String,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Optional structured details.
    #[serde(default)]
    pub details: Option<Value>,
}

impl ApiFault {
    /// Whether the code is on the backend's transient-failure list.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        RETRYABLE_CODES.contains(&self.code.as_str())
    }
}

/// Acknowledgement for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// Identifier assigned by the backend, empty when none was returned.
    pub id: String,
}

impl ResponseEnvelope {
    /// Receipt for a `success: true` envelope.
    #[must_use]
    pub fn receipt(&self) -> SubmitReceipt {
        SubmitReceipt {
            id: self.id.as_ref().map(scalar_to_string).unwrap_or_default(),
        }
    }
}

//! Normalization error type.

use thiserror::Error;

/// Errors from questionnaire normalization.
///
/// Normalization is total over object-shaped input; the only failure is a
/// payload whose root is not a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum NormalizeError {
    /// The payload root is not a JSON object.
    #[error("questionnaire payload must be a JSON object")]
    NotAnObject,
}

/// Result type alias for normalization.
pub type Result<T> = std::result::Result<T, NormalizeError>;

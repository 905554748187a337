//! Resilient HTTP client for questionnaire submission.
//!
//! The backend speaks JSON over HTTP with a `{"success": bool}` response
//! envelope. This crate layers three things on top of `reqwest`:
//!
//! - a retry loop with exponential backoff for transport failures,
//!   timeouts and 5xx responses ([`ApiClient`]),
//! - classification of business failures reported inside a well-formed
//!   envelope, which are never retried automatically ([`ApiFault`]),
//! - the normalize-validate-submit pipeline ([`SubmitPipeline`]).

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod submit;

pub use client::{ApiClient, HttpReply};
pub use config::{ClientConfig, RetryPolicy};
pub use envelope::{ApiFault, ResponseEnvelope, SubmitReceipt};
pub use error::{ClientError, Result};
pub use submit::SubmitPipeline;

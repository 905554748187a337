//! Questionnaire payload validation.
//!
//! Checks a raw JSON payload against the questionnaire schema and reports
//! every violation at once, never just the first. Issue messages are
//! stable templates identifying offending questions by 1-based position,
//! suitable for direct display and for exact-match assertions in tests.
//!
//! The validator performs no I/O and accepts both input layouts (nested
//! `basic_info` and legacy flat). For submission, run the normalizer
//! first and validate its output; validating unnormalized input is only
//! for early user feedback.

pub mod issue;
pub mod validator;

pub use issue::{Issue, ValidationReport};
pub use validator::{Validator, validate_payload};

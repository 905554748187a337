//! Canonical questionnaire record types.
//!
//! This crate defines the schema shared by the normalizer, validator, and
//! request client:
//!
//! - **Record** (`record`): the canonical `QuestionnaireRecord` built at
//!   submission time and posted to the backend as JSON
//! - **Payload** (`payload`): raw-JSON shape helpers for the two accepted
//!   input layouts (nested `basic_info` object vs. legacy flat fields)
//!
//! Records serialize with the backend's snake_case field names
//! (`basic_info`, `submission_date`, `max_length`, ...). Tolerance for
//! camelCase input spellings lives in `payload`, not in the serde derives,
//! so the outbound wire format stays canonical.

pub mod payload;
pub mod record;

pub use payload::{BasicInfoSource, coerce_int, field, scalar_to_string};
pub use record::{BasicInfo, ChoiceOption, Question, QuestionnaireRecord, Statistics};

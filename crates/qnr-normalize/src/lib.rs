//! Questionnaire payload normalization.
//!
//! Converts heterogeneous submission payloads (nested or legacy flat
//! layout, camelCase or snake_case spellings, scalars where lists belong)
//! into the canonical [`qnr_model::QuestionnaireRecord`]. Normalization is
//! a pure, idempotent projection: it substitutes defaults and drops
//! unrecognizable pieces but never reports errors on field values.
//!
//! For submission the required order is normalize, then validate the
//! normalized record.

pub mod error;
pub mod normalizer;

pub use error::{NormalizeError, Result};
pub use normalizer::Normalizer;

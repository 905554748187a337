//! CLI library components for the questionnaire toolkit.

pub mod logging;

//! Validation issue types.
//!
//! Each `Issue` variant carries only the data its message template needs.
//! The templates are stable operator-facing strings; tests assert on their
//! exact text, so changing one is a breaking change for callers that match
//! on messages. Question positions are 1-based.

use serde::Serialize;

/// A single schema violation found in a questionnaire payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Issue {
    /// The payload root is not a JSON object at all.
    NotAnObject,

    // Questionnaire type
    TypeMissing,
    TypeTooLong,

    // Basic info
    BasicInfoMissing,
    NameMissing,
    NameTooLong,
    GradeMissing,
    GradeTooLong,
    SubmissionDateMissing,
    /// Wrong pattern, or a pattern-correct string naming an impossible
    /// calendar date (e.g. `2024-02-30`).
    SubmissionDateInvalid { value: String },
    AgeOutOfRange,

    // Question list
    QuestionsNotAList,
    NoQuestions,

    // Per-question (position is 1-based)
    QuestionNotAnObject { position: usize },
    QuestionIdInvalid { position: usize },
    QuestionTextMissing { position: usize },
    QuestionTextTooLong { position: usize },
    UnsupportedQuestionType { position: usize, kind: String },

    // Multiple choice
    NoOptions { position: usize },
    OptionNotAnObject { position: usize, option: usize },
    OptionValueMissing { position: usize, option: usize },
    OptionTextMissing { position: usize, option: usize },
    OptionTextTooLong { position: usize, option: usize },
    NoSelection { position: usize },
    InvalidSelection { position: usize, value: String },

    // Text input
    AnswerMissing { position: usize },
    AnswerTooLong { position: usize },
    MaxLengthOutOfRange { position: usize },
    AnswerOverLimit { position: usize, limit: i64 },

    // Statistics
    StatisticsNotAnObject,
    TotalScoreOutOfRange,
    CompletionRateOutOfRange,
    SubmissionTimeInvalid { value: String },
}

impl Issue {
    /// 1-based position of the offending question, when the issue concerns
    /// one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Issue::QuestionNotAnObject { position }
            | Issue::QuestionIdInvalid { position }
            | Issue::QuestionTextMissing { position }
            | Issue::QuestionTextTooLong { position }
            | Issue::UnsupportedQuestionType { position, .. }
            | Issue::NoOptions { position }
            | Issue::OptionNotAnObject { position, .. }
            | Issue::OptionValueMissing { position, .. }
            | Issue::OptionTextMissing { position, .. }
            | Issue::OptionTextTooLong { position, .. }
            | Issue::NoSelection { position }
            | Issue::InvalidSelection { position, .. }
            | Issue::AnswerMissing { position }
            | Issue::AnswerTooLong { position }
            | Issue::MaxLengthOutOfRange { position }
            | Issue::AnswerOverLimit { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Stable operator-facing message.
    pub fn message(&self) -> String {
        match self {
            Issue::NotAnObject => "questionnaire payload is not an object".to_string(),

            Issue::TypeMissing => "questionnaire type must not be empty".to_string(),
            Issue::TypeTooLong => "questionnaire type must not exceed 50 characters".to_string(),

            Issue::BasicInfoMissing => "basic info must not be empty".to_string(),
            Issue::NameMissing => "name must not be empty".to_string(),
            Issue::NameTooLong => "name must not exceed 50 characters".to_string(),
            Issue::GradeMissing => "grade must not be empty".to_string(),
            Issue::GradeTooLong => "grade must not exceed 20 characters".to_string(),
            Issue::SubmissionDateMissing => "submission date must not be empty".to_string(),
            Issue::SubmissionDateInvalid { value } => {
                format!("submission date is not a valid calendar date: {value}")
            }
            Issue::AgeOutOfRange => "age must be an integer between 1 and 150".to_string(),

            Issue::QuestionsNotAList => "questions must be a list".to_string(),
            Issue::NoQuestions => "at least one question is required".to_string(),

            Issue::QuestionNotAnObject { position } => {
                format!("question {position} is not an object")
            }
            Issue::QuestionIdInvalid { position } => {
                format!("question {position} id must be a positive integer")
            }
            Issue::QuestionTextMissing { position } => {
                format!("question {position} text must not be empty")
            }
            Issue::QuestionTextTooLong { position } => {
                format!("question {position} text must not exceed 500 characters")
            }
            Issue::UnsupportedQuestionType { position, kind } => {
                format!("question {position} has unsupported type: {kind}")
            }

            Issue::NoOptions { position } => {
                format!("question {position} requires at least one option")
            }
            Issue::OptionNotAnObject { position, option } => {
                format!("question {position} option {option} is not an object")
            }
            Issue::OptionValueMissing { position, option } => {
                format!("question {position} option {option} is missing a value")
            }
            Issue::OptionTextMissing { position, option } => {
                format!("question {position} option {option} text must not be empty")
            }
            Issue::OptionTextTooLong { position, option } => {
                format!("question {position} option {option} text must not exceed 200 characters")
            }
            Issue::NoSelection { position } => {
                format!("question {position} requires at least one selected answer")
            }
            Issue::InvalidSelection { position, value } => {
                format!("question {position} has invalid selected answer: {value}")
            }

            Issue::AnswerMissing { position } => {
                format!("question {position} answer must not be empty")
            }
            Issue::AnswerTooLong { position } => {
                format!("question {position} answer must not exceed 1000 characters")
            }
            Issue::MaxLengthOutOfRange { position } => {
                format!("question {position} max length must be an integer between 1 and 5000")
            }
            Issue::AnswerOverLimit { position, limit } => {
                format!("question {position} answer exceeds the {limit} character limit")
            }

            Issue::StatisticsNotAnObject => "statistics must be an object".to_string(),
            Issue::TotalScoreOutOfRange => {
                "total score must be an integer between 0 and 1000".to_string()
            }
            Issue::CompletionRateOutOfRange => {
                "completion rate must be an integer between 0 and 100".to_string()
            }
            Issue::SubmissionTimeInvalid { value } => {
                format!("submission time is not a valid timestamp: {value}")
            }
        }
    }
}

/// Outcome of validating one payload. Issues appear in a fixed order:
/// type, basic info, each question in index order, statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.issues.len()
    }

    /// Messages in report order.
    pub fn errors(&self) -> Vec<String> {
        self.issues.iter().map(Issue::message).collect()
    }
}

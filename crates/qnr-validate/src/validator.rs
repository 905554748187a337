//! Structural validation of questionnaire payloads.
//!
//! The validator walks a raw JSON value and accumulates every applicable
//! issue instead of failing fast, in a fixed order: questionnaire type,
//! basic info, each question in index order, statistics. It never panics
//! on malformed input; a non-object root yields a single structural issue.
//!
//! Validation reads raw JSON rather than the typed record so it can report
//! on payloads the normalizer would reject or reshape (unsupported
//! question types, string-typed ids, missing fields).

use serde_json::{Map, Value};

use qnr_model::{BasicInfoSource, coerce_int, field, scalar_to_string};

use crate::issue::{Issue, ValidationReport};

/// Questionnaire payload validator.
///
/// Stateless; construct once and reuse across submissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a payload, accumulating all issues in deterministic order.
    pub fn validate(&self, raw: &Value) -> ValidationReport {
        let mut report = ValidationReport::default();

        let Some(root) = raw.as_object() else {
            report.issues.push(Issue::NotAnObject);
            return report;
        };

        check_kind(root, &mut report.issues);
        check_basic_info(root, &mut report.issues);
        check_questions(root, &mut report.issues);
        check_statistics(root, &mut report.issues);

        report
    }
}

/// Validate a payload with a throwaway [`Validator`].
pub fn validate_payload(raw: &Value) -> ValidationReport {
    Validator::new().validate(raw)
}

fn check_kind(root: &Map<String, Value>, issues: &mut Vec<Issue>) {
    match root.get("type").and_then(Value::as_str) {
        Some(kind) if !kind.trim().is_empty() => {
            if kind.chars().count() > 50 {
                issues.push(Issue::TypeTooLong);
            }
        }
        _ => issues.push(Issue::TypeMissing),
    }
}

fn check_basic_info(root: &Map<String, Value>, issues: &mut Vec<Issue>) {
    // A basic_info field that is present but not an object blocks all
    // field-level checks.
    if let Some(value) = field(root, &["basic_info", "basicInfo"])
        && !value.is_object()
        && !value.is_null()
    {
        issues.push(Issue::BasicInfoMissing);
        return;
    }

    let info = BasicInfoSource::resolve(root).fields();

    match info.get("name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => {
            if name.chars().count() > 50 {
                issues.push(Issue::NameTooLong);
            }
        }
        _ => issues.push(Issue::NameMissing),
    }

    match info.get("grade").and_then(Value::as_str) {
        Some(grade) if !grade.trim().is_empty() => {
            if grade.chars().count() > 20 {
                issues.push(Issue::GradeTooLong);
            }
        }
        _ => issues.push(Issue::GradeMissing),
    }

    match field(info, &["submission_date", "submissionDate"]) {
        None | Some(Value::Null) => issues.push(Issue::SubmissionDateMissing),
        Some(Value::String(s)) if s.is_empty() => issues.push(Issue::SubmissionDateMissing),
        Some(value) => {
            let valid = value.as_str().is_some_and(is_valid_date);
            if !valid {
                issues.push(Issue::SubmissionDateInvalid {
                    value: scalar_to_string(value),
                });
            }
        }
    }

    if let Some(age) = info.get("age")
        && !age.is_null()
        && !matches!(coerce_int(age), Some(1..=150))
    {
        issues.push(Issue::AgeOutOfRange);
    }
}

fn check_questions(root: &Map<String, Value>, issues: &mut Vec<Issue>) {
    let questions = match root.get("questions") {
        None | Some(Value::Null) => {
            issues.push(Issue::NoQuestions);
            return;
        }
        Some(Value::Array(list)) => list,
        Some(_) => {
            issues.push(Issue::QuestionsNotAList);
            return;
        }
    };

    if questions.is_empty() {
        issues.push(Issue::NoQuestions);
        return;
    }

    for (index, question) in questions.iter().enumerate() {
        check_question(question, index + 1, issues);
    }
}

fn check_question(question: &Value, position: usize, issues: &mut Vec<Issue>) {
    let Some(fields) = question.as_object() else {
        issues.push(Issue::QuestionNotAnObject { position });
        return;
    };

    // The id must already be a positive JSON integer; strings are not
    // coerced here (that is the normalizer's job).
    let id_ok = fields
        .get("id")
        .and_then(json_int)
        .is_some_and(|id| id >= 1);
    if !id_ok {
        issues.push(Issue::QuestionIdInvalid { position });
    }

    match fields.get("question").and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => {
            if text.chars().count() > 500 {
                issues.push(Issue::QuestionTextTooLong { position });
            }
        }
        _ => issues.push(Issue::QuestionTextMissing { position }),
    }

    match fields.get("type").and_then(Value::as_str) {
        Some("multiple_choice") => check_multiple_choice(fields, position, issues),
        Some("text_input") => check_text_input(fields, position, issues),
        _ => issues.push(Issue::UnsupportedQuestionType {
            position,
            kind: fields
                .get("type")
                .map(scalar_to_string)
                .unwrap_or_else(|| "none".to_string()),
        }),
    }
}

fn check_multiple_choice(fields: &Map<String, Value>, position: usize, issues: &mut Vec<Issue>) {
    let options = match fields.get("options").and_then(Value::as_array) {
        Some(list) if !list.is_empty() => list,
        _ => {
            issues.push(Issue::NoOptions { position });
            return;
        }
    };

    // Every option is checked even after one fails; only options with a
    // defined value contribute to the valid-answer set.
    let mut valid_values: Vec<&Value> = Vec::new();
    for (index, option) in options.iter().enumerate() {
        let number = index + 1;
        let Some(option_fields) = option.as_object() else {
            issues.push(Issue::OptionNotAnObject {
                position,
                option: number,
            });
            continue;
        };

        match option_fields.get("value") {
            None | Some(Value::Null) => issues.push(Issue::OptionValueMissing {
                position,
                option: number,
            }),
            Some(value) => valid_values.push(value),
        }

        match option_fields.get("text").and_then(Value::as_str) {
            Some(text) if !text.trim().is_empty() => {
                if text.chars().count() > 200 {
                    issues.push(Issue::OptionTextTooLong {
                        position,
                        option: number,
                    });
                }
            }
            _ => issues.push(Issue::OptionTextMissing {
                position,
                option: number,
            }),
        }
    }

    match fields.get("selected").and_then(Value::as_array) {
        Some(selected) if !selected.is_empty() => {
            for value in selected {
                if !valid_values.contains(&value) {
                    issues.push(Issue::InvalidSelection {
                        position,
                        value: scalar_to_string(value),
                    });
                }
            }
        }
        _ => issues.push(Issue::NoSelection { position }),
    }
}

fn check_text_input(fields: &Map<String, Value>, position: usize, issues: &mut Vec<Issue>) {
    let answer = fields.get("answer").and_then(Value::as_str);
    match answer {
        Some(text) if !text.trim().is_empty() => {
            if text.chars().count() > 1000 {
                issues.push(Issue::AnswerTooLong { position });
            }
        }
        _ => issues.push(Issue::AnswerMissing { position }),
    }

    if let Some(limit) = field(fields, &["max_length", "maxLength"]) {
        match coerce_int(limit) {
            Some(limit @ 1..=5000) => {
                if let Some(text) = answer
                    && text.chars().count() as i64 > limit
                {
                    issues.push(Issue::AnswerOverLimit { position, limit });
                }
            }
            _ => issues.push(Issue::MaxLengthOutOfRange { position }),
        }
    }
}

fn check_statistics(root: &Map<String, Value>, issues: &mut Vec<Issue>) {
    let statistics = match root.get("statistics") {
        None | Some(Value::Null) => return,
        Some(value) => value,
    };

    let Some(fields) = statistics.as_object() else {
        issues.push(Issue::StatisticsNotAnObject);
        return;
    };

    if let Some(score) = field(fields, &["total_score", "totalScore"])
        && !score.is_null()
        && !matches!(coerce_int(score), Some(0..=1000))
    {
        issues.push(Issue::TotalScoreOutOfRange);
    }

    if let Some(rate) = field(fields, &["completion_rate", "completionRate"])
        && !rate.is_null()
        && !matches!(coerce_int(rate), Some(0..=100))
    {
        issues.push(Issue::CompletionRateOutOfRange);
    }

    match field(fields, &["submission_time", "submissionTime"]) {
        None | Some(Value::Null) => {}
        Some(Value::String(s)) if s.is_empty() => {}
        Some(value) => {
            let valid = value.as_str().is_some_and(is_valid_datetime);
            if !valid {
                issues.push(Issue::SubmissionTimeInvalid {
                    value: scalar_to_string(value),
                });
            }
        }
    }
}

/// A JSON number holding an integral value. Strings never qualify.
fn json_int(value: &Value) -> Option<i64> {
    let number = value.as_number()?;
    number
        .as_i64()
        .or_else(|| number.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
}

/// Strict `YYYY-MM-DD`: pattern match plus a real calendar date.
fn is_valid_date(value: &str) -> bool {
    let pattern_ok = regex::Regex::new(r"^\d{4}-\d{2}-\d{2}$")
        .map(|r| r.is_match(value))
        .unwrap_or(false);
    pattern_ok && chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS[.fff]`, `YYYY-MM-DD HH:MM:SS`,
/// or a plain calendar date.
fn is_valid_datetime(value: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(value).is_ok()
        || chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").is_ok()
        || chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

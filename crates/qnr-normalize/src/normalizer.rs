//! Canonicalization of raw questionnaire payloads.
//!
//! `Normalizer` projects any object-shaped JSON value onto the canonical
//! [`QuestionnaireRecord`]: missing fields get defaults, strings are
//! trimmed, numbers are coerced, and questions without a recognizable
//! type are dropped from the output. It is a pure projection — it never
//! rejects bad field values; that is the validator's job, run on the
//! normalized record afterwards.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::debug;

use qnr_model::{
    BasicInfo, BasicInfoSource, ChoiceOption, Question, QuestionnaireRecord, Statistics,
    coerce_int, field, scalar_to_string,
};

use crate::error::{NormalizeError, Result};

/// Questionnaire payload normalizer.
///
/// Holds only an optional fixed clock; construct once and reuse. The
/// clock override keeps date and timestamp defaults deterministic in
/// tests.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    now: Option<DateTime<Utc>>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the clock used for `submission_date` and `submission_time`
    /// defaults.
    #[must_use]
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }

    /// Project a raw payload onto the canonical record.
    ///
    /// # Errors
    ///
    /// Fails only when the payload root is not a JSON object.
    pub fn normalize(&self, raw: &Value) -> Result<QuestionnaireRecord> {
        let root = raw.as_object().ok_or(NormalizeError::NotAnObject)?;

        let questions: Vec<Question> = root
            .get("questions")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(|question| self.normalize_question(question))
                    .collect()
            })
            .unwrap_or_default();

        Ok(QuestionnaireRecord {
            kind: normalize_kind(root.get("type")),
            basic_info: self.normalize_basic_info(BasicInfoSource::resolve(root).fields()),
            questions,
            statistics: match root.get("statistics") {
                None | Some(Value::Null) => None,
                Some(value) => Some(self.normalize_statistics(value)),
            },
        })
    }

    fn normalize_basic_info(&self, info: &Map<String, Value>) -> BasicInfo {
        let submission_date = match field(info, &["submission_date", "submissionDate"]) {
            None | Some(Value::Null) => self.now().format("%Y-%m-%d").to_string(),
            Some(Value::String(s)) if s.is_empty() => self.now().format("%Y-%m-%d").to_string(),
            Some(value) => scalar_to_string(value),
        };

        BasicInfo {
            name: coerced_trimmed(info.get("name")),
            grade: coerced_trimmed(info.get("grade")),
            submission_date,
            // Dropped, never zeroed, when not numeric.
            age: info.get("age").and_then(coerce_int),
        }
    }

    fn normalize_question(&self, question: &Value) -> Option<Question> {
        let fields = question.as_object()?;
        let Some(kind) = fields.get("type").and_then(Value::as_str) else {
            debug!("dropping question without a recognizable type");
            return None;
        };

        let id = fields.get("id").and_then(coerce_int).unwrap_or(0);
        let text = coerced_trimmed(fields.get("question"));

        match kind {
            "multiple_choice" => Some(Question::MultipleChoice {
                id,
                question: text,
                options: normalize_options(fields.get("options")),
                selected: normalize_selected(fields.get("selected")),
                can_speak: field(fields, &["can_speak", "canSpeak"]).map(truthy),
            }),
            "text_input" => Some(Question::TextInput {
                id,
                question: text,
                answer: coerced_trimmed(fields.get("answer")),
                max_length: field(fields, &["max_length", "maxLength"]).and_then(coerce_int),
            }),
            other => {
                debug!(kind = other, "dropping question with unsupported type");
                None
            }
        }
    }

    fn normalize_statistics(&self, statistics: &Value) -> Statistics {
        let empty = Map::new();
        let fields = statistics.as_object().unwrap_or(&empty);

        let submission_time = match field(fields, &["submission_time", "submissionTime"]) {
            None | Some(Value::Null) => default_timestamp(self.now()),
            Some(Value::String(s)) if s.is_empty() => default_timestamp(self.now()),
            Some(value) => scalar_to_string(value),
        };

        Statistics {
            total_score: field(fields, &["total_score", "totalScore"]).and_then(coerce_int),
            completion_rate: field(fields, &["completion_rate", "completionRate"])
                .and_then(coerce_int)
                .unwrap_or(100),
            submission_time,
        }
    }
}

fn normalize_kind(value: Option<&Value>) -> String {
    let kind = match value {
        None | Some(Value::Null) => String::new(),
        Some(value) => scalar_to_string(value).trim().to_lowercase(),
    };
    if kind.is_empty() { "unknown".to_string() } else { kind }
}

/// String coercion for free-text fields: strings pass through, numbers
/// and booleans render as text, everything else becomes empty. Always
/// trimmed.
fn coerced_trimmed(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn normalize_options(value: Option<&Value>) -> Vec<ChoiceOption> {
    value
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|option| {
                    let fields = option.as_object()?;
                    Some(ChoiceOption {
                        value: fields.get("value").cloned().unwrap_or(Value::Null),
                        text: coerced_trimmed(fields.get("text")),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// `selected` is always a list in canonical form; a bare scalar source
/// value becomes a one-element list.
fn normalize_selected(value: Option<&Value>) -> Vec<Value> {
    match value {
        None => Vec::new(),
        Some(Value::Array(list)) => list.clone(),
        Some(other) => vec![other.clone()],
    }
}

/// Loose truthiness for flag fields arriving in assorted shapes.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn default_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

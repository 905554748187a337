//! Canonical questionnaire record.
//!
//! The record is constructed once by the normalizer, checked by the
//! validator, and handed to the request client; it is never mutated after
//! construction. Optional fields are skipped on serialization so the
//! outbound JSON matches what the backend expects.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A complete questionnaire submission in canonical form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireRecord {
    /// Questionnaire kind, lower-cased and trimmed (`"unknown"` when the
    /// source did not carry one).
    #[serde(rename = "type")]
    pub kind: String,
    pub basic_info: BasicInfo,
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Statistics>,
}

/// Respondent details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub name: String,
    pub grade: String,
    /// `YYYY-MM-DD`.
    pub submission_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
}

/// A single answered question, tagged by its `type` field on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Question {
    #[serde(rename = "multiple_choice")]
    MultipleChoice {
        id: i64,
        question: String,
        options: Vec<ChoiceOption>,
        selected: Vec<Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        can_speak: Option<bool>,
    },
    #[serde(rename = "text_input")]
    TextInput {
        id: i64,
        question: String,
        answer: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_length: Option<i64>,
    },
}

impl Question {
    /// Declared question id (positive after validation).
    pub fn id(&self) -> i64 {
        match self {
            Question::MultipleChoice { id, .. } | Question::TextInput { id, .. } => *id,
        }
    }

    /// Question prompt text.
    pub fn question(&self) -> &str {
        match self {
            Question::MultipleChoice { question, .. } | Question::TextInput { question, .. } => {
                question
            }
        }
    }
}

/// One declared choice for a multiple-choice question. `value` is any JSON
/// scalar; `Null` marks an option whose value was missing in the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: Value,
    pub text: String,
}

/// Optional submission statistics block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_score: Option<i64>,
    pub completion_rate: i64,
    /// RFC 3339 timestamp.
    pub submission_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> QuestionnaireRecord {
        QuestionnaireRecord {
            kind: "habit_survey".to_string(),
            basic_info: BasicInfo {
                name: "Alice".to_string(),
                grade: "3".to_string(),
                submission_date: "2024-06-01".to_string(),
                age: Some(9),
            },
            questions: vec![
                Question::MultipleChoice {
                    id: 1,
                    question: "Can you whistle?".to_string(),
                    options: vec![
                        ChoiceOption {
                            value: json!(1),
                            text: "Yes".to_string(),
                        },
                        ChoiceOption {
                            value: json!(2),
                            text: "No".to_string(),
                        },
                    ],
                    selected: vec![json!(1)],
                    can_speak: None,
                },
                Question::TextInput {
                    id: 2,
                    question: "Anything else?".to_string(),
                    answer: "no".to_string(),
                    max_length: Some(100),
                },
            ],
            statistics: None,
        }
    }

    #[test]
    fn record_serializes_with_wire_names() {
        let value = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(value["type"], "habit_survey");
        assert_eq!(value["basic_info"]["submission_date"], "2024-06-01");
        assert_eq!(value["questions"][0]["type"], "multiple_choice");
        assert_eq!(value["questions"][1]["type"], "text_input");
        assert_eq!(value["questions"][1]["max_length"], 100);
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let value = serde_json::to_value(sample_record()).unwrap();
        assert!(value.get("statistics").is_none());
        assert!(value["questions"][0].get("can_speak").is_none());
    }

    #[test]
    fn record_roundtrips_through_json() {
        let record = sample_record();
        let text = serde_json::to_string(&record).unwrap();
        let back: QuestionnaireRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn question_rejects_unknown_tag() {
        let result: Result<Question, _> = serde_json::from_value(json!({
            "type": "slider",
            "id": 1,
            "question": "How much?"
        }));
        assert!(result.is_err());
    }
}

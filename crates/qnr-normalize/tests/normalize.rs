//! Normalization properties: idempotence, and normalize-then-validate
//! acceptance for inputs that already carry the required fields.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use serde_json::{Value, json};

use qnr_normalize::Normalizer;
use qnr_validate::validate_payload;

fn fixed_normalizer() -> Normalizer {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    Normalizer::new().with_now(now)
}

/// Re-normalizing a canonical record must be a no-op.
fn assert_idempotent(payload: &Value) {
    let normalizer = fixed_normalizer();
    let first = normalizer.normalize(payload).expect("object-shaped input");
    let canonical = serde_json::to_value(&first).expect("serialize");
    let second = normalizer.normalize(&canonical).expect("canonical is object-shaped");
    assert_eq!(first, second, "normalization not idempotent for {payload}");
}

#[test]
fn idempotent_on_messy_payload() {
    assert_idempotent(&json!({
        "type": "  Habit_Survey ",
        "name": " Alice ",
        "grade": 3,
        "age": "9.5",
        "questions": [
            {"id": "2", "type": "multiple_choice", "question": " Q ",
             "options": [{"value": 1, "text": " Yes "}, {"text": "no value"}],
             "selected": 1},
            {"id": 3, "type": "text_input", "question": "Q2", "answer": 42,
             "maxLength": "100"},
            {"id": 4, "question": "typeless, dropped"}
        ],
        "statistics": {"totalScore": "7", "submission_time": ""}
    }));
}

#[test]
fn idempotent_on_empty_object() {
    assert_idempotent(&json!({}));
}

#[test]
fn valid_input_passes_validation_after_normalization() {
    let payload = json!({
        "type": "habit_survey",
        "basic_info": {"name": "Alice", "grade": "3", "submission_date": "2024-06-01"},
        "questions": [
            {"id": 1, "type": "multiple_choice", "question": "Q",
             "options": [{"value": 1, "text": "Yes"}, {"value": 2, "text": "No"}],
             "selected": [2]}
        ]
    });
    let record = fixed_normalizer().normalize(&payload).unwrap();
    let report = validate_payload(&serde_json::to_value(&record).unwrap());
    assert!(report.is_valid(), "unexpected issues: {:?}", report.issues);
}

// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------

/// Arbitrary JSON scalar.
fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(|n| json!(n)),
        "[A-Za-z0-9 ]{0,12}".prop_map(|s| json!(s)),
    ]
}

/// Arbitrary JSON value of bounded depth.
fn arb_json() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,12}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

/// Object-shaped payloads mixing schema field names with arbitrary junk.
fn arb_loose_payload() -> impl Strategy<Value = Value> {
    let keys = prop_oneof![
        Just("type".to_string()),
        Just("basic_info".to_string()),
        Just("basicInfo".to_string()),
        Just("name".to_string()),
        Just("grade".to_string()),
        Just("submission_date".to_string()),
        Just("age".to_string()),
        Just("questions".to_string()),
        Just("statistics".to_string()),
        "[a-z]{1,8}",
    ];
    prop::collection::btree_map(keys, arb_json(), 0..7)
        .prop_map(|map| Value::Object(map.into_iter().collect()))
}

/// A well-formed multiple-choice question with `selected` drawn from the
/// declared option values.
fn arb_choice_question() -> impl Strategy<Value = Value> {
    (1usize..4).prop_flat_map(|count| {
        let values: Vec<i64> = (1..=count as i64).collect();
        (
            prop::collection::vec("[A-Za-z]{1,10}", count),
            proptest::sample::subsequence(values, 1..=count),
        )
            .prop_map(|(texts, selected)| {
                let options: Vec<Value> = texts
                    .iter()
                    .enumerate()
                    .map(|(index, text)| json!({"value": (index + 1) as i64, "text": text}))
                    .collect();
                json!({
                    "type": "multiple_choice",
                    "question": "Q",
                    "options": options,
                    "selected": selected
                })
            })
    })
}

/// A well-formed text-input question; any limit is at least as long as the
/// answer.
fn arb_text_question() -> impl Strategy<Value = Value> {
    ("[a-z]{1,50}", proptest::option::of(50i64..5000)).prop_map(|(answer, limit)| {
        let mut question = json!({
            "type": "text_input",
            "question": "Q",
            "answer": answer
        });
        if let Some(limit) = limit {
            question["max_length"] = json!(limit);
        }
        question
    })
}

/// Payloads that already satisfy the minimum required fields.
fn arb_well_formed_payload() -> impl Strategy<Value = Value> {
    let date = (2000i32..2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"));
    let question = prop_oneof![arb_choice_question(), arb_text_question()];
    (
        "[a-z_]{1,20}",
        "[A-Za-z]{1,20}",
        "[0-9]{1,2}",
        date,
        prop::collection::vec(question, 1..4),
    )
        .prop_map(|(kind, name, grade, date, mut questions)| {
            for (index, question) in questions.iter_mut().enumerate() {
                question["id"] = json!((index + 1) as i64);
            }
            json!({
                "type": kind,
                "basic_info": {"name": name, "grade": grade, "submission_date": date},
                "questions": questions
            })
        })
}

proptest! {
    /// normalize(normalize(x)) == normalize(x) for any object-shaped x.
    #[test]
    fn normalization_is_idempotent(payload in arb_loose_payload()) {
        assert_idempotent(&payload);
    }

    /// Anything already carrying the required fields validates cleanly
    /// after normalization.
    #[test]
    fn well_formed_payloads_validate_after_normalization(payload in arb_well_formed_payload()) {
        let record = fixed_normalizer().normalize(&payload).unwrap();
        let canonical = serde_json::to_value(&record).unwrap();
        let report = validate_payload(&canonical);
        prop_assert!(report.is_valid(), "issues: {:?}", report.issues);
    }
}

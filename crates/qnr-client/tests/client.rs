//! Retry and envelope behavior against a live mock backend.
//!
//! Each test starts an axum server on a random port with a scripted
//! response sequence and counts how many requests actually arrive. Retry
//! delays are shrunk to milliseconds so the backoff loop runs fast.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use qnr_client::{ApiClient, ClientConfig, ClientError, RetryPolicy, SubmitPipeline};
use qnr_normalize::Normalizer;

/// Scripted backend: one `(status, body)` per attempt, last entry repeats.
#[derive(Clone)]
struct Script {
    responses: Arc<Vec<(u16, Value)>>,
    hits: Arc<AtomicUsize>,
}

async fn scripted(State(script): State<Script>, Json(_payload): Json<Value>) -> impl IntoResponse {
    let attempt = script.hits.fetch_add(1, Ordering::SeqCst);
    let index = attempt.min(script.responses.len() - 1);
    let (status, body) = script.responses[index].clone();
    (StatusCode::from_u16(status).unwrap(), Json(body))
}

/// Start the mock backend on a random port; returns its address and the
/// request counter.
fn spawn_backend(responses: Vec<(u16, Value)>) -> (SocketAddr, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let script = Script {
        responses: Arc::new(responses),
        hits: Arc::clone(&hits),
    };

    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            let app = Router::new()
                .route("/api/questionnaires", post(scripted))
                .with_state(script);
            axum::serve(listener, app).await
        })
        .unwrap();
    });

    (addr, hits)
}

fn fast_client(addr: SocketAddr) -> ApiClient {
    let mut config = ClientConfig::new(format!("http://{addr}"));
    config.retry = RetryPolicy {
        max_retries: 3,
        base_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
    };
    ApiClient::new(config).unwrap()
}

fn valid_payload() -> Value {
    json!({
        "type": "habit_survey",
        "basic_info": {"name": "Alice", "grade": "3", "submission_date": "2024-06-01"},
        "questions": [
            {"id": 1, "type": "text_input", "question": "Q", "answer": "hello"}
        ]
    })
}

fn valid_record() -> qnr_model::QuestionnaireRecord {
    Normalizer::new().normalize(&valid_payload()).unwrap()
}

#[test]
fn persistent_500_exhausts_the_attempt_budget() {
    let (addr, hits) = spawn_backend(vec![(500, json!({"error": "boom"}))]);
    let client = fast_client(addr);

    let err = client.submit(&valid_record()).unwrap_err();
    assert!(matches!(err, ClientError::ServerFault { status: 500, .. }), "got {err:?}");
    assert_eq!(hits.load(Ordering::SeqCst), 4, "initial attempt plus three retries");
}

#[test]
fn transient_500_recovers_on_retry() {
    let (addr, hits) = spawn_backend(vec![
        (500, json!({"error": "boom"})),
        (200, json!({"success": true, "id": "qnr-1"})),
    ]);
    let client = fast_client(addr);

    let receipt = client.submit(&valid_record()).unwrap();
    assert_eq!(receipt.id, "qnr-1");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn not_found_is_terminal() {
    let (addr, hits) = spawn_backend(vec![(404, json!({"error": "no such route"}))]);
    let client = fast_client(addr);

    let err = client.submit(&valid_record()).unwrap_err();
    assert!(matches!(err, ClientError::ClientFault { status: 404, .. }), "got {err:?}");
    assert_eq!(hits.load(Ordering::SeqCst), 1, "4xx must not be retried");
}

#[test]
fn business_failure_is_surfaced_without_retry() {
    let (addr, hits) = spawn_backend(vec![(
        200,
        json!({
            "success": false,
            "error": {"code": "DATABASE_ERROR", "message": "write failed",
                      "details": {"table": "questionnaires"}}
        }),
    )]);
    let client = fast_client(addr);

    let err = client.submit(&valid_record()).unwrap_err();
    let ClientError::Business { code, message, details } = err else {
        panic!("expected business error, got {err:?}");
    };
    assert_eq!(code, "DATABASE_ERROR");
    assert_eq!(message, "write failed");
    assert_eq!(details.unwrap()["table"], "questionnaires");
    assert_eq!(hits.load(Ordering::SeqCst), 1, "business failures are never auto-retried");
}

#[test]
fn malformed_envelope_is_reported() {
    let (addr, hits) = spawn_backend(vec![(200, json!("not an envelope"))]);
    let client = fast_client(addr);

    let err = client.submit(&valid_record()).unwrap_err();
    assert!(matches!(err, ClientError::BadEnvelope(_)), "got {err:?}");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn pipeline_rejects_invalid_payload_before_the_network() {
    let (addr, hits) = spawn_backend(vec![(200, json!({"success": true, "id": "qnr-2"}))]);
    let pipeline = SubmitPipeline::new(fast_client(addr));

    let err = pipeline.run(&json!({"type": "habit_survey"})).unwrap_err();
    let ClientError::Validation { errors } = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert!(!errors.is_empty());
    assert_eq!(hits.load(Ordering::SeqCst), 0, "invalid payloads must not be sent");
}

#[test]
fn pipeline_submits_valid_payload() {
    let (addr, hits) = spawn_backend(vec![(200, json!({"success": true, "id": 42}))]);
    let pipeline = SubmitPipeline::new(fast_client(addr));

    let receipt = pipeline.run(&valid_payload()).unwrap();
    assert_eq!(receipt.id, "42");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

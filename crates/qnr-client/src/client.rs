//! Blocking HTTP client with retry and backoff.
//!
//! Wraps `reqwest::blocking` with the resilience rules the backend
//! expects: transport failures, timeouts and 5xx responses are retried
//! with exponential backoff, 4xx responses fail immediately, and a
//! well-formed envelope with `success: false` is surfaced as a business
//! error without any automatic retry.

use std::thread;

use reqwest::Method;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, warn};

use qnr_model::QuestionnaireRecord;

use crate::config::ClientConfig;
use crate::envelope::{ApiFault, ResponseEnvelope, SubmitReceipt};
use crate::error::{ClientError, Result};

/// Submission endpoint, relative to the configured base URL.
const QUESTIONNAIRES_PATH: &str = "/api/questionnaires";

/// Status and body of a completed request.
///
/// Only statuses below 400 reach callers; error statuses are converted
/// to [`ClientError`] before the reply is returned.
#[derive(Debug, Clone)]
pub struct HttpReply {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

/// Blocking client for the questionnaire backend.
pub struct ApiClient {
    /// Underlying HTTP client, built with the configured timeout.
    client: Client,
    /// Base URL and retry policy.
    config: ClientConfig,
}

impl ApiClient {
    /// Build a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Fails when the underlying HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// GET a path under the base URL, with retry.
    pub fn get(&self, path: &str) -> Result<HttpReply> {
        self.request_with_retry(Method::GET, path, None)
    }

    /// POST a JSON body to a path under the base URL, with retry.
    pub fn post(&self, path: &str, body: &Value) -> Result<HttpReply> {
        self.request_with_retry(Method::POST, path, Some(body))
    }

    /// PUT a JSON body to a path under the base URL, with retry.
    pub fn put(&self, path: &str, body: &Value) -> Result<HttpReply> {
        self.request_with_retry(Method::PUT, path, Some(body))
    }

    /// DELETE a path under the base URL, with retry.
    pub fn delete(&self, path: &str) -> Result<HttpReply> {
        self.request_with_retry(Method::DELETE, path, None)
    }

    /// Submit a canonical record and parse the response envelope.
    ///
    /// # Errors
    ///
    /// Besides transport and status errors, fails with
    /// [`ClientError::Business`] when the backend reports
    /// `success: false`, and with [`ClientError::BadEnvelope`] when the
    /// response body is not a well-formed envelope.
    pub fn submit(&self, record: &QuestionnaireRecord) -> Result<SubmitReceipt> {
        let payload = serde_json::to_value(record)?;
        let reply = self.post(QUESTIONNAIRES_PATH, &payload)?;

        let envelope: ResponseEnvelope = serde_json::from_str(&reply.body)
            .map_err(|err| ClientError::BadEnvelope(err.to_string()))?;

        if envelope.success {
            let receipt = envelope.receipt();
            debug!(id = %receipt.id, "submission accepted");
            return Ok(receipt);
        }

        let fault = envelope.error.unwrap_or_else(|| ApiFault {
            code: "UNKNOWN_ERROR".to_string(),
            message: "submission failed".to_string(),
            details: None,
        });
        debug!(
            code = %fault.code,
            retryable = fault.is_retryable(),
            "backend reported a business failure"
        );
        Err(ClientError::Business {
            code: fault.code,
            message: fault.message,
            details: fault.details,
        })
    }

    /// Run one request through the retry loop.
    ///
    /// Retryable failures sleep for the policy's backoff delay and try
    /// again until the attempt budget is spent; the last error is then
    /// returned unchanged.
    fn request_with_retry(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<HttpReply> {
        let url = self.url(path);
        let mut attempt = 0u32;
        loop {
            match self.dispatch(&method, &url, body) {
                Ok(reply) => return Ok(reply),
                Err(err) if err.is_retryable() && attempt < self.config.retry.max_retries => {
                    let delay = self.config.retry.backoff_delay(attempt);
                    warn!(
                        %url,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "request failed, retrying"
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One attempt: send the request and classify the outcome.
    fn dispatch(&self, method: &Method, url: &str, body: Option<&Value>) -> Result<HttpReply> {
        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        if status >= 500 {
            Err(ClientError::ServerFault { status, body })
        } else if status >= 400 {
            Err(ClientError::ClientFault {
                status,
                reason: body,
            })
        } else {
            Ok(HttpReply { status, body })
        }
    }
}

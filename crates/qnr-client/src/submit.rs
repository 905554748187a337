//! End-to-end submission pipeline: normalize, validate, submit.

use serde_json::Value;
use tracing::info;

use qnr_model::QuestionnaireRecord;
use qnr_normalize::Normalizer;
use qnr_validate::Validator;

use crate::client::ApiClient;
use crate::envelope::SubmitReceipt;
use crate::error::{ClientError, Result};

/// Submission pipeline.
///
/// Runs the required order on every payload: normalize into the
/// canonical record, validate the normalized record, and only then hand
/// it to the HTTP client. A payload that fails validation never reaches
/// the network.
pub struct SubmitPipeline {
    normalizer: Normalizer,
    validator: Validator,
    client: ApiClient,
}

impl SubmitPipeline {
    pub fn new(client: ApiClient) -> Self {
        Self {
            normalizer: Normalizer::new(),
            validator: Validator::new(),
            client,
        }
    }

    /// Replace the default normalizer, e.g. to pin its clock.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Normalize and validate a raw payload without submitting it.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::Validation`] when the payload is not
    /// object-shaped or the normalized record has validation issues.
    pub fn prepare(&self, raw: &Value) -> Result<QuestionnaireRecord> {
        let record = self
            .normalizer
            .normalize(raw)
            .map_err(|err| ClientError::Validation {
                errors: vec![err.to_string()],
            })?;

        let canonical = serde_json::to_value(&record)?;
        let report = self.validator.validate(&canonical);
        if !report.is_valid() {
            return Err(ClientError::Validation {
                errors: report.errors(),
            });
        }
        Ok(record)
    }

    /// Run the full pipeline on a raw payload.
    pub fn run(&self, raw: &Value) -> Result<SubmitReceipt> {
        let record = self.prepare(raw)?;
        info!(
            kind = %record.kind,
            questions = record.questions.len(),
            "submitting questionnaire"
        );
        self.client.submit(&record)
    }
}

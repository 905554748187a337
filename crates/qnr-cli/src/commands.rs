use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{info, trace};

use qnr_cli::logging::redact_value;
use qnr_client::{ApiClient, ClientConfig, ClientError, SubmitPipeline};
use qnr_normalize::Normalizer;
use qnr_validate::Validator;

use crate::cli::{SubmitArgs, ValidateArgs};
use crate::report::print_report;

pub fn run_validate(args: &ValidateArgs) -> Result<bool> {
    let raw = read_payload(&args.payload)?;
    let record = Normalizer::new()
        .normalize(&raw)
        .context("normalize payload")?;
    trace!(
        name = redact_value(&record.basic_info.name),
        kind = %record.kind,
        "normalized payload"
    );

    let canonical = serde_json::to_value(&record).context("serialize normalized record")?;
    let report = Validator::new().validate(&canonical);
    info!(
        questions = record.questions.len(),
        issues = report.error_count(),
        "validation complete"
    );

    print_report(&report);
    if args.show_normalized {
        println!("{}", serde_json::to_string_pretty(&canonical)?);
    }
    Ok(report.is_valid())
}

pub fn run_submit(args: &SubmitArgs) -> Result<()> {
    let raw = read_payload(&args.payload)?;

    let mut config = ClientConfig::new(args.endpoint.clone());
    config.timeout = Duration::from_secs(args.timeout_secs);
    config.retry.max_retries = args.retries;
    let client = ApiClient::new(config).context("build HTTP client")?;

    match SubmitPipeline::new(client).run(&raw) {
        Ok(receipt) => {
            if receipt.id.is_empty() {
                println!("Submission accepted.");
            } else {
                println!("Submission accepted: id {}", receipt.id);
            }
            Ok(())
        }
        Err(ClientError::Validation { errors }) => {
            eprintln!("Payload failed validation:");
            for error in &errors {
                eprintln!("- {error}");
            }
            bail!("{} validation error(s)", errors.len())
        }
        Err(error) => Err(error).context("submit payload"),
    }
}

fn read_payload(path: &Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}

//! CLI argument definitions for the questionnaire toolkit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "qnr",
    version,
    about = "Questionnaire toolkit - validate and submit questionnaire payloads",
    long_about = "Normalize heterogeneous questionnaire payloads into canonical records,\n\
                  validate them, and submit them to the backend with retry and backoff."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow respondent values (names, answers) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize a payload file and report validation issues.
    Validate(ValidateArgs),

    /// Normalize, validate and submit a payload file to the backend.
    Submit(SubmitArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the JSON payload file.
    #[arg(value_name = "PAYLOAD")]
    pub payload: PathBuf,

    /// Print the normalized record as JSON after the issue report.
    #[arg(long = "show-normalized")]
    pub show_normalized: bool,
}

#[derive(Parser)]
pub struct SubmitArgs {
    /// Path to the JSON payload file.
    #[arg(value_name = "PAYLOAD")]
    pub payload: PathBuf,

    /// Base URL of the questionnaire backend.
    #[arg(
        long = "endpoint",
        value_name = "URL",
        default_value = "http://localhost:5000"
    )]
    pub endpoint: String,

    /// Per-request timeout in seconds.
    #[arg(long = "timeout-secs", value_name = "SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Number of retries after the initial attempt.
    #[arg(long = "retries", value_name = "COUNT", default_value_t = 3)]
    pub retries: u32,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

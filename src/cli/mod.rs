//! CLI support for sieve-lang
//!
//! Provides programmatic access to the `check` subcommand so other tools
//! can embed it without shelling out.

mod check;

pub use check::{execute_check, CheckOptions, CheckResult};

use std::io;
use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Parser error
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    /// Evaluation error
    #[error("Evaluation error: {0}")]
    Eval(#[from] crate::EvalError),

    /// JSON parsing error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    /// Input parsed, but the top level was not an object
    #[error("Input must be a JSON object.")]
    NotAnObject,
}

//! Execute rules against JSON input

use super::CliError;
use crate::value::document_from_json;
use crate::{parser, Evaluator};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The rule to evaluate
    pub rule: String,
    /// JSON input string
    pub input: Option<String>,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Rule evaluated against the input
    Verdict(bool),
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    if options.syntax_only {
        parser::parse(&options.rule)?;
        return Ok(CheckResult::SyntaxValid);
    }

    let rule = Evaluator::new(&options.rule)?;

    let json = options.input.as_ref().ok_or(CliError::NoInput)?;
    let doc = document_from_json(json)?.ok_or(CliError::NotAnObject)?;

    Ok(CheckResult::Verdict(rule.process(&doc)?))
}

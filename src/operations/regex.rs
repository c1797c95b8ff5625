//! Pattern matching for `mt` against patterns held in the document.
//!
//! A precompiled regex value matches directly. A plain string is compiled
//! as a native pattern at comparison time; a source that does not compile
//! is an error, never a silent non-match. Matches are unanchored.

use crate::evaluator::EvalError;
use crate::operations::{text_of, OpResult, Operation};
use crate::value::Value;
use regex::Regex;

pub struct RegexOperation;

impl Operation for RegexOperation {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn mt(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        let text = text_of(left, "a string")?;
        match right {
            None => Err(EvalError::OperandMissing),
            Some(Value::Regex(pattern)) => Ok(pattern.is_match(&text)),
            Some(Value::String(source)) => match Regex::new(source) {
                Ok(pattern) => Ok(pattern.is_match(&text)),
                Err(e) => Err(EvalError::InvalidOperand {
                    found: format!("pattern {:?} ({})", source, e),
                    expected: "a compilable regex",
                }),
            },
            Some(other) => Err(EvalError::invalid_operand(other, "a regex pattern")),
        }
    }
}

//! Boolean comparisons.
//!
//! Booleans support equality and nothing else; ordering or substring
//! operators against a boolean fall through to `UnsupportedOperation`.

use crate::evaluator::EvalError;
use crate::operations::{OpResult, Operation};
use crate::value::Value;

pub struct BoolOperation;

fn bool_of(value: Option<&Value>) -> Result<bool, EvalError> {
    match value {
        None => Err(EvalError::OperandMissing),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(EvalError::invalid_operand(other, "a boolean")),
    }
}

impl Operation for BoolOperation {
    fn name(&self) -> &'static str {
        "boolean"
    }

    fn eq(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        Ok(bool_of(left)? == bool_of(right)?)
    }

    fn ne(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        Ok(!self.eq(left, right)?)
    }
}

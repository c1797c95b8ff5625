use crate::evaluator::EvalError;
use crate::operations::{OpResult, Operation};
use crate::value::Value;
use rust_decimal::{prelude::FromPrimitive, Decimal};
use std::cmp::Ordering;

/// Numeric comparisons across integers and floats.
///
/// Mixed int/float pairs are compared exactly through `Decimal`, falling
/// back to `f64` when a value has no decimal form (NaN, infinities,
/// extreme magnitudes). Comparisons involving NaN order as none, so every
/// operator except `ne` answers false.
pub struct NumberOperation;

fn number_of<'a>(value: Option<&'a Value>) -> Result<&'a Value, EvalError> {
    match value {
        None => Err(EvalError::OperandMissing),
        Some(v @ (Value::Int(_) | Value::Float(_))) => Ok(v),
        Some(v) => Err(EvalError::invalid_operand(v, "a number")),
    }
}

fn compare(l: &Value, r: &Value) -> Option<Ordering> {
    match (l, r) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Int(a), Value::Float(b)) => {
            if let Some(ad) = Decimal::from_i64(*a)
                && let Some(bd) = Decimal::from_f64(*b)
            {
                return Some(ad.cmp(&bd));
            }
            (*a as f64).partial_cmp(b)
        }
        (Value::Float(a), Value::Int(b)) => {
            if let Some(ad) = Decimal::from_f64(*a)
                && let Some(bd) = Decimal::from_i64(*b)
            {
                return Some(ad.cmp(&bd));
            }
            a.partial_cmp(&(*b as f64))
        }
        _ => None,
    }
}

fn ordered(
    left: Option<&Value>,
    right: Option<&Value>,
) -> Result<Option<Ordering>, EvalError> {
    let l = number_of(left)?;
    let r = number_of(right)?;
    Ok(compare(l, r))
}

impl Operation for NumberOperation {
    fn name(&self) -> &'static str {
        "number"
    }

    fn eq(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        Ok(ordered(left, right)? == Some(Ordering::Equal))
    }

    fn ne(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        Ok(ordered(left, right)? != Some(Ordering::Equal))
    }

    fn gt(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        Ok(ordered(left, right)? == Some(Ordering::Greater))
    }

    fn lt(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        Ok(ordered(left, right)? == Some(Ordering::Less))
    }

    fn ge(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        Ok(matches!(
            ordered(left, right)?,
            Some(Ordering::Greater) | Some(Ordering::Equal)
        ))
    }

    fn le(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        Ok(matches!(
            ordered(left, right)?,
            Some(Ordering::Less) | Some(Ordering::Equal)
        ))
    }

    fn is_in(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        let l = number_of(left)?;
        match right {
            None => Err(EvalError::OperandMissing),
            Some(Value::Array(items)) => {
                for item in items {
                    let element = match item {
                        Value::Int(_) | Value::Float(_) => item,
                        other => return Err(EvalError::invalid_operand(other, "a number")),
                    };
                    if compare(l, element) == Some(Ordering::Equal) {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            // A single number behaves as a one-element list.
            Some(single) => {
                let r = number_of(Some(single))?;
                Ok(compare(l, r) == Some(Ordering::Equal))
            }
        }
    }
}

use crate::evaluator::EvalError;
use crate::operations::{text_of, OpResult, Operation};
use crate::value::Value;
use cidr::IpInet;
use regex::Regex;
use std::net::IpAddr;

/// Case-insensitive text comparisons.
///
/// Two quirks carried by the language: `co` and each `in` element first try
/// the right-hand text as a CIDR and the left as an address, so network
/// containment works on string-typed attributes; and `in` compares the raw
/// (case-preserved) text while every other operator lowercases both sides.
pub struct StringOperation;

/// Both operands lowercased, the common footing for most operators.
fn lowered(left: Option<&Value>, right: Option<&Value>) -> Result<(String, String), EvalError> {
    let l = text_of(left, "a string")?.to_lowercase();
    let r = text_of(right, "a string")?.to_lowercase();
    Ok((l, r))
}

/// True when `r` parses as a network and `l` as an address inside it.
fn contained_in_cidr(l: &str, r: &str) -> bool {
    if !r.contains('/') {
        return false;
    }
    let Ok(inet) = r.parse::<IpInet>() else {
        return false;
    };
    let Ok(ip) = l.parse::<IpAddr>() else {
        return false;
    };
    inet.network().contains(&ip.to_canonical())
}

/// Right-hand side of `in`/`mt`: a list of strings, or a single string
/// treated as a one-element list.
fn string_elements(right: Option<&Value>) -> Result<Vec<&str>, EvalError> {
    match right {
        None => Err(EvalError::OperandMissing),
        Some(Value::String(s)) => Ok(vec![s.as_str()]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.as_str()),
                other => Err(EvalError::invalid_operand(other, "a string")),
            })
            .collect(),
        Some(other) => Err(EvalError::invalid_operand(
            other,
            "a string or list of strings",
        )),
    }
}

/// Translate a JS-style `"/pattern/flags"` source and compile it. The `i`
/// flag becomes a `(?i)` prefix; other flag letters have no counterpart
/// here and are dropped.
fn js_pattern(source: &str) -> Result<Regex, EvalError> {
    let invalid = || EvalError::InvalidOperand {
        found: format!("string {:?}", source),
        expected: "a /pattern/flags regex",
    };
    let rest = source.strip_prefix('/').ok_or_else(invalid)?;
    let slash = rest.rfind('/').ok_or_else(invalid)?;
    let (pattern, flags) = rest.split_at(slash);
    let pattern = if flags[1..].contains('i') {
        format!("(?i){}", pattern)
    } else {
        pattern.to_string()
    };
    Regex::new(&pattern).map_err(|e| EvalError::InvalidOperand {
        found: format!("pattern {:?} ({})", pattern, e),
        expected: "a compilable regex",
    })
}

impl Operation for StringOperation {
    fn name(&self) -> &'static str {
        "string"
    }

    fn eq(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        let (l, r) = lowered(left, right)?;
        Ok(l == r)
    }

    fn ne(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        self.eq(left, right).map(|verdict| !verdict)
    }

    fn gt(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        let (l, r) = lowered(left, right)?;
        Ok(l > r)
    }

    fn lt(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        let (l, r) = lowered(left, right)?;
        Ok(l < r)
    }

    fn ge(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        let (l, r) = lowered(left, right)?;
        Ok(l >= r)
    }

    fn le(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        let (l, r) = lowered(left, right)?;
        Ok(l <= r)
    }

    fn co(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        let (l, r) = lowered(left, right)?;
        if contained_in_cidr(&l, &r) {
            return Ok(true);
        }
        Ok(l.contains(&r))
    }

    fn sw(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        let (l, r) = lowered(left, right)?;
        Ok(l.starts_with(&r))
    }

    fn ew(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        let (l, r) = lowered(left, right)?;
        Ok(l.ends_with(&r))
    }

    fn is_in(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        let l = text_of(left, "a string")?;
        for element in string_elements(right)? {
            if contained_in_cidr(&l, element) {
                return Ok(true);
            }
            if l == element {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn mt(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        let l = text_of(left, "a string")?;
        for element in string_elements(right)? {
            if js_pattern(element)?.is_match(&l) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

use std::collections::HashMap;

use thiserror::Error;

use crate::ast::{Expr, IpOp, IpValue, LogicalOp, RegexValue};
use crate::operations::{self, Operation};
use crate::parser::{self, ParseError};
use crate::resolver::resolve;
use crate::value::Value;

/// Errors that can occur while evaluating a rule against a document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// An operator needed a value, but the attribute path resolved to
    /// nothing. Only `pr` tolerates a missing attribute.
    #[error("attribute is missing")]
    OperandMissing,

    /// An operand had a type the operator cannot work with.
    #[error("invalid operand: {found}, expected {expected}")]
    InvalidOperand {
        found: String,
        expected: &'static str,
    },

    /// The operator has no meaning for the operand family it was applied
    /// to, like `gt` on booleans.
    #[error("operation `{operator}` is not supported for {family} operands")]
    UnsupportedOperation {
        operator: &'static str,
        family: &'static str,
    },
}

impl EvalError {
    pub(crate) fn invalid_operand(value: &Value, expected: &'static str) -> Self {
        EvalError::InvalidOperand {
            found: value.type_name().to_string(),
            expected,
        }
    }
}

/// Any failure from parsing or evaluating a rule in one pass.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Evaluates a parsed rule against a document.
///
/// Logical operators short-circuit: the right side of an `and` is not
/// evaluated when the left side is already false, so errors confined to
/// the skipped side never surface.
pub fn evaluate(expr: &Expr, doc: &HashMap<String, Value>) -> Result<bool, EvalError> {
    match expr {
        Expr::Group { negate, inner } => {
            let verdict = evaluate(inner, doc)?;
            Ok(if *negate { !verdict } else { verdict })
        }
        Expr::Logical { left, op, right } => match op {
            LogicalOp::And => Ok(evaluate(left, doc)? && evaluate(right, doc)?),
            LogicalOp::Or => Ok(evaluate(left, doc)? || evaluate(right, doc)?),
        },
        Expr::Present { path } => Ok(resolve(path, doc).is_some()),
        Expr::Compare { path, op, value } => {
            let (operation, right) = operations::right_operand(value, doc)?;
            operations::apply(operation, *op, resolve(path, doc), Some(&right))
        }
        Expr::Match { path, pattern } => {
            let left = resolve(path, doc);
            match pattern {
                RegexValue::Regex(literal) => {
                    let right = Value::Regex(literal.regex().clone());
                    operations::REGEX.mt(left, Some(&right))
                }
                RegexValue::Variable(source) => match resolve(source, doc) {
                    Some(value) => operations::for_pattern(value).mt(left, Some(value)),
                    None => Err(EvalError::OperandMissing),
                },
            }
        }
        Expr::IpCompare { path, op, value } => {
            let left = resolve(path, doc);
            let right = match value {
                IpValue::Address(addr) => Value::Ip(*addr),
                IpValue::Network(net) => Value::Net(net.clone()),
            };
            match op {
                IpOp::Eq => operations::IP.eq(left, Some(&right)),
                IpOp::Ne => operations::IP.ne(left, Some(&right)),
                IpOp::In => operations::IP.is_in(left, Some(&right)),
            }
        }
    }
}

/// A rule parsed once and ready for repeated evaluation.
///
/// Parsing is the expensive half of rule processing; callers that apply
/// the same rule to many documents should build an `Evaluator` up front
/// and call [`process`](Evaluator::process) per document. The evaluator
/// holds only the syntax tree, so it is cheap to clone and safe to share
/// across threads.
///
/// # Examples
///
/// ```
/// use sieve_lang::{Evaluator, Value};
/// use std::collections::HashMap;
///
/// let rule = Evaluator::new("src.ip in 10.0.0.0/8").unwrap();
///
/// let mut src = HashMap::new();
/// src.insert("ip".to_string(), Value::from("10.1.2.3"));
/// let mut doc = HashMap::new();
/// doc.insert("src".to_string(), Value::from(src));
///
/// assert!(rule.process(&doc).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Evaluator {
    ast: Expr,
}

impl Evaluator {
    /// Parses `rule` into an evaluator.
    pub fn new(rule: &str) -> Result<Self, ParseError> {
        Ok(Evaluator {
            ast: parser::parse(rule)?,
        })
    }

    /// Evaluates the rule against one document.
    pub fn process(&self, doc: &HashMap<String, Value>) -> Result<bool, EvalError> {
        evaluate(&self.ast, doc)
    }

    /// The parsed rule.
    pub fn ast(&self) -> &Expr {
        &self.ast
    }
}

/// Parses and evaluates a rule in one call.
///
/// # Arguments
///
/// * `rule` - The rule text
/// * `doc` - The document to evaluate against
///
/// # Examples
///
/// ```
/// use sieve_lang::{evaluate_rule, Value};
/// use std::collections::HashMap;
///
/// let mut doc = HashMap::new();
/// doc.insert("status".to_string(), Value::from("active"));
/// doc.insert("attempts".to_string(), Value::Int(3));
///
/// let verdict = evaluate_rule(r#"status eq "ACTIVE" and attempts lt 5"#, &doc).unwrap();
/// assert!(verdict);
/// ```
pub fn evaluate_rule(rule: &str, doc: &HashMap<String, Value>) -> Result<bool, Error> {
    let ast = parser::parse(rule)?;
    Ok(evaluate(&ast, doc)?)
}

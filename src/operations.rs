//! Operation dispatch: one operator set per operand family.
//!
//! Comparisons are routed by the kind of the right-hand side. Literals fix
//! the family at parse time (a string literal selects the string family, a
//! version literal the version family); a variable right-hand side selects
//! by the runtime type it resolves to. Each family implements exactly the
//! operators that mean something for it, and every unimplemented operator
//! falls through to a default that raises `UnsupportedOperation`.
//!
//! The `pr` presence test never reaches this layer; it is answered by
//! resolution alone.

mod boolean;
mod ip;
mod number;
mod regex;
mod string;
mod version;

pub use self::boolean::BoolOperation;
pub use self::ip::IpOperation;
pub use self::number::NumberOperation;
pub use self::regex::RegexOperation;
pub use self::string::StringOperation;
pub use self::version::VersionOperation;

use crate::ast::literals::Literal;
use crate::ast::operators::CompareOp;
use crate::evaluator::EvalError;
use crate::resolver::resolve;
use crate::value::Value;
use std::collections::HashMap;

pub type OpResult = Result<bool, EvalError>;

/// One operand family's operator set.
///
/// Operands arrive as `Option<&Value>`: `None` is a missing attribute.
/// The default body of every operator raises `UnsupportedOperation` for
/// the family, so an implementation only overrides what it supports.
pub trait Operation {
    /// Family name used in error messages.
    fn name(&self) -> &'static str;

    fn eq(&self, _left: Option<&Value>, _right: Option<&Value>) -> OpResult {
        Err(self.unsupported("eq"))
    }

    fn ne(&self, _left: Option<&Value>, _right: Option<&Value>) -> OpResult {
        Err(self.unsupported("ne"))
    }

    fn gt(&self, _left: Option<&Value>, _right: Option<&Value>) -> OpResult {
        Err(self.unsupported("gt"))
    }

    fn lt(&self, _left: Option<&Value>, _right: Option<&Value>) -> OpResult {
        Err(self.unsupported("lt"))
    }

    fn ge(&self, _left: Option<&Value>, _right: Option<&Value>) -> OpResult {
        Err(self.unsupported("ge"))
    }

    fn le(&self, _left: Option<&Value>, _right: Option<&Value>) -> OpResult {
        Err(self.unsupported("le"))
    }

    fn co(&self, _left: Option<&Value>, _right: Option<&Value>) -> OpResult {
        Err(self.unsupported("co"))
    }

    fn sw(&self, _left: Option<&Value>, _right: Option<&Value>) -> OpResult {
        Err(self.unsupported("sw"))
    }

    fn ew(&self, _left: Option<&Value>, _right: Option<&Value>) -> OpResult {
        Err(self.unsupported("ew"))
    }

    fn is_in(&self, _left: Option<&Value>, _right: Option<&Value>) -> OpResult {
        Err(self.unsupported("in"))
    }

    fn mt(&self, _left: Option<&Value>, _right: Option<&Value>) -> OpResult {
        Err(self.unsupported("mt"))
    }

    fn unsupported(&self, operator: &'static str) -> EvalError {
        EvalError::UnsupportedOperation {
            operator,
            family: self.name(),
        }
    }
}

/// Fallback family for operand pairings with no defined semantics: null
/// literals, objects, and lists that carry no usable element type. Every
/// operator raises `UnsupportedOperation`.
pub struct DefaultOperation;

impl Operation for DefaultOperation {
    fn name(&self) -> &'static str {
        "default"
    }
}

pub static STRING: StringOperation = StringOperation;
pub static NUMBER: NumberOperation = NumberOperation;
pub static VERSION: VersionOperation = VersionOperation;
pub static BOOLEAN: BoolOperation = BoolOperation;
pub static IP: IpOperation = IpOperation;
pub static REGEX: RegexOperation = RegexOperation;
pub static DEFAULT: DefaultOperation = DefaultOperation;

/// Select the family and materialize the right-hand value for a comparison.
///
/// Non-variable literals convert directly and fix the family themselves.
/// A variable resolves through the document and selects by runtime type;
/// resolving to nothing is an error, because the operator required a value.
pub fn right_operand(
    literal: &Literal,
    doc: &HashMap<String, Value>,
) -> Result<(&'static dyn Operation, Value), EvalError> {
    match literal {
        Literal::Variable(path) => match resolve(path, doc) {
            Some(value) => Ok((for_value(value), value.clone())),
            None => Err(EvalError::OperandMissing),
        },
        Literal::Bool(b) => Ok((&BOOLEAN, Value::Bool(*b))),
        Literal::Null => Ok((&DEFAULT, Value::Null)),
        Literal::Int(n) => Ok((&NUMBER, Value::Int(*n))),
        Literal::Double(n) => Ok((&NUMBER, Value::Float(*n))),
        Literal::Version(v) => Ok((&VERSION, Value::String(v.clone()))),
        Literal::String(s) => Ok((&STRING, Value::String(s.clone()))),
        Literal::IntList(ns) => Ok((
            &NUMBER,
            Value::Array(ns.iter().map(|n| Value::Int(*n)).collect()),
        )),
        Literal::DoubleList(ns) => Ok((
            &NUMBER,
            Value::Array(ns.iter().map(|n| Value::Float(*n)).collect()),
        )),
        Literal::StringList(ss) => Ok((
            &STRING,
            Value::Array(ss.iter().map(|s| Value::String(s.clone())).collect()),
        )),
    }
}

/// Family for a right-hand value resolved from the document. Lists select
/// by their first element.
pub fn for_value(value: &Value) -> &'static dyn Operation {
    match value {
        Value::String(_) => &STRING,
        Value::Int(_) | Value::Float(_) => &NUMBER,
        Value::Bool(_) => &BOOLEAN,
        Value::Ip(_) | Value::Net(_) => &IP,
        Value::Regex(_) => &REGEX,
        Value::Array(items) => match items.first() {
            Some(Value::String(_)) => &STRING,
            Some(Value::Int(_)) | Some(Value::Float(_)) => &NUMBER,
            Some(Value::Ip(_)) | Some(Value::Net(_)) => &IP,
            _ => &DEFAULT,
        },
        Value::Null | Value::Object(_) => &DEFAULT,
    }
}

/// Family for a `mt` pattern resolved from the document: single strings and
/// precompiled regexes match natively, lists of strings go through the
/// string family's JS-style translation.
pub fn for_pattern(value: &Value) -> &'static dyn Operation {
    match value {
        Value::String(_) | Value::Regex(_) => &REGEX,
        Value::Array(_) => &STRING,
        _ => &DEFAULT,
    }
}

/// Route an operator to its method on the selected family.
pub fn apply(
    operation: &dyn Operation,
    op: CompareOp,
    left: Option<&Value>,
    right: Option<&Value>,
) -> OpResult {
    match op {
        CompareOp::Eq => operation.eq(left, right),
        CompareOp::Ne => operation.ne(left, right),
        CompareOp::Gt => operation.gt(left, right),
        CompareOp::Lt => operation.lt(left, right),
        CompareOp::Ge => operation.ge(left, right),
        CompareOp::Le => operation.le(left, right),
        CompareOp::Co => operation.co(left, right),
        CompareOp::Sw => operation.sw(left, right),
        CompareOp::Ew => operation.ew(left, right),
        CompareOp::In => operation.is_in(left, right),
    }
}

/// Text of an operand for the families that compare strings. Addresses,
/// networks, and regexes render as their written form.
pub(crate) fn text_of(value: Option<&Value>, expected: &'static str) -> Result<String, EvalError> {
    match value {
        None => Err(EvalError::OperandMissing),
        Some(v) => v
            .as_text()
            .ok_or_else(|| EvalError::invalid_operand(v, expected)),
    }
}

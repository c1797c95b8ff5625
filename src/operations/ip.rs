//! Address comparisons: equality, containment, and membership.
//!
//! The left operand may be a native address or a string holding one;
//! strings are parsed at comparison time so documents converted from JSON
//! keep working. Addresses are canonicalized before comparing, so an
//! IPv4-mapped IPv6 address equals its plain IPv4 form.

use crate::evaluator::EvalError;
use crate::operations::{OpResult, Operation};
use crate::value::Value;
use std::net::IpAddr;

pub struct IpOperation;

fn address_of(value: Option<&Value>) -> Result<IpAddr, EvalError> {
    match value {
        None => Err(EvalError::OperandMissing),
        Some(Value::Ip(addr)) => Ok(addr.to_canonical()),
        Some(Value::String(s)) => match s.parse::<IpAddr>() {
            Ok(addr) => Ok(addr.to_canonical()),
            Err(_) => Err(EvalError::InvalidOperand {
                found: format!("string {:?}", s),
                expected: "an IP address",
            }),
        },
        Some(other) => Err(EvalError::invalid_operand(other, "an IP address")),
    }
}

/// One membership step: an address element must equal the left side, a
/// network element must contain it.
fn matches_element(left: IpAddr, element: &Value) -> Result<bool, EvalError> {
    match element {
        Value::Ip(addr) => Ok(left == addr.to_canonical()),
        Value::Net(net) => Ok(net.contains(&left)),
        other => Err(EvalError::invalid_operand(other, "an address or network")),
    }
}

impl Operation for IpOperation {
    fn name(&self) -> &'static str {
        "ip"
    }

    /// Against an address: equality. Against a network: containment.
    fn eq(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        let addr = address_of(left)?;
        match right {
            None => Err(EvalError::OperandMissing),
            Some(Value::Ip(other)) => Ok(addr == other.to_canonical()),
            Some(Value::Net(net)) => Ok(net.contains(&addr)),
            Some(other) => Err(EvalError::invalid_operand(other, "an address or network")),
        }
    }

    fn ne(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        Ok(!self.eq(left, right)?)
    }

    /// True when any element of the right-hand list matches. A malformed
    /// element is an error even when an earlier element already matched.
    fn is_in(&self, left: Option<&Value>, right: Option<&Value>) -> OpResult {
        let addr = address_of(left)?;
        match right {
            None => Err(EvalError::OperandMissing),
            Some(Value::Array(items)) => {
                let mut hit = false;
                for item in items {
                    hit |= matches_element(addr, item)?;
                }
                Ok(hit)
            }
            Some(single) => matches_element(addr, single),
        }
    }
}

// tests/operator_tests.rs

use sieve_lang::{evaluate_rule, Error, EvalError, Value};
use std::collections::HashMap;

fn doc(pairs: Vec<(&str, Value)>) -> HashMap<String, Value> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn eval(rule: &str, document: &HashMap<String, Value>) -> bool {
    match evaluate_rule(rule, document) {
        Ok(verdict) => verdict,
        Err(e) => panic!("evaluation failed for {:?}: {}", rule, e),
    }
}

fn eval_err(rule: &str, document: &HashMap<String, Value>) -> EvalError {
    match evaluate_rule(rule, document) {
        Err(Error::Eval(e)) => e,
        other => panic!("expected evaluation error for {:?}, got {:?}", rule, other),
    }
}

// ============================================================================
// String operators
// ============================================================================

#[test]
fn test_string_equality_ignores_case() {
    let d = doc(vec![("status", Value::from("Active"))]);
    assert!(eval(r#"status eq "ACTIVE""#, &d));
    assert!(eval(r#"status eq "active""#, &d));
    assert!(!eval(r#"status eq "inactive""#, &d));
    assert!(eval(r#"status ne "inactive""#, &d));
}

#[test]
fn test_string_ordering_is_case_folded() {
    let d = doc(vec![("name", Value::from("Beta"))]);
    assert!(eval(r#"name gt "alpha""#, &d));
    assert!(eval(r#"name lt "gamma""#, &d));
    assert!(eval(r#"name ge "BETA""#, &d));
    assert!(eval(r#"name le "beta""#, &d));
}

#[test]
fn test_string_contains_starts_ends() {
    let d = doc(vec![("path", Value::from("/Var/Log/syslog"))]);
    assert!(eval(r#"path co "var/log""#, &d));
    assert!(eval(r#"path sw "/var""#, &d));
    assert!(eval(r#"path ew "SYSLOG""#, &d));
    assert!(!eval(r#"path co "messages""#, &d));
}

#[test]
fn test_string_contains_network_shortcut() {
    // A network-shaped right side turns co into address containment.
    let d = doc(vec![("addr", Value::from("10.1.2.3"))]);
    assert!(eval(r#"addr co "10.0.0.0/8""#, &d));
    assert!(!eval(r#"addr co "192.168.0.0/16""#, &d));
}

#[test]
fn test_string_in_is_case_sensitive() {
    let d = doc(vec![("role", Value::from("Admin"))]);
    assert!(eval(r#"role in ["Admin", "ops"]"#, &d));
    assert!(!eval(r#"role in ["admin", "ops"]"#, &d));
}

#[test]
fn test_string_in_accepts_network_elements() {
    let d = doc(vec![("addr", Value::from("10.1.2.3"))]);
    assert!(eval(r#"addr in ["192.168.0.0/16", "10.0.0.0/8"]"#, &d));
    assert!(!eval(r#"addr in ["192.168.0.0/16", "172.16.0.0/12"]"#, &d));
}

#[test]
fn test_string_comparison_against_attribute() {
    let d = doc(vec![
        ("x", Value::from("same")),
        ("y", Value::from("SAME")),
        ("z", Value::from("other")),
    ]);
    assert!(eval("x eq y", &d));
    assert!(!eval("x eq z", &d));
}

#[test]
fn test_address_value_has_text_form() {
    // A native address on the left side of a string comparison renders
    // as its written form.
    let d = doc(vec![("addr", Value::Ip("1.2.3.4".parse().unwrap()))]);
    assert!(eval(r#"addr eq "1.2.3.4""#, &d));
    assert!(eval(r#"addr sw "1.2""#, &d));
}

#[test]
fn test_string_operand_type_errors() {
    let d = doc(vec![("n", Value::Int(5))]);
    assert!(matches!(
        eval_err(r#"n eq "five""#, &d),
        EvalError::InvalidOperand { .. }
    ));
}

// ============================================================================
// Number operators
// ============================================================================

#[test]
fn test_integer_comparisons() {
    let d = doc(vec![("age", Value::Int(30))]);
    assert!(eval("age eq 30", &d));
    assert!(eval("age ne 29", &d));
    assert!(eval("age gt 18", &d));
    assert!(eval("age lt 65", &d));
    assert!(eval("age ge 30", &d));
    assert!(eval("age le 30", &d));
    assert!(!eval("age gt 30", &d));
}

#[test]
fn test_float_comparisons() {
    let d = doc(vec![("score", Value::Float(2.5))]);
    assert!(eval("score eq 2.5", &d));
    assert!(eval("score gt 2.4", &d));
    assert!(eval("score le 2.5", &d));
}

#[test]
fn test_mixed_int_float_compare_exactly() {
    let d = doc(vec![("n", Value::Int(3)), ("f", Value::Float(3.0))]);
    assert!(eval("n eq 3.0", &d));
    assert!(eval("f eq 3", &d));
    assert!(eval("n ge 2.5", &d));
    assert!(eval("f lt 4", &d));
}

#[test]
fn test_number_in_list() {
    let d = doc(vec![("b", Value::Int(2)), ("f", Value::Float(2.0))]);
    assert!(eval("b in [1, 2, 3]", &d));
    assert!(!eval("b in [4, 5]", &d));
    // A float left side still matches an integer element by value.
    assert!(eval("f in [1, 2, 3]", &d));
    assert!(eval("b in [2.0, 9.5]", &d));
}

#[test]
fn test_number_operand_type_errors() {
    let d = doc(vec![("s", Value::from("ten"))]);
    assert!(matches!(
        eval_err("s gt 5", &d),
        EvalError::InvalidOperand { .. }
    ));
}

#[test]
fn test_numbers_do_not_support_substring_operators() {
    let d = doc(vec![("n", Value::Int(5))]);
    assert_eq!(
        eval_err("n co 5", &d),
        EvalError::UnsupportedOperation {
            operator: "co",
            family: "number",
        }
    );
    assert_eq!(
        eval_err("n sw 5", &d),
        EvalError::UnsupportedOperation {
            operator: "sw",
            family: "number",
        }
    );
}

// ============================================================================
// Version operators
// ============================================================================

#[test]
fn test_version_numeric_segments() {
    let d = doc(vec![("v", Value::from("1.2.10"))]);
    // Numeric, not lexicographic: 1.2.10 is newer than 1.2.3.
    assert!(eval("v gt 1.2.3", &d));
    assert!(eval("v ge 1.2.10", &d));
    assert!(eval("v lt 1.3.0", &d));
    assert!(eval("v ne 1.2.3", &d));
}

#[test]
fn test_version_missing_segments_are_zero() {
    let d = doc(vec![("v", Value::from("1.2"))]);
    assert!(eval("v eq 1.2.0", &d));
    assert!(eval("v le 1.2.0.0", &d));
}

#[test]
fn test_version_segments_compare_numerically() {
    let d = doc(vec![("v", Value::from("2.0.0"))]);
    assert!(eval("v lt 10.0.0", &d));
}

#[test]
fn test_versions_do_not_support_contains() {
    let d = doc(vec![("v", Value::from("1.2.3"))]);
    assert_eq!(
        eval_err("v co 1.2.3", &d),
        EvalError::UnsupportedOperation {
            operator: "co",
            family: "version",
        }
    );
}

// ============================================================================
// Boolean operators
// ============================================================================

#[test]
fn test_boolean_equality() {
    let d = doc(vec![("active", Value::Bool(true))]);
    assert!(eval("active eq true", &d));
    assert!(eval("active ne false", &d));
    assert!(!eval("active eq false", &d));
}

#[test]
fn test_boolean_rejects_other_left_types() {
    let d = doc(vec![("active", Value::from("true"))]);
    assert!(matches!(
        eval_err("active eq true", &d),
        EvalError::InvalidOperand { .. }
    ));
}

#[test]
fn test_booleans_do_not_support_ordering() {
    let d = doc(vec![("active", Value::Bool(true))]);
    assert_eq!(
        eval_err("active gt true", &d),
        EvalError::UnsupportedOperation {
            operator: "gt",
            family: "boolean",
        }
    );
}

// ============================================================================
// IP operators
// ============================================================================

#[test]
fn test_ip_equality_native_and_string() {
    let native = doc(vec![("a", Value::Ip("1.2.3.4".parse().unwrap()))]);
    let text = doc(vec![("a", Value::from("1.2.3.4"))]);
    assert!(eval("a eq 1.2.3.4", &native));
    assert!(eval("a eq 1.2.3.4", &text));
    assert!(eval("a ne 1.2.3.5", &native));
}

#[test]
fn test_ip_equality_canonicalizes_mapped_addresses() {
    let d = doc(vec![("a", Value::from("::ffff:1.2.3.4"))]);
    assert!(eval("a eq 1.2.3.4", &d));
}

#[test]
fn test_ip_equality_between_attributes() {
    // Right-hand variable resolving to an address selects the IP family,
    // so a native address and its text form compare equal.
    let d = doc(vec![
        ("x", Value::Ip("1.1.1.1".parse().unwrap())),
        ("z", Value::from("1.1.1.1")),
        ("other", Value::Ip("1.1.1.2".parse().unwrap())),
    ]);
    assert!(eval("x eq z", &d));
    assert!(eval("x ne other", &d));
}

#[test]
fn test_ip_network_containment() {
    let d = doc(vec![("a", Value::from("10.9.9.9"))]);
    assert!(eval("a eq 10.0.0.0/8", &d));
    assert!(eval("a in 10.0.0.0/8", &d));
    assert!(!eval("a in 10.9.9.8/31", &doc(vec![("a", Value::from("10.9.9.6"))])));
    assert!(eval("a ne 192.168.0.0/16", &d));
}

#[test]
fn test_ip_in_host_network() {
    let one = doc(vec![("a", Value::from("1.0.0.1"))]);
    let two = doc(vec![("a", Value::from("1.0.0.2"))]);
    assert!(eval("a in 1.0.0.1/32", &one));
    assert!(eval("a IN 1.0.0.1/32", &one));
    assert!(!eval("a in 1.0.0.1/32", &two));
}

#[test]
fn test_ipv6_containment() {
    let d = doc(vec![("a", Value::from("2001:db8::8a2e:1"))]);
    assert!(eval("a in 2001:db8::/32", &d));
    assert!(!eval("a in fe80::/10", &d));
}

#[test]
fn test_ip_membership_in_document_list() {
    let nets = Value::Array(vec![
        Value::Net("192.168.0.0/16".parse().unwrap()),
        Value::Net("10.0.0.0/8".parse().unwrap()),
    ]);
    let d = doc(vec![("a", Value::from("10.1.2.3")), ("blocked", nets)]);
    assert!(eval("a in blocked", &d));
}

#[test]
fn test_ip_membership_in_address_list() {
    let known = Value::Array(vec![
        Value::Ip("1.1.1.1".parse().unwrap()),
        Value::Ip("1.1.1.2".parse().unwrap()),
    ]);
    let d = doc(vec![("a", Value::Ip("1.1.1.1".parse().unwrap())), ("known", known)]);
    assert!(eval("a in known", &d));
    assert!(!eval("a in known", &doc(vec![
        ("a", Value::Ip("1.1.1.3".parse().unwrap())),
        ("known", Value::Array(vec![Value::Ip("1.1.1.1".parse().unwrap())])),
    ])));
}

#[test]
fn test_ip_rejects_unparsable_left() {
    let d = doc(vec![("a", Value::from("not-an-address"))]);
    assert!(matches!(
        eval_err("a eq 1.2.3.4", &d),
        EvalError::InvalidOperand { .. }
    ));
}

#[test]
fn test_ip_rejects_non_address_left() {
    let d = doc(vec![("a", Value::Int(7))]);
    assert!(matches!(
        eval_err("a in 10.0.0.0/8", &d),
        EvalError::InvalidOperand { .. }
    ));
}

// ============================================================================
// Regex matching
// ============================================================================

#[test]
fn test_match_with_literal_pattern() {
    let d = doc(vec![("name", Value::from("administrator"))]);
    assert!(eval("name mt /^admin/", &d));
    assert!(eval("name mt /strat/", &d));
    assert!(!eval("name mt /^strat/", &d));
}

#[test]
fn test_match_literal_case_flag() {
    let d = doc(vec![("name", Value::from("ADMIN"))]);
    assert!(eval("name mt /admin/i", &d));
    assert!(!eval("name mt /admin/", &d));
}

#[test]
fn test_match_is_case_sensitive_by_default() {
    let d = doc(vec![("name", Value::from("Admin"))]);
    assert!(!eval("name mt /^admin/", &d));
}

#[test]
fn test_match_pattern_from_document_string() {
    let d = doc(vec![
        ("name", Value::from("administrator")),
        ("pattern", Value::from("^admin")),
    ]);
    assert!(eval("name mt pattern", &d));
}

#[test]
fn test_match_pattern_list_uses_slash_syntax() {
    // A list of patterns from the document uses the /pattern/flags form,
    // element by element.
    let patterns = Value::Array(vec![
        Value::from("/^root/"),
        Value::from("/^ADMIN/i"),
    ]);
    let d = doc(vec![
        ("name", Value::from("administrator")),
        ("denied", patterns),
    ]);
    assert!(eval("name mt denied", &d));
}

#[test]
fn test_match_rejects_bad_document_patterns() {
    let bare = doc(vec![
        ("name", Value::from("x")),
        ("denied", Value::Array(vec![Value::from("no-slashes")])),
    ]);
    assert!(matches!(
        eval_err("name mt denied", &bare),
        EvalError::InvalidOperand { .. }
    ));

    let broken = doc(vec![
        ("name", Value::from("x")),
        ("pattern", Value::from("un(closed")),
    ]);
    assert!(matches!(
        eval_err("name mt pattern", &broken),
        EvalError::InvalidOperand { .. }
    ));
}

// ============================================================================
// Null and default family
// ============================================================================

#[test]
fn test_null_literal_comparisons_are_unsupported() {
    let d = doc(vec![("a", Value::Null)]);
    assert_eq!(
        eval_err("a eq null", &d),
        EvalError::UnsupportedOperation {
            operator: "eq",
            family: "default",
        }
    );
}

#[test]
fn test_null_value_is_not_a_number() {
    let d = doc(vec![("a", Value::Null)]);
    assert!(matches!(
        eval_err("a eq 1", &d),
        EvalError::InvalidOperand { .. }
    ));
}

// ============================================================================
// Missing operands
// ============================================================================

#[test]
fn test_missing_left_operand() {
    let d = doc(vec![]);
    assert_eq!(eval_err("ghost eq 1", &d), EvalError::OperandMissing);
    assert_eq!(eval_err(r#"ghost eq "x""#, &d), EvalError::OperandMissing);
    assert_eq!(eval_err("ghost in 10.0.0.0/8", &d), EvalError::OperandMissing);
    assert_eq!(eval_err("ghost mt /x/", &d), EvalError::OperandMissing);
}

#[test]
fn test_path_through_scalar_is_missing() {
    let d = doc(vec![("a", Value::Int(1))]);
    assert_eq!(eval_err("a.b eq 1", &d), EvalError::OperandMissing);
}

#[test]
fn test_missing_right_attribute() {
    let d = doc(vec![("x", Value::Int(1))]);
    assert_eq!(eval_err("x eq ghost", &d), EvalError::OperandMissing);
    assert_eq!(eval_err("x mt ghost", &d), EvalError::OperandMissing);
}

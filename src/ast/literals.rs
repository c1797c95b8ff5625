use crate::ast::expressions::AttrPath;
use cidr::IpCidr;
use regex::Regex;
use std::fmt;
use std::net::IpAddr;

/// Right-hand value of a comparison, fixed at parse time.
///
/// Scalars and lists carry their parsed form; `Variable` defers to the
/// document at evaluation time. Lists are homogeneous and non-empty, the
/// parser rejects anything else.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Boolean literal
    Bool(bool),
    /// Null literal
    Null,
    /// Integer literal
    Int(i64),
    /// Floating-point literal
    Double(f64),
    /// Version literal, kept as written (`1.2.3`)
    Version(String),
    /// String literal
    String(String),
    /// List of integers (`[1, 2, 3]`)
    IntList(Vec<i64>),
    /// List of doubles (`[1.5, 2.5]`)
    DoubleList(Vec<f64>),
    /// List of strings (`["a", "b"]`)
    StringList(Vec<String>),
    /// Attribute path resolved against the document at evaluation time
    Variable(AttrPath),
}

/// A slash-delimited regex literal, compiled when lexed.
///
/// Equality ignores the compiled program and compares the written pattern
/// and flag, which keeps re-parsed ASTs structurally equal.
#[derive(Debug, Clone)]
pub struct RegexLiteral {
    pattern: String,
    case_insensitive: bool,
    regex: Regex,
}

impl RegexLiteral {
    /// Compile a pattern as written between the slashes. The `i` flag maps
    /// to a `(?i)` prefix; the pattern syntax is otherwise native.
    pub fn new(pattern: &str, case_insensitive: bool) -> Result<Self, regex::Error> {
        let source = if case_insensitive {
            format!("(?i){}", pattern)
        } else {
            pattern.to_string()
        };
        Ok(RegexLiteral {
            pattern: pattern.to_string(),
            case_insensitive,
            regex: Regex::new(&source)?,
        })
    }

    /// The pattern text as written between the slashes.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Unanchored search over `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl PartialEq for RegexLiteral {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.case_insensitive == other.case_insensitive
    }
}

impl fmt::Display for RegexLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.pattern)?;
        if self.case_insensitive {
            f.write_str("i")?;
        }
        Ok(())
    }
}

/// Pattern side of a `mt` expression: a regex literal, or an attribute path
/// whose resolved value supplies the pattern at evaluation time.
#[derive(Debug, Clone, PartialEq)]
pub enum RegexValue {
    Regex(RegexLiteral),
    Variable(AttrPath),
}

/// Right-hand side of an IP comparison: a single address or a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpValue {
    Address(IpAddr),
    Network(IpCidr),
}

impl fmt::Display for IpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpValue::Address(ip) => write!(f, "{}", ip),
            IpValue::Network(net) => write!(f, "{}", net),
        }
    }
}

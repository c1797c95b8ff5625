use crate::ast::literals::{IpValue, Literal, RegexValue};
use crate::ast::operators::{CompareOp, IpOp, LogicalOp};
use std::fmt;

/// A dot-separated attribute path (`a`, `src.ip`, `a.b.c`).
///
/// Paths are non-empty and every segment is a non-empty name. They identify
/// a location in the nested document; resolution walks one object level per
/// segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttrPath {
    segments: Vec<String>,
}

impl AttrPath {
    /// Build a path from its segments.
    ///
    /// The parser only constructs non-empty paths; this is debug-asserted
    /// rather than validated at runtime.
    pub fn new(segments: Vec<String>) -> Self {
        debug_assert!(!segments.is_empty());
        debug_assert!(segments.iter().all(|s| !s.is_empty()));
        AttrPath { segments }
    }

    /// Convenience constructor for a single-segment path.
    pub fn root(name: impl Into<String>) -> Self {
        AttrPath::new(vec![name.into()])
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for AttrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Abstract Syntax Tree node representing a parsed rule expression.
///
/// Every node evaluates to a boolean verdict. The tree is immutable after
/// parsing and structural equality holds between ASTs parsed from identical
/// rule text.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Parenthesized subexpression, optionally negated
    ///
    /// `not` only ever applies to a group; the negation flips the verdict
    /// of the inner expression and nothing else.
    ///
    /// # Examples
    /// ```text
    /// (a pr)
    /// not (a eq 1 and b eq 2)
    /// ```
    Group { negate: bool, inner: Box<Expr> },

    /// Presence test
    ///
    /// True when the attribute path resolves to any value, including an
    /// explicit null.
    ///
    /// # Example
    /// ```text
    /// user.email pr
    /// ```
    Present { path: AttrPath },

    /// Comparison between an attribute and a right-hand value
    ///
    /// # Examples
    /// ```text
    /// age ge 21
    /// name sw "ad"
    /// b in [1, 2, 3]
    /// x eq y
    /// ```
    Compare {
        path: AttrPath,
        op: CompareOp,
        value: Literal,
    },

    /// Regex match against the attribute text
    ///
    /// # Examples
    /// ```text
    /// name mt /^ad.*/
    /// name mt patterns
    /// ```
    Match { path: AttrPath, pattern: RegexValue },

    /// Comparison against an IP address or CIDR literal
    ///
    /// # Examples
    /// ```text
    /// src.ip eq 1.1.1.1
    /// src.ip in 10.0.0.0/8
    /// ```
    IpCompare {
        path: AttrPath,
        op: IpOp,
        value: IpValue,
    },

    /// Logical connective between two subexpressions
    ///
    /// Evaluation short-circuits: the right side is never touched when the
    /// left side already decides the verdict.
    Logical {
        left: Box<Expr>,
        op: LogicalOp,
        right: Box<Expr>,
    },
}

use std::fmt;

/// Comparison operators between an attribute and a right-hand value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// Equal (`eq`)
    Eq,
    /// Not equal (`ne`)
    Ne,
    /// Greater than (`gt`)
    Gt,
    /// Less than (`lt`)
    Lt,
    /// Greater than or equal (`ge`)
    Ge,
    /// Less than or equal (`le`)
    Le,
    /// Contains (`co`)
    Co,
    /// Starts with (`sw`)
    Sw,
    /// Ends with (`ew`)
    Ew,
    /// Membership in a list (`in`)
    In,
}

impl CompareOp {
    /// The lowercase mnemonic as written in rules.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            CompareOp::Eq => "eq",
            CompareOp::Ne => "ne",
            CompareOp::Gt => "gt",
            CompareOp::Lt => "lt",
            CompareOp::Ge => "ge",
            CompareOp::Le => "le",
            CompareOp::Co => "co",
            CompareOp::Sw => "sw",
            CompareOp::Ew => "ew",
            CompareOp::In => "in",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Operators valid against IP address and CIDR literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpOp {
    /// Address equality or network containment (`eq`)
    Eq,
    /// Negation of `eq` (`ne`)
    Ne,
    /// Containment in a network or membership in a list (`in`)
    In,
}

impl IpOp {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            IpOp::Eq => "eq",
            IpOp::Ne => "ne",
            IpOp::In => "in",
        }
    }
}

impl fmt::Display for IpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Logical connectives between subexpressions.
///
/// Both connectives share a single precedence level and associate to the
/// left: `a and b or c` parses as `(a and b) or c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    /// Logical AND (`and`)
    And,
    /// Logical OR (`or`)
    Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => f.write_str("and"),
            LogicalOp::Or => f.write_str("or"),
        }
    }
}

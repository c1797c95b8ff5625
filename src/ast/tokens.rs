use crate::ast::literals::RegexLiteral;
use crate::ast::operators::{CompareOp, LogicalOp};
use cidr::IpCidr;
use std::net::IpAddr;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Integer literal, optionally signed, optionally written with an
    /// exponent (`1e3` is the integer 1000)
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -10
    /// 2e3
    /// ```
    Int(i64),

    /// Floating-point literal
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// -0.5
    /// 1.2e-4
    /// ```
    Double(f64),

    /// Version literal: three or more dot-separated numeric segments that
    /// do not form a valid IPv4 address
    ///
    /// # Examples
    /// ```text
    /// 1.2.3
    /// 10.4.1.9999
    /// ```
    Version(String),

    /// String literal enclosed in double quotes
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// "path\\to\\file"
    /// ```
    String(String),

    /// Regex literal delimited by slashes, compiled when lexed
    ///
    /// A trailing `i` flag makes the pattern case-insensitive.
    ///
    /// # Examples
    /// ```text
    /// /ab+c/
    /// /^v[0-9]+$/i
    /// ```
    Regex(RegexLiteral),

    /// IPv4 or IPv6 address literal
    ///
    /// # Examples
    /// ```text
    /// 192.168.0.1
    /// 2001:db8::1
    /// ```
    Ip(IpAddr),

    /// CIDR network literal; host bits are accepted and masked off
    ///
    /// # Examples
    /// ```text
    /// 10.0.0.0/8
    /// 2001:db8::/32
    /// ```
    Cidr(IpCidr),

    /// Boolean literal (`true` / `false`)
    Bool(bool),

    /// Null literal
    Null,

    // Identifiers and keywords
    /// Attribute name segment
    ///
    /// Starts with a letter or underscore, continues with letters, digits,
    /// underscores, or hyphens. Keywords are reserved and never lex as
    /// attribute names.
    AttrName(String),

    /// Presence operator (`pr`)
    Pr,

    /// Negation keyword (`not` / `NOT`), valid only before a group
    Not,

    /// Comparison operator mnemonic (`eq`, `ne`, `gt`, `lt`, `ge`, `le`,
    /// `co`, `sw`, `ew`, `in`), lowercase or uppercase
    Compare(CompareOp),

    /// Regex match operator (`mt` / `MT`)
    Mt,

    /// Logical connective (`and` / `or`)
    Logical(LogicalOp),

    // Punctuation
    /// Opening parenthesis
    LParen,

    /// Closing parenthesis
    RParen,

    /// Opening bracket for list literals
    LBracket,

    /// Closing bracket for list literals
    RBracket,

    /// Comma between list elements
    Comma,

    /// Dot between attribute path segments
    Dot,

    /// End of input
    Eof,
}

impl Token {
    /// Short description used in parse error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Int(n) => format!("integer `{}`", n),
            Token::Double(n) => format!("number `{}`", n),
            Token::Version(v) => format!("version `{}`", v),
            Token::String(s) => format!("string \"{}\"", s),
            Token::Regex(r) => format!("regex `/{}/`", r.pattern()),
            Token::Ip(ip) => format!("IP address `{}`", ip),
            Token::Cidr(net) => format!("CIDR `{}`", net),
            Token::Bool(b) => format!("`{}`", b),
            Token::Null => "`null`".to_string(),
            Token::AttrName(name) => format!("attribute `{}`", name),
            Token::Pr => "`pr`".to_string(),
            Token::Not => "`not`".to_string(),
            Token::Compare(op) => format!("`{}`", op),
            Token::Mt => "`mt`".to_string(),
            Token::Logical(op) => format!("`{}`", op),
            Token::LParen => "`(`".to_string(),
            Token::RParen => "`)`".to_string(),
            Token::LBracket => "`[`".to_string(),
            Token::RBracket => "`]`".to_string(),
            Token::Comma => "`,`".to_string(),
            Token::Dot => "`.`".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

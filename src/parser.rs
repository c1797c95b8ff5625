use crate::ast::literals::{IpValue, Literal, RegexValue};
use crate::ast::operators::{CompareOp, IpOp};
use crate::ast::{AttrPath, Expr, Token};
use crate::lexer::Lexer;
use std::mem;
use thiserror::Error;

/// Lexical or syntactic failure, carrying the character offset of the
/// offending input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected character `{ch}` at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("invalid escape `\\{ch}` at position {pos}")]
    InvalidEscape { ch: char, pos: usize },

    #[error("unterminated string starting at position {pos}")]
    UnterminatedString { pos: usize },

    #[error("unterminated regex starting at position {pos}")]
    UnterminatedRegex { pos: usize },

    #[error("unsupported regex flag `{flag}` at position {pos}")]
    UnsupportedRegexFlag { flag: char, pos: usize },

    #[error("invalid regex at position {pos}: {message}")]
    InvalidRegex { pos: usize, message: String },

    #[error("invalid number `{text}` at position {pos}")]
    InvalidNumber { text: String, pos: usize },

    #[error("invalid IP literal `{text}` at position {pos}")]
    InvalidIp { text: String, pos: usize },

    #[error("expected {expected}, found {found} at position {pos}")]
    UnexpectedToken {
        expected: String,
        found: String,
        pos: usize,
    },

    #[error("operator `{op}` cannot take an IP literal at position {pos}; use eq, ne, or in")]
    InvalidIpOperator { op: CompareOp, pos: usize },

    #[error("list literal at position {pos} is empty")]
    EmptyList { pos: usize },

    #[error("list element at position {pos} does not match the list type")]
    MixedList { pos: usize },

    #[error("unexpected {found} after the rule at position {pos}")]
    TrailingInput { found: String, pos: usize },
}

/// Parses rule text into a syntax tree.
///
/// # Examples
///
/// ```
/// use sieve_lang::parser::parse;
///
/// let expr = parse(r#"(region eq "eu") or tier in [1, 2]"#).unwrap();
/// ```
pub fn parse(rule: &str) -> Result<Expr, ParseError> {
    Parser::new(Lexer::new(rule)).parse()
}

/// Recursive-descent parser for rule text.
///
/// Logical connectives sit on a single precedence level and associate to the
/// left; everything below them is a presence test, a comparison, a regex
/// match, an IP comparison, or a parenthesized group.
pub struct Parser {
    lexer: Lexer,
    current: Token,
    current_pos: usize,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Parser {
            lexer,
            current: Token::Eof,
            current_pos: 0,
        }
    }

    /// Parse one complete rule. Anything left over after the rule is a
    /// `TrailingInput` error.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        self.advance()?; // prime the first token
        let expr = self.parse_query()?;
        if self.current != Token::Eof {
            return Err(ParseError::TrailingInput {
                found: self.current.describe(),
                pos: self.current_pos,
            });
        }
        Ok(expr)
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        let (token, pos) = self.lexer.next_token()?;
        self.current = token;
        self.current_pos = pos;
        Ok(())
    }

    /// Take ownership of the current token and advance past it.
    fn take(&mut self) -> Result<Token, ParseError> {
        let token = mem::replace(&mut self.current, Token::Eof);
        self.advance()?;
        Ok(token)
    }

    fn expect(&mut self, expected: &Token, what: &str) -> Result<(), ParseError> {
        if mem::discriminant(&self.current) != mem::discriminant(expected) {
            return Err(ParseError::UnexpectedToken {
                expected: what.to_string(),
                found: self.current.describe(),
                pos: self.current_pos,
            });
        }
        self.advance()
    }

    /// query := term (LOGICAL_OP term)*
    fn parse_query(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;
        while let Token::Logical(op) = &self.current {
            let op = *op;
            self.advance()?;
            let right = self.parse_term()?;
            left = Expr::Logical {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// term := NOT? '(' query ')' | attrPath predicate
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        match &self.current {
            Token::Not => {
                self.advance()?;
                self.expect(&Token::LParen, "`(` after `not`")?;
                let inner = self.parse_query()?;
                self.expect(&Token::RParen, "`)`")?;
                Ok(Expr::Group {
                    negate: true,
                    inner: Box::new(inner),
                })
            }
            Token::LParen => {
                self.advance()?;
                let inner = self.parse_query()?;
                self.expect(&Token::RParen, "`)`")?;
                Ok(Expr::Group {
                    negate: false,
                    inner: Box::new(inner),
                })
            }
            Token::AttrName(_) => self.parse_predicate(),
            _ => Err(ParseError::UnexpectedToken {
                expected: "an attribute, `not`, or `(`".to_string(),
                found: self.current.describe(),
                pos: self.current_pos,
            }),
        }
    }

    /// predicate := 'pr' | compareOp value | 'mt' regexValue
    fn parse_predicate(&mut self) -> Result<Expr, ParseError> {
        let path = self.parse_attr_path()?;
        let pos = self.current_pos;
        match self.take()? {
            Token::Pr => Ok(Expr::Present { path }),
            Token::Mt => {
                let pattern = self.parse_regex_value()?;
                Ok(Expr::Match { path, pattern })
            }
            Token::Compare(op) => self.parse_comparison(path, op),
            other => Err(ParseError::UnexpectedToken {
                expected: "an operator".to_string(),
                found: other.describe(),
                pos,
            }),
        }
    }

    fn parse_attr_path(&mut self) -> Result<AttrPath, ParseError> {
        let mut segments = Vec::new();
        loop {
            let pos = self.current_pos;
            match self.take()? {
                Token::AttrName(name) => segments.push(name),
                other => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "an attribute name".to_string(),
                        found: other.describe(),
                        pos,
                    });
                }
            }
            if self.current == Token::Dot {
                self.advance()?;
            } else {
                break;
            }
        }
        Ok(AttrPath::new(segments))
    }

    fn parse_comparison(&mut self, path: AttrPath, op: CompareOp) -> Result<Expr, ParseError> {
        // IP and CIDR literals pair with eq/ne/in only and route to the
        // dedicated IP comparison node.
        if matches!(self.current, Token::Ip(_) | Token::Cidr(_)) {
            let ip_op = match op {
                CompareOp::Eq => IpOp::Eq,
                CompareOp::Ne => IpOp::Ne,
                CompareOp::In => IpOp::In,
                other => {
                    return Err(ParseError::InvalidIpOperator {
                        op: other,
                        pos: self.current_pos,
                    });
                }
            };
            let pos = self.current_pos;
            let value = match self.take()? {
                Token::Ip(ip) => IpValue::Address(ip),
                Token::Cidr(net) => IpValue::Network(net),
                other => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "an IP literal".to_string(),
                        found: other.describe(),
                        pos,
                    });
                }
            };
            return Ok(Expr::IpCompare { path, op: ip_op, value });
        }

        let value = self.parse_value()?;
        Ok(Expr::Compare { path, op, value })
    }

    /// value := scalar | list | attrPath
    fn parse_value(&mut self) -> Result<Literal, ParseError> {
        match &self.current {
            Token::AttrName(_) => Ok(Literal::Variable(self.parse_attr_path()?)),
            Token::LBracket => {
                let pos = self.current_pos;
                self.advance()?;
                self.parse_list(pos)
            }
            _ => {
                let pos = self.current_pos;
                match self.take()? {
                    Token::Bool(b) => Ok(Literal::Bool(b)),
                    Token::Null => Ok(Literal::Null),
                    Token::Int(n) => Ok(Literal::Int(n)),
                    Token::Double(n) => Ok(Literal::Double(n)),
                    Token::Version(v) => Ok(Literal::Version(v)),
                    Token::String(s) => Ok(Literal::String(s)),
                    other => Err(ParseError::UnexpectedToken {
                        expected: "a value".to_string(),
                        found: other.describe(),
                        pos,
                    }),
                }
            }
        }
    }

    /// Lists are homogeneous and non-empty; the first element fixes the
    /// element type.
    fn parse_list(&mut self, open_pos: usize) -> Result<Literal, ParseError> {
        if self.current == Token::RBracket {
            return Err(ParseError::EmptyList { pos: open_pos });
        }
        let pos = self.current_pos;
        match self.take()? {
            Token::Int(first) => {
                let items = self.finish_list(first, |tok| match tok {
                    Token::Int(n) => Some(n),
                    _ => None,
                })?;
                Ok(Literal::IntList(items))
            }
            Token::Double(first) => {
                let items = self.finish_list(first, |tok| match tok {
                    Token::Double(n) => Some(n),
                    _ => None,
                })?;
                Ok(Literal::DoubleList(items))
            }
            Token::String(first) => {
                let items = self.finish_list(first, |tok| match tok {
                    Token::String(s) => Some(s),
                    _ => None,
                })?;
                Ok(Literal::StringList(items))
            }
            other => Err(ParseError::UnexpectedToken {
                expected: "an int, double, or string list element".to_string(),
                found: other.describe(),
                pos,
            }),
        }
    }

    fn finish_list<T>(
        &mut self,
        first: T,
        extract: impl Fn(Token) -> Option<T>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = vec![first];
        loop {
            match &self.current {
                Token::Comma => {
                    self.advance()?;
                    let pos = self.current_pos;
                    match extract(self.take()?) {
                        Some(item) => items.push(item),
                        None => return Err(ParseError::MixedList { pos }),
                    }
                }
                Token::RBracket => {
                    self.advance()?;
                    return Ok(items);
                }
                _ => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "`,` or `]`".to_string(),
                        found: self.current.describe(),
                        pos: self.current_pos,
                    });
                }
            }
        }
    }

    /// regexValue := REGEX | attrPath
    fn parse_regex_value(&mut self) -> Result<RegexValue, ParseError> {
        match &self.current {
            Token::AttrName(_) => Ok(RegexValue::Variable(self.parse_attr_path()?)),
            _ => {
                let pos = self.current_pos;
                match self.take()? {
                    Token::Regex(lit) => Ok(RegexValue::Regex(lit)),
                    other => Err(ParseError::UnexpectedToken {
                        expected: "a regex literal or attribute".to_string(),
                        found: other.describe(),
                        pos,
                    }),
                }
            }
        }
    }
}

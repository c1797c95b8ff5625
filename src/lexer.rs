use crate::ast::literals::RegexLiteral;
use crate::ast::operators::{CompareOp, LogicalOp};
use crate::ast::Token;
use crate::parser::ParseError;
use cidr::IpInet;
use std::net::IpAddr;

/// Shape of a numeric-looking lexeme, tracked while scanning.
struct NumberShape {
    dots: usize,
    negative: bool,
    exponent: bool,
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn text_from(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    /// Next token together with the position (character offset) where it
    /// starts. Returns `Token::Eof` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<(Token, usize), ParseError> {
        self.skip_whitespace();
        let start = self.position;

        let Some(ch) = self.current_char() else {
            return Ok((Token::Eof, start));
        };

        let token = match ch {
            '(' => {
                self.advance();
                Token::LParen
            }
            ')' => {
                self.advance();
                Token::RParen
            }
            '[' => {
                self.advance();
                Token::LBracket
            }
            ']' => {
                self.advance();
                Token::RBracket
            }
            ',' => {
                self.advance();
                Token::Comma
            }
            '.' => {
                self.advance();
                Token::Dot
            }
            '"' => self.read_string(start)?,
            '/' => self.read_regex(start)?,
            '-' if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_numberish(start)?
            }
            ':' => self.read_ipv6(start)?,
            ch if ch.is_ascii_digit() => self.read_numberish(start)?,
            ch if ch.is_alphabetic() || ch == '_' => self.read_word(start)?,
            ch => return Err(ParseError::UnexpectedChar { ch, pos: start }),
        };

        Ok((token, start))
    }

    fn read_word(&mut self, start: usize) -> Result<Token, ParseError> {
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' || ch == '-' {
                self.advance();
            } else {
                break;
            }
        }

        // A hex-shaped word running into a colon is the head of an IPv6
        // literal (`fe80::1`), not an attribute name.
        if self.current_char() == Some(':') {
            let head = self.text_from(start);
            if head.chars().all(|c| c.is_ascii_hexdigit()) {
                return self.read_ipv6(start);
            }
            return Err(ParseError::UnexpectedChar {
                ch: ':',
                pos: self.position,
            });
        }

        let word = self.text_from(start);
        Ok(match word.as_str() {
            "pr" => Token::Pr,
            "not" | "NOT" => Token::Not,
            "and" => Token::Logical(LogicalOp::And),
            "or" => Token::Logical(LogicalOp::Or),
            "true" => Token::Bool(true),
            "false" => Token::Bool(false),
            "null" => Token::Null,
            "eq" | "EQ" => Token::Compare(CompareOp::Eq),
            "ne" | "NE" => Token::Compare(CompareOp::Ne),
            "gt" | "GT" => Token::Compare(CompareOp::Gt),
            "lt" | "LT" => Token::Compare(CompareOp::Lt),
            "ge" | "GE" => Token::Compare(CompareOp::Ge),
            "le" | "LE" => Token::Compare(CompareOp::Le),
            "co" | "CO" => Token::Compare(CompareOp::Co),
            "sw" | "SW" => Token::Compare(CompareOp::Sw),
            "ew" | "EW" => Token::Compare(CompareOp::Ew),
            "in" | "IN" => Token::Compare(CompareOp::In),
            "mt" | "MT" => Token::Mt,
            _ => Token::AttrName(word),
        })
    }

    fn read_string(&mut self, start: usize) -> Result<Token, ParseError> {
        let mut result = String::new();
        self.advance(); // consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(Token::String(result));
                }
                '\\' => {
                    self.advance();
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('"') => result.push('"'),
                        Some('\\') => result.push('\\'),
                        Some(ch) => {
                            return Err(ParseError::InvalidEscape {
                                ch,
                                pos: self.position - 1,
                            });
                        }
                        None => break,
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(ParseError::UnterminatedString { pos: start })
    }

    fn read_regex(&mut self, start: usize) -> Result<Token, ParseError> {
        let mut pattern = String::new();
        self.advance(); // consume opening slash

        loop {
            match self.current_char() {
                Some('/') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    // `\/` becomes a literal slash; every other escape is
                    // left for the regex engine to interpret.
                    if self.peek_char(1) == Some('/') {
                        pattern.push('/');
                        self.advance();
                        self.advance();
                    } else {
                        pattern.push('\\');
                        self.advance();
                        if let Some(ch) = self.current_char() {
                            pattern.push(ch);
                            self.advance();
                        }
                    }
                }
                Some(ch) => {
                    pattern.push(ch);
                    self.advance();
                }
                None => return Err(ParseError::UnterminatedRegex { pos: start }),
            }
        }

        let mut case_insensitive = false;
        while let Some(ch) = self.current_char() {
            if !ch.is_ascii_alphabetic() {
                break;
            }
            if ch != 'i' {
                return Err(ParseError::UnsupportedRegexFlag {
                    flag: ch,
                    pos: self.position,
                });
            }
            case_insensitive = true;
            self.advance();
        }

        let literal = RegexLiteral::new(&pattern, case_insensitive).map_err(|e| {
            ParseError::InvalidRegex {
                pos: start,
                message: e.to_string(),
            }
        })?;
        Ok(Token::Regex(literal))
    }

    /// Lex a lexeme that starts with a digit (or a sign before one) and
    /// classify it by shape: CIDR, IP address, version, double, or int.
    fn read_numberish(&mut self, start: usize) -> Result<Token, ParseError> {
        let mut shape = NumberShape {
            dots: 0,
            negative: false,
            exponent: false,
        };

        if self.current_char() == Some('-') {
            shape.negative = true;
            self.advance();
        }
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        loop {
            match self.current_char() {
                Some('.') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                    shape.dots += 1;
                    self.advance();
                    while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
                        self.advance();
                    }
                }
                // Colons hand the whole lexeme over to the IPv6 scanner.
                Some(':') => return self.read_ipv6(start),
                Some('e') | Some('E') if shape.dots <= 1 && !shape.exponent => {
                    let mut offset = 1;
                    if matches!(self.peek_char(1), Some('+') | Some('-')) {
                        offset = 2;
                    }
                    if !self.peek_char(offset).is_some_and(|c| c.is_ascii_digit()) {
                        break;
                    }
                    shape.exponent = true;
                    for _ in 0..=offset {
                        self.advance();
                    }
                    while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
                        self.advance();
                    }
                }
                Some('/') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                    return self.read_cidr(start);
                }
                _ => break,
            }
        }

        let text = self.text_from(start);
        self.classify_number(text, shape, start)
    }

    fn classify_number(
        &self,
        text: String,
        shape: NumberShape,
        start: usize,
    ) -> Result<Token, ParseError> {
        if shape.dots >= 2 {
            if shape.negative || shape.exponent {
                return Err(ParseError::InvalidNumber { text, pos: start });
            }
            // A valid dotted quad is an address; any other multi-dotted
            // numeric lexeme is a version.
            if text.matches('.').count() == 3
                && let Ok(ip) = text.parse::<IpAddr>()
            {
                return Ok(Token::Ip(ip));
            }
            return Ok(Token::Version(text));
        }

        if shape.dots == 1 || shape.exponent {
            let value: f64 = text
                .parse()
                .map_err(|_| ParseError::InvalidNumber {
                    text: text.clone(),
                    pos: start,
                })?;
            // Exponent forms with an integral value stay integers.
            if shape.dots == 0
                && value.fract() == 0.0
                && value >= i64::MIN as f64
                && value <= i64::MAX as f64
            {
                return Ok(Token::Int(value as i64));
            }
            return Ok(Token::Double(value));
        }

        let value: i64 = text.parse().map_err(|_| ParseError::InvalidNumber {
            text: text.clone(),
            pos: start,
        })?;
        Ok(Token::Int(value))
    }

    /// Continue an IPv6-shaped lexeme from wherever scanning stopped; the
    /// token text is everything from `start`.
    fn read_ipv6(&mut self, start: usize) -> Result<Token, ParseError> {
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_hexdigit() || ch == ':' || ch == '.' {
                self.advance();
            } else {
                break;
            }
        }

        if self.current_char() == Some('/') && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
        {
            return self.read_cidr(start);
        }

        let text = self.text_from(start);
        match text.parse::<IpAddr>() {
            Ok(ip) => Ok(Token::Ip(ip)),
            Err(_) => Err(ParseError::InvalidIp { text, pos: start }),
        }
    }

    /// Finish a CIDR lexeme: the scanner sits on `/` with the address part
    /// already consumed. Host bits are accepted and masked off.
    fn read_cidr(&mut self, start: usize) -> Result<Token, ParseError> {
        self.advance(); // consume the slash
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        let text = self.text_from(start);
        match text.parse::<IpInet>() {
            Ok(inet) => Ok(Token::Cidr(inet.network())),
            Err(_) => Err(ParseError::InvalidIp { text, pos: start }),
        }
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("and or true false null not pr");
    assert_eq!(lexer.next_token().unwrap().0, Token::Logical(LogicalOp::And));
    assert_eq!(lexer.next_token().unwrap().0, Token::Logical(LogicalOp::Or));
    assert_eq!(lexer.next_token().unwrap().0, Token::Bool(true));
    assert_eq!(lexer.next_token().unwrap().0, Token::Bool(false));
    assert_eq!(lexer.next_token().unwrap().0, Token::Null);
    assert_eq!(lexer.next_token().unwrap().0, Token::Not);
    assert_eq!(lexer.next_token().unwrap().0, Token::Pr);
}

#[test]
fn test_operator_case() {
    let mut lexer = Lexer::new("in IN eq EQ mt MT");
    assert_eq!(lexer.next_token().unwrap().0, Token::Compare(CompareOp::In));
    assert_eq!(lexer.next_token().unwrap().0, Token::Compare(CompareOp::In));
    assert_eq!(lexer.next_token().unwrap().0, Token::Compare(CompareOp::Eq));
    assert_eq!(lexer.next_token().unwrap().0, Token::Compare(CompareOp::Eq));
    assert_eq!(lexer.next_token().unwrap().0, Token::Mt);
    assert_eq!(lexer.next_token().unwrap().0, Token::Mt);
}

#[test]
fn test_number_shapes() {
    let mut lexer = Lexer::new("42 -10 3.14 1.2.3 1.1.1.1 10.0.0.0/8 2e3");
    assert_eq!(lexer.next_token().unwrap().0, Token::Int(42));
    assert_eq!(lexer.next_token().unwrap().0, Token::Int(-10));
    assert_eq!(lexer.next_token().unwrap().0, Token::Double(3.14));
    assert_eq!(
        lexer.next_token().unwrap().0,
        Token::Version("1.2.3".to_string())
    );
    assert_eq!(
        lexer.next_token().unwrap().0,
        Token::Ip("1.1.1.1".parse().unwrap())
    );
    assert_eq!(
        lexer.next_token().unwrap().0,
        Token::Cidr("10.0.0.0/8".parse().unwrap())
    );
    assert_eq!(lexer.next_token().unwrap().0, Token::Int(2000));
}

#[test]
fn test_ipv6() {
    let mut lexer = Lexer::new("2001:db8::1 ::1 fe80::8a2e:1");
    assert_eq!(
        lexer.next_token().unwrap().0,
        Token::Ip("2001:db8::1".parse().unwrap())
    );
    assert_eq!(
        lexer.next_token().unwrap().0,
        Token::Ip("::1".parse().unwrap())
    );
    assert_eq!(
        lexer.next_token().unwrap().0,
        Token::Ip("fe80::8a2e:1".parse().unwrap())
    );
}

#[test]
fn test_attr_path_tokens() {
    let mut lexer = Lexer::new("src.ip eq 1.1.1.1");
    assert_eq!(
        lexer.next_token().unwrap().0,
        Token::AttrName("src".to_string())
    );
    assert_eq!(lexer.next_token().unwrap().0, Token::Dot);
    assert_eq!(
        lexer.next_token().unwrap().0,
        Token::AttrName("ip".to_string())
    );
    assert_eq!(lexer.next_token().unwrap().0, Token::Compare(CompareOp::Eq));
    assert_eq!(
        lexer.next_token().unwrap().0,
        Token::Ip("1.1.1.1".parse().unwrap())
    );
    assert_eq!(lexer.next_token().unwrap().0, Token::Eof);
}

#[test]
fn test_regex_literal() {
    let mut lexer = Lexer::new(r"name mt /ab+c/i");
    assert_eq!(
        lexer.next_token().unwrap().0,
        Token::AttrName("name".to_string())
    );
    assert_eq!(lexer.next_token().unwrap().0, Token::Mt);
    match lexer.next_token().unwrap().0 {
        Token::Regex(lit) => {
            assert_eq!(lit.pattern(), "ab+c");
            assert!(lit.is_case_insensitive());
            assert!(lit.is_match("xABBC"));
        }
        other => panic!("expected regex token, got {:?}", other),
    }
}

#[test]
fn test_unexpected_character() {
    let mut lexer = Lexer::new("a eq %");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    assert_eq!(
        lexer.next_token(),
        Err(ParseError::UnexpectedChar { ch: '%', pos: 5 })
    );
}

// tests/lexer_tests.rs

use sieve_lang::ast::{CompareOp, LogicalOp, Token};
use sieve_lang::lexer::Lexer;
use sieve_lang::parser::ParseError;

fn tokens(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut out = Vec::new();
    loop {
        let (token, _) = lexer.next_token().unwrap();
        if token == Token::Eof {
            return out;
        }
        out.push(token);
    }
}

fn first_token(input: &str) -> Token {
    Lexer::new(input).next_token().unwrap().0
}

fn lex_error(input: &str) -> ParseError {
    let mut lexer = Lexer::new(input);
    loop {
        match lexer.next_token() {
            Ok((Token::Eof, _)) => panic!("no error for input: {}", input),
            Ok(_) => continue,
            Err(e) => return e,
        }
    }
}

// ============================================================================
// Punctuation
// ============================================================================

#[test]
fn test_punctuation() {
    let test_cases = vec![
        ("(", Token::LParen),
        (")", Token::RParen),
        ("[", Token::LBracket),
        ("]", Token::RBracket),
        (",", Token::Comma),
        (".", Token::Dot),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let (token, _) = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap().0, Token::Eof);
    }
}

#[test]
fn test_empty_input() {
    assert_eq!(first_token(""), Token::Eof);
    assert_eq!(first_token("   \t\n  "), Token::Eof);
}

// ============================================================================
// Keywords and operator mnemonics
// ============================================================================

#[test]
fn test_comparison_operators_both_cases() {
    let test_cases = vec![
        ("eq", "EQ", CompareOp::Eq),
        ("ne", "NE", CompareOp::Ne),
        ("gt", "GT", CompareOp::Gt),
        ("lt", "LT", CompareOp::Lt),
        ("ge", "GE", CompareOp::Ge),
        ("le", "LE", CompareOp::Le),
        ("co", "CO", CompareOp::Co),
        ("sw", "SW", CompareOp::Sw),
        ("ew", "EW", CompareOp::Ew),
        ("in", "IN", CompareOp::In),
    ];

    for (lower, upper, op) in test_cases {
        assert_eq!(first_token(lower), Token::Compare(op));
        assert_eq!(first_token(upper), Token::Compare(op));
    }

    assert_eq!(first_token("mt"), Token::Mt);
    assert_eq!(first_token("MT"), Token::Mt);
}

#[test]
fn test_keywords() {
    assert_eq!(first_token("and"), Token::Logical(LogicalOp::And));
    assert_eq!(first_token("or"), Token::Logical(LogicalOp::Or));
    assert_eq!(first_token("true"), Token::Bool(true));
    assert_eq!(first_token("false"), Token::Bool(false));
    assert_eq!(first_token("null"), Token::Null);
    assert_eq!(first_token("pr"), Token::Pr);
    assert_eq!(first_token("not"), Token::Not);
    assert_eq!(first_token("NOT"), Token::Not);
}

#[test]
fn test_mixed_case_is_not_a_keyword() {
    // Only all-lowercase or all-uppercase mnemonics are operators; anything
    // else is an ordinary attribute name.
    assert_eq!(first_token("Eq"), Token::AttrName("Eq".to_string()));
    assert_eq!(first_token("In"), Token::AttrName("In".to_string()));
    assert_eq!(first_token("And"), Token::AttrName("And".to_string()));

    // The lowercase-only keywords stay lowercase-only.
    assert_eq!(first_token("AND"), Token::AttrName("AND".to_string()));
    assert_eq!(first_token("OR"), Token::AttrName("OR".to_string()));
    assert_eq!(first_token("TRUE"), Token::AttrName("TRUE".to_string()));
    assert_eq!(first_token("PR"), Token::AttrName("PR".to_string()));
}

#[test]
fn test_attribute_names() {
    assert_eq!(first_token("user_name"), Token::AttrName("user_name".to_string()));
    assert_eq!(first_token("_internal"), Token::AttrName("_internal".to_string()));
    assert_eq!(first_token("a-b"), Token::AttrName("a-b".to_string()));
    assert_eq!(first_token("size2"), Token::AttrName("size2".to_string()));
}

#[test]
fn test_dotted_path_lexes_as_separate_tokens() {
    assert_eq!(
        tokens("src.ip"),
        vec![
            Token::AttrName("src".to_string()),
            Token::Dot,
            Token::AttrName("ip".to_string()),
        ]
    );
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_string_literal() {
    assert_eq!(first_token(r#""hello""#), Token::String("hello".to_string()));
    assert_eq!(first_token(r#""""#), Token::String(String::new()));
    assert_eq!(
        first_token(r#""with space""#),
        Token::String("with space".to_string())
    );
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        first_token(r#""a\nb\tc\rd""#),
        Token::String("a\nb\tc\rd".to_string())
    );
    assert_eq!(
        first_token(r#""say \"hi\"""#),
        Token::String("say \"hi\"".to_string())
    );
    assert_eq!(
        first_token(r#""back\\slash""#),
        Token::String("back\\slash".to_string())
    );
}

#[test]
fn test_string_errors() {
    assert!(matches!(
        lex_error(r#""unterminated"#),
        ParseError::UnterminatedString { pos: 0 }
    ));
    assert!(matches!(
        lex_error(r#""bad \q escape""#),
        ParseError::InvalidEscape { ch: 'q', .. }
    ));
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_integers() {
    assert_eq!(first_token("0"), Token::Int(0));
    assert_eq!(first_token("42"), Token::Int(42));
    assert_eq!(first_token("-10"), Token::Int(-10));
}

#[test]
fn test_doubles() {
    assert_eq!(first_token("3.14"), Token::Double(3.14));
    assert_eq!(first_token("-0.5"), Token::Double(-0.5));
    assert_eq!(first_token("1.5e2"), Token::Double(150.0));
    assert_eq!(first_token("2e-2"), Token::Double(0.02));
}

#[test]
fn test_integral_exponent_stays_integer() {
    // 2e3 has the value 2000 exactly, so it lexes as an integer.
    assert_eq!(first_token("2e3"), Token::Int(2000));
    assert_eq!(first_token("1E2"), Token::Int(100));
    assert_eq!(first_token("-4e2"), Token::Int(-400));
}

#[test]
fn test_versions() {
    let test_cases = vec!["1.2.3", "0.0.1", "1.2.3.4.5", "10.4.1.9999"];
    for input in test_cases {
        assert_eq!(
            first_token(input),
            Token::Version(input.to_string()),
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_dotted_quad_out_of_range_is_a_version() {
    // Four segments but not a valid address, so it falls back to a version.
    assert_eq!(
        first_token("300.1.2.300"),
        Token::Version("300.1.2.300".to_string())
    );
}

#[test]
fn test_negative_multi_dot_is_invalid() {
    assert!(matches!(
        lex_error("-1.2.3"),
        ParseError::InvalidNumber { .. }
    ));
}

#[test]
fn test_integer_overflow_is_invalid() {
    assert!(matches!(
        lex_error("99999999999999999999"),
        ParseError::InvalidNumber { .. }
    ));
}

// ============================================================================
// IP addresses and networks
// ============================================================================

#[test]
fn test_ipv4_addresses() {
    assert_eq!(first_token("1.2.3.4"), Token::Ip("1.2.3.4".parse().unwrap()));
    assert_eq!(
        first_token("192.168.0.1"),
        Token::Ip("192.168.0.1".parse().unwrap())
    );
}

#[test]
fn test_ipv6_addresses() {
    let test_cases = vec!["2001:db8::1", "::1", "fe80::8a2e:1", "::ffff:1.2.3.4"];
    for input in test_cases {
        assert_eq!(
            first_token(input),
            Token::Ip(input.parse().unwrap()),
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_cidr_networks() {
    assert_eq!(
        first_token("10.0.0.0/8"),
        Token::Cidr("10.0.0.0/8".parse().unwrap())
    );
    assert_eq!(
        first_token("2001:db8::/32"),
        Token::Cidr("2001:db8::/32".parse().unwrap())
    );
}

#[test]
fn test_cidr_host_bits_are_masked() {
    assert_eq!(
        first_token("10.1.2.3/8"),
        Token::Cidr("10.0.0.0/8".parse().unwrap())
    );
    assert_eq!(
        first_token("1.0.0.1/32"),
        Token::Cidr("1.0.0.1/32".parse().unwrap())
    );
}

#[test]
fn test_invalid_addresses() {
    assert!(matches!(lex_error("1:2:3:4:5:6:7:8:9"), ParseError::InvalidIp { .. }));
    assert!(matches!(lex_error("1.2.3.4/33"), ParseError::InvalidIp { .. }));
}

// ============================================================================
// Regex literals
// ============================================================================

#[test]
fn test_regex_literal() {
    match first_token("/ab+c/") {
        Token::Regex(lit) => {
            assert_eq!(lit.pattern(), "ab+c");
            assert!(!lit.is_case_insensitive());
            assert!(lit.is_match("xabbc"));
            assert!(!lit.is_match("xABBC"));
        }
        other => panic!("expected regex token, got {:?}", other),
    }
}

#[test]
fn test_regex_case_insensitive_flag() {
    match first_token("/admin/i") {
        Token::Regex(lit) => {
            assert!(lit.is_case_insensitive());
            assert!(lit.is_match("ADMIN"));
        }
        other => panic!("expected regex token, got {:?}", other),
    }
}

#[test]
fn test_regex_escaped_slash() {
    match first_token(r"/\/etc\/passwd/") {
        Token::Regex(lit) => {
            assert_eq!(lit.pattern(), "/etc/passwd");
            assert!(lit.is_match("cat /etc/passwd"));
        }
        other => panic!("expected regex token, got {:?}", other),
    }
}

#[test]
fn test_regex_errors() {
    assert!(matches!(
        lex_error("/never closed"),
        ParseError::UnterminatedRegex { pos: 0 }
    ));
    assert!(matches!(
        lex_error("/a/x"),
        ParseError::UnsupportedRegexFlag { flag: 'x', .. }
    ));
    assert!(matches!(lex_error("/a(/"), ParseError::InvalidRegex { .. }));
}

// ============================================================================
// Positions and errors
// ============================================================================

#[test]
fn test_token_positions() {
    let mut lexer = Lexer::new("src eq 42");
    assert_eq!(
        lexer.next_token().unwrap(),
        (Token::AttrName("src".to_string()), 0)
    );
    assert_eq!(
        lexer.next_token().unwrap(),
        (Token::Compare(CompareOp::Eq), 4)
    );
    assert_eq!(lexer.next_token().unwrap(), (Token::Int(42), 7));
    assert_eq!(lexer.next_token().unwrap(), (Token::Eof, 9));
}

#[test]
fn test_unexpected_character() {
    assert_eq!(
        lex_error("a eq %"),
        ParseError::UnexpectedChar { ch: '%', pos: 5 }
    );
}

#[test]
fn test_colon_after_non_hex_word() {
    assert!(matches!(
        lex_error("xyz:1"),
        ParseError::UnexpectedChar { ch: ':', .. }
    ));
}

#[test]
fn test_full_rule_token_stream() {
    let toks = tokens(r#"(a pr and b in [1, 2, 3]) or c.d eq "x""#);
    assert_eq!(
        toks,
        vec![
            Token::LParen,
            Token::AttrName("a".to_string()),
            Token::Pr,
            Token::Logical(LogicalOp::And),
            Token::AttrName("b".to_string()),
            Token::Compare(CompareOp::In),
            Token::LBracket,
            Token::Int(1),
            Token::Comma,
            Token::Int(2),
            Token::Comma,
            Token::Int(3),
            Token::RBracket,
            Token::RParen,
            Token::Logical(LogicalOp::Or),
            Token::AttrName("c".to_string()),
            Token::Dot,
            Token::AttrName("d".to_string()),
            Token::Compare(CompareOp::Eq),
            Token::String("x".to_string()),
        ]
    );
}

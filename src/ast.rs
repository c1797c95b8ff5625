//! # Sieve Rule Language - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for the sieve rule
//! language, a small filter language whose rules are evaluated against a
//! nested key-value document to produce a boolean verdict.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes and attribute paths
//! - **[operators]** - Comparison, IP, and logical operators
//! - **[literals]** - Right-hand values (scalars, lists, regex, IP)
//!
//! ## Core Concepts
//!
//! A rule is a single boolean expression:
//!
//! ```text
//! (a pr and b in [1, 2, 3]) or c.d eq "x"
//! ```
//!
//! - **Presence** `a pr` - true when the attribute resolves to a value
//! - **Comparison** `b in [1, 2, 3]` - operator between an attribute and a
//!   literal or another attribute
//! - **Regex match** `name mt /ab+c/` - pattern applied to the attribute text
//! - **IP comparison** `src.ip in 10.0.0.0/8` - address equality or CIDR
//!   containment
//! - **Logic** `and` / `or` - left-associative, single precedence level, with
//!   `not` applying only to parenthesized groups
//!
//! Parsed expressions are immutable and cheap to clone; a single AST can be
//! shared across threads and evaluated against many documents.

pub mod tokens;
pub mod expressions;
pub mod operators;
pub mod literals;

pub use tokens::Token;
pub use expressions::{AttrPath, Expr};
pub use operators::{CompareOp, IpOp, LogicalOp};
pub use literals::{IpValue, Literal, RegexLiteral, RegexValue};

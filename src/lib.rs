pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod evaluator;
pub mod lexer;
pub mod operations;
pub mod parser;
pub mod resolver;
pub mod value;

pub use ast::{
    AttrPath, CompareOp, Expr, IpOp, IpValue, Literal, LogicalOp, RegexLiteral, RegexValue, Token,
};
pub use evaluator::{evaluate, evaluate_rule, Error, EvalError, Evaluator};
pub use lexer::Lexer;
pub use parser::{parse, ParseError, Parser};
pub use resolver::resolve;
pub use value::{document_from_json, Value};

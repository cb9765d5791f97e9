pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod convert;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod value;

pub use ast::{Node, Operator, Query, Token, TokenKind};
pub use evaluator::{EvalError, EvalOptions, Interpreter};
pub use lexer::{LexError, Lexer, tokenize};
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseError, Parser};
pub use value::{Document, Value};

use thiserror::Error;

/// Any failure along the tokenize -> parse -> evaluate pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Syntax error: {0}")]
    Lex(#[from] LexError),
    #[error("Syntax error: {0}")]
    Parse(#[from] ParseError),
    #[error("Runtime error: {0}")]
    Eval(#[from] EvalError),
}

/// Tokenizes and parses a query string.
pub fn parse_query(query: &str) -> Result<Query, Error> {
    let tokens = tokenize(query)?;
    Ok(Parser::new(tokens).with_input_len(query.len()).parse()?)
}

/// Runs a query string against a dataset with default options.
///
/// # Examples
///
/// ```
/// use findql::{Document, Value, find};
///
/// let dataset: Vec<Document> = vec![
///     [("city".to_string(), Value::String("Boston".into()))].into_iter().collect(),
///     [("city".to_string(), Value::String("Chicago".into()))].into_iter().collect(),
/// ];
///
/// let found = find(r#"db.people.find({"city": {"$ne": "Boston"}})"#, &dataset).unwrap();
/// assert_eq!(found, vec![&dataset[1]]);
/// ```
pub fn find<'d>(query: &str, dataset: &'d [Document]) -> Result<Vec<&'d Document>, Error> {
    let query = parse_query(query)?;
    Ok(Interpreter::new().evaluate(&query, dataset)?)
}

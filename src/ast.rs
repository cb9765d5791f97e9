//! # findql - Abstract Syntax Tree
//!
//! Node and token types for `db.<collection>.find(<filter>)` queries.
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[query]** - The parsed query and the [`Node`] sum type the interpreter dispatches on
//! - **[operators]** - The `$` operators recognized inside filters
//!
//! ## Grammar
//!
//! ```text
//! query := DB DOT IDENTIFIER DOT IDENTIFIER LPAREN ( FILTER | RPAREN EOF )
//! ```
//!
//! The filter itself is not tokenized: the lexer captures everything after
//! `find(` as a single [`TokenKind::Filter`] token and the parser hands its
//! text, minus the closing `)`, to a JSON decoder.
//!
//! ## Filters
//!
//! ```text
//! db.people.find({"age": {"$gt": 25}, "city": "New York"})
//! db.people.find({"$or": [{"age": {"$lt": 21}}, {"city": "Boston"}]})
//! ```
pub mod operators;
pub mod query;
pub mod tokens;

pub use operators::Operator;
pub use query::{Node, Query};
pub use tokens::{Token, TokenKind};

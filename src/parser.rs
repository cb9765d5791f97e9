use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    ast::{Query, Token, TokenKind},
    value::Value,
};

/// The only method a query may call.
const FIND: &str = "find";

/// Errors that can occur while turning tokens into a [`Query`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A grammar step saw a different token than it needs
    #[error("Expected {expected}, found {found} at position {position}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        position: usize,
    },

    /// A method other than `find` was called
    #[error("Unsupported operation '{name}' at position {position}: only 'find' is supported")]
    UnsupportedOperation { name: String, position: usize },

    /// The call argument does not end with `)`
    #[error("Unterminated call: missing ')' at end of filter starting at position {position}")]
    UnterminatedCall { position: usize },

    /// The call argument is not valid JSON
    #[error("Invalid JSON filter: {detail}")]
    InvalidFilterJson { detail: String },

    /// The call argument is valid JSON but not an object
    #[error("Filter must be a JSON object, found {found}")]
    FilterMustBeObject { found: &'static str },
}

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    /// Position reported for the synthesized end-of-input token
    end: usize,
}

impl Parser {
    /// Creates a parser over `tokens`. Without [`Parser::with_input_len`] the
    /// end of input is taken to be the end of the last token.
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens
            .last()
            .map(|t| t.position + t.text.len())
            .unwrap_or(0);
        Parser {
            tokens,
            position: 0,
            end,
        }
    }

    /// Reports end-of-input errors at the byte length of the source, which
    /// includes any trailing whitespace the lexer dropped.
    pub fn with_input_len(mut self, len: usize) -> Self {
        self.end = len;
        self
    }

    fn current_kind(&self) -> TokenKind {
        self.tokens
            .get(self.position)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn current_position(&self) -> usize {
        self.tokens
            .get(self.position)
            .map(|t| t.position)
            .unwrap_or(self.end)
    }

    /// Consumes one token of the `expected` kind and returns it.
    fn expect(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        match self.tokens.get(self.position) {
            Some(token) if token.kind == expected => {
                self.position += 1;
                Ok(token.clone())
            }
            None if expected == TokenKind::Eof => Ok(Token::new(TokenKind::Eof, "", self.end)),
            _ => Err(ParseError::UnexpectedToken {
                expected,
                found: self.current_kind(),
                position: self.current_position(),
            }),
        }
    }

    /// Parses a full `db.<collection>.find(<filter>)` query.
    ///
    /// # Examples
    ///
    /// ```
    /// use findql::{Parser, tokenize};
    ///
    /// let tokens = tokenize(r#"db.people.find({"city": "Boston"})"#).unwrap();
    /// let query = Parser::new(tokens).parse().unwrap();
    /// assert_eq!(query.collection, "people");
    /// assert!(query.filter.contains_key("city"));
    /// ```
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse(mut self) -> Result<Query, ParseError> {
        self.expect(TokenKind::Db)?;
        self.expect(TokenKind::Dot)?;
        let collection = self.expect(TokenKind::Identifier)?.text;
        self.expect(TokenKind::Dot)?;

        let method = self.expect(TokenKind::Identifier)?;
        if method.text != FIND {
            return Err(ParseError::UnsupportedOperation {
                name: method.text,
                position: method.position,
            });
        }

        self.expect(TokenKind::LParen)?;

        let filter = match self.current_kind() {
            TokenKind::RParen => {
                // find() with no argument selects everything
                self.expect(TokenKind::RParen)?;
                self.expect(TokenKind::Eof)?;
                HashMap::new()
            }
            _ => {
                let token = self.expect(TokenKind::Filter)?;
                parse_filter(&token)?
            }
        };

        debug!(collection = %collection, conditions = filter.len(), "parsed query");
        Ok(Query { collection, filter })
    }
}

/// Strips the call's closing `)` from a filter token and decodes the JSON
/// object in front of it.
fn parse_filter(token: &Token) -> Result<HashMap<String, Value>, ParseError> {
    let body = token
        .text
        .strip_suffix(')')
        .ok_or(ParseError::UnterminatedCall {
            position: token.position,
        })?;

    let invalid = |e: serde_json::Error| ParseError::InvalidFilterJson {
        detail: e.to_string(),
    };

    // Nesting is bounded by memory, not by serde_json's fixed recursion limit
    let mut deserializer = serde_json::Deserializer::from_str(body);
    deserializer.disable_recursion_limit();
    let json = serde_json::Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
        .map_err(invalid)?;
    deserializer.end().map_err(invalid)?;

    match Value::from(json) {
        Value::Object(filter) => Ok(filter),
        other => Err(ParseError::FilterMustBeObject {
            found: other.type_name(),
        }),
    }
}

#[test]
fn test_strips_only_one_paren() {
    let tokens = crate::tokenize(r#"db.x.find({"a": 1}))"#).unwrap();
    let err = Parser::new(tokens).parse().unwrap_err();
    assert!(matches!(err, ParseError::InvalidFilterJson { .. }));
}

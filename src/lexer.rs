use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::trace;

use crate::ast::{Token, TokenKind};

/// Token patterns in match priority order.
///
/// `Db` precedes `Identifier` because `db` is also a valid identifier, and the
/// catch-all `Filter` comes last.
static PATTERNS: LazyLock<Vec<(TokenKind, Regex)>> = LazyLock::new(|| {
    [
        (TokenKind::Db, r"^db\b"),
        (TokenKind::Dot, r"^\."),
        (TokenKind::Identifier, r"^[a-zA-Z_][a-zA-Z0-9_]*"),
        (TokenKind::LParen, r"^\("),
        (TokenKind::RParen, r"^\)"),
        (TokenKind::Skip, r"^[ \t\r\n]+"),
        (TokenKind::Filter, r"^(?s).+"),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("token pattern is valid")))
    .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },
}

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    /// Set once a `Filter` token has swallowed the remaining input
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            done: false,
        }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the next significant token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            if self.done || self.position >= self.input.len() {
                return Ok(None);
            }

            let rest = &self.input[self.position..];
            let Some((kind, matched)) = PATTERNS
                .iter()
                .find_map(|(kind, re)| re.find(rest).map(|m| (*kind, m.as_str())))
            else {
                return Err(LexError::UnexpectedCharacter {
                    character: rest.chars().next().unwrap_or_default(),
                    position: self.position,
                });
            };

            let start = self.position;
            self.position += matched.len();

            match kind {
                TokenKind::Skip => continue,
                TokenKind::Filter => self.done = true,
                _ => {}
            }

            trace!(?kind, text = matched, position = start, "token");
            return Ok(Some(Token::new(kind, matched, start)));
        }
    }
}

/// Splits a query string into tokens.
///
/// Whitespace is dropped and no end-of-input token is appended.
///
/// # Examples
///
/// ```
/// use findql::{TokenKind, tokenize};
///
/// let tokens = tokenize("db.users.find({})").unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds, [
///     TokenKind::Db,
///     TokenKind::Dot,
///     TokenKind::Identifier,
///     TokenKind::Dot,
///     TokenKind::Identifier,
///     TokenKind::LParen,
///     TokenKind::Filter,
/// ]);
/// assert_eq!(tokens[6].text, "{})");
/// ```
pub fn tokenize(query: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(query);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

#[test]
fn test_filter_swallows_the_rest() {
    let tokens = tokenize("db.x.find( {\"a\": \"b.c(d)\"} )").unwrap();
    let last = tokens.last().unwrap();
    assert_eq!(last.kind, TokenKind::Filter);
    assert_eq!(last.text, "{\"a\": \"b.c(d)\"} )");
    assert_eq!(last.position, 11);
}

#[test]
fn test_positions_are_byte_offsets() {
    let tokens = tokenize("db . people").unwrap();
    let positions: Vec<_> = tokens.iter().map(|t| t.position).collect();
    assert_eq!(positions, [0, 3, 5]);
}

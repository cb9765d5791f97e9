use std::fmt;

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// The `db` keyword that opens every query
    ///
    /// # Examples
    /// ```text
    /// db.users.find({})
    /// ^^
    /// ```
    Db,

    /// Member access separator
    Dot,

    /// Collection or method name
    ///
    /// Must start with letter or underscore, followed by letters, digits, or underscores.
    ///
    /// # Examples
    /// ```text
    /// users
    /// find
    /// _archive_2024
    /// ```
    Identifier,

    /// Opening parenthesis of the method call
    LParen,

    /// Closing parenthesis, only seen on its own in `find()`
    RParen,

    /// The raw call argument: everything from the first non-blank character
    /// after `(` to the end of the input, closing `)` included
    ///
    /// # Examples
    /// ```text
    /// db.users.find({"age": {"$gt": 25}})
    ///               ^^^^^^^^^^^^^^^^^^^^^
    /// ```
    Filter,

    /// Whitespace. Matched and discarded, never emitted
    Skip,

    /// End of input, synthesized by the parser
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Db => "'db'",
            TokenKind::Dot => "'.'",
            TokenKind::Identifier => "identifier",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Filter => "filter",
            TokenKind::Skip => "whitespace",
            TokenKind::Eof => "end of input",
        };
        f.write_str(name)
    }
}

/// A classified piece of query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// The matched source text
    pub text: String,
    /// Byte offset of the first character in the query string
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }
}

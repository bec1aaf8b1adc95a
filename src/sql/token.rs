//! SQL Token definitions
//!
//! The statement grammar is small enough that keywords are not tokens of
//! their own: they are `Word`s compared case-insensitively, so a word like
//! `order` can still be a bare value.

use std::fmt;

/// SQL Token types
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Run of characters that are not whitespace, punctuation or quotes.
    /// Covers keywords, identifiers, numbers and `*`.
    Word(String),
    /// Quoted span, without its quotes
    Quoted { text: String, quote: char },

    // ========== Punctuation ==========
    /// (
    LParen,
    /// )
    RParen,
    /// ,
    Comma,
    /// =
    Eq,
    /// ;
    Semicolon,

    // ========== Special ==========
    /// End of input
    Eof,
}

impl Token {
    /// Characters that end a `Word`
    pub const DELIMITERS: [char; 7] = ['(', ')', ',', '=', ';', '\'', '"'];

    /// Check if this token is the given keyword, ignoring case
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Token::Word(word) if word.eq_ignore_ascii_case(keyword))
    }

    /// Get the text of a `Word`
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Token::Word(word) => Some(word),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    /// Render the token as it appeared in the statement
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(word) => write!(f, "{}", word),
            Token::Quoted { text, quote } => write!(f, "{}{}{}", quote, text, quote),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Eq => write!(f, "="),
            Token::Semicolon => write!(f, ";"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// Render a token run back to statement text, one space between tokens
pub fn render(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

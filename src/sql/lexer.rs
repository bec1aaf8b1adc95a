//! SQL Lexer (Tokenizer)
//!
//! This module converts statement text into a stream of tokens.

use super::token::Token;
use crate::error::{Error, Result};

/// SQL Lexer
pub struct Lexer {
    /// Input characters
    input: Vec<char>,
    /// Current position in input
    position: usize,
}

impl Lexer {
    /// Create a new lexer for the given input
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the entire input. The last token is always `Eof`.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            if token == Token::Eof {
                tokens.push(token);
                break;
            }
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        if self.is_at_end() {
            return Ok(Token::Eof);
        }

        let ch = self.current_char();
        let token = match ch {
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            '=' => Token::Eq,
            ';' => Token::Semicolon,
            '\'' | '"' => return self.read_quoted(ch),
            _ => return Ok(self.read_word()),
        };

        self.advance();
        Ok(token)
    }

    /// Check if we've reached the end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get the current character
    fn current_char(&self) -> char {
        self.input[self.position]
    }

    /// Advance to the next character
    fn advance(&mut self) {
        self.position += 1;
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    /// Read a quoted span. There are no escapes: the span ends at the next
    /// matching quote.
    fn read_quoted(&mut self, quote: char) -> Result<Token> {
        let start_pos = self.position;
        self.advance(); // skip opening quote

        let mut text = String::new();
        while !self.is_at_end() {
            let ch = self.current_char();
            self.advance();
            if ch == quote {
                return Ok(Token::Quoted { text, quote });
            }
            text.push(ch);
        }

        Err(Error::Syntax(format!(
            "unterminated quoted string starting at position {}",
            start_pos
        )))
    }

    /// Read a word: keyword, identifier, number or any other bare text
    fn read_word(&mut self) -> Token {
        let mut value = String::new();

        while !self.is_at_end() {
            let ch = self.current_char();
            if ch.is_whitespace() || Token::DELIMITERS.contains(&ch) {
                break;
            }
            value.push(ch);
            self.advance();
        }

        Token::Word(value)
    }
}

use crate::token::{Token, TokenKind};

use walle_common::error::{Error, ParseError, Result};

/// A cursor over the token sequence. The lexer always appends an `Eof`
/// token, so `peek` is total and the cursor never advances past it.
#[derive(Debug)]
pub struct Cursor {
    tokens: Vec<Token>,
    index: usize,
}

impl Cursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(matches!(tokens.last(), Some(token) if token.kind == TokenKind::Eof));
        Self { tokens, index: 0 }
    }

    pub fn peek(&self) -> &Token {
        &self.tokens[self.index]
    }

    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.index].clone();
        if token.kind != TokenKind::Eof {
            self.index += 1;
        }
        token
    }

    /// Consumes the current token only if it has the given kind.
    pub fn matches(&mut self, kind: &TokenKind) -> bool {
        if &self.peek().kind == kind {
            self.advance();
            return true;
        }
        false
    }

    /// Consumes the current token if it matches, or fails with `message` and
    /// the offending token's position.
    pub fn expect(&mut self, kind: &TokenKind, message: &str) -> Result<Token> {
        if &self.peek().kind == kind {
            return Ok(self.advance());
        }
        let found = self.peek();
        Err(Error::ParseError(ParseError::ExpectedToken {
            message: message.to_string(),
            found: found.kind.to_string(),
            span: found.span.clone(),
        }))
    }

    /// Like `expect`, for the payload-carrying identifier kind.
    pub fn expect_identifier(&mut self, message: &str) -> Result<(String, Token)> {
        if let TokenKind::Identifier(name) = &self.peek().kind {
            let name = name.clone();
            return Ok((name, self.advance()));
        }
        let found = self.peek();
        Err(Error::ParseError(ParseError::ExpectedToken {
            message: message.to_string(),
            found: found.kind.to_string(),
            span: found.span.clone(),
        }))
    }
}

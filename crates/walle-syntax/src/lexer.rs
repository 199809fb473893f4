use crate::token::{Token, TokenKind};

use walle_common::error::{Error, LexicalError, Result};

use std::iter::Peekable;
use std::str::CharIndices;

/// Converts source text into a flat token sequence. Fails on the first
/// unrecognized character or unterminated string.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).tokenize()
}

/// Two-character operators are matched before their one-character prefixes,
/// so `<-` and `<=` win over `<`.
const TWO_CHAR_OPERATORS: &[(&str, TokenKind)] = &[
    ("<-", TokenKind::Arrow),
    ("==", TokenKind::EqualEqual),
    ("!=", TokenKind::BangEqual),
    (">=", TokenKind::GreaterEqual),
    ("<=", TokenKind::LessEqual),
    ("&&", TokenKind::And),
    ("||", TokenKind::Or),
];

const ONE_CHAR_OPERATORS: &[(char, TokenKind)] = &[
    ('+', TokenKind::Plus),
    ('-', TokenKind::Minus),
    ('*', TokenKind::Star),
    ('/', TokenKind::Slash),
    ('%', TokenKind::Percent),
    ('^', TokenKind::Caret),
    ('>', TokenKind::Greater),
    ('<', TokenKind::Less),
    ('(', TokenKind::LtParen),
    (')', TokenKind::RtParen),
    ('[', TokenKind::LtBracket),
    (']', TokenKind::RtBracket),
    (',', TokenKind::Comma),
    (':', TokenKind::Colon),
];

struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: usize,
    line_start: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, chars: source.char_indices().peekable(), line: 1, line_start: 0 }
    }

    fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        while let Some(&(start, c)) = self.chars.peek() {
            match c {
                // Carriage returns (with an optional line feed) are absorbed
                // without emitting a token.
                '\r' => {
                    self.bump();
                    if self.peek_char() == Some('\n') {
                        self.bump();
                    }
                    self.line += 1;
                    self.line_start = self.offset();
                }
                // Line feeds terminate statements, so they become tokens.
                '\n' => {
                    tokens.push(self.token(TokenKind::Eol, start, start + 1));
                    self.bump();
                    self.line += 1;
                    self.line_start = start + 1;
                }
                c if c.is_whitespace() => {
                    self.bump();
                }
                '/' if self.source[start..].starts_with("//") => {
                    let end = self.scan_while(|c| c != '\n' && c != '\r');
                    tokens.push(self.token(TokenKind::Comment, start, end));
                }
                c if c.is_ascii_digit() => {
                    let end = self.scan_while(|c| c.is_ascii_digit());
                    let value = self.source[start..end].parse::<i64>().map_err(|_| {
                        Error::LexicalError(LexicalError::NumberTooLarge { span: start..end })
                    })?;
                    tokens.push(self.token(TokenKind::Number(value), start, end));
                }
                c if c.is_alphabetic() || c == '_' => {
                    let end = self.scan_while(|c| c.is_alphanumeric() || c == '_');
                    let text = &self.source[start..end];
                    let kind = TokenKind::keyword(text)
                        .unwrap_or_else(|| TokenKind::Identifier(text.to_string()));
                    tokens.push(self.token(kind, start, end));
                }
                '"' => {
                    self.bump();
                    let end = loop {
                        match self.bump() {
                            Some((i, '"')) => break i + 1,
                            Some(_) => {}
                            None => {
                                return Err(Error::LexicalError(LexicalError::UnterminatedString {
                                    span: start..self.source.len(),
                                }));
                            }
                        }
                    };
                    let text = self.source[start + 1..end - 1].to_string();
                    tokens.push(self.token(TokenKind::String(text), start, end));
                }
                c => {
                    if let Some((text, kind)) =
                        TWO_CHAR_OPERATORS.iter().find(|(text, _)| self.source[start..].starts_with(text))
                    {
                        self.bump();
                        self.bump();
                        tokens.push(self.token(kind.clone(), start, start + text.len()));
                    } else if let Some((_, kind)) =
                        ONE_CHAR_OPERATORS.iter().find(|&&(op, _)| op == c)
                    {
                        self.bump();
                        tokens.push(self.token(kind.clone(), start, start + c.len_utf8()));
                    } else {
                        return Err(Error::LexicalError(LexicalError::UnrecognizedCharacter {
                            character: c,
                            span: start..start + c.len_utf8(),
                        }));
                    }
                }
            }
        }

        let end = self.source.len();
        tokens.push(self.token(TokenKind::Eof, end, end));
        Ok(tokens)
    }

    fn token(&self, kind: TokenKind, start: usize, end: usize) -> Token {
        Token { kind, span: start..end, line: self.line, column: start - self.line_start + 1 }
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        self.chars.next()
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Byte offset of the next unconsumed character.
    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.source.len(), |&(i, _)| i)
    }

    /// Consumes characters while `predicate` holds and returns the end offset.
    fn scan_while(&mut self, predicate: impl Fn(char) -> bool) -> usize {
        while let Some(&(_, c)) = self.chars.peek() {
            if !predicate(c) {
                break;
            }
            self.chars.next();
        }
        self.offset()
    }
}

//! Tokenizer for arithmetic expressions.
//!
//! Supports numeric literals (`12`, `1.`, `.5`, `1.5e-3`), the operators
//! `+ - * /`, parentheses and the `Infinity` literal produced when an
//! infinite operand is substituted.

use std::fmt;

use crate::calculator::number::is_js_whitespace;
use crate::error::SyntaxError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::Plus => f.write_str("'+'"),
            Self::Minus => f.write_str("'-'"),
            Self::Star => f.write_str("'*'"),
            Self::Slash => f.write_str("'/'"),
            Self::LParen => f.write_str("'('"),
            Self::RParen => f.write_str("')'"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

/// A token and the character offset where it starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

pub struct Tokenizer {
    chars: Vec<char>,
    pos: usize,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    /// Split the whole input into tokens, ending with [`TokenKind::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let position = self.pos;
            let Some(ch) = self.peek() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    position,
                });
                return Ok(tokens);
            };

            let kind = match ch {
                '+' | '-' => {
                    // `++` and `--` lex as increment/decrement, which never
                    // applies to a literal.
                    if self.peek_at(1) == Some(ch) {
                        return Err(SyntaxError::IncrementOperator { position });
                    }
                    self.pos += 1;
                    if ch == '+' {
                        TokenKind::Plus
                    } else {
                        TokenKind::Minus
                    }
                }
                '*' => self.single(TokenKind::Star),
                '/' => self.single(TokenKind::Slash),
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                c if c.is_ascii_digit() || c == '.' => self.read_number()?,
                c if is_ident_start(c) => self.read_ident()?,
                found => return Err(SyntaxError::UnexpectedChar { found, position }),
            };
            tokens.push(Token { kind, position });
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_js_whitespace) {
            self.pos += 1;
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Read a decimal literal: `12`, `1.`, `.5`, `1.5e-3`, `2E10`.
    fn read_number(&mut self) -> Result<TokenKind, SyntaxError> {
        let start = self.pos;
        let mut digit_count = self.skip_digits();

        if self.peek() == Some('.') {
            self.pos += 1;
            digit_count += self.skip_digits();
        }
        if digit_count == 0 {
            // A lone '.'
            return Err(SyntaxError::UnexpectedChar {
                found: '.',
                position: start,
            });
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some('+' | '-')) {
                self.pos += 1;
            }
            if self.skip_digits() == 0 {
                return Err(SyntaxError::MalformedNumber { position: start });
            }
        }

        // A literal may not run straight into an identifier, another
        // literal or a second decimal point (`3x`, `1.2.3`).
        if self
            .peek()
            .is_some_and(|c| is_ident_start(c) || c.is_ascii_digit() || c == '.')
        {
            return Err(SyntaxError::MalformedNumber { position: start });
        }

        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| SyntaxError::MalformedNumber { position: start })
    }

    fn read_ident(&mut self) -> Result<TokenKind, SyntaxError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| is_ident_start(c) || c.is_ascii_digit())
        {
            self.pos += 1;
        }
        let name: String = self.chars[start..self.pos].iter().collect();
        match name.as_str() {
            "Infinity" => Ok(TokenKind::Number(f64::INFINITY)),
            _ => Err(SyntaxError::UnknownIdentifier {
                name,
                position: start,
            }),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

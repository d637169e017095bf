//! Recursive-descent parser that evaluates as it parses.
//!
//! Grammar:
//!   expr    = term (('+' | '-') term)*
//!   term    = unary (('*' | '/') unary)*
//!   unary   = '-' unary | primary
//!   primary = NUMBER | '(' expr ')'

use super::token::{Token, TokenKind};
use crate::error::SyntaxError;

/// Maximum nesting of parentheses and unary minus.
pub const MAX_DEPTH: usize = 256;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    /// `tokens` must end with [`TokenKind::Eof`], as produced by the tokenizer.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parse the full token stream and return its value.
    pub fn evaluate(mut self) -> Result<f64, SyntaxError> {
        let value = self.parse_expr()?;
        match self.peek() {
            TokenKind::Eof => Ok(value),
            _ => Err(self.unexpected()),
        }
    }

    fn peek(&self) -> TokenKind {
        self.tokens
            .get(self.pos)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    fn advance(&mut self) -> TokenKind {
        let kind = self.peek();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        kind
    }

    fn unexpected(&self) -> SyntaxError {
        match self.tokens.get(self.pos) {
            Some(token) if token.kind != TokenKind::Eof => SyntaxError::UnexpectedToken {
                found: token.kind.to_string(),
                position: token.position,
            },
            _ => SyntaxError::UnexpectedEnd,
        }
    }

    fn enter(&mut self) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(SyntaxError::TooDeep { limit: MAX_DEPTH });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_expr(&mut self) -> Result<f64, SyntaxError> {
        let mut left = self.parse_term()?;
        loop {
            match self.peek() {
                TokenKind::Plus => {
                    self.advance();
                    left += self.parse_term()?;
                }
                TokenKind::Minus => {
                    self.advance();
                    left -= self.parse_term()?;
                }
                _ => return Ok(left),
            }
        }
    }

    fn parse_term(&mut self) -> Result<f64, SyntaxError> {
        let mut left = self.parse_unary()?;
        loop {
            match self.peek() {
                TokenKind::Star => {
                    self.advance();
                    left *= self.parse_unary()?;
                }
                TokenKind::Slash => {
                    self.advance();
                    left /= self.parse_unary()?;
                }
                _ => return Ok(left),
            }
        }
    }

    fn parse_unary(&mut self) -> Result<f64, SyntaxError> {
        if self.peek() == TokenKind::Minus {
            self.advance();
            self.enter()?;
            let operand = self.parse_unary()?;
            self.leave();
            return Ok(-operand);
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<f64, SyntaxError> {
        match self.peek() {
            TokenKind::Number(n) => {
                self.advance();
                Ok(n)
            }
            TokenKind::LParen => {
                self.advance();
                self.enter()?;
                let value = self.parse_expr()?;
                self.leave();
                if self.peek() != TokenKind::RParen {
                    return Err(self.unexpected());
                }
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::token::Tokenizer;
    use super::*;

    fn eval(input: &str) -> Result<f64, SyntaxError> {
        Parser::new(Tokenizer::new(input).tokenize()?).evaluate()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(eval("(2 + 3) * 4").unwrap(), 20.0);
        assert_eq!(eval("10 - 4 - 3").unwrap(), 3.0);
        assert_eq!(eval("100 / 10 / 5").unwrap(), 2.0);
        assert_eq!(eval("2 * 3 + 4 * 5").unwrap(), 26.0);
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(eval("-5").unwrap(), -5.0);
        assert_eq!(eval("-(2 + 3)").unwrap(), -5.0);
        assert_eq!(eval("2 * -3").unwrap(), -6.0);
        assert_eq!(eval("- -4").unwrap(), 4.0);
        assert_eq!(eval("(2)-(-3)").unwrap(), 5.0);
        assert_eq!(eval("-2 * -2").unwrap(), 4.0);
    }

    #[test]
    fn test_ieee_semantics() {
        assert_eq!(eval("0.1 + 0.2").unwrap(), 0.1 + 0.2);
        assert_eq!(eval("1 / 0").unwrap(), f64::INFINITY);
        assert!(eval("0 / 0").unwrap().is_nan());
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(eval(""), Err(SyntaxError::UnexpectedEnd));
        assert_eq!(eval("2 +"), Err(SyntaxError::UnexpectedEnd));
        assert_eq!(eval("(2 + 3"), Err(SyntaxError::UnexpectedEnd));
        assert!(matches!(
            eval("2 + 3)"),
            Err(SyntaxError::UnexpectedToken { position: 5, .. })
        ));
        assert!(matches!(
            eval("2 +* 2"),
            Err(SyntaxError::UnexpectedToken { .. })
        ));
        assert!(matches!(eval("()"), Err(SyntaxError::UnexpectedToken { .. })));
        assert!(matches!(
            eval("(2)(3)"),
            Err(SyntaxError::UnexpectedToken { .. })
        ));
        assert!(matches!(eval("+5"), Err(SyntaxError::UnexpectedToken { .. })));
    }

    #[test]
    fn test_depth_limit() {
        let shallow = format!("{}1{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_eq!(eval(&shallow).unwrap(), 1.0);

        let deep = format!(
            "{}1{}",
            "(".repeat(MAX_DEPTH + 1),
            ")".repeat(MAX_DEPTH + 1)
        );
        assert_eq!(eval(&deep), Err(SyntaxError::TooDeep { limit: MAX_DEPTH }));

        let negations = format!("{}1", "- ".repeat(MAX_DEPTH + 1));
        assert_eq!(
            eval(&negations),
            Err(SyntaxError::TooDeep { limit: MAX_DEPTH })
        );
    }
}

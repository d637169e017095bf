//! Free-form expression evaluation over the operands `a` and `b`.
//!
//! Every `a` and `b` character in the expression text is replaced by the
//! parenthesized operand value before parsing. Replacement is purely
//! textual, so letters inside longer words are replaced too.

mod parser;
mod token;

use tracing::debug;

use super::number::{format_number, is_js_whitespace};
use crate::error::CalcError;
use parser::Parser;
use token::Tokenizer;

pub use parser::MAX_DEPTH;

/// Replace each `a` and `b` in `expression` with `(<a>)` and `(<b>)`.
pub fn substitute(expression: &str, a: f64, b: f64) -> String {
    expression
        .replace('a', &format!("({})", format_number(a)))
        .replace('b', &format!("({})", format_number(b)))
}

/// Evaluate `expression` with the given operand values.
pub fn evaluate_expression(expression: &str, a: f64, b: f64) -> Result<f64, CalcError> {
    if expression.trim_matches(is_js_whitespace).is_empty() {
        return Err(CalcError::EmptyExpression);
    }

    let substituted = substitute(expression, a, b);
    debug!(expression, %substituted, "evaluating expression");

    let tokens = Tokenizer::new(&substituted).tokenize()?;
    let value = Parser::new(tokens).evaluate()?;

    if !value.is_finite() {
        debug!(value, "expression result is not finite");
        return Err(CalcError::ExpressionNonFinite);
    }
    Ok(value)
}

//! Error types for calculator operations.
//!
//! Every failure the engine can produce is a user-input validation error.
//! The `Display` text of [`CalcError`] is the exact message shown to the user.

use std::fmt;
use thiserror::Error;

/// The input field a validation error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    A,
    BInput,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("a"),
            Self::BInput => f.write_str("bInput"),
        }
    }
}

/// A failed computation attempt.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Empty or unparseable numeric field.
    #[error("Please enter a valid number for \"{field}\"")]
    MissingOrNonNumeric { field: Field },

    /// Divisor is exactly zero in a division.
    #[error("Division by zero is not allowed!")]
    DivisionByZero,

    /// Expression field is blank while the expression operation is selected.
    #[error("Please enter an expression to evaluate")]
    EmptyExpression,

    /// Expression does not parse under the supported grammar.
    #[error("Invalid expression. Please check your syntax.")]
    ExpressionSyntax(#[source] SyntaxError),

    /// Expression evaluated to an infinite or undefined value.
    #[error("Expression resulted in infinity or invalid result")]
    ExpressionNonFinite,

    /// Even/odd check on a value with a fractional part.
    #[error("Please enter an integer for even/odd check")]
    NonIntegerInput,
}

impl CalcError {
    /// Stable name of the error category, used in machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingOrNonNumeric { .. } => "MissingOrNonNumeric",
            Self::DivisionByZero => "DivisionByZero",
            Self::EmptyExpression => "EmptyExpression",
            Self::ExpressionSyntax(_) => "ExpressionSyntaxError",
            Self::ExpressionNonFinite => "ExpressionNonFinite",
            Self::NonIntegerInput => "NonIntegerInput",
        }
    }
}

impl From<SyntaxError> for CalcError {
    fn from(err: SyntaxError) -> Self {
        Self::ExpressionSyntax(err)
    }
}

/// Why an expression was rejected by the tokenizer or parser.
///
/// Positions are character offsets into the substituted expression text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unexpected character {found:?} at {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("malformed number at {position}")]
    MalformedNumber { position: usize },

    #[error("unknown identifier {name:?} at {position}")]
    UnknownIdentifier { name: String, position: usize },

    #[error("increment/decrement operator at {position}")]
    IncrementOperator { position: usize },

    #[error("unexpected token {found} at {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("expression nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}

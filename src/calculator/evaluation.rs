//! Calculator operations over the raw `a` / `bInput` field text.
//!
//! Every function here is pure: the same inputs always produce the same
//! [`Outcome`], and nothing is retained between calls.

use tracing::debug;

use super::expression::evaluate_expression;
use super::number::{format_number, parse_number};
use super::operation::{Operation, Outcome, Parity, Value};
use crate::error::{CalcError, Field};

/// Parse one field, mapping an empty or non-numeric value to an error for `field`.
fn parse_field(text: &str, field: Field) -> Result<f64, CalcError> {
    parse_number(text).ok_or(CalcError::MissingOrNonNumeric { field })
}

/// Validate both operands, `a` first.
///
/// When `a` is invalid the error names `a` and `b_input` is not looked at.
pub fn validate_inputs(a: &str, b_input: &str) -> Result<(f64, f64), CalcError> {
    let a = parse_field(a, Field::A)?;
    let b = parse_field(b_input, Field::BInput)?;
    Ok((a, b))
}

/// Run the main calculation for the selected operation.
///
/// `expression` is only read for [`Operation::Expression`].
pub fn compute(operation: Operation, a: &str, b_input: &str, expression: &str) -> Outcome {
    let (a, b) = validate_inputs(a, b_input)?;
    debug!(%operation, a, b, "computing");

    let value = match operation {
        Operation::Add => a + b,
        Operation::Subtract => a - b,
        Operation::Multiply => a * b,
        Operation::Divide => {
            // Also true for negative zero.
            if b == 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            a / b
        }
        Operation::Expression => evaluate_expression(expression, a, b)?,
    };

    Ok(Value::Number(value))
}

/// Sum of the squares of the decimal digits of `|a|`, truncated toward zero.
///
/// An infinite `a` has no digit sequence and yields `NaN`.
pub fn sum_of_digit_squares(a: &str) -> Outcome {
    let a = parse_field(a, Field::A)?;
    let truncated = a.abs().trunc();
    if !truncated.is_finite() {
        debug!(a, "no digit sequence for infinite input");
        return Ok(Value::Number(f64::NAN));
    }

    // `{:.0}` prints the exact decimal expansion, even past 1e21.
    let digits = format!("{truncated:.0}");
    let sum: u32 = digits
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d * d)
        .sum();

    debug!(a, sum, "sum of digit squares");
    Ok(Value::Number(f64::from(sum)))
}

/// Classify `a` as even or odd. Values with a fractional part are rejected.
pub fn even_odd(a: &str) -> Outcome {
    let a = parse_field(a, Field::A)?;
    if !a.is_finite() || a.fract() != 0.0 {
        return Err(CalcError::NonIntegerInput);
    }

    let parity = if a % 2.0 == 0.0 {
        Parity::Even
    } else {
        Parity::Odd
    };
    debug!(a, %parity, "classified parity");
    Ok(Value::Parity(parity))
}

/// The live hint shown next to the `bInput` field: `...` while empty,
/// `Invalid` when it does not parse, otherwise the parsed value.
pub fn preview_b(b_input: &str) -> String {
    if b_input.is_empty() {
        return "...".to_string();
    }
    match parse_number(b_input) {
        Some(b) => format_number(b),
        None => "Invalid".to_string(),
    }
}

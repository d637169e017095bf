//! Calculator engine for the two-operand calculator.
//!
//! This module provides functionality to:
//! - Parse raw field text into numbers and format numbers for display
//! - Run the arithmetic, expression, digit-square and parity operations
//! - Copy results to the clipboard

mod clipboard;
mod evaluation;
pub mod expression;
mod number;
mod operation;

pub use clipboard::{ResultClipboard, clipboard_text};
pub use evaluation::{compute, even_odd, preview_b, sum_of_digit_squares, validate_inputs};
pub use expression::evaluate_expression;
pub use number::{format_number, parse_number};
pub use operation::{Operation, Outcome, Parity, Value};

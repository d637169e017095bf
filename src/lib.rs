//! Two-operand calculator with add, subtract, multiply, divide and
//! free-form expression operations, plus digit-square sums and parity
//! checks on the first operand.

pub mod calculator;
pub mod config;
pub mod error;
pub mod shell;

pub use error::{CalcError, Field, SyntaxError};

//! Operation selector and computation result types.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize, Serializer};

use super::number::format_number;
use crate::error::CalcError;

/// The operation performed by the main "calculate" action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Evaluate a free-form expression over `a` and `b`.
    Expression,
}

impl Operation {
    /// Parse an operation name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name.trim(), true).ok()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Expression => "expression",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of the even/odd classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Parity {
    Even,
    Odd,
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Even => f.write_str("Even"),
            Self::Odd => f.write_str("Odd"),
        }
    }
}

/// A successfully computed value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Parity(Parity),
}

/// Numbers serialize the way they display: whole numbers without a
/// fractional part, and `Infinity` / `NaN` as strings since JSON has no
/// literal for them.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Number(n) if !n.is_finite() => serializer.serialize_str(&format_number(n)),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                serializer.serialize_i64(n as i64)
            }
            Self::Number(n) => serializer.serialize_f64(n),
            Self::Parity(p) => p.serialize(serializer),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Parity(p) => p.fmt(f),
        }
    }
}

/// The outcome of one computation attempt: a value or a failure, never both.
pub type Outcome = Result<Value, CalcError>;

//! Rendering of outcomes for the terminal.
//!
//! A value renders as `Result: <value>`, a failure as its message alone.
//! The two are never shown together.

use serde::Serialize;

use crate::calculator::{Outcome, Value};
use crate::config::OutputFormat;

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Rendered<'a> {
    Result(&'a Value),
    Error { kind: &'static str, message: String },
}

impl<'a> From<&'a Outcome> for Rendered<'a> {
    fn from(outcome: &'a Outcome) -> Self {
        match outcome {
            Ok(value) => Self::Result(value),
            Err(err) => Self::Error {
                kind: err.kind(),
                message: err.to_string(),
            },
        }
    }
}

pub fn render_outcome(outcome: &Outcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => match outcome {
            Ok(value) => format!("Result: {value}"),
            Err(err) => err.to_string(),
        },
        OutputFormat::Json => {
            // Serializing these plain enums and strings cannot fail.
            serde_json::to_string(&Rendered::from(outcome)).unwrap_or_default()
        }
    }
}

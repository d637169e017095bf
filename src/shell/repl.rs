//! Line-oriented interactive shell.
//!
//! Each line is one command. Field values are taken verbatim from after
//! the single space that follows the command word, so leading or trailing
//! whitespace in a value is preserved.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::warn;

use super::render::render_outcome;
use super::session::Session;
use crate::calculator::{Operation, Outcome, ResultClipboard};
use crate::config::OutputFormat;

const HELP: &str = "\
Commands:
  a <text>        set the first number
  b <text>        set the second number (bInput)
  expr <text>     set the expression, using a and b as placeholders
  op <operation>  select add, subtract, multiply, divide or expression
  calc            run the selected operation
  squares         sum of the squares of the digits of a
  parity          check whether a is even or odd
  show            show inputs and the current result
  reset           clear inputs and result
  help            show this help
  quit            leave the shell";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    SetA(String),
    SetB(String),
    SetExpression(String),
    SetOperation(Operation),
    Calculate,
    SumOfDigitSquares,
    EvenOdd,
    Show,
    Reset,
    Help,
    Quit,
    Empty,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command {0:?}, type 'help' for a list of commands")]
    UnknownCommand(String),
    #[error("Unknown operation {0:?}, expected add, subtract, multiply, divide or expression")]
    UnknownOperation(String),
}

/// Parse one input line into a command.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\n', '\r']).trim_start();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));

    let command = match word {
        "" => Command::Empty,
        "a" => Command::SetA(rest.to_string()),
        "b" => Command::SetB(rest.to_string()),
        "expr" => Command::SetExpression(rest.to_string()),
        "op" => Command::SetOperation(
            Operation::from_name(rest)
                .ok_or_else(|| CommandError::UnknownOperation(rest.to_string()))?,
        ),
        "calc" => Command::Calculate,
        "squares" => Command::SumOfDigitSquares,
        "parity" => Command::EvenOdd,
        "show" => Command::Show,
        "reset" => Command::Reset,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };
    Ok(command)
}

/// Options that control how the shell presents outcomes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShellOptions {
    pub format: OutputFormat,
    pub copy_result: bool,
}

/// Read commands from `input` until end of input or `quit`.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    options: ShellOptions,
    input: R,
    mut out: W,
) -> Result<()> {
    writeln!(out, "Type 'help' for a list of commands.")?;

    // Held for the whole session so copied results stay available.
    let mut clipboard = if options.copy_result {
        ResultClipboard::new()
            .inspect_err(|err| warn!("{err:#}"))
            .ok()
    } else {
        None
    };

    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        match command {
            Command::Empty => {}
            Command::SetA(text) => session.input.a = text,
            Command::SetB(text) => {
                session.input.b_input = text;
                writeln!(out, "b = {}", session.b_preview())?;
            }
            Command::SetExpression(text) => session.input.expression = text,
            Command::SetOperation(operation) => session.input.operation = operation,
            Command::Calculate => {
                let outcome = session.calculate();
                present(outcome, options.format, &mut out)?;
                copy_result(outcome, clipboard.as_mut());
            }
            Command::SumOfDigitSquares => {
                let outcome = session.sum_of_digit_squares();
                present(outcome, options.format, &mut out)?;
                copy_result(outcome, clipboard.as_mut());
            }
            Command::EvenOdd => {
                let outcome = session.even_odd();
                present(outcome, options.format, &mut out)?;
                copy_result(outcome, clipboard.as_mut());
            }
            Command::Show => show(session, options.format, &mut out)?,
            Command::Reset => session.reset(),
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
        }
    }

    out.flush()?;
    Ok(())
}

/// Write an outcome on its own line.
pub fn present<W: Write>(outcome: &Outcome, format: OutputFormat, out: &mut W) -> Result<()> {
    writeln!(out, "{}", render_outcome(outcome, format))?;
    Ok(())
}

/// Copy a successful value. Failures are never copied.
fn copy_result(outcome: &Outcome, clipboard: Option<&mut ResultClipboard>) {
    if let Some(clipboard) = clipboard
        && let Ok(value) = outcome
        && let Err(err) = clipboard.copy(value)
    {
        warn!("{err:#}");
    }
}

fn show<W: Write>(session: &Session, format: OutputFormat, out: &mut W) -> Result<()> {
    let input = &session.input;
    writeln!(out, "a = {:?}", input.a)?;
    writeln!(out, "bInput = {:?} (b = {})", input.b_input, session.b_preview())?;
    writeln!(out, "operation = {}", input.operation)?;
    if input.operation == Operation::Expression {
        writeln!(out, "expression = {:?}", input.expression)?;
    }
    match session.outcome() {
        Some(outcome) => writeln!(out, "{}", render_outcome(outcome, format))?,
        None => writeln!(out, "(no result)")?,
    }
    Ok(())
}

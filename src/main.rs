use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use abcalc::calculator::{Operation, ResultClipboard};
use abcalc::config::{Config, OutputFormat};
use abcalc::shell::{ShellOptions, Session, present, repl};
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "abcalc")]
#[command(version)]
#[command(about = "Calculator for two numbers a and b")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to <config dir>/abcalc/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print outcomes as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Copy successful results to the clipboard
    #[arg(long, global = true)]
    copy: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an operation on a and bInput
    Calc {
        /// Operation to run (defaults to the configured one)
        #[arg(long, value_enum)]
        op: Option<Operation>,

        /// First number
        #[arg(short, default_value = "", allow_hyphen_values = true)]
        a: String,

        /// Second number (bInput)
        #[arg(short, default_value = "", allow_hyphen_values = true)]
        b: String,

        /// Expression over a and b, used with --op expression
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        expression: String,
    },

    /// Sum of the squares of the digits of a
    Squares {
        #[arg(short, default_value = "", allow_hyphen_values = true)]
        a: String,
    },

    /// Check whether a is even or odd
    Parity {
        #[arg(short, default_value = "", allow_hyphen_values = true)]
        a: String,
    },

    /// Start an interactive session
    Repl,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// Session holding the field values given on the command line.
fn build_session(command: &Commands, config: &Config) -> Session {
    let mut session = Session::new(config.operation);
    match command {
        Commands::Calc {
            op,
            a,
            b,
            expression,
        } => {
            session.input.operation = op.unwrap_or(config.operation);
            session.input.a = a.clone();
            session.input.b_input = b.clone();
            session.input.expression = expression.clone();
        }
        Commands::Squares { a } | Commands::Parity { a } => session.input.a = a.clone(),
        Commands::Repl => {}
    }
    session
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let options = ShellOptions {
        format: if cli.json {
            OutputFormat::Json
        } else {
            config.output
        },
        copy_result: cli.copy || config.copy_result,
    };

    let mut session = build_session(&cli.command, &config);
    let mut stdout = io::stdout().lock();

    let outcome = match cli.command {
        Commands::Calc { .. } => session.calculate(),
        Commands::Squares { .. } => session.sum_of_digit_squares(),
        Commands::Parity { .. } => session.even_odd(),
        Commands::Repl => {
            repl::run(&mut session, options, io::stdin().lock(), &mut stdout)?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    present(outcome, options.format, &mut stdout)?;
    drop(stdout);

    // The process exits right after, so hold the clipboard until another
    // program owns the text.
    if options.copy_result
        && let Ok(value) = outcome
        && let Err(err) =
            ResultClipboard::new().and_then(|mut clipboard| clipboard.copy_and_wait(value))
    {
        warn!("{err:#}");
    }

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use abcalc::calculator::Value;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_calc_takes_negative_values() {
        let cli = parse(&["abcalc", "calc", "-a", "-5", "-e", "-a"]);
        let config = Config {
            operation: Operation::Multiply,
            ..Config::default()
        };
        let session = build_session(&cli.command, &config);

        assert_eq!(session.input.a, "-5");
        assert_eq!(session.input.b_input, "");
        assert_eq!(session.input.expression, "-a");
        assert_eq!(session.input.operation, Operation::Multiply);
    }

    #[test]
    fn test_op_overrides_config() {
        let cli = parse(&[
            "abcalc", "--json", "calc", "--op", "divide", "-a", "6", "-b", "3",
        ]);
        let config = Config {
            operation: Operation::Multiply,
            ..Config::default()
        };
        let mut session = build_session(&cli.command, &config);

        assert!(cli.json);
        assert_eq!(session.input.operation, Operation::Divide);
        assert_eq!(session.input.b_input, "3");
        assert_eq!(session.calculate(), &Ok(Value::Number(2.0)));
    }

    #[test]
    fn test_single_operand_commands() {
        let cli = parse(&["abcalc", "parity", "-a", "-7"]);
        let session = build_session(&cli.command, &Config::default());
        assert_eq!(session.input.a, "-7");
        assert_eq!(session.input.operation, Operation::Add);

        assert!(Cli::try_parse_from(["abcalc", "squares", "-b", "1"]).is_err());
    }
}

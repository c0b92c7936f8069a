//! draftkit command-line entry point

mod cli;
mod commands;

use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, OutputFormat};
use draftkit_core::error::DraftError;
use draftkit_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if wants_json_errors(std::env::args().skip(1)) => {
            let failure = usage_failure(err);
            eprintln!("{}", failure.to_json());
            return exit_with(&failure);
        }
        Err(err) => err.exit(),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("warning: logging disabled: {e}");
    }

    match commands::dispatch::run(&cli, start) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match cli.format {
                OutputFormat::Json => eprintln!("{}", e.to_json()),
                OutputFormat::Human if !cli.quiet => eprintln!("error: {e}"),
                OutputFormat::Human => {}
            }
            exit_with(&e)
        }
    }
}

/// Map a clap failure onto a draftkit error. Help and version output exit directly.
fn usage_failure(err: clap::Error) -> DraftError {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        ErrorKind::InvalidValue
        | ErrorKind::ValueValidation
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::MissingSubcommand
        | ErrorKind::ArgumentConflict => DraftError::UsageError(err.to_string()),
        _ => DraftError::Other(err.to_string()),
    }
}

fn exit_with(err: &DraftError) -> ExitCode {
    ExitCode::from(err.exit_code() as u8)
}

// Parse failures happen before `Cli.format` exists, so scan argv directly.
fn wants_json_errors(mut args: impl Iterator<Item = String>) -> bool {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--format=json" => return true,
            "--format" if args.next().as_deref() == Some("json") => return true,
            _ => {}
        }
    }
    false
}

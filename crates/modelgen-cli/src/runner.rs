//! Command execution and runtime logic.
//!
//! Contains command dispatch, logging initialization and the mapping from
//! errors to process exit codes.

use anyhow::Result;
use clap::CommandFactory;
use modelgen_core::cli::{ExitCode, OutputFormat};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::commands;

/// Initializes logging infrastructure.
///
/// `--verbose` forces the `debug` level; otherwise `RUST_LOG` applies,
/// defaulting to `info`. Logs go to stderr so stdout carries only results.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Executes the specified CLI command.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn execute_command(command: Commands, output_format: OutputFormat) -> Result<ExitCode> {
    match command {
        Commands::Generate { input } => commands::generate::run(&input, output_format),
        Commands::Inspect { input } => commands::inspect::run(&input, output_format),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}

/// Exit code for a failed command.
///
/// Configuration problems anywhere in the error chain map to
/// [`ExitCode::INVALID_INPUT`]; everything else is [`ExitCode::ERROR`].
#[must_use]
pub fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<modelgen_core::Error>())
        .map_or(ExitCode::ERROR, ExitCode::for_error)
}

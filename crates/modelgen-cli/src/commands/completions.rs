//! Shell completion generation command.
//!
//! Generates shell completion scripts for bash, zsh, fish, elvish and
//! `PowerShell`.

use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use modelgen_core::cli::ExitCode;
use std::io::{self, Write};
use tracing::info;

/// Writes the completion script for `shell` into `out`.
///
/// # Examples
///
/// ```
/// use clap::Command;
/// use clap_complete::Shell;
/// use modelgen_cli::commands::completions;
///
/// let mut script = Vec::new();
/// completions::write_completions(Shell::Bash, &mut Command::new("modelgen"), &mut script);
/// assert!(!script.is_empty());
/// ```
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Runs the completions command, printing the script to stdout.
///
/// # Errors
///
/// Never fails; the `Result` keeps the signature uniform with the other
/// commands.
pub fn run(shell: Shell, cmd: &mut Command) -> Result<ExitCode> {
    info!("Generating {shell} completions");
    write_completions(shell, cmd, &mut io::stdout());
    Ok(ExitCode::SUCCESS)
}

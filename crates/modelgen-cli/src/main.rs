//! modelgen command-line entry point.
//!
//! # Examples
//!
//! ```bash
//! # Generate from a settings file
//! modelgen generate --settings modelgen.json
//!
//! # Generate React interfaces with a schema manifest
//! modelgen generate ./metadata ./src/models /api --generator react --schema
//!
//! # Show what would be generated
//! modelgen inspect ./metadata ./src/models --format json
//! ```

use anyhow::Result;
use clap::Parser;
use modelgen_cli::cli::Cli;
use modelgen_cli::runner::{execute_command, exit_code_for, init_logging};
use modelgen_core::cli::{ExitCode, OutputFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_code_for(&e)
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn run(cli: Cli) -> Result<ExitCode> {
    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(anyhow::Error::new)?;
    execute_command(cli.command, output_format)
}

//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - Available subcommands
//! - `InputArgs` - Options shared by `generate` and `inspect`

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use modelgen_core::{GeneratorKind, HttpModuleKind, Options};
use std::path::PathBuf;

/// Generates TypeScript models and a data service from API metadata modules.
#[derive(Parser, Debug)]
#[command(name = "modelgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate models and the data service into a destination directory.
    ///
    /// # Examples
    ///
    /// ```bash
    /// # From a settings file
    /// modelgen generate --settings modelgen.json
    ///
    /// # From arguments
    /// modelgen generate ./metadata ./src/app/models /api --schema
    /// ```
    Generate {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show controllers, operations and discovered models without writing.
    Inspect {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Emission dialect as accepted on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum GeneratorArg {
    /// Angular classes and an `Observable` service
    #[default]
    Angular,
    /// React interfaces and a Promise service
    React,
}

impl From<GeneratorArg> for GeneratorKind {
    fn from(arg: GeneratorArg) -> Self {
        match arg {
            GeneratorArg::Angular => Self::Angular,
            GeneratorArg::React => Self::React,
        }
    }
}

/// Angular HTTP module as accepted on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum HttpModuleArg {
    /// `HttpClient` from `@angular/common/http`
    #[default]
    Client,
    /// `Http` from `@angular/http`
    Legacy,
}

impl From<HttpModuleArg> for HttpModuleKind {
    fn from(arg: HttpModuleArg) -> Self {
        match arg {
            HttpModuleArg::Client => Self::HttpClient,
            HttpModuleArg::Legacy => Self::Http,
        }
    }
}

/// Where the run reads its configuration from.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Settings file (JSON, or TOML by extension)
    #[arg(short, long, conflicts_with_all = ["source", "destination", "api_path"])]
    pub settings: Option<PathBuf>,

    /// Directory containing the metadata modules
    #[arg(required_unless_present = "settings")]
    pub source: Option<String>,

    /// Directory receiving the generated files
    #[arg(required_unless_present = "settings")]
    pub destination: Option<String>,

    /// Base path prepended to every request URL
    pub api_path: Option<String>,

    /// Module file patterns, comma separated
    #[arg(long, value_delimiter = ',')]
    pub files: Vec<String>,

    /// Controller base class names, comma separated
    #[arg(long = "class", value_delimiter = ',')]
    pub controller_base_names: Vec<String>,

    /// Import models through the `./index` barrel
    #[arg(long)]
    pub combine_imports: bool,

    /// Angular HTTP module
    #[arg(long, value_enum, default_value_t = HttpModuleArg::Client)]
    pub http_module: HttpModuleArg,

    /// Rethrow HTTP errors instead of logging them
    #[arg(long)]
    pub no_handle_errors: bool,

    /// Write the schema manifest
    #[arg(long)]
    pub schema: bool,

    /// Schema manifest path, relative to the destination
    #[arg(long)]
    pub schema_path: Option<String>,

    /// Emission dialect
    #[arg(long, value_enum, default_value_t = GeneratorArg::Angular)]
    pub generator: GeneratorArg,
}

impl InputArgs {
    /// Resolves the arguments into validated options.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be loaded or the
    /// resulting options are invalid.
    pub fn to_options(&self) -> Result<Options> {
        if let Some(settings) = &self.settings {
            return Options::from_settings_file(settings)
                .with_context(|| format!("failed to load settings from {}", settings.display()));
        }

        let source = self.source.clone().unwrap_or_default();
        let destination = self.destination.clone().unwrap_or_default();

        let mut builder = Options::builder(source, destination)
            .combine_imports(self.combine_imports)
            .handle_errors(!self.no_handle_errors)
            .generate_schema(self.schema)
            .generator(self.generator.into())
            .http_module(self.http_module.into());

        if !self.files.is_empty() {
            builder = builder.files(self.files.clone());
        }
        if !self.controller_base_names.is_empty() {
            builder = builder.controller_base_names(self.controller_base_names.clone());
        }
        if let Some(api_path) = &self.api_path {
            builder = builder.api_relative_path(api_path.as_str());
        }
        if let Some(schema_path) = &self.schema_path {
            builder = builder.schema_path(schema_path.as_str());
        }

        builder.build().context("invalid generation options")
    }
}

//! Generate command implementation.
//!
//! Scans the source modules, renders the models, service, index and
//! optional schema, then syncs the result into the destination directory.
//! Unchanged files are left alone and stale top-level files are removed.

use crate::cli::InputArgs;
use crate::formatters::format_output;
use anyhow::{Context, Result};
use modelgen_codegen::CodeGenerator;
use modelgen_core::Options;
use modelgen_core::cli::{ExitCode, OutputFormat};
use modelgen_files::FilesBuilder;
use modelgen_introspector::Introspector;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// Result of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    /// Emission dialect
    pub generator: String,
    /// Models and enums discovered
    pub models: usize,
    /// Controllers found
    pub controllers: usize,
    /// Operations across all controllers
    pub operations: usize,
    /// Modules that failed to load
    pub skipped_modules: Vec<String>,
    /// Files written
    pub written: Vec<String>,
    /// Files already up to date
    pub unchanged: usize,
    /// Stale files removed
    pub deleted: Vec<String>,
    /// Destination directory
    pub destination: String,
    /// Wall-clock duration of the run
    pub elapsed_seconds: f64,
}

/// Runs generation for resolved options.
///
/// # Errors
///
/// Returns an error if the source cannot be scanned, rendering fails,
/// or the destination cannot be written.
pub fn execute(options: &Options) -> Result<GenerationSummary> {
    let started = Instant::now();

    let scan = Introspector::new(options)
        .scan()
        .context("failed to scan source modules")?;

    let code = CodeGenerator::new(options)
        .context("failed to create code generator")?
        .generate(&scan)
        .context("failed to generate code")?;
    info!("Rendered {} files", code.file_count());

    let destination = options.destination_dir()?;
    let report = FilesBuilder::from_generated_code(code)
        .build()
        .context("generated an invalid output path")?
        .sync_to(&destination)
        .with_context(|| format!("failed to write to {}", destination.display()))?;

    Ok(GenerationSummary {
        generator: options.generator.to_string(),
        models: scan.models.len(),
        controllers: scan.controllers.len(),
        operations: scan.operations().count(),
        skipped_modules: scan.skipped.iter().map(|s| s.origin.clone()).collect(),
        unchanged: report.unchanged.len(),
        written: report.written,
        deleted: report.deleted,
        destination: report.destination.display().to_string(),
        elapsed_seconds: started.elapsed().as_secs_f64(),
    })
}

/// Runs the generate command.
///
/// # Errors
///
/// Returns an error if the options are invalid or generation fails.
pub fn run(input: &InputArgs, output_format: OutputFormat) -> Result<ExitCode> {
    let options = input.to_options()?;
    let summary = execute(&options)?;

    info!(
        "Generated {} models into {} in {:.2}s",
        summary.models, summary.destination, summary.elapsed_seconds
    );

    let formatted = format_output(&summary, output_format)?;
    println!("{formatted}");

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MODULE: &str = r#"{
        "module": "Acme.Client",
        "types": [
            { "name": "Widget", "namespace": "Acme",
              "properties": [ { "name": "Id", "type": "int" } ] },
            { "name": "WidgetController", "namespace": "Acme", "base": "ApiController",
              "methods": [
                  { "name": "GetWidget", "parameters": [ { "name": "id", "type": "int" } ],
                    "returns": "Acme.Widget" }
              ] }
        ]
    }"#;

    fn options(temp: &TempDir) -> Options {
        let source = temp.path().join("meta");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("acme.client.json"), MODULE).unwrap();
        Options::builder(source, temp.path().join("out"))
            .api_relative_path("/api")
            .build()
            .unwrap()
    }

    #[test]
    fn test_execute_writes_and_reports() {
        let temp = TempDir::new().unwrap();
        let summary = execute(&options(&temp)).unwrap();

        assert_eq!(summary.generator, "angular");
        assert_eq!(summary.models, 1);
        assert_eq!(summary.controllers, 1);
        assert_eq!(summary.operations, 1);
        assert!(summary.skipped_modules.is_empty());
        assert_eq!(summary.written, vec!["DataService.ts", "Widget.ts", "index.ts"]);
        assert_eq!(summary.unchanged, 0);
        assert!(temp.path().join("out/Widget.ts").is_file());
    }

    #[test]
    fn test_second_run_is_unchanged() {
        let temp = TempDir::new().unwrap();
        let options = options(&temp);
        execute(&options).unwrap();

        let summary = execute(&options).unwrap();
        assert!(summary.written.is_empty());
        assert_eq!(summary.unchanged, 3);
        assert!(summary.deleted.is_empty());
    }

    #[test]
    fn test_missing_source_is_config_error() {
        let temp = TempDir::new().unwrap();
        let options = Options::builder(temp.path().join("absent"), temp.path().join("out"))
            .build()
            .unwrap();
        let err = execute(&options).unwrap_err();
        let core = err.downcast_ref::<modelgen_core::Error>().unwrap();
        assert_eq!(ExitCode::for_error(core), ExitCode::INVALID_INPUT);
    }
}

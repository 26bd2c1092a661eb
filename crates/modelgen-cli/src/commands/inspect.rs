//! Inspect command implementation.
//!
//! Runs loading, controller extraction and discovery, and prints what a
//! `generate` run would work from. Nothing is written.

use crate::cli::InputArgs;
use crate::formatters::format_output;
use anyhow::{Context, Result};
use modelgen_core::cli::{ExitCode, OutputFormat};
use modelgen_core::{HttpVerb, Operation, Options, TypeRegistry};
use modelgen_introspector::{Introspector, ScanResult};
use serde::Serialize;

/// Discovered shape of the source modules.
#[derive(Debug, Clone, Serialize)]
pub struct InspectionReport {
    /// Source directory
    pub source: String,
    /// Loaded module names
    pub modules: Vec<String>,
    /// Modules that failed to load
    pub skipped: Vec<SkippedReport>,
    /// Controllers with their operations
    pub controllers: Vec<ControllerReport>,
    /// Qualified names of the discovered models
    pub models: Vec<String>,
}

/// A module excluded from the run.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedReport {
    /// File or module name
    pub origin: String,
    /// Failure message
    pub reason: String,
}

/// One controller.
#[derive(Debug, Clone, Serialize)]
pub struct ControllerReport {
    /// Type name
    pub name: String,
    /// URL group
    pub group: String,
    /// Operations in declaration order
    pub operations: Vec<OperationReport>,
}

/// One operation, with types rendered as written in the metadata.
#[derive(Debug, Clone, Serialize)]
pub struct OperationReport {
    /// Method name
    pub name: String,
    /// Verb; `None` means the operation is not emitted
    pub verb: Option<HttpVerb>,
    /// `name: type` pairs
    pub parameters: Vec<String>,
    /// Return type, `None` for void
    pub returns: Option<String>,
}

impl OperationReport {
    fn new(registry: &TypeRegistry, operation: &Operation) -> Self {
        Self {
            name: operation.name.clone(),
            verb: operation.verb,
            parameters: operation
                .parameters
                .iter()
                .map(|p| format!("{}: {}", p.name, registry.display(&p.ty)))
                .collect(),
            returns: operation.returns.as_ref().map(|ty| registry.display(ty)),
        }
    }
}

impl InspectionReport {
    /// Builds the report from a scan.
    #[must_use]
    pub fn new(source: String, scan: &ScanResult) -> Self {
        let registry = &scan.registry;
        Self {
            source,
            modules: scan.modules.iter().map(ToString::to_string).collect(),
            skipped: scan
                .skipped
                .iter()
                .map(|s| SkippedReport {
                    origin: s.origin.clone(),
                    reason: s.reason.clone(),
                })
                .collect(),
            controllers: scan
                .controllers
                .iter()
                .map(|c| ControllerReport {
                    name: c.name.clone(),
                    group: c.group.clone(),
                    operations: c
                        .operations
                        .iter()
                        .map(|o| OperationReport::new(registry, o))
                        .collect(),
                })
                .collect(),
            models: scan
                .models
                .sorted(registry)
                .into_iter()
                .map(|id| registry.get(id).qualified_name())
                .collect(),
        }
    }
}

/// Scans the source modules described by `options`.
///
/// # Errors
///
/// Returns an error if the source directory cannot be resolved or listed.
pub fn execute(options: &Options) -> Result<InspectionReport> {
    let source = options.source_dir()?;
    let scan = Introspector::new(options)
        .scan()
        .context("failed to scan source modules")?;
    Ok(InspectionReport::new(source.display().to_string(), &scan))
}

/// Runs the inspect command.
///
/// # Errors
///
/// Returns an error if the options are invalid or the scan fails.
pub fn run(input: &InputArgs, output_format: OutputFormat) -> Result<ExitCode> {
    let options = input.to_options()?;
    let report = execute(&options)?;

    let formatted = format_output(&report, output_format)?;
    println!("{formatted}");

    Ok(ExitCode::SUCCESS)
}

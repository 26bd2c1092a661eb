//! Metadata introspection and model discovery.
//!
//! Loads metadata modules from the source directory, extracts controllers
//! and their operations, and discovers the closed set of models reachable
//! from those operations.
//!
//! # Examples
//!
//! ```no_run
//! use modelgen_core::Options;
//! use modelgen_introspector::Introspector;
//!
//! let options = Options::builder("./metadata", "./generated").build()?;
//! let scan = Introspector::new(&options).scan()?;
//! println!("Found {} models", scan.models.len());
//! # Ok::<(), modelgen_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod controllers;
mod discovery;
mod document;
mod glob;
mod loader;

pub use controllers::{expand_parameters, find_controllers};
pub use discovery::Discovery;
pub use document::{
    ConstantDocument, MethodDocument, ModuleDocument, ParameterDocument, PropertyDocument,
    TypeDocument, ValueDocument,
};
pub use glob::{FilePattern, find_module_files};
pub use loader::{LoadedModules, ModuleLoader, SkippedModule, load_directory};

use modelgen_core::{Controller, ModelSet, ModuleName, Operation, Options, Result, TypeRegistry};

/// Everything a generation run needs from the source modules.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// All declared types
    pub registry: TypeRegistry,
    /// Loaded module names
    pub modules: Vec<ModuleName>,
    /// Modules excluded from the run
    pub skipped: Vec<SkippedModule>,
    /// Controllers, sorted by name
    pub controllers: Vec<Controller>,
    /// Discovered models and enums
    pub models: ModelSet,
}

impl ScanResult {
    /// Iterates every operation of every controller.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.controllers.iter().flat_map(|c| &c.operations)
    }
}

/// Runs loading, controller extraction and discovery.
#[derive(Debug, Clone, Copy)]
pub struct Introspector<'a> {
    options: &'a Options,
}

impl<'a> Introspector<'a> {
    /// Creates an introspector for a set of options.
    #[must_use]
    pub const fn new(options: &'a Options) -> Self {
        Self { options }
    }

    /// Scans the source directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the source directory cannot be resolved or
    /// listed. Individual modules that fail to load are skipped.
    pub fn scan(&self) -> Result<ScanResult> {
        let source = self.options.source_dir()?;
        tracing::info!("Scanning for models in {}", source.display());
        let loaded = load_directory(&source, &self.options.files)?;
        Ok(self.scan_modules(loaded))
    }

    /// Runs controller extraction and discovery over loaded modules.
    #[must_use]
    pub fn scan_modules(&self, loaded: LoadedModules) -> ScanResult {
        let controllers = find_controllers(&loaded.registry, &self.options.controller_base_names);
        let models = Discovery::new(&loaded.registry)
            .discover(controllers.iter().flat_map(|c| &c.operations));

        tracing::info!(
            "Found {} models in {} controllers",
            models.len(),
            controllers.len()
        );

        ScanResult {
            registry: loaded.registry,
            modules: loaded.modules,
            skipped: loaded.skipped,
            controllers,
            models,
        }
    }
}

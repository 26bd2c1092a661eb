//! Generation orchestration.
//!
//! [`CodeGenerator`] turns a [`ScanResult`] into the full set of artifacts:
//! one file per model, the data service, the `index.ts` barrel and, when
//! enabled, the schema manifest. The emission dialect is chosen once from
//! the options and used for every model and the service.
//!
//! # Examples
//!
//! ```no_run
//! use modelgen_codegen::CodeGenerator;
//! use modelgen_core::Options;
//! use modelgen_introspector::Introspector;
//!
//! let options = Options::builder("./metadata", "./generated")
//!     .api_relative_path("api")
//!     .build()?;
//! let scan = Introspector::new(&options).scan()?;
//!
//! let code = CodeGenerator::new(&options)?.generate(&scan)?;
//! println!("Generated {} files", code.file_count());
//! # Ok::<(), modelgen_core::Error>(())
//! ```

use crate::angular::AngularDialect;
use crate::common::{EnumContext, Facade, GeneratedCode, GeneratedFile, ModelView};
use crate::react::ReactDialect;
use crate::schema::render_schema;
use crate::template_engine::TemplateEngine;
use modelgen_core::{GeneratorKind, Options, Result, TypeKind, TypeMapper};
use modelgen_introspector::ScanResult;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Name of the generated data service.
pub const SERVICE_NAME: &str = "DataService";

/// Name of the generated barrel file, without extension.
pub const INDEX_NAME: &str = "index";

/// Extension of every generated TypeScript file.
pub const EXTENSION: &str = "ts";

/// An emission dialect: how models and the service are rendered.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Renders one model class.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if the template fails.
    fn render_model(&self, engine: &TemplateEngine<'_>, view: &ModelView<'_>) -> Result<String>;

    /// Renders the data service.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if the template fails.
    fn render_service(
        &self,
        engine: &TemplateEngine<'_>,
        facade: &Facade,
        api_relative_path: &str,
    ) -> Result<String>;
}

#[derive(Serialize)]
struct IndexContext<'n> {
    entries: &'n [String],
}

/// Generator for one run's artifacts.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`.
#[derive(Debug)]
pub struct CodeGenerator<'a> {
    engine: TemplateEngine<'a>,
    dialect: Box<dyn Dialect>,
    api_relative_path: Option<String>,
    schema_path: Option<String>,
}

impl CodeGenerator<'_> {
    /// Creates a generator for the given options.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if a built-in template fails to parse.
    pub fn new(options: &Options) -> Result<Self> {
        let dialect: Box<dyn Dialect> = match options.generator {
            GeneratorKind::Angular => Box::new(AngularDialect::new(options)),
            GeneratorKind::React => Box::new(ReactDialect::new(options)),
        };

        Ok(Self {
            engine: TemplateEngine::new()?,
            dialect,
            api_relative_path: options
                .api_relative_path()
                .map(|path| path.trim_end_matches('/').to_string()),
            schema_path: options.generate_schema.then(|| {
                options
                    .schema_path
                    .replace('\\', "/")
                    .trim_start_matches("./")
                    .to_string()
            }),
        })
    }

    /// Generates every artifact for a scan.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if a template fails, or
    /// `SchemaClosureDiverged` if the schema manifest does not converge.
    pub fn generate(&self, scan: &ScanResult) -> Result<GeneratedCode> {
        let registry = &scan.registry;
        let mapper = TypeMapper::new(registry);
        let mut code = GeneratedCode::new();
        let mut entries = Vec::with_capacity(scan.models.len() + 1);

        let mut taken: HashSet<String> = [INDEX_NAME, SERVICE_NAME]
            .iter()
            .map(|name| name.to_lowercase())
            .collect();

        for id in scan.models.sorted(registry) {
            let def = registry.get(id);
            if !taken.insert(def.name.to_lowercase()) {
                tracing::warn!(
                    "Skipping model '{}': its file name collides with another generated file",
                    def.qualified_name()
                );
                continue;
            }

            let content = if def.kind == TypeKind::Enum {
                self.engine.render("common/enum", &EnumContext::new(def))?
            } else {
                let view = ModelView::new(&mapper, id);
                self.dialect.render_model(&self.engine, &view)?
            };
            code.add_file(GeneratedFile {
                path: format!("{}.{EXTENSION}", def.name),
                content,
            });
            tracing::debug!("Generated {}.{EXTENSION}", def.name);
            entries.push(def.name.clone());
        }

        if let Some(api_relative_path) = &self.api_relative_path {
            let facade = Facade::build(&mapper, &scan.controllers);
            let content = self
                .dialect
                .render_service(&self.engine, &facade, api_relative_path)?;
            code.add_file(GeneratedFile {
                path: format!("{SERVICE_NAME}.{EXTENSION}"),
                content,
            });
            tracing::info!(
                "Generated a data service with {} controllers and {} methods",
                facade.groups.len(),
                facade.method_count()
            );
            entries.push(SERVICE_NAME.to_string());
        }

        entries.sort_unstable();
        let index = self
            .engine
            .render("common/index", &IndexContext { entries: &entries })?;
        code.add_file(GeneratedFile {
            path: format!("{INDEX_NAME}.{EXTENSION}"),
            content: index,
        });
        tracing::debug!("Generated {INDEX_NAME}.{EXTENSION}");

        if let Some(schema_path) = &self.schema_path {
            let content = render_schema(registry, &scan.models)?;
            code.add_file(GeneratedFile {
                path: schema_path.clone(),
                content,
            });
            tracing::debug!("Generated {schema_path}");
        }

        tracing::info!("Generated {} files", code.file_count());
        Ok(code)
    }
}

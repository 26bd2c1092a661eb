//! Generation options.
//!
//! [`Options`] is the single configuration value for a generation run. It is
//! built once (from a settings file or from CLI arguments) and then passed by
//! reference into discovery and emission; nothing reads configuration from
//! process-wide state.
//!
//! # Examples
//!
//! ```
//! use modelgen_core::{GeneratorKind, Options};
//!
//! let options = Options::builder("./bin", "../app/models/generated")
//!     .api_relative_path("api/")
//!     .combine_imports(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.api_relative_path(), Some("api"));
//! assert_eq!(options.generator, GeneratorKind::Angular);
//! assert_eq!(options.files, vec!["*.client.json".to_string()]);
//! ```

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default glob selecting metadata modules inside `source`.
pub const DEFAULT_FILE_PATTERN: &str = "*.client.json";

/// Default controller base type name.
pub const DEFAULT_CONTROLLER_BASE: &str = "ApiController";

/// Default schema manifest path, relative to the destination.
pub const DEFAULT_SCHEMA_PATH: &str = "./Schema.json";

/// Emission dialect.
///
/// # Examples
///
/// ```
/// use modelgen_core::GeneratorKind;
///
/// let kind: GeneratorKind = "react".parse().unwrap();
/// assert_eq!(kind, GeneratorKind::React);
/// assert_eq!(GeneratorKind::default(), GeneratorKind::Angular);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeneratorKind {
    /// Classes with hydrating constructors and an Observable-based service
    #[default]
    Angular,
    /// Interfaces with `_fromJsonObj` functions and a Promise-based service
    React,
}

impl GeneratorKind {
    /// Returns the string representation of the dialect.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Angular => "angular",
            Self::React => "react",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "angular" | "" => Ok(Self::Angular),
            "react" => Ok(Self::React),
            _ => Err(Error::InvalidArgument(format!(
                "invalid generator: '{s}' (expected: angular or react)"
            ))),
        }
    }
}

/// HTTP module used by the Angular service.
///
/// # Examples
///
/// ```
/// use modelgen_core::HttpModuleKind;
///
/// let kind: HttpModuleKind = "HttpModule".parse().unwrap();
/// assert_eq!(kind, HttpModuleKind::Http);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpModuleKind {
    /// `HttpClient` from `@angular/common/http`
    #[default]
    HttpClient,
    /// Legacy `Http` from `@angular/http`
    Http,
}

impl FromStr for HttpModuleKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "httpclientmodule" | "httpclient" | "client" | "" => Ok(Self::HttpClient),
            "httpmodule" | "http" | "legacy" => Ok(Self::Http),
            _ => Err(Error::InvalidArgument(format!(
                "invalid http module: '{s}' (expected: HttpClientModule or HttpModule)"
            ))),
        }
    }
}

/// Options for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Directory scanned for metadata modules
    pub source: PathBuf,
    /// Directory that receives generated artifacts
    pub destination: PathBuf,
    /// Glob patterns selecting module files inside `source`
    pub files: Vec<String>,
    /// Base type names that mark a class as a controller
    pub controller_base_names: Vec<String>,
    api_relative_path: Option<String>,
    /// Emit one barrel import instead of per-model imports
    pub combine_imports: bool,
    /// Emit a logging error handler in the Angular service
    pub handle_errors: bool,
    /// Emit the schema manifest
    pub generate_schema: bool,
    /// Schema manifest path, relative to `destination`
    pub schema_path: String,
    /// Emission dialect
    pub generator: GeneratorKind,
    /// HTTP module for the Angular service
    pub http_module: HttpModuleKind,
}

impl Options {
    /// Creates a builder with the two required fields.
    #[must_use]
    pub fn builder(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> OptionsBuilder {
        OptionsBuilder::new(source, destination)
    }

    /// Loads options from a settings file.
    ///
    /// JSON is the default format; a `.toml` extension selects TOML.
    ///
    /// # Errors
    ///
    /// Returns `SettingsNotFound` if the file does not exist,
    /// `SerializationError` if it cannot be parsed and `ConfigError` if
    /// required fields are missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_core::Options;
    ///
    /// let err = Options::from_settings_file("does-not-exist.json").unwrap_err();
    /// assert!(err.is_config_error());
    /// ```
    pub fn from_settings_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::SettingsNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|e| Error::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let settings = if is_toml {
            Settings::from_toml(&contents)?
        } else {
            Settings::from_json(&contents)?
        };

        tracing::debug!("Loaded settings from {}", path.display());
        settings.into_options()
    }

    /// Returns the API base path, without a trailing slash.
    ///
    /// `None` disables façade generation.
    #[must_use]
    pub fn api_relative_path(&self) -> Option<&str> {
        self.api_relative_path.as_deref()
    }

    /// Resolves `source` against the home and current directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn source_dir(&self) -> Result<PathBuf> {
        resolve_path(&self.source)
    }

    /// Resolves `destination` against the home and current directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn destination_dir(&self) -> Result<PathBuf> {
        resolve_path(&self.destination)
    }

    fn validate(&self) -> Result<()> {
        if self.source.as_os_str().is_empty() {
            return Err(Error::ConfigError {
                message: "Source is null or empty in options.".to_string(),
            });
        }
        if self.destination.as_os_str().is_empty() {
            return Err(Error::ConfigError {
                message: "Destination is null or empty in options.".to_string(),
            });
        }
        if self.generate_schema
            && !Path::new(&self.schema_path)
                .extension()
                .is_some_and(|ext| ext == "json")
        {
            return Err(Error::ConfigError {
                message: format!(
                    "SchemaPath '{}' is not the expected format. Example: './Schema.json'",
                    self.schema_path
                ),
            });
        }
        if self.generate_schema && !is_relative_inside(&self.schema_path) {
            return Err(Error::ConfigError {
                message: format!(
                    "SchemaPath '{}' must be relative to the destination and stay inside it.",
                    self.schema_path
                ),
            });
        }
        Ok(())
    }
}

/// `true` for a relative path with no `..` component and no drive prefix.
fn is_relative_inside(path: &str) -> bool {
    let normalized = path.replace('\\', "/");
    !normalized.starts_with('/')
        && !normalized.contains(':')
        && normalized.split('/').all(|component| component != "..")
}

/// Builder for [`Options`].
///
/// # Examples
///
/// ```
/// use modelgen_core::{GeneratorKind, Options};
///
/// let options = Options::builder("src", "out")
///     .generator(GeneratorKind::React)
///     .files(vec!["*.json".to_string()])
///     .build()
///     .unwrap();
///
/// assert_eq!(options.generator, GeneratorKind::React);
/// ```
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    /// Creates a builder with all defaults applied.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            options: Options {
                source: source.into(),
                destination: destination.into(),
                files: vec![DEFAULT_FILE_PATTERN.to_string()],
                controller_base_names: vec![DEFAULT_CONTROLLER_BASE.to_string()],
                api_relative_path: None,
                combine_imports: false,
                handle_errors: true,
                generate_schema: false,
                schema_path: DEFAULT_SCHEMA_PATH.to_string(),
                generator: GeneratorKind::default(),
                http_module: HttpModuleKind::default(),
            },
        }
    }

    /// Sets the module glob patterns. An empty list keeps the default.
    #[must_use]
    pub fn files(mut self, files: Vec<String>) -> Self {
        if !files.is_empty() {
            self.options.files = files;
        }
        self
    }

    /// Sets the controller base names. An empty list keeps the default.
    #[must_use]
    pub fn controller_base_names(mut self, names: Vec<String>) -> Self {
        if !names.is_empty() {
            self.options.controller_base_names = names;
        }
        self
    }

    /// Sets the API base path. Blank values disable the façade.
    #[must_use]
    pub fn api_relative_path(mut self, path: impl Into<String>) -> Self {
        let path: String = path.into();
        let trimmed = path.trim().trim_end_matches('/');
        self.options.api_relative_path = if path.trim().is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Sets barrel imports.
    #[must_use]
    pub const fn combine_imports(mut self, combine: bool) -> Self {
        self.options.combine_imports = combine;
        self
    }

    /// Sets the error handler style.
    #[must_use]
    pub const fn handle_errors(mut self, handle: bool) -> Self {
        self.options.handle_errors = handle;
        self
    }

    /// Enables the schema manifest.
    #[must_use]
    pub const fn generate_schema(mut self, generate: bool) -> Self {
        self.options.generate_schema = generate;
        self
    }

    /// Sets the schema manifest path. Blank values keep the default.
    #[must_use]
    pub fn schema_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        if !path.trim().is_empty() {
            self.options.schema_path = path;
        }
        self
    }

    /// Sets the emission dialect.
    #[must_use]
    pub const fn generator(mut self, generator: GeneratorKind) -> Self {
        self.options.generator = generator;
        self
    }

    /// Sets the Angular HTTP module.
    #[must_use]
    pub const fn http_module(mut self, module: HttpModuleKind) -> Self {
        self.options.http_module = module;
        self
    }

    /// Validates and returns the options.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `source` or `destination` is empty, or if
    /// the schema path does not end in `.json` while the schema is enabled.
    pub fn build(self) -> Result<Options> {
        self.options.validate()?;
        Ok(self.options)
    }
}

/// On-disk settings document.
///
/// Every field is optional; defaults are applied by [`Settings::into_options`].
/// Keys are camelCase, with the legacy PascalCase spellings accepted as
/// aliases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Directory scanned for modules
    #[serde(alias = "Source")]
    pub source: Option<String>,
    /// Output directory
    #[serde(alias = "Destination")]
    pub destination: Option<String>,
    /// Module glob patterns
    #[serde(alias = "Files")]
    pub files: Option<Vec<String>>,
    /// Controller base names
    #[serde(alias = "ControllerBaseClassNames", alias = "controllerBaseClassNames")]
    pub controller_base_names: Option<Vec<String>>,
    /// API base path
    #[serde(alias = "ApiRelativePath")]
    pub api_relative_path: Option<String>,
    /// Barrel imports
    #[serde(alias = "CombineImports")]
    pub combine_imports: Option<bool>,
    /// Logging error handler
    #[serde(alias = "HandleErrors")]
    pub handle_errors: Option<bool>,
    /// Schema manifest switch
    #[serde(alias = "GenerateSchemaJson", alias = "generateSchemaJson")]
    pub generate_schema: Option<bool>,
    /// Schema manifest path
    #[serde(alias = "SchemaFilePath", alias = "schemaFilePath")]
    pub schema_path: Option<String>,
    /// Emission dialect
    #[serde(alias = "Generator", alias = "generator")]
    pub generator_kind: Option<String>,
    /// Angular HTTP module
    #[serde(alias = "HttpModule")]
    pub http_module: Option<String>,
}

impl Settings {
    /// Parses a JSON settings document.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` for malformed JSON.
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| Error::SerializationError {
            message: format!("Failed to parse json settings: {e}"),
            source: Some(e),
        })
    }

    /// Parses a TOML settings document.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` for malformed TOML.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::SerializationError {
            message: format!("Failed to parse toml settings: {e}"),
            source: None,
        })
    }

    /// Applies defaults and validates.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `source` or `destination` is missing, and
    /// `InvalidArgument` for an unknown generator or HTTP module name.
    pub fn into_options(self) -> Result<Options> {
        let source = self.source.filter(|s| !s.trim().is_empty()).ok_or_else(|| {
            Error::ConfigError {
                message: "Source is null or empty in options.".to_string(),
            }
        })?;
        let destination = self
            .destination
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| Error::ConfigError {
                message: "Destination is null or empty in options.".to_string(),
            })?;

        let mut builder = Options::builder(source, destination)
            .files(self.files.unwrap_or_default())
            .controller_base_names(self.controller_base_names.unwrap_or_default())
            .combine_imports(self.combine_imports.unwrap_or(false))
            .handle_errors(self.handle_errors.unwrap_or(true))
            .generate_schema(self.generate_schema.unwrap_or(false))
            .schema_path(self.schema_path.unwrap_or_default());

        if let Some(path) = self.api_relative_path {
            builder = builder.api_relative_path(path);
        }
        if let Some(kind) = self.generator_kind {
            builder = builder.generator(kind.parse()?);
        }
        if let Some(module) = self.http_module {
            builder = builder.http_module(module.parse()?);
        }

        builder.build()
    }
}

/// Expands a leading `~` and makes the path absolute.
fn resolve_path(path: &Path) -> Result<PathBuf> {
    let expanded = if let Ok(rest) = path.strip_prefix("~") {
        match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        }
    } else {
        path.to_path_buf()
    };

    if expanded.is_absolute() {
        return Ok(expanded);
    }

    let cwd = std::env::current_dir().map_err(|e| Error::IoError {
        path: ".".to_string(),
        source: e,
    })?;
    Ok(cwd.join(expanded))
}

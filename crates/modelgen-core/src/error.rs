//! Error types for modelgen.
//!
//! One error hierarchy is shared by the metadata, discovery and code
//! generation crates. Each variant carries enough context to be reported
//! to the operator without a backtrace.
//!
//! # Examples
//!
//! ```
//! use modelgen_core::{Error, Result};
//!
//! fn require_source(source: &str) -> Result<()> {
//!     if source.is_empty() {
//!         return Err(Error::ConfigError {
//!             message: "source is null or empty in options".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_source("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use thiserror::Error;

/// Main error type for modelgen.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    ///
    /// Raised when required options are missing or contradictory. Fatal:
    /// no output is produced.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// The settings file named on the command line does not exist.
    #[error("Settings file {path} does not exist")]
    SettingsNotFound {
        /// Path that was looked up
        path: String,
    },

    /// Serialization/deserialization error.
    ///
    /// Raised when a settings file or metadata document cannot be parsed,
    /// or when the schema manifest cannot be serialized.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A metadata module could not be loaded.
    ///
    /// Recovered locally by the introspector: the module is excluded and
    /// the run continues.
    #[error("Failed to load module '{module}': {message}")]
    ModuleLoadError {
        /// Path or name of the module
        module: String,
        /// Description of the failure
        message: String,
    },

    /// A type expression in a metadata document is malformed.
    #[error("Invalid type expression '{expression}': {reason}")]
    InvalidTypeExpression {
        /// The offending expression
        expression: String,
        /// What the parser expected
        reason: String,
    },

    /// Template registration or rendering failed.
    #[error("Failed to render {artifact}: {message}")]
    RenderError {
        /// Artifact or template name
        artifact: String,
        /// Description of the failure
        message: String,
    },

    /// The schema manifest closure did not converge.
    ///
    /// Indicates a modeling cycle the generator cannot resolve. Fatal.
    #[error("Schema generator is caught in a loop after {passes} passes")]
    SchemaClosureDiverged {
        /// Number of expansion passes performed
        passes: usize,
    },

    /// Filesystem error while reading inputs.
    #[error("I/O error at {path}: {source}")]
    IoError {
        /// Path being accessed
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid argument error.
    ///
    /// Raised when CLI arguments or function parameters are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns `true` if this is a configuration error.
    ///
    /// Missing settings files and unparseable settings count as
    /// configuration errors as well, since all three abort before any
    /// output is attempted.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_core::Error;
    ///
    /// let err = Error::SettingsNotFound {
    ///     path: "missing.json".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigError { .. }
                | Self::SettingsNotFound { .. }
                | Self::SerializationError { .. }
                | Self::InvalidArgument(_)
        )
    }

    /// Returns `true` if this is a module load error.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_core::Error;
    ///
    /// let err = Error::ModuleLoadError {
    ///     module: "Acme.client.json".to_string(),
    ///     message: "truncated".to_string(),
    /// };
    /// assert!(err.is_module_error());
    /// ```
    #[must_use]
    pub const fn is_module_error(&self) -> bool {
        matches!(
            self,
            Self::ModuleLoadError { .. } | Self::InvalidTypeExpression { .. }
        )
    }

    /// Returns `true` if this is a rendering error.
    #[must_use]
    pub const fn is_render_error(&self) -> bool {
        matches!(self, Self::RenderError { .. })
    }

    /// Returns `true` if the schema closure failed to converge.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_core::Error;
    ///
    /// let err = Error::SchemaClosureDiverged { passes: 101 };
    /// assert!(err.is_schema_divergence());
    /// ```
    #[must_use]
    pub const fn is_schema_divergence(&self) -> bool {
        matches!(self, Self::SchemaClosureDiverged { .. })
    }
}

/// Result type alias for modelgen operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_detection() {
        let err = Error::ConfigError {
            message: "Destination is null or empty".to_string(),
        };
        assert!(err.is_config_error());
        assert!(!err.is_module_error());
    }

    #[test]
    fn test_serialization_error_is_config_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::SerializationError {
            message: "Failed to parse settings".to_string(),
            source: Some(source),
        };
        assert!(err.is_config_error());
    }

    #[test]
    fn test_module_error_detection() {
        let err = Error::InvalidTypeExpression {
            expression: "List<".to_string(),
            reason: "unexpected end of input".to_string(),
        };
        assert!(err.is_module_error());
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_schema_divergence_display() {
        let err = Error::SchemaClosureDiverged { passes: 101 };
        let display = format!("{err}");
        assert!(display.contains("caught in a loop"));
        assert!(display.contains("101"));
        assert!(err.is_schema_divergence());
    }

    #[test]
    fn test_render_error_display() {
        let err = Error::RenderError {
            artifact: "Widget.ts".to_string(),
            message: "missing field".to_string(),
        };
        assert!(err.is_render_error());
        assert!(format!("{err}").contains("Widget.ts"));
    }
}

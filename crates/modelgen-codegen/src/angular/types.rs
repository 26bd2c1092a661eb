//! Template contexts for the Angular dialect.

use crate::common::{GroupContext, ImportRef, MappedConstant};
use serde::Serialize;

/// Context for `angular/class`.
#[derive(Debug, Clone, Serialize)]
pub struct ClassContext {
    /// Class name
    pub name: String,
    /// Emit `abstract` and no constructor
    pub is_abstract: bool,
    /// Model base class
    pub base: Option<String>,
    /// Import `moment`
    pub uses_moment: bool,
    /// Import from the barrel instead of per file
    pub combine_imports: bool,
    /// Anything precedes the declaration
    pub has_header: bool,
    /// Referenced models
    pub imports: Vec<ImportRef>,
    /// Static readonly members
    pub constants: Vec<MappedConstant>,
    /// Public fields
    pub properties: Vec<FieldContext>,
    /// Constructor statements re-hydrating nested values
    pub hydrations: Vec<String>,
}

/// One public field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldContext {
    /// Field name
    pub name: String,
    /// TypeScript type
    pub type_name: String,
    /// Default value
    pub initializer: Option<String>,
}

/// Context for `angular/service`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceContext {
    /// Use the legacy `Http` module
    pub legacy_http: bool,
    /// Emit the logging error handler
    pub handle_errors: bool,
    /// Import `moment`
    pub uses_moment: bool,
    /// Import from the barrel instead of per file
    pub combine_imports: bool,
    /// Referenced models
    pub imports: Vec<ImportRef>,
    /// Initial value of `apiRelativePath`
    pub api_relative_path: String,
    /// One member per controller
    pub groups: Vec<GroupContext>,
}

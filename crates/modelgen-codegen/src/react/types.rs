//! Template contexts for the React dialect.

use crate::common::{GroupContext, ImportRef};
use serde::Serialize;

/// Context for `react/interface`.
#[derive(Debug, Clone, Serialize)]
pub struct InterfaceContext {
    /// Interface name
    pub name: String,
    /// Model base interface
    pub base: Option<String>,
    /// Import `moment`
    pub uses_moment: bool,
    /// Import from the barrel instead of per file
    pub combine_imports: bool,
    /// Anything precedes the declaration
    pub has_header: bool,
    /// Referenced models
    pub imports: Vec<ImportRef>,
    /// Interface members
    pub properties: Vec<MemberContext>,
    /// Emit the `_fromJsonObj` factory
    pub factory: bool,
    /// Base whose factory runs first
    pub base_factory: Option<String>,
    /// Object-literal entries overriding raw JSON values
    pub segments: Vec<String>,
}

/// One interface member.
#[derive(Debug, Clone, Serialize)]
pub struct MemberContext {
    /// Member name
    pub name: String,
    /// TypeScript type
    pub type_name: String,
}

/// Context for `react/service`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceContext {
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

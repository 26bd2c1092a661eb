//! Metadata document format.
//!
//! One document describes one module: the types it declares with their
//! properties, static fields, enumeration members and public methods. Type
//! references are type expressions and are parsed while the document is
//! deserialized, so a malformed reference fails the whole document.
//!
//! # Examples
//!
//! ```
//! use modelgen_introspector::ModuleDocument;
//!
//! let doc = ModuleDocument::from_json(r#"{
//!     "module": "Acme.Client",
//!     "types": [
//!         { "name": "Widget", "namespace": "Acme.Models", "kind": "class",
//!           "properties": [ { "name": "Id", "type": "System.Int32" } ] }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(doc.module.as_deref(), Some("Acme.Client"));
//! assert_eq!(doc.types[0].properties[0].ty.to_string(), "System.Int32");
//! ```

use modelgen_core::{Error, Result, TypeExpr, TypeKind};
use serde::Deserialize;

/// A metadata module.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDocument {
    /// Module name; defaults to the file stem
    #[serde(default)]
    pub module: Option<String>,
    /// Declared types
    #[serde(default)]
    pub types: Vec<TypeDocument>,
}

impl ModuleDocument {
    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` for malformed JSON or type expressions.
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| Error::SerializationError {
            message: e.to_string(),
            source: Some(e),
        })
    }
}

const fn default_kind() -> TypeKind {
    TypeKind::Class
}

/// A declared type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDocument {
    /// Short name
    pub name: String,
    /// Namespace
    #[serde(default)]
    pub namespace: String,
    /// Declaration kind
    #[serde(default = "default_kind")]
    pub kind: TypeKind,
    /// `abstract` modifier
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Base type
    #[serde(default)]
    pub base: Option<TypeExpr>,
    /// Marker names
    #[serde(default)]
    pub markers: Vec<String>,
    /// Documentation string
    #[serde(default)]
    pub doc: Option<String>,
    /// Instance properties
    #[serde(default)]
    pub properties: Vec<PropertyDocument>,
    /// Static fields
    #[serde(default)]
    pub constants: Vec<ConstantDocument>,
    /// Enumeration members
    #[serde(default)]
    pub values: Vec<ValueDocument>,
    /// Public methods
    #[serde(default)]
    pub methods: Vec<MethodDocument>,
}

/// An instance property.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDocument {
    /// Property name
    pub name: String,
    /// Property type
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    /// Marker names
    #[serde(default)]
    pub markers: Vec<String>,
    /// Documentation string
    #[serde(default)]
    pub doc: Option<String>,
}

/// A static field.
#[derive(Debug, Clone, Deserialize)]
pub struct ConstantDocument {
    /// Field name
    pub name: String,
    /// Field type
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    /// Field value (string, number or boolean)
    pub value: serde_json::Value,
    /// `true` for readonly statics
    #[serde(default)]
    pub readonly: bool,
}

impl ConstantDocument {
    /// Value as plain text, without JSON quoting.
    #[must_use]
    pub fn value_text(&self) -> String {
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// An enumeration member.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueDocument {
    /// Member name
    pub name: String,
    /// Numeric value
    pub value: i64,
}

/// A public method.
#[derive(Debug, Clone, Deserialize)]
pub struct MethodDocument {
    /// Method name
    pub name: String,
    /// Marker names
    #[serde(default)]
    pub markers: Vec<String>,
    /// Parameters in order
    #[serde(default)]
    pub parameters: Vec<ParameterDocument>,
    /// Return type; absent for `void`
    #[serde(default)]
    pub returns: Option<TypeExpr>,
}

/// A method parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct ParameterDocument {
    /// Parameter name
    pub name: String,
    /// Parameter type
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    /// Marker names
    #[serde(default)]
    pub markers: Vec<String>,
}

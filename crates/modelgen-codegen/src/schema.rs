//! Schema manifest.
//!
//! Describes every discovered model and the types its members reference,
//! with documentation strings. Starting from the model set, each pass adds
//! the member types not yet described; a closure that needs more than
//! [`MAX_SCHEMA_PASSES`] passes is an error.

use modelgen_core::{Error, ModelSet, Result, TypeKind, TypeRef, TypeRegistry};
use serde::Serialize;
use std::collections::HashSet;

/// Expansion passes allowed before the closure is declared divergent.
pub const MAX_SCHEMA_PASSES: usize = 100;

/// One described type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaModel {
    /// Canonical type expression
    pub id: String,
    /// Short name
    pub name: String,
    /// Qualified name, with the declaring module for declared types
    pub qualified_name: String,
    /// Constants then properties, inherited ones included
    pub fields: Vec<SchemaField>,
    /// The type is a declared class
    pub is_class: bool,
    /// Documentation
    pub description: Option<String>,
}

/// One member of a described type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaField {
    /// Canonical type expression of the member
    pub id: String,
    /// Member name
    pub name: String,
    /// Documentation
    pub description: Option<String>,
}

/// Builds the closed list of described types.
///
/// # Errors
///
/// Returns `SchemaClosureDiverged` if the closure does not settle within
/// [`MAX_SCHEMA_PASSES`] passes.
pub fn build_schema(registry: &TypeRegistry, models: &ModelSet) -> Result<Vec<SchemaModel>> {
    let mut present = HashSet::new();
    let mut schema = Vec::new();
    let mut frontier: Vec<TypeRef> = models
        .sorted(registry)
        .into_iter()
        .map(TypeRef::declared)
        .collect();
    for ty in &frontier {
        present.insert(registry.display(ty));
    }

    let mut passes = 0;
    loop {
        let mut missing = Vec::new();
        for ty in &frontier {
            let (model, members) = describe(registry, ty);
            for member in members {
                if present.insert(registry.display(&member)) {
                    missing.push(member);
                }
            }
            schema.push(model);
        }

        if missing.is_empty() {
            break;
        }
        if passes == MAX_SCHEMA_PASSES {
            return Err(Error::SchemaClosureDiverged { passes });
        }
        tracing::debug!("Schema pass {}: {} new types", passes + 1, missing.len());
        frontier = missing;
        passes += 1;
    }

    Ok(schema)
}

/// Renders the schema as pretty-printed JSON.
///
/// # Errors
///
/// Returns `SchemaClosureDiverged` from [`build_schema`], or
/// `SerializationError` if the document cannot be serialized.
pub fn render_schema(registry: &TypeRegistry, models: &ModelSet) -> Result<String> {
    let schema = build_schema(registry, models)?;
    serde_json::to_string_pretty(&schema).map_err(|e| Error::SerializationError {
        message: format!("failed to serialize schema: {e}"),
        source: Some(e),
    })
}

fn describe(registry: &TypeRegistry, ty: &TypeRef) -> (SchemaModel, Vec<TypeRef>) {
    let id = registry.display(ty);
    match ty {
        TypeRef::Declared { id: type_id, .. } => {
            let def = registry.get(*type_id);
            let constants = def.constants.iter().map(|c| (&c.name, &c.ty, None));
            let properties = registry
                .all_properties(*type_id)
                .into_iter()
                .map(|p| (&p.name, &p.ty, p.doc.clone()));

            let mut members = Vec::new();
            let fields = constants
                .chain(properties)
                .map(|(name, member, description)| {
                    members.push(member.clone());
                    SchemaField {
                        id: registry.display(member),
                        name: name.clone(),
                        description,
                    }
                })
                .collect();

            let model = SchemaModel {
                id,
                name: def.name.clone(),
                qualified_name: format!("{}, {}", def.qualified_name(), def.module),
                fields,
                is_class: def.kind == TypeKind::Class,
                description: def.doc.clone(),
            };
            (model, members)
        }
        TypeRef::External { .. } | TypeRef::Array(_) => {
            let model = SchemaModel {
                name: short_name(&id).to_string(),
                qualified_name: id.clone(),
                id,
                fields: Vec::new(),
                is_class: false,
                description: None,
            };
            (model, Vec::new())
        }
    }
}

/// Last dotted segment of the generic head.
fn short_name(expr: &str) -> &str {
    let head = expr.split('<').next().unwrap_or(expr);
    let start = head.rfind('.').map_or(0, |dot| dot + 1);
    &expr[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelgen_introspector::{ModuleDocument, ModuleLoader};
    use serde_json::json;

    fn load(types: serde_json::Value) -> TypeRegistry {
        let mut loader = ModuleLoader::new();
        let doc: ModuleDocument = serde_json::from_value(json!({ "types": types })).unwrap();
        loader.add_document("Acme", doc).unwrap();
        loader.load().registry
    }

    fn seed(registry: &TypeRegistry, names: &[&str]) -> ModelSet {
        names
            .iter()
            .map(|name| registry.lookup(name, &"Acme".into()).unwrap())
            .collect()
    }

    fn chain(length: usize) -> TypeRegistry {
        let types: Vec<serde_json::Value> = (0..=length)
            .map(|i| {
                let properties = if i < length {
                    json!([ { "name": "Next", "type": format!("Acme.Link{}", i + 1) } ])
                } else {
                    json!([])
                };
                json!({ "name": format!("Link{i}"), "namespace": "Acme", "kind": "struct",
                        "properties": properties })
            })
            .collect();
        load(serde_json::Value::Array(types))
    }

    #[test]
    fn test_models_then_member_types() {
        let registry = load(json!([
            { "name": "Widget", "namespace": "Acme", "doc": "A widget.",
              "constants": [ { "name": "Max", "type": "int", "value": 4 } ],
              "properties": [
                  { "name": "Name", "type": "string", "doc": "Display name." },
                  { "name": "Size", "type": "int" }
              ] }
        ]));
        let schema = build_schema(&registry, &seed(&registry, &["Acme.Widget"])).unwrap();

        let widget = &schema[0];
        assert_eq!(widget.id, "Acme.Widget");
        assert_eq!(widget.name, "Widget");
        assert_eq!(widget.qualified_name, "Acme.Widget, Acme");
        assert!(widget.is_class);
        assert_eq!(widget.description.as_deref(), Some("A widget."));
        let fields: Vec<&str> = widget.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, vec!["Max", "Name", "Size"]);
        assert_eq!(widget.fields[1].description.as_deref(), Some("Display name."));

        assert_eq!(schema.len(), 3);
        assert!(schema[1..].iter().all(|m| !m.is_class && m.fields.is_empty()));
    }

    #[test]
    fn test_closure_within_pass_limit() {
        let registry = chain(MAX_SCHEMA_PASSES);
        let schema = build_schema(&registry, &seed(&registry, &["Acme.Link0"])).unwrap();
        assert_eq!(schema.len(), MAX_SCHEMA_PASSES + 1);
    }

    #[test]
    fn test_closure_divergence_is_fatal() {
        let registry = chain(MAX_SCHEMA_PASSES + 1);
        let err = build_schema(&registry, &seed(&registry, &["Acme.Link0"])).unwrap_err();
        assert!(err.is_schema_divergence());
    }

    #[test]
    fn test_render_is_pretty_camel_case() {
        let registry = load(json!([ { "name": "Empty", "namespace": "Acme" } ]));
        let rendered = render_schema(&registry, &seed(&registry, &["Acme.Empty"])).unwrap();
        assert!(rendered.contains("\"qualifiedName\": \"Acme.Empty, Acme\""));
        assert!(rendered.contains("\"isClass\": true"));
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("System.Int32"), "Int32");
        assert_eq!(short_name("System.Collections.Generic.List<Acme.Widget>"), "List<Acme.Widget>");
        assert_eq!(short_name("int"), "int");
    }
}

//! Module loading.
//!
//! [`ModuleLoader`] collects metadata documents and builds a single
//! [`TypeRegistry`] from them. A document that cannot be read, parsed or
//! validated is skipped with a warning; the remaining modules still load.
//!
//! Loading happens in two passes so that references across modules
//! resolve regardless of file order: every type is declared first, then
//! members are resolved and attached.
//!
//! # Examples
//!
//! ```
//! use modelgen_introspector::{ModuleDocument, ModuleLoader};
//!
//! let doc = ModuleDocument::from_json(r#"{
//!     "types": [ { "name": "Widget", "namespace": "Acme" } ]
//! }"#).unwrap();
//!
//! let mut loader = ModuleLoader::new();
//! loader.add_document("Acme.Client", doc).unwrap();
//! let loaded = loader.load();
//!
//! assert_eq!(loaded.registry.len(), 1);
//! assert!(loaded.skipped.is_empty());
//! ```

use crate::document::{ModuleDocument, TypeDocument};
use crate::glob::find_module_files;
use modelgen_core::{
    ConstantDef, EnumValue, Error, MarkerSet, MethodDef, ModuleName, ParameterDef, PropertyDef,
    Result, TypeId, TypeRegistry,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A module that was excluded from the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedModule {
    /// File path or module name
    pub origin: String,
    /// Why it was skipped
    pub reason: String,
}

/// Result of loading.
#[derive(Debug, Clone, Default)]
pub struct LoadedModules {
    /// All declared types of all loaded modules
    pub registry: TypeRegistry,
    /// Loaded module names, sorted
    pub modules: Vec<ModuleName>,
    /// Modules that failed to load
    pub skipped: Vec<SkippedModule>,
}

/// Collects documents and builds the registry.
#[derive(Debug, Default)]
pub struct ModuleLoader {
    pending: Vec<(ModuleName, ModuleDocument)>,
    names: HashSet<ModuleName>,
    skipped: Vec<SkippedModule>,
}

impl ModuleLoader {
    /// Creates an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and queues a module file.
    ///
    /// Failures are logged and recorded in [`LoadedModules::skipped`].
    pub fn add_file(&mut self, path: &Path) {
        if let Err(e) = self.try_add_file(path) {
            tracing::warn!("Skipping module {}: {}", path.display(), e);
            self.skipped.push(SkippedModule {
                origin: path.display().to_string(),
                reason: e.to_string(),
            });
        }
    }

    fn try_add_file(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        let document = ModuleDocument::from_json(&contents).map_err(|e| Error::ModuleLoadError {
            module: path.display().to_string(),
            message: e.to_string(),
        })?;
        let fallback = module_name_from_path(path);
        self.add_document(&fallback, document)
    }

    /// Queues an already parsed document.
    ///
    /// `fallback_name` is used when the document does not name its module.
    ///
    /// # Errors
    ///
    /// Returns `ModuleLoadError` if a module with the same name is already
    /// queued or the document declares a type twice.
    pub fn add_document(&mut self, fallback_name: &str, document: ModuleDocument) -> Result<()> {
        let name = ModuleName::new(
            document
                .module
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback_name.to_string()),
        );

        if self.names.contains(&name) {
            return Err(Error::ModuleLoadError {
                module: name.to_string(),
                message: "a module with this name is already loaded".to_string(),
            });
        }

        let mut declared = HashSet::new();
        for ty in &document.types {
            if ty.name.trim().is_empty() {
                return Err(Error::ModuleLoadError {
                    module: name.to_string(),
                    message: "a type has an empty name".to_string(),
                });
            }
            if !declared.insert((ty.namespace.as_str(), ty.name.as_str())) {
                return Err(Error::ModuleLoadError {
                    module: name.to_string(),
                    message: format!("type '{}.{}' is declared twice", ty.namespace, ty.name),
                });
            }
        }

        tracing::debug!("Queued module {} ({} types)", name, document.types.len());
        self.names.insert(name.clone());
        self.pending.push((name, document));
        Ok(())
    }

    /// Builds the registry from every queued document.
    #[must_use]
    pub fn load(self) -> LoadedModules {
        let mut pending = self.pending;
        pending.sort_by(|a, b| a.0.cmp(&b.0));

        let mut registry = TypeRegistry::new();
        let mut declared: Vec<(TypeId, &ModuleName, &TypeDocument)> = Vec::new();

        for (module, document) in &pending {
            for ty in &document.types {
                // Duplicates were rejected when the document was queued.
                if let Ok(id) = registry.declare(module, &ty.namespace, &ty.name, ty.kind) {
                    declared.push((id, module, ty));
                }
            }
        }

        for (id, module, ty) in declared {
            let resolved = resolve_members(&registry, module, ty);
            let def = registry.get_mut(id);
            def.is_abstract = ty.is_abstract;
            def.markers = MarkerSet::from_names(&ty.markers);
            def.doc.clone_from(&ty.doc);
            def.base = resolved.base;
            def.properties = resolved.properties;
            def.constants = resolved.constants;
            def.values = resolved.values;
            def.methods = resolved.methods;
        }

        let modules: Vec<ModuleName> = pending.into_iter().map(|(name, _)| name).collect();
        tracing::debug!(
            "Loaded {} module(s) with {} type(s)",
            modules.len(),
            registry.len()
        );

        LoadedModules {
            registry,
            modules,
            skipped: self.skipped,
        }
    }
}

struct ResolvedMembers {
    base: Option<modelgen_core::TypeRef>,
    properties: Vec<PropertyDef>,
    constants: Vec<ConstantDef>,
    values: Vec<EnumValue>,
    methods: Vec<MethodDef>,
}

fn resolve_members(registry: &TypeRegistry, module: &ModuleName, ty: &TypeDocument) -> ResolvedMembers {
    ResolvedMembers {
        base: ty.base.as_ref().map(|b| registry.resolve(b, module)),
        properties: ty
            .properties
            .iter()
            .map(|p| PropertyDef {
                name: p.name.clone(),
                ty: registry.resolve(&p.ty, module),
                markers: MarkerSet::from_names(&p.markers),
                doc: p.doc.clone(),
            })
            .collect(),
        constants: ty
            .constants
            .iter()
            .map(|c| ConstantDef {
                name: c.name.clone(),
                ty: registry.resolve(&c.ty, module),
                value: c.value_text(),
                readonly: c.readonly,
            })
            .collect(),
        values: ty
            .values
            .iter()
            .map(|v| EnumValue {
                name: v.name.clone(),
                value: v.value,
            })
            .collect(),
        methods: ty
            .methods
            .iter()
            .map(|m| MethodDef {
                name: m.name.clone(),
                markers: MarkerSet::from_names(&m.markers),
                parameters: m
                    .parameters
                    .iter()
                    .map(|p| ParameterDef {
                        name: p.name.clone(),
                        ty: registry.resolve(&p.ty, module),
                        markers: MarkerSet::from_names(&p.markers),
                    })
                    .collect(),
                returns: m
                    .returns
                    .as_ref()
                    .map(|r| registry.resolve(r, module))
                    .filter(|r| !r.is_void()),
            })
            .collect(),
    }
}

/// Module name for a file: the file name without its last extension.
fn module_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned())
}

/// Finds and loads every module in a directory.
///
/// # Errors
///
/// Returns an error only if the directory cannot be listed or a pattern is
/// malformed; individual module failures are recorded as skipped.
pub fn load_directory(dir: &Path, patterns: &[String]) -> Result<LoadedModules> {
    let files: Vec<PathBuf> = find_module_files(dir, patterns)?;
    let mut loader = ModuleLoader::new();
    for file in &files {
        loader.add_file(file);
    }
    Ok(loader.load())
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelgen_core::{Marker, TypeKind, TypeRef};

    fn doc(json: serde_json::Value) -> ModuleDocument {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_cross_module_reference_resolves() {
        let mut loader = ModuleLoader::new();
        loader
            .add_document(
                "Api",
                doc(serde_json::json!({
                    "types": [ { "name": "Order", "namespace": "Acme",
                                 "properties": [ { "name": "Customer", "type": "Shared.Customer" } ] } ]
                })),
            )
            .unwrap();
        loader
            .add_document(
                "Shared",
                doc(serde_json::json!({
                    "types": [ { "name": "Customer", "namespace": "Shared" } ]
                })),
            )
            .unwrap();

        let loaded = loader.load();
        let registry = &loaded.registry;
        let order = registry
            .lookup("Acme.Order", &ModuleName::new("Api"))
            .unwrap();
        let customer = registry
            .lookup("Shared.Customer", &ModuleName::new("Shared"))
            .unwrap();
        assert_eq!(
            registry.get(order).properties[0].ty,
            TypeRef::declared(customer)
        );
        assert_eq!(
            loaded.modules,
            vec![ModuleName::new("Api"), ModuleName::new("Shared")]
        );
    }

    #[test]
    fn test_members_and_markers() {
        let mut loader = ModuleLoader::new();
        loader
            .add_document(
                "Acme",
                doc(serde_json::json!({
                    "types": [ {
                        "name": "Widget", "namespace": "Acme", "abstract": true,
                        "markers": ["TypeScripterIgnoreAttribute", "Serializable"],
                        "properties": [ { "name": "Created", "type": "DateTime", "markers": ["utcDate"] } ],
                        "methods": [ { "name": "Save", "returns": "void" } ]
                    } ]
                })),
            )
            .unwrap();

        let loaded = loader.load();
        let def = loaded.registry.iter().next().unwrap();
        assert!(def.is_abstract);
        assert!(def.has_marker(Marker::Ignore));
        assert!(def.properties[0].markers.contains(Marker::UtcDate));
        assert_eq!(def.methods[0].returns, None);
        assert_eq!(def.kind, TypeKind::Class);
    }

    #[test]
    fn test_duplicate_type_rejects_module() {
        let mut loader = ModuleLoader::new();
        let err = loader
            .add_document(
                "Acme",
                doc(serde_json::json!({
                    "types": [ { "name": "A", "namespace": "X" }, { "name": "A", "namespace": "X" } ]
                })),
            )
            .unwrap_err();
        assert!(err.is_module_error());
        assert!(loader.load().registry.is_empty());
    }

    #[test]
    fn test_duplicate_module_name_rejected() {
        let mut loader = ModuleLoader::new();
        loader
            .add_document("Acme", doc(serde_json::json!({ "types": [] })))
            .unwrap();
        assert!(
            loader
                .add_document("Other", doc(serde_json::json!({ "module": "Acme" })))
                .is_err()
        );
    }

    #[test]
    fn test_bad_file_is_skipped() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("good.client.json"),
            r#"{ "types": [ { "name": "Widget", "namespace": "Acme" } ] }"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("bad.client.json"),
            r#"{ "types": [ { "name": "Broken", "properties": [ { "name": "X", "type": "List<" } ] } ] }"#,
        )
        .unwrap();

        let loaded = load_directory(dir.path(), &["*.client.json".to_string()]).unwrap();
        assert_eq!(loaded.registry.len(), 1);
        assert_eq!(loaded.skipped.len(), 1);
        assert!(loaded.skipped[0].origin.contains("bad.client.json"));
        assert_eq!(loaded.modules, vec![ModuleName::new("good.client")]);
    }
}

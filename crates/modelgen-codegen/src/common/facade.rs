//! Dialect-independent view of the data service.
//!
//! [`Facade::build`] turns controllers into groups of callable methods.
//! Within a group, methods are ordered by name; a name that repeats
//! (case-insensitively) is flagged so the renderer can emit an inline
//! error. Unclassified operations, and operations touching an excluded
//! type, are skipped with a warning.

use crate::common::model::{ImportRef, is_constructible};
use crate::common::typescript::{Construction, combine_uri, with_query};
use modelgen_core::{Controller, HttpVerb, MappedType, Operation, TypeMapper, camelize};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// URL prefix every generated request starts with.
pub const API_PATH_EXPRESSION: &str = "${this.apiRelativePath}";

/// A parameter after mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacadeParameter {
    /// Parameter name
    pub name: String,
    /// TypeScript type
    pub ty: MappedType,
}

/// One callable of the data service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacadeMethod {
    /// Member name (camelCase)
    pub name: String,
    /// Operation name as declared
    pub operation: String,
    /// HTTP verb
    pub verb: HttpVerb,
    /// Parameters in call order
    pub parameters: Vec<FacadeParameter>,
    /// Response type
    pub returns: MappedType,
    /// Model constructor to apply to the response
    pub construction: Option<Construction>,
    /// Request URL template, including the query string
    pub url: String,
    /// Body argument: `, name`, `, null`, or empty for bodiless verbs
    pub body: String,
    /// The name repeats an earlier method of the same group
    pub duplicate: bool,
}

impl FacadeMethod {
    /// `name: type` list for the member signature.
    #[must_use]
    pub fn signature(&self) -> String {
        self.parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty.typescript_name()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One controller's methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacadeGroup {
    /// Member name (camelCase group name)
    pub name: String,
    /// Controller type name
    pub controller: String,
    /// Methods sorted by name
    pub methods: Vec<FacadeMethod>,
}

impl FacadeGroup {
    /// Template context, with `call` rendering each method's HTTP call.
    pub fn context(&self, call: impl Fn(&FacadeMethod) -> String) -> GroupContext {
        GroupContext {
            name: self.name.clone(),
            methods: self
                .methods
                .iter()
                .map(|method| MethodContext {
                    name: method.name.clone(),
                    parameters: method.signature(),
                    return_type: method.returns.typescript_name(),
                    call: call(method),
                    error: method.duplicate.then(|| {
                        format!(
                            "ERROR! The controller '{}' has a duplicate method name: '{}'",
                            self.controller, method.operation
                        )
                    }),
                })
                .collect(),
        }
    }
}

/// Template context for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupContext {
    /// Member name
    pub name: String,
    /// Methods in emission order
    pub methods: Vec<MethodContext>,
}

/// Template context for one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodContext {
    /// Member name
    pub name: String,
    /// Parameter list
    pub parameters: String,
    /// Response type name
    pub return_type: String,
    /// HTTP call after `this.http.`
    pub call: String,
    /// Inline error comment
    pub error: Option<String>,
}

/// The whole data service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facade {
    /// Groups in controller order
    pub groups: Vec<FacadeGroup>,
    /// Models referenced by signatures, sorted by name
    pub imports: Vec<ImportRef>,
    /// Some signature uses a date
    pub uses_moment: bool,
}

impl Facade {
    /// Builds the façade for a list of controllers.
    #[must_use]
    pub fn build(mapper: &TypeMapper<'_>, controllers: &[Controller]) -> Self {
        let mut facade = Self::default();
        let mut imports = BTreeMap::new();

        for controller in controllers {
            let mut operations: Vec<&Operation> = controller.operations.iter().collect();
            operations.sort_by(|a, b| a.name.cmp(&b.name));

            let mut seen = HashSet::new();
            let mut methods = Vec::with_capacity(operations.len());
            for operation in operations {
                let duplicate = !seen.insert(operation.name.to_lowercase());
                let Some(method) = build_method(mapper, controller, operation, duplicate) else {
                    continue;
                };

                for ty in method.parameters.iter().map(|p| &p.ty).chain([&method.returns]) {
                    facade.uses_moment |= ty.requires_date_import();
                    if let Some((id, name)) = ty.model() {
                        imports.insert(
                            name.to_string(),
                            is_constructible(mapper.registry().get(id)),
                        );
                    }
                }
                methods.push(method);
            }

            facade.groups.push(FacadeGroup {
                name: camelize(&controller.group),
                controller: controller.name.clone(),
                methods,
            });
        }

        facade.imports = imports
            .into_iter()
            .map(|(name, constructible)| ImportRef {
                name,
                constructible,
            })
            .collect();
        facade
    }

    /// Number of emitted methods.
    #[must_use]
    pub fn method_count(&self) -> usize {
        self.groups.iter().map(|g| g.methods.len()).sum()
    }
}

fn build_method(
    mapper: &TypeMapper<'_>,
    controller: &Controller,
    operation: &Operation,
    duplicate: bool,
) -> Option<FacadeMethod> {
    let verb = operation.verb?;

    let parameters: Vec<FacadeParameter> = operation
        .parameters
        .iter()
        .map(|p| FacadeParameter {
            name: p.name.clone(),
            ty: mapper.map(&p.ty, None),
        })
        .collect();
    let returns = operation
        .returns
        .as_ref()
        .map_or(MappedType::Any, |ty| mapper.map(ty, None));

    if returns.is_excluded() || parameters.iter().any(|p| p.ty.is_excluded()) {
        tracing::warn!(
            "Skipping operation '{}.{}': its signature uses an excluded type",
            controller.name,
            operation.name
        );
        return None;
    }

    let url = combine_uri(&[API_PATH_EXPRESSION, &controller.group, &operation.name]);
    let (url, body) = if verb.sends_body() {
        if parameters.len() > 1 {
            tracing::warn!(
                "Only POST methods with zero or one parameter are supported: {}.{}",
                controller.name,
                operation.name
            );
        }
        let body = parameters
            .first()
            .map_or_else(|| ", null".to_string(), |p| format!(", {}", p.name));
        (url, body)
    } else {
        // Model parameters interpolate like primitives: `filter=${filter}`.
        let query = with_query(url, parameters.iter().map(|p| (p.name.as_str(), &p.ty)));
        (query, String::new())
    };

    Some(FacadeMethod {
        name: camelize(&operation.name),
        operation: operation.name.clone(),
        verb,
        construction: Construction::of(&returns, mapper.registry()),
        parameters,
        returns,
        url,
        body,
        duplicate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelgen_core::TypeRegistry;
    use modelgen_introspector::{ModuleDocument, ModuleLoader, find_controllers};
    use serde_json::json;

    fn load(types: serde_json::Value) -> TypeRegistry {
        let mut loader = ModuleLoader::new();
        let doc: ModuleDocument = serde_json::from_value(json!({ "types": types })).unwrap();
        loader.add_document("Acme", doc).unwrap();
        loader.load().registry
    }

    fn facade(registry: &TypeRegistry) -> Facade {
        let controllers = find_controllers(registry, &["ApiController".to_string()]);
        Facade::build(&TypeMapper::new(registry), &controllers)
    }

    #[test]
    fn test_methods_sorted_and_urls_built() {
        let registry = load(json!([
            { "name": "Widget", "namespace": "Acme" },
            { "name": "WidgetController", "namespace": "Acme", "base": "ApiController",
              "methods": [
                  { "name": "PostWidget", "parameters": [ { "name": "widget", "type": "Acme.Widget" } ],
                    "returns": "Acme.Widget" },
                  { "name": "GetWidget", "parameters": [ { "name": "id", "type": "int" } ],
                    "returns": "Acme.Widget" },
                  { "name": "GetCount", "returns": "int" },
                  { "name": "Frobnicate" }
              ] }
        ]));
        let facade = facade(&registry);

        assert_eq!(facade.groups.len(), 1);
        let group = &facade.groups[0];
        assert_eq!(group.name, "widget");
        let names: Vec<&str> = group.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["getCount", "getWidget", "postWidget"]);

        let get = &group.methods[1];
        assert_eq!(get.url, "${this.apiRelativePath}/Widget/GetWidget?id=${id}");
        assert_eq!(get.body, "");
        assert_eq!(get.signature(), "id: number");

        let post = &group.methods[2];
        assert_eq!(post.url, "${this.apiRelativePath}/Widget/PostWidget");
        assert_eq!(post.body, ", widget");

        assert_eq!(facade.method_count(), 3);
        assert_eq!(facade.imports.len(), 1);
        assert!(facade.imports[0].constructible);
        assert!(!facade.uses_moment);
    }

    #[test]
    fn test_duplicate_names_are_flagged() {
        let registry = load(json!([
            { "name": "OrderController", "namespace": "Acme", "base": "ApiController",
              "methods": [
                  { "name": "GetOrder", "parameters": [ { "name": "id", "type": "int" } ] },
                  { "name": "Getorder", "parameters": [ { "name": "code", "type": "string" } ] }
              ] }
        ]));
        let facade = facade(&registry);
        let duplicates: Vec<bool> = facade.groups[0].methods.iter().map(|m| m.duplicate).collect();
        assert_eq!(duplicates, vec![false, true]);
    }

    #[test]
    fn test_post_without_parameters_sends_null() {
        let registry = load(json!([
            { "name": "JobController", "namespace": "Acme", "base": "ApiController",
              "methods": [ { "name": "UpdateAll", "returns": "bool" } ] }
        ]));
        let method = &facade(&registry).groups[0].methods[0];
        assert_eq!(method.verb, HttpVerb::Post);
        assert_eq!(method.body, ", null");
    }

    #[test]
    fn test_model_query_parameter_is_interpolated() {
        let registry = load(json!([
            { "name": "Filter", "namespace": "Acme" },
            { "name": "SearchController", "namespace": "Acme", "base": "ApiController",
              "methods": [ { "name": "GetMatches", "parameters": [ { "name": "filter", "type": "Acme.Filter" } ] } ] }
        ]));
        let method = &facade(&registry).groups[0].methods[0];
        assert_eq!(method.url, "${this.apiRelativePath}/Search/GetMatches?filter=${filter}");
        assert_eq!(method.body, "");
    }

    #[test]
    fn test_excluded_signature_is_skipped() {
        let registry = load(json!([
            { "name": "Secret", "namespace": "Acme", "markers": ["ignore"] },
            { "name": "VaultController", "namespace": "Acme", "base": "ApiController",
              "methods": [
                  { "name": "GetSecret", "returns": "Acme.Secret" },
                  { "name": "GetSince", "parameters": [ { "name": "since", "type": "DateTime" } ] }
              ] }
        ]));
        let facade = facade(&registry);
        let methods = &facade.groups[0].methods;
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].url, "${this.apiRelativePath}/Vault/GetSince?since=${since.toISOString()}");
        assert!(facade.uses_moment);
    }
}

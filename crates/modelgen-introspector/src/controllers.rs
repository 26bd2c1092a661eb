//! Controller and operation extraction.
//!
//! A controller is a declared class whose base type's short name is one of
//! the configured controller base names. Every public method it declares
//! becomes an [`Operation`].

use modelgen_core::{
    Controller, HttpVerb, MappedType, Marker, MethodDef, Operation, Parameter, ParameterDef,
    TypeDef, TypeKind, TypeMapper, TypeRef, TypeRegistry, camelize,
};
use std::collections::HashSet;

/// Finds every controller in the registry.
///
/// Controllers are returned sorted by name, then qualified name and module.
#[must_use]
pub fn find_controllers(registry: &TypeRegistry, base_names: &[String]) -> Vec<Controller> {
    let mut found: Vec<&TypeDef> = registry
        .iter()
        .filter(|def| def.kind == TypeKind::Class)
        .filter(|def| {
            def.base
                .as_ref()
                .and_then(|base| base_short_name(registry, base))
                .is_some_and(|name| base_names.iter().any(|b| b == name))
        })
        .collect();

    found.sort_by_cached_key(|def| (def.name.clone(), def.qualified_name(), def.module.clone()));

    let mapper = TypeMapper::new(registry);
    found
        .into_iter()
        .map(|def| {
            let group = Controller::group_name(&def.name);
            let operations = def
                .methods
                .iter()
                .map(|method| build_operation(&mapper, def, &group, method))
                .collect();
            Controller {
                id: def.id,
                name: def.name.clone(),
                group,
                operations,
            }
        })
        .collect()
}

fn base_short_name<'a>(registry: &'a TypeRegistry, base: &'a TypeRef) -> Option<&'a str> {
    match base {
        TypeRef::Declared { id, .. } => Some(registry.get(*id).name.as_str()),
        TypeRef::External { name, .. } => {
            let short = name.rsplit('.').next().unwrap_or(name);
            Some(short.split('`').next().unwrap_or(short))
        }
        TypeRef::Array(_) => None,
    }
}

fn build_operation(mapper: &TypeMapper<'_>, def: &TypeDef, group: &str, method: &MethodDef) -> Operation {
    let verb = HttpVerb::classify(&method.name, method.markers);
    if verb.is_none() {
        tracing::warn!(
            "The method '{}.{}' does not have a recognizable HTTP method",
            def.name,
            method.name
        );
    }

    Operation {
        name: method.name.clone(),
        verb,
        group: group.to_string(),
        parameters: expand_parameters(mapper, &method.parameters),
        returns: method.returns.clone(),
    }
}

/// Replaces inline-expanded parameters by the properties of their type.
///
/// A parameter marked `ExpandInline` keeps its own shape when it maps to a
/// primitive, a date or an array of those. Otherwise each property of its
/// type becomes a parameter with a camelCase name. Unexpanded parameters
/// come first; a later parameter with an already used name is dropped.
#[must_use]
pub fn expand_parameters(mapper: &TypeMapper<'_>, parameters: &[ParameterDef]) -> Vec<Parameter> {
    let registry = mapper.registry();
    let mut bare = Vec::new();
    let mut expanded = Vec::new();

    for parameter in parameters {
        let expandable = parameter.markers.contains(Marker::ExpandInline)
            && !is_bare(&mapper.map(&parameter.ty, None));

        match (expandable, parameter.ty.declared_id()) {
            (true, Some(id)) => {
                expanded.extend(registry.all_properties(id).into_iter().map(|p| Parameter {
                    name: camelize(&p.name),
                    ty: p.ty.clone(),
                }));
            }
            _ => bare.push(Parameter {
                name: parameter.name.clone(),
                ty: parameter.ty.clone(),
            }),
        }
    }

    let mut seen = HashSet::new();
    bare.into_iter()
        .chain(expanded)
        .filter(|p| seen.insert(p.name.clone()))
        .collect()
}

fn is_bare(mapped: &MappedType) -> bool {
    mapped.element().is_scalar()
}

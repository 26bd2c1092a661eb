//! Dialect-independent view of one model.
//!
//! [`ModelView`] collects everything either dialect needs to render a
//! class or interface: the model base, the imports, the mapped properties
//! and the static constants. Properties whose type is excluded are dropped
//! here with a warning, so the renderers never see them.

use crate::common::typescript::quote;
use modelgen_core::{
    ConstantDef, MappedType, Marker, PrimitiveKind, PropertyDef, TypeDef, TypeId, TypeKind,
    TypeMapper,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// A model referenced from generated code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRef {
    /// Short name
    pub name: String,
    /// The model is a concrete class with a constructor or factory
    pub constructible: bool,
}

/// A property after mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedProperty {
    /// Property name as declared
    pub name: String,
    /// TypeScript type
    pub ty: MappedType,
    /// The referenced model, if any, is a concrete class
    pub constructible: bool,
}

/// A static constant ready for emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappedConstant {
    /// Constant name
    pub name: String,
    /// TypeScript type name
    pub type_name: String,
    /// TypeScript literal
    pub value: String,
}

/// Everything the renderers need about one model class.
#[derive(Debug, Clone)]
pub struct ModelView<'r> {
    /// The model declaration
    pub def: &'r TypeDef,
    /// Base declaration, when the base is itself a model
    pub base: Option<&'r TypeDef>,
    /// Models referenced by the base and the properties, sorted by name
    pub imports: Vec<ImportRef>,
    /// Properties the declaration itself lists, sorted by name
    pub declared: Vec<MappedProperty>,
    /// All properties including inherited ones, sorted by name
    pub all: Vec<MappedProperty>,
    /// Static constants
    pub constants: Vec<MappedConstant>,
}

impl<'r> ModelView<'r> {
    /// Builds the view of a declared model.
    #[must_use]
    pub fn new(mapper: &TypeMapper<'r>, id: TypeId) -> Self {
        let registry = mapper.registry();
        let def = registry.get(id);
        let base = registry.model_base(id).map(|base| registry.get(base));

        let all = map_properties(mapper, def, registry.all_properties(id));
        // Without a model base, inherited properties are flattened into the
        // declaration.
        let declared = if base.is_some() {
            map_properties(mapper, def, def.properties.iter().collect())
        } else {
            all.clone()
        };

        let mut imports = BTreeMap::new();
        if let Some(base) = base {
            imports.insert(base.name.clone(), is_constructible(base));
        }
        for property in &all {
            if let Some((child, name)) = property.ty.model() {
                if child != id {
                    imports.insert(name.to_string(), is_constructible(registry.get(child)));
                }
            }
        }

        Self {
            def,
            base,
            imports: imports
                .into_iter()
                .map(|(name, constructible)| ImportRef {
                    name,
                    constructible,
                })
                .collect(),
            declared,
            all,
            constants: map_constants(mapper, def),
        }
    }

    /// Returns `true` if any property renders as a date.
    #[must_use]
    pub fn uses_moment(&self) -> bool {
        self.all.iter().any(|p| p.ty.requires_date_import())
    }

    /// Returns `true` for concrete classes.
    #[must_use]
    pub fn is_constructible(&self) -> bool {
        is_constructible(self.def)
    }

    /// Properties holding a single concrete model, sorted by name.
    ///
    /// Yields `(property, model)` pairs.
    pub fn model_properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.constructed(|ty| matches!(ty, MappedType::Model { .. }))
    }

    /// Properties holding a flat array of a concrete model, sorted by name.
    pub fn model_array_properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.constructed(|ty| matches!(ty, MappedType::Array(element) if !element.is_array()))
    }

    fn constructed(
        &self,
        shape: impl Fn(&MappedType) -> bool,
    ) -> impl Iterator<Item = (&str, &str)> {
        self.all.iter().filter_map(move |p| {
            let (_, model) = p.ty.model()?;
            (p.constructible && shape(&p.ty)).then_some((p.name.as_str(), model))
        })
    }

    /// Date properties with the given UTC flag, sorted by name.
    pub fn date_properties(&self, utc: bool) -> impl Iterator<Item = &str> {
        self.all.iter().filter_map(move |p| {
            matches!(p.ty, MappedType::Date { utc: u } if u == utc).then_some(p.name.as_str())
        })
    }
}

/// Template context for an enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumContext {
    /// Enum name
    pub name: String,
    /// Members, ordered by value
    pub values: Vec<EnumMember>,
}

/// One enum member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumMember {
    /// Member name
    pub name: String,
    /// Numeric value
    pub value: i64,
}

impl EnumContext {
    /// Builds the context for a declared enumeration.
    #[must_use]
    pub fn new(def: &TypeDef) -> Self {
        let mut values: Vec<EnumMember> = def
            .values
            .iter()
            .map(|v| EnumMember {
                name: v.name.clone(),
                value: v.value,
            })
            .collect();
        values.sort_by_key(|v| v.value);
        Self {
            name: def.name.clone(),
            values,
        }
    }
}

/// Returns `true` for concrete classes.
#[must_use]
pub fn is_constructible(def: &TypeDef) -> bool {
    def.kind == TypeKind::Class && !def.is_abstract
}

fn map_properties(
    mapper: &TypeMapper<'_>,
    owner: &TypeDef,
    properties: Vec<&PropertyDef>,
) -> Vec<MappedProperty> {
    let mut mapped: Vec<MappedProperty> = properties
        .into_iter()
        .filter_map(|property| {
            let ty = mapper.map_property(property);
            if ty.is_excluded() {
                tracing::warn!(
                    "Skipping property '{}.{}': its type is excluded",
                    owner.name,
                    property.name
                );
                return None;
            }
            let constructible = ty
                .model()
                .is_some_and(|(id, _)| is_constructible(mapper.registry().get(id)));
            Some(MappedProperty {
                name: property.name.clone(),
                ty,
                constructible,
            })
        })
        .collect();
    mapped.sort_by(|a, b| a.name.cmp(&b.name));
    mapped
}

fn map_constants(mapper: &TypeMapper<'_>, def: &TypeDef) -> Vec<MappedConstant> {
    let emit_readonly = def.has_marker(Marker::EmitStaticReadonly);
    let mut literals = Vec::new();
    let mut readonly = Vec::new();

    for constant in &def.constants {
        let ty = mapper.map(&constant.ty, None);
        if constant.readonly {
            if emit_readonly && !ty.is_excluded() {
                readonly.push(mapped_constant(constant, &ty));
            }
        } else if matches!(
            ty,
            MappedType::Primitive(PrimitiveKind::Number | PrimitiveKind::String)
        ) {
            literals.push(mapped_constant(constant, &ty));
        }
    }

    literals.sort_by(|a, b| a.name.cmp(&b.name));
    readonly.sort_by(|a, b| a.name.cmp(&b.name));
    literals.extend(readonly);
    literals
}

fn mapped_constant(constant: &ConstantDef, ty: &MappedType) -> MappedConstant {
    let value = match ty {
        MappedType::Primitive(PrimitiveKind::String) => quote(&constant.value),
        MappedType::Primitive(PrimitiveKind::Boolean) => constant.value.to_lowercase(),
        _ => constant.value.clone(),
    };
    MappedConstant {
        name: constant.name.clone(),
        type_name: ty.typescript_name(),
        value,
    }
}

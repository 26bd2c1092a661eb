//! Type mapping.
//!
//! [`TypeMapper::map`] turns a resolved [`TypeRef`] into the TypeScript
//! shape the emitters need. Mapping is a pure function of the reference and
//! the optional property it was read from; unrecognized shapes degrade to
//! [`MappedType::Any`] instead of failing.
//!
//! Rules, in priority order:
//!
//! 1. A type marked `Ignore` maps to [`MappedType::Excluded`], and so does
//!    anything wrapping it.
//! 2. Declared models and enums map to [`MappedType::Model`] by short name.
//! 3. Boolean, numeric and text families map to the three primitives.
//! 4. Arrays and single-element sequences map to [`MappedType::Array`];
//!    dictionary-shaped generics fall through to `Any`.
//! 5. `Nullable<T>` maps as `T`.
//! 6. Dates map to [`MappedType::Date`], flagged UTC when the property is.
//! 7. Any other generic with exactly one argument is unwrapped.
//! 8. Everything else is `Any`.
//!
//! # Examples
//!
//! ```
//! use modelgen_core::{MappedType, PrimitiveKind, TypeMapper, TypeRef, TypeRegistry};
//!
//! let registry = TypeRegistry::new();
//! let mapper = TypeMapper::new(&registry);
//!
//! let ty = TypeRef::external("System.Int64").array_of();
//! let mapped = mapper.map(&ty, None);
//! assert_eq!(mapped, MappedType::Array(Box::new(MappedType::Primitive(PrimitiveKind::Number))));
//! assert_eq!(mapped.typescript_name(), "number[]");
//! assert_eq!(mapped.initializer(), Some("[]"));
//! ```

use crate::metadata::{ExternalKind, Marker, PropertyDef, TypeRef, TypeRegistry};
use crate::TypeId;
use std::fmt;

/// The three TypeScript primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `boolean`
    Boolean,
    /// `number`
    Number,
    /// `string`
    String,
}

impl PrimitiveKind {
    /// TypeScript spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

/// Target-language type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MappedType {
    /// The type is marked `Ignore`; callers drop whatever references it
    Excluded,
    /// `boolean`, `number` or `string`
    Primitive(PrimitiveKind),
    /// `moment.Moment`
    Date {
        /// Parse with `moment.utc`
        utc: bool,
    },
    /// `T[]`
    Array(Box<MappedType>),
    /// Reference to a discovered model or enum
    Model {
        /// Identity of the referenced declaration
        id: TypeId,
        /// Short name used in generated code
        name: String,
    },
    /// `any`
    Any,
}

impl MappedType {
    /// TypeScript spelling of the type.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_core::MappedType;
    ///
    /// let date = MappedType::Date { utc: true };
    /// assert_eq!(date.typescript_name(), "moment.Moment");
    /// assert_eq!(MappedType::Any.typescript_name(), "any");
    /// ```
    #[must_use]
    pub fn typescript_name(&self) -> String {
        match self {
            Self::Excluded | Self::Any => "any".to_string(),
            Self::Primitive(kind) => kind.as_str().to_string(),
            Self::Date { .. } => "moment.Moment".to_string(),
            Self::Array(element) => format!("{}[]", element.typescript_name()),
            Self::Model { name, .. } => name.clone(),
        }
    }

    /// Default-value expression for a declared field.
    #[must_use]
    pub const fn initializer(&self) -> Option<&'static str> {
        match self {
            Self::Array(_) => Some("[]"),
            _ => None,
        }
    }

    /// Returns `true` if rendering this type needs the `moment` import.
    #[must_use]
    pub fn requires_date_import(&self) -> bool {
        matches!(self.element(), Self::Date { .. })
    }

    /// Returns `true` for the excluded sentinel.
    #[must_use]
    pub const fn is_excluded(&self) -> bool {
        matches!(self, Self::Excluded)
    }

    /// Returns `true` for primitives and dates.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Primitive(_) | Self::Date { .. })
    }

    /// Returns `true` for arrays.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Innermost non-array type.
    #[must_use]
    pub fn element(&self) -> &Self {
        let mut current = self;
        while let Self::Array(inner) = current {
            current = inner;
        }
        current
    }

    /// Referenced model, looking through arrays.
    #[must_use]
    pub fn model(&self) -> Option<(TypeId, &str)> {
        match self.element() {
            Self::Model { id, name } => Some((*id, name.as_str())),
            _ => None,
        }
    }
}

impl fmt::Display for MappedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.typescript_name())
    }
}

/// Applies the mapping rules against a registry.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> TypeMapper<'a> {
    /// Creates a mapper over a registry.
    #[must_use]
    pub const fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    /// Returns the registry being mapped against.
    #[must_use]
    pub const fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    /// Maps a type reference.
    ///
    /// `property` supplies the context for date handling: a property marked
    /// `UtcDate` yields `Date { utc: true }`.
    #[must_use]
    pub fn map(&self, ty: &TypeRef, property: Option<&PropertyDef>) -> MappedType {
        let utc = property.is_some_and(|p| p.markers.contains(Marker::UtcDate));
        self.map_inner(ty, utc)
    }

    /// Maps the type of a property in its own context.
    #[must_use]
    pub fn map_property(&self, property: &PropertyDef) -> MappedType {
        self.map(&property.ty, Some(property))
    }

    fn map_inner(&self, ty: &TypeRef, utc: bool) -> MappedType {
        match ty {
            TypeRef::Array(element) => array_of(self.map_inner(element, utc)),
            TypeRef::Declared { id, args } => {
                let def = self.registry.get(*id);
                if def.has_marker(Marker::Ignore) {
                    MappedType::Excluded
                } else if self.registry.is_model_or_enum(*id) {
                    MappedType::Model {
                        id: *id,
                        name: def.name.clone(),
                    }
                } else {
                    self.unwrap_single(args, utc)
                }
            }
            TypeRef::External { kind, args, .. } => match kind {
                ExternalKind::Boolean => MappedType::Primitive(PrimitiveKind::Boolean),
                ExternalKind::Number => MappedType::Primitive(PrimitiveKind::Number),
                ExternalKind::Text => MappedType::Primitive(PrimitiveKind::String),
                ExternalKind::Sequence => match args.as_slice() {
                    [element] => array_of(self.map_inner(element, utc)),
                    _ => MappedType::Any,
                },
                ExternalKind::Map => MappedType::Any,
                ExternalKind::Date => MappedType::Date { utc },
                ExternalKind::Nullable
                | ExternalKind::Task
                | ExternalKind::Void
                | ExternalKind::Object
                | ExternalKind::Other => self.unwrap_single(args, utc),
            },
        }
    }

    fn unwrap_single(&self, args: &[TypeRef], utc: bool) -> MappedType {
        match args {
            [inner] => self.map_inner(inner, utc),
            _ => MappedType::Any,
        }
    }
}

fn array_of(element: MappedType) -> MappedType {
    if element.is_excluded() {
        MappedType::Excluded
    } else {
        MappedType::Array(Box::new(element))
    }
}

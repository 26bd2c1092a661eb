//! Type metadata.
//!
//! The [`TypeRegistry`] is an arena of [`TypeDef`]s loaded from metadata
//! modules. Every type reference inside it is a resolved [`TypeRef`]: either
//! a declared type (by [`TypeId`]), an external library type classified by
//! [`ExternalKind`], or an array.
//!
//! Markers are resolved once, when a definition is built, into the closed
//! [`Marker`] enumeration.
//!
//! # Examples
//!
//! ```
//! use modelgen_core::{ModuleName, TypeExpr, TypeKind, TypeRef, TypeRegistry};
//!
//! let mut registry = TypeRegistry::new();
//! let module = ModuleName::new("Acme.Client");
//! let widget = registry
//!     .declare(&module, "Acme.Models", "Widget", TypeKind::Class)
//!     .unwrap();
//!
//! let expr = TypeExpr::parse("List<Acme.Models.Widget>").unwrap();
//! let resolved = registry.resolve(&expr, &module);
//! assert_eq!(registry.display(&resolved), "List<Acme.Models.Widget>");
//! assert!(registry.is_model(widget));
//! ```

use crate::{Error, ModuleName, Result, TypeExpr, TypeId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Kind of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Reference type
    Class,
    /// Value type
    Struct,
    /// Interface
    Interface,
    /// Enumeration
    Enum,
}

/// Annotation attached to a type, property, parameter or method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Marker {
    /// Excluded from generation
    Ignore,
    /// Parameter replaced by its properties
    ExpandInline,
    /// Date parsed as UTC
    UtcDate,
    /// Explicit GET verb
    HttpGet,
    /// Explicit POST verb
    HttpPost,
    /// Explicit PUT verb
    HttpPut,
    /// Explicit DELETE verb
    HttpDelete,
    /// Readonly static fields are emitted next to constants
    EmitStaticReadonly,
}

impl Marker {
    const ALL: [Self; 8] = [
        Self::Ignore,
        Self::ExpandInline,
        Self::UtcDate,
        Self::HttpGet,
        Self::HttpPost,
        Self::HttpPut,
        Self::HttpDelete,
        Self::EmitStaticReadonly,
    ];

    /// Resolves a marker spelling.
    ///
    /// Matching is case-insensitive and ignores an `Attribute` suffix.
    /// Returns `None` for names that carry no meaning to the generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_core::Marker;
    ///
    /// assert_eq!(Marker::parse("utcDate"), Some(Marker::UtcDate));
    /// assert_eq!(Marker::parse("TypeScripterUtcDateAttribute"), Some(Marker::UtcDate));
    /// assert_eq!(Marker::parse("FromUri"), Some(Marker::ExpandInline));
    /// assert_eq!(Marker::parse("Required"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        let lower = lower.strip_suffix("attribute").unwrap_or(&lower);
        match lower {
            "ignore" | "typescripterignore" => Some(Self::Ignore),
            "expandinline" | "fromuri" | "fromquery" => Some(Self::ExpandInline),
            "utcdate" | "typescripterutcdate" => Some(Self::UtcDate),
            "httpget" => Some(Self::HttpGet),
            "httppost" => Some(Self::HttpPost),
            "httpput" => Some(Self::HttpPut),
            "httpdelete" => Some(Self::HttpDelete),
            "emitstaticreadonly"
            | "emitstaticreadonlymembers"
            | "typescripteremitstaticreadonlymembers"
            | "itypescripteremitstaticreadonlymembers" => Some(Self::EmitStaticReadonly),
            _ => None,
        }
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Set of markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MarkerSet(u16);

impl MarkerSet {
    /// Empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Builds a set from marker spellings, dropping unknown names.
    #[must_use]
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let mut set = Self::new();
        for name in names {
            match Marker::parse(name.as_ref()) {
                Some(marker) => set.insert(marker),
                None => tracing::debug!("Ignoring unknown marker '{}'", name.as_ref()),
            }
        }
        set
    }

    /// Adds a marker.
    pub const fn insert(&mut self, marker: Marker) {
        self.0 |= marker.bit();
    }

    /// Returns `true` if the marker is present.
    #[must_use]
    pub const fn contains(&self, marker: Marker) -> bool {
        self.0 & marker.bit() != 0
    }

    /// Returns `true` if no marker is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates the markers in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Marker> + '_ {
        Marker::ALL.into_iter().filter(|m| self.contains(*m))
    }
}

impl FromIterator<Marker> for MarkerSet {
    fn from_iter<I: IntoIterator<Item = Marker>>(iter: I) -> Self {
        let mut set = Self::new();
        for marker in iter {
            set.insert(marker);
        }
        set
    }
}

/// Classification of a type that no loaded module declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalKind {
    /// `bool`
    Boolean,
    /// Integer, floating-point and decimal types of any width
    Number,
    /// `string`, `char`, `Guid`
    Text,
    /// `DateTime`, `DateTimeOffset`
    Date,
    /// Single-element iterable collections
    Sequence,
    /// Dictionary-shaped collections
    Map,
    /// `Nullable<T>`
    Nullable,
    /// `Task`, `Task<T>` and friends
    Task,
    /// `void`
    Void,
    /// `object`
    Object,
    /// Anything else
    Other,
}

impl ExternalKind {
    /// Classifies an external type by name.
    ///
    /// The namespace and any arity suffix (`` `1 ``) are ignored; both
    /// framework names and C# aliases are accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_core::ExternalKind;
    ///
    /// assert_eq!(ExternalKind::classify("System.Int32"), ExternalKind::Number);
    /// assert_eq!(ExternalKind::classify("ulong"), ExternalKind::Number);
    /// assert_eq!(ExternalKind::classify("System.Collections.Generic.List`1"), ExternalKind::Sequence);
    /// assert_eq!(ExternalKind::classify("Dictionary"), ExternalKind::Map);
    /// ```
    #[must_use]
    pub fn classify(name: &str) -> Self {
        let short = name.rsplit('.').next().unwrap_or(name);
        let short = short.split('`').next().unwrap_or(short);
        match short {
            "Boolean" | "bool" => Self::Boolean,
            "Byte" | "SByte" | "Int16" | "UInt16" | "Int32" | "UInt32" | "Int64" | "UInt64"
            | "Single" | "Double" | "Decimal" | "byte" | "sbyte" | "short" | "ushort" | "int"
            | "uint" | "long" | "ulong" | "float" | "double" | "decimal" => Self::Number,
            "String" | "Char" | "Guid" | "string" | "char" => Self::Text,
            "DateTime" | "DateTimeOffset" => Self::Date,
            "List" | "IList" | "ICollection" | "IEnumerable" | "IReadOnlyList"
            | "IReadOnlyCollection" | "HashSet" | "ISet" | "SortedSet" | "Collection"
            | "ReadOnlyCollection" | "ObservableCollection" | "Queue" | "Stack" | "LinkedList"
            | "IQueryable" | "ConcurrentBag" => Self::Sequence,
            "Dictionary" | "IDictionary" | "IReadOnlyDictionary" | "SortedDictionary"
            | "SortedList" | "ConcurrentDictionary" | "ReadOnlyDictionary" => Self::Map,
            "Nullable" => Self::Nullable,
            "Task" | "ValueTask" => Self::Task,
            "Void" | "void" => Self::Void,
            "Object" | "object" => Self::Object,
            _ => Self::Other,
        }
    }
}

/// Resolved type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A type declared by a loaded module
    Declared {
        /// Identity of the declaration
        id: TypeId,
        /// Generic arguments supplied at the use site
        args: Vec<TypeRef>,
    },
    /// A library type
    External {
        /// Name as written in the metadata
        name: String,
        /// Classification of the name
        kind: ExternalKind,
        /// Generic arguments
        args: Vec<TypeRef>,
    },
    /// Array of the element type
    Array(Box<TypeRef>),
}

impl TypeRef {
    /// Creates a non-generic external reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_core::{ExternalKind, TypeRef};
    ///
    /// let ty = TypeRef::external("System.String");
    /// assert!(matches!(ty, TypeRef::External { kind: ExternalKind::Text, .. }));
    /// ```
    #[must_use]
    pub fn external(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::External {
            kind: ExternalKind::classify(&name),
            name,
            args: Vec::new(),
        }
    }

    /// Creates a non-generic reference to a declared type.
    #[must_use]
    pub const fn declared(id: TypeId) -> Self {
        Self::Declared {
            id,
            args: Vec::new(),
        }
    }

    /// Wraps the reference in an array.
    #[must_use]
    pub fn array_of(self) -> Self {
        Self::Array(Box::new(self))
    }

    /// Generic arguments at this level (empty for arrays).
    #[must_use]
    pub fn generic_args(&self) -> &[Self] {
        match self {
            Self::Declared { args, .. } | Self::External { args, .. } => args,
            Self::Array(_) => &[],
        }
    }

    /// Returns the declared type id, if this names a declared type.
    #[must_use]
    pub const fn declared_id(&self) -> Option<TypeId> {
        match self {
            Self::Declared { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Returns `true` for the non-generic `void`/`Task` returns that carry no value.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(
            self,
            Self::External { kind: ExternalKind::Void | ExternalKind::Task, args, .. } if args.is_empty()
        )
    }
}

/// Instance property of a declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDef {
    /// Property name as declared
    pub name: String,
    /// Property type
    pub ty: TypeRef,
    /// Property markers
    pub markers: MarkerSet,
    /// Documentation string
    pub doc: Option<String>,
}

/// Static field emitted as a class constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantDef {
    /// Field name
    pub name: String,
    /// Field type
    pub ty: TypeRef,
    /// Literal value, as written
    pub value: String,
    /// `true` for readonly statics rather than literals
    pub readonly: bool,
}

/// Member of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// Member name
    pub name: String,
    /// Numeric value
    pub value: i64,
}

/// Method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDef {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub ty: TypeRef,
    /// Parameter markers
    pub markers: MarkerSet,
}

/// Public instance method of a declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    /// Method name
    pub name: String,
    /// Method markers
    pub markers: MarkerSet,
    /// Ordered parameters
    pub parameters: Vec<ParameterDef>,
    /// Return type; `None` for `void`
    pub returns: Option<TypeRef>,
}

/// Declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    /// Arena identity
    pub id: TypeId,
    /// Declaring module
    pub module: ModuleName,
    /// Namespace (may be empty)
    pub namespace: String,
    /// Short name
    pub name: String,
    /// Kind of declaration
    pub kind: TypeKind,
    /// `abstract` modifier
    pub is_abstract: bool,
    /// Base type
    pub base: Option<TypeRef>,
    /// Type-level markers
    pub markers: MarkerSet,
    /// Documentation string
    pub doc: Option<String>,
    /// Instance properties declared by this type
    pub properties: Vec<PropertyDef>,
    /// Static fields
    pub constants: Vec<ConstantDef>,
    /// Enumeration members
    pub values: Vec<EnumValue>,
    /// Public methods declared by this type
    pub methods: Vec<MethodDef>,
}

impl TypeDef {
    /// Returns `Namespace.Name`, or `Name` when the namespace is empty.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }

    /// Returns `true` if the type carries the marker.
    #[must_use]
    pub const fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(marker)
    }
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.qualified_name(), self.module)
    }
}

fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}

/// Arena of declared types.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: Vec<TypeDef>,
    by_name: HashMap<String, Vec<TypeId>>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of declared types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Declares a type with no members.
    ///
    /// Members are attached afterwards through [`TypeRegistry::get_mut`],
    /// once every type of every module has an id to resolve against.
    ///
    /// # Errors
    ///
    /// Returns `ModuleLoadError` if the module already declares a type with
    /// the same qualified name.
    pub fn declare(
        &mut self,
        module: &ModuleName,
        namespace: &str,
        name: &str,
        kind: TypeKind,
    ) -> Result<TypeId> {
        let qualified = qualify(namespace, name);
        let existing = self.by_name.get(&qualified).map_or(&[][..], Vec::as_slice);
        if existing.iter().any(|id| &self.types[id.index()].module == module) {
            return Err(Error::ModuleLoadError {
                module: module.to_string(),
                message: format!("type '{qualified}' is declared twice"),
            });
        }

        let id = TypeId::from_index(self.types.len());
        self.types.push(TypeDef {
            id,
            module: module.clone(),
            namespace: namespace.to_string(),
            name: name.to_string(),
            kind,
            is_abstract: false,
            base: None,
            markers: MarkerSet::new(),
            doc: None,
            properties: Vec::new(),
            constants: Vec::new(),
            values: Vec::new(),
            methods: Vec::new(),
        });
        self.by_name.entry(qualified).or_default().push(id);
        Ok(id)
    }

    /// Returns the definition for an id.
    ///
    /// # Panics
    ///
    /// Panics if the id was not issued by this registry.
    #[must_use]
    pub fn get(&self, id: TypeId) -> &TypeDef {
        &self.types[id.index()]
    }

    /// Returns the definition for an id, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the id was not issued by this registry.
    pub fn get_mut(&mut self, id: TypeId) -> &mut TypeDef {
        &mut self.types[id.index()]
    }

    /// Iterates all declared types in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.iter()
    }

    /// Finds a declared type by qualified name.
    ///
    /// A declaration in `from` wins; otherwise the declaration from the
    /// module that sorts first.
    #[must_use]
    pub fn lookup(&self, qualified: &str, from: &ModuleName) -> Option<TypeId> {
        let candidates = self.by_name.get(qualified)?;
        candidates
            .iter()
            .copied()
            .find(|id| &self.get(*id).module == from)
            .or_else(|| {
                candidates
                    .iter()
                    .copied()
                    .min_by(|a, b| self.get(*a).module.cmp(&self.get(*b).module))
            })
    }

    /// Resolves a parsed expression as seen from a module.
    #[must_use]
    pub fn resolve(&self, expr: &TypeExpr, from: &ModuleName) -> TypeRef {
        match expr {
            TypeExpr::Array(element) => TypeRef::Array(Box::new(self.resolve(element, from))),
            TypeExpr::Named { name, args } => {
                let args = args.iter().map(|a| self.resolve(a, from)).collect();
                match self.lookup(name, from) {
                    Some(id) => TypeRef::Declared { id, args },
                    None => TypeRef::External {
                        kind: ExternalKind::classify(name),
                        name: name.clone(),
                        args,
                    },
                }
            }
        }
    }

    /// Renders a reference as a canonical type expression.
    ///
    /// Declared types use their qualified name, so the result re-parses to
    /// the same reference.
    #[must_use]
    pub fn display(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Array(element) => format!("{}[]", self.display(element)),
            TypeRef::Declared { id, args } => {
                self.with_args(self.get(*id).qualified_name(), args)
            }
            TypeRef::External { name, args, .. } => self.with_args(name.clone(), args),
        }
    }

    fn with_args(&self, mut name: String, args: &[TypeRef]) -> String {
        if !args.is_empty() {
            let args: Vec<String> = args.iter().map(|a| self.display(a)).collect();
            name.push('<');
            name.push_str(&args.join(", "));
            name.push('>');
        }
        name
    }

    /// Returns `true` for user-defined classes.
    ///
    /// Declarations under the `System.` and `Microsoft.` namespaces are
    /// library types, never models.
    #[must_use]
    pub fn is_model(&self, id: TypeId) -> bool {
        let def = self.get(id);
        def.kind == TypeKind::Class && !is_library_namespace(&def.namespace)
    }

    /// Returns `true` for declared enumerations.
    #[must_use]
    pub fn is_enum(&self, id: TypeId) -> bool {
        self.get(id).kind == TypeKind::Enum
    }

    /// Returns `true` for models and enumerations.
    #[must_use]
    pub fn is_model_or_enum(&self, id: TypeId) -> bool {
        self.is_model(id) || self.is_enum(id)
    }

    /// Returns the declared base type, if any.
    #[must_use]
    pub fn base_id(&self, id: TypeId) -> Option<TypeId> {
        self.get(id).base.as_ref().and_then(TypeRef::declared_id)
    }

    /// Returns the base type when it is itself a model.
    ///
    /// An `Ignore`-marked base is never a model base; the derived type
    /// flattens its properties instead.
    #[must_use]
    pub fn model_base(&self, id: TypeId) -> Option<TypeId> {
        self.base_id(id)
            .filter(|base| self.is_model(*base) && !self.get(*base).has_marker(Marker::Ignore))
    }

    /// Returns `true` if `sub` derives from `ancestor`, directly or not.
    ///
    /// A type is not its own subtype.
    #[must_use]
    pub fn is_subtype_of(&self, sub: TypeId, ancestor: TypeId) -> bool {
        self.ancestors(sub).contains(&ancestor)
    }

    /// Base chain of a declared type, nearest first.
    ///
    /// Stops at the first external base or at a repeated type.
    #[must_use]
    pub fn ancestors(&self, id: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([id]);
        let mut current = self.base_id(id);
        while let Some(base) = current {
            if !seen.insert(base) {
                break;
            }
            chain.push(base);
            current = self.base_id(base);
        }
        chain
    }

    /// Properties of a type including inherited ones.
    ///
    /// A property redeclared by a derived type hides the inherited one.
    #[must_use]
    pub fn all_properties(&self, id: TypeId) -> Vec<&PropertyDef> {
        let mut seen = HashSet::new();
        let mut properties = Vec::new();
        for owner in std::iter::once(id).chain(self.ancestors(id)) {
            for property in &self.get(owner).properties {
                if seen.insert(property.name.as_str()) {
                    properties.push(property);
                }
            }
        }
        properties
    }
}

/// Returns `true` for namespaces that belong to the framework.
#[must_use]
pub fn is_library_namespace(namespace: &str) -> bool {
    ["System", "Microsoft"]
        .iter()
        .any(|root| namespace == *root || namespace.starts_with(&format!("{root}.")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module() -> ModuleName {
        ModuleName::new("Acme.Client")
    }

    #[test]
    fn test_marker_aliases() {
        assert_eq!(Marker::parse("TypeScripterIgnoreAttribute"), Some(Marker::Ignore));
        assert_eq!(Marker::parse("ignore"), Some(Marker::Ignore));
        assert_eq!(Marker::parse("FROMURI"), Some(Marker::ExpandInline));
        assert_eq!(Marker::parse("HttpPost"), Some(Marker::HttpPost));
        assert_eq!(
            Marker::parse("ITypeScripterEmitStaticReadonlyMembers"),
            Some(Marker::EmitStaticReadonly)
        );
        assert_eq!(Marker::parse("Authorize"), None);
    }

    #[test]
    fn test_marker_set() {
        let set = MarkerSet::from_names(&["httpGet", "unknown", "utcDate"]);
        assert!(set.contains(Marker::HttpGet));
        assert!(set.contains(Marker::UtcDate));
        assert!(!set.contains(Marker::Ignore));
        assert_eq!(set.iter().count(), 2);
        assert!(MarkerSet::new().is_empty());
    }

    #[test]
    fn test_classify_external_names() {
        assert_eq!(ExternalKind::classify("System.Boolean"), ExternalKind::Boolean);
        assert_eq!(ExternalKind::classify("System.Guid"), ExternalKind::Text);
        assert_eq!(ExternalKind::classify("System.DateTimeOffset"), ExternalKind::Date);
        assert_eq!(
            ExternalKind::classify("System.Collections.Generic.IEnumerable"),
            ExternalKind::Sequence
        );
        assert_eq!(ExternalKind::classify("System.Nullable`1"), ExternalKind::Nullable);
        assert_eq!(ExternalKind::classify("System.Threading.Tasks.Task"), ExternalKind::Task);
        assert_eq!(ExternalKind::classify("Newtonsoft.Json.Linq.JObject"), ExternalKind::Other);
    }

    #[test]
    fn test_duplicate_declaration_rejected() {
        let mut registry = TypeRegistry::new();
        registry
            .declare(&module(), "Acme", "Widget", TypeKind::Class)
            .unwrap();
        let err = registry
            .declare(&module(), "Acme", "Widget", TypeKind::Class)
            .unwrap_err();
        assert!(err.is_module_error());
    }

    #[test]
    fn test_same_name_in_two_modules_is_two_types() {
        let mut registry = TypeRegistry::new();
        let a = registry
            .declare(&ModuleName::new("B.Client"), "Acme", "Widget", TypeKind::Class)
            .unwrap();
        let b = registry
            .declare(&ModuleName::new("A.Client"), "Acme", "Widget", TypeKind::Class)
            .unwrap();
        assert_ne!(a, b);

        // Same module wins, then the module that sorts first.
        assert_eq!(registry.lookup("Acme.Widget", &ModuleName::new("B.Client")), Some(a));
        assert_eq!(registry.lookup("Acme.Widget", &ModuleName::new("C.Client")), Some(b));
    }

    #[test]
    fn test_resolve_and_display() {
        let mut registry = TypeRegistry::new();
        let widget = registry
            .declare(&module(), "Acme", "Widget", TypeKind::Class)
            .unwrap();
        let expr = TypeExpr::parse("Dictionary<string, Acme.Widget[]>").unwrap();
        let ty = registry.resolve(&expr, &module());

        let TypeRef::External { kind, args, .. } = &ty else {
            panic!("expected external");
        };
        assert_eq!(*kind, ExternalKind::Map);
        assert_eq!(args[1], TypeRef::declared(widget).array_of());
        assert_eq!(registry.display(&ty), "Dictionary<string, Acme.Widget[]>");
    }

    #[test]
    fn test_library_namespaces_are_not_models() {
        let mut registry = TypeRegistry::new();
        let sys = registry
            .declare(&module(), "System.Web", "Thing", TypeKind::Class)
            .unwrap();
        let ms = registry
            .declare(&module(), "Microsoft", "Other", TypeKind::Class)
            .unwrap();
        let own = registry
            .declare(&module(), "Systematic", "Model", TypeKind::Class)
            .unwrap();
        let st = registry
            .declare(&module(), "Acme", "Point", TypeKind::Struct)
            .unwrap();
        assert!(!registry.is_model(sys));
        assert!(!registry.is_model(ms));
        assert!(registry.is_model(own));
        assert!(!registry.is_model(st));
    }

    #[test]
    fn test_inherited_properties_and_cyclic_bases() {
        let mut registry = TypeRegistry::new();
        let base = registry
            .declare(&module(), "Acme", "Entity", TypeKind::Class)
            .unwrap();
        let derived = registry
            .declare(&module(), "Acme", "Widget", TypeKind::Class)
            .unwrap();

        registry.get_mut(base).properties.push(PropertyDef {
            name: "Id".into(),
            ty: TypeRef::external("int"),
            markers: MarkerSet::new(),
            doc: None,
        });
        registry.get_mut(derived).base = Some(TypeRef::declared(base));
        registry.get_mut(derived).properties.push(PropertyDef {
            name: "Name".into(),
            ty: TypeRef::external("string"),
            markers: MarkerSet::new(),
            doc: None,
        });

        let names: Vec<&str> = registry
            .all_properties(derived)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Name", "Id"]);
        assert!(registry.is_subtype_of(derived, base));
        assert!(!registry.is_subtype_of(base, derived));
        assert_eq!(registry.model_base(derived), Some(base));

        // Malformed metadata: a base cycle must not hang.
        registry.get_mut(base).base = Some(TypeRef::declared(derived));
        assert_eq!(registry.ancestors(derived), vec![base]);
        assert_eq!(registry.all_properties(derived).len(), 2);
    }

    #[test]
    fn test_ignored_base_is_not_a_model_base() {
        let mut registry = TypeRegistry::new();
        let hidden = registry
            .declare(&module(), "Acme", "Hidden", TypeKind::Class)
            .unwrap();
        let child = registry
            .declare(&module(), "Acme", "Child", TypeKind::Class)
            .unwrap();
        registry.get_mut(child).base = Some(TypeRef::declared(hidden));
        assert_eq!(registry.model_base(child), Some(hidden));

        registry.get_mut(hidden).markers.insert(Marker::Ignore);
        assert_eq!(registry.model_base(child), None);
        assert!(registry.is_subtype_of(child, hidden));
    }

    #[test]
    fn test_void_detection() {
        assert!(TypeRef::external("System.Void").is_void());
        assert!(TypeRef::external("Task").is_void());
        let task_of_int = TypeRef::External {
            name: "Task".into(),
            kind: ExternalKind::Task,
            args: vec![TypeRef::external("int")],
        };
        assert!(!task_of_int.is_void());
    }
}

//! Model graph discovery.
//!
//! Starting from the return and parameter types of every operation,
//! [`Discovery::discover`] computes the closed set of models and enums the
//! generated code needs:
//!
//! 1. Seeds: the model types of every return and parameter type.
//! 2. Derived closure: every declared subtype of a seed from the seed's own
//!    module is added once.
//! 3. Reachability walk: a depth-first closure over property types and
//!    model bases, with a visited set keyed by [`TypeId`].
//!
//! The walk visits each type once, so cycles and self references terminate.
//!
//! # Examples
//!
//! ```
//! use modelgen_core::{ModuleName, Operation, TypeKind, TypeRef, TypeRegistry};
//! use modelgen_introspector::Discovery;
//!
//! let module = ModuleName::new("Acme");
//! let mut registry = TypeRegistry::new();
//! let node = registry.declare(&module, "Acme", "Node", TypeKind::Class).unwrap();
//! registry.get_mut(node).properties.push(modelgen_core::PropertyDef {
//!     name: "Children".into(),
//!     ty: TypeRef::declared(node).array_of(),
//!     markers: Default::default(),
//!     doc: None,
//! });
//!
//! let operation = Operation {
//!     name: "GetTree".into(),
//!     verb: None,
//!     group: "Tree".into(),
//!     parameters: vec![],
//!     returns: Some(TypeRef::declared(node)),
//! };
//!
//! let models = Discovery::new(&registry).discover([&operation]);
//! assert_eq!(models.len(), 1);
//! assert!(models.contains(node));
//! ```

use modelgen_core::{Marker, ModelSet, Operation, TypeId, TypeRef, TypeRegistry};

/// Discovery over one registry.
#[derive(Debug, Clone, Copy)]
pub struct Discovery<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> Discovery<'a> {
    /// Creates a discovery pass over a registry.
    #[must_use]
    pub const fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    /// Computes the model set reachable from the operations.
    pub fn discover<'o, I>(&self, operations: I) -> ModelSet
    where
        I: IntoIterator<Item = &'o Operation>,
    {
        let seeds = self.seeds(operations);
        let closed = self.derived_closure(&seeds);
        let models = self.walk(closed);
        tracing::debug!(
            "Discovery: {} seed(s), {} model(s)",
            seeds.len(),
            models.len()
        );
        models
    }

    /// Model types named directly by operation signatures.
    pub fn seeds<'o, I>(&self, operations: I) -> ModelSet
    where
        I: IntoIterator<Item = &'o Operation>,
    {
        let mut seeds = ModelSet::new();
        for operation in operations {
            if let Some(returns) = &operation.returns {
                seeds.extend(self.model_types(returns));
            }
            for parameter in &operation.parameters {
                seeds.extend(self.model_types(&parameter.ty));
            }
        }
        seeds
    }

    /// Model types a single reference contributes.
    ///
    /// Ignored types contribute nothing. A model or enum contributes itself,
    /// and its base when that is a model. Arrays contribute their element's
    /// model types, and every generic, declared or not, those of its
    /// arguments.
    #[must_use]
    pub fn model_types(&self, ty: &TypeRef) -> Vec<TypeId> {
        let mut found = Vec::new();
        self.collect_model_types(ty, &mut found);
        found
    }

    fn collect_model_types(&self, ty: &TypeRef, found: &mut Vec<TypeId>) {
        match ty {
            TypeRef::Array(element) => self.collect_model_types(element, found),
            TypeRef::External { args, .. } => {
                for arg in args {
                    self.collect_model_types(arg, found);
                }
            }
            TypeRef::Declared { id, args } => {
                if self.registry.get(*id).has_marker(Marker::Ignore) {
                    return;
                }
                if self.registry.is_model_or_enum(*id) {
                    found.push(*id);
                }
                for arg in args {
                    self.collect_model_types(arg, found);
                }
                if let Some(base) = self.registry.model_base(*id) {
                    found.push(base);
                }
            }
        }
    }

    /// Adds every subtype of a seed model declared in the seed's module.
    #[must_use]
    pub fn derived_closure(&self, seeds: &ModelSet) -> ModelSet {
        let mut closed = seeds.clone();
        for seed in seeds.sorted(self.registry) {
            let module = &self.registry.get(seed).module;
            for candidate in self.registry.iter() {
                if candidate.id != seed
                    && &candidate.module == module
                    && self.is_candidate(candidate.id)
                    && self.registry.is_subtype_of(candidate.id, seed)
                {
                    closed.insert(candidate.id);
                }
            }
        }
        closed
    }

    fn is_candidate(&self, id: TypeId) -> bool {
        self.registry.is_model_or_enum(id) && !self.registry.get(id).has_marker(Marker::Ignore)
    }

    fn walk(&self, start: ModelSet) -> ModelSet {
        let mut stack = start.sorted(self.registry);
        let mut visited = start;

        while let Some(id) = stack.pop() {
            let properties = self.registry.all_properties(id);
            let reachable = properties
                .iter()
                .flat_map(|p| self.model_types(&p.ty))
                .chain(self.registry.model_base(id));

            for next in reachable {
                if self.is_candidate(next) && visited.insert(next) {
                    stack.push(next);
                }
            }
        }
        visited
    }
}

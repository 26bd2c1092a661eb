//! The set of discovered models.

use crate::metadata::TypeRegistry;
use crate::TypeId;
use std::collections::HashSet;

/// Closed set of model and enum declarations to generate.
///
/// Membership is keyed by [`TypeId`]; output order is always the total
/// order (qualified name, module) so generated files never depend on
/// traversal order.
///
/// # Examples
///
/// ```
/// use modelgen_core::{ModelSet, ModuleName, TypeKind, TypeRegistry};
///
/// let module = ModuleName::new("Acme.Client");
/// let mut registry = TypeRegistry::new();
/// let b = registry.declare(&module, "Acme", "B", TypeKind::Class).unwrap();
/// let a = registry.declare(&module, "Acme", "A", TypeKind::Class).unwrap();
///
/// let mut set = ModelSet::new();
/// assert!(set.insert(b));
/// assert!(set.insert(a));
/// assert!(!set.insert(a));
/// assert_eq!(set.sorted(&registry), vec![a, b]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSet {
    members: HashSet<TypeId>,
}

impl ModelSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type. Returns `false` if it was already present.
    pub fn insert(&mut self, id: TypeId) -> bool {
        self.members.insert(id)
    }

    /// Returns `true` if the type is a member.
    #[must_use]
    pub fn contains(&self, id: TypeId) -> bool {
        self.members.contains(&id)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in output order.
    #[must_use]
    pub fn sorted(&self, registry: &TypeRegistry) -> Vec<TypeId> {
        let mut ids: Vec<TypeId> = self.members.iter().copied().collect();
        ids.sort_by_cached_key(|id| {
            let def = registry.get(*id);
            (def.qualified_name(), def.module.clone())
        });
        ids
    }
}

impl Extend<TypeId> for ModelSet {
    fn extend<I: IntoIterator<Item = TypeId>>(&mut self, iter: I) {
        self.members.extend(iter);
    }
}

impl FromIterator<TypeId> for ModelSet {
    fn from_iter<I: IntoIterator<Item = TypeId>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ModuleName, TypeKind};

    #[test]
    fn test_order_is_by_qualified_name_then_module() {
        let mut registry = TypeRegistry::new();
        let z = registry
            .declare(&ModuleName::new("Z"), "Acme", "Widget", TypeKind::Class)
            .unwrap();
        let a = registry
            .declare(&ModuleName::new("A"), "Acme", "Widget", TypeKind::Class)
            .unwrap();
        let first = registry
            .declare(&ModuleName::new("Z"), "Aardvark", "Zebra", TypeKind::Class)
            .unwrap();

        let set: ModelSet = [z, a, first].into_iter().collect();
        assert_eq!(set.sorted(&registry), vec![first, a, z]);
        assert_eq!(set.len(), 3);
        assert!(set.contains(a));
    }
}

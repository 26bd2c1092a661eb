//! Strong domain types for modelgen.
//!
//! Type identity is an arena index into a [`TypeRegistry`](crate::TypeRegistry),
//! never a name: two distinct declared types may share a short name, and
//! the registry keeps them apart.
//!
//! # Examples
//!
//! ```
//! use modelgen_core::{ModuleName, TypeId};
//!
//! let module = ModuleName::new("Acme.Client");
//! assert_eq!(module.as_str(), "Acme.Client");
//!
//! let id = TypeId::from_index(3);
//! assert_eq!(id.index(), 3);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a declared type (newtype over an arena index).
///
/// Only a [`TypeRegistry`](crate::TypeRegistry) hands out meaningful ids;
/// an id is valid for the registry that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(usize);

impl TypeId {
    /// Wraps a raw arena index.
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Name of a metadata module (newtype over String).
///
/// A module is one loaded metadata document. Its name participates in type
/// identity together with the qualified type name.
///
/// # Examples
///
/// ```
/// use modelgen_core::ModuleName;
///
/// let a = ModuleName::new("Acme.Client");
/// let b: ModuleName = "Acme.Client".into();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleName(String);

impl ModuleName {
    /// Creates a new module name.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the module name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ModuleName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ModuleName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_id_ordering() {
        assert!(TypeId::from_index(1) < TypeId::from_index(2));
        assert_eq!(TypeId::from_index(7).to_string(), "#7");
    }

    #[test]
    fn test_module_name_ordering() {
        let mut names = [ModuleName::new("b"), ModuleName::new("a")];
        names.sort();
        assert_eq!(names[0].as_str(), "a");
    }
}

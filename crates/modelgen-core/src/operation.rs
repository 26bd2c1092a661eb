//! Entry-point operations.
//!
//! A [`Controller`] is a declared class whose base type marks it as an API
//! group; each of its public methods becomes an [`Operation`].

use crate::metadata::{Marker, MarkerSet, TypeRef};
use crate::TypeId;
use serde::Serialize;
use std::fmt;

/// HTTP verb classification of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpVerb {
    /// Read; parameters travel in the query string
    Get,
    /// Update; parameters travel in the query string
    Put,
    /// Create; the first parameter travels as the body
    Post,
    /// Delete; parameters travel in the query string
    Delete,
}

impl HttpVerb {
    /// Lowercase verb, as used in client calls.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Post => "post",
            Self::Delete => "delete",
        }
    }

    /// Returns `true` for the verb that sends a body.
    #[must_use]
    pub const fn sends_body(&self) -> bool {
        matches!(self, Self::Post)
    }

    /// Classifies a method by its markers, then by its name prefix.
    ///
    /// `Update…` is a create-style call and classifies as `Post`.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_core::{HttpVerb, MarkerSet};
    ///
    /// let none = MarkerSet::new();
    /// assert_eq!(HttpVerb::classify("GetWidget", none), Some(HttpVerb::Get));
    /// assert_eq!(HttpVerb::classify("UpdateWidget", none), Some(HttpVerb::Post));
    /// assert_eq!(HttpVerb::classify("Frobnicate", none), None);
    ///
    /// let marked = MarkerSet::from_names(&["HttpDelete"]);
    /// assert_eq!(HttpVerb::classify("GetWidget", marked), Some(HttpVerb::Delete));
    /// ```
    #[must_use]
    pub fn classify(method_name: &str, markers: MarkerSet) -> Option<Self> {
        if markers.contains(Marker::HttpGet) {
            return Some(Self::Get);
        }
        if markers.contains(Marker::HttpPut) {
            return Some(Self::Put);
        }
        if markers.contains(Marker::HttpPost) {
            return Some(Self::Post);
        }
        if markers.contains(Marker::HttpDelete) {
            return Some(Self::Delete);
        }

        [
            ("Get", Self::Get),
            ("Put", Self::Put),
            ("Post", Self::Post),
            ("Update", Self::Post),
            ("Delete", Self::Delete),
        ]
        .into_iter()
        .find(|(prefix, _)| method_name.starts_with(*prefix))
        .map(|(_, verb)| verb)
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation parameter, after inline expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name as sent to the server
    pub name: String,
    /// Parameter type
    pub ty: TypeRef,
}

/// One callable entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Method name
    pub name: String,
    /// Verb, or `None` when the method could not be classified
    pub verb: Option<HttpVerb>,
    /// Group (controller name without the `Controller` suffix)
    pub group: String,
    /// Ordered parameters
    pub parameters: Vec<Parameter>,
    /// Return type; `None` for `void`
    pub returns: Option<TypeRef>,
}

/// Controller: a named group of operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controller {
    /// Declaring type
    pub id: TypeId,
    /// Type name
    pub name: String,
    /// Group name used in URLs and façade members
    pub group: String,
    /// Operations in declaration order
    pub operations: Vec<Operation>,
}

impl Controller {
    /// Derives the group name from a controller type name.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_core::Controller;
    ///
    /// assert_eq!(Controller::group_name("WidgetController"), "Widget");
    /// assert_eq!(Controller::group_name("Reports"), "Reports");
    /// ```
    #[must_use]
    pub fn group_name(type_name: &str) -> String {
        type_name
            .strip_suffix("Controller")
            .filter(|s| !s.is_empty())
            .unwrap_or(type_name)
            .to_string()
    }
}

/// Lowercases the first character.
///
/// # Examples
///
/// ```
/// use modelgen_core::camelize;
///
/// assert_eq!(camelize("GetWidget"), "getWidget");
/// assert_eq!(camelize("URL"), "uRL");
/// assert_eq!(camelize(""), "");
/// ```
#[must_use]
pub fn camelize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

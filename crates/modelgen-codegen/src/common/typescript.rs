//! TypeScript expression helpers.
//!
//! Small pure functions that build the expressions the templates splice
//! into generated code: request URLs, query strings, response conversion
//! and model construction pipelines.
//!
//! # Examples
//!
//! ```
//! use modelgen_codegen::common::typescript::combine_uri;
//!
//! assert_eq!(
//!     combine_uri(&["${this.apiRelativePath}", "Widget", "GetWidget"]),
//!     "${this.apiRelativePath}/Widget/GetWidget"
//! );
//! ```

use modelgen_core::{MappedType, PrimitiveKind, TypeKind, TypeRegistry};

/// Joins URL segments with exactly one `/` between them.
///
/// # Examples
///
/// ```
/// use modelgen_codegen::common::typescript::combine_uri;
///
/// assert_eq!(combine_uri(&["api/", "/Widget", "Get"]), "api/Widget/Get");
/// assert_eq!(combine_uri(&["api"]), "api");
/// ```
#[must_use]
pub fn combine_uri(parts: &[&str]) -> String {
    let mut uri = String::new();
    for (index, part) in parts.iter().enumerate() {
        if index == 0 {
            uri.push_str(part);
            continue;
        }
        if !uri.ends_with('/') {
            uri.push('/');
        }
        uri.push_str(part.trim_start_matches('/'));
    }
    uri
}

/// Query-string fragment for one parameter.
///
/// Dates are sent as ISO strings and arrays repeat the key per element.
///
/// # Examples
///
/// ```
/// use modelgen_codegen::common::typescript::query_argument;
/// use modelgen_core::{MappedType, PrimitiveKind};
///
/// let number = MappedType::Primitive(PrimitiveKind::Number);
/// assert_eq!(query_argument("id", &number), "id=${id}");
///
/// let date = MappedType::Date { utc: false };
/// assert_eq!(query_argument("from", &date), "from=${from.toISOString()}");
///
/// let ids = MappedType::Array(Box::new(number));
/// assert_eq!(query_argument("ids", &ids), "${ids.map(x => `ids=${x}`).join('&')}");
/// ```
#[must_use]
pub fn query_argument(name: &str, ty: &MappedType) -> String {
    match ty {
        MappedType::Date { .. } => format!("{name}=${{{name}.toISOString()}}"),
        MappedType::Array(_) => format!("${{{name}.map(x => `{name}=${{x}}`).join('&')}}"),
        _ => format!("{name}=${{{name}}}"),
    }
}

/// Appends the query string for `parameters` to `url`.
#[must_use]
pub fn with_query<'a, I>(url: String, parameters: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a MappedType)>,
{
    let query: Vec<String> = parameters
        .into_iter()
        .map(|(name, ty)| query_argument(name, ty))
        .collect();
    if query.is_empty() {
        url
    } else {
        format!("{url}?{}", query.join("&"))
    }
}

/// Returns the primitive for responses that arrive as plain text.
#[must_use]
pub const fn text_response(ty: &MappedType) -> Option<PrimitiveKind> {
    match ty {
        MappedType::Primitive(kind) => Some(*kind),
        _ => None,
    }
}

/// Generic argument for the HTTP call: `<T>` unless the body is text.
#[must_use]
pub fn type_argument(ty: &MappedType) -> String {
    if text_response(ty).is_some() {
        String::new()
    } else {
        format!("<{}>", ty.typescript_name())
    }
}

/// Closes the HTTP call, converting text responses to their primitive.
///
/// # Examples
///
/// ```
/// use modelgen_codegen::common::typescript::close_call;
/// use modelgen_core::{MappedType, PrimitiveKind};
///
/// assert_eq!(
///     close_call(&MappedType::Primitive(PrimitiveKind::Number)),
///     ", { responseType: 'text' }).pipe(map( x => Number(x)))"
/// );
/// assert_eq!(close_call(&MappedType::Any), ")");
/// ```
#[must_use]
pub fn close_call(ty: &MappedType) -> String {
    match text_response(ty) {
        Some(kind) => {
            let convert = match kind {
                PrimitiveKind::Boolean => "JSON.parse(x) === true",
                PrimitiveKind::Number => "Number(x)",
                PrimitiveKind::String => "x",
            };
            format!(", {{ responseType: 'text' }}).pipe(map( x => {convert}))")
        }
        None => ")".to_string(),
    }
}

/// A response that must be passed through a model constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Construction {
    /// Model short name
    pub name: String,
    /// The response is an array of the model
    pub array: bool,
}

impl Construction {
    /// Returns the construction a mapped type needs, if any.
    ///
    /// Only concrete classes can be constructed; enums and abstract
    /// models pass through as plain values.
    #[must_use]
    pub fn of(ty: &MappedType, registry: &TypeRegistry) -> Option<Self> {
        let (id, name) = ty.model()?;
        let def = registry.get(id);
        if def.kind != TypeKind::Class || def.is_abstract {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            array: ty.is_array(),
        })
    }
}

/// RxJS pipeline for an `HttpClient` response.
///
/// # Examples
///
/// ```
/// use modelgen_codegen::common::typescript::{Construction, client_pipe};
///
/// let single = Construction { name: "Widget".into(), array: false };
/// assert_eq!(
///     client_pipe(Some(&single)),
///     "pipe(map(value => new Widget(value))).pipe(catchError(this.handleError))"
/// );
/// assert_eq!(client_pipe(None), "pipe(catchError(this.handleError))");
/// ```
#[must_use]
pub fn client_pipe(construction: Option<&Construction>) -> String {
    let mut steps = Vec::with_capacity(2);
    match construction {
        Some(Construction { name, array: true }) => steps.push(format!(
            "pipe(map(value => Array.isArray(value) ? value.map(x => new {name}(x)) : null))"
        )),
        Some(Construction { name, array: false }) => {
            steps.push(format!("pipe(map(value => new {name}(value)))"));
        }
        None => {}
    }
    steps.push("pipe(catchError(this.handleError))".to_string());
    steps.join(".")
}

/// Result mapper for a legacy `Http` response.
#[must_use]
pub fn legacy_mapper(construction: Option<&Construction>) -> String {
    match construction {
        Some(Construction { name, array: true }) => format!("res.json().map(r => new {name}(r))"),
        Some(Construction { name, array: false }) => format!("new {name}(res.json())"),
        None => "res.json()".to_string(),
    }
}

/// `.then(...)` step for a Promise response.
#[must_use]
pub fn promise_then(construction: Option<&Construction>) -> String {
    match construction {
        Some(Construction { name, array: true }) => {
            format!(".then(value => value.map(x => {name}_fromJsonObj(x)))")
        }
        Some(Construction { name, array: false }) => {
            format!(".then(value => {name}_fromJsonObj(value))")
        }
        None => String::new(),
    }
}

/// Single-quoted TypeScript string literal.
///
/// # Examples
///
/// ```
/// use modelgen_codegen::common::typescript::quote;
///
/// assert_eq!(quote("it's"), r"'it\'s'");
/// ```
#[must_use]
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('\'');
    quoted
}

//! Type expressions.
//!
//! Metadata documents spell type references as strings such as
//! `System.Collections.Generic.List<Acme.Widget>`, `System.Int32[]` or
//! `System.DateTime?`. [`TypeExpr::parse`] turns them into a tree; the
//! registry then resolves each name to a declared or external type.
//!
//! Grammar:
//!
//! ```text
//! expr   := name args? suffix*
//! args   := '<' expr (',' expr)* '>'
//! suffix := '[]' | '?'
//! ```
//!
//! `T?` is shorthand for `System.Nullable<T>`.
//!
//! # Examples
//!
//! ```
//! use modelgen_core::TypeExpr;
//!
//! let expr = TypeExpr::parse("List<Acme.Widget>[]").unwrap();
//! assert_eq!(expr.to_string(), "List<Acme.Widget>[]");
//!
//! let nullable = TypeExpr::parse("int?").unwrap();
//! assert_eq!(nullable.to_string(), "System.Nullable<int>");
//! ```

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;

/// Name used for `T?`.
pub const NULLABLE_NAME: &str = "System.Nullable";

/// Parsed type reference.
///
/// Deserializes from its string form, so documents reject malformed
/// expressions while they are parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum TypeExpr {
    /// Named type with optional generic arguments
    Named {
        /// Qualified (or alias) name
        name: String,
        /// Generic arguments, in order
        args: Vec<TypeExpr>,
    },
    /// Single-dimension array of the element type
    Array(Box<TypeExpr>),
}

impl TypeExpr {
    /// Creates a non-generic named expression.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Parses a type expression.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTypeExpression` if the input does not match the
    /// grammar.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_core::TypeExpr;
    ///
    /// assert!(TypeExpr::parse("Dictionary<string, int>").is_ok());
    /// assert!(TypeExpr::parse("List<").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let mut parser = Parser {
            input,
            chars: input.char_indices().peekable(),
        };
        let expr = parser.expr()?;
        parser.skip_whitespace();
        if let Some((pos, c)) = parser.chars.peek().copied() {
            return Err(parser.error(format!("unexpected '{c}' at offset {pos}")));
        }
        Ok(expr)
    }
}

impl TryFrom<String> for TypeExpr {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            Self::Array(element) => write!(f, "{element}[]"),
        }
    }
}

struct Parser<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl Parser<'_> {
    fn error(&self, reason: impl Into<String>) -> Error {
        Error::InvalidTypeExpression {
            expression: self.input.to_string(),
            reason: reason.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        self.chars.next_if(|&(_, c)| c == expected).is_some()
    }

    fn name(&mut self) -> Result<String> {
        self.skip_whitespace();
        let mut name = String::new();
        while let Some((_, c)) = self
            .chars
            .next_if(|&(_, c)| c.is_alphanumeric() || matches!(c, '_' | '.' | '`' | '+'))
        {
            name.push(c);
        }
        if name.is_empty() {
            return Err(match self.chars.peek().copied() {
                Some((pos, c)) => self.error(format!("expected a type name at offset {pos}, found '{c}'")),
                None => self.error("unexpected end of input"),
            });
        }
        if name.starts_with('.') || name.ends_with('.') || name.contains("..") {
            return Err(self.error(format!("malformed qualified name '{name}'")));
        }
        Ok(name)
    }

    fn expr(&mut self) -> Result<TypeExpr> {
        let name = self.name()?;
        let mut args = Vec::new();

        if self.eat('<') {
            loop {
                args.push(self.expr()?);
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(self.error("expected ',' or '>' in generic argument list"));
            }
        }

        let mut expr = TypeExpr::Named { name, args };
        loop {
            if self.eat('[') {
                if !self.eat(']') {
                    return Err(self.error("expected ']' after '['"));
                }
                expr = TypeExpr::Array(Box::new(expr));
            } else if self.eat('?') {
                expr = TypeExpr::Named {
                    name: NULLABLE_NAME.to_string(),
                    args: vec![expr],
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_name() {
        assert_eq!(
            TypeExpr::parse("Acme.Models.Widget").unwrap(),
            TypeExpr::named("Acme.Models.Widget")
        );
    }

    #[test]
    fn test_parse_nested_generics() {
        let expr = TypeExpr::parse("Task<List<Dictionary<string, Acme.Widget>>>").unwrap();
        assert_eq!(
            expr.to_string(),
            "Task<List<Dictionary<string, Acme.Widget>>>"
        );
    }

    #[test]
    fn test_parse_array_of_nullable() {
        let expr = TypeExpr::parse("int?[]").unwrap();
        let TypeExpr::Array(element) = expr else {
            panic!("expected array");
        };
        assert_eq!(element.to_string(), "System.Nullable<int>");
    }

    #[test]
    fn test_parse_jagged_array() {
        let expr = TypeExpr::parse("string[][]").unwrap();
        assert_eq!(expr.to_string(), "string[][]");
    }

    #[test]
    fn test_whitespace_is_ignored() {
        let expr = TypeExpr::parse("  List < int > [ ] ").unwrap();
        assert_eq!(expr.to_string(), "List<int>[]");
    }

    #[test]
    fn test_deserialize_from_string() {
        let expr: TypeExpr = serde_json::from_str(r#""List<int>""#).unwrap();
        assert_eq!(expr.to_string(), "List<int>");
        assert!(serde_json::from_str::<TypeExpr>(r#""List<""#).is_err());
    }

    #[test]
    fn test_malformed_expressions() {
        for input in ["", "List<", "List<int", "List<>", "int[", "a..b", "int]", ".Widget"] {
            let err = TypeExpr::parse(input).unwrap_err();
            assert!(err.is_module_error(), "{input} should fail: {err}");
        }
    }
}

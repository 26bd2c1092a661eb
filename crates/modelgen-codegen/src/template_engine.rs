//! Template engine for code generation using Handlebars.
//!
//! Wraps Handlebars with the built-in TypeScript templates registered and
//! HTML escaping disabled, since every template emits source code.
//!
//! # Examples
//!
//! ```
//! use modelgen_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new().unwrap();
//! let index = engine
//!     .render("common/index", &json!({ "entries": ["Widget"] }))
//!     .unwrap();
//! assert_eq!(index, "export * from './Widget';\n");
//! ```

use handlebars::Handlebars;
use modelgen_core::{Error, Result};
use serde::Serialize;

/// Built-in templates, by registered name.
const TEMPLATES: &[(&str, &str)] = &[
    (
        "angular/class",
        include_str!("../templates/angular/class.ts.hbs"),
    ),
    (
        "angular/service",
        include_str!("../templates/angular/service.ts.hbs"),
    ),
    (
        "react/interface",
        include_str!("../templates/react/interface.ts.hbs"),
    ),
    (
        "react/service",
        include_str!("../templates/react/service.ts.hbs"),
    ),
    ("common/enum", include_str!("../templates/common/enum.ts.hbs")),
    (
        "common/index",
        include_str!("../templates/common/index.ts.hbs"),
    ),
];

/// Template engine for code generation.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Creates a new template engine with the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if a built-in template fails to parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_codegen::template_engine::TemplateEngine;
    ///
    /// let engine = TemplateEngine::new().unwrap();
    /// ```
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        for (name, template) in TEMPLATES {
            handlebars
                .register_template_string(name, template)
                .map_err(|e| Error::RenderError {
                    artifact: (*name).to_string(),
                    message: format!("failed to register template: {e}"),
                })?;
        }

        Ok(Self { handlebars })
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if the template is not registered, the context
    /// cannot be serialized, or a variable the template uses is missing.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::RenderError {
                artifact: template_name.to_string(),
                message: e.to_string(),
            })
    }

    /// Registers an additional template, replacing one of the same name.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if the template string is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_codegen::template_engine::TemplateEngine;
    ///
    /// let mut engine = TemplateEngine::new().unwrap();
    /// engine
    ///     .register_template_string("banner", "// {{name}}")
    ///     .unwrap();
    /// ```
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::RenderError {
                artifact: name.to_string(),
                message: format!("failed to register template: {e}"),
            })
    }

    /// Returns `true` if a template of that name is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ========================================================================
    // Registration Tests
    // ========================================================================

    #[test]
    fn test_builtin_templates_registered() {
        let engine = TemplateEngine::new().unwrap();
        for (name, _) in TEMPLATES {
            assert!(engine.has_template(name), "{name}");
        }
    }

    #[test]
    fn test_register_invalid_template_syntax() {
        let mut engine = TemplateEngine::new().unwrap();
        let result = engine.register_template_string("invalid", "Hello {{name");
        assert!(result.unwrap_err().is_render_error());
    }

    // ========================================================================
    // Rendering Tests
    // ========================================================================

    #[test]
    fn test_render_enum() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine
            .render(
                "common/enum",
                &json!({
                    "name": "Color",
                    "values": [ { "name": "Red", "value": 0 }, { "name": "Blue", "value": 4 } ]
                }),
            )
            .unwrap();
        assert_eq!(rendered, "export enum Color {\n\tRed = 0,\n\tBlue = 4,\n}\n");
    }

    #[test]
    fn test_output_is_not_html_escaped() {
        let mut engine = TemplateEngine::new().unwrap();
        engine
            .register_template_string("raw", "{{value}}")
            .unwrap();
        let rendered = engine
            .render("raw", &json!({ "value": "Observable<Widget> => x && 'y'" }))
            .unwrap();
        assert_eq!(rendered, "Observable<Widget> => x && 'y'");
    }

    #[test]
    fn test_render_nonexistent_template() {
        let engine = TemplateEngine::new().unwrap();
        let err = engine.render("nonexistent/template", &json!({})).unwrap_err();
        assert!(matches!(err, Error::RenderError { ref artifact, .. } if artifact == "nonexistent/template"));
    }

    #[test]
    fn test_strict_mode_fails_on_missing_variable() {
        let engine = TemplateEngine::new().unwrap();
        let result = engine.render("common/enum", &json!({ "values": [] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TemplateEngine>();
    }
}

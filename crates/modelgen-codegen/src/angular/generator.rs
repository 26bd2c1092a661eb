//! Angular dialect.
//!
//! Models become classes with a `Partial<T>` constructor that re-hydrates
//! nested models and dates. The data service is an `@Injectable()` class
//! over `HttpClient` (or the legacy `Http` module) returning `Observable`s.

use crate::angular::types::{ClassContext, FieldContext, ServiceContext};
use crate::common::typescript::{client_pipe, close_call, legacy_mapper, type_argument};
use crate::common::{Facade, FacadeMethod, ModelView};
use crate::generator::Dialect;
use crate::template_engine::TemplateEngine;
use modelgen_core::{HttpModuleKind, Options, Result};

/// Renders Angular classes and the Observable data service.
#[derive(Debug, Clone, Copy)]
pub struct AngularDialect {
    combine_imports: bool,
    legacy_http: bool,
    handle_errors: bool,
}

impl AngularDialect {
    /// Creates the dialect from run options.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            combine_imports: options.combine_imports,
            legacy_http: options.http_module == HttpModuleKind::Http,
            handle_errors: options.handle_errors,
        }
    }

    /// Builds the class template context.
    #[must_use]
    pub fn class_context(&self, view: &ModelView<'_>) -> ClassContext {
        let uses_moment = view.uses_moment();
        ClassContext {
            name: view.def.name.clone(),
            is_abstract: view.def.is_abstract,
            base: view.base.map(|b| b.name.clone()),
            uses_moment,
            combine_imports: self.combine_imports,
            has_header: uses_moment || !view.imports.is_empty(),
            imports: view.imports.clone(),
            constants: view.constants.clone(),
            properties: view
                .declared
                .iter()
                .map(|p| FieldContext {
                    name: p.name.clone(),
                    type_name: p.ty.typescript_name(),
                    initializer: p.ty.initializer().map(str::to_string),
                })
                .collect(),
            hydrations: hydrations(view),
        }
    }

    /// Builds the service template context.
    #[must_use]
    pub fn service_context(&self, facade: &Facade, api_relative_path: &str) -> ServiceContext {
        ServiceContext {
            legacy_http: self.legacy_http,
            handle_errors: self.handle_errors,
            uses_moment: facade.uses_moment,
            combine_imports: self.combine_imports,
            imports: facade.imports.clone(),
            api_relative_path: api_relative_path.to_string(),
            groups: facade
                .groups
                .iter()
                .map(|group| group.context(|method| self.call(method)))
                .collect(),
        }
    }

    fn call(&self, method: &FacadeMethod) -> String {
        let verb = method.verb.as_str();
        let construction = method.construction.as_ref();
        if self.legacy_http {
            format!(
                "{verb}(`{}`{}).pipe(map((res: Response) => {}), catchError(this.handleError))",
                method.url,
                method.body,
                legacy_mapper(construction)
            )
        } else {
            format!(
                "{verb}{}(`{}`{}{}.{}",
                type_argument(&method.returns),
                method.url,
                method.body,
                close_call(&method.returns),
                client_pipe(construction)
            )
        }
    }
}

impl Dialect for AngularDialect {
    fn render_model(&self, engine: &TemplateEngine<'_>, view: &ModelView<'_>) -> Result<String> {
        engine.render("angular/class", &self.class_context(view))
    }

    fn render_service(
        &self,
        engine: &TemplateEngine<'_>,
        facade: &Facade,
        api_relative_path: &str,
    ) -> Result<String> {
        engine.render(
            "angular/service",
            &self.service_context(facade, api_relative_path),
        )
    }
}

fn hydrations(view: &ModelView<'_>) -> Vec<String> {
    let models = view
        .model_properties()
        .map(|(p, model)| format!("if (fields.{p}) {{ fields.{p} = new {model}(fields.{p}); }}"));
    let dates = view
        .date_properties(false)
        .map(|p| format!("if (fields.{p}) {{ fields.{p} = moment(fields.{p}); }}"));
    let utc_dates = view
        .date_properties(true)
        .map(|p| format!("if (fields.{p}) {{ fields.{p} = moment.utc(fields.{p}); }}"));
    let arrays = view.model_array_properties().map(|(p, model)| {
        format!("if (fields.{p}) {{ fields.{p} = fields.{p}.map(x => new {model}(x)); }}")
    });

    models.chain(dates).chain(utc_dates).chain(arrays).collect()
}

//! React dialect.
//!
//! Models become interfaces plus a `_fromJsonObj` factory that revives
//! dates and nested models. The data service wraps an injected
//! `IDataServiceHttpClient` and returns Promises.

use crate::common::model::is_constructible;
use crate::common::typescript::promise_then;
use crate::common::{Facade, FacadeMethod, ModelView};
use crate::generator::Dialect;
use crate::react::types::{InterfaceContext, MemberContext, ServiceContext};
use crate::template_engine::TemplateEngine;
use modelgen_core::{Options, Result};

/// Renders React interfaces and the Promise data service.
#[derive(Debug, Clone, Copy)]
pub struct ReactDialect {
    combine_imports: bool,
}

impl ReactDialect {
    /// Creates the dialect from run options.
    #[must_use]
    pub const fn new(options: &Options) -> Self {
        Self {
            combine_imports: options.combine_imports,
        }
    }

    /// Builds the interface template context.
    #[must_use]
    pub fn interface_context(&self, view: &ModelView<'_>) -> InterfaceContext {
        let uses_moment = view.uses_moment();
        InterfaceContext {
            name: view.def.name.clone(),
            base: view.base.map(|b| b.name.clone()),
            uses_moment,
            combine_imports: self.combine_imports,
            has_header: uses_moment || !view.imports.is_empty(),
            imports: view.imports.clone(),
            properties: view
                .declared
                .iter()
                .map(|p| MemberContext {
                    name: p.name.clone(),
                    type_name: p.ty.typescript_name(),
                })
                .collect(),
            factory: view.is_constructible(),
            base_factory: view
                .base
                .filter(|b| is_constructible(b))
                .map(|b| b.name.clone()),
            segments: segments(view),
        }
    }

    /// Builds the service template context.
    #[must_use]
    pub fn service_context(&self, facade: &Facade, api_relative_path: &str) -> ServiceContext {
        ServiceContext {
            uses_moment: facade.uses_moment,
            combine_imports: self.combine_imports,
            imports: facade.imports.clone(),
            api_relative_path: api_relative_path.to_string(),
            groups: facade.groups.iter().map(|g| g.context(call)).collect(),
        }
    }
}

impl Dialect for ReactDialect {
    fn render_model(&self, engine: &TemplateEngine<'_>, view: &ModelView<'_>) -> Result<String> {
        engine.render("react/interface", &self.interface_context(view))
    }

    fn render_service(
        &self,
        engine: &TemplateEngine<'_>,
        facade: &Facade,
        api_relative_path: &str,
    ) -> Result<String> {
        engine.render(
            "react/service",
            &self.service_context(facade, api_relative_path),
        )
    }
}

fn call(method: &FacadeMethod) -> String {
    format!(
        "{}<{}>(`{}`{}){}",
        method.verb.as_str(),
        method.returns.typescript_name(),
        method.url,
        method.body,
        promise_then(method.construction.as_ref())
    )
}

fn segments(view: &ModelView<'_>) -> Vec<String> {
    let dates = view
        .date_properties(false)
        .map(|p| format!("{p}: obj.{p} && moment(obj.{p})"));
    let utc_dates = view
        .date_properties(true)
        .map(|p| format!("{p}: obj.{p} && moment.utc(obj.{p})"));
    let models = view
        .model_properties()
        .map(|(p, model)| format!("{p}: obj.{p} && {model}_fromJsonObj(obj.{p})"));
    let lists = view.model_array_properties().map(|(p, model)| {
        format!("{p}: obj.{p} && obj.{p}.map((x: any) => {model}_fromJsonObj(x))")
    });

    dates.chain(utc_dates).chain(models).chain(lists).collect()
}

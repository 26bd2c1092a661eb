//! TypeScript model and data service generation.
//!
//! Renders the models discovered by `modelgen-introspector` and the
//! controllers' operations into TypeScript using Handlebars templates.
//! Two dialects are available: Angular classes with an Observable data
//! service, and React interfaces with a Promise data service.
//!
//! # Architecture
//!
//! - [`common`]: dialect-independent views (`ModelView`, `Facade`) and
//!   TypeScript expression helpers
//! - [`angular`] and [`react`]: the two emission dialects
//! - [`schema`]: the JSON schema manifest
//! - [`generator`]: [`CodeGenerator`], which runs a whole generation

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod angular;
pub mod common;
pub mod generator;
pub mod react;
pub mod schema;
pub mod template_engine;

pub use common::{GeneratedCode, GeneratedFile};
pub use generator::{CodeGenerator, Dialect};
pub use schema::{SchemaField, SchemaModel, build_schema, render_schema};

//! Core types, errors and the type mapping engine for modelgen.
//!
//! This crate provides the foundations shared by every other crate in the
//! workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - Error hierarchy with contextual information
//! - Generation options and CLI strong types
//! - The metadata arena (`TypeRegistry`) and type expressions
//! - The type mapping engine (`TypeMapper`)
//! - Entry-point operations and the discovered `ModelSet`

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod cli;
mod config;
mod error;
mod mapping;
mod metadata;
mod model_set;
mod operation;
mod type_expr;
mod types;

pub use config::{
    DEFAULT_CONTROLLER_BASE, DEFAULT_FILE_PATTERN, DEFAULT_SCHEMA_PATH, GeneratorKind,
    HttpModuleKind, Options, OptionsBuilder, Settings,
};
pub use error::{Error, Result};
pub use mapping::{MappedType, PrimitiveKind, TypeMapper};
pub use metadata::{
    ConstantDef, EnumValue, ExternalKind, Marker, MarkerSet, MethodDef, ParameterDef,
    PropertyDef, TypeDef, TypeKind, TypeRef, TypeRegistry, is_library_namespace,
};
pub use model_set::ModelSet;
pub use operation::{Controller, HttpVerb, Operation, Parameter, camelize};
pub use type_expr::{NULLABLE_NAME, TypeExpr};
pub use types::{ModuleName, TypeId};

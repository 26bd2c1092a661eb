//! Angular emission dialect.

pub mod generator;
pub mod types;

pub use generator::AngularDialect;
pub use types::{ClassContext, FieldContext, ServiceContext};

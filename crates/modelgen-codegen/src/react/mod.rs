//! React emission dialect.

pub mod generator;
pub mod types;

pub use generator::ReactDialect;
pub use types::{InterfaceContext, MemberContext, ServiceContext};

//! Code shared by both emission dialects.

pub mod facade;
pub mod model;
pub mod types;
pub mod typescript;

pub use facade::{Facade, FacadeGroup, FacadeMethod, FacadeParameter, GroupContext, MethodContext};
pub use model::{EnumContext, ImportRef, MappedConstant, MappedProperty, ModelView};
pub use types::{GeneratedCode, GeneratedFile};

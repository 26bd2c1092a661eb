//! Command implementations for the modelgen CLI.
//!
//! Each command resolves its options, runs, and prints its result through
//! [`crate::formatters`].

pub mod completions;
pub mod generate;
pub mod inspect;

//! modelgen CLI library.
//!
//! Argument definitions, commands and output formatters, exposed as a
//! library so the binary stays thin and everything is testable.

#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unnecessary_wraps)]

pub mod cli;
pub mod commands;
pub mod formatters;
pub mod runner;

pub use cli::{Cli, Commands, InputArgs};

//! Output tree and destination sync for modelgen.
//!
//! A generation run's files are collected into an in-memory
//! [`FileSystem`] and then synced to the destination directory: files are
//! written only when their content changed, and stale top-level files are
//! deleted.
//!
//! # Examples
//!
//! ```
//! use modelgen_codegen::{GeneratedCode, GeneratedFile};
//! use modelgen_files::FilesBuilder;
//! # use tempfile::TempDir;
//!
//! # let temp = TempDir::new().unwrap();
//! let mut code = GeneratedCode::new();
//! code.add_file(GeneratedFile {
//!     path: "Widget.ts".to_string(),
//!     content: "export class Widget {\n}\n".to_string(),
//! });
//!
//! let report = FilesBuilder::from_generated_code(code)
//!     .build()?
//!     .sync_to(temp.path())?;
//!
//! assert_eq!(report.written, vec!["Widget.ts"]);
//! # Ok::<(), modelgen_files::FilesError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod builder;
pub mod filesystem;
pub mod sync;
pub mod types;

pub use builder::FilesBuilder;
pub use filesystem::FileSystem;
pub use sync::SyncReport;
pub use types::{FileEntry, FilePath, FilesError, Result};

//! Builder for the output tree.
//!
//! # Examples
//!
//! ```
//! use modelgen_files::FilesBuilder;
//!
//! let files = FilesBuilder::new()
//!     .add_file("Widget.ts", "export class Widget {\n}\n")
//!     .add_file("index.ts", "export * from './Widget';\n")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(files.file_count(), 2);
//! ```

use crate::filesystem::FileSystem;
use crate::types::{FilesError, Result};
use modelgen_codegen::GeneratedCode;
use std::path::Path;

/// Fluent builder for a [`FileSystem`].
///
/// Invalid paths are collected and the first one is reported by
/// [`FilesBuilder::build`].
#[derive(Debug, Default)]
pub struct FilesBuilder {
    files: FileSystem,
    errors: Vec<FilesError>,
}

impl FilesBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder holding every file of a generation run.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_files::FilesBuilder;
    /// use modelgen_codegen::{GeneratedCode, GeneratedFile};
    ///
    /// let mut code = GeneratedCode::new();
    /// code.add_file(GeneratedFile {
    ///     path: "./Schema.json".to_string(),
    ///     content: "[]".to_string(),
    /// });
    ///
    /// let files = FilesBuilder::from_generated_code(code).build().unwrap();
    /// assert!(files.exists("Schema.json"));
    /// ```
    #[must_use]
    pub fn from_generated_code(code: GeneratedCode) -> Self {
        code.files
            .into_iter()
            .fold(Self::new(), |builder, file| {
                builder.add_file(file.path, file.content)
            })
    }

    /// Adds a file.
    #[must_use]
    pub fn add_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        if let Err(e) = self.files.add_file(path, content) {
            self.errors.push(e);
        }
        self
    }

    /// Adds several files.
    #[must_use]
    pub fn add_files<P, C>(mut self, files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: AsRef<Path>,
        C: Into<String>,
    {
        for (path, content) in files {
            if let Err(e) = self.files.add_file(path, content) {
                self.errors.push(e);
            }
        }
        self
    }

    /// Number of files added so far.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.file_count()
    }

    /// Consumes the builder and returns the tree.
    ///
    /// # Errors
    ///
    /// Returns the first invalid path error, if any.
    ///
    /// ```
    /// use modelgen_files::FilesBuilder;
    ///
    /// let result = FilesBuilder::new().add_file("/absolute.ts", "").build();
    /// assert!(result.is_err());
    /// ```
    pub fn build(self) -> Result<FileSystem> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }
        Ok(self.files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelgen_codegen::GeneratedFile;

    #[test]
    fn test_builder_default() {
        let files = FilesBuilder::default().build().unwrap();
        assert_eq!(files.file_count(), 0);
    }

    #[test]
    fn test_add_files() {
        let builder = FilesBuilder::new().add_files([("a.ts", "a"), ("b.ts", "b")]);
        assert_eq!(builder.file_count(), 2);
        let files = builder.build().unwrap();
        assert_eq!(files.read_file("b.ts").unwrap(), "b");
    }

    #[test]
    fn test_first_error_reported() {
        let err = FilesBuilder::new()
            .add_file("ok.ts", "")
            .add_file("../bad.ts", "")
            .add_file("/worse.ts", "")
            .build()
            .unwrap_err();
        assert!(matches!(err, FilesError::InvalidPathComponent { .. }));
    }

    #[test]
    fn test_from_generated_code() {
        let mut code = GeneratedCode::new();
        code.add_file(GeneratedFile {
            path: "Widget.ts".to_string(),
            content: "export class Widget {\n}\n".to_string(),
        });
        code.add_file(GeneratedFile {
            path: "meta/Schema.json".to_string(),
            content: "[]".to_string(),
        });

        let files = FilesBuilder::from_generated_code(code).build().unwrap();
        assert_eq!(files.file_count(), 2);
        assert_eq!(files.read_file("meta/Schema.json").unwrap(), "[]");
    }
}

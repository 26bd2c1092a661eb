//! Core types for the output tree.
//!
//! # Examples
//!
//! ```
//! use modelgen_files::{FileEntry, FilePath};
//!
//! let path = FilePath::new("meta/Schema.json").unwrap();
//! let file = FileEntry::new("[]");
//!
//! assert_eq!(path.top_level(), "meta");
//! assert_eq!(file.content(), "[]");
//! ```

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while building or syncing the output tree.
///
/// # Examples
///
/// ```
/// use modelgen_files::FilesError;
///
/// let error = FilesError::FileNotFound {
///     path: "Missing.ts".to_string(),
/// };
///
/// assert!(error.is_not_found());
/// ```
#[derive(Error, Debug)]
pub enum FilesError {
    /// No file at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// Path is empty, absolute or not UTF-8
    #[error("Invalid path: {path}")]
    InvalidPath {
        /// The invalid path
        path: String,
    },

    /// Path contains a `..` component
    #[error("Path contains invalid components: {path}")]
    InvalidPathComponent {
        /// The path with invalid components
        path: String,
    },

    /// I/O error while reading or writing the destination
    #[error("I/O error at {path}: {source}")]
    IoError {
        /// Path involved in the failed operation
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl FilesError {
    /// Returns `true` if this is a file not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }

    /// Returns `true` if this is an invalid path error.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_files::FilesError;
    ///
    /// let error = FilesError::InvalidPathComponent {
    ///     path: "../escape.ts".to_string(),
    /// };
    ///
    /// assert!(error.is_invalid_path());
    /// ```
    #[must_use]
    pub const fn is_invalid_path(&self) -> bool {
        matches!(
            self,
            Self::InvalidPath { .. } | Self::InvalidPathComponent { .. }
        )
    }

    /// Returns `true` if this is an I/O error.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::IoError { .. })
    }
}

/// Result type alias for output tree operations.
pub type Result<T> = std::result::Result<T, FilesError>;

/// A validated path relative to the destination directory.
///
/// Paths always use `/` as separator, never start with `/` and never
/// contain `..`. A leading `./` is dropped.
///
/// # Examples
///
/// ```
/// use modelgen_files::FilePath;
///
/// let path = FilePath::new("./Widget.ts").unwrap();
/// assert_eq!(path.as_str(), "Widget.ts");
///
/// assert!(FilePath::new("/etc/passwd").is_err());
/// assert!(FilePath::new("../escape.ts").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilePath(String);

impl FilePath {
    /// Creates a new `FilePath`.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::InvalidPath` if the path is empty, absolute or
    /// not UTF-8, and `FilesError::InvalidPathComponent` if it contains `..`.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = path.to_str().ok_or_else(|| FilesError::InvalidPath {
            path: path.display().to_string(),
        })?;

        let normalized = raw.replace('\\', "/");
        let trimmed = normalized.trim_start_matches("./");

        if trimmed.is_empty() || trimmed.starts_with('/') || trimmed.contains(':') {
            return Err(FilesError::InvalidPath {
                path: normalized.clone(),
            });
        }
        if trimmed.split('/').any(|part| part == "..") {
            return Err(FilesError::InvalidPathComponent { path: normalized });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First component: the entry this path owns in the destination.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_files::FilePath;
    ///
    /// assert_eq!(FilePath::new("index.ts").unwrap().top_level(), "index.ts");
    /// assert_eq!(FilePath::new("meta/Schema.json").unwrap().top_level(), "meta");
    /// ```
    #[must_use]
    pub fn top_level(&self) -> &str {
        self.0
            .split('/')
            .find(|part| !part.is_empty() && *part != ".")
            .unwrap_or(&self.0)
    }

    /// Resolves the path under a destination directory.
    #[must_use]
    pub fn to_disk_path(&self, base: &Path) -> std::path::PathBuf {
        self.0
            .split('/')
            .filter(|part| !part.is_empty() && *part != ".")
            .fold(base.to_path_buf(), |path, part| path.join(part))
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content of one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    content: String,
}

impl FileEntry {
    /// Creates a file entry.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Returns the file content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_normalization() {
        assert_eq!(FilePath::new("meta\\Schema.json").unwrap().as_str(), "meta/Schema.json");
        assert_eq!(FilePath::new("././index.ts").unwrap().as_str(), "index.ts");
    }

    #[test]
    fn test_invalid_paths() {
        assert!(FilePath::new("").unwrap_err().is_invalid_path());
        assert!(FilePath::new("./").unwrap_err().is_invalid_path());
        assert!(FilePath::new("/abs.ts").unwrap_err().is_invalid_path());
        assert!(FilePath::new("C:/abs.ts").unwrap_err().is_invalid_path());
        assert!(matches!(
            FilePath::new("a/../../b.ts"),
            Err(FilesError::InvalidPathComponent { .. })
        ));
    }

    #[test]
    fn test_dotted_names_are_not_traversal() {
        assert!(FilePath::new("Widget..ts").is_ok());
    }

    #[test]
    fn test_disk_path() {
        let path = FilePath::new("meta/Schema.json").unwrap();
        assert_eq!(
            path.to_disk_path(Path::new("out")),
            Path::new("out").join("meta").join("Schema.json")
        );
    }

    #[test]
    fn test_error_classification() {
        let io = FilesError::IoError {
            path: "out".to_string(),
            source: std::io::Error::other("boom"),
        };
        assert!(io.is_io_error());
        assert!(!io.is_not_found());
    }
}

//! In-memory output tree.
//!
//! Holds the files of one generation run, keyed by their path relative to
//! the destination directory. Iteration is in path order.
//!
//! # Examples
//!
//! ```
//! use modelgen_files::FileSystem;
//!
//! let mut files = FileSystem::new();
//! files.add_file("Widget.ts", "export class Widget {\n}\n").unwrap();
//!
//! assert!(files.exists("Widget.ts"));
//! assert_eq!(files.file_count(), 1);
//! ```

use crate::types::{FileEntry, FilePath, FilesError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// The files of one generation run.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`.
#[derive(Debug, Clone, Default)]
pub struct FileSystem {
    files: BTreeMap<FilePath, FileEntry>,
}

impl FileSystem {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, replacing any file at the same path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Result<()> {
        let path = FilePath::new(path)?;
        self.files.insert(path, FileEntry::new(content));
        Ok(())
    }

    /// Reads the content of a file.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::FileNotFound` if there is no such file, or an
    /// invalid path error.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_files::FileSystem;
    ///
    /// let mut files = FileSystem::new();
    /// files.add_file("index.ts", "export * from './Widget';\n").unwrap();
    ///
    /// assert_eq!(files.read_file("index.ts").unwrap(), "export * from './Widget';\n");
    /// assert!(files.read_file("Missing.ts").unwrap_err().is_not_found());
    /// ```
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<&str> {
        let path = FilePath::new(path)?;
        self.files
            .get(&path)
            .map(FileEntry::content)
            .ok_or_else(|| FilesError::FileNotFound {
                path: path.as_str().to_string(),
            })
    }

    /// Returns `true` if a file exists at the path. Invalid paths never exist.
    #[must_use]
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        FilePath::new(path)
            .ok()
            .is_some_and(|p| self.files.contains_key(&p))
    }

    /// Number of files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Iterates files in path order.
    pub fn files(&self) -> impl Iterator<Item = (&FilePath, &FileEntry)> {
        self.files.iter()
    }

    /// Top-level destination entries the tree owns, lowercased.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen_files::FileSystem;
    ///
    /// let mut files = FileSystem::new();
    /// files.add_file("Widget.ts", "").unwrap();
    /// files.add_file("meta/Schema.json", "").unwrap();
    ///
    /// let owned: Vec<String> = files.owned_names().into_iter().collect();
    /// assert_eq!(owned, vec!["meta", "widget.ts"]);
    /// ```
    #[must_use]
    pub fn owned_names(&self) -> BTreeSet<String> {
        self.files
            .keys()
            .map(|path| path.top_level().to_lowercase())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_file() {
        let mut files = FileSystem::new();
        files.add_file("Widget.ts", "old").unwrap();
        files.add_file("./Widget.ts", "new").unwrap();
        assert_eq!(files.file_count(), 1);
        assert_eq!(files.read_file("Widget.ts").unwrap(), "new");
    }

    #[test]
    fn test_files_in_path_order() {
        let mut files = FileSystem::new();
        files.add_file("b.ts", "").unwrap();
        files.add_file("a.ts", "").unwrap();
        let paths: Vec<&str> = files.files().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, vec!["a.ts", "b.ts"]);
    }

    #[test]
    fn test_invalid_path_rejected() {
        let mut files = FileSystem::new();
        assert!(files.add_file("../x.ts", "").is_err());
        assert!(!files.exists("../x.ts"));
    }
}

//! Generated artifact types.
//!
//! A generation run produces a [`GeneratedCode`]: an ordered list of
//! [`GeneratedFile`]s with paths relative to the destination directory.
//! Nothing here touches the filesystem; writing is done by
//! `modelgen-files`.

use serde::{Deserialize, Serialize};

/// Result of one generation run.
///
/// # Examples
///
/// ```
/// use modelgen_codegen::common::types::{GeneratedCode, GeneratedFile};
///
/// let mut code = GeneratedCode::new();
/// code.add_file(GeneratedFile {
///     path: "Widget.ts".to_string(),
///     content: "export class Widget {\n}\n".to_string(),
/// });
///
/// assert_eq!(code.file_count(), 1);
/// assert_eq!(code.names(), vec!["Widget.ts"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Generated files, in emission order
    pub files: Vec<GeneratedFile>,
}

impl GeneratedCode {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a file.
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Number of generated files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Iterates the generated files.
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }

    /// Looks up a file by its relative path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Top-level entry names the run owns in the destination directory.
    ///
    /// A nested path such as `schema/Schema.json` contributes `schema`.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .files
            .iter()
            .filter_map(|f| f.path.split('/').find(|part| !part.is_empty() && *part != "."))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Path relative to the destination, `/`-separated
    pub path: String,
    /// File contents
    pub content: String,
}

impl GeneratedFile {
    /// Returns the relative path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the contents.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> GeneratedFile {
        GeneratedFile {
            path: path.to_string(),
            content: String::new(),
        }
    }

    #[test]
    fn test_names_are_top_level_and_unique() {
        let mut code = GeneratedCode::new();
        code.add_file(file("index.ts"));
        code.add_file(file("./schema/Schema.json"));
        code.add_file(file("schema/Other.json"));
        code.add_file(file("Widget.ts"));

        assert_eq!(code.names(), vec!["Widget.ts", "index.ts", "schema"]);
    }

    #[test]
    fn test_get_by_path() {
        let mut code = GeneratedCode::new();
        code.add_file(file("index.ts"));
        assert!(code.get("index.ts").is_some());
        assert!(code.get("missing.ts").is_none());
        assert_eq!(code.files().count(), 1);
    }
}

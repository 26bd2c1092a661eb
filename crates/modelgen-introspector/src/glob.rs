//! Module file selection.
//!
//! Patterns use `*` (any run of characters) and `?` (one character) and are
//! matched case-insensitively against file names directly inside the source
//! directory.

use modelgen_core::{Error, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Compiled file-name pattern.
///
/// # Examples
///
/// ```
/// use modelgen_introspector::FilePattern;
///
/// let pattern = FilePattern::new("*.client.json").unwrap();
/// assert!(pattern.matches("Acme.Client.json"));
/// assert!(!pattern.matches("Acme.json"));
/// ```
#[derive(Debug, Clone)]
pub struct FilePattern {
    source: String,
    regex: Regex,
}

impl FilePattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an empty pattern or one containing a
    /// path separator.
    pub fn new(pattern: &str) -> Result<Self> {
        let trimmed = pattern.trim();
        if trimmed.is_empty() || trimmed.contains(['/', '\\']) {
            return Err(Error::InvalidArgument(format!(
                "invalid file pattern: '{pattern}'"
            )));
        }

        let mut expr = String::from("(?i)^");
        for c in trimmed.chars() {
            match c {
                '*' => expr.push_str(".*"),
                '?' => expr.push('.'),
                other => expr.push_str(&regex::escape(&other.to_string())),
            }
        }
        expr.push('$');

        let regex = Regex::new(&expr)
            .map_err(|e| Error::InvalidArgument(format!("invalid file pattern '{pattern}': {e}")))?;
        Ok(Self {
            source: trimmed.to_string(),
            regex,
        })
    }

    /// Returns `true` if the file name matches.
    #[must_use]
    pub fn matches(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }

    /// Returns the pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Lists module files in `dir` matching any of `patterns`, sorted by path.
///
/// # Errors
///
/// Returns `ConfigError` if `dir` is not a directory, `InvalidArgument` for
/// a malformed pattern, and `IoError` if the directory cannot be read.
pub fn find_module_files(dir: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::ConfigError {
            message: format!("Source directory {} does not exist", dir.display()),
        });
    }

    let patterns = patterns
        .iter()
        .map(|p| FilePattern::new(p))
        .collect::<Result<Vec<_>>>()?;

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| Error::IoError {
            path: dir.display().to_string(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if patterns.iter().any(|p| p.matches(&name)) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    files.dedup();
    tracing::debug!("Found {} module file(s) in {}", files.len(), dir.display());
    Ok(files)
}

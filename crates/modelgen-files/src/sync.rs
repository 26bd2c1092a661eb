//! Write-if-changed sync of the output tree to a destination directory.
//!
//! Every file is compared byte for byte with the file already on disk and
//! written only when they differ, so an unchanged file keeps its
//! modification time. Afterwards, top-level files in the destination that
//! the tree does not own are deleted: the destination is a derived output
//! fully owned by the generator. Names are compared case-insensitively.
//!
//! # Examples
//!
//! ```
//! use modelgen_files::FilesBuilder;
//! # use tempfile::TempDir;
//!
//! # let temp = TempDir::new().unwrap();
//! # let out = temp.path();
//! let files = FilesBuilder::new()
//!     .add_file("index.ts", "export * from './Widget';\n")
//!     .build()
//!     .unwrap();
//!
//! let first = files.sync_to(out).unwrap();
//! assert_eq!(first.written, vec!["index.ts"]);
//!
//! let second = files.sync_to(out).unwrap();
//! assert_eq!(second.unchanged, vec!["index.ts"]);
//! assert!(second.written.is_empty());
//! ```

use crate::filesystem::FileSystem;
use crate::types::{FilesError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Outcome of one sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Destination directory, after `~` expansion
    pub destination: PathBuf,
    /// Files written because they were missing or different
    pub written: Vec<String>,
    /// Files left untouched because their content matched
    pub unchanged: Vec<String>,
    /// Stale files removed from the destination
    pub deleted: Vec<String>,
}

impl SyncReport {
    /// Returns `true` if the sync touched the filesystem.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.written.is_empty() || !self.deleted.is_empty()
    }
}

impl FileSystem {
    /// Syncs the tree into `destination`, creating it if needed.
    ///
    /// A leading `~` is expanded to the home directory.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::IoError` if the destination cannot be created,
    /// read or written, or if the home directory cannot be determined.
    pub fn sync_to(&self, destination: impl AsRef<Path>) -> Result<SyncReport> {
        let base = expand_tilde(destination.as_ref())?;
        fs::create_dir_all(&base).map_err(|e| FilesError::IoError {
            path: base.display().to_string(),
            source: e,
        })?;

        let mut report = SyncReport {
            destination: base.clone(),
            ..SyncReport::default()
        };

        for (path, file) in self.files() {
            let disk_path = path.to_disk_path(&base);
            if is_unchanged(&disk_path, file.content())? {
                tracing::debug!("Unchanged: {path}");
                report.unchanged.push(path.to_string());
                continue;
            }

            write_file_atomic(&disk_path, file.content())?;
            tracing::debug!("Wrote {path}");
            report.written.push(path.to_string());
        }

        report.deleted = self.remove_stale(&base)?;

        tracing::info!(
            "Synced {}: {} written, {} unchanged, {} deleted",
            base.display(),
            report.written.len(),
            report.unchanged.len(),
            report.deleted.len()
        );
        Ok(report)
    }

    fn remove_stale(&self, base: &Path) -> Result<Vec<String>> {
        let owned = self.owned_names();
        let io_error = |source| FilesError::IoError {
            path: base.display().to_string(),
            source,
        };

        let mut deleted = Vec::new();
        for entry in fs::read_dir(base).map_err(io_error)? {
            let entry = entry.map_err(io_error)?;
            if !entry.file_type().map_err(io_error)?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if owned.contains(&name.to_lowercase()) {
                continue;
            }

            fs::remove_file(entry.path()).map_err(|e| FilesError::IoError {
                path: entry.path().display().to_string(),
                source: e,
            })?;
            tracing::debug!("Deleted stale file {name}");
            deleted.push(name);
        }

        deleted.sort();
        Ok(deleted)
    }
}

fn is_unchanged(disk_path: &Path, content: &str) -> Result<bool> {
    match fs::read(disk_path) {
        Ok(existing) => Ok(existing == content.as_bytes()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(FilesError::IoError {
            path: disk_path.display().to_string(),
            source: e,
        }),
    }
}

/// Expands a leading `~` to the home directory.
fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };

    let home = dirs::home_dir().ok_or_else(|| FilesError::IoError {
        path: path.display().to_string(),
        source: std::io::Error::new(ErrorKind::NotFound, "Cannot determine home directory"),
    })?;
    Ok(home.join(rest))
}

/// Writes through a temporary sibling and renames it into place.
fn write_file_atomic(disk_path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = disk_path.parent() {
        fs::create_dir_all(parent).map_err(|e| FilesError::IoError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let mut temp_name = disk_path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    fs::write(&temp_path, content).map_err(|e| FilesError::IoError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, disk_path).map_err(|e| FilesError::IoError {
        path: disk_path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FilesBuilder;
    use tempfile::TempDir;

    fn tree() -> FileSystem {
        FilesBuilder::new()
            .add_file("Widget.ts", "export class Widget {\n}\n")
            .add_file("index.ts", "export * from './Widget';\n")
            .add_file("meta/Schema.json", "[]")
            .build()
            .unwrap()
    }

    #[test]
    fn test_first_sync_writes_everything() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("generated");

        let report = tree().sync_to(&out).unwrap();

        assert_eq!(report.written, vec!["Widget.ts", "index.ts", "meta/Schema.json"]);
        assert!(report.unchanged.is_empty());
        assert!(report.deleted.is_empty());
        assert_eq!(fs::read_to_string(out.join("meta").join("Schema.json")).unwrap(), "[]");
    }

    #[test]
    fn test_second_sync_is_a_no_op() {
        let temp = TempDir::new().unwrap();
        let files = tree();
        files.sync_to(temp.path()).unwrap();

        let report = files.sync_to(temp.path()).unwrap();
        assert!(!report.has_changes());
        assert_eq!(report.unchanged.len(), 3);
    }

    #[test]
    fn test_changed_file_is_rewritten() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Widget.ts"), "stale content").unwrap();

        let report = tree().sync_to(temp.path()).unwrap();
        assert!(report.written.contains(&"Widget.ts".to_string()));
        assert_eq!(
            fs::read_to_string(temp.path().join("Widget.ts")).unwrap(),
            "export class Widget {\n}\n"
        );
    }

    #[test]
    fn test_stale_files_deleted_directories_kept() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Gadget.ts"), "old").unwrap();
        fs::write(temp.path().join("WIDGET.TS"), "export class Widget {\n}\n").unwrap();
        fs::create_dir(temp.path().join("assets")).unwrap();

        let report = tree().sync_to(temp.path()).unwrap();

        assert_eq!(report.deleted, vec!["Gadget.ts"]);
        assert!(!temp.path().join("Gadget.ts").exists());
        assert!(temp.path().join("assets").is_dir());
    }

    #[test]
    fn test_no_temporary_files_left() {
        let temp = TempDir::new().unwrap();
        tree().sync_to(temp.path()).unwrap();
        let leftovers = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_expand_tilde() {
        let plain = Path::new("out/generated");
        assert_eq!(expand_tilde(plain).unwrap(), plain);
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/gen")).unwrap(), home.join("gen"));
        }
    }
}

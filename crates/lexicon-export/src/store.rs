//! Export directory management
//!
//! Output files are named `<code>_<version>.<extension>` after sanitizing
//! both components, so a version bump changes the name and re-exporting
//! the same version lands on the same path. Files are staged next to their
//! final path and renamed into place, so readers never see a partial file.

use lexicon_domain::{sanitize, Project};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::ExportError;

/// The directory exported files are published to
#[derive(Debug, Clone)]
pub struct ExportStore {
    dir: PathBuf,
}

impl ExportStore {
    /// Create a store rooted at `dir`; nothing is touched until [`ensure`](Self::ensure)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory if absent and check it is a writable directory
    pub fn ensure(&self) -> Result<(), ExportError> {
        let unavailable = |reason: String| ExportError::StoreUnavailable {
            path: self.dir.clone(),
            reason,
        };

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| unavailable(e.to_string()))?;
            tracing::info!("Created export directory {}", self.dir.display());
        }
        if !self.dir.is_dir() {
            return Err(unavailable("not a directory".to_string()));
        }

        NamedTempFile::new_in(&self.dir)
            .map_err(|e| unavailable(format!("not writable: {}", e)))?;
        Ok(())
    }

    /// File name for a project export: `<code>_<version>.<extension>`
    pub fn file_name(project: &Project, extension: &str) -> String {
        format!(
            "{}_{}.{}",
            sanitize(&project.code),
            sanitize(&project.version.to_string()),
            extension
        )
    }

    /// Full path for a project export
    pub fn export_path(&self, project: &Project, extension: &str) -> PathBuf {
        self.dir.join(Self::file_name(project, extension))
    }

    /// Write `contents` to the project's export path atomically
    ///
    /// Concurrent publishes of the same project and version each stage
    /// their own file; the last rename wins.
    pub fn publish(&self, project: &Project, extension: &str, contents: &[u8]) -> Result<PathBuf, ExportError> {
        let path = self.export_path(project, extension);
        self.write_atomic(&path, contents).map_err(|source| {
            tracing::error!("Failed to write file {}: {}", path.display(), source);
            ExportError::WriteFailure {
                path: path.clone(),
                source,
            }
        })?;

        tracing::debug!("Published {} ({} bytes)", path.display(), contents.len());
        Ok(path)
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> std::io::Result<()> {
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(contents)?;
        staged.as_file().sync_all()?;
        staged.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project() -> Project {
        Project::new("kgu", "Kovol").with_version(3)
    }

    #[test]
    fn test_file_name() {
        assert_eq!(ExportStore::file_name(&project(), "dic"), "kgu_3.dic");
    }

    #[test]
    fn test_file_name_is_sanitized() {
        let evil = Project::new("../etc", "Evil").with_version(1);
        assert_eq!(ExportStore::file_name(&evil, "oxt"), "___etc_1.oxt");
    }

    #[test]
    fn test_ensure_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let store = ExportStore::new(tmp.path().join("data").join("exports"));

        store.ensure().unwrap();
        assert!(store.dir().is_dir());
        assert_eq!(fs::read_dir(store.dir()).unwrap().count(), 0);
    }

    #[test]
    fn test_ensure_rejects_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("exports");
        fs::write(&file, "not a dir").unwrap();

        let result = ExportStore::new(&file).ensure();
        assert!(matches!(result, Err(ExportError::StoreUnavailable { .. })));
    }

    #[test]
    fn test_publish_writes_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let store = ExportStore::new(tmp.path());
        store.ensure().unwrap();

        let path = store.publish(&project(), "dic", b"1\nfirst").unwrap();
        assert_eq!(path, tmp.path().join("kgu_3.dic"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\nfirst");

        let again = store.publish(&project(), "dic", b"1\nsecond").unwrap();
        assert_eq!(again, path);
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\nsecond");

        // Only the published file remains; staging files are gone
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_concurrent_publish_of_same_version() {
        let tmp = TempDir::new().unwrap();
        let store = ExportStore::new(tmp.path());
        store.ensure().unwrap();
        let path = store.export_path(&project(), "dic");

        // Each writer's payload is one repeated byte, so any mix shows up
        let payloads: Vec<Vec<u8>> = (b'a'..=b'f').map(|b| vec![b; 256 * 1024]).collect();
        let whole = |bytes: &[u8]| payloads.iter().any(|p| p.as_slice() == bytes);

        std::thread::scope(|scope| {
            for payload in &payloads {
                let store = &store;
                scope.spawn(move || {
                    for _ in 0..10 {
                        store.publish(&project(), "dic", payload).unwrap();
                    }
                });
            }
            scope.spawn(|| {
                for _ in 0..200 {
                    if let Ok(bytes) = fs::read(&path) {
                        assert!(whole(&bytes), "read a torn file of {} bytes", bytes.len());
                    }
                }
            });
        });

        assert!(whole(&fs::read(&path).unwrap()));
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_version_bump_changes_path() {
        let tmp = TempDir::new().unwrap();
        let store = ExportStore::new(tmp.path());
        let v3 = store.export_path(&project(), "xml");
        let v4 = store.export_path(&project().with_version(4), "xml");
        assert_ne!(v3, v4);
    }

    #[test]
    fn test_publish_into_missing_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let store = ExportStore::new(tmp.path().join("missing"));

        let result = store.publish(&project(), "dic", b"0");
        assert!(matches!(result, Err(ExportError::WriteFailure { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_rejects_read_only_dir() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("ro");
        fs::create_dir(&dir).unwrap();
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).unwrap();

        let result = ExportStore::new(&dir).ensure();
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();

        // Root ignores directory permissions
        if !is_root() {
            assert!(matches!(result, Err(ExportError::StoreUnavailable { .. })));
        }
    }

    #[cfg(unix)]
    fn is_root() -> bool {
        use std::os::unix::fs::PermissionsExt;
        let tmp = TempDir::new().unwrap();
        let locked = tmp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();
        let writable = fs::write(locked.join("x"), "x").is_ok();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        writable
    }
}

//! Persistence of the rendered PDF with a permission-gated fallback chain.
//!
//! State machine: `Pending → TempWritten → {PermissionDenied | MediaSaved |
//! PrivateSaved | Failed}`. Every terminal state carries a distinct
//! user-facing status; nothing is retried.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ReportError;

// ---------------------------------------------------------------------------
// Artifact
// ---------------------------------------------------------------------------

/// Where the artifact finally landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageLocation {
    /// Only the temporary cache copy exists (permission was denied).
    TempCache,
    /// Registered in the user-visible shared store.
    SharedStore,
    /// Fallback copy in the application's private data directory.
    PrivateStore,
}

/// The persisted report: final path, storage tier, user-facing status line.
#[derive(Debug, Clone, Serialize)]
pub struct ReportArtifact {
    pub path: PathBuf,
    pub location: StorageLocation,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PersistState {
    Pending,
    TempWritten,
}

// ---------------------------------------------------------------------------
// Storage abstraction
// ---------------------------------------------------------------------------

/// Storage strategies the persister walks through.
///
/// The permission probe stands in for the platform storage prompt, so denial
/// and shared-store failure are both simulable.
pub trait Storage {
    /// Write the artifact to the temporary cache; returns the temp path.
    fn write_temp(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, String>;

    /// Ask for permission to touch user-visible storage.
    fn request_permission(&self) -> bool;

    /// Register the temp copy with the user-visible shared store.
    fn save_shared(&self, temp: &Path, file_name: &str) -> Result<PathBuf, String>;

    /// Fallback: copy into the application's private storage.
    fn save_private(&self, temp: &Path, file_name: &str) -> Result<PathBuf, String>;

    /// Best-effort removal of the temp copy once a final copy exists.
    fn remove_temp(&self, temp: &Path);
}

/// Walk the storage chain for one rendered report.
pub fn persist_report(
    storage: &dyn Storage,
    file_name: &str,
    pdf: &[u8],
) -> Result<ReportArtifact, ReportError> {
    let state = PersistState::Pending;
    log::debug!("persist: {state:?} ({file_name})");

    let temp = storage
        .write_temp(file_name, pdf)
        .map_err(|e| ReportError::Persist(format!("temporary write failed: {e}")))?;
    let state = PersistState::TempWritten;
    log::debug!("persist: {state:?} at {}", temp.display());

    if !storage.request_permission() {
        // Terminal: no further strategies are attempted and the temp copy stays.
        return Ok(ReportArtifact {
            path: temp,
            location: StorageLocation::TempCache,
            status: "Storage permission denied; the report was kept in the temporary cache only."
                .to_string(),
        });
    }

    match storage.save_shared(&temp, file_name) {
        Ok(path) => {
            storage.remove_temp(&temp);
            log::info!("report saved to shared storage: {}", path.display());
            Ok(ReportArtifact {
                path,
                location: StorageLocation::SharedStore,
                status: "Report saved to shared storage.".to_string(),
            })
        }
        Err(shared_err) => {
            log::warn!("shared storage failed ({shared_err}); falling back to private storage");
            match storage.save_private(&temp, file_name) {
                Ok(path) => {
                    storage.remove_temp(&temp);
                    Ok(ReportArtifact {
                        path,
                        location: StorageLocation::PrivateStore,
                        status: "Report generated but could only be saved to private app storage."
                            .to_string(),
                    })
                }
                Err(private_err) => Err(ReportError::Persist(format!(
                    "failed to save the report to any location (shared: {shared_err}; private: {private_err})"
                ))),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Disk implementation
// ---------------------------------------------------------------------------

/// Real filesystem storage rooted at explicit directories.
pub struct DiskStorage {
    pub cache_dir: PathBuf,
    pub shared_dir: PathBuf,
    pub private_dir: PathBuf,
    /// Consent to write user-visible storage; stands in for the platform
    /// permission prompt.
    pub allow_shared: bool,
}

impl DiskStorage {
    pub fn with_roots(
        cache_dir: PathBuf,
        shared_dir: PathBuf,
        private_dir: PathBuf,
        allow_shared: bool,
    ) -> Self {
        Self { cache_dir, shared_dir, private_dir, allow_shared }
    }

    /// Platform defaults: cache dir for temp copies, the user's documents
    /// folder as the shared store, the app data dir as private storage.
    pub fn from_platform(allow_shared: bool) -> Result<Self, ReportError> {
        let cache = dirs::cache_dir()
            .ok_or_else(|| ReportError::Storage("no cache directory on this platform".into()))?;
        let shared = dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join("Documents")))
            .ok_or_else(|| ReportError::Storage("no documents directory on this platform".into()))?;
        let data = dirs::data_dir()
            .ok_or_else(|| ReportError::Storage("no data directory on this platform".into()))?;
        Ok(Self::with_roots(
            cache.join("amtest"),
            shared.join("amtest"),
            data.join("amtest"),
            allow_shared,
        ))
    }
}

fn write_into(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, String> {
    fs::create_dir_all(dir).map_err(|e| format!("cannot create {}: {e}", dir.display()))?;
    let path = dir.join(file_name);
    fs::write(&path, bytes).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
    Ok(path)
}

fn copy_into(dir: &Path, temp: &Path, file_name: &str) -> Result<PathBuf, String> {
    fs::create_dir_all(dir).map_err(|e| format!("cannot create {}: {e}", dir.display()))?;
    let path = dir.join(file_name);
    fs::copy(temp, &path).map_err(|e| format!("cannot copy to {}: {e}", path.display()))?;
    Ok(path)
}

impl Storage for DiskStorage {
    fn write_temp(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, String> {
        write_into(&self.cache_dir, file_name, bytes)
    }

    fn request_permission(&self) -> bool {
        self.allow_shared
    }

    fn save_shared(&self, temp: &Path, file_name: &str) -> Result<PathBuf, String> {
        copy_into(&self.shared_dir, temp, file_name)
    }

    fn save_private(&self, temp: &Path, file_name: &str) -> Result<PathBuf, String> {
        copy_into(&self.private_dir, temp, file_name)
    }

    fn remove_temp(&self, temp: &Path) {
        if let Err(e) = fs::remove_file(temp) {
            log::warn!("could not remove temp copy {}: {e}", temp.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Scriptable storage double recording which strategies were attempted.
    struct MockStorage {
        permission: bool,
        shared_fails: bool,
        private_fails: bool,
        calls: RefCell<Vec<&'static str>>,
    }

    impl MockStorage {
        fn new(permission: bool, shared_fails: bool, private_fails: bool) -> Self {
            Self { permission, shared_fails, private_fails, calls: RefCell::new(Vec::new()) }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.borrow().clone()
        }
    }

    impl Storage for MockStorage {
        fn write_temp(&self, file_name: &str, _bytes: &[u8]) -> Result<PathBuf, String> {
            self.calls.borrow_mut().push("temp");
            Ok(PathBuf::from("/tmp/cache").join(file_name))
        }

        fn request_permission(&self) -> bool {
            self.calls.borrow_mut().push("permission");
            self.permission
        }

        fn save_shared(&self, _temp: &Path, file_name: &str) -> Result<PathBuf, String> {
            self.calls.borrow_mut().push("shared");
            if self.shared_fails {
                Err("media store unavailable".into())
            } else {
                Ok(PathBuf::from("/docs/amtest").join(file_name))
            }
        }

        fn save_private(&self, _temp: &Path, file_name: &str) -> Result<PathBuf, String> {
            self.calls.borrow_mut().push("private");
            if self.private_fails {
                Err("disk full".into())
            } else {
                Ok(PathBuf::from("/data/amtest").join(file_name))
            }
        }

        fn remove_temp(&self, _temp: &Path) {
            self.calls.borrow_mut().push("remove_temp");
        }
    }

    #[test]
    fn permission_denied_is_terminal_and_skips_shared_store() {
        let storage = MockStorage::new(false, false, false);
        let artifact = persist_report(&storage, "r.pdf", b"%PDF").unwrap();

        assert_eq!(artifact.location, StorageLocation::TempCache);
        assert!(artifact.status.contains("permission denied"));
        // No media-store registration, no fallback, temp copy kept
        assert_eq!(storage.calls(), vec!["temp", "permission"]);
    }

    #[test]
    fn shared_save_succeeds_and_cleans_temp() {
        let storage = MockStorage::new(true, false, false);
        let artifact = persist_report(&storage, "r.pdf", b"%PDF").unwrap();

        assert_eq!(artifact.location, StorageLocation::SharedStore);
        assert_eq!(artifact.status, "Report saved to shared storage.");
        assert_eq!(storage.calls(), vec!["temp", "permission", "shared", "remove_temp"]);
    }

    #[test]
    fn shared_failure_falls_back_to_private_with_distinct_message() {
        let storage = MockStorage::new(true, true, false);
        let artifact = persist_report(&storage, "r.pdf", b"%PDF").unwrap();

        assert_eq!(artifact.location, StorageLocation::PrivateStore);
        assert!(artifact.status.contains("private app storage"));
        assert_ne!(artifact.status, "Report saved to shared storage.");
        assert_eq!(storage.calls(), vec!["temp", "permission", "shared", "private", "remove_temp"]);
    }

    #[test]
    fn total_failure_is_an_error() {
        let storage = MockStorage::new(true, true, true);
        let err = persist_report(&storage, "r.pdf", b"%PDF").unwrap_err();
        assert!(err.to_string().contains("any location"));
    }

    #[test]
    fn disk_storage_walks_real_directories() {
        let root = tempfile::tempdir().unwrap();
        let storage = DiskStorage::with_roots(
            root.path().join("cache"),
            root.path().join("shared"),
            root.path().join("private"),
            true,
        );
        let artifact = persist_report(&storage, "r.pdf", b"%PDF-1.4 test").unwrap();

        assert_eq!(artifact.location, StorageLocation::SharedStore);
        assert_eq!(fs::read(&artifact.path).unwrap(), b"%PDF-1.4 test");
        // Temp copy is gone after the final copy landed
        assert!(!root.path().join("cache/r.pdf").exists());
    }

    #[test]
    fn disk_storage_respects_denied_consent() {
        let root = tempfile::tempdir().unwrap();
        let storage = DiskStorage::with_roots(
            root.path().join("cache"),
            root.path().join("shared"),
            root.path().join("private"),
            false,
        );
        let artifact = persist_report(&storage, "r.pdf", b"%PDF").unwrap();

        assert_eq!(artifact.location, StorageLocation::TempCache);
        assert!(root.path().join("cache/r.pdf").exists());
        assert!(!root.path().join("shared").exists());
    }
}

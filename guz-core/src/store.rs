//! YAML snapshot store.
//!
//! # Storage layout
//!
//! ```text
//! ~/.guz/                (mode 0700, created on first save)
//!   tasks.yaml           (snapshot: mode 0600)
//! ```
//!
//! ```yaml
//! version: 1
//! saved_at: 2026-10-18T09:30:00Z
//! tasks:
//!   1:
//!     subject: buy milk
//!     status: done
//! ```
//!
//! A bare `{id: task}` mapping without the envelope is still read, as a
//! legacy snapshot. A top-level `version` key selects the envelope shape;
//! anything else is read as the legacy mapping, so parse errors always
//! describe the shape actually chosen. Writes always produce the envelope.
//!
//! Nothing here saves implicitly: callers load once, mutate the registry,
//! then call [`SnapshotStore::save`] once. Last writer wins.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::registry::TaskRegistry;
use crate::types::{Task, TaskId};

/// Highest snapshot format version this build reads and the one it writes.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct SnapshotOut<'a> {
    version: u32,
    saved_at: DateTime<Utc>,
    tasks: &'a BTreeMap<TaskId, Task>,
}

#[derive(Debug, Deserialize)]
struct SnapshotIn {
    version: u32,
    saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    tasks: BTreeMap<TaskId, Task>,
}

/// Loads and saves a [`TaskRegistry`] at the path named by a [`StoreConfig`].
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    config: StoreConfig,
}

impl SnapshotStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    // -----------------------------------------------------------------------
    // Load
    // -----------------------------------------------------------------------

    /// Read the snapshot.
    ///
    /// Returns `StoreError::SnapshotNotFound` if absent,
    /// `StoreError::Parse` (with path) if malformed, and
    /// `StoreError::UnsupportedVersion` if written by a newer format.
    pub fn load(&self) -> Result<TaskRegistry, StoreError> {
        let path = self.path();
        if !path.exists() {
            return Err(StoreError::SnapshotNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        let parse_err = |source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        };
        let value: serde_yaml::Value = serde_yaml::from_str(&contents).map_err(parse_err)?;

        let tasks = match value.get("version") {
            Some(_) => {
                let snapshot: SnapshotIn = serde_yaml::from_value(value).map_err(parse_err)?;
                if snapshot.version > SNAPSHOT_VERSION {
                    return Err(StoreError::UnsupportedVersion {
                        path: path.to_path_buf(),
                        found: snapshot.version,
                        supported: SNAPSHOT_VERSION,
                    });
                }
                if let Some(saved_at) = snapshot.saved_at {
                    tracing::debug!(saved_at = %saved_at.to_rfc3339(), "snapshot timestamp");
                }
                snapshot.tasks
            }
            None => {
                tracing::debug!(path = %path.display(), "reading legacy snapshot without envelope");
                serde_yaml::from_value::<BTreeMap<TaskId, Task>>(value).map_err(parse_err)?
            }
        };

        tracing::debug!(path = %path.display(), tasks = tasks.len(), "snapshot loaded");
        Ok(TaskRegistry::from_tasks(tasks))
    }

    /// [`load`](Self::load), except that a missing snapshot is created empty
    /// when the config allows it. Any other failure propagates.
    pub fn open(&self) -> Result<TaskRegistry, StoreError> {
        match self.load() {
            Err(StoreError::SnapshotNotFound { path }) if self.config.init_if_absent => {
                tracing::info!(path = %path.display(), "no snapshot yet; initialising empty task list");
                let registry = TaskRegistry::new();
                self.save(&registry)?;
                Ok(registry)
            }
            other => other,
        }
    }

    // -----------------------------------------------------------------------
    // Save (atomic)
    // -----------------------------------------------------------------------

    /// Atomically write `registry` to the snapshot path.
    ///
    /// Write flow: serialize → `<file>.tmp` sibling → `chmod 0600` → `rename`.
    /// The `.tmp` sits next to the target so the rename never crosses
    /// filesystems.
    pub fn save(&self, registry: &TaskRegistry) -> Result<(), StoreError> {
        let path = self.path();
        ensure_parent_dir(path)?;
        let tmp_path = tmp_path_for(path);

        let yaml = serde_yaml::to_string(&SnapshotOut {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            tasks: registry.tasks(),
        })?;
        std::fs::write(&tmp_path, yaml)?;
        set_file_permissions(&tmp_path)?;
        std::fs::rename(&tmp_path, path)?;

        tracing::debug!(path = %path.display(), tasks = registry.len(), "snapshot saved");
        Ok(())
    }
}

/// `<dir>/<file>.tmp` for a snapshot at `<dir>/<file>`: pure, no I/O.
pub fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("snapshot"));
    name.push(".tmp");
    path.with_file_name(name)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn ensure_parent_dir(path: &Path) -> Result<(), StoreError> {
    let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) else {
        return Ok(());
    };
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
        set_dir_permissions(dir)?;
    }
    Ok(())
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SnapshotStore {
        SnapshotStore::new(StoreConfig::at_home(dir.path()))
    }

    #[test]
    fn tmp_path_is_sibling() {
        let tmp = tmp_path_for(Path::new("/data/tasks.yaml"));
        assert_eq!(tmp, PathBuf::from("/data/tasks.yaml.tmp"));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let home = TempDir::new().expect("tempdir");
        let store = store_in(&home);
        let mut reg = TaskRegistry::new();
        reg.insert("buy milk", Status::Done).expect("insert");
        reg.insert("pay rent", Status::Empty).expect("insert");
        reg.set_projects(TaskId(2), vec!["+home".to_owned()]).expect("projects");

        store.save(&reg).expect("save");
        assert_eq!(store.load().expect("load"), reg);
    }

    #[test]
    fn parent_dir_created_with_perms() {
        let home = TempDir::new().expect("tempdir");
        let store = store_in(&home);
        store.save(&TaskRegistry::new()).expect("save");
        let dir = store.path().parent().expect("parent");
        assert!(dir.exists());
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(dir).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o700);
        }
    }

    #[test]
    fn load_missing_returns_not_found() {
        let home = TempDir::new().expect("tempdir");
        let err = store_in(&home).load().unwrap_err();
        assert!(matches!(err, StoreError::SnapshotNotFound { .. }));
    }

    #[test]
    fn open_initialises_when_allowed() {
        let home = TempDir::new().expect("tempdir");
        let store = store_in(&home);
        let reg = store.open().expect("open");
        assert!(reg.is_empty());
        assert!(store.path().exists(), "first run must write an empty snapshot");
    }

    #[test]
    fn open_without_init_propagates_not_found() {
        let home = TempDir::new().expect("tempdir");
        let store = SnapshotStore::new(StoreConfig::at_home(home.path()).with_init_if_absent(false));
        let err = store.open().unwrap_err();
        assert!(matches!(err, StoreError::SnapshotNotFound { .. }));
        assert!(!store.path().exists());
    }
}

//! Where the snapshot lives and what to do when it is missing.
//!
//! Mirrors the `_at(home)` / no-arg split used throughout the crate:
//! tests build a [`StoreConfig`] with [`StoreConfig::at_home`] or
//! [`StoreConfig::new`]; only the binary calls [`StoreConfig::from_home`].

use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Directory under `$HOME` that holds the snapshot.
pub const DATA_DIR: &str = ".guz";

/// Snapshot file name inside [`DATA_DIR`].
pub const DATA_FILE: &str = "tasks.yaml";

/// Explicit snapshot configuration handed to [`crate::store::SnapshotStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
    /// Write an empty snapshot when none exists instead of failing.
    pub init_if_absent: bool,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>, init_if_absent: bool) -> Self {
        Self {
            path: path.into(),
            init_if_absent,
        }
    }

    /// `<home>/.guz/tasks.yaml`, initialised on first use.
    pub fn at_home(home: &Path) -> Self {
        Self::new(default_path_at(home), true)
    }

    /// `at_home` convenience wrapper; resolves `$HOME` via `dirs`.
    pub fn from_home() -> Result<Self, StoreError> {
        let home = dirs::home_dir().ok_or(StoreError::HomeNotFound)?;
        Ok(Self::at_home(&home))
    }

    pub fn with_init_if_absent(mut self, init_if_absent: bool) -> Self {
        self.init_if_absent = init_if_absent;
        self
    }
}

/// `<home>/.guz/tasks.yaml`: pure, no I/O.
pub fn default_path_at(home: &Path) -> PathBuf {
    home.join(DATA_DIR).join(DATA_FILE)
}

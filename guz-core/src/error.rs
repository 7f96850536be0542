//! Error types for guz-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::TaskId;

/// Errors raised by registry operations and status parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The operation referenced an id that is not in the registry.
    /// Recoverable: the message is reported and the mapping is untouched.
    #[error("Task id not found: {0}")]
    NotFound(TaskId),

    /// A status selector did not name any known status.
    #[error("unknown status '{0}'; expected one of: none, unclear, hold, ready, wip, done, fail, cancel")]
    InvalidStatus(String),

    /// The largest id is already `u32::MAX`, so no next id exists.
    #[error("no task id left after {0}; run `guz rebase` to renumber")]
    IdsExhausted(TaskId),
}

/// All errors that can arise from snapshot load / save.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure (permission denied, disk full, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load, with the offending file path.
    #[error("failed to parse snapshot at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Snapshot was written by a newer format version.
    #[error("snapshot at {path} has version {found}; this build reads up to {supported}")]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        supported: u32,
    },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or pass --file")]
    HomeNotFound,

    /// The snapshot file does not exist and initialisation was not requested.
    #[error("snapshot not found at {path}")]
    SnapshotNotFound { path: PathBuf },
}

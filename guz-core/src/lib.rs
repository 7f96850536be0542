//! guz core library: task registry, commands, snapshot persistence, errors.
//!
//! - [`types`]: ids, statuses, task records, select patterns
//! - [`registry`]: the in-memory [`TaskRegistry`]
//! - [`command`]: typed [`Command`]s and [`command::apply`]
//! - [`transcript`]: the per-transaction message sink
//! - [`config`] / [`store`]: where the YAML snapshot lives, load / save
//! - [`error`]: [`TaskError`], [`StoreError`]

pub mod command;
pub mod config;
pub mod error;
pub mod registry;
pub mod store;
pub mod transcript;
pub mod types;

pub use command::Command;
pub use config::StoreConfig;
pub use error::{StoreError, TaskError};
pub use registry::{Outcome, OutcomeKind, TaskRegistry};
pub use store::SnapshotStore;
pub use transcript::{Entry, Tone, Transcript};
pub use types::{Pattern, Status, Task, TaskId};

//! Structured commands and the dispatcher that applies them to a registry.

use crate::error::TaskError;
use crate::registry::{Outcome, TaskRegistry};
use crate::types::{Pattern, Status, TaskId};

/// One user request, already parsed and typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New { subject: String, status: Status },
    /// Empty `patterns` lists every task.
    List { patterns: Vec<Pattern> },
    Delete { id: TaskId },
    DeleteAll,
    Rebase,
    Replace {
        id: TaskId,
        subject: String,
        keep_status: bool,
    },
    SetStatus { id: TaskId, status: Status },
    ResetStatus { id: TaskId },
    SetProjects { id: TaskId, projects: Vec<String> },
}

impl Command {
    /// Whether applying this command can change the registry.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Command::List { .. })
    }
}

/// Ids a `list` with `patterns` shows: every id when `patterns` is empty,
/// otherwise the OR-selection.
pub fn selected_ids(registry: &TaskRegistry, patterns: &[Pattern]) -> Vec<TaskId> {
    if patterns.is_empty() {
        registry.ids().collect()
    } else {
        registry.select(patterns).collect()
    }
}

/// Run `command` against `registry`.
pub fn apply(registry: &mut TaskRegistry, command: &Command) -> Result<Outcome, TaskError> {
    match command {
        Command::New { subject, status } => registry.insert(subject.as_str(), *status),
        Command::List { patterns } => {
            let ids = selected_ids(registry, patterns);
            Ok(registry.list(Some(&ids)))
        }
        Command::Delete { id } => registry.delete(*id, false),
        Command::DeleteAll => Ok(registry.delete_all()),
        Command::Rebase => Ok(registry.rebase()),
        Command::Replace {
            id,
            subject,
            keep_status: true,
        } => registry.replace_preserving(*id, subject.as_str()),
        Command::Replace { id, subject, .. } => registry.replace(*id, subject.as_str()),
        Command::SetStatus { id, status } => registry.set_status(*id, *status),
        Command::ResetStatus { id } => registry.reset_status(*id),
        Command::SetProjects { id, projects } => registry.set_projects(*id, projects.clone()),
    }
}

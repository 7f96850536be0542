//! In-memory task registry.
//!
//! A mapping from [`TaskId`] to [`Task`], iterated in ascending id order.
//! Every operation is a single mutation of the mapping and reports what it
//! did as an [`Outcome`]; persisting the result is the caller's job (see
//! [`crate::store`]).
//!
//! # Id assignment
//!
//! `new_index()` is one past the largest current id, or `1` when empty.
//! Ids only shrink through an explicit [`TaskRegistry::rebase`]. When the
//! largest id is `u32::MAX` there is no next id and inserts fail with
//! [`TaskError::IdsExhausted`] until a rebase frees the top of the range.

use std::collections::BTreeMap;

use crate::error::TaskError;
use crate::types::{Pattern, Status, Task, TaskId};

// ---------------------------------------------------------------------------
// 1. Outcome
// ---------------------------------------------------------------------------

/// What kind of operation produced an [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Added,
    Changed,
    Deleted,
    Cleared,
    Rebased,
    StatusChanged,
    ProjectsChanged,
    Listed,
}

/// Structured result of one registry operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub kind: OutcomeKind,
    /// The task the operation touched, if it touched exactly one.
    pub affected_id: Option<TaskId>,
    /// Human-readable message lines, in print order.
    pub lines: Vec<String>,
}

impl Outcome {
    fn new(kind: OutcomeKind, affected_id: Option<TaskId>, lines: Vec<String>) -> Self {
        Self {
            kind,
            affected_id,
            lines,
        }
    }

    /// The message lines joined with newlines.
    pub fn rendered_text(&self) -> String {
        self.lines.join("\n")
    }
}

// ---------------------------------------------------------------------------
// 2. Registry
// ---------------------------------------------------------------------------

/// Exclusive owner of all task records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskRegistry {
    tasks: BTreeMap<TaskId, Task>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate a registry from a previously saved mapping.
    pub fn from_tasks(tasks: BTreeMap<TaskId, Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &BTreeMap<TaskId, Task> {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Current ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.tasks.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &Task)> + '_ {
        self.tasks.iter().map(|(id, task)| (*id, task))
    }

    /// Id the next [`insert`](Self::insert) will assign.
    pub fn new_index(&self) -> Result<TaskId, TaskError> {
        match self.tasks.keys().next_back() {
            None => Ok(TaskId::FIRST),
            Some(last) => last.checked_next().ok_or(TaskError::IdsExhausted(*last)),
        }
    }

    // -- insert / lookup / replace -----------------------------------------

    /// Store a new task under `new_index()`. Fails only when the id range
    /// is exhausted, leaving the registry untouched.
    pub fn insert(
        &mut self,
        subject: impl Into<String>,
        status: Status,
    ) -> Result<Outcome, TaskError> {
        self.insert_task(Task::new(subject).with_status(status))
    }

    /// Store a fully-built record under `new_index()`.
    pub fn insert_task(&mut self, task: Task) -> Result<Outcome, TaskError> {
        let id = self.new_index()?;
        let line = task.format_with_id(id);
        self.tasks.insert(id, task);
        Ok(Outcome::new(
            OutcomeKind::Added,
            Some(id),
            vec!["New task added:".to_owned(), line],
        ))
    }

    pub fn lookup(&self, id: TaskId) -> Result<&Task, TaskError> {
        self.tasks.get(&id).ok_or(TaskError::NotFound(id))
    }

    /// Overwrite the record at `id` with a fresh one: status goes back to
    /// `Empty` and project tags are cleared. Never inserts.
    pub fn replace(&mut self, id: TaskId, subject: impl Into<String>) -> Result<Outcome, TaskError> {
        let task = self.task_mut(id)?;
        *task = Task::new(subject);
        Ok(self.changed(OutcomeKind::Changed, "Task changed:", id))
    }

    /// Like [`replace`](Self::replace) but keeps the prior status and tags.
    pub fn replace_preserving(
        &mut self,
        id: TaskId,
        subject: impl Into<String>,
    ) -> Result<Outcome, TaskError> {
        let task = self.task_mut(id)?;
        task.subject = subject.into();
        Ok(self.changed(OutcomeKind::Changed, "Task changed:", id))
    }

    // -- delete -------------------------------------------------------------

    /// Remove the record at `id`. `silent` suppresses the confirmation line.
    pub fn delete(&mut self, id: TaskId, silent: bool) -> Result<Outcome, TaskError> {
        self.tasks.remove(&id).ok_or(TaskError::NotFound(id))?;
        let lines = if silent {
            vec![]
        } else {
            vec![format!("Deleted task {id}")]
        };
        Ok(Outcome::new(OutcomeKind::Deleted, Some(id), lines))
    }

    /// Remove every record. Succeeds on an empty registry too.
    pub fn delete_all(&mut self) -> Outcome {
        self.tasks.clear();
        Outcome::new(
            OutcomeKind::Cleared,
            None,
            vec!["All tasks deleted".to_owned()],
        )
    }

    // -- rebase -------------------------------------------------------------

    /// Renumber ids to `1..=N`, keeping their current relative order.
    ///
    /// The new mapping is built in full and then swapped in, so no
    /// partially renumbered state is ever observable.
    pub fn rebase(&mut self) -> Outcome {
        let renumbered: BTreeMap<TaskId, Task> = std::mem::take(&mut self.tasks)
            .into_values()
            .zip(1..)
            .map(|(task, n)| (TaskId(n), task))
            .collect();
        self.tasks = renumbered;
        Outcome::new(
            OutcomeKind::Rebased,
            None,
            vec!["Rebased task ids".to_owned()],
        )
    }

    // -- status / projects --------------------------------------------------

    pub fn set_status(&mut self, id: TaskId, status: Status) -> Result<Outcome, TaskError> {
        self.task_mut(id)?.status = status;
        Ok(self.changed(OutcomeKind::StatusChanged, "Status changed:", id))
    }

    /// Equivalent to `set_status(id, Status::Empty)`.
    pub fn reset_status(&mut self, id: TaskId) -> Result<Outcome, TaskError> {
        self.set_status(id, Status::Empty)
    }

    /// Replace the project tags of the record at `id`.
    pub fn set_projects(&mut self, id: TaskId, projects: Vec<String>) -> Result<Outcome, TaskError> {
        self.task_mut(id)?.projects = projects;
        Ok(self.changed(OutcomeKind::ProjectsChanged, "Projects changed:", id))
    }

    // -- select / list ------------------------------------------------------

    /// Ids of tasks whose display form satisfies AT LEAST ONE pattern.
    ///
    /// Patterns combine with OR, not AND: `["a", "b"]` selects the union.
    /// An empty pattern list selects nothing. Ids come out ascending and the
    /// iterator reads the current mapping, so calling again re-evaluates.
    pub fn select<'a>(&'a self, patterns: &'a [Pattern]) -> impl Iterator<Item = TaskId> + 'a {
        self.tasks.iter().filter_map(move |(id, task)| {
            let text = task.to_string();
            patterns
                .iter()
                .any(|pattern| pattern.matches(&text))
                .then_some(*id)
        })
    }

    /// One formatted line per id plus a `Listed {shown} of {total} tasks`
    /// summary. `None` lists everything; ids not in the registry are skipped.
    pub fn list(&self, ids: Option<&[TaskId]>) -> Outcome {
        let mut lines: Vec<String> = match ids {
            Some(ids) => ids
                .iter()
                .filter_map(|id| self.tasks.get(id).map(|task| task.format_with_id(*id)))
                .collect(),
            None => self
                .tasks
                .iter()
                .map(|(id, task)| task.format_with_id(*id))
                .collect(),
        };
        let shown = lines.len();
        lines.push(format!("Listed {shown} of {} tasks", self.len()));
        Outcome::new(OutcomeKind::Listed, None, lines)
    }

    // -- private helpers ----------------------------------------------------

    fn task_mut(&mut self, id: TaskId) -> Result<&mut Task, TaskError> {
        self.tasks.get_mut(&id).ok_or(TaskError::NotFound(id))
    }

    /// Outcome for a single-record change; `id` must be present.
    fn changed(&self, kind: OutcomeKind, header: &str, id: TaskId) -> Outcome {
        let line = self
            .tasks
            .get(&id)
            .map(|task| task.format_with_id(id))
            .unwrap_or_default();
        Outcome::new(kind, Some(id), vec![header.to_owned(), line])
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

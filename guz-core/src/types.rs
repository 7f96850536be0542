//! Domain types for the task registry.
//!
//! All types are serializable/deserializable via serde + serde_yaml.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TaskError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed, positive task identifier.
///
/// Zero is rejected everywhere an id enters the program: CLI parsing,
/// snapshot deserialization and [`TryFrom<u32>`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct TaskId(pub u32);

impl TaskId {
    /// The id handed out by an empty registry.
    pub const FIRST: TaskId = TaskId(1);

    /// The id immediately after this one, or `None` past `u32::MAX`.
    pub fn checked_next(self) -> Option<TaskId> {
        self.0.checked_add(1).map(TaskId)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<u32> for TaskId {
    type Error = String;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        match n {
            0 => Err("task id must be a positive integer".to_owned()),
            n => Ok(Self(n)),
        }
    }
}

impl From<TaskId> for u32 {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl FromStr for TaskId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s
            .parse::<u32>()
            .map_err(|_| format!("'{s}' is not a task id"))?;
        TaskId::try_from(n)
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Status of a task. Transitions are unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Empty,
    Unclear,
    Hold,
    Ready,
    WorkInProgress,
    Done,
    Failed,
    Cancelled,
}

impl Status {
    /// Every status, in display order.
    pub const ALL: [Status; 8] = [
        Status::Empty,
        Status::Unclear,
        Status::Hold,
        Status::Ready,
        Status::WorkInProgress,
        Status::Done,
        Status::Failed,
        Status::Cancelled,
    ];

    /// One-character glyph shown between brackets in listings.
    pub fn glyph(self) -> char {
        match self {
            Status::Empty => ' ',
            Status::Unclear => '?',
            Status::Hold => '>',
            Status::Ready => '*',
            Status::WorkInProgress => 'w',
            Status::Done => '+',
            Status::Failed => 'x',
            Status::Cancelled => '/',
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Empty => write!(f, "none"),
            Status::Unclear => write!(f, "unclear"),
            Status::Hold => write!(f, "hold"),
            Status::Ready => write!(f, "ready"),
            Status::WorkInProgress => write!(f, "wip"),
            Status::Done => write!(f, "done"),
            Status::Failed => write!(f, "fail"),
            Status::Cancelled => write!(f, "cancel"),
        }
    }
}

impl FromStr for Status {
    type Err = TaskError;

    /// Resolve a status selector. Accepts the long names, the one-letter
    /// short forms and a few historical aliases, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "empty" => Ok(Status::Empty),
            "unclear" | "u" => Ok(Status::Unclear),
            "hold" | "wait" | "lookafter" | "l" => Ok(Status::Hold),
            "ready" | "r" => Ok(Status::Ready),
            "wip" | "w" => Ok(Status::WorkInProgress),
            "done" | "d" => Ok(Status::Done),
            "fail" | "failed" | "f" => Ok(Status::Failed),
            "cancel" | "cancelled" | "c" => Ok(Status::Cancelled),
            _ => Err(TaskError::InvalidStatus(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A single task record. The subject is replaced wholesale, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub subject: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,
}

impl Task {
    /// A fresh record with `Empty` status and no project tags.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            status: Status::Empty,
            projects: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// `" 7 [+] subject +tag"`: the id right-aligned to width 2.
    pub fn format_with_id(&self, id: TaskId) -> String {
        format!("{:>2} {}", id.0, self)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.glyph(), self.subject)?;
        for project in &self.projects {
            write!(f, " {project}")?;
        }
        Ok(())
    }
}

/// A single `select` pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Matches text containing the needle.
    Include(String),
    /// Matches text NOT containing the needle (written `-needle`).
    Exclude(String),
}

impl Pattern {
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix('-') {
            Some(rest) => Pattern::Exclude(rest.to_owned()),
            None => Pattern::Include(raw.to_owned()),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        match self {
            Pattern::Include(needle) => text.contains(needle.as_str()),
            Pattern::Exclude(needle) => !text.contains(needle.as_str()),
        }
    }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern::parse(s)
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Pattern::parse(&s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

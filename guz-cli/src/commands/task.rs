//! `guz new`, `del`, `edit`, `mark`, `unmark`, `project` argument shapes.

use clap::Args;

use guz_core::{Command, TaskId};

use super::super::StatusArg;

/// Arguments for `guz new`.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Initial status (defaults to none).
    #[arg(long, short = 's', value_name = "STATUS")]
    pub status: Option<StatusArg>,

    /// Task text; words are joined with single spaces.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

impl NewArgs {
    pub fn into_command(self) -> Command {
        Command::New {
            subject: self.text.join(" "),
            status: self.status.unwrap_or_default().into(),
        }
    }
}

/// A bare task id (`guz del <id>`, `guz unmark <id>`).
#[derive(Args, Debug)]
pub struct IdArgs {
    pub id: TaskId,
}

/// Arguments for `guz edit`.
#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: TaskId,

    /// Keep the current status and project tags instead of resetting them.
    #[arg(long)]
    pub keep_status: bool,

    /// Replacement text.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

impl EditArgs {
    pub fn into_command(self) -> Command {
        Command::Replace {
            id: self.id,
            subject: self.text.join(" "),
            keep_status: self.keep_status,
        }
    }
}

/// Arguments for `guz mark`.
#[derive(Args, Debug)]
pub struct MarkArgs {
    pub id: TaskId,

    /// none | unclear | hold | ready | wip | done | fail | cancel
    /// (short forms: u, l, r, w, d, f, c).
    pub status: StatusArg,
}

impl MarkArgs {
    pub fn into_command(self) -> Command {
        Command::SetStatus {
            id: self.id,
            status: self.status.into(),
        }
    }
}

/// Arguments for `guz project`.
#[derive(Args, Debug)]
pub struct ProjectArgs {
    pub id: TaskId,

    /// Project tags, e.g. `+home +errands`. None clears the tags.
    pub tags: Vec<String>,
}

impl ProjectArgs {
    pub fn into_command(self) -> Command {
        Command::SetProjects {
            id: self.id,
            projects: self.tags,
        }
    }
}

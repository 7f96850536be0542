//! guz: numbered personal task list on the command line.
//!
//! # Usage
//!
//! ```text
//! guz new [--status S] <text>...
//! guz list [--json] [<pattern>...]
//! guz del <id>
//! guz edit <id> [--keep-status] <text>...
//! guz mark <id> <status>
//! guz unmark <id>
//! guz project <id> [<tag>...]
//! guz rebase
//! guz delete-all
//! ```
//!
//! Global: `--file <PATH>` (or `$GUZ_FILE`) picks the snapshot, default
//! `~/.guz/tasks.yaml`; `--no-init` refuses to create a missing one.

mod commands;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use commands::{
    list::ListArgs,
    task::{EditArgs, IdArgs, MarkArgs, NewArgs, ProjectArgs},
    transaction,
};
use guz_core::{Command, Status, StoreConfig};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "guz",
    version,
    about = "Keep a numbered list of tasks with status flags and project tags",
    long_about = None,
)]
struct Cli {
    /// Snapshot file to use instead of ~/.guz/tasks.yaml.
    #[arg(long, short = 'f', env = "GUZ_FILE", global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Fail instead of creating an empty snapshot when none exists.
    #[arg(long, global = true)]
    no_init: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a new task.
    New(NewArgs),

    /// List tasks, optionally filtered (a task matching ANY pattern is shown;
    /// prefix a pattern with '-' to match tasks NOT containing it).
    List(ListArgs),

    /// Delete a task by id.
    Del(IdArgs),

    /// Replace the text of a task.
    Edit(EditArgs),

    /// Set the status of a task.
    Mark(MarkArgs),

    /// Clear the status of a task.
    Unmark(IdArgs),

    /// Set (or clear) the project tags of a task.
    Project(ProjectArgs),

    /// Renumber tasks to 1..N, keeping their order.
    Rebase,

    /// Delete every task.
    DeleteAll,
}

// ---------------------------------------------------------------------------
// Shared Status argument: parsed from CLI strings, converts to core type
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `Status` from CLI args.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusArg(pub Status);

impl FromStr for StatusArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse::<Status>().map(Self).map_err(|e| e.to_string())
    }
}

impl fmt::Display for StatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<StatusArg> for Status {
    fn from(s: StatusArg) -> Self {
        s.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = store_config(cli.file, cli.no_init)?;
    let command = match cli.command {
        Commands::List(args) if args.json => return args.run_json(&config),
        Commands::List(args) => args.into_command(),
        Commands::New(args) => args.into_command(),
        Commands::Del(args) => Command::Delete { id: args.id },
        Commands::Edit(args) => args.into_command(),
        Commands::Mark(args) => args.into_command(),
        Commands::Unmark(args) => Command::ResetStatus { id: args.id },
        Commands::Project(args) => args.into_command(),
        Commands::Rebase => Command::Rebase,
        Commands::DeleteAll => Command::DeleteAll,
    };

    let transcript = transaction::run(&config, &command)?;
    transaction::print(&transcript)
}

fn store_config(file: Option<PathBuf>, no_init: bool) -> Result<StoreConfig> {
    let config = match file {
        Some(path) => StoreConfig::new(path, true),
        None => StoreConfig::from_home().context("could not locate the task snapshot")?,
    };
    Ok(config.with_init_if_absent(!no_init))
}

/// Diagnostics go to stderr so stdout carries only task output.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

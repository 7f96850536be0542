//! `guz list [--json] [<pattern>...]`

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use guz_core::{command, Command, Pattern, SnapshotStore, StoreConfig, TaskRegistry};

/// Arguments for `guz list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,

    /// Substring filters; `-text` matches tasks NOT containing `text`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub patterns: Vec<String>,
}

#[derive(Serialize)]
struct ListJson {
    summary: ListSummaryJson,
    tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
struct ListSummaryJson {
    shown: usize,
    total: usize,
}

#[derive(Serialize)]
struct TaskJson {
    id: u32,
    status: String,
    glyph: char,
    subject: String,
    projects: Vec<String>,
}

impl ListArgs {
    pub fn into_command(self) -> Command {
        Command::List {
            patterns: self.patterns.into_iter().map(Pattern::from).collect(),
        }
    }

    /// Read-only: opens the snapshot, never saves it.
    pub fn run_json(self, config: &StoreConfig) -> Result<()> {
        let store = SnapshotStore::new(config.clone());
        let registry = store
            .open()
            .with_context(|| format!("failed to load tasks from '{}'", store.path().display()))?;

        let payload = build_payload(&registry, &self.patterns);
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).context("failed to serialize list JSON")?
        );
        Ok(())
    }
}

fn build_payload(registry: &TaskRegistry, raw_patterns: &[String]) -> ListJson {
    let patterns: Vec<Pattern> = raw_patterns.iter().map(|p| Pattern::parse(p)).collect();

    let tasks: Vec<TaskJson> = command::selected_ids(registry, &patterns)
        .into_iter()
        .filter_map(|id| {
            let task = registry.lookup(id).ok()?;
            Some(TaskJson {
                id: id.0,
                status: task.status.to_string(),
                glyph: task.status.glyph(),
                subject: task.subject.clone(),
                projects: task.projects.clone(),
            })
        })
        .collect();

    ListJson {
        summary: ListSummaryJson {
            shown: tasks.len(),
            total: registry.len(),
        },
        tasks,
    }
}

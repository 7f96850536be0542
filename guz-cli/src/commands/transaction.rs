//! One load → apply → save → print round trip per invocation.

use anyhow::{Context, Result};
use colored::Colorize;

use guz_core::{command, Command, Entry, SnapshotStore, StoreConfig, Tone, Transcript};

/// Apply `command` to the snapshot named by `config`.
///
/// The snapshot is saved once, after the command, and only if the command
/// can mutate. A missing id is reported in the transcript and is not an
/// error; store failures are.
pub fn run(config: &StoreConfig, command: &Command) -> Result<Transcript> {
    let store = SnapshotStore::new(config.clone());
    let mut registry = store
        .open()
        .with_context(|| format!("failed to load tasks from '{}'", store.path().display()))?;

    let mut transcript = Transcript::new();
    transcript
        .record(command::apply(&mut registry, command))
        .context("command aborted")?;

    if command.is_mutating() && transcript.not_found_count() == 0 {
        store
            .save(&registry)
            .with_context(|| format!("failed to save tasks to '{}'", store.path().display()))?;
    } else {
        tracing::debug!("nothing to save");
    }
    Ok(transcript)
}

/// Flush the transcript to stdout, highlighting failures and summaries.
pub fn print(transcript: &Transcript) -> Result<()> {
    transcript
        .write_with(&mut std::io::stdout().lock(), style_entry)
        .context("failed to write output")
}

fn style_entry(entry: &Entry) -> String {
    match entry.tone {
        Tone::Failure => entry.text.red().bold().to_string(),
        Tone::Summary => entry.text.bright_black().to_string(),
        Tone::Plain => entry.text.clone(),
    }
}

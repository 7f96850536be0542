//! Message sink for one load → apply → save transaction.

use std::io::{self, Write};

use crate::error::TaskError;
use crate::registry::{Outcome, OutcomeKind};

/// What kind of message a transcript line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    /// An operation referenced a missing id.
    Failure,
    /// The trailing count line of a listing.
    Summary,
}

/// One transcript line and its tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub tone: Tone,
    pub text: String,
}

/// Ordered message lines collected while a transaction runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold an operation result into the transcript.
    ///
    /// A `NotFound` error is reported as its message line, the same way a
    /// success is. Any other error is handed back to the caller as fatal.
    pub fn record(&mut self, result: Result<Outcome, TaskError>) -> Result<(), TaskError> {
        match result {
            Ok(outcome) => self.extend_outcome(outcome),
            Err(err @ TaskError::NotFound(_)) => self.push_tone(Tone::Failure, err.to_string()),
            Err(err) => return Err(err),
        }
        Ok(())
    }

    fn extend_outcome(&mut self, outcome: Outcome) {
        let summary_at = match outcome.kind {
            OutcomeKind::Listed => outcome.lines.len().checked_sub(1),
            _ => None,
        };
        for (i, text) in outcome.lines.into_iter().enumerate() {
            let tone = if Some(i) == summary_at {
                Tone::Summary
            } else {
                Tone::Plain
            };
            self.push_tone(tone, text);
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.push_tone(Tone::Plain, line);
    }

    pub fn push_tone(&mut self, tone: Tone, line: impl Into<String>) {
        self.entries.push(Entry {
            tone,
            text: line.into(),
        });
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn lines(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.text.as_str()).collect()
    }

    /// How many recorded operations referenced a missing id.
    pub fn not_found_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.tone == Tone::Failure)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write every line, newline-terminated, to `out`.
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        self.write_with(out, |entry| entry.text.clone())
    }

    /// Like [`write_to`](Self::write_to), rendering each entry with `render`.
    pub fn write_with(
        &self,
        out: &mut impl Write,
        render: impl Fn(&Entry) -> String,
    ) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(out, "{}", render(entry))?;
        }
        out.flush()
    }
}

//! Persisted summary history.
//!
//! A small JSON file of recent summaries, newest first, capped at a fixed
//! number of entries. Thin I/O only; callers decide whether to record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::summarize::SummaryOptions;
use crate::Result;

/// Default cap on retained entries
pub const MAX_HISTORY_ITEMS: usize = 10;

const SNIPPET_CHARS: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Leading snippet of the original input
    pub snippet: String,
    pub summary: String,
    pub options: SummaryOptions,
    pub created_at: DateTime<Utc>,
}

pub struct HistoryStore {
    path: PathBuf,
    max_entries: usize,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            path: path.into(),
            max_entries,
        }
    }

    /// Load all entries, newest first. A missing file is an empty history.
    pub fn load(&self) -> Result<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Prepend a new entry, dropping the oldest past the cap.
    pub fn add(&self, text: &str, summary: &str, options: &SummaryOptions) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(
            0,
            HistoryEntry {
                snippet: snippet(text),
                summary: summary.to_string(),
                options: *options,
                created_at: Utc::now(),
            },
        );
        entries.truncate(self.max_entries);
        self.save(&entries)
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Char-safe leading snippet of the input text.
fn snippet(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_CHARS) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

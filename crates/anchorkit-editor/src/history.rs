//! Undo/redo history over whole-path snapshots.
//!
//! The top of the undo stack is always the current committed state; the
//! entry below it is what `undo` restores. The bottom entry is the baseline
//! recorded at load and can never be undone past.

use anchorkit_core::Point;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One committed state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Serialized path data.
    pub path: String,
    /// Translation component of the placement transform.
    pub translation: Point,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(path: String, translation: Point, description: impl Into<String>) -> Self {
        Self {
            path,
            translation,
            description: description.into(),
            timestamp: Utc::now(),
        }
    }

    /// Same path and translation, ignoring description and time.
    pub fn same_state(&self, other: &HistoryRecord) -> bool {
        self.path == other.path && self.translation == other.translation
    }
}

/// Snapshot history with a bounded undo depth.
#[derive(Debug, Clone)]
pub struct PathHistory {
    undo_stack: Vec<HistoryRecord>,
    redo_stack: Vec<HistoryRecord>,
    max_depth: usize,
    batch: Option<String>,
}

impl PathHistory {
    /// Create a history with default depth (100)
    pub fn new() -> Self {
        Self::with_depth(100)
    }

    /// Create with custom maximum undo depth
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
            batch: None,
        }
    }

    /// Drops everything and starts over from `baseline`.
    pub fn reset(&mut self, baseline: HistoryRecord) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.batch = None;
        self.undo_stack.push(baseline);
    }

    /// Records a committed state. Clears the redo stack.
    pub fn record(&mut self, record: HistoryRecord) {
        self.redo_stack.clear();
        self.undo_stack.push(record);

        // baseline plus max_depth undoable steps
        if self.undo_stack.len() > self.max_depth + 1 {
            self.undo_stack.remove(0);
        }
    }

    /// The state [`undo`](Self::undo) would restore, without moving.
    pub fn peek_undo(&self) -> Option<&HistoryRecord> {
        let len = self.undo_stack.len();
        if len < 2 {
            return None;
        }
        self.undo_stack.get(len - 2)
    }

    /// The state [`redo`](Self::redo) would restore, without moving.
    pub fn peek_redo(&self) -> Option<&HistoryRecord> {
        self.redo_stack.last()
    }

    /// Steps back. Returns the state to restore.
    pub fn undo(&mut self) -> Option<&HistoryRecord> {
        if self.undo_stack.len() < 2 {
            return None;
        }
        let top = self.undo_stack.pop()?;
        self.redo_stack.push(top);
        self.undo_stack.last()
    }

    /// Steps forward. Returns the state to restore.
    pub fn redo(&mut self) -> Option<&HistoryRecord> {
        let record = self.redo_stack.pop()?;
        self.undo_stack.push(record);
        self.undo_stack.last()
    }

    /// The current committed state.
    pub fn current(&self) -> Option<&HistoryRecord> {
        self.undo_stack.last()
    }

    /// Starts batching edits into one record.
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.batch = Some(description.into());
    }

    /// Ends the batch, returning its description.
    pub fn end_batch(&mut self) -> Option<String> {
        self.batch.take()
    }

    pub fn in_batch(&self) -> bool {
        self.batch.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undo steps available
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len().saturating_sub(1)
    }

    /// Number of redo steps available
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Undo descriptions, most recent first.
    pub fn undo_descriptions(&self) -> Vec<&str> {
        self.undo_stack
            .iter()
            .skip(1)
            .rev()
            .map(|r| r.description.as_str())
            .collect()
    }
}

impl Default for PathHistory {
    fn default() -> Self {
        Self::new()
    }
}

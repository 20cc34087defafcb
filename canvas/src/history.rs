//! Linear undo/redo history over full document snapshots.
//!
//! The log holds up to `capacity` snapshots and a cursor pointing at the one
//! that matches the live document. Saving after an undo drops the redo tail.
//! When the log is full the oldest snapshot is evicted.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::consts::HISTORY_CAPACITY;
use crate::doc::DocStore;

/// A deep copy of the document taken at a commit point.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub doc: DocStore,
    /// Milliseconds since the Unix epoch when the snapshot was taken.
    pub ts: i64,
}

impl Snapshot {
    #[must_use]
    pub fn capture(doc: &DocStore) -> Self {
        Self { doc: doc.clone(), ts: now_ms() }
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}

/// Bounded snapshot log with a cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Snapshot>,
    cursor: usize,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log that keeps at most `capacity` snapshots (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity), cursor: 0, capacity }
    }

    /// Record a copy of `doc` after the cursor, discarding any redo tail.
    pub fn save(&mut self, doc: &DocStore) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push_back(Snapshot::capture(doc));
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            tracing::debug!(capacity = self.capacity, "history full; evicted oldest snapshot");
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one snapshot. Returns the document to restore, or `None` at the start.
    pub fn undo(&mut self) -> Option<&DocStore> {
        if self.cursor == 0 || self.entries.is_empty() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).map(|s| &s.doc)
    }

    /// Step forward one snapshot. Returns the document to restore, or `None` at the end.
    pub fn redo(&mut self) -> Option<&DocStore> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor).map(|s| &s.doc)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0 && !self.entries.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// The snapshot under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.cursor)
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retained snapshots, oldest first.
    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter()
    }
}

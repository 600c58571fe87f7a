// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only conversation log.

use chrono::Utc;
use vizion_core::{ConversationEntry, EntryId, NewEntry};

/// Ordered log of user and assistant entries.
///
/// Entries are immutable once appended. Ids increase monotonically for the
/// lifetime of the log, including across [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct ConversationLog {
    entries: Vec<ConversationEntry>,
    next_id: u64,
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry at the end, assigning the next id. Returns a copy of
    /// the stored entry.
    pub fn append(&mut self, entry: NewEntry) -> ConversationEntry {
        let stored = ConversationEntry {
            id: EntryId(self.next_id),
            role: entry.role,
            content: entry.content,
            provider_metadata: entry.provider_metadata,
            is_error: entry.is_error,
            created_at: Utc::now(),
        };
        self.next_id += 1;
        self.entries.push(stored.clone());
        stored
    }

    /// Read-only copy of the log in append order.
    pub fn snapshot(&self) -> Vec<ConversationEntry> {
        self.entries.clone()
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }
}

//! Evaluation tape
//!
//! Each successful `=` leaves a [`HistoryEntry`] holding three texts: the
//! expression as it was keyed, with display glyphs such as `×` and `√(`; the
//! translated form the history pane showed; and the result the current pane
//! showed. The keyed text is what the engine's `recall` loads back into the
//! expression, so an old calculation can be edited and run again.

use std::collections::VecDeque;

/// One successful evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Expression text as keyed, display glyphs included
    pub keyed: String,
    /// Translated expression, as shown in the history pane
    pub expression: String,
    /// Result text, as shown in the current pane
    pub result: String,
}

impl HistoryEntry {
    /// Builds an entry from the keyed text and what the panes showed
    #[must_use]
    pub fn new(
        keyed: impl Into<String>,
        expression: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            keyed: keyed.into(),
            expression: expression.into(),
            result: result.into(),
        }
    }

    /// `expression = result`
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} = {}", self.expression, self.result)
    }
}

/// Bounded tape; the oldest entry drops off when full
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_ENTRIES)
    }
}

impl History {
    /// Tape length used when the configuration does not say otherwise
    pub const DEFAULT_MAX_ENTRIES: usize = 100;

    /// A tape holding at most `capacity` entries; zero disables recording
    #[must_use]
    pub const fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Appends an evaluation
    pub fn record(&mut self, entry: HistoryEntry) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Number of entries on the tape
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empties the tape
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Entry `back` steps before the most recent one; `0` is the most recent
    #[must_use]
    pub fn recent(&self, back: usize) -> Option<&HistoryEntry> {
        self.entries.iter().rev().nth(back)
    }

    /// One `expression = result` line per entry, oldest first
    #[must_use]
    pub fn export_formatted(&self) -> String {
        self.entries
            .iter()
            .map(HistoryEntry::display)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

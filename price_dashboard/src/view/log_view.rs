use std::collections::VecDeque;

use chrono::Local;

use crate::view::severity::Severity;

pub const DEFAULT_LOG_CAPACITY: usize = 50;

/// One timestamped line of the status log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Local wall-clock time, `HH:MM:SS`.
    pub time: String,
    pub message: String,
    pub severity: Severity,
}

/// Capped status log, newest entry first.
///
/// Once `capacity` is reached each new entry evicts the oldest one.
#[derive(Debug, Clone)]
pub struct LogView {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl LogView {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Adds `message` stamped with the current local time.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) {
        self.push_entry(LogEntry {
            time: Local::now().format("%H:%M:%S").to_string(),
            message: message.into(),
            severity,
        });
    }

    pub fn push_entry(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn newest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LogView {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

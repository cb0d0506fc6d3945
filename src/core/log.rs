//! Timestamped, leveled log storage with bounded capacity.

use std::collections::VecDeque;
use std::time::SystemTime;

/// Regular output.
pub const LEVEL_INFO: u8 = 0;
/// Errors and dispatch faults.
pub const LEVEL_ERROR: u8 = 1;
/// Warnings.
pub const LEVEL_WARN: u8 = 2;
/// Internal/debug notices. Dropped unless debug logging is enabled.
pub const LEVEL_DEBUG: u8 = u8::MAX;

/// Format a SystemTime as HH:MM:SS (UTC).
pub fn format_timestamp(t: SystemTime) -> String {
    let duration = t.duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
    let secs = duration.as_secs();
    let hours = (secs / 3600) % 24;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// A single log line. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    timestamp: SystemTime,
    message: String,
    level: u8,
}

impl LogEntry {
    /// Create an entry stamped with the current time.
    ///
    /// Line breaks in `message` are replaced with spaces.
    pub fn new(message: impl AsRef<str>, level: u8) -> Self {
        Self::with_timestamp(message, level, SystemTime::now())
    }

    /// Create an entry with an explicit timestamp.
    pub fn with_timestamp(message: impl AsRef<str>, level: u8, timestamp: SystemTime) -> Self {
        let message = message
            .as_ref()
            .replace("\r\n", " ")
            .replace(['\n', '\r'], " ");

        Self {
            timestamp,
            message,
            level,
        }
    }

    #[inline]
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Render as `[<message>] [<level>]`, prefixed with `[<HH:MM:SS>] `
    /// when `show_timestamp` is set.
    pub fn format(&self, show_timestamp: bool) -> String {
        if show_timestamp {
            format!(
                "[{}] [{}] [{}]",
                format_timestamp(self.timestamp),
                self.message,
                self.level
            )
        } else {
            format!("[{}] [{}]", self.message, self.level)
        }
    }
}

/// Ordered log storage. Insertion order is chronological order.
///
/// A capacity of `0` means unbounded; otherwise the oldest entry is evicted
/// before a new one is appended to a full buffer.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    appended: u64,
}

impl LogBuffer {
    /// Create an empty buffer. `capacity == 0` means unbounded.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
            appended: 0,
        }
    }

    /// Append an entry, returning the evicted one if the buffer was full.
    pub fn push(&mut self, entry: LogEntry) -> Option<LogEntry> {
        let evicted = if self.capacity > 0 && self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };

        self.entries.push_back(entry);
        self.appended += 1;
        evicted
    }

    /// Remove every entry, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    /// Change the capacity, evicting the oldest entries that no longer fit.
    ///
    /// Returns the number of evicted entries.
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        self.capacity = capacity;
        if capacity == 0 || self.entries.len() <= capacity {
            return 0;
        }

        let excess = self.entries.len() - capacity;
        self.entries.drain(..excess);
        excess
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of entries ever appended, including evicted and cleared ones.
    #[inline]
    pub fn total_appended(&self) -> u64 {
        self.appended
    }

    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn messages(buffer: &LogBuffer) -> Vec<&str> {
        buffer.iter().map(LogEntry::message).collect()
    }

    #[test]
    fn test_entry_normalizes_newlines() {
        let entry = LogEntry::new("first\nsecond\r\nthird\rfourth", LEVEL_INFO);
        assert_eq!(entry.message(), "first second third fourth");
    }

    #[test]
    fn test_entry_format() {
        let at = SystemTime::UNIX_EPOCH + Duration::from_secs(3600 * 13 + 60 * 7 + 9);
        let entry = LogEntry::with_timestamp("hello", LEVEL_ERROR, at);

        assert_eq!(entry.format(false), "[hello] [1]");
        assert_eq!(entry.format(true), "[13:07:09] [hello] [1]");
    }

    #[test]
    fn test_bounded_buffer_evicts_oldest() {
        let mut buffer = LogBuffer::new(3);
        for i in 1..=5 {
            buffer.push(LogEntry::new(format!("entry {}", i), LEVEL_INFO));
        }

        assert_eq!(buffer.len(), 3);
        assert_eq!(messages(&buffer), vec!["entry 3", "entry 4", "entry 5"]);
        assert_eq!(buffer.total_appended(), 5);
    }

    #[test]
    fn test_push_returns_evicted() {
        let mut buffer = LogBuffer::new(1);
        assert!(buffer.push(LogEntry::new("a", LEVEL_INFO)).is_none());

        let evicted = buffer.push(LogEntry::new("b", LEVEL_INFO)).unwrap();
        assert_eq!(evicted.message(), "a");
    }

    #[test]
    fn test_unbounded_buffer_grows() {
        let mut buffer = LogBuffer::new(0);
        for i in 0..100 {
            buffer.push(LogEntry::new(i.to_string(), LEVEL_INFO));
        }
        assert_eq!(buffer.len(), 100);
    }

    #[test]
    fn test_clear_returns_count() {
        let mut buffer = LogBuffer::new(0);
        buffer.push(LogEntry::new("a", LEVEL_INFO));
        buffer.push(LogEntry::new("b", LEVEL_INFO));

        assert_eq!(buffer.clear(), 2);
        assert!(buffer.is_empty());
        assert_eq!(buffer.clear(), 0);
    }

    #[test]
    fn test_shrinking_capacity_evicts() {
        let mut buffer = LogBuffer::new(0);
        for i in 1..=4 {
            buffer.push(LogEntry::new(i.to_string(), LEVEL_INFO));
        }

        assert_eq!(buffer.set_capacity(2), 2);
        assert_eq!(messages(&buffer), vec!["3", "4"]);

        assert_eq!(buffer.set_capacity(0), 0);
        assert_eq!(buffer.capacity(), 0);
    }
}

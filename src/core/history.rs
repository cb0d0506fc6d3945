//! Command history with a replay cursor.

/// Append-only command history.
///
/// The replay cursor lies in `[0, len]`; `len` means the live input is
/// authoritative and no history entry is being browsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history from previously saved entries.
    ///
    /// Adjacent duplicates are collapsed.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut history = Self::new();
        for entry in entries {
            history.push(entry);
        }
        history
    }

    /// Append a line unless it equals the most recent entry.
    ///
    /// On append the replay cursor moves past the newest entry. Returns
    /// whether the line was appended.
    pub fn push(&mut self, line: impl Into<String>) -> bool {
        let line = line.into();
        if self.entries.last() == Some(&line) {
            return false;
        }

        self.entries.push(line);
        self.reset_cursor();
        true
    }

    /// Stop browsing: move the replay cursor past the newest entry.
    pub fn reset_cursor(&mut self) {
        self.cursor = self.entries.len();
    }

    /// Step towards older entries.
    pub fn older(&mut self) -> Option<&str> {
        if self.entries.is_empty() || self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Step towards newer entries.
    ///
    /// Stops at the newest entry; it never steps back onto the live input.
    pub fn newer(&mut self) -> Option<&str> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether an entry is currently being browsed.
    #[inline]
    pub fn is_browsing(&self) -> bool {
        self.cursor < self.entries.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

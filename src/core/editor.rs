//! Single-line input editor.
//!
//! The cursor is a character index into the text and always lies in
//! `[0, len]`. Every edit other than a tab press ends a pending tab cycle.

/// Result of a tab press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// No candidate matched; the text is unchanged.
    None,
    /// Exactly one candidate matched and replaced the text.
    Unique,
    /// Several candidates matched; the text was extended to their common
    /// prefix. Carries the candidates so they can be listed.
    Ambiguous(Vec<String>),
    /// A repeated tab press swapped between the first and last candidate.
    Cycled,
}

/// Candidates of the last ambiguous tab press.
#[derive(Debug, Clone)]
struct TabCycle {
    first: String,
    last: String,
    show_last: bool,
}

/// Mutable input buffer with a cursor.
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    text: String,
    cursor: usize,
    tab: Option<TabCycle>,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length of the text in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the text and put the cursor at its end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.tab = None;
        self.text = text.into();
        self.cursor = self.len();
    }

    /// Empty the buffer, returning its previous contents.
    pub fn take(&mut self) -> String {
        self.tab = None;
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Insert a typed character. NUL is ignored.
    pub fn insert_char(&mut self, c: char) {
        if c == '\0' {
            return;
        }
        self.tab = None;
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Insert text (e.g. a paste) at the cursor, unfiltered.
    pub fn insert_text(&mut self, s: &str) {
        self.tab = None;
        let at = self.byte_offset(self.cursor);
        self.text.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    /// Remove the character before the cursor.
    pub fn backspace(&mut self) {
        self.tab = None;
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
    }

    /// Remove the character under the cursor.
    pub fn delete(&mut self) {
        self.tab = None;
        if self.cursor >= self.len() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.text.remove(at);
    }

    pub fn move_left(&mut self) {
        self.tab = None;
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.tab = None;
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn home(&mut self) {
        self.tab = None;
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.tab = None;
        self.cursor = self.len();
    }

    /// Complete the text against the names `search` returns for it.
    ///
    /// `search` must return candidates sorted ascending. A repeated press
    /// after an ambiguous completion alternates between the first and last
    /// candidate instead of searching again.
    pub fn tab_complete<F>(&mut self, search: F) -> Completion
    where
        F: FnOnce(&str) -> Vec<String>,
    {
        if let Some(mut cycle) = self.tab.take() {
            let next = if cycle.show_last {
                cycle.last.clone()
            } else {
                cycle.first.clone()
            };
            cycle.show_last = !cycle.show_last;
            self.set_text(next);
            self.tab = Some(cycle);
            return Completion::Cycled;
        }

        let candidates = search(&self.text);
        match candidates.as_slice() {
            [] => Completion::None,
            [only] => {
                let only = only.clone();
                self.set_text(only);
                Completion::Unique
            }
            [first, .., last] => {
                let prefix = common_prefix(first, last).to_string();
                let cycle = TabCycle {
                    first: first.clone(),
                    last: last.clone(),
                    show_last: false,
                };
                self.set_text(prefix);
                self.tab = Some(cycle);
                Completion::Ambiguous(candidates)
            }
        }
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

/// Longest common prefix of two strings, on character boundaries.
pub fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()));
    &a[..end]
}

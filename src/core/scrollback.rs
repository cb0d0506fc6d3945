//! The console's log together with its view window.
//!
//! [`Scrollback`] owns the [`LogBuffer`], the [`LevelVisibility`] filter and
//! the [`ViewWindow`], and recomputes the window after every structural change.

use std::collections::HashMap;
use std::io::{self, Write};

use bevy::prelude::*;

use super::{
    LevelVisibility, LogBuffer, LogEntry, ViewWindow, LEVEL_DEBUG, LEVEL_ERROR, LEVEL_WARN,
};

/// Log buffer, level filter and view window kept in sync.
#[derive(Debug, Clone)]
pub struct Scrollback {
    buffer: LogBuffer,
    visibility: LevelVisibility,
    view: ViewWindow,
    colors: HashMap<u8, Color>,
    debug_logging: bool,
}

impl Default for Scrollback {
    fn default() -> Self {
        Self::new(0, crate::config::DEFAULT_PAGE_SIZE)
    }
}

impl Scrollback {
    /// Create an empty scrollback. `capacity == 0` means unbounded.
    pub fn new(capacity: usize, page_size: usize) -> Self {
        let colors = HashMap::from([
            (LEVEL_ERROR, Color::srgb(1.0, 0.35, 0.35)),
            (LEVEL_WARN, Color::srgb(1.0, 0.85, 0.3)),
            (LEVEL_DEBUG, Color::srgb(0.55, 0.55, 0.55)),
        ]);

        Self {
            buffer: LogBuffer::new(capacity),
            visibility: LevelVisibility::new(),
            view: ViewWindow::new(page_size),
            colors,
            debug_logging: false,
        }
    }

    /// Append a message. Returns `false` if it was suppressed.
    pub fn log(&mut self, message: impl AsRef<str>, level: u8) -> bool {
        self.append(LogEntry::new(message, level))
    }

    /// Append an entry. Debug entries are dropped unless debug logging is on.
    pub fn append(&mut self, entry: LogEntry) -> bool {
        if entry.level() == LEVEL_DEBUG && !self.debug_logging {
            return false;
        }

        self.buffer.push(entry);
        self.refresh();
        true
    }

    /// Remove every entry and scroll back to the top. Returns the number removed.
    ///
    /// The view follows new output again afterwards.
    pub fn clear(&mut self) -> usize {
        let removed = self.buffer.clear();
        self.view.set_auto_scroll(true);
        self.view.reset_offset();
        self.refresh();
        removed
    }

    /// Write every entry, one formatted line each, oldest first.
    pub fn save<W: Write>(&self, mut writer: W, show_timestamps: bool) -> io::Result<()> {
        for entry in self.buffer.iter() {
            writeln!(writer, "{}", entry.format(show_timestamps))?;
        }
        writer.flush()
    }

    pub fn buffer(&self) -> &LogBuffer {
        &self.buffer
    }

    pub fn view(&self) -> &ViewWindow {
        &self.view
    }

    /// Entries on the current page, oldest first.
    pub fn page(&self) -> impl Iterator<Item = &LogEntry> {
        self.view
            .page_indices()
            .iter()
            .filter_map(|&index| self.buffer.get(index))
    }

    /// Number of entries that pass the level filter.
    pub fn visible_count(&self) -> usize {
        self.view.visible_count()
    }

    /// Number of stored entries regardless of the filter.
    pub fn total_count(&self) -> usize {
        self.buffer.len()
    }

    /// Change the capacity. Returns the number of evicted entries.
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        let evicted = self.buffer.set_capacity(capacity);
        self.refresh();
        evicted
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.view.set_page_size(page_size);
        self.refresh();
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }

    pub fn set_debug_logging(&mut self, enabled: bool) {
        self.debug_logging = enabled;
    }

    pub fn level_visible(&self, level: u8) -> bool {
        self.visibility.is_visible(level)
    }

    pub fn visibility(&self) -> &LevelVisibility {
        &self.visibility
    }

    pub fn set_level_visible(&mut self, level: u8, visible: bool) {
        self.visibility.set(level, visible);
        self.view.reset_offset();
        self.refresh();
    }

    /// Flip a level's visibility, returning the new value.
    pub fn toggle_level(&mut self, level: u8) -> bool {
        let visible = self.visibility.toggle(level);
        self.view.reset_offset();
        self.refresh();
        visible
    }

    /// Presentation color for a level, if one is set.
    pub fn level_color(&self, level: u8) -> Option<Color> {
        self.colors.get(&level).copied()
    }

    pub fn set_level_color(&mut self, level: u8, color: Color) {
        self.colors.insert(level, color);
    }

    pub fn page_up(&mut self) -> bool {
        self.view.page_up()
    }

    pub fn page_down(&mut self) -> bool {
        self.view.page_down()
    }

    pub fn scroll_by(&mut self, delta: isize) -> bool {
        self.view.scroll_by(delta)
    }

    /// Step used for incremental scrolling (a third of a page).
    pub fn scroll_step(&self) -> usize {
        (self.view.page_size() / 3).max(1)
    }

    pub fn set_auto_scroll(&mut self, auto_scroll: bool) {
        self.view.set_auto_scroll(auto_scroll);
    }

    fn refresh(&mut self) {
        self.view.recompute(&self.buffer, &self.visibility);
    }
}

//! Filtered, paged projection of a [`LogBuffer`].

use std::collections::HashMap;
use std::ops::Range;

use super::LogBuffer;

/// Per-level visibility. Levels without an entry are visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelVisibility {
    levels: HashMap<u8, bool>,
}

impl LevelVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_visible(&self, level: u8) -> bool {
        self.levels.get(&level).copied().unwrap_or(true)
    }

    pub fn set(&mut self, level: u8, visible: bool) {
        self.levels.insert(level, visible);
    }

    /// Flip a level's visibility, returning the new value.
    pub fn toggle(&mut self, level: u8) -> bool {
        let visible = !self.is_visible(level);
        self.levels.insert(level, visible);
        visible
    }

    /// Levels explicitly hidden, in ascending order.
    pub fn hidden(&self) -> Vec<u8> {
        let mut hidden: Vec<u8> = self
            .levels
            .iter()
            .filter(|(_, visible)| !**visible)
            .map(|(level, _)| *level)
            .collect();
        hidden.sort_unstable();
        hidden
    }
}

/// The visible window over the log.
///
/// Derived state: [`recompute`](Self::recompute) rebuilds it from the buffer
/// and the level visibility. Only `scroll_offset` (index of the first visible
/// entry within the filtered sequence) and `auto_scroll` survive a recompute.
#[derive(Debug, Clone)]
pub struct ViewWindow {
    /// Buffer indices of the entries that pass the level filter.
    filtered: Vec<usize>,
    scroll_offset: usize,
    page_size: usize,
    auto_scroll: bool,
}

impl ViewWindow {
    /// Create an empty window following the newest entries.
    pub fn new(page_size: usize) -> Self {
        Self {
            filtered: Vec::new(),
            scroll_offset: 0,
            page_size: page_size.max(1),
            auto_scroll: true,
        }
    }

    /// Rebuild the filtered sequence and re-clamp the scroll offset.
    pub fn recompute(&mut self, buffer: &LogBuffer, visibility: &LevelVisibility) {
        self.filtered.clear();
        self.filtered.extend(
            buffer
                .iter()
                .enumerate()
                .filter(|(_, entry)| visibility.is_visible(entry.level()))
                .map(|(index, _)| index),
        );

        let max = self.max_offset();
        self.scroll_offset = if self.auto_scroll {
            max
        } else {
            self.scroll_offset.min(max)
        };
    }

    /// Number of entries that pass the level filter.
    #[inline]
    pub fn visible_count(&self) -> usize {
        self.filtered.len()
    }

    #[inline]
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Change the page size. Callers must recompute afterwards.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    #[inline]
    pub fn auto_scroll(&self) -> bool {
        self.auto_scroll
    }

    pub fn set_auto_scroll(&mut self, auto_scroll: bool) {
        self.auto_scroll = auto_scroll;
        if auto_scroll {
            self.scroll_offset = self.max_offset();
        }
    }

    /// Reset the scroll offset to the top. Callers must recompute afterwards.
    pub fn reset_offset(&mut self) {
        self.scroll_offset = 0;
    }

    /// Largest valid scroll offset.
    #[inline]
    pub fn max_offset(&self) -> usize {
        self.filtered.len().saturating_sub(self.page_size)
    }

    /// Range of the current page within the filtered sequence.
    pub fn page_range(&self) -> Range<usize> {
        let end = (self.scroll_offset + self.page_size).min(self.filtered.len());
        self.scroll_offset.min(end)..end
    }

    /// Buffer indices of the entries on the current page.
    pub fn page_indices(&self) -> &[usize] {
        &self.filtered[self.page_range()]
    }

    /// Scroll one page towards older entries. Returns `false` if already at the top.
    pub fn page_up(&mut self) -> bool {
        if self.scroll_offset == 0 {
            return false;
        }
        let target = self.scroll_offset.saturating_sub(self.page_size);
        self.move_to(target);
        true
    }

    /// Scroll one page towards newer entries. Returns `false` if nothing is below.
    pub fn page_down(&mut self) -> bool {
        if self.scroll_offset >= self.max_offset() {
            return false;
        }
        let target = self.scroll_offset + self.page_size;
        self.move_to(target);
        true
    }

    /// Scroll by `delta` entries (negative is towards older entries).
    ///
    /// Returns `false` if the offset did not change.
    pub fn scroll_by(&mut self, delta: isize) -> bool {
        let target = if delta < 0 {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_offset.saturating_add(delta as usize)
        };
        let before = self.scroll_offset;
        self.move_to(target);
        self.scroll_offset != before
    }

    fn move_to(&mut self, target: usize) {
        let max = self.max_offset();
        self.scroll_offset = target.min(max);
        self.auto_scroll = self.scroll_offset == max;
    }
}

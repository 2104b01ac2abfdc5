//! Accumulated result list with selection and scrolling.
//!
//! The store only ever holds the latest page. `PhotoList` watches it and
//! appends each new page, starting over whenever the search string
//! changes, so the list reads page 1, then pages 1-2, then pages 1-3.

use crate::model::Photo;
use crate::state::infinite_scroll::PageInfo;
use crate::state::photo_state::PhotoState;
use std::ops::Range;

/// Every photo received for the current search, plus the cursor over them.
#[derive(Debug, Clone, Default)]
pub struct PhotoList {
    photos: Vec<Photo>,
    selected_index: usize,
    scroll_offset: usize,
    seen_search: String,
    seen_revision: u64,
}

impl PhotoList {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull any change from the store.
    ///
    /// Returns `true` if the list changed.
    pub fn sync(&mut self, state: &PhotoState) -> bool {
        let mut changed = false;
        if state.search_string() != self.seen_search {
            self.seen_search = state.search_string().to_string();
            self.photos.clear();
            self.selected_index = 0;
            self.scroll_offset = 0;
            changed = true;
        }
        if state.results_revision() != self.seen_revision {
            self.seen_revision = state.results_revision();
            if !state.results().is_empty() {
                self.photos.extend_from_slice(state.results());
                changed = true;
            }
        }
        changed
    }

    /// All rows, oldest page first.
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    // ===== Selection =====

    /// Index of the selected row.
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// The selected photo, if the list is not empty.
    pub fn selected_photo(&self) -> Option<&Photo> {
        self.photos.get(self.selected_index)
    }

    /// Move up one row.
    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Move down one row, stopping at the last.
    pub fn select_next(&mut self) {
        if !self.photos.is_empty() {
            self.selected_index = (self.selected_index + 1).min(self.photos.len() - 1);
        }
    }

    /// Select the first row.
    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    /// Select the last row.
    pub fn select_last(&mut self) {
        self.selected_index = self.photos.len().saturating_sub(1);
    }

    /// Move down a screenful.
    pub fn page_down(&mut self, visible_rows: usize) {
        if !self.photos.is_empty() {
            let step = visible_rows.max(1);
            self.selected_index = (self.selected_index + step).min(self.photos.len() - 1);
        }
    }

    /// Move up a screenful.
    pub fn page_up(&mut self, visible_rows: usize) {
        self.selected_index = self.selected_index.saturating_sub(visible_rows.max(1));
    }

    /// Select the row at `offset` within the visible window, if it exists.
    pub fn select_visible_row(&mut self, offset: usize) -> bool {
        let index = self.scroll_offset + offset;
        if index < self.photos.len() {
            self.selected_index = index;
            true
        } else {
            false
        }
    }

    // ===== Viewport =====

    /// Index of the first visible row.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Move the scroll offset so the selection is on screen.
    pub fn adjust_scroll(&mut self, visible_rows: usize) {
        if visible_rows == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_rows {
            self.scroll_offset = self.selected_index - visible_rows + 1;
        }
    }

    /// Indices of the rows currently on screen.
    pub fn visible_range(&self, visible_rows: usize) -> Range<usize> {
        let start = self.scroll_offset.min(self.photos.len());
        let end = (self.scroll_offset + visible_rows).min(self.photos.len());
        start..end
    }

    /// Viewport notification for the infinite-scroll trigger.
    pub fn page_info(&self, visible_rows: usize) -> PageInfo {
        let range = self.visible_range(visible_rows);
        if range.is_empty() {
            PageInfo::initial()
        } else {
            PageInfo::at(range.end - 1)
        }
    }
}

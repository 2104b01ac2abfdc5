//! Screen layout.
//!
//! Pure geometry: search bar on top, result list in the middle, status bar
//! at the bottom, and centered rects for the overlays. The event loop uses
//! the same functions for mouse hit testing that `draw` uses for rendering.

use super::constants::{
    RESULTS_BORDER_LINES, SEARCH_BAR_HEIGHT, STATUS_BAR_HEIGHT,
};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

/// Areas of the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    /// Search input box.
    pub search: Rect,
    /// Result list, including its border.
    pub results: Rect,
    /// Status line.
    pub status: Rect,
}

impl AppLayout {
    /// Split the frame `area`.
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SEARCH_BAR_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .split(area);
        Self {
            search: chunks[0],
            results: chunks[1],
            status: chunks[2],
        }
    }

    /// Rows available for results inside the list border.
    pub fn result_rows(&self) -> usize {
        self.results.height.saturating_sub(RESULTS_BORDER_LINES) as usize
    }

    /// Which visible result row (0-based) a screen position falls on.
    pub fn result_row_at(&self, column: u16, row: u16) -> Option<usize> {
        let inner = inner(self.results);
        inner
            .contains(Position::new(column, row))
            .then(|| (row - inner.y) as usize)
    }
}

/// `area` shrunk by a one-cell border.
pub fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Rect of `width` x `height` cells centered in `area`, clamped to fit.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let popup_width = width.min(area.width);
    let popup_height = height.min(area.height);
    Rect {
        x: area.x + (area.width - popup_width) / 2,
        y: area.y + (area.height - popup_height) / 2,
        width: popup_width,
        height: popup_height,
    }
}

/// Rect covering a percentage of `area`, centered.
pub fn centered_percent(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = (area.width as u32 * percent_x.min(100) as u32 / 100) as u16;
    let height = (area.height as u32 * percent_y.min(100) as u32 / 100) as u16;
    centered_fixed(width, height, area)
}

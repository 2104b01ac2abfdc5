//! Result list widget.

use super::styles::Palette;
use crate::model::Photo;
use crate::state::{ExecutionState, PhotoList, PhotoState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Renders the accumulated photos, one per row, with the selection highlighted.
pub struct ResultList<'a> {
    photos: &'a PhotoList,
    state: &'a PhotoState,
    focused: bool,
    palette: &'a Palette,
}

impl<'a> ResultList<'a> {
    /// Creates a new widget.
    pub fn new(photos: &'a PhotoList, state: &'a PhotoState, palette: &'a Palette) -> Self {
        Self {
            photos,
            state,
            focused: false,
            palette,
        }
    }

    /// Sets whether the widget is focused.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn title(&self) -> String {
        if self.state.search_string().is_empty() {
            return " Results ".to_string();
        }
        let end = if self.state.end_of_input_reached() {
            ", end"
        } else {
            ""
        };
        format!(
            " Results for \"{}\" ({} of {}{}) ",
            self.state.search_string(),
            self.photos.len(),
            self.state.total(),
            end
        )
    }

    /// Text shown when there are no rows.
    fn placeholder(&self) -> Line<'static> {
        let (text, style) = match self.state.fetch_status() {
            _ if self.state.search_string().is_empty() => {
                ("Type in the search bar to find photos", self.palette.muted)
            }
            ExecutionState::Loading => ("Loading…", self.palette.loading),
            ExecutionState::Failure => ("Search failed, see status bar", self.palette.error),
            ExecutionState::Success => ("No photos found", self.palette.muted),
            ExecutionState::Uninitialized => ("", self.palette.muted),
        };
        Line::from(Span::styled(text, style))
    }
}

/// One row: index, caption, photographer and size.
pub fn photo_row(photo: &Photo, width: usize) -> String {
    let row = format!(
        "{:>5}  {}  by {}  ({})",
        photo.ref_index,
        photo.caption(),
        photo.photographer,
        photo.dimensions_label()
    );
    truncate_to_width(&row, width)
}

/// Cut `text` to at most `width` display columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

impl Widget for ResultList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title())
            .border_style(self.palette.border(self.focused));
        let inner = block.inner(area);
        let rows = inner.height as usize;
        let width = inner.width as usize;

        let lines: Vec<Line> = if self.photos.is_empty() {
            vec![self.placeholder()]
        } else {
            self.photos
                .visible_range(rows)
                .map(|index| {
                    let photo = &self.photos.photos()[index];
                    let style = if index == self.photos.selected_index() {
                        self.palette.selected_row
                    } else {
                        Style::default()
                    };
                    Line::from(Span::styled(photo_row(photo, width), style))
                })
                .collect()
        };

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

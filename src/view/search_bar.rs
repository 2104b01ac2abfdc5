//! Search bar widget.

use super::styles::Palette;
use crate::state::TextField;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const TITLE: &str = " Search ";

/// Renders a [`TextField`] in a bordered box, with a block cursor when focused.
pub struct SearchBar<'a> {
    field: &'a TextField,
    focused: bool,
    palette: &'a Palette,
}

impl<'a> SearchBar<'a> {
    /// Creates a new widget.
    pub fn new(field: &'a TextField, palette: &'a Palette) -> Self {
        Self {
            field,
            focused: false,
            palette,
        }
    }

    /// Sets whether the widget is focused.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

/// Field contents split around the cursor: before, under, after.
pub(crate) fn cursor_spans<'a>(field: &TextField, palette: &Palette) -> Vec<Span<'a>> {
    let before: String = field.value().chars().take(field.cursor()).collect();
    let mut rest = field.value().chars().skip(field.cursor());
    let under = rest.next().map(String::from).unwrap_or_else(|| " ".to_string());
    let after: String = rest.collect();
    vec![
        Span::raw(before),
        Span::styled(under, palette.cursor),
        Span::raw(after),
    ]
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = if self.focused {
            Line::from(cursor_spans(self.field, self.palette))
        } else if self.field.is_empty() {
            Line::from(Span::styled("Press / to search", self.palette.muted))
        } else {
            Line::from(self.field.value().to_string())
        };

        Paragraph::new(line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(TITLE)
                    .border_style(self.palette.border(self.focused)),
            )
            .render(area, buf);
    }
}

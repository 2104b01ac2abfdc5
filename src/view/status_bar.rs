//! One-line status bar.

use super::styles::Palette;
use crate::state::{ExecutionState, PhotoState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const KEY_HINTS: &str = "/ search  Tab focus  Enter details  Ctrl+K api key  ? help  q quit";

/// Fetch status on the left, key hints after it.
pub struct StatusBar<'a> {
    state: &'a PhotoState,
    message: Option<&'a str>,
    palette: &'a Palette,
}

impl<'a> StatusBar<'a> {
    /// Creates a new widget.
    pub fn new(state: &'a PhotoState, palette: &'a Palette) -> Self {
        Self {
            state,
            message: None,
            palette,
        }
    }

    /// Message shown instead of the fetch status.
    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

/// Human-readable fetch status.
pub fn status_text(state: &PhotoState) -> String {
    match state.fetch_status() {
        ExecutionState::Uninitialized => "Ready".to_string(),
        ExecutionState::Loading => format!("Loading page {}…", state.current_page()),
        ExecutionState::Success if state.end_of_input_reached() => {
            format!("Page {}, no more results", state.current_page())
        }
        ExecutionState::Success => format!("Page {}", state.current_page()),
        ExecutionState::Failure => match state.last_error() {
            Some(error) => format!("Error: {}", error),
            None => "Error".to_string(),
        },
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let status = match self.message {
            Some(message) => Span::styled(message.to_string(), self.palette.error),
            None => Span::styled(
                status_text(self.state),
                self.palette.status(self.state.fetch_status()),
            ),
        };
        let line = Line::from(vec![
            Span::raw(" "),
            status,
            Span::raw("  │  "),
            Span::styled(KEY_HINTS, self.palette.muted),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

//! API key prompt contents.

use super::constants::{KEY_MODAL_HEIGHT, KEY_MODAL_WIDTH};
use super::layout::centered_fixed;
use super::modal::{render_modal_frame, render_modal_hint};
use super::search_bar::cursor_spans;
use super::styles::Palette;
use crate::state::{ExecutionState, TextField};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Draw the API key prompt centered on screen. Returns the modal rect.
pub fn render_key_modal(
    frame: &mut Frame,
    field: &TextField,
    test_status: ExecutionState,
    palette: &Palette,
) -> Rect {
    let area = centered_fixed(KEY_MODAL_WIDTH, KEY_MODAL_HEIGHT, frame.area());
    let inner = render_modal_frame(frame, area, " Pexels API key ", palette);

    let lines = vec![
        Line::from("Paste your API key from pexels.com/api."),
        Line::from(""),
        Line::from(cursor_spans(field, palette)),
        Line::from(""),
        Line::from(Span::styled(
            test_status_text(test_status),
            palette.status(test_status),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    render_modal_hint(frame, area, "Enter: save and test  Esc: close", palette);
    area
}

/// Outcome of the last key test, as shown under the input.
pub fn test_status_text(status: ExecutionState) -> &'static str {
    match status {
        ExecutionState::Uninitialized => "Not tested yet",
        ExecutionState::Loading => "Testing key…",
        ExecutionState::Success => "Key works",
        ExecutionState::Failure => "Key was rejected",
    }
}

//! Modal frame shared by the API key prompt and the detail view.
//!
//! Draws a cleared, bordered box and returns its rect. Clicks inside that
//! rect are content clicks; anything outside is the background.

use super::styles::Palette;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

/// Draw an empty modal box at `area` and return the area for its content.
pub fn render_modal_frame(frame: &mut Frame, area: Rect, title: &str, palette: &Palette) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(
            Line::from(Span::styled(title.to_string(), palette.section_header))
                .alignment(Alignment::Center),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.focused_border);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Dim one-line hint on the bottom border of a modal.
pub fn render_modal_hint(frame: &mut Frame, area: Rect, hint: &str, palette: &Palette) {
    if area.height == 0 {
        return;
    }
    let hint_area = Rect {
        x: area.x,
        y: area.y + area.height - 1,
        width: area.width,
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {} ", hint), palette.muted))
            .alignment(Alignment::Center),
        hint_area,
    );
}

//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered overlay with all shortcuts grouped by category.
//! Triggered by '?', dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::layout::centered_percent;
use super::modal::render_modal_hint;
use super::styles::Palette;
use ratatui::{
    layout::Alignment,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, palette: &Palette) {
    let popup_area = centered_percent(
        HELP_POPUP_WIDTH_PERCENT,
        HELP_POPUP_HEIGHT_PERCENT,
        frame.area(),
    );

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(palette))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(palette.focused_border),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
    render_modal_hint(frame, popup_area, "Press Esc or ? to close", palette);
}

fn shortcut<'a>(keys: &'static str, description: &'static str, key_style: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<18}", keys), key_style),
        Span::raw(description),
    ])
}

/// Shortcut lines grouped by category.
fn build_help_content<'a>(palette: &Palette) -> Vec<Line<'a>> {
    let header = palette.section_header;
    let key = palette.key_hint;

    vec![
        Line::from(Span::styled("Search", header)),
        shortcut("/", "Focus the search field", key),
        shortcut("type", "Search after a short pause", key),
        shortcut("Ctrl+u", "Clear the search field", key),
        shortcut("Enter/↓", "Move to the results", key),
        Line::from(""),
        Line::from(Span::styled("Results", header)),
        shortcut("j/↓  k/↑", "Next / previous photo", key),
        shortcut("Ctrl+d/PgDn", "Page down", key),
        shortcut("Ctrl+u/PgUp", "Page up", key),
        shortcut("g/Home  G/End", "First / last loaded photo", key),
        shortcut("Enter/click", "Show photo details", key),
        Line::from(Span::styled(
            "  More photos load when you reach the bottom.",
            palette.muted,
        )),
        Line::from(""),
        Line::from(Span::styled("Application", header)),
        shortcut("Tab", "Switch between search and results", key),
        shortcut("Ctrl+k", "Enter or test the API key", key),
        shortcut("Esc", "Close the open dialog", key),
        shortcut("?", "Toggle this help", key),
        shortcut("q/Ctrl+c", "Quit", key),
    ]
}

// ===== Tests =====

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;

//! Shared styles.
//!
//! Colors are disabled when `NO_COLOR` is set, so every widget takes its
//! styles from a [`Palette`] rather than building them inline.

use crate::state::ExecutionState;
use ratatui::style::{Color, Modifier, Style};

/// Whether colors should be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Colors are on unless `NO_COLOR` is set (to any value).
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Explicit setting, ignoring the environment.
    pub fn enabled(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether colors are on.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

/// Styles used across widgets.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Border of the focused pane.
    pub focused_border: Style,
    /// Border of other panes.
    pub unfocused_border: Style,
    /// Highlighted result row.
    pub selected_row: Style,
    /// Headings in overlays.
    pub section_header: Style,
    /// Key names in hints.
    pub key_hint: Style,
    /// Secondary text.
    pub muted: Style,
    /// Failures.
    pub error: Style,
    /// Successes.
    pub success: Style,
    /// Requests in flight.
    pub loading: Style,
    /// Text cursor block.
    pub cursor: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(ColorConfig::from_env())
    }
}

impl Palette {
    /// Palette for `config`. All styles are plain when colors are off.
    pub fn new(config: ColorConfig) -> Self {
        if !config.colors_enabled() {
            let plain = Style::default();
            return Self {
                focused_border: plain.add_modifier(Modifier::BOLD),
                unfocused_border: plain,
                selected_row: plain.add_modifier(Modifier::REVERSED),
                section_header: plain.add_modifier(Modifier::BOLD),
                key_hint: plain.add_modifier(Modifier::BOLD),
                muted: plain,
                error: plain.add_modifier(Modifier::BOLD),
                success: plain,
                loading: plain,
                cursor: plain.add_modifier(Modifier::REVERSED),
            };
        }
        Self {
            focused_border: Style::default().fg(Color::Cyan),
            unfocused_border: Style::default().fg(Color::Gray),
            selected_row: Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            section_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            key_hint: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            success: Style::default().fg(Color::Green),
            loading: Style::default().fg(Color::Yellow),
            cursor: Style::default()
                .bg(Color::White)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Border style for a pane.
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.focused_border
        } else {
            self.unfocused_border
        }
    }

    /// Style for a status indicator.
    pub fn status(&self, status: ExecutionState) -> Style {
        match status {
            ExecutionState::Uninitialized => self.muted,
            ExecutionState::Loading => self.loading,
            ExecutionState::Success => self.success,
            ExecutionState::Failure => self.error,
        }
    }
}

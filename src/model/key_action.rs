//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Result list navigation
    /// Move the selection up one row. Default: k/↑
    ScrollUp,
    /// Move the selection down one row. Default: j/↓
    ScrollDown,
    /// Move the selection up one page. Default: Ctrl+u/Page Up
    PageUp,
    /// Move the selection down one page. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the first result. Default: g/Home
    ScrollToTop,
    /// Jump to the last loaded result. Default: G/End
    ScrollToBottom,

    // Focus
    /// Put keyboard focus in the search field. Default: /
    FocusSearch,
    /// Toggle focus between search field and result list. Default: Tab
    CycleFocus,

    // Overlays
    /// Open the detail view for the selected photo. Default: Enter
    ShowDetail,
    /// Open the API key prompt. Default: Ctrl+k
    OpenKeyModal,
    /// Toggle the keyboard shortcut overlay. Default: ?
    Help,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

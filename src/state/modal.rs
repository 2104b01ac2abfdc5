//! Modal visibility.
//!
//! One state machine shared by the API-key prompt and the photo detail
//! view. The modal decides only whether it is shown; what it shows is the
//! caller's `content`.
//!
//! ```text
//! Hidden --SetVisible(true)--> Visible
//! Visible --SetVisible(false) | Click(Background) | KeyUp(Esc)--> Hidden
//! ```
//!
//! Anything else leaves the state unchanged.

use crossterm::event::KeyCode;

/// Whether a modal is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalVisibility {
    /// Not drawn.
    #[default]
    Hidden,
    /// Drawn on top and receiving input.
    Visible,
}

/// Where a click landed relative to the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The scrim around the content.
    Background,
    /// Inside the content box.
    Content,
}

/// Input that may change a modal's visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    /// Explicit show or hide.
    SetVisible(bool),
    /// Mouse click.
    Click(ClickTarget),
    /// Key released (or pressed, where releases are not reported).
    KeyUp(KeyCode),
}

impl ModalVisibility {
    /// Next state after `event`.
    pub fn on_event(self, event: ModalEvent) -> Self {
        match (self, event) {
            (_, ModalEvent::SetVisible(true)) => ModalVisibility::Visible,
            (_, ModalEvent::SetVisible(false)) => ModalVisibility::Hidden,
            (ModalVisibility::Visible, ModalEvent::Click(ClickTarget::Background)) => {
                ModalVisibility::Hidden
            }
            (ModalVisibility::Visible, ModalEvent::KeyUp(KeyCode::Esc)) => ModalVisibility::Hidden,
            (state, _) => state,
        }
    }
}

/// A modal holding opaque `content`.
#[derive(Debug, Clone, Default)]
pub struct Modal<C> {
    visibility: ModalVisibility,
    /// What the modal displays.
    pub content: C,
}

impl<C> Modal<C> {
    /// Hidden modal holding `content`.
    pub fn new(content: C) -> Self {
        Self {
            visibility: ModalVisibility::Hidden,
            content,
        }
    }

    /// Current visibility.
    pub fn visibility(&self) -> ModalVisibility {
        self.visibility
    }

    /// Whether the modal is drawn.
    pub fn is_visible(&self) -> bool {
        self.visibility == ModalVisibility::Visible
    }

    /// Feed an event; returns `true` if visibility changed.
    pub fn handle(&mut self, event: ModalEvent) -> bool {
        let next = self.visibility.on_event(event);
        let changed = next != self.visibility;
        self.visibility = next;
        changed
    }

    /// Show the modal.
    pub fn open(&mut self) {
        self.handle(ModalEvent::SetVisible(true));
    }

    /// Hide the modal.
    pub fn close(&mut self) {
        self.handle(ModalEvent::SetVisible(false));
    }
}

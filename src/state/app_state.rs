//! Application UI state.
//!
//! Everything the screen shows apart from the search state itself: focus,
//! the search field, the accumulated result list and the two modals.
//! Transitions are plain methods with no side effects.

use crate::model::Photo;
use crate::state::modal::{Modal, ModalEvent};
use crate::state::photo_list::PhotoList;
use crate::state::text_field::TextField;
use crossterm::event::KeyCode;

/// Which pane receives keyboard input when no modal is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPane {
    /// The search input.
    #[default]
    Search,
    /// The result list.
    Results,
}

impl FocusPane {
    /// The other pane.
    pub fn next(self) -> Self {
        match self {
            FocusPane::Search => FocusPane::Results,
            FocusPane::Results => FocusPane::Search,
        }
    }
}

/// The modal on top, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveModal {
    /// API-key prompt.
    ApiKey,
    /// Photo detail view.
    Detail,
}

/// Root UI state. Pure data.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Pane with keyboard focus.
    pub focus: FocusPane,
    /// Raw search input, before debouncing.
    pub search_field: TextField,
    /// Accumulated results of the current search.
    pub photos: PhotoList,
    /// API-key prompt. Content is the key being edited.
    pub key_modal: Modal<TextField>,
    /// Photo detail view. Content is the photo shown.
    pub detail_modal: Modal<Option<Photo>>,
    /// Help overlay shown.
    pub help_visible: bool,
    /// One-line message for the status bar (e.g. a failed key save).
    pub status_message: Option<String>,
}

impl AppState {
    /// Initial state: search focused, nothing open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move focus to the other pane.
    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// The modal that receives input. The key prompt sits above the detail view.
    pub fn active_modal(&self) -> Option<ActiveModal> {
        if self.key_modal.is_visible() {
            Some(ActiveModal::ApiKey)
        } else if self.detail_modal.is_visible() {
            Some(ActiveModal::Detail)
        } else {
            None
        }
    }

    /// Show the key prompt, pre-filled with the current key.
    pub fn open_key_modal(&mut self, current_key: Option<String>) {
        self.key_modal.content = TextField::with_value(current_key.unwrap_or_default());
        self.key_modal.open();
    }

    /// Show the detail view for the selected photo.
    ///
    /// Returns `false` if nothing is selected.
    pub fn open_detail(&mut self) -> bool {
        match self.photos.selected_photo() {
            Some(photo) => {
                self.detail_modal.content = Some(photo.clone());
                self.detail_modal.open();
                true
            }
            None => false,
        }
    }

    /// Feed a key release to every modal. Each one closes itself on `Esc`.
    pub fn modal_key_up(&mut self, code: KeyCode) -> bool {
        let key_changed = self.key_modal.handle(ModalEvent::KeyUp(code));
        let detail_changed = self.detail_modal.handle(ModalEvent::KeyUp(code));
        key_changed || detail_changed
    }

    /// Feed a modal event to the modal on top.
    pub fn active_modal_event(&mut self, event: ModalEvent) -> bool {
        match self.active_modal() {
            Some(ActiveModal::ApiKey) => self.key_modal.handle(event),
            Some(ActiveModal::Detail) => self.detail_modal.handle(event),
            None => false,
        }
    }
}

//! UI state machine (pure).
//!
//! All state transitions are plain functions testable without a terminal.
//! The only impure piece is [`Store`], which runs requests for the reducer.

pub mod app_state;
pub mod debounce;
pub mod infinite_scroll;
pub mod modal;
pub mod photo_list;
pub mod photo_state;
pub mod store;
pub mod text_field;

pub use app_state::{ActiveModal, AppState, FocusPane};
pub use debounce::SearchInputDebouncer;
pub use infinite_scroll::{fetch_more, should_fetch_more, PageInfo};
pub use modal::{ClickTarget, Modal, ModalEvent, ModalVisibility};
pub use photo_list::PhotoList;
pub use photo_state::{Action, Completion, Effect, ExecutionState, PageRequest, PhotoState};
pub use store::{RequestExecutor, Store, ThreadExecutor};
pub use text_field::TextField;

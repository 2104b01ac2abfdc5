//! Domain model types.
//!
//! Wire types for the photo search API, the error taxonomy, and
//! keyboard-level user intents.

pub mod error;
pub mod key_action;
pub mod photo;

pub use error::{AppError, FetchError, KeyStoreError, LastError};
pub use key_action::KeyAction;
pub use photo::{PageResponse, Photo, PhotoSrc};

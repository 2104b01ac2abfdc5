//! Infinite-scroll trigger.
//!
//! Decides from a viewport notification whether the next page should be
//! requested. The only guard against double-firing is `fetch_status`: a
//! notification while a page is loading never fetches.

use crate::state::photo_state::{Action, ExecutionState, PhotoState};

/// Viewport notification: index of the last visible row.
///
/// `end_index == None` is the initialization notification sent before the
/// list has a real scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageInfo {
    /// Last visible row, or `None` before the first layout.
    pub end_index: Option<usize>,
}

impl PageInfo {
    /// The initialization notification.
    pub fn initial() -> Self {
        Self { end_index: None }
    }

    /// Notification for a real scroll position.
    pub fn at(end_index: usize) -> Self {
        Self {
            end_index: Some(end_index),
        }
    }

    /// From a raw index where `-1` (or any negative value) is the
    /// initialization sentinel.
    pub fn from_raw(end_index: i64) -> Self {
        Self {
            end_index: usize::try_from(end_index).ok(),
        }
    }
}

/// Whether `info` should trigger another page for a list of
/// `accumulated_len` rows.
pub fn should_fetch_more(state: &PhotoState, accumulated_len: usize, info: PageInfo) -> bool {
    if state.fetch_status() == ExecutionState::Loading || state.end_of_input_reached() {
        return false;
    }
    match (info.end_index, accumulated_len.checked_sub(1)) {
        (Some(end_index), Some(last)) => end_index == last,
        _ => false,
    }
}

/// The action to dispatch for `info`, if any.
pub fn fetch_more(state: &PhotoState, accumulated_len: usize, info: PageInfo) -> Option<Action> {
    should_fetch_more(state, accumulated_len, info).then_some(Action::FetchPhotos)
}

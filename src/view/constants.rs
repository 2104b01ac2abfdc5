//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for layout-related numeric values.

/// Height of the search bar in lines (border + input line).
pub const SEARCH_BAR_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Border lines around the result list.
pub const RESULTS_BORDER_LINES: u16 = 2;

/// Width of the API key prompt in columns.
pub const KEY_MODAL_WIDTH: u16 = 60;

/// Height of the API key prompt in lines.
pub const KEY_MODAL_HEIGHT: u16 = 9;

/// Width percentage of the photo detail view.
pub const DETAIL_POPUP_WIDTH_PERCENT: u16 = 80;

/// Height percentage of the photo detail view.
pub const DETAIL_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

//! pixsearch
//!
//! TUI application for searching and browsing Pexels photos.
//!
//! The search lifecycle (debounce, paging, infinite scroll, request status)
//! lives in [`state`] as plain data plus reducers. [`view`] owns the
//! terminal and the event loop, and [`api`] performs the HTTP requests.

pub mod api;
pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;

//! Search and pagination state (pure reducer).
//!
//! `PhotoState` is the single mutable record behind the result list. It is
//! changed only through [`PhotoState::reduce`] (synchronous half of an
//! action) and [`PhotoState::complete`] (a finished request arriving later
//! as its own event). Neither touches the network: `reduce` returns an
//! [`Effect`] describing the request to run, and whoever runs it feeds the
//! outcome back as a [`Completion`].
//!
//! # State Machine
//!
//! `fetch_status`: Uninitialized → Loading → Success | Failure, back to
//! Uninitialized on every `SetSearchString`. `test_status` follows the same
//! shape independently.

use crate::api::PageQuery;
use crate::model::{FetchError, LastError, PageResponse, Photo};
use tracing::debug;

/// Lifecycle of an asynchronous operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionState {
    /// Nothing requested since the last reset.
    #[default]
    Uninitialized,
    /// A request is in flight.
    Loading,
    /// The last request succeeded.
    Success,
    /// The last request failed.
    Failure,
}

/// Actions accepted by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Start a new search. The string is expected to be trimmed and non-empty.
    SetSearchString(String),
    /// Request the page after `current_page`.
    FetchPhotos,
    /// Verify an API key with a probe query.
    TestCredential(String),
}

/// A page request issued by `FetchPhotos`.
///
/// Carries the values captured when it was dispatched so the completion is
/// annotated against the page it was issued for, not the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Search string at dispatch time.
    pub query: String,
    /// 1-based page number.
    pub page: u32,
    /// Page size at dispatch time.
    pub per_page: u32,
    /// Search generation the request belongs to.
    pub generation: u64,
}

impl PageRequest {
    /// The HTTP query parameters for this request.
    pub fn to_query(&self) -> PageQuery {
        PageQuery {
            query: self.query.clone(),
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Work the reducer asks its caller to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one page of the current search.
    LoadPage(PageRequest),
    /// Run the key-check query with this API key.
    ProbeCredential(String),
}

/// Outcome of an [`Effect`], delivered back to the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// A page request finished.
    Page {
        /// The request as it was issued.
        request: PageRequest,
        /// The page, or why there is none.
        result: Result<PageResponse, FetchError>,
    },
    /// A key check finished.
    Probe {
        /// The probe page, or why the key was refused.
        result: Result<PageResponse, FetchError>,
    },
}

/// Search state. Pure data, no side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoState {
    search_string: String,
    /// Latest page only; the result list accumulates pages.
    results: Vec<Photo>,
    current_page: u32,
    items_per_page: u32,
    total: u32,
    fetch_status: ExecutionState,
    test_status: ExecutionState,
    end_of_input_reached: bool,
    last_error: Option<LastError>,
    /// Bumped on every `SetSearchString`; tags outgoing page requests.
    generation: u64,
    /// Bumped every time `results` is replaced.
    results_revision: u64,
    discard_stale_responses: bool,
}

impl PhotoState {
    /// Fresh state with the given page size.
    pub fn new(items_per_page: u32) -> Self {
        Self {
            search_string: String::new(),
            results: Vec::new(),
            current_page: 0,
            items_per_page,
            total: 0,
            fetch_status: ExecutionState::Uninitialized,
            test_status: ExecutionState::Uninitialized,
            end_of_input_reached: false,
            last_error: None,
            generation: 0,
            results_revision: 0,
            discard_stale_responses: true,
        }
    }

    /// Choose whether page responses from an older search are dropped.
    ///
    /// With `false`, a late response for an abandoned search is applied as
    /// if it belonged to the current one.
    pub fn with_discard_stale_responses(mut self, discard: bool) -> Self {
        self.discard_stale_responses = discard;
        self
    }

    // ===== Accessors =====

    /// Committed search, empty before the first one.
    pub fn search_string(&self) -> &str {
        &self.search_string
    }

    /// The most recently delivered page.
    pub fn results(&self) -> &[Photo] {
        &self.results
    }

    /// Last page requested, 0 before the first fetch.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Page size.
    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    /// `total_results` from the last successful page.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Status of the page fetches.
    pub fn fetch_status(&self) -> ExecutionState {
        self.fetch_status
    }

    /// Status of the last key check.
    pub fn test_status(&self) -> ExecutionState {
        self.test_status
    }

    /// Whether the API reported no further pages.
    pub fn end_of_input_reached(&self) -> bool {
        self.end_of_input_reached
    }

    /// Why the last fetch failed. `Some` only while `fetch_status` is `Failure`.
    pub fn last_error(&self) -> Option<&LastError> {
        self.last_error.as_ref()
    }

    /// Counter bumped by every new search.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Counter bumped every time `results` is replaced.
    pub fn results_revision(&self) -> u64 {
        self.results_revision
    }

    // ===== Transitions =====

    /// Apply the synchronous part of an action.
    ///
    /// Returns the request the caller must run, if any.
    pub fn reduce(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::SetSearchString(search_string) => {
                self.set_search_string(search_string);
                None
            }
            Action::FetchPhotos => Some(Effect::LoadPage(self.begin_fetch())),
            Action::TestCredential(api_key) => {
                self.test_status = ExecutionState::Loading;
                Some(Effect::ProbeCredential(api_key))
            }
        }
    }

    /// Apply a finished request.
    ///
    /// Returns `false` when the completion was discarded as stale.
    pub fn complete(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::Page { request, result } => {
                if self.discard_stale_responses && request.generation != self.generation {
                    debug!(
                        query = %request.query,
                        page = request.page,
                        "Discarding page response for an earlier search"
                    );
                    return false;
                }
                match result {
                    Ok(page) => self.apply_page(&request, page),
                    Err(err) => self.apply_failure(&err),
                }
                true
            }
            Completion::Probe { result } => {
                match result {
                    Ok(page) => {
                        self.test_status = ExecutionState::Success;
                        // Shares the flag with page fetches.
                        self.end_of_input_reached = !page.has_next_page();
                    }
                    Err(_) => {
                        self.test_status = ExecutionState::Failure;
                        self.end_of_input_reached = false;
                    }
                }
                true
            }
        }
    }

    fn set_search_string(&mut self, search_string: String) {
        self.search_string = search_string;
        self.current_page = 0;
        self.replace_results(Vec::new());
        self.total = 0;
        self.fetch_status = ExecutionState::Uninitialized;
        self.end_of_input_reached = false;
        self.last_error = None;
        self.generation += 1;
    }

    fn begin_fetch(&mut self) -> PageRequest {
        let page = self.current_page + 1;
        self.current_page = page;
        self.fetch_status = ExecutionState::Loading;
        self.last_error = None;
        PageRequest {
            query: self.search_string.clone(),
            page,
            per_page: self.items_per_page,
            generation: self.generation,
        }
    }

    fn apply_page(&mut self, request: &PageRequest, page: PageResponse) {
        let end_of_input = !page.has_next_page();
        let total = page.total_results;
        let offset = ref_index_offset(request.page, request.per_page);

        let mut photos = page.photos;
        for (position, photo) in photos.iter_mut().enumerate() {
            photo.ref_index = offset + position + 1;
        }

        self.replace_results(photos);
        self.total = total;
        self.fetch_status = ExecutionState::Success;
        self.end_of_input_reached = end_of_input;
        self.last_error = None;
    }

    fn apply_failure(&mut self, err: &FetchError) {
        self.replace_results(Vec::new());
        self.total = 0;
        self.fetch_status = ExecutionState::Failure;
        self.end_of_input_reached = false;
        self.last_error = Some(err.to_last_error());
    }

    fn replace_results(&mut self, photos: Vec<Photo>) {
        self.results = photos;
        self.results_revision += 1;
    }
}

/// Number of photos on the pages before `page` (1-based).
fn ref_index_offset(page: u32, per_page: u32) -> usize {
    (page.saturating_sub(1) as usize) * per_page as usize
}

#[cfg(test)]
#[path = "photo_state_tests.rs"]
mod tests;

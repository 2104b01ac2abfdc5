//! Acceptance Test Harness for TUI testing
//!
//! Provides a high-level API for acceptance testing user stories by wrapping
//! TuiApp<TestBackend> with convenient methods for simulating user
//! interactions. Time is virtual: the harness owns the clock and every
//! interaction happens at `now`, so debounce behavior is deterministic.
//!
//! Also home to the fixtures shared by unit tests (sample photos and pages,
//! a scripted fetcher, executors that run requests inline or on demand).

use crate::api::{KeyStore, MemoryKeyStore, PageQuery, PhotoFetcher};
use crate::config::keybindings::KeyBindings;
use crate::model::{FetchError, PageResponse, Photo, PhotoSrc};
use crate::state::store::{Job, RequestExecutor};
use crate::state::{AppState, FocusPane, PhotoState, SearchInputDebouncer, Store};
use crate::view::{TuiApp, TuiError};
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Convert a ratatui buffer to a string representation.
///
/// Captures the visual output character by character, preserving layout.
/// Empty lines are removed.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

// ===== Fixtures =====

/// A photo with every field filled in.
pub fn sample_photo(id: u64) -> Photo {
    let base = format!("https://images.example.com/photos/{id}/pexels-photo-{id}.jpeg");
    Photo {
        ref_index: 0,
        id,
        width: 4000,
        height: 3000,
        url: format!("https://www.pexels.com/photo/{id}/"),
        photographer: format!("Photographer {id}"),
        photographer_url: format!("https://www.pexels.com/@p{id}"),
        photographer_id: id * 10,
        avg_color: Some("#7A6F5C".to_string()),
        src: PhotoSrc {
            original: base.clone(),
            large2x: format!("{base}?h=650&dpr=2"),
            large: format!("{base}?h=650"),
            medium: format!("{base}?h=350"),
            small: format!("{base}?h=130"),
            portrait: format!("{base}?fit=crop&h=1200&w=800"),
            landscape: format!("{base}?fit=crop&h=627&w=1200"),
            tiny: format!("{base}?fit=crop&h=200&w=280"),
        },
        liked: true,
        alt: Some(format!("Photo number {id}")),
    }
}

/// A page of `count` photos with consecutive ids starting at `first_id`.
pub fn sample_page(count: usize, first_id: u64, has_next: bool, total: u32) -> PageResponse {
    PageResponse {
        page: 1,
        per_page: count as u32,
        photos: (0..count as u64).map(|i| sample_photo(first_id + i)).collect(),
        total_results: total,
        next_page: has_next.then(|| "https://api.pexels.com/v1/search/?page=2".to_string()),
        prev_page: None,
    }
}

/// Fetcher answering from a queue, falling back to generated pages.
///
/// Generated pages are full, have ids `(page - 1) * per_page + 1 ..`, and
/// advertise a next page until `total_pages` is reached.
pub struct ScriptedFetcher {
    responses: Mutex<VecDeque<Result<PageResponse, FetchError>>>,
    calls: Mutex<Vec<(String, PageQuery)>>,
    total_pages: u32,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::with_total_pages(u32::MAX)
    }

    pub fn with_total_pages(total_pages: u32) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            total_pages,
        }
    }

    /// Answer the next request with `response`.
    pub fn push(&self, response: Result<PageResponse, FetchError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Every request so far: `(api_key, query)`.
    pub fn calls(&self) -> Vec<(String, PageQuery)> {
        self.calls.lock().unwrap().clone()
    }

    fn generated(&self, query: &PageQuery) -> PageResponse {
        let first_id = (query.page.saturating_sub(1) as u64) * query.per_page as u64 + 1;
        let total = query.per_page.saturating_mul(self.total_pages);
        let mut page = sample_page(
            query.per_page as usize,
            first_id,
            query.page < self.total_pages,
            total,
        );
        page.page = query.page;
        page
    }
}

impl PhotoFetcher for ScriptedFetcher {
    fn search(&self, api_key: &str, query: &PageQuery) -> Result<PageResponse, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((api_key.to_string(), query.clone()));
        let scripted = self.responses.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(self.generated(query)))
    }
}

/// Runs each job immediately on the calling thread.
pub struct InlineExecutor;

impl RequestExecutor for InlineExecutor {
    fn execute(&self, job: Job) -> std::io::Result<()> {
        job();
        Ok(())
    }
}

/// Holds jobs until the test runs them. Clones share the queue.
#[derive(Clone, Default)]
pub struct DeferredExecutor {
    jobs: Arc<Mutex<Vec<Job>>>,
}

impl DeferredExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every queued job. Returns how many ran.
    pub fn run_all(&self) -> usize {
        let jobs: Vec<Job> = std::mem::take(&mut *self.jobs.lock().unwrap());
        let count = jobs.len();
        for job in jobs {
            job();
        }
        count
    }

    /// Run the oldest queued job. Returns false if none was queued.
    pub fn run_next(&self) -> bool {
        let job = {
            let mut jobs = self.jobs.lock().unwrap();
            if jobs.is_empty() {
                return false;
            }
            jobs.remove(0)
        };
        job();
        true
    }

    pub fn queued(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }
}

impl RequestExecutor for DeferredExecutor {
    fn execute(&self, job: Job) -> std::io::Result<()> {
        self.jobs.lock().unwrap().push(job);
        Ok(())
    }
}

// ===== Harness =====

/// Default debounce period used by the harness.
pub const HARNESS_DEBOUNCE: Duration = Duration::from_millis(400);

/// Test harness for acceptance testing
///
/// Wraps TuiApp<TestBackend> to provide a clean API for simulating user
/// interactions in acceptance tests.
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    fetcher: Arc<ScriptedFetcher>,
    now: Instant,
    running: bool,
}

/// Builder for [`AcceptanceTestHarness`].
pub struct HarnessBuilder {
    width: u16,
    height: u16,
    per_page: u32,
    api_key: Option<String>,
    fetcher: ScriptedFetcher,
    executor: Option<Box<dyn RequestExecutor>>,
    discard_stale_responses: bool,
    initial_search: Option<String>,
}

impl HarnessBuilder {
    pub fn size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn without_api_key(mut self) -> Self {
        self.api_key = None;
        self
    }

    pub fn fetcher(mut self, fetcher: ScriptedFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn executor(mut self, executor: Box<dyn RequestExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn keep_stale_responses(mut self) -> Self {
        self.discard_stale_responses = false;
        self
    }

    pub fn initial_search(mut self, query: &str) -> Self {
        self.initial_search = Some(query.to_string());
        self
    }

    pub fn build(self) -> Result<AcceptanceTestHarness, TuiError> {
        let terminal = Terminal::new(TestBackend::new(self.width, self.height))?;
        let fetcher = Arc::new(self.fetcher);
        let key_store: Box<dyn KeyStore> = match self.api_key {
            Some(key) => Box::new(MemoryKeyStore::with_key(key)),
            None => Box::new(MemoryKeyStore::new()),
        };
        let state = PhotoState::new(self.per_page)
            .with_discard_stale_responses(self.discard_stale_responses);
        let store = Store::new(state, fetcher.clone(), key_store)
            .with_executor(self.executor.unwrap_or_else(|| Box::new(InlineExecutor)));

        let mut app = TuiApp::new_for_test(
            terminal,
            AppState::new(),
            store,
            SearchInputDebouncer::new(HARNESS_DEBOUNCE),
            KeyBindings::default(),
        );
        let now = Instant::now();
        app.start(self.initial_search.as_deref(), now);

        Ok(AcceptanceTestHarness {
            app,
            fetcher,
            now,
            running: true,
        })
    }
}

impl AcceptanceTestHarness {
    /// 80x24 terminal, 20 photos per page, API key "test-key", endless pages.
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder {
            width: 80,
            height: 24,
            per_page: 20,
            api_key: Some("test-key".to_string()),
            fetcher: ScriptedFetcher::new(),
            executor: None,
            discard_stale_responses: true,
            initial_search: None,
        }
    }

    /// Harness with all defaults.
    pub fn new() -> Result<Self, TuiError> {
        Self::builder().build()
    }

    // ===== Clock =====

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Move the clock forward and let timers and requests catch up.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
        self.app.tick_test(self.now);
    }

    /// Advance past the debounce period.
    pub fn settle(&mut self) {
        self.advance(HARNESS_DEBOUNCE);
        // A second tick applies requests issued by the first.
        self.advance(Duration::from_millis(1));
    }

    // ===== Input =====

    /// Press a key (no modifiers) at the current time.
    ///
    /// Returns true if the app wants to quit.
    pub fn press(&mut self, code: KeyCode) -> bool {
        self.press_with(code, KeyModifiers::NONE)
    }

    /// Press a key with modifiers at the current time.
    pub fn press_with(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.press_event(KeyEvent::new(code, modifiers))
    }

    /// Deliver a raw key event at the current time.
    pub fn press_event(&mut self, key: KeyEvent) -> bool {
        if !self.running {
            return true;
        }
        let quit = self.app.handle_key_test(key, self.now);
        self.app.tick_test(self.now);
        if quit {
            self.running = false;
        }
        quit
    }

    /// Type each character of `text` with no time passing between keys.
    pub fn type_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.press(KeyCode::Char(ch));
        }
    }

    /// Left click at a screen cell.
    pub fn click(&mut self, column: u16, row: u16) {
        self.app.handle_mouse_test(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
        self.app.tick_test(self.now);
    }

    /// Scroll the wheel down once.
    pub fn scroll_down(&mut self) {
        self.app.handle_mouse_test(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 10,
            row: 10,
            modifiers: KeyModifiers::NONE,
        });
        self.app.tick_test(self.now);
    }

    /// Replace the search field with `query` and wait for it to commit.
    pub fn search(&mut self, query: &str) {
        if self.state().focus != FocusPane::Search {
            self.press(KeyCode::Char('/'));
        }
        self.press_with(KeyCode::Char('u'), KeyModifiers::CONTROL);
        self.type_str(query);
        self.settle();
    }

    // ===== Inspection =====

    pub fn state(&self) -> &AppState {
        self.app.app_state()
    }

    pub fn photo_state(&self) -> &PhotoState {
        self.app.photo_state()
    }

    pub fn fetcher(&self) -> &ScriptedFetcher {
        &self.fetcher
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn poll_timeout(&self) -> Duration {
        self.app.poll_timeout_test(self.now)
    }

    /// Ids of every photo in the result list.
    pub fn listed_ids(&self) -> Vec<u64> {
        self.state().photos.photos().iter().map(|p| p.id).collect()
    }

    /// Render a frame and return the screen as text.
    pub fn render(&mut self) -> Result<String, TuiError> {
        self.app.render_test()?;
        Ok(buffer_to_string(self.app.terminal().backend().buffer()))
    }

    /// Rect of the top modal in the last rendered frame.
    pub fn modal_area(&self) -> Option<ratatui::layout::Rect> {
        self.app.last_modal_area()
    }
}

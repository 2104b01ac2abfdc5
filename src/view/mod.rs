//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod help;
mod key_form;
pub mod layout;
mod modal;
mod photo_detail;
mod results;
mod search_bar;
mod status_bar;
pub mod styles;

pub use help::render_help_overlay;
pub use key_form::render_key_modal;
pub use layout::AppLayout;
pub use photo_detail::render_detail_modal;
pub use results::ResultList;
pub use search_bar::SearchBar;
pub use status_bar::StatusBar;
pub use styles::{ColorConfig, Palette};

use crate::api::{FileKeyStore, KeyStore, MemoryKeyStore, PexelsClient};
use crate::config::keybindings::KeyBindings;
use crate::config::ResolvedConfig;
use crate::model::{AppError, KeyAction};
use crate::state::{
    fetch_more, Action, ActiveModal, AppState, ClickTarget, FocusPane, ModalEvent, PageInfo,
    PhotoState, SearchInputDebouncer, Store, TextField,
};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::layout::{Position, Rect};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Poll interval while nothing is pending.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Poll interval while a request is in flight.
const REQUEST_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Fallback frame when the backend cannot report its size.
const FALLBACK_AREA: Rect = Rect {
    x: 0,
    y: 0,
    width: 80,
    height: 24,
};

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    store: Store,
    debouncer: SearchInputDebouncer,
    key_bindings: KeyBindings,
    palette: Palette,
    /// Rect of the modal drawn on top in the last frame (for click hit testing)
    last_modal_area: Option<Rect>,
    /// Last viewport notification evaluated by the infinite-scroll trigger
    last_page_notification: Option<(PageInfo, usize)>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture
    pub fn new(
        store: Store,
        debouncer: SearchInputDebouncer,
        key_bindings: KeyBindings,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self::with_terminal(
            terminal,
            AppState::new(),
            store,
            debouncer,
            key_bindings,
        ))
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits (q or Ctrl+C). The poll timeout is the
    /// pending search commit deadline when there is one, so a debounced
    /// search fires on time without busy waiting.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let timeout = self.poll_timeout(Instant::now());
            let mut needs_draw = false;

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key_at(key, Instant::now()) {
                            return Ok(());
                        }
                        needs_draw = true;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        needs_draw = true;
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                        needs_draw = true;
                    }
                    _ => {}
                }
            }

            if self.tick(Instant::now()) || needs_draw {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn with_terminal(
        terminal: Terminal<B>,
        app_state: AppState,
        store: Store,
        debouncer: SearchInputDebouncer,
        key_bindings: KeyBindings,
    ) -> Self {
        Self {
            terminal,
            app_state,
            store,
            debouncer,
            key_bindings,
            palette: Palette::default(),
            last_modal_area: None,
            last_page_notification: None,
        }
    }

    /// Prepare the first frame.
    ///
    /// Opens the API key prompt when no key is stored, and commits
    /// `initial_search` straight away when given.
    pub fn start(&mut self, initial_search: Option<&str>, now: Instant) {
        if self.store.api_key().is_none() {
            info!("No API key stored, asking for one");
            self.app_state.open_key_modal(None);
        }

        if let Some(query) = initial_search {
            self.app_state.search_field = TextField::with_value(query);
            self.debouncer.on_input(query, now);
            if let Some(action) = self.debouncer.flush() {
                self.commit_search(action);
            }
            self.app_state.focus = FocusPane::Results;
        }

        self.tick(now);
    }

    /// How long the event loop may block waiting for input.
    fn poll_timeout(&self, now: Instant) -> Duration {
        let base = if self.store.has_pending() {
            REQUEST_POLL_INTERVAL
        } else {
            IDLE_POLL_INTERVAL
        };
        match self.debouncer.time_until_deadline(now) {
            Some(remaining) => base.min(remaining),
            None => base,
        }
    }

    /// Advance timers and apply finished requests.
    ///
    /// Returns true if anything visible changed.
    fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if let Some(action) = self.debouncer.poll(now) {
            self.commit_search(action);
            changed = true;
        }

        changed |= self.store.poll_completions();
        changed |= self.app_state.photos.sync(self.store.state());

        let rows = self.result_rows();
        self.app_state.photos.adjust_scroll(rows);
        changed |= self.check_infinite_scroll(rows);

        changed
    }

    /// Apply a committed search and request its first page.
    fn commit_search(&mut self, action: Action) {
        if let Action::SetSearchString(query) = &action {
            info!(query = %query, "Search committed");
        }
        self.store.dispatch(action);
        self.store.dispatch(Action::FetchPhotos);
        self.app_state.photos.sync(self.store.state());
    }

    /// Feed the current viewport to the infinite-scroll trigger.
    ///
    /// A notification is evaluated once; it is re-evaluated only after the
    /// last visible row or the list length changes.
    fn check_infinite_scroll(&mut self, rows: usize) -> bool {
        let info = self.app_state.photos.page_info(rows);
        let notification = (info, self.app_state.photos.len());
        if self.last_page_notification == Some(notification) {
            return false;
        }
        self.last_page_notification = Some(notification);

        match fetch_more(self.store.state(), notification.1, info) {
            Some(action) => {
                debug!(end_index = ?info.end_index, "Reached end of list, loading more");
                self.store.dispatch(action);
                true
            }
            None => false,
        }
    }

    // ===== Input =====

    /// Handle a single keyboard event observed at `now`
    ///
    /// Returns true if app should quit
    fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.app_state.active_modal() {
            Some(ActiveModal::ApiKey) => {
                self.handle_key_modal_key(key);
                return false;
            }
            Some(ActiveModal::Detail) => {
                self.app_state.modal_key_up(key.code);
                return false;
            }
            None => {}
        }

        if self.app_state.help_visible {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.app_state.help_visible = false;
            }
            return false;
        }

        if self.key_bindings.get(key) == Some(KeyAction::OpenKeyModal) {
            self.open_key_modal();
            return false;
        }

        match self.app_state.focus {
            FocusPane::Search => {
                self.handle_search_key(key, now);
                false
            }
            FocusPane::Results => self.handle_results_key(key),
        }
    }

    fn open_key_modal(&mut self) {
        let current = self.store.api_key();
        self.app_state.open_key_modal(current);
    }

    /// Keys while the search field has focus.
    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
        let field = &mut self.app_state.search_field;
        let changed = match key.code {
            KeyCode::Tab | KeyCode::Enter | KeyCode::Down | KeyCode::Esc => {
                self.app_state.focus = FocusPane::Results;
                false
            }
            code => edit_field(field, code, key.modifiers),
        };

        if changed {
            self.debouncer
                .on_input(self.app_state.search_field.value(), now);
        }
    }

    /// Keys while the result list has focus.
    ///
    /// Returns true if app should quit
    fn handle_results_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        let rows = self.result_rows();
        let photos = &mut self.app_state.photos;

        match action {
            KeyAction::ScrollUp => photos.select_prev(),
            KeyAction::ScrollDown => photos.select_next(),
            KeyAction::PageUp => photos.page_up(rows),
            KeyAction::PageDown => photos.page_down(rows),
            KeyAction::ScrollToTop => photos.select_first(),
            KeyAction::ScrollToBottom => photos.select_last(),
            KeyAction::FocusSearch => self.app_state.focus = FocusPane::Search,
            KeyAction::CycleFocus => self.app_state.cycle_focus(),
            KeyAction::ShowDetail => {
                self.app_state.open_detail();
            }
            KeyAction::OpenKeyModal => self.open_key_modal(),
            KeyAction::Help => self.app_state.help_visible = !self.app_state.help_visible,
            KeyAction::Quit => return true,
        }

        self.app_state.photos.adjust_scroll(rows);
        false
    }

    /// Keys while the API key prompt is open.
    fn handle_key_modal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_api_key(),
            KeyCode::Esc => {
                self.app_state.modal_key_up(KeyCode::Esc);
            }
            code => {
                if !edit_field(&mut self.app_state.key_modal.content, code, key.modifiers) {
                    self.app_state.modal_key_up(code);
                }
            }
        }
    }

    /// Save the key from the prompt and test it.
    fn submit_api_key(&mut self) {
        let api_key = self.app_state.key_modal.content.value().trim().to_string();
        if api_key.is_empty() {
            self.app_state.status_message = Some("API key is empty".to_string());
            return;
        }

        match self.store.save_api_key(&api_key) {
            Ok(saved) => {
                self.app_state.status_message = None;
                self.store.dispatch(Action::TestCredential(saved));
            }
            Err(e) => {
                warn!(error = %e, "Could not save API key");
                self.app_state.status_message = Some(format!("Could not save API key: {}", e));
            }
        }
    }

    /// Handle a single mouse event
    ///
    /// Left clicks dismiss modals (outside) or pick a result row; the wheel
    /// moves the selection.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(mouse.column, mouse.row),
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                if self.app_state.active_modal().is_some() || self.app_state.help_visible {
                    return;
                }
                if mouse.kind == MouseEventKind::ScrollUp {
                    self.app_state.photos.select_prev();
                } else {
                    self.app_state.photos.select_next();
                }
                let rows = self.result_rows();
                self.app_state.photos.adjust_scroll(rows);
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        let position = Position::new(column, row);

        if self.app_state.active_modal().is_some() {
            let target = match self.last_modal_area {
                Some(area) if area.contains(position) => ClickTarget::Content,
                _ => ClickTarget::Background,
            };
            self.app_state.active_modal_event(ModalEvent::Click(target));
            return;
        }

        if self.app_state.help_visible {
            self.app_state.help_visible = false;
            return;
        }

        let layout = AppLayout::new(self.frame_area());
        if layout.search.contains(position) {
            self.app_state.focus = FocusPane::Search;
        } else if let Some(offset) = layout.result_row_at(column, row) {
            self.app_state.focus = FocusPane::Results;
            if self.app_state.photos.select_visible_row(offset) {
                self.app_state.open_detail();
            }
        }
    }

    // ===== Rendering =====

    fn frame_area(&self) -> Rect {
        match self.terminal.size() {
            Ok(size) if size.width > 0 && size.height > 0 => {
                Rect::new(0, 0, size.width, size.height)
            }
            _ => FALLBACK_AREA,
        }
    }

    /// Result rows that fit on screen.
    fn result_rows(&self) -> usize {
        AppLayout::new(self.frame_area()).result_rows()
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let app_state = &self.app_state;
        let state = self.store.state();
        let palette = &self.palette;
        let mut modal_area = None;

        self.terminal.draw(|frame| {
            let layout = AppLayout::new(frame.area());
            let no_overlay = app_state.active_modal().is_none() && !app_state.help_visible;

            frame.render_widget(
                SearchBar::new(&app_state.search_field, palette)
                    .focused(no_overlay && app_state.focus == FocusPane::Search),
                layout.search,
            );
            frame.render_widget(
                ResultList::new(&app_state.photos, state, palette)
                    .focused(app_state.focus == FocusPane::Results),
                layout.results,
            );
            frame.render_widget(
                StatusBar::new(state, palette).message(app_state.status_message.as_deref()),
                layout.status,
            );

            if app_state.detail_modal.is_visible() {
                modal_area = Some(render_detail_modal(
                    frame,
                    app_state.detail_modal.content.as_ref(),
                    palette,
                ));
            }
            if app_state.key_modal.is_visible() {
                modal_area = Some(render_key_modal(
                    frame,
                    &app_state.key_modal.content,
                    state.test_status(),
                    palette,
                ));
            }
            if app_state.help_visible {
                render_help_overlay(frame, palette);
            }
        })?;

        self.last_modal_area = modal_area;
        Ok(())
    }
}

/// Apply an editing key to a text field.
///
/// Returns true if the value changed.
fn edit_field(field: &mut TextField, code: KeyCode, modifiers: KeyModifiers) -> bool {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let alt = modifiers.contains(KeyModifiers::ALT);
    match code {
        KeyCode::Char('u') if ctrl => field.clear(),
        KeyCode::Char(ch) if !ctrl && !alt => field.insert(ch),
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete(),
        KeyCode::Left => {
            field.move_left();
            false
        }
        KeyCode::Right => {
            field.move_right();
            false
        }
        KeyCode::Home => {
            field.move_home();
            false
        }
        KeyCode::End => {
            field.move_end();
            false
        }
        _ => false,
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
#[allow(dead_code)] // Not all helpers used by every test module
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing (test-only constructor)
    ///
    /// Skips terminal initialization. Used by the acceptance test harness.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        store: Store,
        debouncer: SearchInputDebouncer,
        key_bindings: KeyBindings,
    ) -> Self {
        let mut app = Self::with_terminal(terminal, app_state, store, debouncer, key_bindings);
        app.palette = Palette::new(ColorConfig::enabled(false));
        app
    }

    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    pub(crate) fn photo_state(&self) -> &PhotoState {
        self.store.state()
    }

    pub(crate) fn handle_key_test(&mut self, key: KeyEvent, now: Instant) -> bool {
        self.handle_key_at(key, now)
    }

    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse)
    }

    pub(crate) fn tick_test(&mut self, now: Instant) -> bool {
        self.tick(now)
    }

    pub(crate) fn poll_timeout_test(&self, now: Instant) -> Duration {
        self.poll_timeout(now)
    }

    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub(crate) fn last_modal_area(&self) -> Option<Rect> {
        self.last_modal_area
    }
}

/// Values from the command line that are not configuration.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// Search to run immediately.
    pub initial_search: Option<String>,
    /// Key to use for this session instead of the stored one.
    pub api_key: Option<String>,
}

/// Initialize and run the TUI application
///
/// Builds the HTTP client, key store and search state from `config`, then
/// runs the event loop and restores the terminal on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_config(config: &ResolvedConfig, options: LaunchOptions) -> Result<(), TuiError> {
    let client = PexelsClient::new(config.api_base_url.clone(), config.request_timeout())
        .map_err(|e| AppError::HttpClient(e.to_string()))?;

    let key_store: Box<dyn KeyStore> = match options.api_key {
        Some(key) => Box::new(MemoryKeyStore::with_key(key)),
        None => Box::new(FileKeyStore::new(&config.key_file_path)),
    };

    let state = PhotoState::new(config.items_per_page)
        .with_discard_stale_responses(config.discard_stale_responses);
    let store = Store::new(state, Arc::new(client), key_store);
    let debouncer = SearchInputDebouncer::new(config.debounce());

    let mut app = match TuiApp::new(store, debouncer, KeyBindings::default()) {
        Ok(app) => app,
        Err(e) => {
            let _ = restore_terminal();
            return Err(e);
        }
    };
    app.start(options.initial_search.as_deref(), Instant::now());

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

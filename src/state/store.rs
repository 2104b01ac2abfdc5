//! Runs reducer effects and feeds their results back.
//!
//! The store owns the search state together with its two collaborators
//! (the fetcher and the key store). Dispatching an action applies the
//! reducer immediately; any request it asks for runs through a
//! [`RequestExecutor`] and reports back over a channel. Completions are
//! applied only in [`Store::poll_completions`], which the event loop calls
//! between terminal events, so the reducer never runs concurrently with
//! itself.

use crate::api::{KeyStore, PageQuery, PhotoFetcher};
use crate::model::{FetchError, KeyStoreError};
use crate::state::photo_state::{Action, Completion, Effect, PageRequest, PhotoState};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tracing::{debug, info, warn};

/// A request to run off the event loop.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Where background requests run.
pub trait RequestExecutor {
    /// Start `job`.
    ///
    /// # Errors
    ///
    /// Returns an error if the job could not be started. The job has then
    /// not run and never will.
    fn execute(&self, job: Job) -> std::io::Result<()>;
}

/// Runs each request on its own short-lived thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadExecutor;

impl RequestExecutor for ThreadExecutor {
    fn execute(&self, job: Job) -> std::io::Result<()> {
        thread::Builder::new()
            .name("pixsearch-request".to_string())
            .spawn(job)
            .map(|_| ())
    }
}

/// Search state plus the machinery to run its requests.
pub struct Store {
    state: PhotoState,
    fetcher: Arc<dyn PhotoFetcher>,
    key_store: Box<dyn KeyStore>,
    executor: Box<dyn RequestExecutor>,
    completion_tx: Sender<Completion>,
    completion_rx: Receiver<Completion>,
    in_flight: usize,
}

impl Store {
    /// Store running requests on background threads.
    pub fn new(
        state: PhotoState,
        fetcher: Arc<dyn PhotoFetcher>,
        key_store: Box<dyn KeyStore>,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel();
        Self {
            state,
            fetcher,
            key_store,
            executor: Box::new(ThreadExecutor),
            completion_tx,
            completion_rx,
            in_flight: 0,
        }
    }

    /// Replace the executor.
    pub fn with_executor(mut self, executor: Box<dyn RequestExecutor>) -> Self {
        self.executor = executor;
        self
    }

    /// Current search state.
    pub fn state(&self) -> &PhotoState {
        &self.state
    }

    /// Apply `action` and start whatever request it needs.
    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, "Dispatch");
        match self.state.reduce(action) {
            Some(Effect::LoadPage(request)) => self.load_page(request),
            Some(Effect::ProbeCredential(api_key)) => self.probe_credential(api_key),
            None => {}
        }
    }

    /// Apply every completion that has arrived.
    ///
    /// Returns `true` if the state changed.
    pub fn poll_completions(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            log_completion(&completion);
            changed |= self.state.complete(completion);
        }
        changed
    }

    /// Whether any request has not reported back yet.
    pub fn has_pending(&self) -> bool {
        self.in_flight > 0
    }

    /// The stored API key, if any.
    pub fn api_key(&self) -> Option<String> {
        self.key_store.get()
    }

    /// Persist a new API key.
    ///
    /// # Errors
    ///
    /// Returns `KeyStoreError` if the key store cannot write it.
    pub fn save_api_key(&self, api_key: &str) -> Result<String, KeyStoreError> {
        self.key_store.set(api_key)
    }

    fn load_page(&mut self, request: PageRequest) {
        let Some(api_key) = self.key_store.get() else {
            self.deliver(Completion::Page {
                request,
                result: Err(FetchError::MissingCredential),
            });
            return;
        };

        info!(query = %request.query, page = request.page, "Requesting page");
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.completion_tx.clone();
        let query = request.to_query();
        let pending = request.clone();
        let job: Job = Box::new(move || {
            let result = fetcher.search(&api_key, &query);
            let _ = tx.send(Completion::Page {
                request: pending,
                result,
            });
        });
        if let Err(e) = self.executor.execute(job) {
            self.deliver(Completion::Page {
                request,
                result: Err(FetchError::Transport(e.to_string())),
            });
            return;
        }
        self.in_flight += 1;
    }

    fn probe_credential(&mut self, api_key: String) {
        if api_key.trim().is_empty() {
            self.deliver(Completion::Probe {
                result: Err(FetchError::MissingCredential),
            });
            return;
        }

        info!("Testing API key");
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.completion_tx.clone();
        let job: Job = Box::new(move || {
            let result = fetcher.search(&api_key, &PageQuery::credential_probe());
            let _ = tx.send(Completion::Probe { result });
        });
        if let Err(e) = self.executor.execute(job) {
            self.deliver(Completion::Probe {
                result: Err(FetchError::Transport(e.to_string())),
            });
            return;
        }
        self.in_flight += 1;
    }

    /// Queue a completion produced without a request.
    fn deliver(&mut self, completion: Completion) {
        // The receiver lives in `self`, so this cannot fail.
        if self.completion_tx.send(completion).is_ok() {
            self.in_flight += 1;
        }
    }
}

fn log_completion(completion: &Completion) {
    match completion {
        Completion::Page {
            request,
            result: Ok(page),
        } => info!(
            query = %request.query,
            page = request.page,
            photos = page.photos.len(),
            total = page.total_results,
            "Page received"
        ),
        Completion::Page {
            request,
            result: Err(e),
        } => warn!(query = %request.query, page = request.page, error = %e, "Page request failed"),
        Completion::Probe { result: Ok(_) } => info!("API key accepted"),
        Completion::Probe { result: Err(e) } => warn!(error = %e, "API key test failed"),
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

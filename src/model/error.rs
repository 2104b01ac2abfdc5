//! Error types for pixsearch.
//!
//! Errors are split by layer using `thiserror`, composing via `?` and `From`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Fatal startup/terminal failures, returned from `main`
//!   - [`ConfigError`](crate::config::ConfigError) - config file read/parse/validation
//!   - [`LoggingError`](crate::logging::LoggingError) - tracing subscriber setup
//!   - [`KeyStoreError`] - credential file access
//!   - `std::io::Error` - terminal setup and rendering
//! - [`FetchError`] - Non-fatal request failures, normalized to [`LastError`]
//!   before they reach the search state
//!
//! # Recovery Strategy
//!
//! Fetch failures never end the session. They are shown in the status bar
//! and the user may simply search again. Nothing is retried automatically.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The log file subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The credential file could not be accessed.
    #[error("Credential storage error: {0}")]
    KeyStore(#[from] KeyStoreError),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors from the persistent credential store.
#[derive(Debug, Error)]
pub enum KeyStoreError {
    /// The credential file exists but could not be read.
    #[error("Failed to read credential file at {path:?}: {source}")]
    Read {
        /// Credential file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The credential file or its directory could not be written.
    #[error("Failed to write credential file at {path:?}: {source}")]
    Write {
        /// Credential file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Why a page request (or credential probe) did not produce a page.
///
/// # Taxonomy
///
/// - `MissingCredential`: synthesized locally, no request was sent
/// - `Http`: the server answered with a non-2xx status
/// - `Transport`: no response at all (DNS, connect, TLS, timeout)
/// - `Decode`: a 2xx response whose body is not a page
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// No API key was loaded when the request was issued.
    #[error("no api key loaded")]
    MissingCredential,

    /// Non-2xx response.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Server-provided error text, or the status reason phrase.
        message: String,
    },

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The body did not parse as a page.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl FetchError {
    /// Normalize into the `{status_code, message}` shape the search state keeps.
    ///
    /// Only HTTP errors carry a non-zero status. Transport failures collapse
    /// into the "empty response" sentinel since there is no body to show.
    pub fn to_last_error(&self) -> LastError {
        match self {
            FetchError::MissingCredential => LastError::new(0, self.to_string()),
            FetchError::Http { status, message } => LastError::new(*status, message.clone()),
            FetchError::Transport(_) => LastError::empty_response(),
            FetchError::Decode(_) => LastError::new(0, self.to_string()),
        }
    }
}

/// Message used when a failure carries neither status nor body.
pub const EMPTY_RESPONSE_MESSAGE: &str = "empty response";

/// Last fetch failure as displayed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastError {
    /// HTTP status, or 0 when no response was received.
    pub status_code: u16,
    /// Text shown in the status bar.
    pub message: String,
}

impl LastError {
    /// Error with an explicit status and message.
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }

    /// Sentinel for failures with no response object.
    pub fn empty_response() -> Self {
        Self::new(0, EMPTY_RESPONSE_MESSAGE)
    }

    /// True for the "no response" sentinel.
    pub fn is_empty_response(&self) -> bool {
        self.status_code == 0 && self.message == EMPTY_RESPONSE_MESSAGE
    }
}

impl std::fmt::Display for LastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.status_code == 0 {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} {}", self.status_code, self.message)
        }
    }
}

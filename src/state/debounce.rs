//! Search input debouncing.
//!
//! Turns raw search-field values into committed search strings: edges are
//! trimmed, empty values are ignored, a commit happens only after the
//! field has been quiet for the full period, and a commit equal to the
//! previous one is suppressed.
//!
//! The debouncer holds no timer of its own. Callers pass the current
//! [`Instant`] in, and the event loop uses [`SearchInputDebouncer::deadline`]
//! as its poll timeout.

use crate::state::photo_state::Action;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default quiet period before a search commits.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingCommit {
    value: String,
    deadline: Instant,
}

/// Debounce and deduplicate search input.
#[derive(Debug, Clone)]
pub struct SearchInputDebouncer {
    quiet_period: Duration,
    pending: Option<PendingCommit>,
    last_committed: Option<String>,
}

impl Default for SearchInputDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl SearchInputDebouncer {
    /// Debouncer committing after `quiet_period` of silence.
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
            last_committed: None,
        }
    }

    /// The configured quiet period.
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Record a raw field value observed at `now`.
    ///
    /// A value that is empty after trimming is dropped entirely: it neither
    /// restarts nor cancels a pending commit.
    pub fn on_input(&mut self, raw: &str, now: Instant) {
        let value = raw.trim();
        if value.is_empty() {
            return;
        }
        self.pending = Some(PendingCommit {
            value: value.to_string(),
            deadline: now + self.quiet_period,
        });
    }

    /// Commit the pending value if its quiet period has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<Action> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => {}
            _ => return None,
        }
        self.flush()
    }

    /// Commit the pending value immediately, ignoring the deadline.
    pub fn flush(&mut self) -> Option<Action> {
        let pending = self.pending.take()?;
        if self.last_committed.as_deref() == Some(pending.value.as_str()) {
            debug!(value = %pending.value, "Search unchanged, not committing");
            return None;
        }
        debug!(value = %pending.value, "Committing search");
        self.last_committed = Some(pending.value.clone());
        Some(Action::SetSearchString(pending.value))
    }

    /// When the pending value commits, if anything is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Time left until the pending commit, zero if overdue.
    pub fn time_until_deadline(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Whether a commit is waiting for its deadline.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The most recent committed search string.
    pub fn last_committed(&self) -> Option<&str> {
        self.last_committed.as_deref()
    }
}

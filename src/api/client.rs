//! Blocking HTTP client for the Pexels search endpoint.

use super::{PageQuery, PhotoFetcher};
use crate::model::{FetchError, PageResponse};
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest server message kept for display.
const MAX_ERROR_MESSAGE_CHARS: usize = 200;

/// Pexels API client.
#[derive(Debug, Clone)]
pub struct PexelsClient {
    http: Client,
    base_url: String,
}

impl PexelsClient {
    /// Build a client for `base_url` (e.g. `https://api.pexels.com/v1`).
    ///
    /// # Errors
    ///
    /// Returns the underlying reqwest error if the TLS backend cannot be
    /// initialized.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pixsearch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Wrap an already configured reqwest client.
    pub fn with_http_client(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Full URL of the search endpoint.
    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url.trim_end_matches('/'))
    }
}

impl PhotoFetcher for PexelsClient {
    fn search(&self, api_key: &str, query: &PageQuery) -> Result<PageResponse, FetchError> {
        let url = self.search_url();
        debug!(
            url = %url,
            query = %query.query,
            page = query.page,
            per_page = query.per_page,
            "Sending search request"
        );

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, api_key)
            .query(&[
                ("query", query.query.clone()),
                ("per_page", query.per_page.to_string()),
                ("page", query.page.to_string()),
            ])
            .send()
            .map_err(|e| {
                warn!(error = %e, "Search request failed without a response");
                FetchError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = error_message(status, &body);
            warn!(status = status.as_u16(), message = %message, "Search request rejected");
            return Err(FetchError::Http {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<PageResponse>()
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// Extract a displayable message from an error response body.
///
/// Prefers a JSON `error` or `message` string field, then the raw body,
/// then the status reason phrase.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["error", "message"] {
            if let Some(serde_json::Value::String(text)) = map.get(field) {
                if !text.trim().is_empty() {
                    return truncate(text.trim());
                }
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return truncate(trimmed);
    }

    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_ERROR_MESSAGE_CHARS {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(MAX_ERROR_MESSAGE_CHARS).collect();
        cut.push('…');
        cut
    }
}

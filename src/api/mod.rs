//! Photo search API access.
//!
//! This module provides the two external collaborators of the search state:
//! - [`PhotoFetcher`]: issues one search request per page
//! - [`KeyStore`]: persists the API credential between sessions

use crate::model::{FetchError, PageResponse};

pub mod client;
pub mod key_store;

pub use client::PexelsClient;
pub use key_store::{FileKeyStore, KeyStore, MemoryKeyStore};

/// Parameters of a single search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Search terms.
    pub query: String,
    /// 1-based page number.
    pub page: u32,
    /// Results per page.
    pub per_page: u32,
}

impl PageQuery {
    /// Query, page size and page used to verify a freshly entered API key.
    pub fn credential_probe() -> Self {
        Self {
            query: "cat".to_string(),
            page: 1,
            per_page: 10,
        }
    }
}

/// Something that can fetch one page of search results.
///
/// Implementations block until the request finishes; callers run them off
/// the UI thread.
pub trait PhotoFetcher: Send + Sync {
    /// Fetch `query` with `api_key` sent as the `Authorization` header.
    ///
    /// # Errors
    ///
    /// Non-2xx responses become `FetchError::Http`, failures without a
    /// response become `FetchError::Transport`, and bodies that do not decode
    /// become `FetchError::Decode`.
    fn search(&self, api_key: &str, query: &PageQuery) -> Result<PageResponse, FetchError>;
}

//! Remote data source contract and the artic.edu HTTP client

mod client;

pub use client::*;

use async_trait::async_trait;

use crate::error::Error;
use crate::model::Page;

/// A remote, paginated record source.
///
/// Implementations return one page of records plus the collection's total
/// record count for a given `(page_index, page_size)`. Results are assumed
/// deterministic within a session: re-fetching the same page yields the
/// same records, and the total does not change between calls.
///
/// The library's own implementation is [`ArticClient`]; tests supply their
/// own in-memory sources.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetches the page at 1-based `page_index`.
    async fn fetch_page(&self, page_index: u32, page_size: u32) -> Result<Page, Error>;
}

//! Page cache with per-page fetch coalescing
//!
//! Pages are memoized by page index and never evicted: the remote
//! collection is assumed stable/append-only for the session. If a
//! mutating collection must be supported, page invalidation belongs here
//! as an explicit extension.

use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use dashmap::DashMap;
use log::debug;
use tokio::sync::OnceCell;

use crate::api::RemoteSource;
use crate::error::Error;
use crate::model::Page;

/// Memoizing cache of fetched pages, keyed by 1-based page index.
///
/// At most one fetch is in flight per page index: concurrent `get` calls
/// for the same uncached page coalesce into a single request, and every
/// caller receives the same `Arc<Page>`. A failed fetch leaves the page
/// uncached, so the next `get` retries.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use artic_lib::api::ArticClient;
/// use artic_lib::cache::PageCache;
///
/// let cache = PageCache::new(Arc::new(ArticClient::new()?), 12);
/// let page = cache.get(1).await?;
/// assert!(cache.contains(1));
/// ```
pub struct PageCache {
    source: Arc<dyn RemoteSource>,
    page_size: u32,
    pages: DashMap<u32, Arc<OnceCell<Arc<Page>>>>,
    total_records: AtomicU64,
}

impl PageCache {
    /// Creates an empty cache reading from `source` in pages of `page_size`.
    pub fn new(source: Arc<dyn RemoteSource>, page_size: u32) -> Self {
        Self {
            source,
            page_size,
            pages: DashMap::new(),
            total_records: AtomicU64::new(0),
        }
    }

    /// Returns the page at `page_index`, fetching it if not yet cached.
    ///
    /// Cache hits return immediately without touching the remote source.
    /// On a miss, exactly one fetch is issued even under concurrent
    /// callers; a fetch error is returned to every waiting caller and the
    /// page stays uncached.
    pub async fn get(&self, page_index: u32) -> Result<Arc<Page>, Error> {
        // Clone the cell out so the map guard is not held across the await.
        let cell = self
            .pages
            .entry(page_index)
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        if let Some(page) = cell.get() {
            debug!("page cache hit for page {page_index}");
            return Ok(page.clone());
        }

        let page = cell
            .get_or_try_init(|| async {
                debug!("page cache miss for page {page_index}, fetching");
                let page = self.source.fetch_page(page_index, self.page_size).await?;
                self.total_records
                    .store(page.total_records(), Ordering::Relaxed);
                Ok::<_, Error>(Arc::new(page))
            })
            .await?;

        Ok(page.clone())
    }

    /// Returns the cached page at `page_index` without fetching.
    pub fn cached(&self, page_index: u32) -> Option<Arc<Page>> {
        self.pages
            .get(&page_index)
            .and_then(|cell| cell.get().cloned())
    }

    /// Returns `true` if the page at `page_index` is cached.
    pub fn contains(&self, page_index: u32) -> bool {
        self.cached(page_index).is_some()
    }

    /// Returns the number of cached pages.
    pub fn len(&self) -> usize {
        self.pages
            .iter()
            .filter(|entry| entry.value().initialized())
            .count()
    }

    /// Returns `true` if no page has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the page size this cache fetches by.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the total record count reported by the most recent fetch,
    /// or 0 if nothing has been fetched yet.
    pub fn total_records(&self) -> u64 {
        self.total_records.load(Ordering::Relaxed)
    }
}

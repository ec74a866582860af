//! Pagination control
//!
//! Drives page fetches on navigation and reapplies the bulk selection
//! rule on submission. Pages are never fetched speculatively; a page not
//! yet viewed reconciles lazily the first time it is observed, using the
//! bulk count and overrides current at that moment.

use std::sync::Arc;

use log::info;

use crate::cache::PageCache;
use crate::error::Error;
use crate::model::Page;
use crate::select::SelectionReconciler;

/// Tracks the page in view and routes page arrivals into the reconciler.
///
/// `view_epoch` increments on every bulk submission. It exists purely so
/// a presentation layer can discard stale derived views; it plays no part
/// in selection logic.
pub struct PaginationController {
    cache: Arc<PageCache>,
    reconciler: SelectionReconciler,
    current_page: u32,
    view_epoch: u64,
}

impl PaginationController {
    /// Creates a controller positioned on page 1 with an empty selection.
    pub fn new(cache: Arc<PageCache>) -> Self {
        Self {
            cache,
            reconciler: SelectionReconciler::new(),
            current_page: 1,
            view_epoch: 0,
        }
    }

    /// Returns the 1-based index of the page in view.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the presentation epoch, bumped on every bulk submission.
    pub fn view_epoch(&self) -> u64 {
        self.view_epoch
    }

    /// Returns the page cache this controller reads from.
    pub fn cache(&self) -> &Arc<PageCache> {
        &self.cache
    }

    /// Returns the selection reconciler.
    pub fn reconciler(&self) -> &SelectionReconciler {
        &self.reconciler
    }

    /// Returns the selection reconciler for direct mutation, e.g. routing
    /// a row toggle.
    pub fn reconciler_mut(&mut self) -> &mut SelectionReconciler {
        &mut self.reconciler
    }

    /// Navigates to `page_index`, fetching it if needed, and reconciles
    /// its records on arrival.
    ///
    /// A fetch failure is propagated with the selection state untouched;
    /// re-calling with the same index retries the fetch.
    pub async fn go_to_page(&mut self, page_index: u32) -> Result<Arc<Page>, Error> {
        let page_index = page_index.max(1);
        self.current_page = page_index;
        let page = self.cache.get(page_index).await?;
        self.reconciler.observe_page(&page);
        Ok(page)
    }

    /// Applies a "select the first N records" submission.
    ///
    /// Resets to page 1, installs the clamped bulk count (clearing all
    /// overrides), reconciles page 1, and bumps the view epoch so the
    /// presentation layer rebuilds its derived state.
    pub async fn submit_bulk_count(&mut self, requested: i64) -> Result<Arc<Page>, Error> {
        let total = self.cache.total_records();
        let applied = self.reconciler.apply_bulk_count(requested, total);
        info!("bulk select first {applied} records (requested {requested}, total {total})");

        self.current_page = 1;
        let page = self.cache.get(1).await?;
        self.reconciler.observe_page(&page);
        self.view_epoch += 1;
        Ok(page)
    }
}

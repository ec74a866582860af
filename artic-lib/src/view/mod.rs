//! Presentation adapter
//!
//! Translates reconciler state into what a table widget needs to render
//! and routes widget events back into the controller and reconciler.
//! Selection derivation is pure; the only state held here is the memoized
//! visible page and a loading flag.

use std::collections::HashSet;
use std::sync::Arc;

use log::warn;

use crate::error::Error;
use crate::model::Artwork;
use crate::model::Page;
use crate::pager::PaginationController;

/// View-model for a lazily paginated, selectable artwork table.
///
/// Event entry points mirror the widget surface: page changes, per-row
/// checkbox toggles, widget-level multi-select reports, and the bulk
/// count overlay's confirmed input. Each runs to completion before the
/// next is processed (`&mut self`), so reconciliation steps never
/// interleave.
pub struct TableView {
    controller: PaginationController,
    visible: Option<Arc<Page>>,
    loading: bool,
}

impl TableView {
    /// Creates a view over `controller` with no page loaded yet.
    pub fn new(controller: PaginationController) -> Self {
        Self {
            controller,
            visible: None,
            loading: false,
        }
    }

    /// Loads and shows page 1. Call once after construction.
    pub async fn load_initial(&mut self) -> Result<(), Error> {
        self.on_page_changed(1).await
    }

    // =========================================================================
    // Render surface
    // =========================================================================

    /// Returns the records of the page in view (empty before first load).
    pub fn visible_records(&self) -> &[Artwork] {
        self.visible.as_ref().map(|p| p.records()).unwrap_or(&[])
    }

    /// Returns `true` if `record` renders with its checkbox checked.
    pub fn is_selected(&self, record: &Artwork) -> bool {
        self.controller.reconciler().is_selected(record.id)
    }

    /// Returns the total record count known so far.
    pub fn total_records(&self) -> u64 {
        self.controller.cache().total_records()
    }

    /// Returns `true` while a page fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the 1-based index of the page in view.
    pub fn current_page(&self) -> u32 {
        self.controller.current_page()
    }

    /// Returns the epoch a renderer keys its derived state by; a changed
    /// epoch means any memoized view must be rebuilt.
    pub fn view_epoch(&self) -> u64 {
        self.controller.view_epoch()
    }

    /// Returns the number of selected records across all observed pages.
    pub fn selected_count(&self) -> usize {
        self.controller.reconciler().selected_len()
    }

    // =========================================================================
    // Widget events
    // =========================================================================

    /// Handles the widget's page-change event.
    ///
    /// On fetch failure the previous visible page is kept and the error
    /// is returned for the widget to surface as a retryable failure.
    pub async fn on_page_changed(&mut self, page_index: u32) -> Result<(), Error> {
        self.loading = !self.controller.cache().contains(page_index);
        let result = self.controller.go_to_page(page_index).await;
        self.loading = false;

        match result {
            Ok(page) => {
                self.visible = Some(page);
                Ok(())
            }
            Err(e) => {
                warn!("page {page_index} fetch failed: {e}");
                Err(e)
            }
        }
    }

    /// Handles a single row's checkbox toggle.
    ///
    /// A toggle for a record not on the visible page is ignored; the
    /// widget cannot legitimately report one.
    pub fn on_row_toggled(&mut self, id: u64, checked: bool) {
        let Some(ordinal) = self.visible.as_ref().and_then(|p| p.ordinal_of_id(id)) else {
            warn!("toggle for record {id} not on the visible page, ignoring");
            return;
        };
        self.controller.reconciler_mut().toggle_row(id, ordinal, checked);
    }

    /// Handles the widget's multi-select report: the full set of rows it
    /// now considers selected on the visible page.
    pub fn on_selection_changed(&mut self, selected_on_page: &[u64]) {
        let Some(page) = self.visible.clone() else {
            return;
        };
        let selected: HashSet<u64> = selected_on_page.iter().copied().collect();
        self.controller
            .reconciler_mut()
            .apply_selection_delta(&page, &selected);
    }

    /// Handles the bulk-count overlay's confirmed input.
    ///
    /// Non-numeric or non-positive input is silently ignored; a count
    /// beyond the known total is clamped, not rejected. On success the
    /// view resets to page 1.
    pub async fn on_count_submitted(&mut self, input: &str) -> Result<(), Error> {
        let count = match input.trim().parse::<i64>() {
            Ok(n) if n > 0 => n,
            _ => {
                warn!("ignoring bulk count input {input:?}");
                return Ok(());
            }
        };

        self.loading = !self.controller.cache().contains(1);
        let result = self.controller.submit_bulk_count(count).await;
        self.loading = false;

        let page = result?;
        self.visible = Some(page);
        Ok(())
    }
}

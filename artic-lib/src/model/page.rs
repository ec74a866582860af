//! Page type for paginated fetch results.

use super::Artwork;

/// A page of artwork records with pagination information.
///
/// Pages are immutable once constructed: the index, page size, and the
/// total record count known at fetch time never change. The page index is
/// 1-based.
///
/// Every record on a page has a *global ordinal*: its 1-based position
/// across the entire remote collection. Ordinals are derived purely from
/// the page index and page size, so they are available without any other
/// page having been fetched.
///
/// # Example
///
/// ```
/// use artic_lib::model::{Artwork, Page};
///
/// let records = vec![Artwork::new(901, "First"), Artwork::new(902, "Second")];
/// let page = Page::new(2, 12, records, 100);
///
/// // Page 2 with page size 12 starts at global ordinal 13.
/// assert_eq!(page.ordinal_of(0), 13);
/// assert_eq!(page.ordinal_of(1), 14);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page index.
    index: u32,
    /// Number of records per page the collection is paginated by.
    page_size: u32,
    records: Vec<Artwork>,
    /// Total record count reported by the remote source at fetch time.
    total_records: u64,
}

impl Page {
    /// Creates a new page.
    ///
    /// `index` is 1-based; an index of 0 is treated as 1.
    pub fn new(index: u32, page_size: u32, records: Vec<Artwork>, total_records: u64) -> Self {
        Self {
            index: index.max(1),
            page_size,
            records,
            total_records,
        }
    }

    /// Returns the 1-based page index.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Returns the page size the collection is paginated by.
    ///
    /// This may exceed `len()` on the final page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns a reference to the records on this page.
    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    /// Returns the total record count known at fetch time.
    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records on this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns the global ordinal of the record at `position` within this
    /// page (both the input position and the result count from the start
    /// of their respective sequences, position 0-based, ordinal 1-based).
    pub fn ordinal_of(&self, position: usize) -> u64 {
        (self.index as u64 - 1) * self.page_size as u64 + position as u64 + 1
    }

    /// Iterates over `(global_ordinal, record)` pairs for this page.
    pub fn ordinals(&self) -> impl Iterator<Item = (u64, &Artwork)> {
        let first = (self.index as u64 - 1) * self.page_size as u64 + 1;
        self.records
            .iter()
            .enumerate()
            .map(move |(i, record)| (first + i as u64, record))
    }

    /// Returns the global ordinal of `id` on this page, if present.
    pub fn ordinal_of_id(&self, id: u64) -> Option<u64> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .map(|position| self.ordinal_of(position))
    }
}

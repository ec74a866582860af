//! Selection reconciliation
//!
//! Bulk selection is defined over the *global ordinal* of a record (its
//! 1-based position across the whole collection), not over the page in
//! view. Pages load lazily, so the bulk rule is applied to each page the
//! first time it is observed, and re-applied from scratch on every
//! re-observation. Manual toggles that disagree with the rule are tracked
//! as overrides until the next bulk submission.

use std::collections::HashSet;

use log::debug;

use crate::model::Page;

/// Owns the authoritative selection state and re-establishes its
/// invariant on every mutation.
///
/// The invariant, for every record whose page has been observed:
///
/// `selected.contains(id) == (ordinal(id) <= bulk_count) XOR overridden.contains(id)`
///
/// `overridden` is written only by the toggle path and cleared in full by
/// [`apply_bulk_count`](Self::apply_bulk_count). The override set is kept
/// minimal: a toggle that happens to agree with the ordinal rule prunes
/// its id rather than recording a no-op override, so `overridden` is
/// always an exact diff against the rule.
#[derive(Debug, Default)]
pub struct SelectionReconciler {
    selected: HashSet<u64>,
    overridden: HashSet<u64>,
    bulk_count: u64,
}

impl SelectionReconciler {
    /// Creates an empty reconciler: no bulk rule, nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the active bulk count (0 means no active bulk rule).
    pub fn bulk_count(&self) -> u64 {
        self.bulk_count
    }

    /// Returns `true` if the record with `id` is selected.
    ///
    /// Only meaningful for records whose page has been observed.
    pub fn is_selected(&self, id: u64) -> bool {
        self.selected.contains(&id)
    }

    /// Returns the set of selected record ids.
    pub fn selected_ids(&self) -> &HashSet<u64> {
        &self.selected
    }

    /// Returns the ids manually flipped against the bulk rule.
    pub fn overridden_ids(&self) -> &HashSet<u64> {
        &self.overridden
    }

    /// Returns the number of selected records.
    pub fn selected_len(&self) -> usize {
        self.selected.len()
    }

    /// Applies a new "select the first N records" rule.
    ///
    /// `requested` is clamped to `[0, total_records]` and all manual
    /// overrides are discarded: the new rule speaks for every record
    /// again. Returns the clamped count. Pages are not recomputed here;
    /// the caller re-observes the page in view, and other pages reconcile
    /// lazily on their next observation.
    pub fn apply_bulk_count(&mut self, requested: i64, total_records: u64) -> u64 {
        let clamped = requested.clamp(0, total_records.min(i64::MAX as u64) as i64) as u64;
        debug!(
            "bulk count {requested} clamped to {clamped} (total {total_records}), clearing {} overrides",
            self.overridden.len()
        );
        self.bulk_count = clamped;
        self.overridden.clear();
        clamped
    }

    /// Reconciles every record on `page` against the current bulk rule
    /// and override set.
    ///
    /// Membership is recomputed from scratch for each record, so calling
    /// this again for an already-observed page is idempotent, and a page
    /// observed before a later bulk change reconciles correctly when it
    /// is observed again.
    pub fn observe_page(&mut self, page: &Page) {
        for (ordinal, record) in page.ordinals() {
            let selected = (ordinal <= self.bulk_count) ^ self.overridden.contains(&record.id);
            if selected {
                self.selected.insert(record.id);
            } else {
                self.selected.remove(&record.id);
            }
        }
    }

    /// Applies a manual checkbox toggle for the record with `id` at
    /// `ordinal`.
    ///
    /// Membership in the selected set becomes `checked`. If the choice
    /// agrees with what the ordinal rule already dictates, any override
    /// for `id` is pruned; otherwise an override is recorded so the
    /// choice survives navigation until the next bulk submission.
    pub fn toggle_row(&mut self, id: u64, ordinal: u64, checked: bool) {
        if checked {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }

        let by_rule = ordinal <= self.bulk_count;
        if checked == by_rule {
            self.overridden.remove(&id);
        } else {
            self.overridden.insert(id);
        }
    }

    /// Reconciles a widget-reported multi-select over the visible `page`.
    ///
    /// The widget reports the full set of rows it now considers selected
    /// on the page; every visible record is treated as an individual
    /// toggle with `checked = selected_on_page.contains(id)`. This routes
    /// select-all-on-page style controls through the same override
    /// bookkeeping as single-row toggles, narrowing the override set
    /// where the new state agrees with the rule.
    pub fn apply_selection_delta(&mut self, page: &Page, selected_on_page: &HashSet<u64>) {
        for (ordinal, record) in page.ordinals() {
            self.toggle_row(record.id, ordinal, selected_on_page.contains(&record.id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Artwork;

    const PAGE_SIZE: u32 = 12;
    const TOTAL: u64 = 100;

    /// Builds a page whose record ids are unrelated to their ordinals
    /// (id = 1000 + ordinal) so tests cannot conflate the two.
    fn page(index: u32) -> Page {
        let first = (index as u64 - 1) * PAGE_SIZE as u64 + 1;
        let count = (PAGE_SIZE as u64).min(TOTAL - first + 1);
        let records = (0..count)
            .map(|i| Artwork::new(1000 + first + i, format!("Artwork {}", first + i)))
            .collect();
        Page::new(index, PAGE_SIZE, records, TOTAL)
    }

    fn id_at(ordinal: u64) -> u64 {
        1000 + ordinal
    }

    /// Checks the reconciliation invariant over the given observed pages.
    fn assert_invariant(reconciler: &SelectionReconciler, pages: &[&Page]) {
        for page in pages {
            for (ordinal, record) in page.ordinals() {
                let expected = (ordinal <= reconciler.bulk_count())
                    ^ reconciler.overridden_ids().contains(&record.id);
                assert_eq!(
                    reconciler.is_selected(record.id),
                    expected,
                    "invariant violated at ordinal {ordinal}"
                );
            }
        }
    }

    #[test]
    fn test_bulk_spans_pages_lazily() {
        // Scenario A: bulk 15 selects all of page 1 and ordinals 13-15 of
        // page 2, which is only reconciled once observed.
        let mut reconciler = SelectionReconciler::new();
        let p1 = page(1);
        let p2 = page(2);

        reconciler.apply_bulk_count(15, TOTAL);
        reconciler.observe_page(&p1);
        for ordinal in 1..=12 {
            assert!(reconciler.is_selected(id_at(ordinal)));
        }
        assert!(!reconciler.is_selected(id_at(13)));

        reconciler.observe_page(&p2);
        for ordinal in 13..=15 {
            assert!(reconciler.is_selected(id_at(ordinal)));
        }
        for ordinal in 16..=24 {
            assert!(!reconciler.is_selected(id_at(ordinal)));
        }
        assert_invariant(&reconciler, &[&p1, &p2]);
    }

    #[test]
    fn test_override_survives_navigation() {
        // Scenario B: un-toggling ordinal 5 sticks across page changes.
        let mut reconciler = SelectionReconciler::new();
        let p1 = page(1);
        let p2 = page(2);

        reconciler.apply_bulk_count(15, TOTAL);
        reconciler.observe_page(&p1);
        reconciler.toggle_row(id_at(5), 5, false);

        assert!(!reconciler.is_selected(id_at(5)));
        assert!(reconciler.overridden_ids().contains(&id_at(5)));

        reconciler.observe_page(&p2);
        reconciler.observe_page(&p1);
        assert!(!reconciler.is_selected(id_at(5)));
        assert_invariant(&reconciler, &[&p1, &p2]);
    }

    #[test]
    fn test_bulk_reset_clears_overrides() {
        // Scenario C: a fresh bulk count discards the ordinal-5 override;
        // the record stays unselected purely because 3 < 5.
        let mut reconciler = SelectionReconciler::new();
        let p1 = page(1);

        reconciler.apply_bulk_count(15, TOTAL);
        reconciler.observe_page(&p1);
        reconciler.toggle_row(id_at(5), 5, false);

        reconciler.apply_bulk_count(3, TOTAL);
        assert!(reconciler.overridden_ids().is_empty());

        reconciler.observe_page(&p1);
        assert!(!reconciler.is_selected(id_at(5)));
        assert!(reconciler.is_selected(id_at(3)));
        assert_invariant(&reconciler, &[&p1]);
    }

    #[test]
    fn test_observe_page_idempotent() {
        let mut reconciler = SelectionReconciler::new();
        let p1 = page(1);

        reconciler.apply_bulk_count(7, TOTAL);
        reconciler.observe_page(&p1);
        reconciler.toggle_row(id_at(9), 9, true);

        let before = reconciler.selected_ids().clone();
        reconciler.observe_page(&p1);
        assert_eq!(reconciler.selected_ids(), &before);
    }

    #[test]
    fn test_override_minimization() {
        let mut reconciler = SelectionReconciler::new();
        reconciler.apply_bulk_count(10, TOTAL);

        // Against the rule: ordinal 20 is beyond the bulk count.
        reconciler.toggle_row(id_at(20), 20, true);
        assert!(reconciler.overridden_ids().contains(&id_at(20)));

        // Back in agreement: the override is pruned, not kept as a no-op.
        reconciler.toggle_row(id_at(20), 20, false);
        assert!(!reconciler.overridden_ids().contains(&id_at(20)));

        // Agreeing toggle within the bulk range never records an override.
        reconciler.toggle_row(id_at(4), 4, true);
        assert!(reconciler.overridden_ids().is_empty());
    }

    #[test]
    fn test_clamping() {
        let mut reconciler = SelectionReconciler::new();
        assert_eq!(reconciler.apply_bulk_count(-5, 100), 0);
        assert_eq!(reconciler.apply_bulk_count(500, 100), 100);
        assert_eq!(reconciler.apply_bulk_count(42, 100), 42);
        assert_eq!(reconciler.apply_bulk_count(1, 0), 0);
    }

    #[test]
    fn test_selection_delta_narrows_overrides() {
        let mut reconciler = SelectionReconciler::new();
        let p1 = page(1);

        reconciler.apply_bulk_count(6, TOTAL);
        reconciler.observe_page(&p1);
        // Manual override against the rule at ordinal 9.
        reconciler.toggle_row(id_at(9), 9, true);
        assert!(reconciler.overridden_ids().contains(&id_at(9)));

        // Widget reports only ordinals 1-6 selected (a "reset to rule"
        // multi-select). The stale override must be narrowed away.
        let selected: HashSet<u64> = (1..=6).map(id_at).collect();
        reconciler.apply_selection_delta(&p1, &selected);

        assert!(!reconciler.is_selected(id_at(9)));
        assert!(reconciler.overridden_ids().is_empty());
        assert_invariant(&reconciler, &[&p1]);
    }

    #[test]
    fn test_selection_delta_select_all_on_page() {
        let mut reconciler = SelectionReconciler::new();
        let p2 = page(2);

        reconciler.apply_bulk_count(15, TOTAL);
        reconciler.observe_page(&p2);

        // Select-all over page 2: ordinals 13-15 already follow the rule,
        // 16-24 become overrides.
        let all: HashSet<u64> = p2.records().iter().map(|r| r.id).collect();
        reconciler.apply_selection_delta(&p2, &all);

        for (ordinal, record) in p2.ordinals() {
            assert!(reconciler.is_selected(record.id));
            assert_eq!(
                reconciler.overridden_ids().contains(&record.id),
                ordinal > 15
            );
        }
        assert_invariant(&reconciler, &[&p2]);
    }
}

//! Cross-page selection state.
//!
//! The coordinator owns the durable set of selected record identifiers and
//! the page currently on screen. The rows shown as checked, and whether the
//! select-all box is ticked, are always derived from those two on demand.
//! Nothing about a page is remembered after navigating away except which of
//! its ids are in the set, which is enough to restore its checkboxes when the
//! page is fetched again.
//!
//! Identifiers belonging to pages that are not on screen are never inspected
//! or removed by any operation here.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::api::types::Page;

/// A record with a stable identity.
///
/// Two records are the same row iff their ids are equal; no other field is
/// compared.
pub trait Identified {
    /// The identifier type (integer or string ids both work).
    type Id: Eq + Hash + Clone + Debug;

    /// Get the record identifier.
    fn id(&self) -> Self::Id;
}

/// Read-only view handed to the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSnapshot<'a, R> {
    /// The page on screen, if one has loaded.
    pub current_page: Option<&'a Page<R>>,
    /// Whether every row on the (non-empty) page is selected.
    pub select_all_flag: bool,
    /// Number of selected rows on the page.
    pub visible_selection_count: usize,
    /// Selected rows on the page, in page order.
    pub visible_selection_list: Vec<&'a R>,
}

/// Keeps row selections consistent across server-driven page navigation.
#[derive(Debug, Clone)]
pub struct SelectionCoordinator<R: Identified> {
    /// The page currently on screen.
    current_page: Option<Page<R>>,
    /// Durable set of selected ids, across all pages ever loaded.
    selected: HashSet<R::Id>,
}

impl<R: Identified> Default for SelectionCoordinator<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Identified> SelectionCoordinator<R> {
    /// Create a coordinator with no page and an empty selection.
    pub fn new() -> Self {
        Self {
            current_page: None,
            selected: HashSet::new(),
        }
    }

    /// Replace the page on screen.
    ///
    /// The selection set is not touched; the visible selection is re-derived
    /// from it the next time it is read.
    pub fn on_page_loaded(&mut self, page: Page<R>) {
        debug!(
            offset = page.offset,
            rows = page.len(),
            total = page.total_records,
            "Page loaded into selection coordinator"
        );
        self.current_page = Some(page);
        trace!(
            visible = self.visible_selection_count(),
            selected = self.selected.len(),
            "Reconciled visible selection"
        );
    }

    /// Add or remove a single id.
    pub fn toggle_row(&mut self, id: R::Id, selected: bool) {
        trace!(?id, selected, "Toggle row");
        if selected {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }
    }

    /// Flip the selection state of the row at `index` on the current page.
    ///
    /// Returns the new state, or `None` if there is no such row.
    pub fn toggle_row_at(&mut self, index: usize) -> Option<bool> {
        let id = self.current_page.as_ref()?.records.get(index)?.id();
        let now_selected = !self.selected.contains(&id);
        self.toggle_row(id, now_selected);
        Some(now_selected)
    }

    /// Replace the current page's membership with the rows in `visible`.
    ///
    /// Rows on the current page that are not in `visible` are deselected.
    /// Ids from other pages are left alone, and entries of `visible` that are
    /// not on the current page are ignored.
    pub fn set_visible_selection<'a, I>(&mut self, visible: I)
    where
        I: IntoIterator<Item = &'a R>,
        R: 'a,
    {
        let Some(page) = self.current_page.as_ref() else {
            return;
        };
        let wanted: HashSet<R::Id> = visible.into_iter().map(|record| record.id()).collect();
        for record in &page.records {
            let id = record.id();
            if wanted.contains(&id) {
                self.selected.insert(id);
            } else {
                self.selected.remove(&id);
            }
        }
        debug!(
            visible = self.visible_selection_count(),
            selected = self.selected.len(),
            "Visible selection replaced"
        );
    }

    /// Select or deselect every row on the current page.
    pub fn toggle_select_all(&mut self, checked: bool) {
        let Some(page) = self.current_page.as_ref() else {
            return;
        };
        for record in &page.records {
            if checked {
                self.selected.insert(record.id());
            } else {
                self.selected.remove(&record.id());
            }
        }
        debug!(checked, rows = page.len(), "Toggled select all");
    }

    /// Select exactly the first `n` rows of the current page.
    ///
    /// `n` is clamped to the page length. Rows past the cutoff are
    /// deselected. `None` or zero leaves the selection unchanged.
    pub fn select_first_n(&mut self, n: Option<usize>) {
        let Some(n) = n.filter(|&n| n > 0) else {
            debug!("Select first N ignored: no positive count");
            return;
        };
        let Some(page) = self.current_page.as_ref() else {
            return;
        };
        let count = n.min(page.len());
        for (index, record) in page.records.iter().enumerate() {
            if index < count {
                self.selected.insert(record.id());
            } else {
                self.selected.remove(&record.id());
            }
        }
        debug!(requested = n, applied = count, "Selected first rows");
    }

    /// Get the page on screen.
    pub fn current_page(&self) -> Option<&Page<R>> {
        self.current_page.as_ref()
    }

    /// Check if an id is in the selection set.
    pub fn is_selected(&self, id: &R::Id) -> bool {
        self.selected.contains(id)
    }

    /// Selected rows of the current page, in page order.
    pub fn visible_selection(&self) -> Vec<&R> {
        self.current_page
            .iter()
            .flat_map(|page| page.records.iter())
            .filter(|record| self.selected.contains(&record.id()))
            .collect()
    }

    /// Number of selected rows on the current page.
    pub fn visible_selection_count(&self) -> usize {
        self.current_page.as_ref().map_or(0, |page| {
            page.records
                .iter()
                .filter(|record| self.selected.contains(&record.id()))
                .count()
        })
    }

    /// Whether every row of a non-empty current page is selected.
    pub fn select_all_flag(&self) -> bool {
        match self.current_page.as_ref() {
            Some(page) if !page.is_empty() => self.visible_selection_count() == page.len(),
            _ => false,
        }
    }

    /// Total number of selected ids across all pages.
    pub fn selection_set_len(&self) -> usize {
        self.selected.len()
    }

    /// All selected ids, on screen or not.
    pub fn selected_ids(&self) -> &HashSet<R::Id> {
        &self.selected
    }

    /// Build the read-only view for rendering.
    pub fn snapshot(&self) -> SelectionSnapshot<'_, R> {
        let visible = self.visible_selection();
        SelectionSnapshot {
            current_page: self.current_page.as_ref(),
            select_all_flag: self.select_all_flag(),
            visible_selection_count: visible.len(),
            visible_selection_list: visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(u32);

    impl Identified for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            self.0
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Named(&'static str);

    impl Identified for Named {
        type Id = String;

        fn id(&self) -> String {
            self.0.to_string()
        }
    }

    /// Page `number` (1-based) of a 25-record collection of ids 1..=25.
    fn page(number: u32, size: u32) -> Page<Row> {
        let start = (number - 1) * size + 1;
        let end = (start + size - 1).min(25);
        let records = (start..=end).map(Row).collect();
        Page::new(records, u64::from(start - 1), size, 25)
    }

    fn ids(rows: &[&Row]) -> Vec<u32> {
        rows.iter().map(|r| r.0).collect()
    }

    #[test]
    fn test_new_is_empty() {
        let coord: SelectionCoordinator<Row> = SelectionCoordinator::new();
        assert!(coord.current_page().is_none());
        assert_eq!(coord.selection_set_len(), 0);
        assert!(!coord.select_all_flag());
        assert!(coord.visible_selection().is_empty());
    }

    #[test]
    fn test_page_loaded_derives_visible_from_set() {
        let mut coord = SelectionCoordinator::new();
        coord.toggle_row(3, true);
        coord.toggle_row(1, true);
        coord.toggle_row(17, true);

        coord.on_page_loaded(page(1, 10));
        assert_eq!(ids(&coord.visible_selection()), vec![1, 3]);
        assert_eq!(coord.selection_set_len(), 3);
        assert!(coord.is_selected(&17));
    }

    #[test]
    fn test_page_loaded_does_not_modify_set() {
        let mut coord = SelectionCoordinator::new();
        coord.on_page_loaded(page(1, 10));
        coord.toggle_select_all(true);
        let before = coord.selected_ids().clone();

        coord.on_page_loaded(page(2, 10));
        coord.on_page_loaded(page(2, 10));
        assert_eq!(coord.selected_ids(), &before);
        assert!(coord.visible_selection().is_empty());
    }

    #[test]
    fn test_toggle_row() {
        let mut coord = SelectionCoordinator::new();
        coord.on_page_loaded(page(1, 10));

        coord.toggle_row(4, true);
        assert_eq!(ids(&coord.visible_selection()), vec![4]);

        coord.toggle_row(4, false);
        assert!(coord.visible_selection().is_empty());

        // Removing an id that was never selected is harmless.
        coord.toggle_row(9, false);
        assert_eq!(coord.selection_set_len(), 0);
    }

    #[test]
    fn test_toggle_row_at() {
        let mut coord = SelectionCoordinator::new();
        assert_eq!(coord.toggle_row_at(0), None);

        coord.on_page_loaded(page(2, 10));
        assert_eq!(coord.toggle_row_at(0), Some(true));
        assert!(coord.is_selected(&11));
        assert_eq!(coord.toggle_row_at(0), Some(false));
        assert!(!coord.is_selected(&11));
        assert_eq!(coord.toggle_row_at(10), None);
    }

    #[test]
    fn test_select_all_then_clear_leaves_other_pages() {
        let mut coord = SelectionCoordinator::new();
        coord.on_page_loaded(page(2, 10));
        coord.toggle_row(12, true);

        coord.on_page_loaded(page(1, 10));
        coord.toggle_select_all(true);
        assert!(coord.select_all_flag());
        assert_eq!(coord.visible_selection_count(), 10);

        coord.toggle_select_all(false);
        assert!(!coord.select_all_flag());
        assert!(coord.visible_selection().is_empty());
        assert!(coord.is_selected(&12));
        assert_eq!(coord.selection_set_len(), 1);
    }

    #[test]
    fn test_select_first_n_clamps_to_page() {
        let mut coord = SelectionCoordinator::new();
        coord.on_page_loaded(page(1, 10));

        coord.select_first_n(Some(1000));
        assert_eq!(coord.visible_selection_count(), 10);
        assert!(coord.select_all_flag());
    }

    #[test]
    fn test_select_first_n_zero_and_none_are_noops() {
        let mut coord = SelectionCoordinator::new();
        coord.on_page_loaded(page(1, 10));
        coord.toggle_row(2, true);
        coord.toggle_row(7, true);

        coord.select_first_n(Some(0));
        assert_eq!(ids(&coord.visible_selection()), vec![2, 7]);

        coord.select_first_n(None);
        assert_eq!(ids(&coord.visible_selection()), vec![2, 7]);
    }

    #[test]
    fn test_select_first_n_replaces_page_membership() {
        let mut coord = SelectionCoordinator::new();
        coord.on_page_loaded(page(1, 10));
        coord.toggle_row(9, true);
        coord.toggle_row(21, true);

        coord.select_first_n(Some(5));
        assert_eq!(ids(&coord.visible_selection()), vec![1, 2, 3, 4, 5]);
        assert!(!coord.select_all_flag());
        assert!(!coord.is_selected(&9));
        assert!(coord.is_selected(&21));
    }

    #[test]
    fn test_set_visible_selection_is_full_replace() {
        let mut coord = SelectionCoordinator::new();
        coord.on_page_loaded(page(1, 10));
        coord.toggle_row(1, true);
        coord.toggle_row(2, true);
        coord.toggle_row(15, true);

        let page = coord.current_page().unwrap().clone();
        coord.set_visible_selection(&page.records[4..7]);

        assert_eq!(ids(&coord.visible_selection()), vec![5, 6, 7]);
        assert!(!coord.is_selected(&1));
        assert!(coord.is_selected(&15));
        assert!(!coord.select_all_flag());

        coord.set_visible_selection(&page.records);
        assert!(coord.select_all_flag());
    }

    #[test]
    fn test_set_visible_selection_ignores_foreign_rows() {
        let mut coord = SelectionCoordinator::new();
        coord.on_page_loaded(page(1, 10));

        let foreign = [Row(11), Row(3)];
        coord.set_visible_selection(&foreign);
        assert_eq!(ids(&coord.visible_selection()), vec![3]);
        assert!(!coord.is_selected(&11));
    }

    #[test]
    fn test_operations_without_page_are_noops() {
        let mut coord: SelectionCoordinator<Row> = SelectionCoordinator::new();
        coord.toggle_select_all(true);
        coord.select_first_n(Some(3));
        coord.set_visible_selection(&[Row(1)]);
        assert_eq!(coord.selection_set_len(), 0);

        coord.toggle_row(5, true);
        assert_eq!(coord.selection_set_len(), 1);
    }

    #[test]
    fn test_cross_page_accumulation() {
        let mut coord = SelectionCoordinator::new();
        coord.on_page_loaded(page(1, 10));
        for id in [1, 2, 3] {
            coord.toggle_row(id, true);
        }

        coord.on_page_loaded(page(2, 10));
        coord.toggle_row(11, true);

        let mut all: Vec<u32> = coord.selected_ids().iter().copied().collect();
        all.sort_unstable();
        assert_eq!(all, vec![1, 2, 3, 11]);

        coord.on_page_loaded(page(1, 10));
        assert_eq!(ids(&coord.visible_selection()), vec![1, 2, 3]);
        assert!(!coord.select_all_flag());
    }

    #[test]
    fn test_select_all_flag_false_on_empty_page() {
        let mut coord: SelectionCoordinator<Row> = SelectionCoordinator::new();
        coord.on_page_loaded(Page::new(Vec::new(), 30, 10, 25));
        coord.toggle_select_all(true);
        assert!(!coord.select_all_flag());
    }

    #[test]
    fn test_short_last_page() {
        let mut coord = SelectionCoordinator::new();
        coord.on_page_loaded(page(3, 10));
        assert_eq!(coord.current_page().unwrap().len(), 5);

        coord.select_first_n(Some(8));
        assert_eq!(ids(&coord.visible_selection()), vec![21, 22, 23, 24, 25]);
        assert!(coord.select_all_flag());
    }

    #[test]
    fn test_page_size_change_keeps_selection() {
        let mut coord = SelectionCoordinator::new();
        coord.on_page_loaded(page(1, 10));
        coord.select_first_n(Some(10));

        coord.on_page_loaded(page(1, 25));
        assert_eq!(coord.visible_selection_count(), 10);
        assert!(!coord.select_all_flag());
    }

    #[test]
    fn test_string_ids() {
        let mut coord = SelectionCoordinator::new();
        let records = vec![Named("a"), Named("b"), Named("c")];
        coord.on_page_loaded(Page::new(records, 0, 3, 3));

        coord.toggle_row("b".to_string(), true);
        assert_eq!(coord.visible_selection(), vec![&Named("b")]);
        assert!(coord.is_selected(&"b".to_string()));
    }

    #[test]
    fn test_snapshot() {
        let mut coord = SelectionCoordinator::new();
        coord.on_page_loaded(page(1, 10));
        coord.select_first_n(Some(5));

        let snapshot = coord.snapshot();
        assert_eq!(snapshot.visible_selection_count, 5);
        assert!(!snapshot.select_all_flag);
        assert_eq!(ids(&snapshot.visible_selection_list), vec![1, 2, 3, 4, 5]);
        assert_eq!(snapshot.current_page.map(|p| p.total_records), Some(25));
    }
}

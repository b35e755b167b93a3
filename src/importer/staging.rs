// ==========================================
// Quarry Ops Import - Staging Store
// ==========================================
// In-memory home of the previewed row set. Ids are contiguous 1..N
// matching array order at all times; ids are never reused for a
// different row except through a full replace.
// ==========================================

use crate::importer::schema::StagedRecord;
use std::collections::BTreeSet;

/// One staged row: a locally-unique sequence id plus the domain row.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedRow<R> {
    pub id: u32,
    pub row: R,
}

/// Ordered collection of staged rows plus a selection set.
///
/// An empty selection means "submit all currently staged rows".
pub struct StagingStore<R: StagedRecord> {
    rows: Vec<StagedRow<R>>,
    selection: BTreeSet<u32>,
}

impl<R: StagedRecord> Default for StagingStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: StagedRecord> StagingStore<R> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            selection: BTreeSet::new(),
        }
    }

    /// Swap the entire staged set atomically. Clears the selection.
    pub fn replace(&mut self, rows: Vec<R>) {
        self.rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| StagedRow {
                id: index as u32 + 1,
                row,
            })
            .collect();
        self.selection.clear();
        self.renumber();
    }

    /// Remove the given ids and renumber the survivors to a contiguous
    /// 1..N range in their original relative order. The selection
    /// follows the surviving rows through renumbering.
    pub fn remove(&mut self, ids: &[u32]) {
        let removed: BTreeSet<u32> = ids.iter().copied().collect();
        let old_selection = std::mem::take(&mut self.selection);

        // Selection is carried across the id shift by position.
        let mut next_id = 0u32;
        let mut new_selection = BTreeSet::new();
        self.rows.retain(|staged| {
            if removed.contains(&staged.id) {
                return false;
            }
            next_id += 1;
            if old_selection.contains(&staged.id) {
                new_selection.insert(next_id);
            }
            true
        });
        self.selection = new_selection;

        self.renumber();
    }

    /// Replace the selection. Unknown ids are ignored.
    pub fn select(&mut self, ids: &[u32]) {
        let known: BTreeSet<u32> = self.rows.iter().map(|staged| staged.id).collect();
        self.selection = ids.iter().copied().filter(|id| known.contains(id)).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &BTreeSet<u32> {
        &self.selection
    }

    /// Rows marked for submission: the selected subset, or every
    /// staged row when nothing is explicitly selected.
    pub fn selected_or_all(&self) -> Vec<&R> {
        if self.selection.is_empty() {
            self.rows.iter().map(|staged| &staged.row).collect()
        } else {
            self.rows
                .iter()
                .filter(|staged| self.selection.contains(&staged.id))
                .map(|staged| &staged.row)
                .collect()
        }
    }

    pub fn rows(&self) -> &[StagedRow<R>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.selection.clear();
    }

    // Reassign ids 1..N in array order and rewrite the visible serial.
    fn renumber(&mut self) {
        for (index, staged) in self.rows.iter_mut().enumerate() {
            staged.id = index as u32 + 1;
            staged.row.set_serial_no(staged.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct TestRow {
        serial_no: u32,
        name: String,
    }

    impl StagedRecord for TestRow {
        fn set_serial_no(&mut self, serial: u32) {
            self.serial_no = serial;
        }
    }

    fn row(name: &str) -> TestRow {
        TestRow {
            serial_no: 0,
            name: name.to_string(),
        }
    }

    fn store_with(names: &[&str]) -> StagingStore<TestRow> {
        let mut store = StagingStore::new();
        store.replace(names.iter().map(|n| row(n)).collect());
        store
    }

    #[test]
    fn test_replace_assigns_contiguous_ids_and_serials() {
        let store = store_with(&["a", "b", "c"]);
        let ids: Vec<u32> = store.rows().iter().map(|s| s.id).collect();
        let serials: Vec<u32> = store.rows().iter().map(|s| s.row.serial_no).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(serials, vec![1, 2, 3]);
    }

    #[test]
    fn test_remove_renumbers_without_gaps() {
        // Scenario: stage 2 rows, delete row id 1; the survivor is id 1.
        let mut store = store_with(&["a", "b"]);
        store.remove(&[1]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.rows()[0].id, 1);
        assert_eq!(store.rows()[0].row.serial_no, 1);
        assert_eq!(store.rows()[0].row.name, "b");
    }

    #[test]
    fn test_remove_preserves_relative_order() {
        let mut store = store_with(&["a", "b", "c", "d", "e"]);
        store.remove(&[2, 4]);

        let names: Vec<&str> = store
            .rows()
            .iter()
            .map(|s| s.row.name.as_str())
            .collect();
        let ids: Vec<u32> = store.rows().iter().map(|s| s.id).collect();
        assert_eq!(names, vec!["a", "c", "e"]);
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_selection_follows_rows_through_removal() {
        let mut store = store_with(&["a", "b", "c", "d"]);
        store.select(&[3, 4]);
        store.remove(&[1]);

        // "c" and "d" are now ids 2 and 3.
        let selected: Vec<&str> = store
            .selected_or_all()
            .into_iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(selected, vec!["c", "d"]);
    }

    #[test]
    fn test_removed_ids_leave_the_selection() {
        let mut store = store_with(&["a", "b"]);
        store.select(&[1, 2]);
        store.remove(&[2]);

        let selected: Vec<&str> = store
            .selected_or_all()
            .into_iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(selected, vec!["a"]);
    }

    #[test]
    fn test_empty_selection_means_all() {
        let store = store_with(&["a", "b", "c"]);
        assert_eq!(store.selected_or_all().len(), 3);
    }

    #[test]
    fn test_replace_clears_selection() {
        let mut store = store_with(&["a", "b"]);
        store.select(&[2]);
        store.replace(vec![row("x")]);
        assert!(store.selection().is_empty());
        assert_eq!(store.selected_or_all().len(), 1);
    }

    #[test]
    fn test_select_ignores_unknown_ids() {
        let mut store = store_with(&["a"]);
        store.select(&[1, 99]);
        assert_eq!(store.selection().len(), 1);
    }
}

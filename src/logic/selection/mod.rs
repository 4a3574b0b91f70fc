//! Selection Module - Per-View Record Selection
//!
//! Tracks which record ids are chosen for batch operations (analyze,
//! mark safe). Policy: ids stay in the set when a filter change hides
//! them; batch operations and the select-all toggle act on the
//! intersection with the currently visible set.

use std::collections::HashSet;

/// Set of record ids selected in one table view. Empty at view mount;
/// cleared after a successful analysis run or explicitly.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present; its own inverse.
    /// Returns whether the id is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// Select everything the filtered view currently shows. Ids already
    /// in the set stay selected.
    pub fn select_all<I, S>(&mut self, visible_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids.extend(visible_ids.into_iter().map(Into::into));
    }

    /// Drop every id not in `visible_ids`. Used by views configured to
    /// prune the selection on filter changes.
    pub fn retain_visible(&mut self, visible_ids: &HashSet<String>) {
        self.ids.retain(|id| visible_ids.contains(id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn has(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn size(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Ids from `visible_ids` that are selected, in `visible_ids` order.
    /// This is the set batch operations run against.
    pub fn visible_selected<'a>(&self, visible_ids: &[&'a str]) -> Vec<&'a str> {
        visible_ids
            .iter()
            .filter(|id| self.ids.contains(**id))
            .copied()
            .collect()
    }

    /// State of the select-all toggle for the current view.
    pub fn all_visible_selected(&self, visible_ids: &[&str]) -> bool {
        !visible_ids.is_empty() && visible_ids.iter().all(|id| self.ids.contains(*id))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let mut selection = SelectionSet::new();

        assert!(selection.toggle("1"));
        assert!(selection.has("1"));
        assert!(!selection.toggle("1"));
        assert!(!selection.has("1"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_is_bound_to_visible_ids() {
        let mut selection = SelectionSet::new();
        selection.select_all(["1", "2"]);

        assert_eq!(selection.size(), 2);
        assert!(selection.has("1"));
        assert!(!selection.has("3"));
    }

    #[test]
    fn test_hidden_ids_are_retained_but_excluded_from_batches() {
        let mut selection = SelectionSet::new();
        selection.toggle("1");
        selection.toggle("2");

        // A filter change hides record 2; the id stays in the set but
        // batch operations only see the visible intersection.
        let visible = ["1", "3"];
        assert_eq!(selection.visible_selected(&visible), vec!["1"]);
        assert_eq!(selection.size(), 2);

        // Restoring the old filter brings record 2 back into batches.
        let visible = ["1", "2", "3"];
        assert_eq!(selection.visible_selected(&visible), vec!["1", "2"]);
    }

    #[test]
    fn test_retain_visible_prunes_hidden_ids() {
        let mut selection = SelectionSet::new();
        selection.select_all(["1", "2", "3"]);

        let visible: HashSet<String> = ["1", "3"].iter().map(|s| s.to_string()).collect();
        selection.retain_visible(&visible);

        assert_eq!(selection.size(), 2);
        assert!(!selection.has("2"));
    }

    #[test]
    fn test_all_visible_selected_toggle_state() {
        let mut selection = SelectionSet::new();
        selection.select_all(["1", "2"]);

        assert!(selection.all_visible_selected(&["1", "2"]));
        assert!(!selection.all_visible_selected(&["1", "2", "3"]));
        // An empty view never reads as fully selected.
        assert!(!selection.all_visible_selected(&[]));
    }
}

// Selection store: which attendees of the current result set are ticked.
//
// The set is keyed by username and only ever refers to the attendee table
// currently on screen: the owning state clears it whenever that table is
// replaced, so no per-mutation validation against older results is needed.

use std::collections::HashSet;

use crate::api::types::Attendee;

use super::WorkflowError;

/// Tri-state of the "select all" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    Unchecked,
    Checked,
    Indeterminate,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    selected: HashSet<String>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    /// Set membership of every visible id to `select`.
    pub fn select_all<'a>(&mut self, select: bool, visible: impl IntoIterator<Item = &'a str>) {
        for id in visible {
            if select {
                self.selected.insert(id.to_string());
            } else {
                self.selected.remove(id);
            }
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The selected attendees, in the order they appear in `cache`.
    pub fn promote(&self, cache: &[Attendee]) -> Result<Vec<Attendee>, WorkflowError> {
        if self.selected.is_empty() {
            return Err(WorkflowError::EmptySelection);
        }
        Ok(cache
            .iter()
            .filter(|a| self.selected.contains(&a.username))
            .cloned()
            .collect())
    }

    /// State of the "select all" control for the given visible table.
    pub fn select_all_state(&self, visible: &[Attendee]) -> SelectAllState {
        let ticked = visible
            .iter()
            .filter(|a| self.selected.contains(&a.username))
            .count();
        match ticked {
            0 => SelectAllState::Unchecked,
            n if n == visible.len() => SelectAllState::Checked,
            _ => SelectAllState::Indeterminate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendee(username: &str) -> Attendee {
        serde_json::from_value(serde_json::json!({ "username": username })).unwrap()
    }

    #[test]
    fn toggle_twice_is_noop() {
        let mut store = SelectionStore::new();
        store.toggle("@a");
        assert!(store.toggle("@b"));
        assert!(!store.toggle("@b"));
        assert!(store.contains("@a"));
        assert!(!store.contains("@b"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn select_all_then_none_is_empty() {
        let table: Vec<Attendee> = (0..25).map(|i| attendee(&format!("@u{i}"))).collect();
        let mut store = SelectionStore::new();
        store.select_all(true, table.iter().map(|a| a.username.as_str()));
        assert_eq!(store.len(), 25);
        assert_eq!(store.select_all_state(&table), SelectAllState::Checked);
        store.select_all(false, table.iter().map(|a| a.username.as_str()));
        assert!(store.is_empty());
    }

    #[test]
    fn partial_selection_is_indeterminate() {
        let table = vec![attendee("@a"), attendee("@b")];
        let mut store = SelectionStore::new();
        store.toggle("@b");
        assert_eq!(store.select_all_state(&table), SelectAllState::Indeterminate);
    }

    #[test]
    fn empty_table_is_unchecked() {
        let store = SelectionStore::new();
        assert_eq!(store.select_all_state(&[]), SelectAllState::Unchecked);
    }

    #[test]
    fn promote_preserves_cache_order() {
        let table = vec![attendee("@a"), attendee("@b"), attendee("@c"), attendee("@d")];
        let mut store = SelectionStore::new();
        store.toggle("@d");
        store.toggle("@b");
        let promoted = store.promote(&table).unwrap();
        let names: Vec<&str> = promoted.iter().map(|a| a.username.as_str()).collect();
        assert_eq!(names, vec!["@b", "@d"]);
    }

    #[test]
    fn promote_empty_selection_fails() {
        let store = SelectionStore::new();
        assert!(matches!(
            store.promote(&[attendee("@a")]),
            Err(WorkflowError::EmptySelection)
        ));
    }
}

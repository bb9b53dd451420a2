use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::normalize_query;
use crate::view_mode::ViewMode;

/// Set of selected line ids.
///
/// Membership follows set semantics; iteration yields ids in the order they
/// were first selected, which is the order the UI shows them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineSelection(IndexSet<String>);

impl LineSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present. Returns whether the id is
    /// selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.0.shift_remove(id) {
            false
        } else {
            self.0.insert(id.to_owned());
            true
        }
    }

    pub fn insert(&mut self, id: impl Into<String>) {
        self.0.insert(id.into());
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for LineSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Everything the user can change about what the device list shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    /// Raw search input, as typed.
    pub search: String,
    pub lines: LineSelection,
    pub view: ViewMode,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_lines<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.lines = lines.into_iter().collect();
        self
    }

    pub fn with_view(mut self, view: ViewMode) -> Self {
        self.view = view;
        self
    }

    /// Trimmed, lowercased search text used for matching.
    pub fn normalized_search(&self) -> String {
        normalize_query(&self.search)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut lines = LineSelection::new();
        assert!(lines.toggle("unifi-network"));
        assert!(lines.contains("unifi-network"));
        assert!(!lines.toggle("unifi-network"));
        assert!(lines.is_empty());
    }

    #[test]
    fn selection_keeps_toggle_order() {
        let mut lines = LineSelection::new();
        lines.toggle("b");
        lines.toggle("a");
        lines.toggle("c");
        lines.toggle("a");
        lines.toggle("a");
        assert_eq!(lines.iter().collect::<Vec<_>>(), vec!["b", "c", "a"]);
    }

    #[test]
    fn duplicates_collapse() {
        let lines: LineSelection = ["a", "a", "b"].into_iter().collect();
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn normalized_search_trims_and_lowercases() {
        let state = QueryState::new().with_search("  Switch PRO ");
        assert_eq!(state.normalized_search(), "switch pro");
    }
}

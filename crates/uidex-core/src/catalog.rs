// ── Catalog handle ──
//
// Owns the immutable device snapshot and memoizes the derived indices next
// to it. Cloning the `Arc<Catalog>` is how the CLI, TUI, and query worker
// share one dataset.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::dataset::{BUNDLED_DATASET, load_devices, parse_devices};
use crate::error::CoreError;
use crate::model::DeviceRecord;
use crate::query::{
    FilteredView, LineOption, QueryState, QueryView, SearchIndexEntry, build_line_options,
    build_search_index, filter_devices, suggest,
};

/// Read-only device catalog with lazily built indices.
#[derive(Debug)]
pub struct Catalog {
    devices: Arc<Vec<Arc<DeviceRecord>>>,
    search_index: OnceLock<Vec<SearchIndexEntry>>,
    line_options: OnceLock<Vec<LineOption>>,
}

impl Catalog {
    pub fn new(devices: Vec<Arc<DeviceRecord>>) -> Self {
        Self {
            devices: Arc::new(devices),
            search_index: OnceLock::new(),
            line_options: OnceLock::new(),
        }
    }

    /// Parse a dataset document. Malformed JSON yields an empty catalog.
    pub fn from_json(json: &str) -> Self {
        Self::new(parse_devices(json))
    }

    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        load_devices(path).map(Self::new)
    }

    /// Process-wide catalog over the dataset compiled into the binary.
    pub fn bundled() -> Arc<Self> {
        static BUNDLED: OnceLock<Arc<Catalog>> = OnceLock::new();
        BUNDLED
            .get_or_init(|| Arc::new(Self::from_json(BUNDLED_DATASET)))
            .clone()
    }

    /// Bundled catalog, or the file at `path` when one is given.
    pub fn load(path: Option<&Path>) -> Result<Arc<Self>, CoreError> {
        match path {
            Some(path) => Self::from_path(path).map(Arc::new),
            None => Ok(Self::bundled()),
        }
    }

    // ── Snapshot access ──────────────────────────────────────────────

    pub fn devices(&self) -> &Arc<Vec<Arc<DeviceRecord>>> {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// First device whose id equals `id`. Blank ids never match.
    pub fn find(&self, id: &str) -> Option<&Arc<DeviceRecord>> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        self.devices.iter().find(|device| device.id() == Some(id))
    }

    /// Like [`find`](Self::find), for callers that want an error.
    pub fn get(&self, id: &str) -> Result<&Arc<DeviceRecord>, CoreError> {
        self.find(id).ok_or_else(|| CoreError::DeviceNotFound {
            identifier: id.to_owned(),
        })
    }

    // ── Derived indices ──────────────────────────────────────────────

    pub fn search_index(&self) -> &[SearchIndexEntry] {
        self.search_index.get_or_init(|| {
            let index = build_search_index(&self.devices);
            debug!(entries = index.len(), "built search index");
            index
        })
    }

    pub fn line_options(&self) -> &[LineOption] {
        self.line_options.get_or_init(|| {
            let options = build_line_options(&self.devices);
            debug!(lines = options.len(), "built line options");
            options
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn suggest(&self, raw_query: &str, limit: usize) -> Vec<&SearchIndexEntry> {
        suggest(self.search_index(), raw_query, limit)
    }

    pub fn filter(&self, state: &QueryState) -> FilteredView {
        FilteredView {
            devices: filter_devices(
                &self.devices,
                self.search_index(),
                &state.normalized_search(),
                &state.lines,
            ),
            total_count: self.devices.len(),
        }
    }

    /// Suggestions plus the filtered view for one query state.
    pub fn view(&self, state: &QueryState, suggestion_limit: usize) -> QueryView {
        QueryView {
            state: state.clone(),
            suggestions: self
                .suggest(&state.search, suggestion_limit)
                .into_iter()
                .cloned()
                .collect(),
            filtered: self.filter(state),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::FALLBACK_LINE_ID;
    use crate::query::EmptyState;
    use std::collections::HashSet;

    #[test]
    fn bundled_catalog_is_shared() {
        let a = Catalog::bundled();
        let b = Catalog::bundled();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!a.is_empty());
    }

    #[test]
    fn bundled_line_counts_sum_to_total() {
        let catalog = Catalog::bundled();
        let total: usize = catalog.line_options().iter().map(|o| o.count).sum();
        assert_eq!(total, catalog.len());
        assert!(
            catalog
                .line_options()
                .iter()
                .any(|o| o.id == FALLBACK_LINE_ID)
        );
    }

    #[test]
    fn bundled_search_ids_are_unique() {
        let catalog = Catalog::bundled();
        let ids: HashSet<_> = catalog.search_index().iter().map(|e| &e.id).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn indices_are_memoized() {
        let catalog = Catalog::from_json(r#"{ "devices": [{ "id": "a" }] }"#);
        let first = catalog.search_index().as_ptr();
        let second = catalog.search_index().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn find_ignores_blank_ids() {
        let catalog = Catalog::from_json(r#"{ "devices": [{ "id": "a" }, {}] }"#);
        assert!(catalog.find("").is_none());
        assert!(catalog.find("   ").is_none());
        assert_eq!(catalog.find("a").unwrap().id(), Some("a"));
        assert!(matches!(
            catalog.get("nope"),
            Err(CoreError::DeviceNotFound { identifier }) if identifier == "nope"
        ));
    }

    #[test]
    fn filter_reports_counts() {
        let catalog = Catalog::from_json(
            r#"{ "devices": [
                { "id": "a", "product": { "name": "Switch Pro" }, "line": { "id": "switching", "name": "Switching" } },
                { "id": "b", "product": { "name": "Access Point" }, "line": { "id": "wireless", "name": "Wireless" } }
            ] }"#,
        );

        let view = catalog.filter(&QueryState::new().with_search("switch"));
        assert_eq!(view.filtered_count(), 1);
        assert_eq!(view.total_count, 2);

        let none = catalog.filter(&QueryState::new().with_search("zzz"));
        assert_eq!(none.empty_state(), Some(EmptyState::NoMatches));
    }

    #[test]
    fn malformed_dataset_is_empty_not_an_error() {
        let catalog = Catalog::from_json("not json");
        assert!(catalog.is_empty());
        assert_eq!(
            catalog.filter(&QueryState::new()).empty_state(),
            Some(EmptyState::EmptyDataset)
        );
        assert!(catalog.line_options().is_empty());
    }

    #[test]
    fn view_bundles_suggestions_and_filter() {
        let catalog = Catalog::bundled();
        let view = catalog.view(&QueryState::new().with_search("switch"), 3);
        assert!(view.suggestions.len() <= 3);
        assert!(
            view.suggestions
                .iter()
                .all(|s| s.search_text.contains("switch"))
        );
        assert!(
            view.filtered
                .devices
                .iter()
                .all(|d| d.search_text().contains("switch"))
        );
    }
}

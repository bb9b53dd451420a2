use std::sync::Arc;

use serde::Serialize;

use super::{LineSelection, SearchIndexEntry};
use crate::model::DeviceRecord;

/// Why a filtered view is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EmptyState {
    /// The dataset itself has no devices.
    EmptyDataset,
    /// Devices exist but none pass the current search and line filter.
    NoMatches,
}

impl EmptyState {
    /// Message shown in place of the device list.
    pub fn message(self) -> &'static str {
        match self {
            Self::EmptyDataset => "No devices found in the local dataset.",
            Self::NoMatches => "No devices match your search and filter selection.",
        }
    }
}

pub(crate) fn matches(
    entry: &SearchIndexEntry,
    normalized_query: &str,
    lines: &LineSelection,
) -> bool {
    let text_ok = normalized_query.is_empty() || entry.search_text.contains(normalized_query);
    let line_ok = lines.is_empty() || lines.contains(&entry.line_id);
    text_ok && line_ok
}

/// Devices passing both the text and line predicates, in dataset order.
///
/// `index` is the search index built from `devices` (same length, same
/// order); its precomputed search text and line ids are what get tested.
/// `normalized_query` must already be trimmed and lowercased.
pub fn filter_devices(
    devices: &[Arc<DeviceRecord>],
    index: &[SearchIndexEntry],
    normalized_query: &str,
    lines: &LineSelection,
) -> Vec<Arc<DeviceRecord>> {
    debug_assert_eq!(devices.len(), index.len());
    devices
        .iter()
        .zip(index)
        .filter(|(_, entry)| matches(entry, normalized_query, lines))
        .map(|(device, _)| Arc::clone(device))
        .collect()
}

/// Result of evaluating a query against the whole dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView {
    pub devices: Vec<Arc<DeviceRecord>>,
    pub total_count: usize,
}

impl FilteredView {
    pub fn filtered_count(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.total_count == 0 {
            Some(EmptyState::EmptyDataset)
        } else if self.devices.is_empty() {
            Some(EmptyState::NoMatches)
        } else {
            None
        }
    }

    /// "1 Device" / "N Devices" for the filtered count.
    pub fn count_label(&self) -> String {
        count_label(self.filtered_count())
    }
}

pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 Device".to_owned()
    } else {
        format!("{count} Devices")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::query::build_search_index;
    use serde_json::json;

    fn scenario() -> Vec<Arc<DeviceRecord>> {
        vec![
            Arc::new(DeviceRecord::from_value(json!({
                "id": "a",
                "product": { "name": "Switch Pro" },
                "line": { "id": "switching", "name": "Switching" },
            }))),
            Arc::new(DeviceRecord::from_value(json!({
                "id": "b",
                "product": { "name": "Access Point" },
                "line": { "id": "wireless", "name": "Wireless" },
            }))),
        ]
    }

    fn filter(
        devices: &[Arc<DeviceRecord>],
        query: &str,
        lines: &LineSelection,
    ) -> Vec<Arc<DeviceRecord>> {
        filter_devices(devices, &build_search_index(devices), query, lines)
    }

    fn ids(devices: &[Arc<DeviceRecord>]) -> Vec<&str> {
        devices.iter().filter_map(|d| d.id()).collect()
    }

    #[test]
    fn empty_query_and_selection_return_everything() {
        let devices = scenario();
        let out = filter(&devices, "", &LineSelection::new());
        assert_eq!(ids(&out), vec!["a", "b"]);
    }

    #[test]
    fn text_filter_is_substring_match() {
        let devices = scenario();
        let out = filter(&devices, "switch", &LineSelection::new());
        assert_eq!(ids(&out), vec!["a"]);
    }

    #[test]
    fn line_filter_is_membership() {
        let devices = scenario();
        let lines: LineSelection = ["wireless"].into_iter().collect();
        assert_eq!(ids(&filter(&devices, "", &lines)), vec!["b"]);
    }

    #[test]
    fn predicates_combine_with_and() {
        let devices = scenario();
        let lines: LineSelection = ["wireless"].into_iter().collect();
        assert!(filter(&devices, "switch", &lines).is_empty());
    }

    #[test]
    fn filter_is_idempotent() {
        let devices = scenario();
        let lines: LineSelection = ["switching", "wireless"].into_iter().collect();
        let once = filter(&devices, "s", &lines);
        let twice = filter(&once, "s", &lines);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn tests_the_indexed_text_not_the_record() {
        let devices = scenario();
        let mut index = build_search_index(&devices);
        index[1].search_text = "renamed".to_owned();
        let out = filter_devices(&devices, &index, "renamed", &LineSelection::new());
        assert_eq!(ids(&out), vec!["b"]);
        assert!(filter_devices(&devices, &index, "access", &LineSelection::new()).is_empty());
    }

    #[test]
    fn empty_states_are_distinguishable() {
        let empty = FilteredView::default();
        assert_eq!(empty.empty_state(), Some(EmptyState::EmptyDataset));

        let narrowed = FilteredView {
            devices: Vec::new(),
            total_count: 2,
        };
        assert_eq!(narrowed.empty_state(), Some(EmptyState::NoMatches));

        let hits = FilteredView {
            devices: scenario(),
            total_count: 2,
        };
        assert_eq!(hits.empty_state(), None);
        assert_ne!(
            EmptyState::EmptyDataset.message(),
            EmptyState::NoMatches.message()
        );
    }

    #[test]
    fn count_label_pluralizes() {
        assert_eq!(count_label(0), "0 Devices");
        assert_eq!(count_label(1), "1 Device");
        assert_eq!(count_label(23), "23 Devices");
    }
}

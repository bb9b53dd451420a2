use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::model::DeviceRecord;

/// Default number of autocomplete suggestions.
pub const MAX_SUGGESTIONS: usize = 8;

/// Precomputed autocomplete entry for one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndexEntry {
    /// Stable key: the device id, or a synthetic one for id-less devices.
    pub id: String,
    pub label: String,
    pub secondary: String,
    pub search_text: String,
    /// Real device id, present only when the device can be navigated to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    pub line_id: String,
}

/// Build one entry per device, in dataset order.
///
/// Entry ids are unique: a synthetic id that would equal a real device id
/// (or an earlier synthetic one) is re-suffixed until it is free.
pub fn build_search_index(devices: &[Arc<DeviceRecord>]) -> Vec<SearchIndexEntry> {
    let mut taken: HashSet<String> = devices
        .iter()
        .filter_map(|device| device.id().map(str::to_owned))
        .collect();

    devices
        .iter()
        .enumerate()
        .map(|(index, device)| {
            let device_id = device.id().map(str::to_owned);
            let id = match &device_id {
                Some(id) => id.clone(),
                None => unique_id(&synthetic_id(device, index), &mut taken),
            };
            SearchIndexEntry {
                id,
                label: device.product_name().to_owned(),
                secondary: device.line_name().to_owned(),
                search_text: device.search_text(),
                device_id,
                line_id: device.line_id().to_owned(),
            }
        })
        .collect()
}

/// Key for a device without an id: `{lineId}-{productSlug}-{index}`.
pub(crate) fn synthetic_id(device: &DeviceRecord, index: usize) -> String {
    let slug = device
        .raw_product_name()
        .map(slugify)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "device".to_owned());
    format!("{}-{slug}-{index}", device.line_id())
}

fn unique_id(candidate: &str, taken: &mut HashSet<String>) -> String {
    let mut id = candidate.to_owned();
    let mut suffix = 2_usize;
    while taken.contains(&id) {
        id = format!("{candidate}-{suffix}");
        suffix += 1;
    }
    taken.insert(id.clone());
    id
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Autocomplete: entries whose search text contains the query.
///
/// The query is trimmed and lowercased. An empty query returns the first
/// `limit` entries. Results keep index order; there is no ranking.
pub fn suggest<'a>(
    index: &'a [SearchIndexEntry],
    raw_query: &str,
    limit: usize,
) -> Vec<&'a SearchIndexEntry> {
    let query = super::normalize_query(raw_query);
    index
        .iter()
        .filter(|entry| query.is_empty() || entry.search_text.contains(&query))
        .take(limit)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn devices() -> Vec<Arc<DeviceRecord>> {
        [
            json!({
                "id": "a",
                "product": { "name": "Switch Pro" },
                "line": { "id": "switching", "name": "Switching" },
            }),
            json!({
                "id": "b",
                "product": { "name": "Access Point" },
                "line": { "id": "wireless", "name": "Wireless" },
                "shortnames": ["U6LR"],
            }),
            json!({ "product": { "name": "Switch Flex XG" }, "line": { "id": "switching" } }),
            json!({}),
            json!({}),
        ]
        .into_iter()
        .map(|raw| Arc::new(DeviceRecord::from_value(raw)))
        .collect()
    }

    #[test]
    fn one_entry_per_device_in_order() {
        let index = build_search_index(&devices());
        assert_eq!(index.len(), 5);
        assert_eq!(index[0].id, "a");
        assert_eq!(index[0].label, "Switch Pro");
        assert_eq!(index[0].secondary, "Switching");
        assert_eq!(index[0].device_id.as_deref(), Some("a"));
        assert_eq!(index[1].id, "b");
    }

    #[test]
    fn id_less_devices_get_unique_synthetic_ids() {
        let index = build_search_index(&devices());
        assert_eq!(index[2].id, "switching-switch-flex-xg-2");
        assert_eq!(index[3].id, "line-device-3");
        assert_eq!(index[4].id, "line-device-4");
        assert!(index[3].device_id.is_none());

        let ids: HashSet<_> = index.iter().map(|e| &e.id).collect();
        assert_eq!(ids.len(), index.len());
    }

    #[test]
    fn synthetic_ids_avoid_real_ids() {
        let devices: Vec<_> = [
            json!({ "id": "line-device-1" }),
            json!({}),
            json!({ "id": "line-device-1-2" }),
        ]
        .into_iter()
        .map(|raw| Arc::new(DeviceRecord::from_value(raw)))
        .collect();

        let index = build_search_index(&devices);
        let ids: Vec<_> = index.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["line-device-1", "line-device-1-3", "line-device-1-2"]);
    }

    #[test]
    fn fallback_labels_for_empty_records() {
        let index = build_search_index(&devices());
        assert_eq!(index[3].label, "Unnamed device");
        assert_eq!(index[3].secondary, "Unknown line");
        assert_eq!(index[3].search_text, "");
    }

    #[test]
    fn empty_query_returns_first_entries() {
        let index = build_search_index(&devices());
        let hits = suggest(&index, "   ", 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "a");
        assert_eq!(hits[1].id, "b");
    }

    #[test]
    fn matches_substring_in_index_order() {
        let index = build_search_index(&devices());
        let ids: Vec<_> = suggest(&index, " SWITCH ", MAX_SUGGESTIONS)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "switching-switch-flex-xg-2"]);
    }

    #[test]
    fn matches_shortnames() {
        let index = build_search_index(&devices());
        let hits = suggest(&index, "u6lr", MAX_SUGGESTIONS);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "b");
    }

    #[test]
    fn limit_bounds_results() {
        let index = build_search_index(&devices());
        assert!(suggest(&index, "", 0).is_empty());
        assert_eq!(suggest(&index, "", 100).len(), index.len());
    }

    #[test]
    fn slug_collapses_punctuation() {
        assert_eq!(slugify("UniFi  Dream--Machine (Pro)"), "unifi-dream-machine-pro");
        assert_eq!(slugify("!!!"), "");
    }
}

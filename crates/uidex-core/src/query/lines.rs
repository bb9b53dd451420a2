use std::cmp::Ordering;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::DeviceRecord;

/// One product line present in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineOption {
    pub id: String,
    pub name: String,
    pub count: usize,
}

/// Group devices by line id, counting members.
///
/// The option name comes from the first device seen in each group. Options
/// are sorted by name, case-insensitively; equal names keep dataset
/// order.
pub fn build_line_options(devices: &[Arc<DeviceRecord>]) -> Vec<LineOption> {
    let mut groups: IndexMap<&str, LineOption> = IndexMap::new();

    for device in devices {
        groups
            .entry(device.line_id())
            .and_modify(|option| option.count += 1)
            .or_insert_with(|| LineOption {
                id: device.line_id().to_owned(),
                name: device.line_name().to_owned(),
                count: 1,
            });
    }

    let mut options: Vec<_> = groups.into_values().collect();
    // Stable sort: ties keep first-appearance order.
    options.sort_by(|a, b| compare_names(&a.name, &b.name));
    options
}

/// Locale-style name ordering: case-insensitive first, then lowercase
/// before uppercase for names that differ only in case.
pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| case_rank(a).cmp(&case_rank(b)))
}

fn case_rank(s: &str) -> Vec<bool> {
    s.chars().map(char::is_uppercase).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{FALLBACK_LINE_ID, FALLBACK_LINE_NAME};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn device(line_id: Option<&str>, line_name: Option<&str>) -> Arc<DeviceRecord> {
        let mut raw = json!({ "product": { "name": "Thing" } });
        if line_id.is_some() || line_name.is_some() {
            raw["line"] = json!({ "id": line_id, "name": line_name });
        }
        Arc::new(DeviceRecord::from_value(raw))
    }

    #[test]
    fn empty_dataset_has_no_options() {
        assert!(build_line_options(&[]).is_empty());
    }

    #[test]
    fn groups_and_sorts_by_name() {
        let devices = vec![
            device(Some("wireless"), Some("Wireless")),
            device(Some("switching"), Some("Switching")),
            device(Some("wireless"), Some("Wireless")),
        ];

        let options = build_line_options(&devices);
        assert_eq!(
            options,
            vec![
                LineOption {
                    id: "switching".into(),
                    name: "Switching".into(),
                    count: 1,
                },
                LineOption {
                    id: "wireless".into(),
                    name: "Wireless".into(),
                    count: 2,
                },
            ]
        );
    }

    #[test]
    fn counts_sum_to_dataset_size() {
        let devices = vec![
            device(Some("a"), Some("A")),
            device(None, None),
            device(Some("b"), None),
            device(None, Some("Orphan")),
            device(Some("a"), Some("A")),
        ];
        let total: usize = build_line_options(&devices).iter().map(|o| o.count).sum();
        assert_eq!(total, devices.len());
    }

    #[test]
    fn line_less_devices_share_fallback_group() {
        let devices = vec![device(None, None), device(None, None)];
        let options = build_line_options(&devices);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].id, FALLBACK_LINE_ID);
        assert_eq!(options[0].name, FALLBACK_LINE_NAME);
        assert_eq!(options[0].count, 2);
    }

    #[test]
    fn name_comes_from_first_device_in_group() {
        let devices = vec![
            device(Some("net"), Some("UniFi Network")),
            device(Some("net"), Some("Renamed")),
        ];
        assert_eq!(build_line_options(&devices)[0].name, "UniFi Network");
    }

    #[test]
    fn sort_is_case_insensitive_with_lowercase_first() {
        let devices = vec![
            device(Some("z"), Some("Zeta")),
            device(Some("up"), Some("AMPLIFI")),
            device(Some("low"), Some("amplifi")),
            device(Some("b"), Some("beta")),
        ];
        let ids: Vec<_> = build_line_options(&devices)
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["low", "up", "b", "z"]);
    }

    #[test]
    fn equal_names_keep_dataset_order() {
        let devices = vec![
            device(Some("second"), Some("Same")),
            device(Some("first"), Some("Same")),
        ];
        let ids: Vec<_> = build_line_options(&devices)
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["second", "first"]);
    }
}

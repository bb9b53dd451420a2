// ── Dataset loading ──
//
// The catalog document is `{ "devices": [...] }`. Anything that does not
// match that shape loads as an empty dataset rather than failing, so a bad
// file degrades to the "no devices" state instead of taking the UI down.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::DeviceRecord;

/// Dataset compiled into the binary.
pub const BUNDLED_DATASET: &str = include_str!("../data/devices.json");

/// Parse a dataset document from JSON text.
///
/// Invalid JSON yields an empty dataset.
pub fn parse_devices(json: &str) -> Vec<Arc<DeviceRecord>> {
    match serde_json::from_str::<Value>(json) {
        Ok(document) => parse_document(document),
        Err(e) => {
            warn!(error = %e, "dataset is not valid JSON, treating as empty");
            Vec::new()
        }
    }
}

/// Extract device records from an already-parsed document.
///
/// A missing or non-array `devices` key yields an empty dataset. Array
/// elements that are not objects become records with every field absent.
pub fn parse_document(document: Value) -> Vec<Arc<DeviceRecord>> {
    let Value::Object(mut root) = document else {
        warn!("dataset root is not an object, treating as empty");
        return Vec::new();
    };

    let Some(Value::Array(entries)) = root.remove("devices") else {
        warn!("dataset has no `devices` array, treating as empty");
        return Vec::new();
    };

    let devices: Vec<_> = entries
        .into_iter()
        .map(|entry| Arc::new(DeviceRecord::from_value(entry)))
        .collect();
    debug!(count = devices.len(), "parsed dataset");
    devices
}

/// Read and parse a dataset file.
///
/// Only I/O failures are errors; malformed content loads as empty.
pub fn load_devices(path: &Path) -> Result<Vec<Arc<DeviceRecord>>, CoreError> {
    let json = std::fs::read_to_string(path).map_err(|source| CoreError::DatasetUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = json.len(), "read dataset file");
    Ok(parse_devices(&json))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn bundled_dataset_parses() {
        let devices = parse_devices(BUNDLED_DATASET);
        assert!(!devices.is_empty());
        assert!(devices.iter().any(|d| d.id().is_none()));
    }

    #[test]
    fn invalid_json_is_empty() {
        assert!(parse_devices("{ not json").is_empty());
    }

    #[test]
    fn devices_must_be_an_array() {
        assert!(parse_devices(r#"{ "devices": { "a": 1 } }"#).is_empty());
        assert!(parse_devices(r#"{ "items": [] }"#).is_empty());
        assert!(parse_devices("[]").is_empty());
    }

    #[test]
    fn non_object_entries_become_empty_records() {
        let devices = parse_devices(r#"{ "devices": [1, null, { "id": "x" }] }"#);
        assert_eq!(devices.len(), 3);
        assert!(devices[0].id().is_none());
        assert!(devices[1].id().is_none());
        assert_eq!(devices[2].id(), Some("x"));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "devices": [{{ "id": "a" }}, {{ "id": "b" }}] }}"#).unwrap();

        let devices = load_devices(file.path()).unwrap();
        assert_eq!(devices.len(), 2);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_devices(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CoreError::DatasetUnreadable { .. }));
    }
}

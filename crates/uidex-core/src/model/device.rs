// ── Device record ──
//
// One entry of the catalog dataset. The dataset carries no schema, so every
// field is optional and display accessors resolve absent or blank values to
// fixed fallbacks. The source JSON object is kept verbatim for raw dumps.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub const FALLBACK_LINE_NAME: &str = "Unknown line";
pub const FALLBACK_PRODUCT_NAME: &str = "Unnamed device";
pub const FALLBACK_IDENTIFIER: &str = "Unknown identifier";

/// Grouping key shared by every device that has no line id.
pub const FALLBACK_LINE_ID: &str = "line";

/// Reference to the product line a device belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LineRef {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// Product naming for a device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductRef {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub abbrev: Option<String>,
}

/// Image fingerprints used to build thumbnail URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeviceImages {
    #[serde(default, deserialize_with = "lenient")]
    pub default: Option<String>,
}

/// Typed view of the fields the engine understands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordFields {
    #[serde(default, deserialize_with = "lenient")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    device_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    line: Option<LineRef>,
    #[serde(default, deserialize_with = "lenient")]
    product: Option<ProductRef>,
    #[serde(default, deserialize_with = "lenient")]
    images: Option<DeviceImages>,
    #[serde(default, deserialize_with = "lenient")]
    shortnames: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    sku: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    sysid: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    sysids: Option<Vec<String>>,
}

/// A single hardware record from the catalog.
///
/// Immutable once loaded. Serializes back to exactly the JSON object it was
/// read from, including fields the engine does not interpret.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRecord {
    fields: RecordFields,
    raw: Value,
}

impl DeviceRecord {
    /// Build a record from an arbitrary JSON value.
    ///
    /// Fields of the wrong JSON type are treated as absent. Values that are
    /// not objects produce a record with every field absent.
    pub fn from_value(raw: Value) -> Self {
        let fields = if raw.is_object() {
            RecordFields::deserialize(&raw).unwrap_or_default()
        } else {
            RecordFields::default()
        };
        Self { fields, raw }
    }

    /// The JSON object as it appeared in the dataset.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    // ── Raw field access ─────────────────────────────────────────────

    /// Catalog id, if present and non-empty. Devices without one have no
    /// detail page.
    pub fn id(&self) -> Option<&str> {
        self.fields.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn device_type(&self) -> Option<&str> {
        self.fields.device_type.as_deref()
    }

    pub fn line(&self) -> Option<&LineRef> {
        self.fields.line.as_ref()
    }

    pub fn product(&self) -> Option<&ProductRef> {
        self.fields.product.as_ref()
    }

    pub fn images(&self) -> Option<&DeviceImages> {
        self.fields.images.as_ref()
    }

    pub fn shortnames(&self) -> &[String] {
        self.fields.shortnames.as_deref().unwrap_or_default()
    }

    pub fn sku(&self) -> Option<&str> {
        self.fields.sku.as_deref()
    }

    pub fn sysid(&self) -> Option<&str> {
        self.fields.sysid.as_deref()
    }

    pub fn sysids(&self) -> &[String] {
        self.fields.sysids.as_deref().unwrap_or_default()
    }

    /// Fingerprint fragment of the default product image.
    pub fn image_fingerprint(&self) -> Option<&str> {
        self.images()
            .and_then(|images| images.default.as_deref())
            .filter(|fp| !fp.is_empty())
    }

    // ── Display accessors ────────────────────────────────────────────

    /// Trimmed line name, or [`FALLBACK_LINE_NAME`].
    pub fn line_name(&self) -> &str {
        self.raw_line_name().unwrap_or(FALLBACK_LINE_NAME)
    }

    /// Trimmed product name, or [`FALLBACK_PRODUCT_NAME`].
    pub fn product_name(&self) -> &str {
        self.raw_product_name().unwrap_or(FALLBACK_PRODUCT_NAME)
    }

    /// Line id, falling back to the device id, then [`FALLBACK_IDENTIFIER`].
    pub fn identifier(&self) -> &str {
        self.line()
            .and_then(|line| non_blank(line.id.as_deref()))
            .or_else(|| non_blank(self.fields.id.as_deref()))
            .unwrap_or(FALLBACK_IDENTIFIER)
    }

    /// Canonical short name (first entry of `shortnames`).
    pub fn short_name(&self) -> Option<&str> {
        non_blank(self.shortnames().first().map(String::as_str))
    }

    /// Caption under a grid card: short name, then product abbrev, then SKU,
    /// then [`identifier`](Self::identifier).
    pub fn card_caption(&self) -> &str {
        self.short_name()
            .or_else(|| self.product().and_then(|p| non_blank(p.abbrev.as_deref())))
            .or_else(|| non_blank(self.sku()))
            .unwrap_or_else(|| self.identifier())
    }

    /// Key used to group devices by line. Every device maps to exactly one
    /// group; devices without a line id share [`FALLBACK_LINE_ID`].
    pub fn line_id(&self) -> &str {
        self.line()
            .and_then(|line| non_blank(line.id.as_deref()))
            .unwrap_or(FALLBACK_LINE_ID)
    }

    /// Lowercase haystack for substring search: product name and abbrev,
    /// line name, and every short name. Fallback strings are not included.
    pub fn search_text(&self) -> String {
        let product = self.product();
        let parts = [
            product.and_then(|p| non_blank(p.name.as_deref())),
            product.and_then(|p| non_blank(p.abbrev.as_deref())),
            self.raw_line_name(),
        ];

        parts
            .into_iter()
            .flatten()
            .chain(self.shortnames().iter().filter_map(|s| non_blank(Some(s))))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    pub(crate) fn raw_product_name(&self) -> Option<&str> {
        self.product().and_then(|p| non_blank(p.name.as_deref()))
    }

    pub(crate) fn raw_line_name(&self) -> Option<&str> {
        self.line().and_then(|l| non_blank(l.name.as_deref()))
    }
}

impl Serialize for DeviceRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DeviceRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Trim, treating the empty result as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Decode a field, mapping type mismatches (and `null`) to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

// ── Device detail projection ──

use serde::Serialize;

use crate::model::DeviceRecord;
use crate::thumbnail::{ImageProxy, placeholder_glyph};

/// Value shown for any attribute the dataset does not carry.
pub const NOT_SPECIFIED: &str = "Not specified";

/// One labelled row of the detail page's specs table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecRow {
    pub label: &'static str,
    pub value: String,
}

/// Hero image, or the glyph to draw in its place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HeroImage {
    Url(String),
    Placeholder(String),
}

/// Everything the detail page renders for one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetail {
    pub product_name: String,
    pub line_name: String,
    pub identifier: String,
    pub short_name: String,
    pub hero: HeroImage,
    pub specs: Vec<SpecRow>,
    /// Record as it appears in the dataset, pretty-printed.
    #[serde(skip)]
    pub raw_json: String,
}

impl DeviceDetail {
    pub fn new(device: &DeviceRecord, images: &ImageProxy, hero_size: u32) -> Self {
        let product_name = device.product_name().to_owned();
        let line_name = device.line_name().to_owned();
        let identifier = device.identifier().to_owned();
        let short_name = device.short_name().unwrap_or(NOT_SPECIFIED).to_owned();

        let hero = images.thumbnail_url(device, hero_size).map_or_else(
            || HeroImage::Placeholder(placeholder_glyph(device)),
            HeroImage::Url,
        );

        let specs = vec![
            SpecRow {
                label: "Product Line",
                value: line_name.clone(),
            },
            SpecRow {
                label: "ID",
                value: identifier.clone(),
            },
            SpecRow {
                label: "Name",
                value: product_name.clone(),
            },
            SpecRow {
                label: "Short Name",
                value: short_name.clone(),
            },
            SpecRow {
                label: "Max. Power",
                value: NOT_SPECIFIED.to_owned(),
            },
            SpecRow {
                label: "Speed",
                value: NOT_SPECIFIED.to_owned(),
            },
            SpecRow {
                label: "Number of Ports",
                value: NOT_SPECIFIED.to_owned(),
            },
        ];

        // serde_json's pretty printer indents with two spaces.
        let raw_json = serde_json::to_string_pretty(device.raw()).unwrap_or_default();

        Self {
            product_name,
            line_name,
            identifier,
            short_name,
            hero,
            specs,
            raw_json,
        }
    }
}

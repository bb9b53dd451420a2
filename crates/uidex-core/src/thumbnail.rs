// ── Thumbnails ──
//
// Product images are served through an image proxy that takes the source
// PNG URL percent-encoded in `u`, plus width and quality. No I/O happens
// here; callers get a URL string or a placeholder glyph.

use serde::{Deserialize, Serialize};

use crate::model::{DeviceRecord, non_blank};

/// Width of list-row thumbnails, in pixels.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 25;
/// Width of grid-card images, in pixels.
pub const GRID_THUMBNAIL_SIZE: u32 = 128;
/// Width of the detail-page hero image, in pixels.
pub const HERO_IMAGE_SIZE: u32 = 256;
pub const DEFAULT_IMAGE_QUALITY: u8 = 75;
pub const DEFAULT_PROXY_BASE: &str = "https://images.svc.ui.com/";
pub const DEFAULT_SOURCE_BASE: &str = "https://static.ui.com/fingerprint/ui/images";

/// Glyph shown when a device has nothing to derive one from.
pub const FALLBACK_GLYPH: &str = "U";

/// Image proxy endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageProxy {
    pub proxy_base: String,
    pub source_base: String,
    pub quality: u8,
}

impl Default for ImageProxy {
    fn default() -> Self {
        Self {
            proxy_base: DEFAULT_PROXY_BASE.to_owned(),
            source_base: DEFAULT_SOURCE_BASE.to_owned(),
            quality: DEFAULT_IMAGE_QUALITY,
        }
    }
}

impl ImageProxy {
    /// Unproxied PNG location, when the device has both an id and an image
    /// fingerprint.
    pub fn source_url(&self, device: &DeviceRecord) -> Option<String> {
        let id = device.id()?;
        let fingerprint = device.image_fingerprint()?;
        let base = self.source_base.trim_end_matches('/');
        Some(format!("{base}/{id}/default/{fingerprint}.png"))
    }

    /// Proxied thumbnail URL at `size` pixels wide.
    pub fn thumbnail_url(&self, device: &DeviceRecord, size: u32) -> Option<String> {
        let source = self.source_url(device)?;
        Some(format!(
            "{}?u={}&w={size}&q={}",
            self.proxy_base,
            urlencoding::encode(&source),
            self.quality
        ))
    }
}

/// Thumbnail URL through the default proxy.
pub fn thumbnail_url(device: &DeviceRecord, size: u32) -> Option<String> {
    ImageProxy::default().thumbnail_url(device, size)
}

/// Uppercase first character of the product name, line name, or first
/// short name, whichever is present first; otherwise [`FALLBACK_GLYPH`].
pub fn placeholder_glyph(device: &DeviceRecord) -> String {
    device
        .raw_product_name()
        .or_else(|| device.raw_line_name())
        .or_else(|| non_blank(device.shortnames().first().map(String::as_str)))
        .and_then(|name| name.chars().next())
        .map_or_else(|| FALLBACK_GLYPH.to_owned(), |c| c.to_uppercase().collect())
}

// ── Runtime catalog configuration ──
//
// Tuning for query evaluation and image URLs. Never touches disk; the
// binaries build one from `uidex-config` and hand it in.

use std::time::Duration;

use crate::query::MAX_SUGGESTIONS;
use crate::thumbnail::{DEFAULT_THUMBNAIL_SIZE, HERO_IMAGE_SIZE, ImageProxy};

/// Default settle interval for the query worker.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub suggestion_limit: usize,
    pub thumbnail_size: u32,
    pub hero_image_size: u32,
    /// How long the query worker waits for input to go quiet before
    /// recomputing. Zero recomputes on every change.
    pub settle: Duration,
    pub images: ImageProxy,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            suggestion_limit: MAX_SUGGESTIONS,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            hero_image_size: HERO_IMAGE_SIZE,
            settle: DEFAULT_SETTLE,
            images: ImageProxy::default(),
        }
    }
}

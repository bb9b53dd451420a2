//! Device Query Engine over the UniFi hardware catalog.
//!
//! Shared by the `uidex` CLI and the `uidex-tui` terminal browser:
//!
//! - **[`Catalog`]**: the read-only device snapshot (`Arc<Vec<Arc<DeviceRecord>>>`)
//!   with the search index and line options memoized beside it. The dataset
//!   compiled into the binary is available through [`Catalog::bundled()`].
//!
//! - **Queries** ([`query`]): pure functions for line grouping
//!   ([`build_line_options`]), autocomplete ([`build_search_index`],
//!   [`suggest`]), and the combined text + line filter ([`filter_devices`]).
//!
//! - **[`QueryWorker`]**: coalescing recomputation task fed through a
//!   single-slot `watch` mailbox, publishing [`QueryView`]s on a
//!   [`ViewStream`].
//!
//! - **Presentation helpers**: thumbnail URLs and placeholder glyphs
//!   ([`thumbnail`]), the list/grid [`ViewMode`] and its URL parameter, and
//!   the [`DeviceDetail`] projection.

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod detail;
pub mod error;
pub mod model;
pub mod query;
pub mod stream;
pub mod thumbnail;
pub mod view_mode;
pub mod worker;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::Catalog;
pub use config::CatalogConfig;
pub use detail::{DeviceDetail, HeroImage, NOT_SPECIFIED, SpecRow};
pub use error::CoreError;
pub use model::{
    DeviceImages, DeviceRecord, FALLBACK_IDENTIFIER, FALLBACK_LINE_ID, FALLBACK_LINE_NAME,
    FALLBACK_PRODUCT_NAME, LineRef, ProductRef,
};
pub use query::{
    EmptyState, FilteredView, LineOption, LineSelection, MAX_SUGGESTIONS, QueryState, QueryView,
    SearchIndexEntry, build_line_options, build_search_index, count_label, filter_devices,
    normalize_query, suggest,
};
pub use stream::ViewStream;
pub use thumbnail::{
    DEFAULT_THUMBNAIL_SIZE, GRID_THUMBNAIL_SIZE, HERO_IMAGE_SIZE, ImageProxy, placeholder_glyph,
    thumbnail_url,
};
pub use view_mode::{VIEW_PARAM, ViewMode};
pub use worker::QueryWorker;

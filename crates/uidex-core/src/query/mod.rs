// ── Query evaluation ──
//
// Pure functions over a device slice: line grouping, autocomplete, and the
// combined text + line filter. The catalog memoizes the derived indices.

mod filter;
mod lines;
mod search;
mod state;

use serde::Serialize;

pub use filter::{EmptyState, FilteredView, count_label, filter_devices};
pub use lines::{LineOption, build_line_options};
pub use search::{MAX_SUGGESTIONS, SearchIndexEntry, build_search_index, suggest};
pub use state::{LineSelection, QueryState};

/// Trim and lowercase raw search input.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Everything a device list needs to render one query state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryView {
    pub state: QueryState,
    pub suggestions: Vec<SearchIndexEntry>,
    #[serde(skip)]
    pub filtered: FilteredView,
}

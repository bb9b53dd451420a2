//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use uidex_core::QueryView;

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Render,

    // ── Navigation ────────────────────────────────────────────────
    OpenDetail(String),
    GoBack,
    ToggleHelp,

    // ── Query (forwarded to the query worker) ─────────────────────
    SetSearch(String),
    ToggleLine(String),
    ResetLines,
    ToggleViewMode,

    // ── Data Events (from the query worker) ───────────────────────
    ViewUpdated(Arc<QueryView>),
}

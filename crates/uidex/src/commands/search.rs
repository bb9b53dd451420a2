//! Autocomplete suggestions.

use tabled::Tabled;
use uidex_core::{Catalog, SearchIndexEntry};

use crate::cli::SearchArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct SuggestionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    label: String,
    #[tabled(rename = "Product Line")]
    secondary: String,
}

impl From<&SearchIndexEntry> for SuggestionRow {
    fn from(e: &SearchIndexEntry) -> Self {
        Self {
            id: e.device_id.clone().unwrap_or_else(|| "-".into()),
            label: e.label.clone(),
            secondary: e.secondary.clone(),
        }
    }
}

pub fn handle(catalog: &Catalog, args: &SearchArgs, settings: &Settings) -> Result<(), CliError> {
    let limit = args.limit.unwrap_or(settings.catalog.suggestion_limit);
    let hits = catalog.suggest(&args.query, limit);
    tracing::debug!(query = %args.query, limit, hits = hits.len(), "suggestions");

    let out = output::render_list(
        settings.output,
        &hits,
        |e| SuggestionRow::from(*e),
        |e| e.id.clone(),
    )?;
    output::print_output(&out, settings.quiet);
    Ok(())
}

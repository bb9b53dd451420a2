//! Product line listing.

use tabled::Tabled;
use uidex_core::{Catalog, LineOption};

use crate::config::Settings;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Devices")]
    count: usize,
}

impl From<&LineOption> for LineRow {
    fn from(o: &LineOption) -> Self {
        Self {
            id: o.id.clone(),
            name: o.name.clone(),
            count: o.count,
        }
    }
}

pub fn handle(catalog: &Catalog, settings: &Settings) -> Result<(), CliError> {
    let out = output::render_list(
        settings.output,
        catalog.line_options(),
        |o| LineRow::from(o),
        |o| o.id.clone(),
    )?;
    output::print_output(&out, settings.quiet);
    Ok(())
}

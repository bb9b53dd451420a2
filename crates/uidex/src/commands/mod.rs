//! Command dispatch: bridges CLI args -> catalog queries -> output formatting.

pub mod config_cmd;
pub mod devices;
pub mod lines;
pub mod search;

use uidex_core::Catalog;

use crate::cli::Command;
use crate::config::Settings;
use crate::error::CliError;

/// Dispatch a catalog-bound command to the appropriate handler.
pub fn dispatch(cmd: Command, catalog: &Catalog, settings: &Settings) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(catalog, args, settings),
        Command::Lines => lines::handle(catalog, settings),
        Command::Search(args) => search::handle(catalog, &args, settings),
        // Handled in main before the catalog is loaded.
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}

//! Clap derive structures for the `uidex` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Also compiled by `build.rs` for man page generation, so it may only
//! depend on `clap` and `clap_complete`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// uidex -- browse the UniFi hardware catalog
#[derive(Debug, Parser)]
#[command(
    name = "uidex",
    version,
    about = "Search and browse the UniFi hardware catalog",
    long_about = "Query a local copy of the UniFi hardware catalog.\n\n\
        Lists devices with substring search and product line filters,\n\
        shows per-device details, and builds product image URLs.\n\
        The catalog ships inside the binary; --dataset loads another file.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Dataset file to load instead of the bundled catalog
    #[arg(long, short = 'd', env = "UIDEX_DATASET", global = true)]
    pub dataset: Option<PathBuf>,

    /// Output format [default: table, or defaults.output from config]
    #[arg(long, short = 'o', env = "UIDEX_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: auto, or defaults.color from config]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Device list layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    /// One row per device
    List,
    /// Cards with image and caption
    Grid,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List, inspect, and locate images for catalog devices
    #[command(alias = "dev")]
    Devices(DevicesArgs),

    /// List product lines with device counts
    Lines,

    /// Autocomplete suggestions for a search query
    #[command(alias = "s")]
    Search(SearchArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices matching a search and line filter
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show device details
    Get {
        /// Device ID
        id: String,

        /// Print only the raw dataset record as JSON
        #[arg(long)]
        raw: bool,
    },

    /// Print the product image URL for a device
    #[command(alias = "thumb")]
    Thumbnail {
        /// Device ID
        id: String,

        /// Image width in pixels [default: catalog.thumbnail_size]
        #[arg(long, conflicts_with_all = ["hero", "grid"])]
        size: Option<u32>,

        /// Use the detail hero size (catalog.hero_image_size)
        #[arg(long, conflicts_with = "grid")]
        hero: bool,

        /// Use the grid card size (128 px)
        #[arg(long)]
        grid: bool,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive substring to match against names and short names
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Product line id to include (repeatable; default: all lines)
    #[arg(long = "line", short = 'l', value_name = "LINE_ID")]
    pub lines: Vec<String>,

    /// Layout for table output [default: defaults.view from config]
    #[arg(long)]
    pub view: Option<ViewArg>,
}

// ── Search ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Query text (empty lists the first entries)
    #[arg(default_value = "")]
    pub query: String,

    /// Maximum number of suggestions [default: catalog.suggestion_limit]
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display current resolved configuration
    Show,

    /// Write a config file populated with the defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn repeated_line_flags_collect() {
        let cli = Cli::try_parse_from([
            "uidex",
            "devices",
            "list",
            "-l",
            "unifi-network",
            "--line",
            "uisp",
        ]);
        match cli.map(|c| c.command) {
            Ok(Command::Devices(DevicesArgs {
                command: DevicesCommand::List(list),
            })) => assert_eq!(list.lines, vec!["unifi-network", "uisp"]),
            other => panic!("unexpected parse result: {other:?}"),
        }
    }

    #[test]
    fn size_conflicts_with_hero() {
        let res = Cli::try_parse_from([
            "uidex",
            "devices",
            "thumbnail",
            "x",
            "--size",
            "64",
            "--hero",
        ]);
        assert!(res.is_err());
    }
}

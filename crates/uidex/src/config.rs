//! CLI configuration: thin wrapper around `uidex_config` shared types.
//!
//! Re-exports the shared types and resolves the effective settings, letting
//! `GlobalOpts` flags override config-file values.

use std::path::PathBuf;

use clap::ValueEnum;

use uidex_core::{CatalogConfig, ViewMode};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat, ViewArg};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use uidex_config::{Config, config_path, load_config, save_config_to};

// ── Resolved settings ───────────────────────────────────────────────

/// Everything a command handler needs to know about how to run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub dataset: Option<PathBuf>,
    pub output: OutputFormat,
    pub color: ColorMode,
    pub view: ViewMode,
    pub quiet: bool,
    pub catalog: CatalogConfig,
}

impl Settings {
    /// Merge config-file values with flag overrides (flag > env > file).
    pub fn resolve(global: &GlobalOpts, cfg: &Config) -> Result<Self, CliError> {
        let output = match global.output {
            Some(output) => output,
            None => parse_enum::<OutputFormat>("defaults.output", &cfg.defaults.output)?,
        };
        let color = match global.color {
            Some(color) => color,
            None => parse_enum::<ColorMode>("defaults.color", &cfg.defaults.color)?,
        };

        Ok(Self {
            dataset: global.dataset.clone().or_else(|| cfg.dataset.clone()),
            output,
            color,
            view: cfg.defaults.view,
            quiet: global.quiet,
            catalog: cfg.to_catalog_config(),
        })
    }
}

impl From<ViewArg> for ViewMode {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::List => ViewMode::List,
            ViewArg::Grid => ViewMode::Grid,
        }
    }
}

fn parse_enum<T: ValueEnum>(field: &str, value: &str) -> Result<T, CliError> {
    T::from_str(value, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["uidex"];
        argv.extend_from_slice(args);
        argv.push("lines");
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn config_defaults_apply_without_flags() {
        let mut cfg = Config::default();
        cfg.defaults.output = "yaml".into();
        cfg.defaults.view = ViewMode::Grid;
        cfg.dataset = Some(PathBuf::from("/data/devices.json"));

        let settings = Settings::resolve(&global(&[]), &cfg).unwrap();
        assert_eq!(settings.output, OutputFormat::Yaml);
        assert_eq!(settings.color, ColorMode::Auto);
        assert_eq!(settings.view, ViewMode::Grid);
        assert_eq!(settings.dataset, Some(PathBuf::from("/data/devices.json")));
    }

    #[test]
    fn flags_override_config() {
        let mut cfg = Config::default();
        cfg.defaults.output = "yaml".into();
        cfg.dataset = Some(PathBuf::from("/data/devices.json"));

        let settings = Settings::resolve(
            &global(&["-o", "json", "--color", "never", "--dataset", "/x.json"]),
            &cfg,
        )
        .unwrap();
        assert_eq!(settings.output, OutputFormat::Json);
        assert_eq!(settings.color, ColorMode::Never);
        assert_eq!(settings.dataset, Some(PathBuf::from("/x.json")));
    }

    #[test]
    fn bad_config_value_is_a_usage_error() {
        let mut cfg = Config::default();
        cfg.defaults.output = "xml".into();
        let err = Settings::resolve(&global(&[]), &cfg).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }
}

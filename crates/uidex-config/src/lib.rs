//! Shared configuration for the uidex CLI and TUI.
//!
//! A TOML file at the platform config dir, layered over built-in defaults
//! and under `UIDEX_`-prefixed environment variables, translated into
//! `uidex_core::CatalogConfig`. Both binaries depend on this crate; the CLI
//! applies its flag overrides on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use uidex_core::config::DEFAULT_SETTLE;
use uidex_core::{
    CatalogConfig, DEFAULT_THUMBNAIL_SIZE, HERO_IMAGE_SIZE, ImageProxy, MAX_SUGGESTIONS, ViewMode,
};

/// Prefix for environment overrides. Nested keys use `__`, e.g.
/// `UIDEX_CATALOG__SUGGESTION_LIMIT=5`.
pub const ENV_PREFIX: &str = "UIDEX_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Dataset file to load instead of the bundled catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<PathBuf>,

    /// Presentation defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Query engine tuning.
    #[serde(default)]
    pub catalog: CatalogSection,

    /// Image proxy endpoints.
    #[serde(default)]
    pub images: ImageProxy,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub view: ViewMode,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            view: ViewMode::default(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogSection {
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// List thumbnail width in pixels.
    #[serde(default = "default_thumbnail_size")]
    pub thumbnail_size: u32,

    /// Detail hero image width in pixels.
    #[serde(default = "default_hero_image_size")]
    pub hero_image_size: u32,

    /// Query worker settle interval (TUI).
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            suggestion_limit: default_suggestion_limit(),
            thumbnail_size: default_thumbnail_size(),
            hero_image_size: default_hero_image_size(),
            settle_ms: default_settle_ms(),
        }
    }
}

fn default_suggestion_limit() -> usize {
    MAX_SUGGESTIONS
}
fn default_thumbnail_size() -> u32 {
    DEFAULT_THUMBNAIL_SIZE
}
fn default_hero_image_size() -> u32 {
    HERO_IMAGE_SIZE
}
fn default_settle_ms() -> u64 {
    u64::try_from(DEFAULT_SETTLE.as_millis()).unwrap_or(60)
}

impl Config {
    /// Check value ranges that the TOML types alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.thumbnail_size == 0 {
            return Err(invalid("catalog.thumbnail_size", "must be at least 1"));
        }
        if self.catalog.hero_image_size == 0 {
            return Err(invalid("catalog.hero_image_size", "must be at least 1"));
        }
        if !(1..=100).contains(&self.images.quality) {
            return Err(invalid("images.quality", "must be between 1 and 100"));
        }
        if self.images.proxy_base.trim().is_empty() {
            return Err(invalid("images.proxy_base", "must not be empty"));
        }
        Ok(())
    }

    /// Engine configuration derived from this file.
    pub fn to_catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            suggestion_limit: self.catalog.suggestion_limit,
            thumbnail_size: self.catalog.thumbnail_size,
            hero_image_size: self.catalog.hero_image_size,
            settle: Duration::from_millis(self.catalog.settle_ms),
            images: self.images.clone(),
        }
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "uidex", "uidex").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("uidex");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path + environment. A missing file is not an
/// error; the defaults and environment still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

/// Load config, returning the defaults if anything goes wrong.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

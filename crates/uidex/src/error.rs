//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use uidex_config::ConfigError;
use uidex_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Dataset ──────────────────────────────────────────────────────

    #[error("Cannot read dataset {}", path.display())]
    #[diagnostic(
        code(uidex::dataset_unreadable),
        help(
            "Check the path passed to --dataset (or UIDEX_DATASET / `dataset` in the config).\n\
             Omit it to use the bundled catalog."
        )
    )]
    DatasetUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(uidex::not_found),
        help("Run: uidex {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Device '{identifier}' has no product image")]
    #[diagnostic(
        code(uidex::no_image),
        help("Devices without an image show the placeholder glyph '{glyph}'.")
    )]
    NoImage { identifier: String, glyph: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(uidex::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration file already exists at {}", path.display())]
    #[diagnostic(
        code(uidex::config_exists),
        help("Pass --force to overwrite it, or edit it directly.")
    )]
    ConfigExists { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(
        code(uidex::config),
        help("Run `uidex config path` to locate the file, or `uidex config init --force` to reset it.")
    )]
    Config(#[from] ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(uidex::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(uidex::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to render TOML: {0}")]
    #[diagnostic(code(uidex::toml))]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    pub fn device_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: "device".into(),
            identifier: identifier.into(),
            list_command: "devices list".into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DatasetUnreadable { path, source } => {
                CliError::DatasetUnreadable { path, source }
            }
            CoreError::DeviceNotFound { identifier } => CliError::device_not_found(identifier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(CliError::device_not_found("x").exit_code(), exit_code::NOT_FOUND);
        assert_eq!(
            CliError::Validation {
                field: "f".into(),
                reason: "r".into(),
            }
            .exit_code(),
            exit_code::USAGE
        );
        assert_eq!(
            CliError::ConfigExists {
                path: PathBuf::from("/tmp/x"),
            }
            .exit_code(),
            exit_code::GENERAL
        );
    }

    #[test]
    fn core_not_found_maps_to_not_found() {
        let err: CliError = CoreError::DeviceNotFound {
            identifier: "abc".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(err.to_string(), "device 'abc' not found");
    }
}

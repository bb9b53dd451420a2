// ── Core error types ──
//
// The engine itself never fails: malformed data degrades to fallbacks or an
// empty dataset. These variants cover the edges where a caller wants a
// `Result` instead.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot read dataset at {}: {source}", path.display())]
    DatasetUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Device not found: {identifier}")]
    DeviceNotFound { identifier: String },
}

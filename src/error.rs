use std::path::PathBuf;
use thiserror::Error;

/// The main error type for galcat operations.
#[derive(Debug, Error)]
pub enum GalcatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("catalog partition unavailable at {path}: {message}")]
    StorageUnavailable { path: PathBuf, message: String },

    #[error("checksum mismatch for '{name}': expected {expected}, found {actual}")]
    ChecksumMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error(
        "schema mismatch in partition '{partition}': expected columns {expected:?}, found {found:?}"
    )]
    SchemaMismatch {
        partition: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("download failed for '{url}': {message}")]
    Download { url: String, message: String },
}

impl GalcatError {
    /// Shorthand for a [`GalcatError::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        GalcatError::InvalidArgument {
            message: message.into(),
        }
    }
}

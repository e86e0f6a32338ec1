//! Error types for journal-fs

use std::path::PathBuf;

/// Result type for journal-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in journal-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Failed to serialize JSON for {path}: {message}")]
    ConfigSerialize { path: PathBuf, message: String },

    #[error("Invalid relative path '{path}': {reason}")]
    InvalidRelativePath { path: String, reason: String },

    #[error("Invalid content fingerprint '{value}': expected 64 lowercase hex characters")]
    InvalidFingerprint { value: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying I/O error is `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

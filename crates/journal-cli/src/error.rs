//! Error types for journal-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from journal-core
    #[error(transparent)]
    Core(#[from] journal_core::Error),

    /// Error from journal-templates, usually an invalid selection
    #[error(transparent)]
    Templates(#[from] journal_templates::Error),

    /// Error from journal-fs
    #[error(transparent)]
    Fs(#[from] journal_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}

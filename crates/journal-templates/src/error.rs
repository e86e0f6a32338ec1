//! Error types for journal-templates

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unknown framework or IDE identifier.
    #[error("Invalid {kind}: '{value}'. Must be one of: {allowed}")]
    InvalidSelection {
        kind: &'static str,
        value: String,
        allowed: String,
    },

    #[error("Template {path} still contains placeholder {token} after rendering")]
    UnresolvedPlaceholder { path: String, token: String },

    #[error("Template path {path} is produced twice in one catalog resolution")]
    DuplicatePath { path: String },

    #[error("Filesystem error: {0}")]
    Fs(#[from] journal_fs::Error),
}

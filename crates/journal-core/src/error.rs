//! Error types for journal-core

use std::path::PathBuf;

/// Result type for journal-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in journal-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Persisted manifest could not be parsed.
    ///
    /// Never returned from a sync: the engine recovers by migrating.
    #[error("Manifest at {path} is corrupt: {message}")]
    ManifestCorrupt { path: PathBuf, message: String },

    /// A managed destination exists but the manifest has never tracked it.
    #[error(
        "{path} already exists and is not tracked by the manifest; \
         re-run with --force to back it up and replace it"
    )]
    UntrackedExistingFile { path: String },

    /// The backup bundle directory already exists.
    #[error("Backup bundle {path} already exists; refusing to merge into it")]
    BackupCollision { path: PathBuf },

    #[error("Backup bundle not found: {id}")]
    BackupNotFound { id: String },

    #[error("Refusing to restore {path}: it resolves outside the journal")]
    UnsafeRestorePath { path: String },

    #[error("Journal not found at {path}")]
    JournalNotFound { path: PathBuf },

    #[error("Destination {path} already exists and is not empty")]
    DestinationNotEmpty { path: PathBuf },

    #[error("Cannot move journal to {path}: {reason}")]
    InvalidMoveTarget { path: PathBuf, reason: String },

    #[error("Journal profile not found: {name}")]
    ProfileNotFound { name: String },

    #[error("Journal profile already exists: {name}")]
    ProfileExists { name: String },

    #[error("No journal is set up yet")]
    NoActiveJournal,

    /// Symbolic links can only be carried over on Unix.
    #[error("Cannot move symbolic link {path} on this platform")]
    SymlinkNotSupported { path: PathBuf },

    #[error("Template not found: {name}. Available: {available}")]
    TemplateNotFound { name: String, available: String },

    #[error("Invalid date '{value}': expected YYYY-MM-DD or a relative form like 7d, 2w, 1m")]
    InvalidDate { value: String },

    #[error("Invalid search: {message}")]
    InvalidSearch { message: String },

    // Transparent wrappers for underlying crate errors
    /// Template catalog error, including invalid selections
    #[error(transparent)]
    Templates(#[from] journal_templates::Error),

    /// Filesystem error from journal-fs, carrying the offending path
    #[error(transparent)]
    Fs(#[from] journal_fs::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

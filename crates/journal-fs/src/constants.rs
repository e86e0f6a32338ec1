//! Well-known names inside a journal directory.

use std::path::Path;

/// Standard journal filesystem markers and paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalPath {
    /// The persisted manifest of tool-installed files
    Manifest,
    /// Root of timestamped backup bundles
    BackupsDir,
    /// User-owned AI preference overrides, never touched by sync
    AiInstructionsDir,
    /// Per-journal template overrides, read in place of the bundled bodies
    CustomTemplatesDir,
}

impl JournalPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manifest => ".system-manifest.json",
            Self::BackupsDir => ".framework-backups",
            Self::AiInstructionsDir => ".ai-instructions",
            Self::CustomTemplatesDir => ".ai-instructions/templates",
        }
    }
}

impl AsRef<Path> for JournalPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for JournalPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for JournalPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

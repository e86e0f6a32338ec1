//! [`TestJournal`] builder for sync and CLI scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use journal_fs::{JournalPath, NormalizedPath};
use tempfile::TempDir;

/// A temporary journal directory, plus a separate scratch config directory
/// for tests that drive the binary.
///
/// # Example
///
/// ```rust,no_run
/// use journal_test_utils::TestJournal;
///
/// let journal = TestJournal::new();
/// journal.write("daily/2026-10-16.md", "# Today");
/// journal.assert_file_contains("daily/2026-10-16.md", "Today");
/// ```
pub struct TestJournal {
    temp_dir: TempDir,
    config_dir: TempDir,
}

impl Default for TestJournal {
    fn default() -> Self {
        Self::new()
    }
}

impl TestJournal {
    /// Create an empty journal directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
            config_dir: TempDir::new().unwrap(),
        }
    }

    /// Root of the journal.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Root as a [`NormalizedPath`].
    pub fn path(&self) -> NormalizedPath {
        NormalizedPath::new(self.root())
    }

    /// Default manifest location inside the journal.
    pub fn manifest_path(&self) -> NormalizedPath {
        self.path().join(JournalPath::Manifest.as_str())
    }

    /// Scratch directory to point `JOURNAL_KIT_CONFIG_DIR` at.
    pub fn config_dir(&self) -> &Path {
        self.config_dir.path()
    }

    /// Write `content` to `path` (relative to the journal root), creating parents.
    pub fn write(&self, path: &str, content: impl AsRef<[u8]>) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {e}", full_path.display()));
    }

    /// Read `path` (relative to the journal root) as text.
    pub fn read(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Read `path` (relative to the journal root) as bytes.
    pub fn read_bytes(&self, path: &str) -> Vec<u8> {
        let full_path = self.root().join(path);
        fs::read(&full_path).unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Overwrite the manifest with bytes that are not JSON.
    pub fn corrupt_manifest(&self) {
        self.write(JournalPath::Manifest.as_str(), b"\xff\xfe{{ definitely not json");
    }

    /// Backup bundle directories, oldest first.
    pub fn bundle_dirs(&self) -> Vec<PathBuf> {
        let backups = self.root().join(JournalPath::BackupsDir.as_str());
        let Ok(entries) = fs::read_dir(&backups) else {
            return Vec::new();
        };
        let mut dirs: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        dirs.sort();
        dirs
    }

    /// Assert that `path` (relative to the journal root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the journal root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` contains `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "File {path} does not contain expected content.\nExpected: {content}\nActual: {file_content}"
        );
    }
}

//! Timestamped backup bundles
//!
//! A bundle is a directory under `<journal>/.framework-backups/` named
//! `YYYYMMDD-HHMMSS-ffffff`, holding verbatim copies of files at their
//! journal-relative paths. Bundles are never reused or modified.

use std::fmt;
use std::fs;

use chrono::{DateTime, Utc};
use journal_fs::{JournalPath, NormalizedPath, io, validate_relative_path};
use serde::Serialize;
use walkdir::WalkDir;

use crate::{Error, Result};

const BUNDLE_ID_FORMAT: &str = "%Y%m%d-%H%M%S-%6f";

/// Identifier of one bundle (its directory name).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BackupBundleId(String);

impl BackupBundleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BackupBundleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Summary of an existing bundle
#[derive(Debug, Clone)]
pub struct BackupBundle {
    pub id: BackupBundleId,
    pub path: NormalizedPath,
    /// Relative paths of the files inside, sorted.
    pub files: Vec<String>,
}

/// Source of the timestamp a bundle id is derived from.
pub type Clock = fn() -> DateTime<Utc>;

/// Writes, lists and restores bundles under one bundle root.
#[derive(Debug, Clone)]
pub struct BackupWriter {
    bundle_root: NormalizedPath,
    clock: Clock,
}

impl BackupWriter {
    pub fn new(bundle_root: NormalizedPath) -> Self {
        Self {
            bundle_root,
            clock: Utc::now,
        }
    }

    /// Replace the wall clock used to name new bundles.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Writer for the journal's standard bundle root.
    pub fn for_journal(journal_root: &NormalizedPath) -> Self {
        Self::new(journal_root.join(JournalPath::BackupsDir.as_str()))
    }

    /// Write a new bundle containing `files` and return its id.
    ///
    /// Fails with [`Error::BackupCollision`] if the timestamped directory
    /// already exists.
    pub fn write_backup(&self, files: &[(String, Vec<u8>)]) -> Result<BackupBundleId> {
        let root = self.bundle_root.to_native();
        fs::create_dir_all(&root).map_err(|e| journal_fs::Error::io(&root, e))?;

        let id = BackupBundleId((self.clock)().format(BUNDLE_ID_FORMAT).to_string());
        let bundle = self.bundle_root.join(id.as_str());
        let bundle_native = bundle.to_native();
        match fs::create_dir(&bundle_native) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(Error::BackupCollision {
                    path: bundle_native,
                });
            }
            Err(e) => return Err(journal_fs::Error::io(&bundle_native, e).into()),
        }

        for (relative_path, bytes) in files {
            let relative = validate_relative_path(relative_path)?;
            io::write_atomic(&bundle.join(&relative), bytes)?;
        }

        tracing::info!(bundle = %id, files = files.len(), "Wrote backup bundle");
        Ok(id)
    }

    /// All bundles, newest first.
    pub fn list(&self) -> Result<Vec<BackupBundle>> {
        let root = self.bundle_root.to_native();
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let mut bundles = Vec::new();
        for dir_entry in fs::read_dir(&root).map_err(|e| journal_fs::Error::io(&root, e))? {
            let dir_entry = dir_entry.map_err(|e| journal_fs::Error::io(&root, e))?;
            if !dir_entry.path().is_dir() {
                continue;
            }
            let name = dir_entry.file_name().to_string_lossy().to_string();
            bundles.push(self.describe(BackupBundleId(name))?);
        }

        bundles.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(bundles)
    }

    pub fn get(&self, id: &str) -> Result<BackupBundle> {
        let valid = validate_relative_path(id).ok().filter(|v| !v.contains('/'));
        let Some(name) = valid else {
            return Err(Error::BackupNotFound { id: id.to_string() });
        };
        if !self.bundle_root.join(&name).is_dir() {
            return Err(Error::BackupNotFound { id: id.to_string() });
        }
        self.describe(BackupBundleId(name))
    }

    fn describe(&self, id: BackupBundleId) -> Result<BackupBundle> {
        let path = self.bundle_root.join(id.as_str());
        let mut files = Vec::new();
        for entry in WalkDir::new(path.to_native()) {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(relative) = NormalizedPath::new(entry.path()).relative_to(&path) {
                files.push(relative);
            }
        }
        files.sort();
        Ok(BackupBundle { id, path, files })
    }

    /// Copy a bundle's files back into `journal_root`.
    ///
    /// The manifest is not touched, so restored content is seen as a user
    /// edit on the next sync. Returns the restored relative paths.
    pub fn restore(&self, id: &str, journal_root: &NormalizedPath) -> Result<Vec<String>> {
        let bundle = self.get(id)?;
        let mut restored = Vec::with_capacity(bundle.files.len());

        for relative in &bundle.files {
            let safe = validate_relative_path(relative).map_err(|_| Error::UnsafeRestorePath {
                path: relative.clone(),
            })?;
            let destination = journal_root.join(&safe);
            if destination.relative_to(journal_root).is_none() {
                return Err(Error::UnsafeRestorePath { path: safe });
            }
            let bytes = io::read_bytes(&bundle.path.join(&safe))?;
            io::write_atomic(&destination, &bytes)?;
            restored.push(safe);
        }

        tracing::info!(bundle = %bundle.id, files = restored.len(), "Restored backup bundle");
        Ok(restored)
    }
}

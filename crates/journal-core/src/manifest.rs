//! The persisted record of every file the tool has written.
//!
//! Stored as `.system-manifest.json` at the journal root:
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "framework": "gtd",
//!   "files": [
//!     {
//!       "relative_path": "daily-template.md",
//!       "content_fingerprint": "9f86d08...",
//!       "source_identifier": "framework:gtd/daily-template.md",
//!       "installed_at": "2026-10-16T09:30:00Z"
//!     }
//!   ]
//! }
//! ```
//!
//! The record fingerprint only ever changes when the tool itself writes the
//! file. Reading a user's edit never updates it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use journal_fs::{ConfigStore, Fingerprint, NormalizedPath, io};
use journal_templates::{Framework, TemplateEntry};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Current manifest document version.
pub const MANIFEST_VERSION: &str = "1.0.0";

/// One tracked file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    pub relative_path: String,
    pub content_fingerprint: Fingerprint,
    pub source_identifier: String,
    pub installed_at: DateTime<Utc>,
}

impl ManifestRecord {
    /// Record for content the tool is about to write now.
    pub fn new(
        relative_path: impl Into<String>,
        content_fingerprint: Fingerprint,
        source_identifier: impl Into<String>,
    ) -> Self {
        Self {
            relative_path: relative_path.into(),
            content_fingerprint,
            source_identifier: source_identifier.into(),
            installed_at: Utc::now(),
        }
    }
}

/// On-disk shape. Records are a list so the file diffs cleanly.
#[derive(Debug, Serialize, Deserialize)]
struct ManifestDocument {
    version: String,
    #[serde(default)]
    framework: Option<Framework>,
    #[serde(default)]
    files: Vec<ManifestRecord>,
}

/// Outcome of reading a manifest from disk.
#[derive(Debug)]
pub enum ManifestRead {
    Loaded(Manifest),
    Missing,
    Corrupt(Error),
}

/// The tracked file set of one journal, keyed by relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    framework: Option<Framework>,
    records: BTreeMap<String, ManifestRecord>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a manifest, treating a missing or corrupt document as empty.
    ///
    /// Only I/O failures other than "not found" are errors.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        match Self::read(path)? {
            ManifestRead::Loaded(manifest) => Ok(manifest),
            ManifestRead::Missing => Ok(Self::new()),
            ManifestRead::Corrupt(err) => {
                tracing::warn!(error = %err, "Ignoring corrupt manifest");
                Ok(Self::new())
            }
        }
    }

    /// Read a manifest, reporting whether it was present and parseable.
    pub fn read(path: &NormalizedPath) -> Result<ManifestRead> {
        let Some(bytes) = io::read_bytes_if_exists(path)? else {
            return Ok(ManifestRead::Missing);
        };
        Ok(match Self::parse(&bytes) {
            Ok(manifest) => ManifestRead::Loaded(manifest),
            Err(message) => ManifestRead::Corrupt(Error::ManifestCorrupt {
                path: path.to_native(),
                message,
            }),
        })
    }

    fn parse(bytes: &[u8]) -> std::result::Result<Self, String> {
        let doc: ManifestDocument = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
        let mut records = BTreeMap::new();
        for record in doc.files {
            let key = journal_fs::validate_relative_path(&record.relative_path)
                .map_err(|e| e.to_string())?;
            if records.contains_key(&key) {
                return Err(format!("duplicate record for {key}"));
            }
            records.insert(
                key.clone(),
                ManifestRecord {
                    relative_path: key,
                    ..record
                },
            );
        }
        Ok(Self {
            framework: doc.framework,
            records,
        })
    }

    /// Persist atomically; records are written sorted by path.
    pub fn save(&self, path: &NormalizedPath) -> Result<()> {
        let doc = ManifestDocument {
            version: MANIFEST_VERSION.to_string(),
            framework: self.framework,
            files: self.records.values().cloned().collect(),
        };
        ConfigStore::new().save(path, &doc)?;
        tracing::debug!(path = %path, records = self.records.len(), "Saved manifest");
        Ok(())
    }

    /// Adopt whatever a pre-manifest journal currently holds as its baseline.
    ///
    /// Every catalog path that exists on disk gets a record carrying the
    /// file's live fingerprint, so the next plan sees it as unmodified.
    pub fn migrate_legacy(journal_root: &NormalizedPath, catalog: &[TemplateEntry]) -> Result<Self> {
        let mut manifest = Self::new();
        for entry in catalog {
            let destination = journal_root.join(&entry.relative_path);
            if let Some(bytes) = io::read_bytes_if_exists(&destination)? {
                manifest.put(ManifestRecord::new(
                    entry.relative_path.clone(),
                    Fingerprint::of(&bytes),
                    entry.source_identifier.clone(),
                ));
            }
        }
        if !manifest.is_empty() {
            tracing::warn!(
                journal = %journal_root,
                adopted = manifest.len(),
                "Adopted existing files as manifest baseline"
            );
        }
        Ok(manifest)
    }

    pub fn get(&self, relative_path: &str) -> Option<&ManifestRecord> {
        self.records.get(relative_path)
    }

    /// Insert or replace the record for its path.
    pub fn put(&mut self, record: ManifestRecord) {
        self.records.insert(record.relative_path.clone(), record);
    }

    pub fn remove(&mut self, relative_path: &str) -> Option<ManifestRecord> {
        self.records.remove(relative_path)
    }

    pub fn records(&self) -> impl Iterator<Item = &ManifestRecord> {
        self.records.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Framework the journal was last synced with.
    pub fn framework(&self) -> Option<Framework> {
        self.framework
    }

    pub fn set_framework(&mut self, framework: Framework) {
        self.framework = Some(framework);
    }
}

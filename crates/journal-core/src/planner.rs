//! Per-file decisions for one sync run.
//!
//! Each catalog entry is classified independently against the manifest and
//! the live destination; records the catalog no longer produces are dropped.
//! Nothing here touches the disk beyond reading destinations.

use std::collections::HashSet;
use std::fmt;

use journal_fs::{Fingerprint, NormalizedPath, io};
use journal_templates::TemplateEntry;
use serde::Serialize;

use crate::manifest::Manifest;
use crate::{Error, Result};

/// How a destination relates to what the tool last wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncDecision {
    /// No destination file.
    New,
    /// Live fingerprint matches the record.
    Unmodified,
    /// Live fingerprint differs from the record.
    UserModified,
    /// Record whose path the catalog no longer produces.
    Removed,
    /// Destination exists with no record.
    Untracked,
}

/// What the engine will do for one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    /// Write rendered content to a missing destination.
    Install,
    /// Replace an unmodified file whose rendered content changed.
    Overwrite,
    /// Destination already identical to the rendered content.
    UpToDate,
    /// Copy the user's edit into the bundle and leave it alone.
    BackupThenSkip,
    /// Copy an untracked file into the bundle, then replace it.
    BackupThenOverwrite,
    /// Forget the record; the file stays on disk.
    DropRecord,
}

impl SyncAction {
    /// True when the destination will be written.
    pub fn writes(&self) -> bool {
        matches!(self, Self::Install | Self::Overwrite | Self::BackupThenOverwrite)
    }

    /// True when the live bytes always go into the bundle.
    pub fn backs_up(&self) -> bool {
        matches!(self, Self::BackupThenSkip | Self::BackupThenOverwrite)
    }

    /// True when a dry run should report the action as a change.
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::UpToDate)
    }
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Install => "install",
            Self::Overwrite => "overwrite",
            Self::UpToDate => "up to date",
            Self::BackupThenSkip => "backup, keep edits",
            Self::BackupThenOverwrite => "backup, replace",
            Self::DropRecord => "drop record",
        };
        f.write_str(label)
    }
}

/// One planned path with everything the engine needs to execute it.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedAction {
    pub relative_path: String,
    pub decision: SyncDecision,
    pub action: SyncAction,
    pub source_identifier: String,
    /// Rendered content to write. `None` for dropped records.
    #[serde(skip)]
    pub rendered: Option<String>,
    /// Destination bytes as read during planning. `None` when absent.
    #[serde(skip)]
    pub live: Option<Vec<u8>>,
}

impl PlannedAction {
    pub fn rendered_fingerprint(&self) -> Option<Fingerprint> {
        self.rendered.as_deref().map(|s| Fingerprint::of(s.as_bytes()))
    }
}

/// Policy knobs that change classification.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanPolicy {
    /// Back up and replace untracked destinations instead of failing.
    pub overwrite_untracked: bool,
}

/// Classifies catalog entries against a manifest and a destination root.
pub struct SyncPlanner<'a> {
    root: &'a NormalizedPath,
    policy: PlanPolicy,
}

impl<'a> SyncPlanner<'a> {
    pub fn new(root: &'a NormalizedPath) -> Self {
        Self {
            root,
            policy: PlanPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: PlanPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Plan every entry in catalog order, then dropped records in path order.
    ///
    /// Fails with [`Error::UntrackedExistingFile`] on the first untracked
    /// destination unless the policy allows overwriting it.
    pub fn plan(&self, entries: &[TemplateEntry], manifest: &Manifest) -> Result<Vec<PlannedAction>> {
        let mut planned = Vec::with_capacity(entries.len());
        let mut wanted = HashSet::with_capacity(entries.len());

        for entry in entries {
            wanted.insert(entry.relative_path.as_str());
            let item = self.plan_entry(entry, manifest)?;
            tracing::debug!(
                path = %item.relative_path,
                decision = ?item.decision,
                action = %item.action,
                "Planned file"
            );
            planned.push(item);
        }

        for record in manifest.records() {
            if wanted.contains(record.relative_path.as_str()) {
                continue;
            }
            let destination = self.root.join(&record.relative_path);
            let live = io::read_bytes_if_exists(&destination)?;
            tracing::debug!(path = %record.relative_path, "Planned record drop");
            planned.push(PlannedAction {
                relative_path: record.relative_path.clone(),
                decision: SyncDecision::Removed,
                action: SyncAction::DropRecord,
                source_identifier: record.source_identifier.clone(),
                rendered: None,
                live,
            });
        }

        Ok(planned)
    }

    fn plan_entry(&self, entry: &TemplateEntry, manifest: &Manifest) -> Result<PlannedAction> {
        let destination = self.root.join(&entry.relative_path);
        let live = io::read_bytes_if_exists(&destination)?;
        let rendered_fp = Fingerprint::of(entry.rendered_content.as_bytes());

        let (decision, action) = match (&live, manifest.get(&entry.relative_path)) {
            (None, _) => (SyncDecision::New, SyncAction::Install),
            (Some(bytes), Some(record)) => {
                let live_fp = Fingerprint::of(bytes);
                if live_fp == rendered_fp {
                    // Already matches; the record is refreshed on apply.
                    let decision = if live_fp == record.content_fingerprint {
                        SyncDecision::Unmodified
                    } else {
                        SyncDecision::UserModified
                    };
                    (decision, SyncAction::UpToDate)
                } else if live_fp != record.content_fingerprint {
                    (SyncDecision::UserModified, SyncAction::BackupThenSkip)
                } else {
                    (SyncDecision::Unmodified, SyncAction::Overwrite)
                }
            }
            (Some(_), None) if self.policy.overwrite_untracked => {
                (SyncDecision::Untracked, SyncAction::BackupThenOverwrite)
            }
            (Some(_), None) => {
                return Err(Error::UntrackedExistingFile {
                    path: entry.relative_path.clone(),
                });
            }
        };

        Ok(PlannedAction {
            relative_path: entry.relative_path.clone(),
            decision,
            action,
            source_identifier: entry.source_identifier.clone(),
            rendered: Some(entry.rendered_content.clone()),
            live,
        })
    }
}

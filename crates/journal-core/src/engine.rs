//! SyncEngine implementation
//!
//! Coordinates catalog resolution, manifest loading, planning, backups and
//! writes for one journal. Control flow for a sync:
//!
//! 1. resolve the catalog for the selection, applying template overrides
//! 2. load the manifest, migrating a missing or corrupt one
//! 3. plan every entry
//! 4. write one backup bundle for everything flagged
//! 5. apply writes and record drops
//! 6. save the manifest

use journal_fs::{Fingerprint, JournalPath, NormalizedPath, io};
use journal_templates::{Selection, TemplateCatalog, TemplateEntry};
use serde::Serialize;

use crate::backup::{BackupBundleId, BackupWriter};
use crate::check::{CheckReport, DriftItem};
use crate::customize;
use crate::manifest::{Manifest, ManifestRead, ManifestRecord};
use crate::planner::{PlanPolicy, PlannedAction, SyncAction, SyncPlanner};
use crate::{Error, Result};

/// Options for sync and dry-run operations
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Copy every existing file the run touches into the bundle, not only
    /// user edits. Used when switching frameworks.
    pub snapshot_existing: bool,
    /// Back up and replace destinations the manifest has never tracked
    /// instead of failing with [`Error::UntrackedExistingFile`].
    pub overwrite_untracked: bool,
}

/// Report from a sync operation
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub installed: usize,
    /// Includes untracked files that were backed up and replaced.
    pub overwritten: usize,
    /// User-modified files kept as-is with a copy in the bundle.
    pub backed_up: usize,
    pub dropped: usize,
    pub unchanged: usize,
    /// Number of files in the bundle.
    pub snapshotted: usize,
    /// Existing files were adopted as the baseline during this run.
    pub migrated: bool,
    pub warnings: Vec<String>,
    pub bundle: Option<BackupBundleId>,
}

impl SyncReport {
    /// True when the run wrote or backed up nothing.
    pub fn is_noop(&self) -> bool {
        self.installed == 0 && self.overwritten == 0 && self.backed_up == 0 && self.dropped == 0
    }
}

/// Manifest plus how it was obtained
struct LoadedManifest {
    manifest: Manifest,
    migrated: bool,
    warnings: Vec<String>,
}

/// Engine for synchronizing a journal with its template catalog
pub struct SyncEngine {
    root: NormalizedPath,
    manifest_path: NormalizedPath,
    catalog: TemplateCatalog,
    backups: BackupWriter,
}

impl SyncEngine {
    /// Engine with an explicit manifest location
    pub fn new(root: NormalizedPath, manifest_path: NormalizedPath) -> Self {
        Self {
            backups: BackupWriter::for_journal(&root),
            root,
            manifest_path,
            catalog: TemplateCatalog::new(),
        }
    }

    /// Use `backups` instead of the journal's default bundle writer.
    pub fn with_backup_writer(mut self, backups: BackupWriter) -> Self {
        self.backups = backups;
        self
    }

    /// Engine using `.system-manifest.json` at the journal root
    pub fn for_journal(root: NormalizedPath) -> Self {
        let manifest_path = root.join(JournalPath::Manifest.as_str());
        Self::new(root, manifest_path)
    }

    /// Catalog entries for `selection` with this journal's overrides applied.
    fn resolve(&self, selection: &Selection) -> Result<Vec<TemplateEntry>> {
        let mut entries = self.catalog.resolve(selection)?;
        customize::apply_overrides(&self.root, &mut entries)?;
        Ok(entries)
    }

    fn load_manifest(&self, entries: &[TemplateEntry]) -> Result<LoadedManifest> {
        let mut warnings = Vec::new();
        match Manifest::read(&self.manifest_path)? {
            ManifestRead::Loaded(manifest) => {
                return Ok(LoadedManifest {
                    manifest,
                    migrated: false,
                    warnings,
                });
            }
            ManifestRead::Missing => {}
            ManifestRead::Corrupt(err) => {
                tracing::warn!(error = %err, "Manifest unreadable, rebuilding from disk");
                warnings.push(format!("{err}; rebuilt from the files on disk"));
            }
        }

        let manifest = Manifest::migrate_legacy(&self.root, entries)?;
        Ok(LoadedManifest {
            migrated: !manifest.is_empty(),
            manifest,
            warnings,
        })
    }

    fn planner(&self, options: SyncOptions) -> SyncPlanner<'_> {
        SyncPlanner::new(&self.root).with_policy(PlanPolicy {
            overwrite_untracked: options.overwrite_untracked,
        })
    }

    /// Plan without executing.
    pub fn dry_run(&self, selection: &Selection, options: SyncOptions) -> Result<Vec<PlannedAction>> {
        let entries = self.resolve(selection)?;
        let loaded = self.load_manifest(&entries)?;
        self.planner(options).plan(&entries, &loaded.manifest)
    }

    /// Bring the journal in line with `selection` without losing user edits.
    pub fn sync(&self, selection: &Selection, options: SyncOptions) -> Result<SyncReport> {
        if !self.root.is_dir() {
            return Err(Error::JournalNotFound {
                path: self.root.to_native(),
            });
        }

        let entries = self.resolve(selection)?;
        let LoadedManifest {
            mut manifest,
            migrated,
            warnings,
        } = self.load_manifest(&entries)?;
        let plan = self.planner(options).plan(&entries, &manifest)?;

        let mut report = SyncReport {
            migrated,
            warnings,
            ..SyncReport::default()
        };

        let snapshot_all = options.snapshot_existing || migrated;
        let to_backup: Vec<(String, Vec<u8>)> = plan
            .iter()
            .filter(|item| item.action.backs_up() || snapshot_all)
            .filter_map(|item| {
                item.live
                    .as_ref()
                    .map(|bytes| (item.relative_path.clone(), bytes.clone()))
            })
            .collect();

        if !to_backup.is_empty() {
            report.bundle = Some(self.backups.write_backup(&to_backup)?);
            report.snapshotted = to_backup.len();
        }

        if let Err(err) = self.apply(&plan, &mut manifest, &mut report) {
            tracing::warn!(error = %err, "Sync interrupted, saving records for files already written");
            manifest.save(&self.manifest_path)?;
            return Err(err);
        }

        manifest.set_framework(selection.framework);
        manifest.save(&self.manifest_path)?;

        tracing::info!(
            journal = %self.root,
            installed = report.installed,
            overwritten = report.overwritten,
            backed_up = report.backed_up,
            dropped = report.dropped,
            unchanged = report.unchanged,
            "Sync complete"
        );
        Ok(report)
    }

    fn apply(&self, plan: &[PlannedAction], manifest: &mut Manifest, report: &mut SyncReport) -> Result<()> {
        for item in plan {
            match item.action {
                SyncAction::Install | SyncAction::Overwrite | SyncAction::BackupThenOverwrite => {
                    let content = item.rendered.as_deref().unwrap_or_default();
                    io::write_atomic(&self.root.join(&item.relative_path), content.as_bytes())?;
                    manifest.put(ManifestRecord::new(
                        item.relative_path.clone(),
                        Fingerprint::of(content.as_bytes()),
                        item.source_identifier.clone(),
                    ));
                    if item.action == SyncAction::Install {
                        report.installed += 1;
                    } else {
                        report.overwritten += 1;
                    }
                }
                SyncAction::UpToDate => {
                    let rendered = Fingerprint::of(item.rendered.as_deref().unwrap_or_default().as_bytes());
                    let stale = manifest
                        .get(&item.relative_path)
                        .filter(|r| {
                            r.source_identifier != item.source_identifier
                                || r.content_fingerprint != rendered
                        })
                        .cloned();
                    if let Some(mut record) = stale {
                        record.source_identifier = item.source_identifier.clone();
                        record.content_fingerprint = rendered;
                        manifest.put(record);
                    }
                    report.unchanged += 1;
                }
                SyncAction::BackupThenSkip => report.backed_up += 1,
                SyncAction::DropRecord => {
                    manifest.remove(&item.relative_path);
                    report.dropped += 1;
                }
            }
        }
        Ok(())
    }

    /// Compare the journal on disk with the catalog and manifest.
    pub fn check(&self, selection: &Selection) -> Result<CheckReport> {
        let entries = self.resolve(selection)?;
        let manifest = match Manifest::read(&self.manifest_path)? {
            ManifestRead::Loaded(manifest) => manifest,
            ManifestRead::Missing => Manifest::new(),
            ManifestRead::Corrupt(err) => return Ok(CheckReport::broken(err.to_string())),
        };

        let mut drifted = Vec::new();
        let mut missing = Vec::new();
        let mut untracked = Vec::new();
        let mut pending_updates = 0;

        for entry in &entries {
            let destination = self.root.join(&entry.relative_path);
            let Some(bytes) = io::read_bytes_if_exists(&destination)? else {
                missing.push(DriftItem::new(&entry.relative_path, "File not found"));
                continue;
            };
            let live = Fingerprint::of(&bytes);
            match manifest.get(&entry.relative_path) {
                None => untracked.push(DriftItem::new(
                    &entry.relative_path,
                    "Exists but is not tracked by the manifest",
                )),
                Some(record) if record.content_fingerprint != live => {
                    drifted.push(DriftItem::new(
                        &entry.relative_path,
                        format!(
                            "Customized: expected {}, found {}",
                            record.content_fingerprint.short(),
                            live.short()
                        ),
                    ));
                }
                Some(_) if live != Fingerprint::of(entry.rendered_content.as_bytes()) => {
                    pending_updates += 1;
                }
                Some(_) => {}
            }
        }

        let mut report = CheckReport::from_findings(drifted, missing, untracked);
        if pending_updates > 0 {
            report
                .messages
                .push(format!("{pending_updates} template(s) have updates available"));
        }
        let orphaned = manifest
            .paths()
            .filter(|path| !entries.iter().any(|e| e.relative_path == *path))
            .count();
        if orphaned > 0 {
            report.messages.push(format!(
                "{orphaned} tracked file(s) are no longer part of the selection"
            ));
        }
        Ok(report)
    }
}

/// Sync a journal with an explicit manifest path.
pub fn sync(
    selection: &Selection,
    journal_root: &NormalizedPath,
    manifest_path: &NormalizedPath,
) -> Result<SyncReport> {
    SyncEngine::new(journal_root.clone(), manifest_path.clone()).sync(selection, SyncOptions::default())
}

/// Plan a sync with an explicit manifest path, without executing it.
pub fn dry_run(
    selection: &Selection,
    journal_root: &NormalizedPath,
    manifest_path: &NormalizedPath,
) -> Result<Vec<PlannedAction>> {
    SyncEngine::new(journal_root.clone(), manifest_path.clone())
        .dry_run(selection, SyncOptions::default())
}

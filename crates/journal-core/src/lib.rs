//! Customization-aware template synchronization for Journal Kit
//!
//! This crate decides, for every system-managed file in a journal, whether
//! to install, overwrite, keep-and-back-up, or forget it:
//!
//! - **Manifest**: fingerprints of what the tool last wrote
//! - **SyncPlanner**: per-file classification against the manifest
//! - **BackupWriter**: timestamped bundles of files at risk
//! - **SyncEngine**: `sync`, `dry_run` and `check` over a journal root
//! - **search**: literal text and wiki-link search over journal entries
//!
//! The journal layout, multi-journal configuration and relocation live here
//! too, so the CLI stays a thin layer.
//!
//! ```text
//!                 journal-cli
//!                      |
//!                 journal-core
//!                  /         \
//!        journal-templates  journal-fs
//! ```

pub mod backup;
pub mod check;
pub mod config;
pub mod customize;
pub mod engine;
pub mod error;
pub mod manifest;
pub mod planner;
pub mod relocate;
pub mod search;
pub mod structure;

pub use backup::{BackupBundle, BackupBundleId, BackupWriter, Clock};
pub use check::{CheckReport, CheckStatus, DriftItem};
pub use config::{JournalConfig, JournalProfile};
pub use customize::{CustomizeOutcome, apply_overrides, customize_template, template_file_name};
pub use engine::{SyncEngine, SyncOptions, SyncReport, dry_run, sync};
pub use error::{Error, Result};
pub use manifest::{MANIFEST_VERSION, Manifest, ManifestRead, ManifestRecord};
pub use planner::{PlanPolicy, PlannedAction, SyncAction, SyncDecision, SyncPlanner};
pub use relocate::{MoveReport, move_journal};
pub use search::{EntryType, SearchHit, SearchQuery, SearchResults, parse_date, search};
pub use structure::{FolderStat, REQUIRED_FOLDERS, create_structure, folder_stats, validate_structure};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untracked_error_points_at_force() {
        let error = Error::UntrackedExistingFile {
            path: "CLAUDE.md".into(),
        };
        let display = error.to_string();
        assert!(display.contains("CLAUDE.md"));
        assert!(display.contains("--force"));
    }
}

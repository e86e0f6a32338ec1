//! Journal folder layout

use std::fs;

use journal_fs::{JournalPath, NormalizedPath};
use serde::Serialize;
use walkdir::WalkDir;

use crate::Result;
use crate::check::{CheckReport, DriftItem};

/// Folders every journal has, in display order.
pub const REQUIRED_FOLDERS: [&str; 7] = [
    "daily",
    "projects",
    "areas",
    "resources",
    "people",
    "memories",
    "archive",
];

fn all_folders() -> impl Iterator<Item = &'static str> {
    REQUIRED_FOLDERS
        .into_iter()
        .chain(std::iter::once(JournalPath::AiInstructionsDir.as_str()))
}

/// Create any missing required folders. Returns the ones created.
pub fn create_structure(root: &NormalizedPath) -> Result<Vec<String>> {
    let mut created = Vec::new();
    for folder in all_folders() {
        let path = root.join(folder);
        if path.is_dir() {
            continue;
        }
        let native = path.to_native();
        fs::create_dir_all(&native).map_err(|e| journal_fs::Error::io(&native, e))?;
        created.push(folder.to_string());
    }
    if !created.is_empty() {
        tracing::info!(journal = %root, created = ?created, "Created journal folders");
    }
    Ok(created)
}

/// Required folders that are absent, in display order.
pub fn validate_structure(root: &NormalizedPath) -> Vec<String> {
    all_folders()
        .filter(|folder| !root.join(folder).is_dir())
        .map(str::to_string)
        .collect()
}

/// Structure findings as a check report.
pub fn check_structure(root: &NormalizedPath) -> CheckReport {
    let missing = validate_structure(root)
        .into_iter()
        .map(|folder| DriftItem::new(folder, "Required folder not found"))
        .collect();
    CheckReport::from_findings(Vec::new(), missing, Vec::new())
}

/// Markdown file count for one folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderStat {
    pub folder: String,
    pub markdown_files: usize,
}

/// Count markdown files (recursively) in each required folder.
pub fn folder_stats(root: &NormalizedPath) -> Vec<FolderStat> {
    REQUIRED_FOLDERS
        .iter()
        .map(|folder| {
            let markdown_files = WalkDir::new(root.join(folder).to_native())
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "md"))
                .count();
            FolderStat {
                folder: folder.to_string(),
                markdown_files,
            }
        })
        .collect()
}

//! Status command implementation

use colored::Colorize;
use journal_core::{
    BackupWriter, CheckStatus, FolderStat, Manifest, SyncEngine, folder_stats,
};
use serde::Serialize;

use crate::context::Context;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct StatusOutput {
    name: String,
    location: String,
    framework: String,
    ides: Vec<String>,
    version: String,
    last_updated: String,
    tracked_files: usize,
    health: CheckStatus,
    backups: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    folders: Option<Vec<FolderStat>>,
}

/// Run the status command
pub fn run_status(ctx: &Context, json: bool, verbose: bool) -> Result<()> {
    let (_, profile) = ctx.active()?;
    let root = profile.root();
    let selection = profile.selection();

    let manifest = Manifest::load(&profile.manifest_path())?;
    let health = SyncEngine::for_journal(root.clone()).check(&selection)?.status;
    let backups = BackupWriter::for_journal(&root).list()?.len();

    let status = StatusOutput {
        name: profile.name.clone(),
        location: profile.location.display().to_string(),
        framework: profile.framework.id().to_string(),
        ides: profile.ides.iter().map(|i| i.id().to_string()).collect(),
        version: profile.version.clone(),
        last_updated: profile.last_updated.to_rfc3339(),
        tracked_files: manifest.len(),
        health,
        backups,
        folders: verbose.then(|| folder_stats(&root)),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Journal Kit Status".bold());
    println!();
    println!("  {:<14} {}", "Journal:", status.name.cyan());
    println!("  {:<14} {}", "Location:", status.location);
    println!("  {:<14} {}", "Framework:", profile.framework.label());
    println!("  {:<14} {}", "AI editors:", selection.ide_list());
    println!("  {:<14} {}", "Version:", status.version);
    println!("  {:<14} {}", "Last updated:", status.last_updated);
    println!("  {:<14} {}", "Tracked files:", status.tracked_files);
    println!("  {:<14} {}", "Backups:", status.backups);
    let health = match status.health {
        CheckStatus::Healthy => "healthy".green(),
        CheckStatus::Missing => "files missing".yellow(),
        CheckStatus::Drifted => "customized".yellow(),
        CheckStatus::Broken => "broken".red(),
    };
    println!("  {:<14} {}", "Health:", health);

    if let Some(folders) = &status.folders {
        println!();
        println!("{}", "Folders".bold());
        for stat in folders {
            println!("  {:<12} {} file(s)", format!("{}/", stat.folder), stat.markdown_files);
        }
    }
    Ok(())
}

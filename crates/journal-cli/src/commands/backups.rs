//! Backup listing and restore commands

use colored::Colorize;
use journal_core::BackupWriter;

use crate::context::Context;
use crate::error::Result;

/// Run the backups command
pub fn run_backups(ctx: &Context) -> Result<()> {
    let (_, profile) = ctx.active()?;
    let bundles = BackupWriter::for_journal(&profile.root()).list()?;

    if bundles.is_empty() {
        println!("No backups for journal {}.", profile.name.cyan());
        return Ok(());
    }

    println!("{}", "Backups (newest first)".bold());
    for bundle in &bundles {
        println!("  {}  {} file(s)", bundle.id.as_str().cyan(), bundle.files.len());
    }
    Ok(())
}

/// Run the restore command
///
/// Restored files are treated as your own edits by later updates.
pub fn run_restore(ctx: &Context, bundle_id: &str) -> Result<()> {
    let (_, profile) = ctx.active()?;
    let root = profile.root();

    println!("{} Restoring {}", "=>".blue().bold(), bundle_id.cyan());
    let restored = BackupWriter::for_journal(&root).restore(bundle_id, &root)?;
    for path in &restored {
        println!("   {} {}", "<".green(), path);
    }
    println!("{} Restored {} file(s).", "OK".green().bold(), restored.len());
    Ok(())
}

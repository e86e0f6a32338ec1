//! Doctor command implementation

use colored::Colorize;
use journal_core::structure::check_structure;
use journal_core::{CheckReport, CheckStatus, DriftItem, SyncEngine, SyncOptions, create_structure};

use super::{TOOL_VERSION, print_report};
use crate::context::Context;
use crate::error::Result;

fn print_items(marker: colored::ColoredString, items: &[DriftItem]) {
    for item in items {
        println!("   {} {}: {}", marker, item.file.cyan(), item.description);
    }
}

fn print_check(report: &CheckReport) {
    match report.status {
        CheckStatus::Healthy => {
            println!("{} Journal is healthy.", "OK".green().bold());
        }
        CheckStatus::Missing => {
            println!("{} Some files or folders are missing:", "MISSING".yellow().bold());
            print_items("-".yellow(), &report.missing);
            println!();
            println!("Run {} to repair.", "journal-kit doctor --fix".cyan());
        }
        CheckStatus::Drifted => {
            println!("{} Some managed files differ from what was installed:", "DRIFTED".yellow().bold());
            print_items("!".yellow(), &report.drifted);
            print_items("?".red(), &report.untracked);
            if !report.missing.is_empty() {
                println!();
                println!("{} Also missing:", "MISSING".yellow().bold());
                print_items("-".yellow(), &report.missing);
            }
            println!();
            println!("Customized files are kept on update; a copy goes into a backup bundle.");
            if !report.untracked.is_empty() {
                println!(
                    "Untracked files block updates until you run {}.",
                    "journal-kit update --force".cyan()
                );
            }
        }
        CheckStatus::Broken => {
            println!("{} Journal is in a broken state:", "BROKEN".red().bold());
            for msg in &report.messages {
                println!("   {} {}", "!".red(), msg);
            }
            println!();
            println!("Run {} to rebuild the manifest.", "journal-kit update".cyan());
            return;
        }
    }
    for msg in &report.messages {
        println!("   {} {}", "i".blue(), msg);
    }
}

/// Run the doctor command
pub fn run_doctor(ctx: &Context, fix: bool) -> Result<()> {
    println!("{} Checking journal health...", "=>".blue().bold());

    let (config, mut profile) = ctx.active()?;
    let root = profile.root();
    let engine = SyncEngine::for_journal(root.clone());
    let selection = profile.selection();

    let report = check_structure(&root).merge(engine.check(&selection)?);
    print_check(&report);

    if !fix || report.is_healthy() {
        return Ok(());
    }

    println!();
    println!("{} Repairing...", "=>".blue().bold());
    let created = create_structure(&root)?;
    for folder in &created {
        println!("   {} {}/", "+".green(), folder.cyan());
    }
    let sync_report = engine.sync(&selection, SyncOptions::default())?;
    print_report(&sync_report);
    profile.touch(TOOL_VERSION);
    ctx.save_profile(config, profile)?;
    Ok(())
}

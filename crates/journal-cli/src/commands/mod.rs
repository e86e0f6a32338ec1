//! Command implementations for journal-cli

pub mod backups;
pub mod customize;
pub mod doctor;
pub mod journals;
pub mod search;
pub mod setup;
pub mod status;
pub mod update;

pub use backups::{run_backups, run_restore};
pub use customize::run_customize_template;
pub use doctor::run_doctor;
pub use journals::{run_list, run_move, run_use};
pub use search::{SearchArgs, run_search};
pub use setup::run_setup;
pub use status::run_status;
pub use update::{run_add_ide, run_switch_framework, run_update};

use colored::Colorize;
use journal_core::{PlannedAction, SyncAction, SyncReport};

/// Tool version recorded in profiles
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print a plan, one line per path that would change.
pub(crate) fn print_plan(plan: &[PlannedAction]) {
    let changes: Vec<_> = plan.iter().filter(|i| i.action.is_change()).collect();
    if changes.is_empty() {
        println!("{} Everything is up to date.", "OK".green().bold());
        return;
    }

    for item in changes {
        let marker = match item.action {
            SyncAction::Install => "+".green(),
            SyncAction::Overwrite => "~".blue(),
            SyncAction::BackupThenSkip => "!".yellow(),
            SyncAction::BackupThenOverwrite => "!".red(),
            SyncAction::DropRecord => "-".dimmed(),
            SyncAction::UpToDate => " ".normal(),
        };
        println!(
            "   {} {} ({})",
            marker,
            item.relative_path.cyan(),
            item.action.to_string().dimmed()
        );
    }
    let unchanged = plan.len() - plan.iter().filter(|i| i.action.is_change()).count();
    if unchanged > 0 {
        println!("   {} {} file(s) already up to date", "=".dimmed(), unchanged);
    }
}

/// Print the outcome of a sync.
pub(crate) fn print_report(report: &SyncReport) {
    for warning in &report.warnings {
        println!("{} {}", "WARN".yellow().bold(), warning);
    }
    if report.migrated {
        println!(
            "{} Existing files were adopted as the new baseline.",
            "NOTE".blue().bold()
        );
    }

    if report.is_noop() {
        println!("{} Already up to date. No changes needed.", "OK".green().bold());
    } else {
        println!("{} Sync complete:", "OK".green().bold());
        let lines = [
            (report.installed, "installed", "+".green()),
            (report.overwritten, "updated", "~".blue()),
            (report.backed_up, "kept with your edits", "!".yellow()),
            (report.dropped, "no longer managed (left on disk)", "-".dimmed()),
        ];
        for (count, label, marker) in lines {
            if count > 0 {
                println!("   {} {} {}", marker, count, label);
            }
        }
    }

    if let Some(bundle) = &report.bundle {
        println!(
            "{} Backed up {} file(s) to {}",
            "=>".blue().bold(),
            report.snapshotted,
            bundle.as_str().cyan()
        );
    }
}

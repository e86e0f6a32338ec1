//! Setup command implementation

use std::path::Path;

use colored::Colorize;
use journal_core::{
    JournalProfile, SyncEngine, SyncOptions, create_structure, validate_structure,
};
use journal_fs::NormalizedPath;
use journal_templates::Selection;

use super::{TOOL_VERSION, print_plan, print_report};
use crate::context::Context;
use crate::error::{CliError, Result};

/// Run the setup command
///
/// Creates the journal folders, installs templates and registers the
/// journal as a profile. The first journal set up becomes active.
#[allow(clippy::too_many_arguments)]
pub fn run_setup(
    ctx: &Context,
    location: &Path,
    framework: &str,
    ides: &[String],
    name: &str,
    dry_run: bool,
    force: bool,
) -> Result<()> {
    let selection = Selection::parse(framework, ides)?;
    let options = SyncOptions {
        overwrite_untracked: force,
        ..SyncOptions::default()
    };
    let location = std::path::absolute(location)?;

    let mut config = ctx.load_config()?;
    if config.journals.contains_key(name) {
        return Err(CliError::user(format!(
            "A journal named '{}' already exists. Choose another --name or run 'journal-kit update'.",
            name
        )));
    }
    if location.is_file() {
        return Err(CliError::user(format!(
            "{} is a file, not a directory",
            location.display()
        )));
    }

    println!(
        "{} Setting up {} journal at {} ({}, {})",
        "=>".blue().bold(),
        name.cyan(),
        location.display(),
        selection.framework.label(),
        selection.ide_list()
    );

    let root = NormalizedPath::new(&location);
    let engine = SyncEngine::for_journal(root.clone());

    if dry_run {
        let missing = validate_structure(&root);
        if !missing.is_empty() {
            println!("   Would create folders: {}", missing.join(", "));
        }
        print_plan(&engine.dry_run(&selection, options)?);
        println!("{} Dry run, nothing was written.", "=>".blue().bold());
        return Ok(());
    }

    create_structure(&root)?;
    let report = engine.sync(&selection, options)?;
    print_report(&report);

    config.add(JournalProfile::new(name, location, &selection, TOOL_VERSION))?;
    ctx.save_config(&config)?;

    println!("{} Journal '{}' is ready.", "OK".green().bold(), name);
    if config.active_journal.as_deref() != Some(name) {
        println!("Run {} to make it the active journal.", format!("journal-kit use {name}").cyan());
    }
    Ok(())
}

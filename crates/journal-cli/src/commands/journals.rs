//! Journal profile commands: move, list, use

use std::path::Path;

use colored::Colorize;
use journal_core::move_journal;
use journal_fs::NormalizedPath;

use crate::context::Context;
use crate::error::{CliError, Result};

/// Run the move command
///
/// Copies the journal tree, points the profile at the new location and
/// removes the old tree.
pub fn run_move(ctx: &Context, new_location: &Path) -> Result<()> {
    let (config, mut profile) = ctx.active()?;
    let new_location = std::path::absolute(new_location)?;
    if new_location == profile.location {
        return Err(CliError::user(
            "New location is the same as the current location",
        ));
    }

    println!(
        "{} Moving {} from {} to {}",
        "=>".blue().bold(),
        profile.name.cyan(),
        profile.location.display(),
        new_location.display()
    );

    let report = move_journal(&profile.root(), &NormalizedPath::new(&new_location))?;
    profile.location = new_location;
    ctx.save_profile(config, profile)?;

    println!(
        "{} Journal moved ({} file(s)).",
        "OK".green().bold(),
        report.files_copied
    );
    Ok(())
}

/// Run the list command
pub fn run_list(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    if config.is_empty() {
        println!("No journals configured. Run {} to create one.", "journal-kit setup".cyan());
        return Ok(());
    }

    println!("{}", "Journals".bold());
    for (name, profile) in &config.journals {
        let active = config.active_journal.as_deref() == Some(name.as_str());
        let marker = if active { "*".green().bold() } else { " ".normal() };
        let missing = if profile.location.is_dir() {
            String::new()
        } else {
            format!(" {}", "(missing)".red())
        };
        println!(
            "  {} {:<16} {} [{}]{}",
            marker,
            name,
            profile.location.display(),
            profile.framework.id(),
            missing
        );
    }
    Ok(())
}

/// Run the use command
pub fn run_use(ctx: &Context, name: &str) -> Result<()> {
    let mut config = ctx.load_config()?;
    config.set_active(name)?;
    ctx.save_config(&config)?;
    println!("{} Active journal is now {}.", "OK".green().bold(), name.cyan());
    Ok(())
}

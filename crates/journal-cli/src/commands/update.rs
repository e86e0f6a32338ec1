//! Update, switch-framework and add-ide command implementations
//!
//! All three re-run the sync engine against a (possibly changed) selection.

use colored::Colorize;
use journal_core::{JournalConfig, JournalProfile, SyncAction, SyncEngine, SyncOptions, SyncReport};
use journal_templates::{Framework, Ide, Selection};
use semver::Version;
use similar::TextDiff;

use super::{TOOL_VERSION, print_plan, print_report};
use crate::context::Context;
use crate::error::Result;

fn engine_for(profile: &JournalProfile) -> SyncEngine {
    SyncEngine::for_journal(profile.root())
}

/// Warn when the journal was last synced by a newer tool.
fn check_version(profile: &JournalProfile) {
    let (Ok(recorded), Ok(current)) = (Version::parse(&profile.version), Version::parse(TOOL_VERSION))
    else {
        tracing::debug!(version = %profile.version, "Unparseable recorded version");
        return;
    };
    if recorded > current {
        println!(
            "{} Journal was last updated by journal-kit {}, this is {}.",
            "WARN".yellow().bold(),
            recorded,
            current
        );
    } else if recorded < current {
        println!(
            "{} Updating templates from {} to {}",
            "=>".blue().bold(),
            recorded,
            current
        );
    }
}

/// Sync `selection` into the profile's journal and persist the profile.
fn apply(
    ctx: &Context,
    config: JournalConfig,
    mut profile: JournalProfile,
    selection: &Selection,
    options: SyncOptions,
) -> Result<SyncReport> {
    let report = engine_for(&profile).sync(selection, options)?;
    profile.framework = selection.framework;
    profile.ides = selection.ides.clone();
    profile.touch(TOOL_VERSION);
    ctx.save_profile(config, profile)?;
    print_report(&report);
    Ok(report)
}

/// Run the update command
pub fn run_update(ctx: &Context, check: bool, diff: bool, force: bool) -> Result<()> {
    let (config, profile) = ctx.active()?;
    println!(
        "{} Updating templates in {}",
        "=>".blue().bold(),
        profile.location.display()
    );
    check_version(&profile);

    let selection = profile.selection();
    let options = SyncOptions {
        overwrite_untracked: force,
        ..SyncOptions::default()
    };

    if check || diff {
        let plan = engine_for(&profile).dry_run(&selection, options)?;
        print_plan(&plan);
        if diff {
            for item in plan.iter().filter(|i| i.action == SyncAction::BackupThenSkip) {
                let live = String::from_utf8_lossy(item.live.as_deref().unwrap_or_default());
                let rendered = item.rendered.as_deref().unwrap_or_default();
                let text_diff = TextDiff::from_lines(&*live, rendered);
                let yours = format!("{} (yours)", item.relative_path);
                let template = format!("{} (template)", item.relative_path);
                println!();
                print!(
                    "{}",
                    text_diff.unified_diff().context_radius(3).header(&yours, &template)
                );
            }
        }
        return Ok(());
    }

    apply(ctx, config, profile, &selection, options)?;
    Ok(())
}

/// Run the switch-framework command
pub fn run_switch_framework(ctx: &Context, framework: &str, dry_run: bool) -> Result<()> {
    let framework: Framework = framework.parse()?;
    let (config, profile) = ctx.active()?;

    if profile.framework == framework {
        println!(
            "{} Journal already uses {}.",
            "OK".green().bold(),
            framework.label()
        );
        return Ok(());
    }

    println!(
        "{} Switching from {} to {}",
        "=>".blue().bold(),
        profile.framework.label(),
        framework.label().cyan()
    );

    let selection = Selection::new(framework, profile.ides.iter().copied());
    let options = SyncOptions {
        snapshot_existing: true,
        ..SyncOptions::default()
    };

    if dry_run {
        print_plan(&engine_for(&profile).dry_run(&selection, options)?);
        return Ok(());
    }

    apply(ctx, config, profile, &selection, options)?;
    Ok(())
}

/// Run the add-ide command
pub fn run_add_ide(ctx: &Context, ide: &str, force: bool) -> Result<()> {
    let requested = Ide::parse_selector(ide)?;
    let (config, profile) = ctx.active()?;

    let added: Vec<Ide> = requested
        .into_iter()
        .filter(|candidate| !profile.ides.contains(candidate))
        .collect();
    if added.is_empty() {
        println!("{} {} is already configured.", "OK".green().bold(), ide);
        return Ok(());
    }

    let ids: Vec<&str> = added.iter().map(Ide::id).collect();
    println!("{} Adding {}", "=>".blue().bold(), ids.join(", ").cyan());

    let selection = Selection::new(
        profile.framework,
        profile.ides.iter().copied().chain(added),
    );
    let options = SyncOptions {
        overwrite_untracked: force,
        ..SyncOptions::default()
    };
    apply(ctx, config, profile, &selection, options)?;
    Ok(())
}

//! Journal Kit CLI
//!
//! Sets up markdown journals and keeps their system templates current
//! without clobbering user edits.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: could not initialize logging: {}", "warning".yellow().bold(), e);
    }

    let Some(command) = cli.command else {
        println!("{} Journal Kit", "journal-kit".green().bold());
        println!();
        println!("Run {} for available commands.", "journal-kit --help".cyan());
        return Ok(());
    };

    let ctx = Context::from_env(cli.journal)?;
    execute_command(&ctx, command, cli.verbose)
}

fn execute_command(ctx: &Context, cmd: Commands, verbose: bool) -> Result<()> {
    match cmd {
        Commands::Setup {
            location,
            framework,
            ides,
            name,
            dry_run,
            force,
        } => commands::run_setup(ctx, &location, &framework, &ides, &name, dry_run, force),
        Commands::Update { check, diff, force } => commands::run_update(ctx, check, diff, force),
        Commands::SwitchFramework { framework, dry_run } => {
            commands::run_switch_framework(ctx, &framework, dry_run)
        }
        Commands::AddIde { ide, force } => commands::run_add_ide(ctx, &ide, force),
        Commands::Doctor { fix } => commands::run_doctor(ctx, fix),
        Commands::Status { json } => commands::run_status(ctx, json, verbose),
        Commands::Move { new_location } => commands::run_move(ctx, &new_location),
        Commands::List => commands::run_list(ctx),
        Commands::Use { name } => commands::run_use(ctx, &name),
        Commands::Backups => commands::run_backups(ctx),
        Commands::Restore { bundle_id } => commands::run_restore(ctx, &bundle_id),
        Commands::CustomizeTemplate { name } => commands::run_customize_template(ctx, &name),
        Commands::Search {
            query,
            after,
            before,
            types,
            reference,
            export,
            case_sensitive,
            limit,
        } => commands::run_search(
            ctx,
            commands::SearchArgs {
                query,
                after,
                before,
                types,
                reference,
                export,
                case_sensitive,
                limit,
            },
        ),
    }
}

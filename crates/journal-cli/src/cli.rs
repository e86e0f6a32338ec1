//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Journal Kit - Set up and maintain an AI-assisted markdown journal
#[derive(Parser, Debug)]
#[command(name = "journal-kit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Operate on this journal instead of the active one
    #[arg(long, global = true, env = "JOURNAL_KIT_JOURNAL")]
    pub journal: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a journal, install its templates and register it
    ///
    /// Examples:
    ///   journal-kit setup --location ~/journal --ide cursor
    ///   journal-kit setup --location ~/work --name work --framework gtd --ide all
    Setup {
        /// Directory for the journal (created if missing)
        #[arg(short, long)]
        location: PathBuf,

        /// Journaling framework (default, gtd, para, bullet-journal, zettelkasten)
        #[arg(short, long, default_value = "default")]
        framework: String,

        /// AI editor to configure; repeat for several, or use "all"
        #[arg(short, long = "ide", required = true)]
        ides: Vec<String>,

        /// Name for this journal profile
        #[arg(short, long, default_value = "default")]
        name: String,

        /// Show what would be installed without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Back up and replace existing files the tool has never tracked
        #[arg(long)]
        force: bool,
    },

    /// Refresh system templates, keeping your edits
    Update {
        /// Only show what would change
        #[arg(long)]
        check: bool,

        /// Show diffs between your customized files and the new templates
        /// (implies --check)
        #[arg(long)]
        diff: bool,

        /// Back up and replace files the tool has never tracked
        #[arg(long)]
        force: bool,
    },

    /// Switch to another journaling framework
    ///
    /// Every existing managed file is copied into a backup bundle first.
    SwitchFramework {
        /// Framework to switch to
        framework: String,

        /// Show what would change without applying it
        #[arg(long)]
        dry_run: bool,
    },

    /// Add configuration for another AI editor
    AddIde {
        /// Editor to add (cursor, windsurf, claude-code, copilot, all)
        ide: String,

        /// Back up and replace existing files the tool has never tracked
        #[arg(long)]
        force: bool,
    },

    /// Check journal health
    Doctor {
        /// Create missing folders and reinstall missing templates
        #[arg(long)]
        fix: bool,
    },

    /// Show journal status
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Move the journal to a new location
    Move {
        /// New location
        new_location: PathBuf,
    },

    /// List configured journals
    List,

    /// Make another journal the active one
    Use {
        /// Journal profile name
        name: String,
    },

    /// List backup bundles of the journal
    Backups,

    /// Copy a backup bundle's files back into the journal
    Restore {
        /// Bundle id as shown by `journal-kit backups`
        bundle_id: String,
    },

    /// Keep your own copy of a template that updates will use
    ///
    /// The copy lands in .ai-instructions/templates/ and replaces the
    /// bundled template from then on.
    ///
    /// Examples:
    ///   journal-kit customize-template daily
    ///   journal-kit customize-template weekly-review
    CustomizeTemplate {
        /// Template name, e.g. daily or daily-template.md
        name: String,
    },

    /// Search journal entries
    ///
    /// Examples:
    ///   journal-kit search "meeting" --after 7d
    ///   journal-kit search deadline --type project
    ///   journal-kit search --ref people/sarah
    Search {
        /// Text to look for
        #[arg(required_unless_present = "reference")]
        query: Option<String>,

        /// Only entries dated on or after (YYYY-MM-DD or 7d, 2w, 1m)
        #[arg(long)]
        after: Option<String>,

        /// Only entries dated on or before (YYYY-MM-DD or 7d, 2w, 1m)
        #[arg(long)]
        before: Option<String>,

        /// Entry types, comma-separated (daily, project, people, memory)
        #[arg(long = "type")]
        types: Option<String>,

        /// Find links to a note, e.g. people/sarah
        #[arg(long = "ref", conflicts_with = "query")]
        reference: Option<String>,

        /// Also write the results to a markdown file
        #[arg(long)]
        export: Option<PathBuf>,

        /// Match case exactly
        #[arg(long)]
        case_sensitive: bool,

        /// Stop after this many matches
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_setup_with_several_ides() {
        let cli = Cli::parse_from([
            "journal-kit",
            "setup",
            "--location",
            "/tmp/j",
            "--ide",
            "cursor",
            "--ide",
            "copilot",
            "--framework",
            "gtd",
        ]);
        match cli.command {
            Some(Commands::Setup {
                ides, framework, name, ..
            }) => {
                assert_eq!(ides, vec!["cursor", "copilot"]);
                assert_eq!(framework, "gtd");
                assert_eq!(name, "default");
            }
            other => panic!("Expected Setup, got {:?}", other),
        }
    }

    #[test]
    fn parse_setup_requires_ide() {
        let result = Cli::try_parse_from(["journal-kit", "setup", "--location", "/tmp/j"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_switch_framework() {
        let cli = Cli::parse_from(["journal-kit", "switch-framework", "para", "--dry-run"]);
        assert_eq!(
            cli.command,
            Some(Commands::SwitchFramework {
                framework: "para".into(),
                dry_run: true,
            })
        );
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["journal-kit", "status", "--journal", "work", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.journal.as_deref(), Some("work"));
        assert_eq!(cli.command, Some(Commands::Status { json: false }));
    }

    #[test]
    fn parse_search_with_filters() {
        let cli = Cli::parse_from([
            "journal-kit",
            "search",
            "launch",
            "--after",
            "7d",
            "--type",
            "daily,project",
            "--limit",
            "5",
        ]);
        match cli.command {
            Some(Commands::Search {
                query,
                after,
                types,
                limit,
                reference,
                ..
            }) => {
                assert_eq!(query.as_deref(), Some("launch"));
                assert_eq!(after.as_deref(), Some("7d"));
                assert_eq!(types.as_deref(), Some("daily,project"));
                assert_eq!(limit, Some(5));
                assert!(reference.is_none());
            }
            other => panic!("Expected Search, got {:?}", other),
        }
    }

    #[test]
    fn parse_search_needs_text_or_ref() {
        assert!(Cli::try_parse_from(["journal-kit", "search"]).is_err());
        assert!(Cli::try_parse_from(["journal-kit", "search", "--ref", "people/sarah"]).is_ok());
        assert!(
            Cli::try_parse_from(["journal-kit", "search", "x", "--ref", "people/sarah"]).is_err()
        );
    }

    #[test]
    fn parse_customize_template() {
        let cli = Cli::parse_from(["journal-kit", "customize-template", "daily"]);
        assert_eq!(
            cli.command,
            Some(Commands::CustomizeTemplate {
                name: "daily".into()
            })
        );
    }

    #[test]
    fn parse_no_command() {
        let cli = Cli::parse_from(["journal-kit"]);
        assert!(cli.command.is_none());
    }
}

//! The framework x IDE template table and its resolution.

use std::collections::HashSet;

use journal_fs::validate_relative_path;

use crate::render::{RenderContext, render};
use crate::selection::{Framework, Ide, Selection};
use crate::{Error, Result};

/// One system-managed file, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    /// Destination path relative to the journal root, `/`-separated.
    pub relative_path: String,
    /// Template body after placeholder substitution.
    pub rendered_content: String,
    /// `framework:<id>/<file>` or `ide:<id>/<file>`.
    pub source_identifier: String,
}

/// A raw table row: destination path and embedded body.
struct Source {
    dest: &'static str,
    body: &'static str,
}

macro_rules! src {
    ($dest:expr, $body:expr $(,)?) => {
        Source {
            dest: $dest,
            body: $body,
        }
    };
}

const WELCOME: Source = src!("WELCOME.md", include_str!("../templates/shared/WELCOME.md"));

macro_rules! framework_table {
    ($dir:literal: $($file:literal),+ $(,)?) => {
        &[$(src!($file, include_str!(concat!("../templates/frameworks/", $dir, "/", $file)))),+]
    };
}

fn framework_sources(framework: Framework) -> &'static [Source] {
    match framework {
        Framework::Default => framework_table!("default":
            "daily-template.md",
            "project-template.md",
            "people-template.md",
            "memory-template.md",
        ),
        Framework::Gtd => framework_table!("gtd":
            "daily-template.md",
            "project-template.md",
            "weekly-review-template.md",
            "next-actions-template.md",
        ),
        Framework::Para => framework_table!("para":
            "daily-template.md",
            "project-template.md",
            "area-template.md",
            "resource-template.md",
        ),
        Framework::BulletJournal => framework_table!("bullet-journal":
            "daily-template.md",
            "project-template.md",
            "future-log-template.md",
            "monthly-log-template.md",
        ),
        Framework::Zettelkasten => framework_table!("zettelkasten":
            "daily-template.md",
            "project-template.md",
            "fleeting-note-template.md",
            "permanent-note-template.md",
        ),
    }
}

fn ide_sources(ide: Ide) -> &'static [Source] {
    match ide {
        Ide::Cursor => &[
            src!(
                ".cursor/rules/journal-coach.mdc",
                include_str!("../templates/ide/cursor/journal-coach.mdc"),
            ),
            src!(
                ".cursor/rules/system-protection.mdc",
                include_str!("../templates/ide/cursor/system-protection.mdc"),
            ),
        ],
        Ide::Windsurf => &[
            src!(
                ".windsurf/rules/journal-coach.md",
                include_str!("../templates/ide/windsurf/journal-coach.md"),
            ),
            src!(
                ".windsurf/rules/system-protection.md",
                include_str!("../templates/ide/windsurf/system-protection.md"),
            ),
        ],
        Ide::ClaudeCode => &[
            src!("CLAUDE.md", include_str!("../templates/ide/claude-code/CLAUDE.md")),
            src!(
                "SYSTEM-PROTECTION.md",
                include_str!("../templates/ide/claude-code/SYSTEM-PROTECTION.md"),
            ),
            src!(
                "daily/CLAUDE.md",
                include_str!("../templates/ide/claude-code/daily-CLAUDE.md"),
            ),
            src!(
                "projects/CLAUDE.md",
                include_str!("../templates/ide/claude-code/projects-CLAUDE.md"),
            ),
        ],
        Ide::Copilot => &[
            src!(
                ".github/copilot-instructions.md",
                include_str!("../templates/ide/copilot/copilot-instructions.md"),
            ),
            src!(
                ".github/instructions/journal.instructions.md",
                include_str!("../templates/ide/copilot/journal.instructions.md"),
            ),
        ],
    }
}

/// Resolves selections into rendered template entries.
///
/// Stateless; every call renders afresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateCatalog;

impl TemplateCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a selection into its ordered entries.
    ///
    /// Order: `WELCOME.md`, the framework's templates, then each selected
    /// IDE in canonical order with its files in table order.
    pub fn resolve(&self, selection: &Selection) -> Result<Vec<TemplateEntry>> {
        let framework = selection.framework;
        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        let framework_ctx = RenderContext::new(framework, None);
        let framework_rows = std::iter::once(&WELCOME).chain(framework_sources(framework));
        for source in framework_rows {
            let id = format!("framework:{}/{}", framework.id(), source.dest);
            push_entry(&mut entries, &mut seen, source, id, &framework_ctx)?;
        }

        for ide in &selection.ides {
            let ctx = RenderContext::new(framework, Some(*ide));
            for source in ide_sources(*ide) {
                let id = format!("ide:{}/{}", ide.id(), source.dest);
                push_entry(&mut entries, &mut seen, source, id, &ctx)?;
            }
        }

        tracing::debug!(
            framework = %framework,
            ides = %selection.ide_list(),
            count = entries.len(),
            "Resolved template catalog"
        );

        Ok(entries)
    }
}

fn push_entry(
    entries: &mut Vec<TemplateEntry>,
    seen: &mut HashSet<&'static str>,
    source: &Source,
    source_identifier: String,
    ctx: &RenderContext,
) -> Result<()> {
    if !seen.insert(source.dest) {
        return Err(Error::DuplicatePath {
            path: source.dest.to_string(),
        });
    }
    let relative_path = validate_relative_path(source.dest)?;
    let rendered_content = render(source.dest, source.body, ctx)?;
    entries.push(TemplateEntry {
        relative_path,
        rendered_content,
        source_identifier,
    });
    Ok(())
}

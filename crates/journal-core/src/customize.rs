//! Per-journal template overrides
//!
//! A journal can carry its own copy of any `*-template.md` file under
//! `.ai-instructions/templates/`. When present, sync, dry-run and check use
//! that copy as the rendered body instead of the bundled one, so the
//! customized layout becomes the new baseline rather than drift.

use journal_fs::{JournalPath, NormalizedPath, io};
use journal_templates::{Selection, TemplateCatalog, TemplateEntry};

use crate::{Error, Result};

const TEMPLATE_SUFFIX: &str = "-template.md";

/// What `customize_template` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomizeOutcome {
    /// A new override was written. `from_live` is set when it was seeded
    /// from the journal's current file rather than the bundled body.
    Created { path: NormalizedPath, from_live: bool },
    /// An override already existed and was left alone.
    AlreadyCustomized { path: NormalizedPath },
}

impl CustomizeOutcome {
    pub fn path(&self) -> &NormalizedPath {
        match self {
            Self::Created { path, .. } | Self::AlreadyCustomized { path } => path,
        }
    }
}

/// Canonical file name for a user-supplied template name.
///
/// `daily`, `daily.md`, `daily-template` and `daily-template.md` all map to
/// `daily-template.md`.
pub fn template_file_name(name: &str) -> String {
    let stem = name.trim().trim_end_matches(".md");
    let stem = stem.trim_end_matches("-template");
    format!("{stem}{TEMPLATE_SUFFIX}")
}

fn overrides_dir(root: &NormalizedPath) -> NormalizedPath {
    root.join(JournalPath::CustomTemplatesDir.as_str())
}

fn is_template(entry: &TemplateEntry) -> bool {
    entry.relative_path.ends_with(TEMPLATE_SUFFIX)
}

/// Copy a template into the journal's override directory.
///
/// The copy is seeded from the journal's live file when it exists, so local
/// edits carry over; otherwise from the rendered bundled body.
pub fn customize_template(
    root: &NormalizedPath,
    selection: &Selection,
    name: &str,
) -> Result<CustomizeOutcome> {
    let file_name = template_file_name(name);
    let entries = TemplateCatalog::new().resolve(selection)?;
    let Some(entry) = entries
        .iter()
        .find(|e| is_template(e) && e.relative_path == file_name)
    else {
        let available = entries
            .iter()
            .filter(|e| is_template(e))
            .map(|e| e.relative_path.trim_end_matches(TEMPLATE_SUFFIX))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(Error::TemplateNotFound {
            name: name.to_string(),
            available,
        });
    };

    let destination = overrides_dir(root).join(&file_name);
    if destination.exists() {
        tracing::info!(path = %destination, "Template already customized");
        return Ok(CustomizeOutcome::AlreadyCustomized { path: destination });
    }

    let live = io::read_bytes_if_exists(&root.join(&entry.relative_path))?;
    let from_live = live.is_some();
    let content = live.unwrap_or_else(|| entry.rendered_content.clone().into_bytes());
    io::write_atomic(&destination, &content)?;

    tracing::info!(path = %destination, from_live, "Created template override");
    Ok(CustomizeOutcome::Created {
        path: destination,
        from_live,
    })
}

/// Replace the bodies of template entries that have an override on disk.
///
/// Returns the number of entries replaced.
pub fn apply_overrides(root: &NormalizedPath, entries: &mut [TemplateEntry]) -> Result<usize> {
    let dir = overrides_dir(root);
    if !dir.is_dir() {
        return Ok(0);
    }

    let mut replaced = 0;
    for entry in entries.iter_mut().filter(|e| is_template(e)) {
        let path = dir.join(&entry.relative_path);
        if !path.is_file() {
            continue;
        }
        entry.rendered_content = io::read_text(&path)?;
        entry.source_identifier = format!(
            "custom:{}/{}",
            JournalPath::CustomTemplatesDir,
            entry.relative_path
        );
        replaced += 1;
    }
    if replaced > 0 {
        tracing::debug!(count = replaced, "Using customized templates");
    }
    Ok(replaced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("daily")]
    #[case("daily.md")]
    #[case("daily-template")]
    #[case("daily-template.md")]
    #[case(" daily ")]
    fn names_normalize_to_template_files(#[case] name: &str) {
        assert_eq!(template_file_name(name), "daily-template.md");
    }

    #[test]
    fn hyphenated_names_keep_their_stem() {
        assert_eq!(template_file_name("weekly-review"), "weekly-review-template.md");
    }
}

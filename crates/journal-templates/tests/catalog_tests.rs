//! Catalog resolution tests across the full framework x IDE table.

use std::collections::HashSet;

use journal_templates::{Error, Framework, Ide, Selection, TemplateCatalog};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn paths(selection: &Selection) -> Vec<String> {
    TemplateCatalog::new()
        .resolve(selection)
        .unwrap()
        .into_iter()
        .map(|e| e.relative_path)
        .collect()
}

#[test]
fn every_pair_renders_without_placeholders() {
    let catalog = TemplateCatalog::new();
    for framework in Framework::ALL {
        for ide in Ide::ALL {
            let entries = catalog.resolve(&Selection::new(framework, [ide])).unwrap();
            for entry in entries {
                assert!(
                    !entry.rendered_content.contains("{framework}"),
                    "{} for {framework}/{ide} kept {{framework}}",
                    entry.relative_path
                );
                assert!(!entry.rendered_content.contains("{framework_id}"));
                assert!(!entry.rendered_content.contains("{ide}"));
            }
        }
    }
}

#[test]
fn framework_label_reaches_rendered_output() {
    let entries = TemplateCatalog::new()
        .resolve(&Selection::new(Framework::Gtd, [Ide::Cursor]))
        .unwrap();
    let welcome = entries.iter().find(|e| e.relative_path == "WELCOME.md").unwrap();
    assert!(welcome.rendered_content.contains("GTD (Getting Things Done)"));
}

#[test]
fn default_with_cursor_layout() {
    let selection = Selection::new(Framework::Default, [Ide::Cursor]);
    assert_eq!(
        paths(&selection),
        vec![
            "WELCOME.md",
            "daily-template.md",
            "project-template.md",
            "people-template.md",
            "memory-template.md",
            ".cursor/rules/journal-coach.mdc",
            ".cursor/rules/system-protection.mdc",
        ]
    );
}

#[test]
fn ides_follow_canonical_order() {
    let selection = Selection::parse("para", &["copilot", "claude-code"]).unwrap();
    let resolved = paths(&selection);
    let claude = resolved.iter().position(|p| p == "CLAUDE.md").unwrap();
    let copilot = resolved
        .iter()
        .position(|p| p == ".github/copilot-instructions.md")
        .unwrap();
    assert!(claude < copilot);
    assert!(resolved.contains(&"daily/CLAUDE.md".to_string()));
    assert!(resolved.contains(&"projects/CLAUDE.md".to_string()));
}

#[test]
fn resolution_is_deterministic() {
    let catalog = TemplateCatalog::new();
    let selection = Selection::parse("zettelkasten", &["all"]).unwrap();
    let first = catalog.resolve(&selection).unwrap();
    let second = catalog.resolve(&selection).unwrap();
    assert_eq!(first, second);
}

#[rstest]
#[case(Framework::Default)]
#[case(Framework::Gtd)]
#[case(Framework::Para)]
#[case(Framework::BulletJournal)]
#[case(Framework::Zettelkasten)]
fn paths_are_unique_with_every_ide(#[case] framework: Framework) {
    let resolved = paths(&Selection::new(framework, Ide::ALL));
    let unique: HashSet<_> = resolved.iter().collect();
    assert_eq!(unique.len(), resolved.len());
    assert_eq!(resolved.len(), 5 + 2 + 2 + 4 + 2);
}

#[test]
fn source_identifiers_name_origin() {
    let entries = TemplateCatalog::new()
        .resolve(&Selection::new(Framework::BulletJournal, [Ide::Windsurf]))
        .unwrap();
    assert_eq!(
        entries[1].source_identifier,
        "framework:bullet-journal/daily-template.md"
    );
    assert_eq!(
        entries.last().unwrap().source_identifier,
        "ide:windsurf/.windsurf/rules/system-protection.md"
    );
}

#[test]
fn no_ides_yields_framework_files_only() {
    let resolved = paths(&Selection::new(Framework::Gtd, std::iter::empty::<Ide>()));
    assert_eq!(resolved.len(), 5);
    assert!(resolved.contains(&"weekly-review-template.md".to_string()));
}

#[rstest]
#[case("kanban", &["cursor"], "kanban")]
#[case("default", &["cursor", "emacs"], "emacs")]
fn invalid_selection_is_rejected(
    #[case] framework: &str,
    #[case] ides: &[&str],
    #[case] offending: &str,
) {
    let err = Selection::parse(framework, ides).unwrap_err();
    match err {
        Error::InvalidSelection { value, .. } => assert_eq!(value, offending),
        other => panic!("unexpected error: {other}"),
    }
}

//! Tests for journal search

use chrono::NaiveDate;
use journal_core::{EntryType, Error, SearchQuery, search};
use journal_test_utils::TestJournal;
use pretty_assertions::assert_eq;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_journal() -> TestJournal {
    let journal = TestJournal::new();
    journal.write(
        "daily/2026-10-01.md",
        "# October 1\n\nStandup ran long.\nTalked to [[people/sarah]] about the launch.\nLunch\nGym\n",
    );
    journal.write("daily/2026-10-14.md", "# October 14\nLaunch prep with [[people/sarah|Sarah]].\n");
    journal.write("daily/2025-12-31.md", "Year end. LAUNCH retrospective.\n");
    journal.write("projects/launch.md", "# Launch\nLaunch owner: [[people/sarah]]\n");
    journal.write("people/sarah.md", "# Sarah\nLeads the launch.\n");
    journal.write("memories/first-job.md", "Nothing relevant here.\n");
    journal.write("resources/launch-checklist.md", "launch launch launch\n");
    journal.write("daily/notes.txt", "launch\n");
    journal
}

#[test]
fn finds_matches_case_insensitively_with_context() {
    let journal = sample_journal();

    let results = search(&journal.path(), &SearchQuery::new("launch")).unwrap();

    let paths: Vec<_> = results.hits.iter().map(|h| h.relative_path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "daily/2025-12-31.md",
            "daily/2026-10-01.md",
            "daily/2026-10-14.md",
            "projects/launch.md",
            "projects/launch.md",
            "people/sarah.md",
        ]
    );
    assert_eq!(results.files_scanned, 6);
    assert_eq!(results.files_matched(), 5);

    let standup = &results.hits[1];
    assert_eq!(standup.entry_type, EntryType::Daily);
    assert_eq!(standup.entry_date, Some(day(2026, 10, 1)));
    assert_eq!(standup.line_number, 4);
    assert_eq!(standup.context_before, vec!["", "Standup ran long."]);
    assert_eq!(standup.context_after, vec!["Lunch", "Gym"]);
}

#[test]
fn case_sensitive_search_skips_other_cases() {
    let journal = sample_journal();
    let query = SearchQuery {
        case_sensitive: true,
        ..SearchQuery::new("LAUNCH")
    };

    let results = search(&journal.path(), &query).unwrap();

    assert_eq!(results.hits.len(), 1);
    assert_eq!(results.hits[0].relative_path, "daily/2025-12-31.md");
}

#[test]
fn text_is_matched_literally() {
    let journal = TestJournal::new();
    journal.write("projects/regex.md", "cost is $5 (approx.)\ncost is 5\n");

    let results = search(&journal.path(), &SearchQuery::new("$5 (approx.)")).unwrap();

    assert_eq!(results.hits.len(), 1);
    assert_eq!(results.hits[0].line_number, 1);
}

#[test]
fn date_filters_apply_to_dated_files_only() {
    let journal = sample_journal();
    let query = SearchQuery {
        after: Some(day(2026, 10, 1)),
        before: Some(day(2026, 10, 10)),
        ..SearchQuery::new("launch")
    };

    let results = search(&journal.path(), &query).unwrap();

    let paths: Vec<_> = results.hits.iter().map(|h| h.relative_path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["daily/2026-10-01.md", "projects/launch.md", "projects/launch.md", "people/sarah.md"]
    );
}

#[test]
fn type_filter_restricts_folders() {
    let journal = sample_journal();
    let query = SearchQuery {
        entry_types: vec![EntryType::Project, EntryType::People],
        ..SearchQuery::new("launch")
    };

    let results = search(&journal.path(), &query).unwrap();

    assert!(results.hits.iter().all(|h| h.entry_type != EntryType::Daily));
    assert_eq!(results.files_scanned, 2);
}

#[test]
fn limit_stops_early() {
    let journal = sample_journal();
    let query = SearchQuery {
        limit: Some(2),
        ..SearchQuery::new("launch")
    };

    let results = search(&journal.path(), &query).unwrap();

    assert_eq!(results.hits.len(), 2);
}

#[test]
fn reference_search_finds_plain_and_aliased_links() {
    let journal = sample_journal();

    let query = SearchQuery::for_reference("people/sarah").unwrap();
    let results = search(&journal.path(), &query).unwrap();

    let paths: Vec<_> = results.hits.iter().map(|h| h.relative_path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["daily/2026-10-01.md", "daily/2026-10-14.md", "projects/launch.md"]
    );
}

#[test]
fn inverted_date_range_is_rejected() {
    let journal = sample_journal();
    let query = SearchQuery {
        after: Some(day(2026, 10, 10)),
        before: Some(day(2026, 10, 1)),
        ..SearchQuery::new("launch")
    };

    let err = search(&journal.path(), &query).unwrap_err();

    assert!(matches!(err, Error::InvalidSearch { .. }), "{err}");
}

#[test]
fn blank_text_is_rejected() {
    let journal = sample_journal();

    let err = search(&journal.path(), &SearchQuery::new("   ")).unwrap_err();

    assert!(matches!(err, Error::InvalidSearch { .. }), "{err}");
}

#[test]
fn empty_journal_has_no_hits() {
    let journal = TestJournal::new();

    let results = search(&journal.path(), &SearchQuery::new("anything")).unwrap();

    assert!(results.is_empty());
    assert_eq!(results.files_scanned, 0);
}

#[test]
fn markdown_export_lists_every_hit() {
    let journal = sample_journal();
    let query = SearchQuery {
        entry_types: vec![EntryType::Project],
        ..SearchQuery::new("launch")
    };
    let results = search(&journal.path(), &query).unwrap();

    let report = results.to_markdown(&query);

    assert!(report.starts_with("# Search Results\n"));
    assert!(report.contains("**Query**: \"launch\""));
    assert!(report.contains("**Filters**: Types: project"));
    assert!(report.contains("**Results**: 2 matches in 1 files"));
    assert!(report.contains("## projects/launch.md (Line 1)"));
    assert!(report.contains("## projects/launch.md (Line 2)"));
    assert!(report.contains("**Date**: Undated"));
}

//! BackupWriter behaviour across many bundles

use std::collections::HashSet;

use chrono::{DateTime, TimeZone, Utc};
use journal_core::{BackupWriter, Error, SyncEngine, SyncOptions};
use journal_templates::{Framework, Ide, Selection};
use journal_test_utils::TestJournal;

const FIXED_BUNDLE: &str = "20260102-030405-000000";

fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
}

#[test]
fn rapid_backups_never_merge() {
    let journal = TestJournal::new();
    let writer = BackupWriter::for_journal(&journal.path());

    let mut ids = HashSet::new();
    for i in 0..50 {
        let file = (format!("note-{i}.md"), format!("body {i}").into_bytes());
        match writer.write_backup(&[file]) {
            Ok(id) => assert!(ids.insert(id), "bundle id reused"),
            Err(Error::BackupCollision { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    // One directory per successful bundle, each holding exactly one file
    let dirs = journal.bundle_dirs();
    assert_eq!(dirs.len(), ids.len());
    for bundle in writer.list().unwrap() {
        assert_eq!(bundle.files.len(), 1);
    }
}

#[test]
fn restore_does_not_touch_manifest() {
    let journal = TestJournal::new();
    journal.write(".system-manifest.json", "{\"version\":\"1.0.0\",\"files\":[]}");
    let writer = BackupWriter::for_journal(&journal.path());
    let id = writer
        .write_backup(&[("WELCOME.md".to_string(), b"old welcome".to_vec())])
        .unwrap();

    writer.restore(id.as_str(), &journal.path()).unwrap();

    assert_eq!(journal.read("WELCOME.md"), "old welcome");
    assert_eq!(
        journal.read(".system-manifest.json"),
        "{\"version\":\"1.0.0\",\"files\":[]}"
    );
}

#[test]
fn list_is_empty_without_bundles() {
    let journal = TestJournal::new();
    assert!(BackupWriter::for_journal(&journal.path()).list().unwrap().is_empty());
}

#[test]
fn existing_bundle_directory_is_a_collision() {
    let journal = TestJournal::new();
    journal.write(&format!(".framework-backups/{FIXED_BUNDLE}/WELCOME.md"), "earlier copy");
    let writer = BackupWriter::for_journal(&journal.path()).with_clock(fixed_clock);

    let err = writer
        .write_backup(&[("WELCOME.md".to_string(), b"newer copy".to_vec())])
        .unwrap_err();

    assert!(matches!(err, Error::BackupCollision { .. }), "{err}");
    assert_eq!(
        journal.read(&format!(".framework-backups/{FIXED_BUNDLE}/WELCOME.md")),
        "earlier copy"
    );
}

#[test]
fn same_timestamp_twice_collides() {
    let journal = TestJournal::new();
    let writer = BackupWriter::for_journal(&journal.path()).with_clock(fixed_clock);

    let first = writer.write_backup(&[]).unwrap();
    assert_eq!(first.as_str(), FIXED_BUNDLE);
    assert!(matches!(
        writer.write_backup(&[]),
        Err(Error::BackupCollision { .. })
    ));
    assert_eq!(journal.bundle_dirs().len(), 1);
}

#[test]
fn collision_aborts_sync_before_any_write() {
    let journal = TestJournal::new();
    let selection = Selection::new(Framework::Default, [Ide::Cursor]);
    let plain = SyncEngine::for_journal(journal.path());
    plain.sync(&selection, SyncOptions::default()).unwrap();

    journal.write("daily-template.md", "my daily layout");
    std::fs::remove_file(journal.root().join("people-template.md")).unwrap();
    journal.write(&format!(".framework-backups/{FIXED_BUNDLE}/keep.md"), "x");
    let manifest_before = journal.read_bytes(".system-manifest.json");

    let engine = SyncEngine::for_journal(journal.path())
        .with_backup_writer(BackupWriter::for_journal(&journal.path()).with_clock(fixed_clock));
    let err = engine.sync(&selection, SyncOptions::default()).unwrap_err();

    assert!(matches!(err, Error::BackupCollision { .. }), "{err}");
    assert_eq!(journal.read("daily-template.md"), "my daily layout");
    journal.assert_file_not_exists("people-template.md");
    assert_eq!(journal.read_bytes(".system-manifest.json"), manifest_before);
    assert_eq!(journal.bundle_dirs().len(), 1);
}

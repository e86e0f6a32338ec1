use journal_fs::{NormalizedPath, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file_and_parents() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join(".cursor/rules/coach.mdc"));

    io::write_atomic(&path, b"hello world").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "hello world");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("WELCOME.md");
    fs::write(&file_path, "original").unwrap();

    io::write_atomic(&NormalizedPath::new(&file_path), b"updated").unwrap();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "updated");
}

#[test]
fn test_write_atomic_preserves_bytes_exactly() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("crlf.md"));
    let bytes = b"line one\r\nline two \r\n\xef\xbb\xbf";

    io::write_atomic(&path, bytes).unwrap();

    assert_eq!(io::read_bytes(&path).unwrap(), bytes.to_vec());
}

#[test]
fn test_read_text_nonexistent_file_reports_path() {
    let path = NormalizedPath::new("/nonexistent/journal/file.md");
    let err = io::read_text(&path).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("/nonexistent/journal/file.md"));
}

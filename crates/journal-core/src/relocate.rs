//! Moving a journal to a new location

use std::fs;
use std::path::Path;

use journal_fs::NormalizedPath;
use walkdir::WalkDir;

use crate::{Error, Result};

/// Outcome of a move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub files_copied: usize,
}

/// Copy the journal tree at `from` into `to`, then delete `from`.
///
/// `to` must not exist or be an empty directory, and must not lie inside
/// `from`. Symbolic links are recreated with the same target, not followed.
/// If copying fails the source is left in place.
pub fn move_journal(from: &NormalizedPath, to: &NormalizedPath) -> Result<MoveReport> {
    if !from.is_dir() {
        return Err(Error::JournalNotFound {
            path: from.to_native(),
        });
    }
    if to.relative_to(from).is_some() {
        return Err(Error::InvalidMoveTarget {
            path: to.to_native(),
            reason: "it is the journal itself or lies inside it".into(),
        });
    }
    if to.is_dir() {
        let native = to.to_native();
        let mut entries = fs::read_dir(&native).map_err(|e| journal_fs::Error::io(&native, e))?;
        if entries.next().is_some() {
            return Err(Error::DestinationNotEmpty { path: native });
        }
    }

    let target_root = to.to_native();
    fs::create_dir_all(&target_root).map_err(|e| journal_fs::Error::io(&target_root, e))?;

    let mut files_copied = 0;
    for entry in WalkDir::new(from.to_native()).min_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        let source = NormalizedPath::new(entry.path());
        let Some(relative) = source.relative_to(from) else {
            continue;
        };
        let target = to.join(&relative).to_native();
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| journal_fs::Error::io(&target, e))?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| journal_fs::Error::io(parent, e))?;
        }
        if entry.path_is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target).map_err(|e| journal_fs::Error::io(&target, e))?;
        } else {
            let unsupported = std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "not a regular file, directory or symbolic link",
            );
            return Err(journal_fs::Error::io(entry.path(), unsupported).into());
        }
        files_copied += 1;
    }

    let old = from.to_native();
    fs::remove_dir_all(&old).map_err(|e| journal_fs::Error::io(&old, e))?;
    tracing::info!(from = %from, to = %to, files = files_copied, "Moved journal");
    Ok(MoveReport { files_copied })
}

/// Recreate the link at `source` as `target`, pointing at the same place.
#[cfg(unix)]
fn copy_symlink(source: &Path, target: &Path) -> Result<()> {
    let link = fs::read_link(source).map_err(|e| journal_fs::Error::io(source, e))?;
    std::os::unix::fs::symlink(&link, target).map_err(|e| journal_fs::Error::io(target, e))?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(source: &Path, _target: &Path) -> Result<()> {
    Err(Error::SymlinkNotSupported {
        path: source.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn moves_tree_and_removes_source() {
        let dir = TempDir::new().unwrap();
        let base = NormalizedPath::new(dir.path());
        let from = base.join("old");
        let to = base.join("new/journal");
        std::fs::create_dir_all(from.join("daily").to_native()).unwrap();
        std::fs::write(from.join("daily/2026-10-16.md").to_native(), "entry").unwrap();
        std::fs::write(from.join(".system-manifest.json").to_native(), "{}").unwrap();

        let report = move_journal(&from, &to).unwrap();
        assert_eq!(report.files_copied, 2);
        assert!(!from.exists());
        assert_eq!(
            std::fs::read_to_string(to.join("daily/2026-10-16.md").to_native()).unwrap(),
            "entry"
        );
    }

    #[test]
    fn refuses_non_empty_destination() {
        let dir = TempDir::new().unwrap();
        let base = NormalizedPath::new(dir.path());
        let from = base.join("old");
        let to = base.join("taken");
        std::fs::create_dir_all(from.to_native()).unwrap();
        std::fs::create_dir_all(to.to_native()).unwrap();
        std::fs::write(to.join("x.md").to_native(), "x").unwrap();

        assert!(matches!(
            move_journal(&from, &to),
            Err(Error::DestinationNotEmpty { .. })
        ));
        assert!(from.exists());
    }

    #[test]
    fn refuses_destination_inside_source() {
        let dir = TempDir::new().unwrap();
        let from = NormalizedPath::new(dir.path()).join("j");
        std::fs::create_dir_all(from.to_native()).unwrap();
        assert!(matches!(
            move_journal(&from, &from.join("nested")),
            Err(Error::InvalidMoveTarget { .. })
        ));
        assert!(matches!(
            move_journal(&from, &from),
            Err(Error::InvalidMoveTarget { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_recreated_not_dropped() {
        let dir = TempDir::new().unwrap();
        let base = NormalizedPath::new(dir.path());
        let from = base.join("old");
        let to = base.join("new");
        let outside = base.join("shared.md");
        std::fs::create_dir_all(from.join("daily").to_native()).unwrap();
        std::fs::write(outside.to_native(), "shared").unwrap();
        std::fs::write(from.join("daily/2026-10-16.md").to_native(), "entry").unwrap();
        std::os::unix::fs::symlink(outside.to_native(), from.join("shared.md").to_native())
            .unwrap();
        std::os::unix::fs::symlink("daily/2026-10-16.md", from.join("today.md").to_native())
            .unwrap();
        std::os::unix::fs::symlink("../../nowhere.md", from.join("daily/dangling.md").to_native())
            .unwrap();

        let report = move_journal(&from, &to).unwrap();

        assert_eq!(report.files_copied, 4);
        assert!(!from.exists());
        assert_eq!(
            std::fs::read_link(to.join("shared.md").to_native()).unwrap(),
            outside.to_native()
        );
        assert_eq!(
            std::fs::read_link(to.join("today.md").to_native()).unwrap(),
            std::path::PathBuf::from("daily/2026-10-16.md")
        );
        assert_eq!(
            std::fs::read_to_string(to.join("today.md").to_native()).unwrap(),
            "entry"
        );
        assert!(
            std::fs::symlink_metadata(to.join("daily/dangling.md").to_native())
                .unwrap()
                .file_type()
                .is_symlink()
        );
        assert!(outside.exists());
    }
}

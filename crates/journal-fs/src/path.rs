//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// All paths are stored with forward slashes and `.`/`..`/empty components
/// collapsed; conversion to the platform-native form happens only at I/O
/// boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy().replace('\\', "/");
        Self {
            inner: clean(&raw),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a (forward- or back-slash separated) segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        if segment.is_empty() {
            return self.clone();
        }
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self {
            inner: clean(&joined),
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            None => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|s| !s.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    /// Strip `base` from the front of this path, yielding a relative
    /// forward-slash string. Returns `None` if this path is not under `base`.
    pub fn relative_to(&self, base: &NormalizedPath) -> Option<String> {
        let base = base.inner.trim_end_matches('/');
        let rest = self.inner.strip_prefix(base)?;
        if rest.is_empty() {
            return Some(String::new());
        }
        rest.strip_prefix('/').map(str::to_string)
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

/// Collapse `.`, `..` and empty components.
///
/// Leading `..` on relative paths is dropped rather than preserved, so a
/// joined path can never climb above the base it was joined onto textually.
fn clean(raw: &str) -> String {
    let absolute = raw.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for component in raw.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    let body = parts.join("/");
    if absolute {
        format!("/{}", body)
    } else if body.is_empty() && !raw.is_empty() {
        ".".to_string()
    } else {
        body
    }
}

/// Validate a journal-relative path used as a manifest or catalog key.
///
/// Accepts forward- or back-slash separators and returns the normalized
/// forward-slash form. Rejects empty, absolute and parent-escaping paths.
pub fn validate_relative_path(path: &str) -> Result<String> {
    let invalid = |reason: &str| Error::InvalidRelativePath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let unified = path.replace('\\', "/");
    if unified.trim().is_empty() {
        return Err(invalid("path is empty"));
    }
    if unified.starts_with('/') || unified.chars().nth(1) == Some(':') {
        return Err(invalid("path must be relative to the journal root"));
    }
    if unified.contains('\0') {
        return Err(invalid("path contains a null byte"));
    }

    let mut parts = Vec::new();
    for component in unified.split('/') {
        match component {
            "" | "." => {}
            ".." => return Err(invalid("path escapes the journal root")),
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        return Err(invalid("path has no file component"));
    }
    Ok(parts.join("/"))
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_and_relative_to_round_trip() {
        let root = NormalizedPath::new("/home/me/journal");
        let file = root.join(".cursor/rules/coach.mdc");
        assert_eq!(file.as_str(), "/home/me/journal/.cursor/rules/coach.mdc");
        assert_eq!(
            file.relative_to(&root).as_deref(),
            Some(".cursor/rules/coach.mdc")
        );
    }

    #[test]
    fn relative_to_rejects_sibling_prefix() {
        let root = NormalizedPath::new("/home/me/journal");
        let other = NormalizedPath::new("/home/me/journal-old/WELCOME.md");
        assert_eq!(other.relative_to(&root), None);
    }

    #[test]
    fn parent_and_file_name() {
        let p = NormalizedPath::new("/a/b/c.md");
        assert_eq!(p.file_name(), Some("c.md"));
        assert_eq!(p.extension(), Some("md"));
        assert_eq!(p.parent().unwrap().as_str(), "/a/b");
        assert_eq!(NormalizedPath::new("/a").parent().unwrap().as_str(), "/");
    }
}

//! JSON document store for small config files

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result, io};

/// Reads and writes pretty-printed JSON documents.
///
/// Saves go through [`io::write_atomic`], so a reader never sees a
/// half-written document. Used for the journal profile config and the
/// manifest.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Read and deserialize the document at `path`.
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let content = io::read_text(path)?;
        serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_native(),
            message: e.to_string(),
        })
    }

    /// Serialize `value` with a trailing newline and write it atomically.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let mut json = serde_json::to_string_pretty(value).map_err(|e| Error::ConfigSerialize {
            path: path.to_native(),
            message: e.to_string(),
        })?;
        json.push('\n');
        io::write_atomic(path, json.as_bytes())
    }
}

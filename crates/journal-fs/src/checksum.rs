//! SHA-256 content fingerprints
//!
//! A fingerprint is the lowercase hex SHA-256 digest of a file's raw bytes.
//! Hashing is byte-exact: line endings and trailing whitespace are not
//! normalized, so any byte difference counts as a change.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::Error;

const HEX_LEN: usize = 64;

/// Hex-encoded SHA-256 digest of some content.
///
/// Deserializing accepts exactly 64 lowercase hex characters; anything else
/// is rejected with [`Error::InvalidFingerprint`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint raw bytes.
    pub fn of(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }

    /// First 12 hex characters, for display.
    pub fn short(&self) -> &str {
        self.0.get(..12).unwrap_or(&self.0)
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let well_formed = value.len() == HEX_LEN
            && value.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if well_formed {
            Ok(Self(value))
        } else {
            Err(Error::InvalidFingerprint { value })
        }
    }
}

impl From<Fingerprint> for String {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_deterministic() {
        assert_eq!(Fingerprint::of(b"test"), Fingerprint::of(b"test"));
    }

    #[test]
    fn different_content_different_fingerprint() {
        assert_ne!(Fingerprint::of(b"aaa"), Fingerprint::of(b"bbb"));
    }

    #[test]
    fn fingerprint_known_value() {
        assert_eq!(
            Fingerprint::of(b"hello world").as_hex(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn line_endings_are_not_normalized() {
        assert_ne!(Fingerprint::of(b"a\nb\n"), Fingerprint::of(b"a\r\nb\r\n"));
        assert_ne!(Fingerprint::of(b"line"), Fingerprint::of(b"line "));
    }

    #[test]
    fn deserialize_accepts_real_digest() {
        let fp = Fingerprint::of(b"x");
        let json = format!("\"{}\"", fp.as_hex());
        let back: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fp);
    }

    #[test]
    fn deserialize_rejects_malformed_digests() {
        let upper = Fingerprint::of(b"x").as_hex().to_uppercase();
        for bad in ["", "zz", "sha256:abc", upper.as_str()] {
            let json = serde_json::to_string(bad).unwrap();
            assert!(serde_json::from_str::<Fingerprint>(&json).is_err(), "accepted {bad:?}");
        }
        let non_ascii = format!("a{}", "é".repeat(40));
        assert!(Fingerprint::try_from(non_ascii).is_err());
    }

    #[test]
    fn serializes_as_bare_hex_string() {
        let fp = Fingerprint::of(b"x");
        let json = serde_json::to_string(&fp).unwrap();
        assert_eq!(json, format!("\"{}\"", fp.as_hex()));
    }
}

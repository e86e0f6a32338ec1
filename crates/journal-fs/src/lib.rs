//! Filesystem primitives for Journal Kit
//!
//! Provides normalized paths, atomic writes, content fingerprints and a
//! JSON document store. Everything above this crate talks to the
//! disk through these functions.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::Fingerprint;
pub use config::ConfigStore;
pub use constants::JournalPath;
pub use error::{Error, Result};
pub use path::{NormalizedPath, validate_relative_path};

//! Shared test utilities for the journal-kit workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`journal`]: [`TestJournal`] scratch journal with read/write/assert helpers

pub mod journal;

pub use journal::TestJournal;

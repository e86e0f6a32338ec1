//! Framework and AI-editor template catalog for Journal Kit.
//!
//! The catalog is a closed table over {framework} x {IDE}: resolving a
//! [`Selection`] yields the ordered list of [`TemplateEntry`] values the
//! journal should contain, with placeholders already substituted. IDE
//! specific layout (rule directories, per-folder `CLAUDE.md` files) lives in
//! the table, not in control flow.

pub mod catalog;
pub mod error;
pub mod render;
pub mod selection;

pub use catalog::{TemplateCatalog, TemplateEntry};
pub use error::{Error, Result};
pub use selection::{Framework, Ide, Selection};

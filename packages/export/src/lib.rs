//! # Pagecraft Export
//!
//! Turns an editor project into a static site: one HTML file per page and a
//! shared stylesheet holding the styles of every component type in use.
//!
//! The first page is always exported as `index.html`; the others are named
//! after their sanitized page names. Links of the form `page://<page id>`
//! are rewritten to those filenames, and references to missing pages become
//! `##`.
//!
//! ```rust,ignore
//! use pagecraft_editor::{Editor, EditorConfig};
//! use pagecraft_export::{export_project, ExportOptions};
//!
//! let editor = Editor::init(EditorConfig::default())?;
//! let bundle = export_project(editor.project(), editor.registry(), &ExportOptions::default())?;
//! bundle.write_to(Path::new("dist"))?;
//! ```

mod error;
mod exporter;
pub mod resolver;

pub use error::{ExportError, ExportResult};
pub use exporter::{
    export_project, ExportBundle, ExportOptions, ExportedFile, FilenameCollision,
};
pub use resolver::{page_slug, sanitize_filename, LinkResolver, LinkTarget};

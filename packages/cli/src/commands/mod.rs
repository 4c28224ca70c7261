pub mod blocks;
pub mod export;
pub mod init;
pub mod types;

pub use blocks::{blocks, BlocksArgs};
pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use types::{types, TypesArgs};

use crate::config::Config;
use anyhow::Result;
use pagecraft_editor::{Editor, PageId};
use std::path::Path;
use tracing::debug;

/// Build an editor holding the configured pages
///
/// Without a page list the project keeps the single seed page.
pub fn load_editor(config: &Config, cwd: &str) -> Result<Editor> {
    let mut editor = Editor::init(config.editor_config())?;
    if config.pages.is_empty() {
        return Ok(editor);
    }

    let seed = editor.pages()[0].id.clone();
    editor.remove_page(&seed)?;
    for page in &config.pages {
        let html = page.read_html(Path::new(cwd))?;
        editor.add_page_with_id(PageId::new(page.id.as_str()), page.name.as_str(), &html)?;
        debug!(page = %page.id, "Loaded page");
    }

    Ok(editor)
}

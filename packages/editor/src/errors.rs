//! Error types for the editor

use crate::component::ComponentId;
use crate::page::PageId;
use crate::plugins::PluginError;
use crate::registry::RegistryError;
use thiserror::Error;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Plugin(#[from] PluginError),

    #[error("Parse error: {0}")]
    Parse(#[from] pagecraft_markup::ParseError),

    #[error("Page not found: {0}")]
    PageNotFound(PageId),

    #[error("A page with id {0} already exists")]
    DuplicatePage(PageId),

    #[error("Component {component} not found on page {page}")]
    ComponentNotFound { page: PageId, component: ComponentId },

    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("`{child}` cannot be placed inside `{parent}`")]
    CannotNest { parent: String, child: String },
}

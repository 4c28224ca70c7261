//! # Block Catalog
//!
//! Ordered list of insertable blocks. Entries are templates: inserting one
//! instantiates its blueprint and never touches the catalog.

use crate::component::Component;
use crate::registry::{Blueprint, Registry, RegistryResult};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: String,
    pub label: String,
    /// Preview icon or markup snippet
    pub media: Option<String>,
    pub content: Blueprint,
    pub category: Option<String>,
    /// Select the new component after insertion
    pub select: bool,
    /// Activate the new component after insertion
    pub activate: bool,
    pub attributes: IndexMap<String, String>,
}

impl Block {
    pub fn new(id: impl Into<String>, content: Blueprint) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            media: None,
            content,
            category: None,
            select: false,
            activate: false,
            attributes: IndexMap::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn media(mut self, media: impl Into<String>) -> Self {
        self.media = Some(media.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Layer shared block options over this block's own
    pub fn with_props(mut self, props: &BlockProps) -> Self {
        if let Some(category) = &props.category {
            self.category = Some(category.clone());
        }
        if let Some(select) = props.select {
            self.select = select;
        }
        if let Some(activate) = props.activate {
            self.activate = activate;
        }
        self
    }
}

/// Options applied to every block a plugin adds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockProps {
    pub category: Option<String>,
    pub select: Option<bool>,
    pub activate: Option<bool>,
}

impl BlockProps {
    /// `Basic` category, selected and activated on drop
    pub fn basic() -> Self {
        Self {
            category: Some("Basic".to_string()),
            select: Some(true),
            activate: Some(true),
        }
    }
}

/// Where a new block goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    End,
    At(usize),
    Before(String),
    After(String),
}

/// Summary used by listings
#[derive(Debug, Clone, Serialize)]
pub struct BlockSummary<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub category: Option<&'a str>,
    #[serde(rename = "type")]
    pub type_id: &'a str,
}

#[derive(Debug, Clone, Default)]
pub struct BlockCatalog {
    blocks: Vec<Block>,
}

impl BlockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a block and return its index.
    ///
    /// A missing reference block appends at the end. Re-adding an existing
    /// id replaces that entry in place.
    pub fn add(&mut self, block: Block, position: Position) -> usize {
        if let Some(index) = self.index_of(&block.id) {
            debug!(block = %block.id, index, "Replaced block");
            self.blocks[index] = block;
            return index;
        }

        let index = match &position {
            Position::End => self.blocks.len(),
            Position::At(at) => (*at).min(self.blocks.len()),
            Position::Before(id) => self.index_of(id).unwrap_or(self.blocks.len()),
            Position::After(id) => self
                .index_of(id)
                .map(|i| i + 1)
                .unwrap_or(self.blocks.len()),
        };
        debug!(block = %block.id, index, ?position, "Added block");
        self.blocks.insert(index, block);
        index
    }

    pub fn get(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks grouped by category, groups in first-seen order
    pub fn by_category(&self) -> IndexMap<&str, Vec<&Block>> {
        let mut groups: IndexMap<&str, Vec<&Block>> = IndexMap::new();
        for block in &self.blocks {
            let category = block.category.as_deref().unwrap_or("");
            groups.entry(category).or_default().push(block);
        }
        groups
    }

    pub fn summaries(&self) -> Vec<BlockSummary<'_>> {
        self.blocks
            .iter()
            .map(|b| BlockSummary {
                id: &b.id,
                label: &b.label,
                category: b.category.as_deref(),
                type_id: &b.content.type_id,
            })
            .collect()
    }

    /// New component instance from a block's blueprint; `None` for unknown blocks
    pub fn instantiate(&self, id: &str, registry: &Registry) -> Option<RegistryResult<Component>> {
        self.get(id).map(|block| registry.instantiate(&block.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: &str) -> Block {
        Block::new(id, Blueprint::new("default"))
    }

    fn catalog() -> BlockCatalog {
        let mut catalog = BlockCatalog::new();
        for id in ["column1", "text", "column3-7", "image"] {
            catalog.add(block(id), Position::End);
        }
        catalog
    }

    #[test]
    fn test_relative_positions() {
        let mut catalog = catalog();
        assert_eq!(catalog.add(block("heading"), Position::Before("text".into())), 1);
        assert_eq!(catalog.add(block("section"), Position::After("column3-7".into())), 4);
        assert_eq!(
            catalog.ids(),
            vec!["column1", "heading", "text", "column3-7", "section", "image"]
        );
    }

    #[test]
    fn test_missing_reference_appends() {
        let mut catalog = catalog();
        assert_eq!(catalog.add(block("x"), Position::After("nope".into())), 4);
        assert_eq!(catalog.add(block("y"), Position::Before("nope".into())), 5);
        assert_eq!(catalog.add(block("z"), Position::At(99)), 6);
        assert_eq!(catalog.ids().last(), Some(&"z"));
    }

    #[test]
    fn test_readd_replaces_in_place() {
        let mut catalog = catalog();
        let index = catalog.add(block("text").label("Text block"), Position::End);
        assert_eq!(index, 1);
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get("text").unwrap().label, "Text block");
    }

    #[test]
    fn test_props_and_grouping() {
        let mut catalog = BlockCatalog::new();
        catalog.add(block("a").with_props(&BlockProps::basic()), Position::End);
        catalog.add(block("b"), Position::End);
        catalog.add(block("c").category("Basic"), Position::End);

        let a = catalog.get("a").unwrap();
        assert!(a.select && a.activate);
        let groups = catalog.by_category();
        assert_eq!(groups["Basic"].len(), 2);
        assert_eq!(groups[""].len(), 1);
    }
}

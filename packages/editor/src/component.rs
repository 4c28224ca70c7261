//! # Component Instances
//!
//! Runtime nodes of a page's document tree. The tree owns its components;
//! registries and catalogs only ever hold blueprints.

use indexmap::IndexMap;
use pagecraft_markup::{to_html, Element, Node};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub const DEFAULT_TYPE: &str = "default";
pub const WRAPPER_TYPE: &str = "wrapper";
pub const TEXTNODE_TYPE: &str = "textnode";
pub const COMMENT_TYPE: &str = "comment";

/// Property name routed to [`Component::tag_name`]
pub const TAG_NAME_PROP: &str = "tagName";

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique component identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ComponentId(u64);

impl ComponentId {
    pub fn next() -> Self {
        ComponentId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Component instance in a document tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    id: ComponentId,
    pub type_id: String,
    pub tag_name: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
    /// Inline style declarations
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub style: IndexMap<String, String>,
    /// First-class properties that are not HTML attributes
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub props: IndexMap<String, Value>,
    /// Text of `textnode` and `comment` components
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Component>,
}

impl Component {
    pub fn new(type_id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            id: ComponentId::next(),
            type_id: type_id.into(),
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
            style: IndexMap::new(),
            props: IndexMap::new(),
            content: String::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        let mut component = Self::new(TEXTNODE_TYPE, "");
        component.content = content.into();
        component
    }

    pub fn comment(content: impl Into<String>) -> Self {
        let mut component = Self::new(COMMENT_TYPE, "");
        component.content = content.into();
        component
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Text and comment nodes carry `content` instead of children
    pub fn is_content_node(&self) -> bool {
        matches!(self.type_id.as_str(), TEXTNODE_TYPE | COMMENT_TYPE)
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(name)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get_attribute("class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes().any(|c| c == name)
    }

    /// Add a class if not already present
    pub fn add_class(&mut self, name: &str) {
        if name.is_empty() || self.has_class(name) {
            return;
        }
        let class = match self.get_attribute("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim(), name)
            }
            _ => name.to_string(),
        };
        self.set_attribute("class", class);
    }

    pub fn get_prop(&self, name: &str) -> Option<Value> {
        if name == TAG_NAME_PROP {
            return Some(Value::String(self.tag_name.clone()));
        }
        self.props.get(name).cloned()
    }

    pub fn set_prop(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if name == TAG_NAME_PROP {
            if let Value::String(tag) = value {
                self.tag_name = tag;
            }
            return;
        }
        self.props.insert(name, value);
    }

    /// Boolean property, `default` when unset
    pub fn flag(&self, name: &str, default: bool) -> bool {
        self.props
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    /// Swap the children list in one step
    pub fn replace_children(&mut self, children: Vec<Component>) -> Vec<Component> {
        std::mem::replace(&mut self.children, children)
    }

    pub fn find(&self, id: ComponentId) -> Option<&Component> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Detach a descendant from the tree
    pub fn remove(&mut self, id: ComponentId) -> Option<Component> {
        if let Some(index) = self.children.iter().position(|c| c.id == id) {
            return Some(self.children.remove(index));
        }
        self.children.iter_mut().find_map(|child| child.remove(id))
    }

    /// Depth-first, pre-order traversal
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Component)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    pub fn style_text(&self) -> String {
        self.style
            .iter()
            .map(|(prop, value)| format!("{}: {};", prop, value))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Markup node for this component and its subtree
    pub fn to_node(&self) -> Node {
        match self.type_id.as_str() {
            TEXTNODE_TYPE => Node::text(self.content.clone()),
            COMMENT_TYPE => Node::comment(self.content.clone()),
            _ => {
                let mut element = Element::new(self.tag_name.clone());
                element.attributes = self.attributes.clone();
                if !self.style.is_empty() {
                    element.attributes.insert("style".to_string(), self.style_text());
                }
                element.children = self.children.iter().map(Component::to_node).collect();
                Node::Element(element)
            }
        }
    }

    pub fn to_html(&self) -> String {
        to_html(&[self.to_node()])
    }

    /// Concatenated text of the subtree
    pub fn text_content(&self) -> String {
        match self.type_id.as_str() {
            TEXTNODE_TYPE => self.content.clone(),
            COMMENT_TYPE => String::new(),
            _ => self.children.iter().map(Component::text_content).collect(),
        }
    }

    pub fn inner_html(&self) -> String {
        let nodes: Vec<Node> = self.children.iter().map(Component::to_node).collect();
        to_html(&nodes)
    }
}

/// Split `a: b; c: d` into ordered declarations
pub fn parse_inline_style(text: &str) -> IndexMap<String, String> {
    text.split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim();
            let value = value.trim();
            (!prop.is_empty() && !value.is_empty()).then(|| (prop.to_string(), value.to_string()))
        })
        .collect()
}

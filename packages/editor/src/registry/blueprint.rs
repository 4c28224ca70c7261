use indexmap::IndexMap;
use serde_json::Value;

/// Initial children of a component
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Plain text, becomes a single text node
    Text(String),
    /// Markup parsed and imported through type recognition
    Markup(String),
    Components(Vec<Blueprint>),
}

/// Recipe for a component instance: a type plus initial state
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    pub type_id: String,
    pub tag_name: Option<String>,
    pub attributes: IndexMap<String, String>,
    pub style: IndexMap<String, String>,
    pub props: IndexMap<String, Value>,
    /// Overrides the type's default content when set
    pub content: Option<Content>,
}

impl Blueprint {
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            tag_name: None,
            attributes: IndexMap::new(),
            style: IndexMap::new(),
            props: IndexMap::new(),
            content: None,
        }
    }

    pub fn tag_name(mut self, tag: impl Into<String>) -> Self {
        self.tag_name = Some(tag.into());
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn style(mut self, prop: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(prop.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Some(Content::Text(text.into()));
        self
    }

    pub fn components(mut self, children: Vec<Blueprint>) -> Self {
        self.content = Some(Content::Components(children));
        self
    }
}

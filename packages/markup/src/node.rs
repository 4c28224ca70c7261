use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Elements that never have children or a closing tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose body is raw text, not markup
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea"];

/// Elements that are closed implicitly when an ancestor closes
pub const OPTIONAL_END_ELEMENTS: &[&str] = &["p", "li", "option", "td", "th", "tr", "dt", "dd"];

/// Block-level elements that end an open `<p>`
const P_CLOSERS: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "div", "dl", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "main", "menu", "nav", "ol", "p", "pre", "section", "table", "ul",
];

fn one_of(tag: &str, set: &[&str]) -> bool {
    set.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Whether opening `next` ends the still-open `open` element
pub fn closes_implicitly(open: &str, next: &str) -> bool {
    let open = open.to_ascii_lowercase();
    match open.as_str() {
        "li" => next.eq_ignore_ascii_case("li"),
        "option" => one_of(next, &["option", "optgroup"]),
        "dt" | "dd" => one_of(next, &["dt", "dd"]),
        "tr" => next.eq_ignore_ascii_case("tr"),
        "td" | "th" => one_of(next, &["td", "th", "tr"]),
        "p" => one_of(next, P_CLOSERS),
        _ => false,
    }
}

pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

pub fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

pub fn has_optional_end(tag: &str) -> bool {
    OPTIONAL_END_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Parsed markup node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text { content: String },
    Comment { content: String },
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text {
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        Node::Comment {
            content: content.into(),
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// True for text nodes made only of whitespace
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text { content } if content.trim().is_empty())
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Element(element) => element.text_content(),
            Node::Text { content } => content.clone(),
            Node::Comment { .. } => String::new(),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// HTML element with ordered attributes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// True when the attribute is present with a non-empty value
    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some_and(|v| !v.is_empty())
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get_attribute("class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes().any(|c| c == class_name)
    }

    /// Case-insensitive tag name check against any of `tags`
    pub fn has_tag_name<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().any(|t| t.as_ref().eq_ignore_ascii_case(&self.tag))
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}

use crate::entities::escape_html;
use crate::node::{is_raw_text, is_void, Element, Node};

/// Options for markup serialization
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Pretty print with one element per line
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: "  ".to_string(),
        }
    }
}

impl SerializeOptions {
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Default::default()
        }
    }
}

/// Buffered markup writer tracking indentation depth
pub struct Serializer {
    options: SerializeOptions,
    depth: usize,
    buffer: String,
}

impl Serializer {
    pub fn new(options: SerializeOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    pub fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    pub fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    pub fn write_nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.write_node(node);
        }
    }

    pub fn write_node(&mut self, node: &Node) {
        match node {
            Node::Element(element) => self.write_element(element),
            Node::Text { content } => {
                if self.options.pretty {
                    let trimmed = content.trim();
                    if !trimmed.is_empty() {
                        self.add_line(&escape_html(trimmed));
                    }
                } else {
                    self.add(&escape_html(content));
                }
            }
            Node::Comment { content } => self.add_line(&format!("<!--{}-->", content)),
        }
    }

    pub fn write_element(&mut self, element: &Element) {
        let open = open_tag(&element.tag, element.attributes.iter());

        if is_void(&element.tag) {
            self.add_line(&open);
            return;
        }

        if is_raw_text(&element.tag) {
            let body = element.text_content();
            self.add_line(&format!("{}{}</{}>", open, body, element.tag));
            return;
        }

        if !self.options.pretty || has_inline_content(&element.children) {
            let mut inner = Serializer::new(SerializeOptions::default());
            inner.write_nodes(&element.children);
            let inner = inner.finish();
            let inner = if self.options.pretty { inner.trim() } else { &inner };
            self.add_line(&format!("{}{}</{}>", open, inner, element.tag));
            return;
        }

        self.add_line(&open);
        self.indent();
        self.write_nodes(&element.children);
        self.dedent();
        self.add_line(&format!("</{}>", element.tag));
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

/// Children holding only text, or any non-blank text, are written on one
/// line so pretty printing never adds whitespace between words
fn has_inline_content(children: &[Node]) -> bool {
    let mut only_text = true;
    for child in children {
        match child {
            Node::Text { content } if !content.trim().is_empty() => return true,
            Node::Text { .. } => {}
            _ => only_text = false,
        }
    }
    only_text
}

/// Render `<tag attr="value" ...>`
pub fn open_tag<'a>(
    tag: &str,
    attributes: impl Iterator<Item = (&'a String, &'a String)>,
) -> String {
    let mut out = format!("<{}", tag);
    for (name, value) in attributes {
        out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
    }
    out.push('>');
    out
}

/// Serialize nodes compactly, the format used for inner HTML
pub fn to_html(nodes: &[Node]) -> String {
    let mut serializer = Serializer::new(SerializeOptions::default());
    serializer.write_nodes(nodes);
    serializer.finish()
}

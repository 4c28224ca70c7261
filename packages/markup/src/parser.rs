use crate::entities::decode_entities;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{ContentToken, TagToken};
use crate::node::{closes_implicitly, has_optional_end, is_raw_text, is_void, Element, Node};
use logos::{Lexer, Logos};

/// Parse an HTML fragment into a list of top-level nodes
pub fn parse_html(source: &str) -> ParseResult<Vec<Node>> {
    Parser::new(source).parse()
}

/// Parse a fragment the way browsers do, closing what was left open
///
/// Stray closing tags are dropped, elements still open at the end are
/// closed, and unrecognized markup is kept as text. Every repair is
/// reported in [`Recovered::errors`]. Only a malformed start tag fails.
pub fn parse_html_lenient(source: &str) -> ParseResult<Recovered> {
    Parser::new(source).lenient().parse_recovering()
}

/// Nodes of a lenient parse plus the problems that were repaired
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recovered {
    pub nodes: Vec<Node>,
    pub errors: Vec<ParseError>,
}

/// Element still waiting for its closing tag
struct OpenElement {
    element: Element,
    pos: usize,
}

/// Stack-based HTML fragment parser
pub struct Parser<'src> {
    source: &'src str,
    stack: Vec<OpenElement>,
    roots: Vec<Node>,
    lenient: bool,
    repaired: Vec<ParseError>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            stack: Vec::new(),
            roots: Vec::new(),
            lenient: false,
            repaired: Vec::new(),
        }
    }

    /// Repair unbalanced markup instead of failing
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    pub fn parse(self) -> ParseResult<Vec<Node>> {
        self.parse_recovering().map(|recovered| recovered.nodes)
    }

    pub fn parse_recovering(mut self) -> ParseResult<Recovered> {
        let mut lex = ContentToken::lexer(self.source);

        while let Some(token) = lex.next() {
            let pos = lex.span().start;
            match token {
                Ok(ContentToken::Text(text)) => self.push_text(text),
                Ok(ContentToken::Lt) => self.push_text("<"),
                Ok(ContentToken::Comment(body)) => self.attach(Node::comment(body)),
                Ok(ContentToken::Doctype) => {}
                Ok(ContentToken::OpenTag(name)) => {
                    let mut tag_lex = lex.morph::<TagToken>();
                    let (mut element, self_closing) = parse_open_tag(&mut tag_lex, name, pos)?;
                    lex = tag_lex.morph();
                    self.close_implied_by(&element.tag);

                    if self_closing || is_void(&element.tag) {
                        self.attach(Node::Element(element));
                    } else if is_raw_text(&element.tag) {
                        match read_raw_text(&mut lex, &element.tag, pos) {
                            Ok(raw) => {
                                if !raw.is_empty() {
                                    element.children.push(Node::text(raw));
                                }
                                self.stack.push(OpenElement { element, pos });
                            }
                            Err(err) => {
                                // Lenient: the body runs to the end of input
                                self.repair(err)?;
                                let rest = lex.remainder();
                                lex.bump(rest.len());
                                if !rest.is_empty() {
                                    element.children.push(Node::text(rest));
                                }
                                self.attach(Node::Element(element));
                            }
                        }
                    } else {
                        self.stack.push(OpenElement { element, pos });
                    }
                }
                Ok(ContentToken::CloseTag(name)) => self.close(name, pos)?,
                Err(()) => {
                    let err = ParseError::invalid_syntax(
                        pos,
                        format!("Unrecognized markup: {:?}", lex.slice()),
                    );
                    self.repair(err)?;
                    self.push_text(lex.slice());
                }
            }
        }

        self.finish()
    }

    /// Pop open siblings like `<li>` that a new start tag ends
    fn close_implied_by(&mut self, next: &str) {
        while self
            .stack
            .last()
            .is_some_and(|open| closes_implicitly(&open.element.tag, next))
        {
            self.pop();
        }
    }

    fn push_text(&mut self, text: &str) {
        let decoded = decode_entities(text);
        let children = match self.stack.last_mut() {
            Some(open) => &mut open.element.children,
            None => &mut self.roots,
        };
        // Merge with a preceding text node (e.g. text split by a stray `<`)
        if let Some(Node::Text { content }) = children.last_mut() {
            content.push_str(&decoded);
        } else {
            children.push(Node::text(decoded.into_owned()));
        }
    }

    fn attach(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(open) => open.element.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn close(&mut self, name: &str, pos: usize) -> ParseResult<()> {
        if is_void(name) {
            return Ok(());
        }

        let Some(depth) = self
            .stack
            .iter()
            .rposition(|open| open.element.tag.eq_ignore_ascii_case(name))
        else {
            let err = ParseError::unexpected_close_tag(
                pos,
                name,
                self.stack.last().map(|open| open.element.tag.clone()),
            );
            return self.repair(err);
        };

        // Everything above the matching element must tolerate implicit closing
        if let Some(blocking) = self.stack[depth + 1..]
            .iter()
            .find(|open| !has_optional_end(&open.element.tag))
        {
            let err =
                ParseError::unexpected_close_tag(pos, name, Some(blocking.element.tag.clone()));
            self.repair(err)?;
        }

        while self.stack.len() > depth {
            self.pop();
        }
        Ok(())
    }

    /// Record `err` in lenient mode, fail otherwise
    fn repair(&mut self, err: ParseError) -> ParseResult<()> {
        if self.lenient {
            self.repaired.push(err);
            Ok(())
        } else {
            Err(err)
        }
    }

    fn pop(&mut self) {
        if let Some(open) = self.stack.pop() {
            self.attach(Node::Element(open.element));
        }
    }

    fn finish(mut self) -> ParseResult<Recovered> {
        while let Some(open) = self.stack.last() {
            if !has_optional_end(&open.element.tag) {
                let err = ParseError::unclosed_tag(open.pos, open.element.tag.clone());
                self.repair(err)?;
            }
            self.pop();
        }
        Ok(Recovered {
            nodes: self.roots,
            errors: self.repaired,
        })
    }
}

fn parse_open_tag<'src>(
    lex: &mut Lexer<'src, TagToken<'src>>,
    name: &str,
    start: usize,
) -> ParseResult<(Element, bool)> {
    let mut element = Element::new(name);
    let mut pending: Option<&'src str> = None;
    let mut expect_value = false;

    loop {
        let Some(token) = lex.next() else {
            return Err(ParseError::unexpected_eof(lex.span().end));
        };
        let pos = lex.span().start;

        match token {
            Ok(TagToken::Name(value)) if expect_value => {
                if let Some(attr) = pending.take() {
                    element
                        .attributes
                        .insert(attr.to_string(), decode_entities(value).into_owned());
                }
                expect_value = false;
            }
            Ok(TagToken::Name(attr)) => {
                if let Some(prev) = pending.replace(attr) {
                    element.attributes.insert(prev.to_string(), String::new());
                }
            }
            Ok(TagToken::Eq) => {
                if pending.is_none() || expect_value {
                    return Err(ParseError::invalid_syntax(pos, "Unexpected '='"));
                }
                expect_value = true;
            }
            Ok(TagToken::Quoted(value)) => {
                if !expect_value {
                    return Err(ParseError::invalid_syntax(
                        pos,
                        "Quoted value without attribute name",
                    ));
                }
                if let Some(attr) = pending.take() {
                    element
                        .attributes
                        .insert(attr.to_string(), decode_entities(value).into_owned());
                }
                expect_value = false;
            }
            Ok(end @ (TagToken::End | TagToken::SelfClose)) => {
                if expect_value {
                    return Err(ParseError::invalid_syntax(pos, "Missing attribute value"));
                }
                if let Some(attr) = pending.take() {
                    element.attributes.insert(attr.to_string(), String::new());
                }
                return Ok((element, end == TagToken::SelfClose));
            }
            Err(()) => {
                return Err(ParseError::invalid_syntax(
                    pos,
                    format!("Malformed <{}> tag starting at {}", name, start),
                ));
            }
        }
    }
}

/// Consume the body of a raw-text element up to (not including) its closing tag
fn read_raw_text<'src>(
    lex: &mut Lexer<'src, ContentToken<'src>>,
    tag: &str,
    pos: usize,
) -> ParseResult<&'src str> {
    let rest = lex.remainder();
    let needle = format!("</{}", tag.to_ascii_lowercase());
    let end = rest
        .to_ascii_lowercase()
        .find(&needle)
        .ok_or_else(|| ParseError::unclosed_tag(pos, tag))?;
    lex.bump(end);
    Ok(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_element(source: &str) -> Element {
        let nodes = parse_html(source).unwrap();
        nodes[0].as_element().cloned().unwrap()
    }

    #[test]
    fn test_parse_nested() {
        let el = first_element(r#"<section class="gjs-section"><div>Hi</div></section>"#);
        assert_eq!(el.tag, "section");
        assert!(el.has_class("gjs-section"));
        assert_eq!(el.children.len(), 1);
        assert_eq!(el.text_content(), "Hi");
    }

    #[test]
    fn test_parse_void_and_self_closing() {
        let nodes = parse_html(r#"<img src="a.png"><br/><span/>"#).unwrap();
        assert_eq!(nodes.len(), 3);
        for node in &nodes {
            assert!(node.as_element().unwrap().children.is_empty());
        }
    }

    #[test]
    fn test_parse_unquoted_and_empty_attributes() {
        let el = first_element("<input type=checkbox required>");
        assert_eq!(el.get_attribute("type"), Some("checkbox"));
        assert_eq!(el.get_attribute("required"), Some(""));
        assert!(!el.has_attribute("required"));
    }

    #[test]
    fn test_raw_text_is_not_parsed() {
        let el = first_element("<style>.a > .b { color: red; }</style>");
        assert_eq!(el.text_content(), ".a > .b { color: red; }");
    }

    #[test]
    fn test_optional_end_tags() {
        let el = first_element("<ul><li>One<li>Two</ul>");
        assert_eq!(el.children.len(), 2);
    }

    #[test]
    fn test_option_siblings() {
        let el = first_element(r#"<select><option value="a">A<option value="b">B</select>"#);
        assert_eq!(el.children.len(), 2);
        assert_eq!(el.children[1].as_element().unwrap().get_attribute("value"), Some("b"));
        assert_eq!(el.children[0].text_content(), "A");
    }

    #[test]
    fn test_table_cells_close_on_new_row() {
        let el = first_element("<table><tr><td>1<td>2<tr><td>3</table>");
        assert_eq!(el.children.len(), 2);
        assert_eq!(el.children[0].as_element().unwrap().children.len(), 2);
    }

    #[test]
    fn test_paragraph_closed_by_block() {
        let nodes = parse_html("<p>One<div>Two</div>").unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].text_content(), "One");
    }

    #[test]
    fn test_mismatched_close_is_error() {
        let err = parse_html("<div><span></div>").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedCloseTag { .. }));
    }

    #[test]
    fn test_unclosed_is_error() {
        let err = parse_html("<svg><path d='M0 0'>").unwrap_err();
        assert!(matches!(err, ParseError::UnclosedTag { ref tag, .. } if tag == "path"));
    }

    #[test]
    fn test_lenient_closes_unclosed_elements() {
        let recovered = parse_html_lenient("<div>Hello").unwrap();
        assert_eq!(recovered.nodes.len(), 1);
        assert_eq!(recovered.nodes[0].text_content(), "Hello");
        assert!(matches!(
            recovered.errors.as_slice(),
            [ParseError::UnclosedTag { tag, .. }] if tag == "div"
        ));
    }

    #[test]
    fn test_lenient_drops_stray_close() {
        let recovered = parse_html_lenient("<p>Hi</p></div>").unwrap();
        assert_eq!(recovered.nodes.len(), 1);
        assert_eq!(recovered.errors.len(), 1);

        let recovered = parse_html_lenient("<div><span>x</div>").unwrap();
        assert_eq!(recovered.nodes[0].text_content(), "x");
        assert_eq!(recovered.errors.len(), 1);
    }

    #[test]
    fn test_lenient_clean_input_has_no_errors() {
        let recovered = parse_html_lenient("<ul><li>a<li>b</ul>").unwrap();
        assert!(recovered.errors.is_empty());
        assert_eq!(recovered.nodes, parse_html("<ul><li>a<li>b</ul>").unwrap());
    }

    #[test]
    fn test_entities_decoded() {
        let nodes = parse_html("Fish &amp; Chips &lt;3").unwrap();
        assert_eq!(nodes, vec![Node::text("Fish & Chips <3")]);
    }
}

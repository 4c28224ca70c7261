//! # Pagecraft Markup
//!
//! Parses HTML fragments into a small node tree and serializes them back.
//! Used for block media, code traits, project seeds and static export.

pub mod entities;
pub mod error;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod serializer;

pub use entities::{decode_entities, escape_html};
pub use error::{ParseError, ParseResult};
pub use node::{is_void, Element, Node};
pub use parser::{parse_html, parse_html_lenient, Parser, Recovered};
pub use serializer::{open_tag, to_html, SerializeOptions, Serializer};

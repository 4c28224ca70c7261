//! Lexer for HTML fragments using logos
//!
//! Markup needs two token sets: one for document content (text, tags,
//! comments) and one for the inside of an opening tag (attributes). The
//! parser switches between them with [`logos::Lexer::morph`].

use logos::{Lexer, Logos};

/// Tokens found between tags
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
pub enum ContentToken<'src> {
    #[token("<!--", comment_body)]
    Comment(&'src str),

    #[regex(r"<![dD][oO][cC][tT][yY][pP][eE][^>]*>")]
    Doctype,

    #[regex(r"</[a-zA-Z][a-zA-Z0-9:_\-]*[ \t\r\n]*>", close_tag_name)]
    CloseTag(&'src str),

    /// `<name`, the attribute list follows and is lexed by [`TagToken`]
    #[regex(r"<[a-zA-Z][a-zA-Z0-9:_\-]*", |lex| &lex.slice()[1..])]
    OpenTag(&'src str),

    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'src str),

    /// A `<` that does not start a tag is plain text
    #[token("<")]
    Lt,
}

/// Tokens inside an opening tag
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TagToken<'src> {
    #[regex(r#"[^ \t\r\n\f"'<>=]+"#, |lex| lex.slice())]
    Name(&'src str),

    #[token("=")]
    Eq,

    #[regex(r#""[^"]*""#, strip_quotes)]
    #[regex(r"'[^']*'", strip_quotes)]
    Quoted(&'src str),

    #[token(">")]
    End,

    #[token("/>")]
    SelfClose,
}

fn comment_body<'src>(lex: &mut Lexer<'src, ContentToken<'src>>) -> Option<&'src str> {
    let rest = lex.remainder();
    let end = rest.find("-->")?;
    lex.bump(end + 3);
    Some(&rest[..end])
}

fn close_tag_name<'src>(lex: &mut Lexer<'src, ContentToken<'src>>) -> &'src str {
    let slice = lex.slice();
    slice[2..slice.len() - 1].trim_end()
}

fn strip_quotes<'src>(lex: &mut Lexer<'src, TagToken<'src>>) -> &'src str {
    let slice = lex.slice();
    &slice[1..slice.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_tokens(source: &str) -> Vec<ContentToken<'_>> {
        ContentToken::lexer(source).filter_map(|t| t.ok()).collect()
    }

    #[test]
    fn test_content_tokens() {
        let tokens = content_tokens("<h1>Hi</h1>");
        assert_eq!(
            tokens,
            vec![
                ContentToken::OpenTag("h1"),
                ContentToken::Text(">Hi"),
                ContentToken::CloseTag("h1"),
            ]
        );
    }

    #[test]
    fn test_comment_token() {
        let tokens = content_tokens("<!-- note -->x");
        assert_eq!(
            tokens,
            vec![ContentToken::Comment(" note "), ContentToken::Text("x")]
        );
    }

    #[test]
    fn test_stray_lt_is_separate_token() {
        let tokens = content_tokens("a < b");
        assert_eq!(
            tokens,
            vec![
                ContentToken::Text("a "),
                ContentToken::Lt,
                ContentToken::Text(" b"),
            ]
        );
    }

    #[test]
    fn test_tag_tokens() {
        let tokens: Vec<_> = TagToken::lexer(r#" class="a b" hidden data-x='1'>"#)
            .filter_map(|t| t.ok())
            .collect();
        assert_eq!(
            tokens,
            vec![
                TagToken::Name("class"),
                TagToken::Eq,
                TagToken::Quoted("a b"),
                TagToken::Name("hidden"),
                TagToken::Name("data-x"),
                TagToken::Eq,
                TagToken::Quoted("1"),
                TagToken::End,
            ]
        );
    }
}

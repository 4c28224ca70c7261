//! Page filenames and internal link rewriting.
//!
//! Internal links look like `page://<page id>`. At export they become
//! `./<slug>` where the slug is `index.html` for the first page and the
//! sanitized page name plus `.html` for every other page. Slugs are derived
//! from the current page order and names every time; nothing is cached.

use once_cell::sync::Lazy;
use pagecraft_editor::Page;
use regex::Regex;
use std::borrow::Cow;

/// Marker of an internal page reference
pub const PAGE_PREFIX: &str = "page://";

/// Substituted for references to pages that do not exist
pub const UNRESOLVED_HREF: &str = "##";

pub const INDEX_FILENAME: &str = "index.html";

static UNSAFE_FILENAME_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Lower-case `name` and collapse every run of other characters into `_`
pub fn sanitize_filename(name: &str) -> String {
    let lower = name.to_lowercase();
    UNSAFE_FILENAME_CHARS.replace_all(&lower, "_").into_owned()
}

/// Exported filename of the page at `index`
pub fn page_slug(index: usize, page: &Page) -> String {
    if index == 0 {
        INDEX_FILENAME.to_string()
    } else {
        format!("{}.html", sanitize_filename(page.name()))
    }
}

/// Outcome of resolving one href
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    /// Not an internal reference
    External(&'a str),
    Page(String),
    Unresolved { page_id: &'a str },
}

impl LinkTarget<'_> {
    pub fn href(&self) -> Cow<'_, str> {
        match self {
            LinkTarget::External(href) => Cow::Borrowed(href),
            LinkTarget::Page(href) => Cow::Borrowed(href.as_str()),
            LinkTarget::Unresolved { .. } => Cow::Borrowed(UNRESOLVED_HREF),
        }
    }
}

/// Resolves internal page references against an ordered page list
#[derive(Debug, Clone, Copy)]
pub struct LinkResolver<'p> {
    pages: &'p [Page],
}

impl<'p> LinkResolver<'p> {
    pub fn new(pages: &'p [Page]) -> Self {
        Self { pages }
    }

    /// Slug of the page with this id, if present
    pub fn slug_of(&self, page_id: &str) -> Option<String> {
        self.pages
            .iter()
            .position(|p| p.id.as_str() == page_id)
            .map(|index| page_slug(index, &self.pages[index]))
    }

    pub fn resolve<'h>(&self, href: &'h str) -> LinkTarget<'h> {
        let Some(page_id) = href.strip_prefix(PAGE_PREFIX) else {
            return LinkTarget::External(href);
        };
        match self.slug_of(page_id) {
            Some(slug) => LinkTarget::Page(format!("./{}", slug)),
            None => LinkTarget::Unresolved { page_id },
        }
    }

    /// Rewritten href: unchanged, `./<slug>`, or `##`
    pub fn resolve_href(&self, href: &str) -> String {
        self.resolve(href).href().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_editor::{Component, PageId};

    fn pages() -> Vec<Page> {
        [("home", "Home page"), ("about", "About Us"), ("faq", "F.A.Q.!")]
            .into_iter()
            .map(|(id, name)| Page::new(PageId::new(id), name, Component::new("wrapper", "body")))
            .collect()
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("About Us"), "about_us");
        assert_eq!(sanitize_filename("F.A.Q.!"), "f_a_q_");
        assert_eq!(sanitize_filename("  Spaced  Out "), "_spaced_out_");
        assert_eq!(sanitize_filename("v2"), "v2");
    }

    #[test]
    fn test_resolve_hrefs() {
        let pages = pages();
        let resolver = LinkResolver::new(&pages);

        assert_eq!(resolver.resolve_href("page://home"), "./index.html");
        assert_eq!(resolver.resolve_href("page://about"), "./about_us.html");
        assert_eq!(resolver.resolve_href("page://faq"), "./f_a_q_.html");
        assert_eq!(resolver.resolve_href("page://nope"), "##");
        assert_eq!(resolver.resolve_href("https://example.com"), "https://example.com");
        assert_eq!(resolver.resolve_href("#top"), "#top");
    }

    #[test]
    fn test_slug_follows_order() {
        let mut pages = pages();
        pages.swap(0, 1);
        let resolver = LinkResolver::new(&pages);

        assert_eq!(resolver.resolve_href("page://about"), "./index.html");
        assert_eq!(resolver.resolve_href("page://home"), "./home_page.html");
    }

    #[test]
    fn test_unresolved_target() {
        let pages = pages();
        let resolver = LinkResolver::new(&pages);
        assert_eq!(
            resolver.resolve("page://gone"),
            LinkTarget::Unresolved { page_id: "gone" }
        );
    }
}

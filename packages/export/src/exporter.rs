//! # Static Export
//!
//! Renders every page of a project to a standalone HTML document. Type
//! styles go to one shared stylesheet (or inline `<style>` per page) and
//! internal `page://` links are rewritten to relative filenames.

use crate::error::ExportResult;
use crate::resolver::{page_slug, LinkResolver, LinkTarget, UNRESOLVED_HREF};
use indexmap::IndexSet;
use pagecraft_editor::{Page, Project, Registry};
use pagecraft_markup::{escape_html, Element, Node, SerializeOptions, Serializer};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Options for static export
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Embed type styles in each page instead of a shared stylesheet
    pub inline_css: bool,
    /// Stylesheet path relative to the output root
    pub css_path: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            inline_css: false,
            css_path: "css/style.css".to_string(),
        }
    }
}

/// One generated file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedFile {
    /// Path relative to the output root
    pub path: String,
    pub contents: String,
}

/// A page whose filename was already taken by an earlier page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilenameCollision {
    pub filename: String,
    /// Name of the page that keeps the file
    pub kept: String,
    /// Name of the page left out of the export
    pub skipped: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportBundle {
    pub files: Vec<ExportedFile>,
    /// Internal links that pointed at missing pages
    pub unresolved_links: usize,
    pub collisions: Vec<FilenameCollision>,
}

impl ExportBundle {
    pub fn get(&self, path: &str) -> Option<&ExportedFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }

    /// Write every file under `dir`, creating directories as needed
    pub fn write_to(&self, dir: &Path) -> ExportResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let target = dir.join(&file.path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, &file.contents)?;
            written.push(target);
        }
        Ok(written)
    }
}

/// Export every page of the project as static HTML plus a shared stylesheet
#[instrument(skip_all, fields(pages = project.len()))]
pub fn export_project(
    project: &Project,
    registry: &Registry,
    options: &ExportOptions,
) -> ExportResult<ExportBundle> {
    info!("Starting export");

    let pages = project.pages();
    let resolver = LinkResolver::new(pages);
    let mut bundle = ExportBundle::default();
    let mut filenames: Vec<(String, &str)> = Vec::with_capacity(pages.len());

    for (index, page) in pages.iter().enumerate() {
        let filename = page_slug(index, page);
        // Links to either page resolve to the first one holding the name
        if let Some((_, kept)) = filenames.iter().find(|(f, _)| *f == filename) {
            warn!(page = %page.name, kept = %kept, file = %filename, "Filename already taken");
            bundle.collisions.push(FilenameCollision {
                filename,
                kept: kept.to_string(),
                skipped: page.name.clone(),
            });
            continue;
        }

        let mut body = page.root.to_node();
        bundle.unresolved_links += rewrite_links(&mut body, &resolver, page);

        let css = if options.inline_css {
            Some(join_css(registry.collect_styles(&page.root)))
        } else {
            None
        };
        let contents = render_document(page, &body, css.as_deref(), options);
        debug!(page = %page.name, file = %filename, "Rendered page");

        filenames.push((filename.clone(), page.name.as_str()));
        bundle.files.push(ExportedFile {
            path: filename,
            contents,
        });
    }

    if !options.inline_css {
        let styles: IndexSet<&str> = pages
            .iter()
            .flat_map(|p| registry.collect_styles(&p.root))
            .collect();
        bundle.files.push(ExportedFile {
            path: options.css_path.clone(),
            contents: join_css(styles.into_iter().collect()),
        });
    }

    info!(
        files = bundle.files.len(),
        unresolved_links = bundle.unresolved_links,
        collisions = bundle.collisions.len(),
        "Export finished"
    );
    Ok(bundle)
}

/// Pass every `href` in the tree through the resolver; returns the unresolved count
fn rewrite_links(node: &mut Node, resolver: &LinkResolver<'_>, page: &Page) -> usize {
    let Node::Element(element) = node else {
        return 0;
    };

    let mut unresolved = 0;
    if let Some(href) = element.attributes.get_mut("href") {
        let rewritten = match resolver.resolve(href) {
            LinkTarget::External(_) => None,
            LinkTarget::Page(target) => Some(target),
            LinkTarget::Unresolved { page_id } => {
                warn!(page = %page.name, target = page_id, "Unresolved page reference");
                unresolved += 1;
                Some(UNRESOLVED_HREF.to_string())
            }
        };
        if let Some(rewritten) = rewritten {
            *href = rewritten;
        }
    }

    for child in &mut element.children {
        unresolved += rewrite_links(child, resolver, page);
    }
    unresolved
}

fn join_css(styles: Vec<&str>) -> String {
    let mut css = styles
        .iter()
        .map(|s| s.trim())
        .collect::<Vec<_>>()
        .join("\n\n");
    if !css.is_empty() {
        css.push('\n');
    }
    css
}

fn render_document(
    page: &Page,
    body: &Node,
    css: Option<&str>,
    options: &ExportOptions,
) -> String {
    let mut out = Serializer::new(SerializeOptions {
        pretty: options.pretty,
        indent: options.indent.clone(),
    });

    out.add_line("<!DOCTYPE html>");
    out.add_line("<html>");
    out.indent();

    out.add_line("<head>");
    out.indent();
    out.add_line("<meta charset=\"UTF-8\">");
    out.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    out.add_line(&format!("<title>{}</title>", escape_html(&page.name)));
    match css {
        Some(css) if !css.is_empty() => {
            out.add_line("<style>");
            out.indent();
            for line in css.lines().filter(|l| !l.is_empty()) {
                out.add_line(line);
            }
            out.dedent();
            out.add_line("</style>");
        }
        Some(_) => {}
        None => out.add_line(&format!(
            "<link rel=\"stylesheet\" href=\"./{}\">",
            escape_html(&options.css_path)
        )),
    }
    out.dedent();
    out.add_line("</head>");

    match body {
        Node::Element(root) => write_body(&mut out, root),
        other => out.write_node(other),
    }

    out.dedent();
    out.add_line("</html>");
    out.finish()
}

/// The page root always renders as `<body>`, whatever tag its type uses
fn write_body(out: &mut Serializer, root: &Element) {
    let body = Element {
        tag: "body".to_string(),
        attributes: root.attributes.clone(),
        children: root.children.clone(),
    };
    out.write_element(&body);
}

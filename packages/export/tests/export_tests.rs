//! End-to-end export tests

use pagecraft_editor::{Editor, EditorConfig, PageId};
use pagecraft_export::{export_project, ExportBundle, ExportOptions, FilenameCollision};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn export(editor: &Editor, options: &ExportOptions) -> ExportBundle {
    export_project(editor.project(), editor.registry(), options).unwrap()
}

fn site() -> Editor {
    let mut editor = Editor::init(EditorConfig::default()).unwrap();
    let home = editor.pages()[0].id.clone();

    editor
        .add_page_with_id(
            PageId::new("about"),
            "About Us",
            &format!(r#"<a href="page://{}">Back home</a>"#, home),
        )
        .unwrap();
    editor
        .add_page_with_id(
            PageId::new("faq"),
            "F.A.Q.!",
            concat!(
                r#"<a href="page://about">About</a>"#,
                r#"<a href="page://gone">Gone</a>"#,
                r#"<a href="https://example.com">Out</a>"#,
            ),
        )
        .unwrap();
    editor
}

#[test]
fn test_filenames_follow_page_order() {
    let editor = site();
    let bundle = export(&editor, &ExportOptions::default());

    assert_eq!(
        bundle.paths(),
        vec!["index.html", "about_us.html", "f_a_q_.html", "css/style.css"]
    );
}

#[test]
fn test_links_are_rewritten() {
    let editor = site();
    let bundle = export(&editor, &ExportOptions::default());

    let about = &bundle.get("about_us.html").unwrap().contents;
    assert!(about.contains(r#"href="./index.html""#));

    let faq = &bundle.get("f_a_q_.html").unwrap().contents;
    assert!(faq.contains(r#"href="./about_us.html""#));
    assert!(faq.contains(r###"href="##""###));
    assert!(faq.contains(r#"href="https://example.com""#));
    assert!(!faq.contains("page://"));
    assert_eq!(bundle.unresolved_links, 1);
}

#[test]
fn test_document_layout() {
    let editor = site();
    let bundle = export(&editor, &ExportOptions::default());
    let index = &bundle.get("index.html").unwrap().contents;

    assert!(index.starts_with("<!DOCTYPE html>\n<html>\n"));
    assert!(index.contains("    <title>Home page</title>\n"));
    assert!(index.contains(r#"<link rel="stylesheet" href="./css/style.css">"#));
    assert!(index.contains("  <body>\n"));
    assert!(index.contains(r#"    <h1 class="gjs-heading">Page builder</h1>"#));
    assert!(index.trim_end().ends_with("</html>"));
}

#[test]
fn test_shared_stylesheet_collects_used_types_once() {
    let editor = site();
    let bundle = export(&editor, &ExportOptions::default());
    let css = &bundle.get("css/style.css").unwrap().contents;

    assert!(css.contains(".gjs-heading"));
    assert_eq!(css.matches(".gjs-link {").count(), 1);
    // No section on any page
    assert!(!css.contains(".gjs-section"));
}

#[test]
fn test_inline_css() {
    let editor = site();
    let options = ExportOptions {
        inline_css: true,
        ..Default::default()
    };
    let bundle = export(&editor, &options);

    assert_eq!(bundle.paths(), vec!["index.html", "about_us.html", "f_a_q_.html"]);
    let index = &bundle.get("index.html").unwrap().contents;
    assert!(index.contains("<style>"));
    assert!(index.contains(".gjs-heading"));
    assert!(!index.contains("stylesheet"));
}

#[test]
fn test_compact_output() {
    let mut editor = Editor::init(EditorConfig::default().with_initial_html("<p>Hi</p>")).unwrap();
    let home = editor.pages()[0].id.clone();
    editor.rename_page(&home, "Start").unwrap();
    let options = ExportOptions {
        pretty: false,
        inline_css: true,
        ..Default::default()
    };
    let bundle = export(&editor, &options);
    let index = &bundle.get("index.html").unwrap().contents;

    assert!(!index.contains('\n'));
    assert!(index.contains("<title>Start</title>"));
    assert!(index.contains("<body><p>Hi</p></body>"));
}

#[test]
fn test_filename_collision_keeps_first_page() {
    let mut editor = Editor::init(EditorConfig::default()).unwrap();
    editor.add_page("Index").unwrap();
    editor.add_page("About Us").unwrap();
    editor.add_page("about-us").unwrap();

    let bundle = export(&editor, &ExportOptions::default());
    assert_eq!(
        bundle.paths(),
        vec!["index.html", "about_us.html", "css/style.css"]
    );
    assert_eq!(
        bundle.collisions,
        vec![
            FilenameCollision {
                filename: "index.html".to_string(),
                kept: "Home page".to_string(),
                skipped: "Index".to_string(),
            },
            FilenameCollision {
                filename: "about_us.html".to_string(),
                kept: "About Us".to_string(),
                skipped: "about-us".to_string(),
            },
        ]
    );
    assert!(bundle.get("index.html").unwrap().contents.contains("<title>Home page</title>"));
}

#[test]
fn test_mixed_inline_content_stays_on_one_line() {
    let editor = Editor::init(
        EditorConfig::default().with_initial_html("<p>Hello <b>world</b>!</p><p>a<b>b</b>c</p>"),
    )
    .unwrap();

    let bundle = export(&editor, &ExportOptions::default());
    let index = &bundle.get("index.html").unwrap().contents;
    assert!(index.contains("    <p>Hello <b>world</b>!</p>\n"));
    assert!(index.contains("    <p>a<b>b</b>c</p>\n"));
}

#[test]
fn test_text_directly_in_body_is_not_split() {
    let editor =
        Editor::init(EditorConfig::default().with_initial_html("Hi <em>there</em>.")).unwrap();

    let bundle = export(&editor, &ExportOptions::default());
    let index = &bundle.get("index.html").unwrap().contents;
    assert!(index.contains("  <body>Hi <em>there</em>.</body>\n"));
}

#[test]
fn test_write_to_directory() {
    let editor = site();
    let bundle = export(&editor, &ExportOptions::default());
    let dir = TempDir::new().unwrap();

    let written = bundle.write_to(dir.path()).unwrap();
    assert_eq!(written.len(), 4);
    assert!(dir.path().join("css/style.css").is_file());

    let index = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert_eq!(index, bundle.get("index.html").unwrap().contents);
}

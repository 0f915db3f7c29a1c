use super::{find_documents, load_document, parse_document};
use crate::document::{Block, BlockKind, HostDocument};
use crate::error::Error;
use crate::formats::markdown::MarkdownFormat;
use crate::validate::entries_from_document;
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{tempdir, NamedTempFile};

const SAMPLE: &str = "# Intro\n\nSome text here.\n\n## Background\n\n- point one\n- point two\n\n> quoted line\n\nSetext title\n============\n";

fn headings(blocks: &[crate::document::BlockView]) -> Vec<(u8, String)> {
    blocks
        .iter()
        .filter(|view| view.kind == BlockKind::Heading)
        .map(|view| (view.level.unwrap_or(0), view.text.clone()))
        .collect()
}

#[test]
fn test_parse_headings_and_levels() {
    let document = parse_document(SAMPLE, &MarkdownFormat).unwrap();
    assert_eq!(
        headings(&document.blocks()),
        vec![
            (1, "Intro".to_string()),
            (2, "Background".to_string()),
            (1, "Setext title".to_string()),
        ]
    );
}

#[test]
fn test_parse_paragraphs_lists_and_quotes() {
    let document = parse_document(SAMPLE, &MarkdownFormat).unwrap();
    let kinds: Vec<BlockKind> = document.content.iter().map(Block::kind).collect();
    assert_eq!(
        kinds,
        vec![
            BlockKind::Heading,
            BlockKind::Paragraph,
            BlockKind::Heading,
            BlockKind::BulletList,
            BlockKind::Blockquote,
            BlockKind::Heading,
        ]
    );
    assert_eq!(document.content[1].text_content(), "Some text here.");

    let items: Vec<String> = document.content[3]
        .children()
        .iter()
        .map(Block::text_content)
        .collect();
    assert_eq!(items, vec!["point one", "point two"]);
    assert_eq!(document.content[4].text_content(), "quoted line");
}

#[test]
fn test_multiline_paragraph_is_folded() {
    let document = parse_document("First line\nsecond line\n", &MarkdownFormat).unwrap();
    assert_eq!(document.content[0].text_content(), "First line second line");
}

#[test]
fn test_code_blocks_are_opaque() {
    let document =
        parse_document("# Code\n\n```rust\n# not a heading\n```\n", &MarkdownFormat).unwrap();
    assert_eq!(document.content.len(), 2);
    assert_eq!(document.content[1], Block::Unsupported);
}

#[test]
fn test_typed_numbers_survive_loading() {
    let document =
        parse_document("# 1. Intro\n\n## 1.2 Background\n", &MarkdownFormat).unwrap();
    let entries = entries_from_document(&document);
    assert_eq!(entries[0].number, "1");
    assert_eq!(entries[1].number, "1.2");
    assert_eq!(entries[1].text, "Background");
}

#[test]
fn test_load_document_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "# Hello\n\n?\n\n## World\n\n??").unwrap();
    file.flush().unwrap();

    let document = load_document(file.path(), &MarkdownFormat).unwrap();
    assert_eq!(
        headings(&document.blocks()),
        vec![(1, "Hello".to_string()), (2, "World".to_string())]
    );
}

#[test]
fn test_load_missing_file_is_io_error() {
    let err = load_document(&PathBuf::from("/nonexistent/doc.md"), &MarkdownFormat).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_find_documents_recurses_and_sorts() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("b.md"), "# B\n").unwrap();
    fs::write(dir.path().join("sub").join("a.md"), "# A\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "text").unwrap();

    let found = find_documents(vec![dir.path().to_path_buf()], &["md".to_string()]).unwrap();
    assert_eq!(
        found,
        vec![dir.path().join("b.md"), dir.path().join("sub").join("a.md")]
    );

    let explicit = find_documents(vec![dir.path().join("notes.txt")], &["md".to_string()]).unwrap();
    assert_eq!(explicit, vec![dir.path().join("notes.txt")]);
}

#[test]
fn test_find_documents_missing_path() {
    let dir = tempdir().unwrap();
    let result = find_documents(vec![dir.path().join("absent")], &["md".to_string()]);
    assert!(matches!(result, Err(Error::Io { .. })));
}

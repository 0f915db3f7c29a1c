//! Reading documents from disk into the block model.
//!
//! Files are parsed with the tree-sitter grammar of their [`Format`] and the syntax tree is
//! walked top-down, turning headings, paragraphs, lists and quotes into [`Block`]s. Directory
//! arguments are searched recursively for files with a matching suffix.

use crate::document::{Block, Document};
use crate::error::{Error, Result};
use crate::formats::{Format, NodeRole};
use std::fs;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser};

/// Parse `source` into a document.
///
/// # Errors
///
/// Returns [`Error::Grammar`] if the grammar cannot be loaded or the parser gives up.
pub fn parse_document(source: &str, format: &dyn Format) -> Result<Document> {
    let mut parser = Parser::new();
    parser
        .set_language(&format.language())
        .map_err(|e| Error::Grammar(e.to_string()))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::Grammar("parser produced no tree".to_string()))?;

    let mut content = Vec::new();
    convert(tree.root_node(), source.as_bytes(), format, &mut content);
    tracing::debug!("parsed {} top-level blocks", content.len());
    Ok(Document::new(content))
}

/// Read and parse the file at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or [`Error::Grammar`] if it cannot be
/// parsed.
pub fn load_document(path: &Path, format: &dyn Format) -> Result<Document> {
    let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    tracing::debug!("loading {}", path.display());
    parse_document(&source, format)
}

/// Expand `paths` into a sorted list of document files.
///
/// Files named directly are always kept. Directories are walked recursively and only files
/// whose suffix is in `extensions` are kept.
///
/// # Errors
///
/// Returns [`Error::Io`] if a path does not exist or a directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk(&path, extensions, &mut found)?;
        } else if path.is_file() {
            found.push(path);
        } else {
            return Err(Error::io(
                &path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
            ));
        }
    }
    found.sort();
    found.dedup();
    Ok(found)
}

fn walk(dir: &Path, extensions: &[String], found: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if path.is_dir() {
            walk(&path, extensions, found)?;
        } else if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|want| want == ext))
        {
            found.push(path);
        }
    }
    Ok(())
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn convert(node: Node<'_>, source: &[u8], format: &dyn Format, out: &mut Vec<Block>) {
    match format.role(node.kind()) {
        NodeRole::Container => {
            for child in named_children(node) {
                convert(child, source, format, out);
            }
        }
        NodeRole::Heading => {
            let level = named_children(node)
                .iter()
                .find_map(|child| format.heading_level(child.kind()))
                .unwrap_or(1);
            out.push(Block::heading(level, inline_text(node, source, format)));
        }
        NodeRole::Paragraph => {
            let text = inline_text(node, source, format);
            if !text.is_empty() {
                out.push(Block::paragraph(text));
            }
        }
        NodeRole::List => {
            let content = named_children(node)
                .into_iter()
                .filter(|child| format.role(child.kind()) == NodeRole::ListItem)
                .map(|item| Block::ListItem {
                    content: nested(item, source, format),
                })
                .collect();
            out.push(Block::BulletList { content });
        }
        NodeRole::ListItem => out.push(Block::ListItem {
            content: nested(node, source, format),
        }),
        NodeRole::Quote => out.push(Block::Blockquote {
            content: nested(node, source, format),
        }),
        NodeRole::Opaque => out.push(Block::Unsupported),
        NodeRole::Ignore => {}
    }
}

fn nested(node: Node<'_>, source: &[u8], format: &dyn Format) -> Vec<Block> {
    let mut content = Vec::new();
    for child in named_children(node) {
        convert(child, source, format, &mut content);
    }
    content
}

fn find_text_node<'tree>(node: Node<'tree>, format: &dyn Format) -> Option<Node<'tree>> {
    if node.kind() == format.text_kind() {
        return Some(node);
    }
    named_children(node)
        .into_iter()
        .find_map(|child| find_text_node(child, format))
}

/// Inline text of a heading or paragraph, with line breaks folded to spaces and quote
/// continuation markers removed.
fn inline_text(node: Node<'_>, source: &[u8], format: &dyn Format) -> String {
    let Some(text_node) = find_text_node(node, format) else {
        return String::new();
    };
    let raw = text_node.utf8_text(source).unwrap_or_default();
    raw.lines()
        .map(|line| line.trim_start().trim_start_matches('>').trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;

//! Markdown format implementation using tree-sitter-md.
//!
//! This module maps the block grammar of tree-sitter-md onto the block model: ATX and setext
//! headings, paragraphs, lists (ordered lists are read as bullet lists) and block quotes.

use crate::formats::{Format, NodeRole};

/// Node mapping for markdown documents.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn role(&self, kind: &str) -> NodeRole {
        match kind {
            "document" | "section" => NodeRole::Container,
            "atx_heading" | "setext_heading" => NodeRole::Heading,
            "paragraph" => NodeRole::Paragraph,
            "list" => NodeRole::List,
            "list_item" => NodeRole::ListItem,
            "block_quote" => NodeRole::Quote,
            "fenced_code_block" | "indented_code_block" | "html_block" | "pipe_table"
            | "thematic_break" => NodeRole::Opaque,
            _ => NodeRole::Ignore,
        }
    }

    fn heading_level(&self, kind: &str) -> Option<u8> {
        match kind {
            "setext_h1_underline" => Some(1),
            "setext_h2_underline" => Some(2),
            _ => kind
                .strip_prefix("atx_h")
                .and_then(|rest| rest.strip_suffix("_marker"))
                .and_then(|digit| digit.parse().ok()),
        }
    }

    fn text_kind(&self) -> &'static str {
        "inline"
    }
}

//! Text output: blocks back to markdown, numbered outline previews, and outline trees for the
//! terminal.

use crate::document::Block;
use crate::error::NumberingError;
use crate::extract::{OutlineForest, OutlineNode};
use crate::ingest::canonical::OutlineDescription;
use crate::ingest::materialize::materialize;
use crate::numbering::{MarkupOptions, NumberingManager, MAX_LEVEL};

const UNTITLED_HEADING: &str = "Untitled heading";

#[must_use]
/// Render blocks as markdown, separated by blank lines.
///
/// Headings carrying a number render it before their text (`## 1.2. Background`), bullet lists
/// render as `- ` items and quote blocks as `> ` lines. Foreign blocks are left out.
pub fn to_markdown(blocks: &[Block]) -> String {
    let mut out = blocks
        .iter()
        .filter_map(render_block)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn render_block(block: &Block) -> Option<String> {
    match block {
        Block::Heading { attrs, .. } => {
            let marker = "#".repeat(usize::from(attrs.level.clamp(1, MAX_LEVEL)));
            let text = block.text_content();
            let text = text.trim();
            Some(match attrs.number.as_deref().filter(|n| !n.is_empty()) {
                Some(number) => format!("{marker} {number}. {text}"),
                None => format!("{marker} {text}"),
            })
        }
        Block::Paragraph { .. } => Some(block.text_content().trim().to_string()),
        Block::BulletList { content } => Some(
            content
                .iter()
                .filter_map(render_item)
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        Block::ListItem { .. } => render_item(block),
        Block::Blockquote { content } => Some(
            to_markdown(content)
                .trim_end()
                .lines()
                .map(|line| {
                    if line.is_empty() {
                        ">".to_string()
                    } else {
                        format!("> {line}")
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        Block::Unsupported => None,
    }
}

fn render_item(item: &Block) -> Option<String> {
    let body = match item {
        Block::ListItem { content } => to_markdown(content),
        other => render_block(other)?,
    };
    let mut lines = body.trim_end().lines();
    let first = lines.next()?;
    let mut out = format!("- {first}");
    for line in lines {
        out.push('\n');
        if !line.is_empty() {
            out.push_str("  ");
            out.push_str(line);
        }
    }
    Some(out)
}

/// Render an outline description as markdown with numbers written into the headings.
///
/// Numbering continues after `start_after` when given, so `Some("2")` makes the first section
/// `3`. The blocks are the ones ingestion would insert.
///
/// # Errors
///
/// Returns a [`NumberingError`] if a heading level is out of range.
pub fn preview(
    description: &OutlineDescription,
    start_after: Option<&str>,
) -> Result<String, NumberingError> {
    let mut manager = NumberingManager::new();
    if let Some(number) = start_after {
        manager.parse_and_set(number);
    }

    let mut parts = Vec::new();
    for block in materialize(description) {
        if let Block::Heading { attrs, .. } = &block {
            let markup = manager.generate_heading_markup(
                attrs.level,
                &block.text_content(),
                MarkupOptions::default(),
            )?;
            parts.push(markup.markdown_line());
        } else if let Some(text) = render_block(&block).filter(|t| !t.is_empty()) {
            parts.push(text);
        }
    }

    let mut out = parts.join("\n\n");
    if !out.is_empty() {
        out.push('\n');
    }
    Ok(out)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Layout switches for [`render_tree`].
pub struct TreeStyle {
    /// Append each node's word count.
    pub show_word_count: bool,
    /// Columns per nesting level, at least 2.
    pub indent_width: usize,
}

impl Default for TreeStyle {
    fn default() -> Self {
        Self {
            show_word_count: true,
            indent_width: 4,
        }
    }
}

fn tree_prefix(depth: usize, is_last: bool, parent_states: &[bool], width: usize) -> String {
    if depth == 0 {
        return String::new();
    }

    let mut prefix = String::new();

    for open in parent_states.iter().take(depth - 1) {
        if *open {
            prefix.push('│');
            prefix.push_str(&" ".repeat(width - 1));
        } else {
            prefix.push_str(&" ".repeat(width));
        }
    }

    prefix.push(if is_last { '└' } else { '├' });
    prefix.push_str(&"─".repeat(width - 2));
    prefix.push(' ');
    prefix
}

#[must_use]
/// Draw the outline forest with box-drawing branches, one heading per line.
///
/// Headings with no text show as `Untitled heading`.
pub fn render_tree(forest: &OutlineForest, style: TreeStyle) -> String {
    let mut out = String::new();
    let mut parent_states = Vec::new();
    let width = style.indent_width.max(2);
    draw_nodes(&forest.roots, 0, &mut parent_states, style, width, &mut out);
    out
}

fn draw_nodes(
    nodes: &[OutlineNode],
    depth: usize,
    parent_states: &mut Vec<bool>,
    style: TreeStyle,
    width: usize,
    out: &mut String,
) {
    for (index, node) in nodes.iter().enumerate() {
        let is_last = index + 1 == nodes.len();
        out.push_str(&tree_prefix(depth, is_last, parent_states, width));
        out.push_str(&node.display_number);
        out.push(' ');
        if node.clean_text.trim().is_empty() {
            out.push_str(UNTITLED_HEADING);
        } else {
            out.push_str(&node.clean_text);
        }
        if style.show_word_count {
            out.push_str(&format!(" ({} words)", node.word_count));
        }
        out.push('\n');

        if depth > 0 {
            parent_states.push(!is_last);
        }
        draw_nodes(&node.children, depth + 1, parent_states, style, width, out);
        if depth > 0 {
            parent_states.pop();
        }
    }
}

#[must_use]
/// One-line statistics for a forest, e.g. `4 headings, 120 words`.
pub fn summary(forest: &OutlineForest) -> String {
    format!(
        "{} headings, {} words",
        forest.total_headings, forest.total_words
    )
}

#[cfg(test)]
#[path = "tests/render.rs"]
mod tests;

//! The block tree the numbering engine runs against.
//!
//! Documents use the editor's JSON shape: a `doc` root holding typed blocks, each with inline
//! `text` runs or nested blocks. The same types describe content to be inserted, so an outline
//! materialised by the ingestion pipeline is just a `Vec<Block>`.
//!
//! Positions follow the editor's token counting: a text run is as long as its characters, any
//! other inline or leaf block counts 1, and a block with content counts 2 (open and close) plus
//! its content. A block's position is the offset of its opening token.

use serde::{Deserialize, Serialize};

fn default_level() -> u8 {
    1
}

fn default_doc_type() -> String {
    "doc".to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Heading attributes: the level and the computed number, kept out of the editable text.
pub struct HeadingAttrs {
    #[serde(default = "default_level")]
    /// Heading level, expected in `1..=6`.
    pub level: u8,
    #[serde(
        default,
        rename = "data-number",
        skip_serializing_if = "Option::is_none"
    )]
    /// Number attached by the last successful recompute pass.
    pub number: Option<String>,
}

impl Default for HeadingAttrs {
    fn default() -> Self {
        Self {
            level: default_level(),
            number: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
/// Inline content of a text block.
pub enum Inline {
    /// A run of text. Marks such as bold or italic are not kept.
    Text {
        #[serde(default)]
        /// The characters of the run.
        text: String,
    },
    /// A forced line break.
    HardBreak,
    #[serde(other)]
    /// Any inline node this crate does not model.
    Unsupported,
}

impl Inline {
    #[must_use]
    /// Wrap a string as a text run.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    fn node_size(&self) -> usize {
        match self {
            Self::Text { text } => text.chars().count(),
            Self::HardBreak | Self::Unsupported => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
/// A block-level node.
pub enum Block {
    #[serde(alias = "numberedHeading")]
    /// A section heading.
    Heading {
        #[serde(default)]
        /// Level and number metadata.
        attrs: HeadingAttrs,
        #[serde(default)]
        /// Heading text runs.
        content: Vec<Inline>,
    },
    /// A paragraph of running text.
    Paragraph {
        #[serde(default)]
        /// Paragraph text runs.
        content: Vec<Inline>,
    },
    /// An unordered list of `listItem` blocks.
    BulletList {
        #[serde(default)]
        /// The list items.
        content: Vec<Block>,
    },
    /// One entry of a bullet list.
    ListItem {
        #[serde(default)]
        /// Blocks inside the item, usually a single paragraph.
        content: Vec<Block>,
    },
    /// A quoted block, used for descriptive material that is not part of the section tree.
    Blockquote {
        #[serde(default)]
        /// Blocks inside the quote.
        content: Vec<Block>,
    },
    #[serde(other)]
    /// Any block this crate does not model. Traversed as an opaque leaf.
    Unsupported,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Block type tag exposed by traversal.
pub enum BlockKind {
    /// See [`Block::Heading`].
    Heading,
    /// See [`Block::Paragraph`].
    Paragraph,
    /// See [`Block::BulletList`].
    BulletList,
    /// See [`Block::ListItem`].
    ListItem,
    /// See [`Block::Blockquote`].
    Blockquote,
    /// See [`Block::Unsupported`].
    Unsupported,
}

impl Block {
    #[must_use]
    /// A heading with plain text and no number metadata.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::Heading {
            attrs: HeadingAttrs {
                level,
                number: None,
            },
            content: vec![Inline::text(text)],
        }
    }

    #[must_use]
    /// A paragraph holding one text run.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph {
            content: vec![Inline::text(text)],
        }
    }

    #[must_use]
    /// A bullet list with one paragraph per item.
    pub fn bullet_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::BulletList {
            content: items
                .into_iter()
                .map(|item| Self::ListItem {
                    content: vec![Self::paragraph(item)],
                })
                .collect(),
        }
    }

    #[must_use]
    /// A quote wrapping the given blocks.
    pub fn blockquote(content: Vec<Block>) -> Self {
        Self::Blockquote { content }
    }

    #[must_use]
    /// Type tag of this block.
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Heading { .. } => BlockKind::Heading,
            Self::Paragraph { .. } => BlockKind::Paragraph,
            Self::BulletList { .. } => BlockKind::BulletList,
            Self::ListItem { .. } => BlockKind::ListItem,
            Self::Blockquote { .. } => BlockKind::Blockquote,
            Self::Unsupported => BlockKind::Unsupported,
        }
    }

    #[must_use]
    /// Nested blocks, empty for text blocks and leaves.
    pub fn children(&self) -> &[Block] {
        match self {
            Self::BulletList { content }
            | Self::ListItem { content }
            | Self::Blockquote { content } => content,
            _ => &[],
        }
    }

    #[must_use]
    /// Inline runs, empty for container blocks and leaves.
    pub fn inlines(&self) -> &[Inline] {
        match self {
            Self::Heading { content, .. } | Self::Paragraph { content } => content,
            _ => &[],
        }
    }

    #[must_use]
    /// Concatenated text of every run in this block and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for inline in self.inlines() {
            if let Inline::Text { text } = inline {
                out.push_str(text);
            }
        }
        for child in self.children() {
            child.collect_text(out);
        }
    }

    #[must_use]
    /// Words in this block's own text runs, each run counted on its own.
    pub fn own_word_count(&self) -> usize {
        self.inlines()
            .iter()
            .map(|inline| match inline {
                Inline::Text { text } => text.split_whitespace().count(),
                _ => 0,
            })
            .sum()
    }

    #[must_use]
    /// Size of this block in position tokens.
    pub fn node_size(&self) -> usize {
        match self {
            Self::Heading { content, .. } | Self::Paragraph { content } => {
                2 + content.iter().map(Inline::node_size).sum::<usize>()
            }
            Self::BulletList { content }
            | Self::ListItem { content }
            | Self::Blockquote { content } => {
                2 + content.iter().map(Block::node_size).sum::<usize>()
            }
            Self::Unsupported => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// What a traversal reports for each block.
pub struct BlockView {
    /// Block type.
    pub kind: BlockKind,
    /// Heading level, present for headings only.
    pub level: Option<u8>,
    /// Text content of the block and its descendants.
    pub text: String,
    /// Words in the block's own text runs.
    pub words: usize,
    /// Position offset of the block.
    pub position: usize,
    /// Nesting depth, 0 for top-level blocks.
    pub depth: usize,
}

/// What the numbering engine needs from a host document.
pub trait HostDocument {
    /// Every block in document order, parents before their children.
    fn blocks(&self) -> Vec<BlockView>;

    /// Number metadata of the heading at `position`, if there is a numbered heading there.
    fn heading_number(&self, position: usize) -> Option<String>;

    /// Set or clear the number metadata of the heading at `position`, leaving its text alone.
    ///
    /// Returns whether a heading was found there.
    fn set_heading_number(&mut self, position: usize, number: Option<String>) -> bool;

    /// Insert blocks at the top-level block boundary at or after `position`.
    ///
    /// Returns the position of the first inserted block.
    fn insert_content(&mut self, position: usize, blocks: Vec<Block>) -> usize;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// A whole document: the `doc` root and its top-level blocks.
pub struct Document {
    #[serde(rename = "type", default = "default_doc_type")]
    /// Root node type, always `doc`.
    pub kind: String,
    #[serde(default)]
    /// Top-level blocks in order.
    pub content: Vec<Block>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Document {
    #[must_use]
    /// A document holding `content`.
    pub fn new(content: Vec<Block>) -> Self {
        Self {
            kind: default_doc_type(),
            content,
        }
    }

    #[must_use]
    /// Size of the document content in position tokens.
    pub fn content_size(&self) -> usize {
        self.content.iter().map(Block::node_size).sum()
    }

    /// Visit every heading's attributes with its position, in document order.
    pub fn for_each_heading_mut(&mut self, mut visit: impl FnMut(usize, &mut HeadingAttrs)) {
        visit_headings_mut(&mut self.content, 0, &mut visit);
    }
}

fn collect_views(blocks: &[Block], start: usize, depth: usize, out: &mut Vec<BlockView>) {
    let mut position = start;
    for block in blocks {
        let level = match block {
            Block::Heading { attrs, .. } => Some(attrs.level),
            _ => None,
        };
        out.push(BlockView {
            kind: block.kind(),
            level,
            text: block.text_content(),
            words: block.own_word_count(),
            position,
            depth,
        });
        collect_views(block.children(), position + 1, depth + 1, out);
        position += block.node_size();
    }
}

fn find_heading(blocks: &[Block], start: usize, target: usize) -> Option<&HeadingAttrs> {
    let mut position = start;
    for block in blocks {
        let size = block.node_size();
        if (position..position + size).contains(&target) {
            return match block {
                Block::Heading { attrs, .. } if position == target => Some(attrs),
                _ => find_heading(block.children(), position + 1, target),
            };
        }
        position += size;
    }
    None
}

fn visit_headings_mut(
    blocks: &mut [Block],
    start: usize,
    visit: &mut dyn FnMut(usize, &mut HeadingAttrs),
) {
    let mut position = start;
    for block in blocks {
        let size = block.node_size();
        match block {
            Block::Heading { attrs, .. } => visit(position, attrs),
            Block::BulletList { content }
            | Block::ListItem { content }
            | Block::Blockquote { content } => visit_headings_mut(content, position + 1, visit),
            Block::Paragraph { .. } | Block::Unsupported => {}
        }
        position += size;
    }
}

impl HostDocument for Document {
    fn blocks(&self) -> Vec<BlockView> {
        let mut out = Vec::new();
        collect_views(&self.content, 0, 0, &mut out);
        out
    }

    fn heading_number(&self, position: usize) -> Option<String> {
        find_heading(&self.content, 0, position).and_then(|attrs| attrs.number.clone())
    }

    fn set_heading_number(&mut self, position: usize, number: Option<String>) -> bool {
        let mut number = Some(number);
        self.for_each_heading_mut(|at, attrs| {
            if at == position {
                if let Some(number) = number.take() {
                    attrs.number = number;
                }
            }
        });
        number.is_none()
    }

    fn insert_content(&mut self, position: usize, blocks: Vec<Block>) -> usize {
        let mut offset = 0;
        let mut index = self.content.len();
        for (i, block) in self.content.iter().enumerate() {
            if offset >= position {
                index = i;
                break;
            }
            offset += block.node_size();
        }
        self.content.splice(index..index, blocks);
        offset
    }
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;

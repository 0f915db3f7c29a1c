//! Format trait and implementations for different document types.
//!
//! A format names the tree-sitter grammar for a document type and says which grammar nodes are
//! headings, paragraphs, lists and quotes, so that a parsed file can be read into the block
//! model the numbering engine works on.

pub mod markdown;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How a grammar node maps onto the block model.
pub enum NodeRole {
    /// Not a block of its own; its children are read in its place.
    Container,
    /// A heading; its level comes from a marker child.
    Heading,
    /// A paragraph of inline text.
    Paragraph,
    /// A list whose children are list items.
    List,
    /// One list entry holding further blocks.
    ListItem,
    /// A quoted block holding further blocks.
    Quote,
    /// A block kept only as an opaque leaf, such as a code block.
    Opaque,
    /// Markup with no block meaning, such as list markers.
    Ignore,
}

/// Grammar and node mapping for one document type.
pub trait Format {
    /// Tree-sitter grammar used to parse the document.
    fn language(&self) -> tree_sitter::Language;
    /// Role of a grammar node kind in the block model.
    fn role(&self, kind: &str) -> NodeRole;
    /// Heading level announced by a marker node kind, if it is one.
    fn heading_level(&self, kind: &str) -> Option<u8>;
    /// Node kind that holds the inline text of headings and paragraphs.
    fn text_kind(&self) -> &str;
}

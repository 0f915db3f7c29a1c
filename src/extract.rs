//! Builds the navigable outline tree shown beside the document.
//!
//! One pass over the document collects headings in order, counts the words between each heading
//! and the next one, numbers them with a fresh [`NumberingManager`] and nests them with an
//! explicit stack. Nodes own their children; nothing points back at a parent.

use crate::document::{BlockKind, HostDocument};
use crate::error::TraversalFailure;
use crate::numbering::NumberingManager;
use crate::section::HeadingOccurrence;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// One heading in the outline with the sections nested under it.
pub struct OutlineNode {
    /// Identifier unique within one extraction pass.
    pub key: String,
    /// Heading level (1-6).
    pub level: u8,
    /// Computed dotted number.
    pub display_number: String,
    /// Heading text without any typed number prefix.
    pub clean_text: String,
    /// Words of non-heading content between this heading and the next.
    pub word_count: usize,
    /// Position offset of the heading block.
    pub document_position: usize,
    /// Directly nested headings in document order.
    pub children: Vec<OutlineNode>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// The outline forest of a document with aggregate statistics.
pub struct OutlineForest {
    /// Top-level outline nodes in document order.
    pub roots: Vec<OutlineNode>,
    /// Number of headings in the forest.
    pub total_headings: usize,
    /// Sum of every node's word count.
    pub total_words: usize,
}

impl OutlineForest {
    #[must_use]
    /// Every node in document order, paired with its depth in the forest.
    pub fn flatten(&self) -> Vec<(usize, &OutlineNode)> {
        let mut out = Vec::with_capacity(self.total_headings);
        let mut pending: Vec<(usize, &OutlineNode)> =
            self.roots.iter().rev().map(|node| (0, node)).collect();
        while let Some((depth, node)) = pending.pop() {
            out.push((depth, node));
            pending.extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        }
        out
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Extracts outline forests from documents.
pub struct OutlineExtractor;

impl OutlineExtractor {
    #[must_use]
    /// Create an extractor.
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    /// Headings of `document` in order, each with the words of the content that follows it.
    pub fn headings<D: HostDocument + ?Sized>(document: &D) -> Vec<(HeadingOccurrence, usize)> {
        let mut headings: Vec<(HeadingOccurrence, usize)> = Vec::new();
        for view in document.blocks() {
            if view.kind == BlockKind::Heading {
                let level = view.level.unwrap_or(1);
                headings.push((HeadingOccurrence::new(level, view.text, view.position), 0));
            } else if let Some((_, words)) = headings.last_mut() {
                *words += view.words;
            }
        }
        headings
    }

    /// Build the outline forest of `document`.
    ///
    /// # Errors
    ///
    /// Returns a [`TraversalFailure`] if a heading carries a level outside `1..=6`.
    pub fn extract<D: HostDocument + ?Sized>(
        &self,
        document: &D,
    ) -> Result<OutlineForest, TraversalFailure> {
        let mut manager = NumberingManager::new();
        let mut roots = Vec::new();
        let mut open: Vec<OutlineNode> = Vec::new();
        let mut total_headings = 0;
        let mut total_words = 0;

        for (index, (heading, word_count)) in Self::headings(document).into_iter().enumerate() {
            let fail = |source| TraversalFailure {
                position: heading.position,
                source,
            };
            manager.increment(heading.level).map_err(fail)?;
            let display_number = manager.get_number(heading.level).map_err(fail)?;

            let node = OutlineNode {
                key: format!("heading-{index}"),
                level: heading.level,
                display_number,
                clean_text: heading.clean_text,
                word_count,
                document_position: heading.position,
                children: Vec::new(),
            };
            total_headings += 1;
            total_words += word_count;

            while open.last().is_some_and(|top| top.level >= node.level) {
                close_top(&mut open, &mut roots);
            }
            open.push(node);
        }

        while !open.is_empty() {
            close_top(&mut open, &mut roots);
        }

        tracing::debug!("extracted outline with {total_headings} headings, {total_words} words");
        Ok(OutlineForest {
            roots,
            total_headings,
            total_words,
        })
    }
}

/// Pop the innermost open node and hand it to whatever is now on top, or to the roots.
fn close_top(open: &mut Vec<OutlineNode>, roots: &mut Vec<OutlineNode>) {
    if let Some(node) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}

#[cfg(test)]
#[path = "tests/extract.rs"]
mod tests;

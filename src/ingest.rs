//! Ingestion of externally generated outlines.
//!
//! A payload arrives as a canonical object, as a document tree, or as a string that may be
//! wrapped in a code fence or encoded twice. Each shape has its own normalisation step and all
//! of them end in an [`OutlineDescription`], which is then either returned for display or
//! materialised into document blocks.

pub mod canonical;
pub mod materialize;
pub mod payload;
pub mod tree;

pub use canonical::{
    AbstractStructure, MethodOutline, Methodology, OutlineDescription, ReferencesStructure,
    SectionOutline, SubsectionOutline,
};
pub use payload::OutlinePayload;

use crate::document::Block;
use crate::error::IngestionParseError;
use crate::host::EditorHost;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What the caller wants done with a normalised outline.
pub enum IngestMode {
    /// Produce document blocks for insertion.
    Materialize,
    /// Only return the normalised description.
    DisplayOnly,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Result of an ingestion run.
pub enum IngestOutcome {
    /// Blocks ready to be inserted into the document.
    Materialized(Vec<Block>),
    /// The normalised description, with no document changes.
    Display(OutlineDescription),
}

#[derive(Clone, Copy, Debug, Default)]
/// Normalises outline payloads and materialises them.
pub struct OutlineIngestionPipeline;

impl OutlineIngestionPipeline {
    #[must_use]
    /// Create a pipeline.
    pub fn new() -> Self {
        Self
    }

    /// Normalise any payload shape to a canonical description.
    ///
    /// # Errors
    ///
    /// Returns an [`IngestionParseError`] with the original payload if a raw string cannot be
    /// parsed after fence stripping and one round of unescaping.
    pub fn normalize(
        &self,
        incoming: OutlinePayload,
    ) -> Result<OutlineDescription, IngestionParseError> {
        match incoming {
            OutlinePayload::Canonical(description) => {
                tracing::debug!("ingesting canonical outline");
                Ok(description)
            }
            OutlinePayload::TreeLike(document) => {
                tracing::debug!(
                    "ingesting document tree with {} blocks",
                    document.content.len()
                );
                Ok(tree::tree_to_description(&document))
            }
            OutlinePayload::RawText(raw) => {
                tracing::debug!("ingesting raw outline text ({} bytes)", raw.len());
                match payload::parse_raw_text(&raw) {
                    Ok(structured) => self.normalize(structured),
                    Err(e) => {
                        tracing::warn!("outline payload rejected: {}", e.reason);
                        Err(e)
                    }
                }
            }
        }
    }

    #[must_use]
    /// Blocks for a canonical description. See [`materialize::materialize`].
    pub fn materialize(&self, description: &OutlineDescription) -> Vec<Block> {
        materialize::materialize(description)
    }

    /// Normalise a payload, then materialise it or hand it back for display.
    ///
    /// # Errors
    ///
    /// Returns an [`IngestionParseError`] if the payload cannot be normalised.
    pub fn ingest(
        &self,
        payload: impl Into<OutlinePayload>,
        mode: IngestMode,
    ) -> Result<IngestOutcome, IngestionParseError> {
        let description = self.normalize(payload.into())?;
        Ok(match mode {
            IngestMode::Materialize => IngestOutcome::Materialized(self.materialize(&description)),
            IngestMode::DisplayOnly => IngestOutcome::Display(description),
        })
    }

    /// Normalise a payload and insert its blocks into `host` at `position` as one commit.
    ///
    /// Returns the number of top-level blocks inserted. Nothing is committed for a payload that
    /// materialises to no blocks.
    ///
    /// # Errors
    ///
    /// Returns an [`IngestionParseError`] if the payload cannot be normalised; the document is
    /// left untouched.
    pub fn ingest_into(
        &self,
        host: &mut EditorHost,
        position: usize,
        payload: impl Into<OutlinePayload>,
    ) -> Result<usize, IngestionParseError> {
        let description = self.normalize(payload.into())?;
        let blocks = self.materialize(&description);
        let inserted = blocks.len();
        if inserted > 0 {
            host.insert_content(position, blocks);
        }
        Ok(inserted)
    }
}

#[cfg(test)]
#[path = "tests/ingest.rs"]
mod tests;

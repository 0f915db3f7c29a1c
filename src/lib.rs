//! sectionist: hierarchical section numbering, outline extraction and outline ingestion for
//! structured documents.
//!
//! The [`numbering`] counters turn a sequence of heading levels into dotted numbers. The
//! [`sync`] module recomputes those numbers after every committed edit and attaches them to
//! heading metadata, [`extract`] builds the navigable outline tree, [`ingest`] normalises and
//! materialises externally generated outlines, and [`validate`] checks a claimed numbering
//! against the counters.
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod document;
pub mod edit_plan;
pub mod error;
pub mod extract;
pub mod formats;
pub mod host;
pub mod ingest;
pub mod input;
pub mod numbering;
pub mod render;
pub mod section;
pub mod sync;
pub mod validate;

pub use document::{Block, Document, HostDocument};
pub use error::{Error, IngestionParseError, NumberingError, Result, TraversalFailure};
pub use extract::{OutlineExtractor, OutlineForest, OutlineNode};
pub use host::{CommitListener, EditorHost};
pub use ingest::{IngestMode, IngestOutcome, OutlineDescription, OutlineIngestionPipeline, OutlinePayload};
pub use numbering::NumberingManager;
pub use sync::{NumberTable, OutlineSynchronizer};
pub use validate::{SequenceEntry, SequenceValidator, ValidationReport};

//! Error types shared by the numbering engine, the outline extractor and the ingestion pipeline.
//!
//! Precondition violations ([`NumberingError`]) are programmer errors and are returned as soon as
//! they are detected. Content problems degrade instead: an [`IngestionParseError`] keeps the raw
//! payload so the caller can show it or retry, and a [`TraversalFailure`] abandons one recompute
//! pass without touching the host's edit.

use std::path::PathBuf;

/// Precondition violations on the counter state machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumberingError {
    #[error("invalid heading level {0}: must be between 1 and 6")]
    /// A heading level outside `1..=6` was passed in.
    InvalidLevel(u8),

    #[error("counter state must hold exactly 6 entries, got {0}")]
    /// A counter array of the wrong length was passed to `set_counters`.
    InvalidCounters(usize),
}

/// An outline payload that could not be parsed after every fallback was tried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not parse outline payload: {reason}")]
pub struct IngestionParseError {
    /// The payload exactly as it was received.
    pub raw_payload: String,
    /// What the last parse attempt complained about.
    pub reason: String,
}

impl IngestionParseError {
    /// Create a parse error carrying the original payload.
    pub fn new(raw_payload: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            raw_payload: raw_payload.into(),
            reason: reason.into(),
        }
    }
}

/// A document walk that hit a node it could not number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("document traversal failed at position {position}: {source}")]
pub struct TraversalFailure {
    /// Position offset of the offending block.
    pub position: usize,
    #[source]
    /// The numbering error raised by that block.
    pub source: NumberingError,
}

/// Umbrella error for operations that touch files or cross module boundaries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    /// Counter precondition failure.
    Numbering(#[from] NumberingError),

    #[error(transparent)]
    /// Outline payload could not be parsed.
    Ingestion(#[from] IngestionParseError),

    #[error(transparent)]
    /// Document walk was abandoned.
    Traversal(#[from] TraversalFailure),

    #[error("io error on {path}: {source}")]
    /// Reading or writing a document failed.
    Io {
        /// File being read or written.
        path: PathBuf,
        #[source]
        /// Underlying failure.
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    /// Serialising or deserialising JSON failed.
    Json(#[from] serde_json::Error),

    #[error("grammar error: {0}")]
    /// The document grammar could not be loaded or produced no tree.
    Grammar(String),

    #[error("patch error: {0}")]
    /// A textual patch could not be applied.
    Patch(String),
}

impl Error {
    /// Create an IO error for path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for crate operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Replays a numbering sequence to check it against what the counters would produce.
//!
//! Every entry is compared with the look-ahead number before the counters advance, and every
//! mismatch is recorded, not just the first.

use crate::document::{BlockKind, HostDocument};
use crate::error::NumberingError;
use crate::numbering::NumberingManager;
use crate::section::split_number_prefix;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One heading of the sequence under test.
pub struct SequenceEntry {
    /// Heading level (1-6).
    pub level: u8,
    #[serde(default)]
    /// The number the heading claims to have.
    pub number: String,
    #[serde(default)]
    /// Heading text, carried into any error record.
    pub text: String,
}

impl SequenceEntry {
    #[must_use]
    /// An entry for a heading at `level` claiming `number`.
    pub fn new(level: u8, number: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            level,
            number: number.into(),
            text: text.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A single mismatch between a claimed and an expected number.
pub struct ValidationRecord {
    /// Index of the entry in the sequence.
    pub index: usize,
    /// Heading level of the entry.
    pub level: u8,
    /// Number the counters produce at this point.
    pub expected: String,
    /// Number the entry claimed.
    pub actual: String,
    /// Heading text of the entry.
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Outcome of validating a whole sequence.
pub struct ValidationReport {
    /// Whether every entry matched.
    pub is_valid: bool,
    /// One record per mismatching entry, in sequence order.
    pub errors: Vec<ValidationRecord>,
}

#[derive(Clone, Copy, Debug, Default)]
/// Checks numbering sequences against the counter state machine.
pub struct SequenceValidator;

impl SequenceValidator {
    #[must_use]
    /// Create a validator.
    pub fn new() -> Self {
        Self
    }

    /// Replay `entries` on fresh counters and collect every mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`NumberingError::InvalidLevel`] if an entry's level is not in `1..=6`.
    pub fn validate(&self, entries: &[SequenceEntry]) -> Result<ValidationReport, NumberingError> {
        let mut manager = NumberingManager::new();
        let mut errors = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            let expected = manager.get_next_number(entry.level)?;
            manager.increment(entry.level)?;
            if entry.number != expected {
                errors.push(ValidationRecord {
                    index,
                    level: entry.level,
                    expected,
                    actual: entry.number.clone(),
                    text: entry.text.clone(),
                });
            }
        }

        Ok(ValidationReport {
            is_valid: errors.is_empty(),
            errors,
        })
    }
}

#[must_use]
/// Read the numbers typed into a document's headings as a sequence to validate.
///
/// A heading reading `2.1. Sampling` yields number `2.1` and text `Sampling`. Headings without a
/// typed number yield an empty number.
pub fn entries_from_document<D: HostDocument + ?Sized>(document: &D) -> Vec<SequenceEntry> {
    document
        .blocks()
        .into_iter()
        .filter(|view| view.kind == BlockKind::Heading)
        .map(|view| {
            let (number, text) = split_number_prefix(&view.text);
            SequenceEntry::new(view.level.unwrap_or(1), number.unwrap_or_default(), text)
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/validate.rs"]
mod tests;

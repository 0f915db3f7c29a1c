//! Keeps heading numbers in step with a live document.
//!
//! Every committed edit triggers one recompute pass: a fresh [`NumberingManager`] walks the whole
//! snapshot and produces a [`NumberTable`] side-table. The synchronizer then attaches those
//! numbers to the headings' metadata. Heading text is never rewritten here.
//!
//! A pass that trips over a block it cannot number is abandoned. The previous numbers stay on
//! the document and the failure is logged; it never reaches the editor's edit transaction.

use crate::document::{BlockKind, Document, HostDocument};
use crate::error::TraversalFailure;
use crate::host::CommitListener;
use crate::numbering::NumberingManager;
use crate::section::HeadingOccurrence;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// One heading and the number a recompute pass gave it.
pub struct NumberedHeading {
    #[serde(flatten)]
    /// The heading as found in the document.
    pub heading: HeadingOccurrence,
    /// Dotted section number.
    pub number: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// Numbers computed by one recompute pass, in document order.
pub struct NumberTable {
    /// Numbered headings in document order.
    pub entries: Vec<NumberedHeading>,
}

impl NumberTable {
    #[must_use]
    /// Number assigned to the heading at `position`.
    pub fn number_at(&self, position: usize) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.heading.position == position)
            .map(|entry| entry.number.as_str())
    }

    #[must_use]
    /// Count of numbered headings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    /// Whether the pass found no headings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Number every heading of `document` from scratch.
///
/// # Errors
///
/// Returns a [`TraversalFailure`] naming the first heading whose level cannot be numbered.
pub fn recompute<D: HostDocument + ?Sized>(document: &D) -> Result<NumberTable, TraversalFailure> {
    let mut manager = NumberingManager::new();
    let mut entries = Vec::new();

    for view in document.blocks() {
        if view.kind != BlockKind::Heading {
            continue;
        }
        let level = view.level.unwrap_or(1);
        let fail = |source| TraversalFailure {
            position: view.position,
            source,
        };
        manager.increment(level).map_err(fail)?;
        let number = manager.get_number(level).map_err(fail)?;
        entries.push(NumberedHeading {
            heading: HeadingOccurrence::new(level, view.text, view.position),
            number,
        });
    }

    Ok(NumberTable { entries })
}

#[derive(Debug, Default)]
/// Recomputes numbering on every commit and attaches it to heading metadata.
pub struct OutlineSynchronizer {
    table: NumberTable,
    pending: bool,
    last_failure: Option<TraversalFailure>,
}

impl OutlineSynchronizer {
    #[must_use]
    /// A synchronizer that has not seen any document yet.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// Numbers from the last successful pass.
    pub fn table(&self) -> &NumberTable {
        &self.table
    }

    #[must_use]
    /// Failure of the most recent pass, cleared by the next successful one.
    pub fn last_failure(&self) -> Option<&TraversalFailure> {
        self.last_failure.as_ref()
    }

    /// Run one recompute pass over `snapshot`, keeping the previous table if it fails.
    ///
    /// Returns whether the pass succeeded.
    pub fn recompute_pass<D: HostDocument + ?Sized>(&mut self, snapshot: &D) -> bool {
        match recompute(snapshot) {
            Ok(table) => {
                tracing::debug!("numbered {} headings", table.len());
                self.table = table;
                self.pending = true;
                self.last_failure = None;
                true
            }
            Err(failure) => {
                tracing::warn!("numbering pass abandoned, keeping previous numbers: {failure}");
                self.pending = false;
                self.last_failure = Some(failure);
                false
            }
        }
    }

    /// Write the numbers of the last successful pass onto heading metadata.
    ///
    /// Does nothing if that pass has already been attached, or if a later pass was abandoned:
    /// positions in the old table may no longer match the document, so its existing metadata is
    /// left untouched. Returns how many headings were updated.
    pub fn attach<D: HostDocument + ?Sized>(&mut self, document: &mut D) -> usize {
        if !self.pending {
            return 0;
        }
        self.pending = false;
        let mut updated = 0;
        for entry in &self.table.entries {
            let position = entry.heading.position;
            if document.heading_number(position).as_deref() == Some(entry.number.as_str()) {
                continue;
            }
            if document.set_heading_number(position, Some(entry.number.clone())) {
                updated += 1;
            }
        }
        updated
    }
}

impl CommitListener for OutlineSynchronizer {
    fn on_commit(&mut self, revision: u64, snapshot: &Document) {
        tracing::debug!("recomputing numbering for revision {revision}");
        self.recompute_pass(snapshot);
    }
}

#[cfg(test)]
#[path = "tests/sync.rs"]
mod tests;

//! A minimal editing host: applies edits to a document and announces each commit.
//!
//! The host fires its listeners synchronously, once per applied edit, with the new snapshot.
//! The outline synchronizer always runs first so that listeners observe numbered headings.

use crate::document::{Block, Document, HostDocument};
use crate::sync::{NumberTable, OutlineSynchronizer};

/// Something that wants to hear about every committed edit.
pub trait CommitListener {
    /// Called after the edit for `revision` has been applied.
    fn on_commit(&mut self, revision: u64, snapshot: &Document);
}

/// Owns a document, applies edits to it and keeps its heading numbers current.
pub struct EditorHost {
    document: Document,
    revision: u64,
    synchronizer: OutlineSynchronizer,
    listeners: Vec<Box<dyn CommitListener>>,
}

impl EditorHost {
    #[must_use]
    /// Take ownership of `document` and number it once.
    pub fn new(document: Document) -> Self {
        let mut host = Self {
            document,
            revision: 0,
            synchronizer: OutlineSynchronizer::new(),
            listeners: Vec::new(),
        };
        host.synchronize();
        host
    }

    #[must_use]
    /// Current document snapshot.
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    /// Number of edits committed so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    /// The synchronizer keeping this document numbered.
    pub fn synchronizer(&self) -> &OutlineSynchronizer {
        &self.synchronizer
    }

    #[must_use]
    /// Numbers from the last successful recompute pass.
    pub fn numbers(&self) -> &NumberTable {
        self.synchronizer.table()
    }

    /// Register a listener for future commits.
    pub fn subscribe(&mut self, listener: Box<dyn CommitListener>) {
        self.listeners.push(listener);
    }

    /// Apply one edit and notify every listener.
    pub fn commit<F, T>(&mut self, edit: F) -> T
    where
        F: FnOnce(&mut Document) -> T,
    {
        let output = edit(&mut self.document);
        self.revision += 1;
        self.synchronize();
        for listener in &mut self.listeners {
            listener.on_commit(self.revision, &self.document);
        }
        output
    }

    /// Insert blocks at `position` as a single commit, returning where they landed.
    pub fn insert_content(&mut self, position: usize, blocks: Vec<Block>) -> usize {
        self.commit(|document| document.insert_content(position, blocks))
    }

    #[must_use]
    /// Give the document back, dropping listeners.
    pub fn into_document(self) -> Document {
        self.document
    }

    fn synchronize(&mut self) {
        self.synchronizer.on_commit(self.revision, &self.document);
        self.synchronizer.attach(&mut self.document);
    }
}

#[cfg(test)]
#[path = "tests/host.rs"]
mod tests;

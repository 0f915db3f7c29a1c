//! The edit plan turns materialised outlines into insertions in files on disk.
//!
//! Each insertion places a block of markdown before a given line. Insertions are grouped by file
//! and applied with textum patches, one patch set per file. Lines are counted from 0; a line
//! at or past the end of the file appends.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use textum::{Boundary, BoundaryMode, Patch, PatchSet, Snippet, Target};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
/// Serialisable collection of insertions for batch application.
pub struct EditPlan {
    /// Insertions in the order they were planned.
    pub edits: Vec<Insertion>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// Markdown to place before a line of a file.
pub struct Insertion {
    /// Target file path for this modification.
    pub file_name: String,
    /// Line the content goes before, counted from 0.
    pub line: usize,
    /// Markdown to insert.
    pub content: String,
    /// What is being inserted, for logs.
    pub label: String,
}

impl EditPlan {
    #[must_use]
    /// An empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan `content` to go before `line` of `file_name`.
    pub fn insert_before_line(
        &mut self,
        file_name: impl Into<String>,
        line: usize,
        content: impl Into<String>,
        label: impl Into<String>,
    ) {
        self.edits.push(Insertion {
            file_name: file_name.into(),
            line,
            content: content.into(),
            label: label.into(),
        });
    }

    /// Apply every insertion in the plan.
    ///
    /// Insertions aimed at the same line of a file are joined in plan order, so the first one
    /// planned ends up first in the file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if a file cannot be read or written, or [`Error::Patch`] if textum
    /// rejects a patch.
    pub fn apply(&self) -> Result<()> {
        let mut file_groups: BTreeMap<&str, BTreeMap<usize, Vec<&Insertion>>> = BTreeMap::new();

        for edit in &self.edits {
            file_groups
                .entry(edit.file_name.as_str())
                .or_default()
                .entry(edit.line)
                .or_default()
                .push(edit);
        }

        for (file_name, lines) in file_groups {
            let original = fs::read_to_string(file_name).map_err(|e| Error::io(file_name, e))?;
            let newline = line_ending(&original);
            let mut patchset = PatchSet::new();
            let mut appended = Vec::new();
            let mut patched = false;

            for (line, edits) in lines {
                for edit in &edits {
                    tracing::debug!("inserting {} into {file_name} at line {line}", edit.label);
                }
                let content = edits
                    .iter()
                    .map(|edit| edit.content.trim_end())
                    .collect::<Vec<_>>()
                    .join("\n\n")
                    .replace("\r\n", "\n")
                    .replace('\n', newline);

                let Some(anchor) = original.lines().nth(line) else {
                    appended.push(content);
                    continue;
                };

                let start = Boundary::new(Target::Line(line), BoundaryMode::Include);
                let end = Boundary::new(Target::Line(line + 1), BoundaryMode::Exclude);
                patchset.add(Patch {
                    file: file_name.to_string(),
                    snippet: Snippet::Between { start, end },
                    replacement: format!("{content}{newline}{newline}{anchor}{newline}"),
                });
                patched = true;
            }

            let mut new_content = if patched {
                let results = patchset
                    .apply_to_files()
                    .map_err(|e| Error::Patch(e.to_string()))?;
                results.get(file_name).cloned().unwrap_or(original)
            } else {
                original
            };

            for content in appended {
                if !new_content.is_empty() && !new_content.ends_with('\n') {
                    new_content.push_str(newline);
                }
                if !new_content.is_empty() {
                    new_content.push_str(newline);
                }
                new_content.push_str(&content);
                new_content.push_str(newline);
            }

            fs::write(file_name, new_content).map_err(|e| Error::io(file_name, e))?;
        }

        Ok(())
    }
}

/// Line terminator used by `text`: CRLF if its first line ends with one, LF otherwise.
fn line_ending(text: &str) -> &'static str {
    match text.find('\n') {
        Some(end) if text[..end].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

#[cfg(test)]
#[path = "tests/edit_plan.rs"]
mod tests;

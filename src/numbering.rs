//! The counter state machine behind every dotted section number.
//!
//! Six counters, one per heading level. Incrementing a level bumps its counter and zeroes every
//! deeper one, so `increment(1); increment(2); increment(2); increment(1)` reads `1`, `1.1`,
//! `1.2`, `2`.
//!
//! Every level is numbered, starting at level 1. Zero counters are dropped when a number is
//! rendered: a level-3 heading directly under a level-1 heading reads `1.1`, never `1.0.1`.
//!
//! A manager carries no identity across document edits. Callers build a fresh one for each
//! recompute, extract, preview or validation pass and drop it afterwards.

use crate::error::NumberingError;
use crate::section::strip_number_prefix;
use std::fmt;

/// Deepest heading level the counters track.
pub const MAX_LEVEL: u8 = 6;

const SLOTS: usize = MAX_LEVEL as usize;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Per-level heading counters producing numbers such as `1.2.3`.
pub struct NumberingManager {
    counters: [u32; SLOTS],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Switches for [`NumberingManager::generate_heading_markup`].
pub struct MarkupOptions {
    /// Advance the counter for this level before reading the number.
    pub auto_increment: bool,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            auto_increment: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A heading ready to be materialised, carrying its computed number and cleaned title.
pub struct HeadingMarkup {
    /// Heading level (1-6).
    pub level: u8,
    /// Dotted number, empty when every counter up to this level is zero.
    pub number: String,
    /// Title with any typed number prefix removed.
    pub title: String,
}

impl HeadingMarkup {
    #[must_use]
    /// Render as an ATX markdown heading line, e.g. `## 1.2. Background`.
    pub fn markdown_line(&self) -> String {
        format!("{} {self}", "#".repeat(usize::from(self.level)))
    }
}

impl fmt::Display for HeadingMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.number.is_empty() {
            f.write_str(&self.title)
        } else {
            write!(f, "{}. {}", self.number, self.title)
        }
    }
}

fn slot_count(level: u8) -> Result<usize, NumberingError> {
    if (1..=MAX_LEVEL).contains(&level) {
        Ok(usize::from(level))
    } else {
        Err(NumberingError::InvalidLevel(level))
    }
}

fn bump(counters: &mut [u32; SLOTS], depth: usize) {
    counters[depth - 1] = counters[depth - 1].saturating_add(1);
    for deeper in &mut counters[depth..] {
        *deeper = 0;
    }
}

fn render(counters: &[u32; SLOTS], depth: usize) -> String {
    counters[..depth]
        .iter()
        .filter(|n| **n > 0)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

impl NumberingManager {
    #[must_use]
    /// Start with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero all six counters.
    pub fn reset(&mut self) {
        self.counters = [0; SLOTS];
    }

    /// Count one more heading at `level` and zero every deeper level.
    ///
    /// # Errors
    ///
    /// Returns [`NumberingError::InvalidLevel`] if `level` is not in `1..=6`.
    pub fn increment(&mut self, level: u8) -> Result<(), NumberingError> {
        let depth = slot_count(level)?;
        bump(&mut self.counters, depth);
        Ok(())
    }

    /// Current number for `level`, skipping zero counters.
    ///
    /// # Errors
    ///
    /// Returns [`NumberingError::InvalidLevel`] if `level` is not in `1..=6`.
    pub fn get_number(&self, level: u8) -> Result<String, NumberingError> {
        let depth = slot_count(level)?;
        Ok(render(&self.counters, depth))
    }

    /// Number the next heading at `level` would receive, without advancing any counter.
    ///
    /// # Errors
    ///
    /// Returns [`NumberingError::InvalidLevel`] if `level` is not in `1..=6`.
    pub fn get_next_number(&self, level: u8) -> Result<String, NumberingError> {
        let depth = slot_count(level)?;
        let mut scratch = self.counters;
        bump(&mut scratch, depth);
        Ok(render(&scratch, depth))
    }

    /// Load counters from a dotted number such as `2.1.4`.
    ///
    /// Parts that are missing or not numbers count as zero, parts beyond the sixth are ignored.
    /// Empty input leaves the counters untouched.
    pub fn parse_and_set(&mut self, number: &str) {
        let number = number.trim();
        if number.is_empty() {
            return;
        }
        self.reset();
        for (slot, part) in self.counters.iter_mut().zip(number.split('.')) {
            *slot = part.trim().parse().unwrap_or(0);
        }
    }

    #[must_use]
    /// Copy of the current counter state.
    pub fn get_counters(&self) -> [u32; SLOTS] {
        self.counters
    }

    /// Replace the counter state.
    ///
    /// # Errors
    ///
    /// Returns [`NumberingError::InvalidCounters`] unless exactly six values are given.
    pub fn set_counters(&mut self, counters: &[u32]) -> Result<(), NumberingError> {
        self.counters = counters
            .try_into()
            .map_err(|_| NumberingError::InvalidCounters(counters.len()))?;
        Ok(())
    }

    /// Build a numbered heading for `title`, advancing the counters unless told not to.
    ///
    /// # Errors
    ///
    /// Returns [`NumberingError::InvalidLevel`] if `level` is not in `1..=6`.
    pub fn generate_heading_markup(
        &mut self,
        level: u8,
        title: &str,
        options: MarkupOptions,
    ) -> Result<HeadingMarkup, NumberingError> {
        if options.auto_increment {
            self.increment(level)?;
        }
        Ok(HeadingMarkup {
            level,
            number: self.get_number(level)?,
            title: strip_number_prefix(title).to_string(),
        })
    }
}

#[cfg(test)]
#[path = "tests/numbering.rs"]
mod tests;

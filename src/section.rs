//! Heading occurrences as they are met during a document walk.
//!
//! Headings typed by hand or pasted from elsewhere often already carry a number ("2.1 Methods").
//! That prefix is presentation, not content, so every consumer works from the clean text and
//! recomputes the number itself.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static NUMBER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)*)\.?\s+").expect("number prefix pattern compiles")
});

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// A heading found in document order, with its text before and after prefix stripping.
pub struct HeadingOccurrence {
    /// Nesting depth in the document hierarchy (1 for top-level).
    pub level: u8,
    /// Heading text exactly as it appears in the document.
    pub raw_text: String,
    /// Heading text without any leading section number.
    pub clean_text: String,
    /// Position offset of the heading block in the document.
    pub position: usize,
}

impl HeadingOccurrence {
    #[must_use]
    /// Record a heading, deriving its clean text from the raw text.
    pub fn new(level: u8, raw_text: impl Into<String>, position: usize) -> Self {
        let raw_text = raw_text.into();
        let clean_text = strip_number_prefix(&raw_text).to_string();
        Self {
            level,
            raw_text,
            clean_text,
            position,
        }
    }
}

#[must_use]
/// Remove a leading section number such as `1.`, `1.2` or `1.2.3. ` from heading text.
///
/// The number must be followed by whitespace, so `3D printing` is left alone.
pub fn strip_number_prefix(text: &str) -> &str {
    split_number_prefix(text).1
}

#[must_use]
/// Split heading text into its typed number (without the trailing dot) and the remaining title.
pub fn split_number_prefix(text: &str) -> (Option<&str>, &str) {
    let text = text.trim();
    match NUMBER_PREFIX.captures(text) {
        Some(caps) => {
            let whole = caps.get(0).map_or(0, |m| m.end());
            let number = caps.get(1).map(|m| m.as_str());
            (number, text[whole..].trim())
        }
        None => (None, text),
    }
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;

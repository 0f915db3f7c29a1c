//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find a sectionist.toml, and if present we load settings from there.
//! This provides file extension and outline display preferences.

use crate::render::TreeStyle;
use facet::Facet;
use std::fs;
use std::path::Path;

/// File the configuration is read from, relative to the working directory.
pub const CONFIG_FILE: &str = "sectionist.toml";

#[derive(Facet, Clone, Debug, PartialEq, Eq)]
/// User preferences loaded from sectionist.toml or falling back to defaults.
pub struct Config {
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
    #[facet(default = true)]
    /// Show word counts next to outline entries.
    pub show_word_count: bool,
    #[facet(default = 4)]
    /// Columns per nesting level in outline trees.
    pub indent_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_extensions: vec!["md".to_string()],
            show_word_count: true,
            indent_width: 4,
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from sectionist.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, using defaults if it is missing or does not parse.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        facet_toml::from_str::<Self>(&contents).unwrap_or_else(|e| {
            tracing::warn!("ignoring {}: {e}", path.display());
            Self::default()
        })
    }

    #[must_use]
    /// Outline tree layout implied by these preferences.
    pub fn tree_style(&self) -> TreeStyle {
        TreeStyle {
            show_word_count: self.show_word_count,
            indent_width: self.indent_width,
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;

//! The shapes an outline payload can arrive in, and the text clean-up applied to raw strings.

use crate::document::Document;
use crate::error::IngestionParseError;
use crate::ingest::canonical::OutlineDescription;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq)]
/// An outline payload as delivered by the generator.
pub enum OutlinePayload {
    /// Already in canonical form.
    Canonical(OutlineDescription),
    /// A document tree with headings and paragraphs.
    TreeLike(Document),
    /// A string that still needs cleaning and parsing.
    RawText(String),
}

impl OutlinePayload {
    /// Sort a JSON value into one of the payload shapes.
    ///
    /// Strings become [`OutlinePayload::RawText`], objects whose `type` is `doc` become
    /// [`OutlinePayload::TreeLike`] and any other object is read as canonical.
    ///
    /// # Errors
    ///
    /// Returns an [`IngestionParseError`] for values that are not strings or objects, or objects
    /// that do not fit the shape their `type` announces.
    pub fn from_value(value: Value) -> Result<Self, IngestionParseError> {
        let raw = value.to_string();
        Self::classify(value, &raw)
    }

    /// Same as [`OutlinePayload::from_value`], reporting `raw` in any error.
    pub(crate) fn classify(value: Value, raw: &str) -> Result<Self, IngestionParseError> {
        let is_tree = value.get("type").and_then(Value::as_str) == Some("doc");
        match value {
            Value::String(text) => Ok(Self::RawText(text)),
            Value::Object(_) if is_tree => {
                serde_json::from_value(value)
                    .map(Self::TreeLike)
                    .map_err(|e| IngestionParseError::new(raw, format!("invalid document tree: {e}")))
            }
            Value::Object(_) => serde_json::from_value(value)
                .map(Self::Canonical)
                .map_err(|e| IngestionParseError::new(raw, format!("invalid outline: {e}"))),
            other => Err(IngestionParseError::new(
                raw,
                format!("expected an object or a string, got {}", json_kind(&other)),
            )),
        }
    }
}

impl From<OutlineDescription> for OutlinePayload {
    fn from(description: OutlineDescription) -> Self {
        Self::Canonical(description)
    }
}

impl From<Document> for OutlinePayload {
    fn from(document: Document) -> Self {
        Self::TreeLike(document)
    }
}

impl From<String> for OutlinePayload {
    fn from(text: String) -> Self {
        Self::RawText(text)
    }
}

impl From<&str> for OutlinePayload {
    fn from(text: &str) -> Self {
        Self::RawText(text.to_string())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[must_use]
/// Remove a surrounding fenced code block (three backticks, optional language tag).
///
/// Text that does not start with a fence is returned trimmed but otherwise unchanged.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    let rest = rest.trim_end();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Decode text that is itself one JSON string literal, as produced by double encoding.
fn unquote(text: &str) -> Option<String> {
    if text.len() < 2 || !text.starts_with('"') || !text.ends_with('"') {
        return None;
    }
    match serde_json::from_str::<String>(text) {
        Ok(inner) => Some(inner),
        Err(e) => {
            tracing::warn!("quoted outline payload did not decode as a string: {e}");
            None
        }
    }
}

#[must_use]
/// Clean a raw payload down to the text that should parse as JSON.
///
/// Strips a code fence, then, if what remains is a single quoted string, decodes it once and
/// strips a fence from the decoded text too.
pub fn clean_raw_text(raw: &str) -> String {
    let stripped = strip_code_fence(raw);
    match unquote(stripped) {
        Some(inner) => strip_code_fence(&inner).to_string(),
        None => stripped.to_string(),
    }
}

/// Parse a raw payload string into a structured payload.
///
/// # Errors
///
/// Returns an [`IngestionParseError`] carrying `raw` if the cleaned text is not JSON, or if it
/// decodes to yet another string.
pub fn parse_raw_text(raw: &str) -> Result<OutlinePayload, IngestionParseError> {
    let cleaned = clean_raw_text(raw);
    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| IngestionParseError::new(raw, format!("invalid JSON: {e}")))?;
    match OutlinePayload::classify(value, raw)? {
        OutlinePayload::RawText(_) => Err(IngestionParseError::new(
            raw,
            "payload is still a string after decoding",
        )),
        structured => Ok(structured),
    }
}

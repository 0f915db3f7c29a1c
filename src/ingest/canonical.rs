//! The canonical outline description every ingestion input is normalised to.
//!
//! Generated outlines are loosely typed, so every field is read leniently: a part of the wrong
//! shape is skipped and the rest of the outline is kept.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn text_items(value: Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(items.into_iter().filter_map(scalar_text).collect()),
        Value::Null => None,
        other => {
            tracing::warn!("ignoring outline field that should be a list: {other}");
            None
        }
    }
}

/// Text field. Numbers and booleans are written out, anything else reads as empty.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_opt_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

/// List of texts. A value that is not a list reads as empty; items that are not scalars are
/// dropped.
fn lenient_texts<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(text_items(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_opt_texts<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Ok(text_items(Value::deserialize(deserializer)?))
}

/// List of structured items. Items of the wrong shape are dropped, the rest are kept.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| {
            serde_json::from_value(item)
                .map_err(|e| tracing::warn!("dropping malformed outline entry: {e}"))
                .ok()
        })
        .collect())
}

/// Optional section. A section of the wrong shape reads as absent.
fn lenient_section<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value)
        .map_err(|e| tracing::warn!("ignoring malformed outline section: {e}"))
        .ok())
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A paper outline independent of where it came from.
pub struct OutlineDescription {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_texts"
    )]
    /// Candidate paper titles.
    pub title_suggestions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_section")]
    /// Suggested shape of the abstract.
    pub abstract_structure: Option<AbstractStructure>,
    #[serde(default, deserialize_with = "lenient_items")]
    /// Sections of the paper body in order.
    pub main_body: Vec<SectionOutline>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_section")]
    /// Suggested research approach and methods.
    pub suggested_methodology: Option<Methodology>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_section")]
    /// How the reference list should be organised.
    pub references_structure: Option<ReferencesStructure>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// The five parts of a structured abstract.
pub struct AbstractStructure {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_text"
    )]
    /// Research background.
    pub background: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_text"
    )]
    /// Research objective.
    pub objective: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_text"
    )]
    /// Methodology summary.
    pub methodology: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_text"
    )]
    /// Principal findings.
    pub key_findings: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_text"
    )]
    /// Implications of the findings.
    pub implications: Option<String>,
}

impl AbstractStructure {
    #[must_use]
    /// The present parts with their labels, in reading order.
    pub fn parts(&self) -> Vec<(&'static str, &str)> {
        [
            ("Background", &self.background),
            ("Objective", &self.objective),
            ("Methodology", &self.methodology),
            ("Key findings", &self.key_findings),
            ("Implications", &self.implications),
        ]
        .into_iter()
        .filter_map(|(label, part)| {
            part.as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(|text| (label, text))
        })
        .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A top-level section of the paper body.
pub struct SectionOutline {
    #[serde(default, deserialize_with = "lenient_text")]
    /// Section heading text.
    pub section_title: String,
    #[serde(default, deserialize_with = "lenient_items")]
    /// Subsections in order.
    pub subsections: Vec<SubsectionOutline>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A subsection and the points it should cover.
pub struct SubsectionOutline {
    #[serde(default, deserialize_with = "lenient_text")]
    /// Subsection heading text.
    pub subsection_title: String,
    #[serde(default, deserialize_with = "lenient_texts")]
    /// Points to cover, one bullet each.
    pub key_points: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Suggested research methodology.
pub struct Methodology {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_text"
    )]
    /// Overall approach, e.g. "mixed methods".
    pub approach: Option<String>,
    #[serde(default, deserialize_with = "lenient_items")]
    /// Individual methods.
    pub methods: Vec<MethodOutline>,
}

impl Methodology {
    #[must_use]
    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.approach.as_deref().is_none_or(|a| a.trim().is_empty()) && self.methods.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One suggested method.
pub struct MethodOutline {
    #[serde(default, deserialize_with = "lenient_text")]
    /// Method name.
    pub method_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    /// What the method involves.
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Organisation of the reference list.
pub struct ReferencesStructure {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_text"
    )]
    /// Citation style, e.g. "APA".
    pub citation_style: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_texts"
    )]
    /// Kinds of sources to draw on.
    pub source_categories: Option<Vec<String>>,
}

impl ReferencesStructure {
    #[must_use]
    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.citation_style
            .as_deref()
            .is_none_or(|style| style.trim().is_empty())
            && self.source_categories.as_ref().is_none_or(Vec::is_empty)
    }
}

impl OutlineDescription {
    #[must_use]
    /// Whether the description has nothing to materialise.
    pub fn is_empty(&self) -> bool {
        self.title_suggestions.as_ref().is_none_or(Vec::is_empty)
            && self
                .abstract_structure
                .as_ref()
                .is_none_or(|a| a.parts().is_empty())
            && self.main_body.is_empty()
            && self
                .suggested_methodology
                .as_ref()
                .is_none_or(Methodology::is_empty)
            && self
                .references_structure
                .as_ref()
                .is_none_or(ReferencesStructure::is_empty)
    }
}

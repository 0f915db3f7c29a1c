//! Turning a canonical outline description into insertable blocks.
//!
//! Body sections become level-1 headings and subsections level-2 headings, with key points as a
//! bullet list under each subsection. Numbers are not written into heading text: the
//! synchronizer assigns them on the next recompute pass. Title suggestions, the abstract, the
//! methodology and the reference structure each become a separate quote block, left out when
//! empty.

use crate::document::Block;
use crate::ingest::canonical::{AbstractStructure, Methodology, OutlineDescription, ReferencesStructure};

const UNTITLED_SECTION: &str = "Untitled section";
const UNTITLED_SUBSECTION: &str = "Untitled subsection";
const UNTITLED_METHOD: &str = "Untitled method";

fn or_placeholder<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    let text = text.trim();
    if text.is_empty() {
        placeholder
    } else {
        text
    }
}

#[must_use]
/// Blocks for `description`, in the order they should be inserted.
pub fn materialize(description: &OutlineDescription) -> Vec<Block> {
    let mut blocks = Vec::new();

    if let Some(titles) = description.title_suggestions.as_deref() {
        blocks.extend(title_block(titles));
    }
    if let Some(summary) = &description.abstract_structure {
        blocks.extend(abstract_block(summary));
    }

    for section in &description.main_body {
        blocks.push(Block::heading(
            1,
            or_placeholder(&section.section_title, UNTITLED_SECTION),
        ));
        for subsection in &section.subsections {
            blocks.push(Block::heading(
                2,
                or_placeholder(&subsection.subsection_title, UNTITLED_SUBSECTION),
            ));
            if !subsection.key_points.is_empty() {
                blocks.push(Block::bullet_list(subsection.key_points.iter().cloned()));
            }
        }
    }

    if let Some(methodology) = &description.suggested_methodology {
        blocks.extend(methodology_block(methodology));
    }
    if let Some(references) = &description.references_structure {
        blocks.extend(references_block(references));
    }

    blocks
}

fn title_block(titles: &[String]) -> Option<Block> {
    let titles: Vec<&str> = titles
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if titles.is_empty() {
        return None;
    }
    Some(Block::blockquote(vec![
        Block::paragraph("Title suggestions"),
        Block::bullet_list(titles),
    ]))
}

fn abstract_block(summary: &AbstractStructure) -> Option<Block> {
    let parts = summary.parts();
    if parts.is_empty() {
        return None;
    }
    let mut content = vec![Block::paragraph("Abstract structure")];
    content.extend(
        parts
            .into_iter()
            .map(|(label, text)| Block::paragraph(format!("{label}: {text}"))),
    );
    Some(Block::blockquote(content))
}

fn methodology_block(methodology: &Methodology) -> Option<Block> {
    if methodology.is_empty() {
        return None;
    }
    let heading = match methodology.approach.as_deref().map(str::trim) {
        Some(approach) if !approach.is_empty() => format!("Research methodology ({approach})"),
        _ => "Research methodology".to_string(),
    };
    let mut content = vec![Block::paragraph(heading)];
    if !methodology.methods.is_empty() {
        content.push(Block::bullet_list(methodology.methods.iter().map(|m| {
            let name = or_placeholder(&m.method_name, UNTITLED_METHOD);
            let description = m.description.trim();
            if description.is_empty() {
                name.to_string()
            } else {
                format!("{name}: {description}")
            }
        })));
    }
    Some(Block::blockquote(content))
}

fn references_block(references: &ReferencesStructure) -> Option<Block> {
    if references.is_empty() {
        return None;
    }
    let mut content = vec![Block::paragraph("References structure")];
    if let Some(style) = references
        .citation_style
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        content.push(Block::paragraph(format!("Citation style: {style}")));
    }
    if let Some(categories) = references
        .source_categories
        .as_deref()
        .filter(|c| !c.is_empty())
    {
        content.push(Block::paragraph("Source categories"));
        content.push(Block::bullet_list(categories.iter().cloned()));
    }
    Some(Block::blockquote(content))
}

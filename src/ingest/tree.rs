//! Reading a canonical outline back out of a document tree.
//!
//! Level-1 headings open sections, level-2 headings open subsections of the open section, and
//! paragraphs met while a subsection is open become its key points. Paragraphs inside bullet
//! lists count too, since the generator emits key points as lists. Deeper headings, text before
//! the first subsection and descriptive quotes are not part of the outline and are skipped.

use crate::document::{Block, Document};
use crate::ingest::canonical::{OutlineDescription, SectionOutline, SubsectionOutline};

#[must_use]
/// Convert a document tree into a canonical outline description.
pub fn tree_to_description(document: &Document) -> OutlineDescription {
    let mut main_body: Vec<SectionOutline> = Vec::new();
    let mut subsection_open = false;

    for block in &document.content {
        match block {
            Block::Heading { attrs, .. } if attrs.level == 1 => {
                main_body.push(SectionOutline {
                    section_title: block.text_content().trim().to_string(),
                    subsections: Vec::new(),
                });
                subsection_open = false;
            }
            Block::Heading { attrs, .. } if attrs.level == 2 => {
                if let Some(section) = main_body.last_mut() {
                    section.subsections.push(SubsectionOutline {
                        subsection_title: block.text_content().trim().to_string(),
                        key_points: Vec::new(),
                    });
                    subsection_open = true;
                }
            }
            Block::Paragraph { .. } | Block::BulletList { .. } if subsection_open => {
                if let Some(subsection) = main_body
                    .last_mut()
                    .and_then(|section| section.subsections.last_mut())
                {
                    collect_points(block, &mut subsection.key_points);
                }
            }
            _ => {}
        }
    }

    OutlineDescription {
        main_body,
        ..OutlineDescription::default()
    }
}

fn collect_points(block: &Block, points: &mut Vec<String>) {
    match block {
        Block::Paragraph { .. } => {
            let text = block.text_content();
            let text = text.trim();
            if !text.is_empty() {
                points.push(text.to_string());
            }
        }
        Block::BulletList { content } | Block::ListItem { content } => {
            for child in content {
                collect_points(child, points);
            }
        }
        _ => {}
    }
}

use super::OutlineExtractor;
use crate::document::{Block, Document};
use pretty_assertions::assert_eq;

fn paper() -> Document {
    Document::new(vec![
        Block::paragraph("Front matter words"),
        Block::heading(1, "Intro"),
        Block::paragraph("Two words"),
        Block::heading(2, "Background"),
        Block::paragraph("Some text here."),
        Block::bullet_list(["first point", "second"]),
        Block::heading(2, "2.9 Motivation"),
        Block::heading(1, "Methods"),
        Block::heading(3, "Sampling"),
    ])
}

#[test]
fn test_extract_builds_forest() {
    let forest = OutlineExtractor::new().extract(&paper()).unwrap();

    assert_eq!(forest.roots.len(), 2);
    let intro = &forest.roots[0];
    assert_eq!(intro.display_number, "1");
    assert_eq!(intro.clean_text, "Intro");
    assert_eq!(intro.key, "heading-0");
    assert_eq!(intro.children.len(), 2);
    assert_eq!(intro.children[0].display_number, "1.1");
    assert_eq!(intro.children[1].display_number, "1.2");
    assert_eq!(intro.children[1].clean_text, "Motivation");

    let methods = &forest.roots[1];
    assert_eq!(methods.display_number, "2");
    assert_eq!(methods.children[0].clean_text, "Sampling");
    assert_eq!(methods.children[0].display_number, "2.1");
}

#[test]
fn test_word_counts_stop_at_next_heading() {
    let forest = OutlineExtractor::new().extract(&paper()).unwrap();
    let counts: Vec<(String, usize)> = forest
        .flatten()
        .into_iter()
        .map(|(_, node)| (node.clean_text.clone(), node.word_count))
        .collect();

    assert_eq!(
        counts,
        vec![
            ("Intro".to_string(), 2),
            ("Background".to_string(), 6),
            ("Motivation".to_string(), 0),
            ("Methods".to_string(), 0),
            ("Sampling".to_string(), 0),
        ]
    );
    assert_eq!(forest.total_headings, 5);
    assert_eq!(forest.total_words, 8);
}

#[test]
fn test_flatten_reports_depth() {
    let forest = OutlineExtractor::new().extract(&paper()).unwrap();
    let depths: Vec<usize> = forest.flatten().iter().map(|(depth, _)| *depth).collect();
    assert_eq!(depths, vec![0, 1, 1, 0, 1]);
}

#[test]
fn test_positions_point_at_headings() {
    let document = paper();
    let forest = OutlineExtractor::new().extract(&document).unwrap();
    // "Front matter words" paragraph takes 2 + 18 tokens.
    assert_eq!(forest.roots[0].document_position, 20);
}

#[test]
fn test_deeper_heading_first_becomes_root() {
    let document = Document::new(vec![Block::heading(3, "Deep"), Block::heading(1, "Top")]);
    let forest = OutlineExtractor::new().extract(&document).unwrap();
    assert_eq!(forest.roots.len(), 2);
    assert_eq!(forest.roots[0].display_number, "1");
    assert_eq!(forest.roots[1].display_number, "1");
}

#[test]
fn test_invalid_level_fails_extraction() {
    let document = Document::new(vec![Block::heading(1, "Ok"), Block::heading(7, "Too deep")]);
    let failure = OutlineExtractor::new().extract(&document).unwrap_err();
    assert_eq!(failure.position, 4);
}

#[test]
fn test_empty_document_has_empty_forest() {
    let forest = OutlineExtractor::new().extract(&Document::default()).unwrap();
    assert!(forest.roots.is_empty());
    assert_eq!(forest.total_headings, 0);
}

#[test]
fn test_forest_serializes_camel_case() {
    let document = Document::new(vec![Block::heading(1, "Intro")]);
    let forest = OutlineExtractor::new().extract(&document).unwrap();
    let value = serde_json::to_value(&forest).unwrap();
    assert_eq!(value["totalHeadings"], 1);
    assert_eq!(value["roots"][0]["displayNumber"], "1");
    assert_eq!(value["roots"][0]["cleanText"], "Intro");
    assert_eq!(value["roots"][0]["documentPosition"], 0);
}

#[test]
fn test_four_heading_paper() {
    let document = Document::new(vec![
        Block::heading(1, "Intro"),
        Block::heading(2, "Background"),
        Block::heading(2, "Motivation"),
        Block::heading(1, "Methods"),
    ]);
    let forest = OutlineExtractor::new().extract(&document).unwrap();

    let shape: Vec<(String, String, Vec<(String, String)>)> = forest
        .roots
        .iter()
        .map(|root| {
            (
                root.display_number.clone(),
                root.clean_text.clone(),
                root.children
                    .iter()
                    .map(|child| (child.display_number.clone(), child.clean_text.clone()))
                    .collect(),
            )
        })
        .collect();
    assert_eq!(
        shape,
        vec![
            (
                "1".to_string(),
                "Intro".to_string(),
                vec![
                    ("1.1".to_string(), "Background".to_string()),
                    ("1.2".to_string(), "Motivation".to_string()),
                ],
            ),
            ("2".to_string(), "Methods".to_string(), Vec::new()),
        ]
    );
}

use super::{entries_from_document, SequenceEntry, SequenceValidator, ValidationRecord};
use crate::document::{Block, Document};
use crate::error::NumberingError;
use pretty_assertions::assert_eq;

#[test]
fn test_clean_sequence_is_valid() {
    let entries = vec![
        SequenceEntry::new(1, "1", "Intro"),
        SequenceEntry::new(2, "1.1", "Background"),
        SequenceEntry::new(2, "1.2", "Motivation"),
        SequenceEntry::new(1, "2", "Methods"),
    ];
    let report = SequenceValidator::new().validate(&entries).unwrap();
    assert!(report.is_valid);
    assert!(report.errors.is_empty());
}

#[test]
fn test_single_mismatch_is_reported() {
    let entries = vec![
        SequenceEntry::new(1, "1", "Intro"),
        SequenceEntry::new(2, "1.1", "Background"),
        SequenceEntry::new(2, "1.3", "Motivation"),
        SequenceEntry::new(2, "1.3", "Scope"),
        SequenceEntry::new(1, "2", "Methods"),
    ];
    let report = SequenceValidator::new().validate(&entries).unwrap();
    assert!(!report.is_valid);
    assert_eq!(
        report.errors,
        vec![ValidationRecord {
            index: 2,
            level: 2,
            expected: "1.2".to_string(),
            actual: "1.3".to_string(),
            text: "Motivation".to_string(),
        }]
    );
}

#[test]
fn test_every_mismatch_is_reported() {
    let entries = vec![
        SequenceEntry::new(1, "0", "A"),
        SequenceEntry::new(1, "1", "B"),
        SequenceEntry::new(3, "2.0.1", "C"),
    ];
    let report = SequenceValidator::new().validate(&entries).unwrap();
    let indices: Vec<usize> = report.errors.iter().map(|e| e.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(report.errors[2].expected, "2.1");
}

#[test]
fn test_invalid_level_is_an_error() {
    let entries = vec![SequenceEntry::new(8, "1", "Nope")];
    assert_eq!(
        SequenceValidator::new().validate(&entries),
        Err(NumberingError::InvalidLevel(8))
    );
}

#[test]
fn test_empty_sequence_is_valid() {
    assert!(SequenceValidator::new().validate(&[]).unwrap().is_valid);
}

#[test]
fn test_entries_from_typed_headings() {
    let document = Document::new(vec![
        Block::heading(1, "1. Intro"),
        Block::paragraph("1.1 not a heading"),
        Block::heading(2, "1.1 Background"),
        Block::heading(2, "Untyped"),
    ]);
    let entries = entries_from_document(&document);
    assert_eq!(
        entries,
        vec![
            SequenceEntry::new(1, "1", "Intro"),
            SequenceEntry::new(2, "1.1", "Background"),
            SequenceEntry::new(2, "", "Untyped"),
        ]
    );

    let report = SequenceValidator::new().validate(&entries).unwrap();
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].expected, "1.2");
}

#[test]
fn test_entries_deserialize_from_json() {
    let json = r#"[{"level": 1, "number": "1", "text": "Intro"}, {"level": 2}]"#;
    let entries: Vec<SequenceEntry> = serde_json::from_str(json).unwrap();
    assert_eq!(entries[1], SequenceEntry::new(2, "", ""));
}

#[test]
fn test_report_serializes_camel_case() {
    let report = SequenceValidator::new()
        .validate(&[SequenceEntry::new(1, "1", "Intro")])
        .unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["isValid"], true);
}

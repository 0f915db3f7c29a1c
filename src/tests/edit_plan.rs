use super::{line_ending, EditPlan};
use crate::error::Error;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

fn temp_file(content: &str) -> (NamedTempFile, String) {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file.flush().unwrap();
    let path = file.path().to_string_lossy().to_string();
    (file, path)
}

#[test]
fn test_insert_before_line() {
    let (_file, path) = temp_file("# Intro\n\nText\n\n# Methods\n\nMore\n");

    let mut plan = EditPlan::new();
    plan.insert_before_line(&path, 4, "# Background", "outline");
    plan.apply().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    println!("Result:\n{content}");
    let inserted = content.find("# Background").expect("inserted heading");
    let anchor = content.rfind("# Methods").expect("anchor line kept");
    assert!(inserted < anchor, "insertion should precede its anchor");
    assert!(content.starts_with("# Intro"));
    assert!(content.contains("More"));
}

#[test]
fn test_insert_past_end_appends() {
    let (_file, path) = temp_file("# Intro\n\nText");

    let mut plan = EditPlan::new();
    plan.insert_before_line(&path, usize::MAX, "# Appendix\n", "outline");
    plan.apply().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "# Intro\n\nText\n\n# Appendix\n");
}

#[test]
fn test_append_to_empty_file() {
    let (_file, path) = temp_file("");

    let mut plan = EditPlan::new();
    plan.insert_before_line(&path, 0, "# Only", "outline");
    plan.apply().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "# Only\n");
}

#[test]
fn test_same_line_insertions_keep_plan_order() {
    let (_file, path) = temp_file("A\nB\nC\n");

    let mut plan = EditPlan::new();
    plan.insert_before_line(&path, 1, "first", "one");
    plan.insert_before_line(&path, 1, "second", "two");
    plan.apply().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    println!("Result:\n{content}");
    let first = content.find("first").unwrap();
    let second = content.find("second").unwrap();
    assert!(first < second);
    assert!(content.contains('C'));
}

#[test]
fn test_missing_file_is_io_error() {
    let mut plan = EditPlan::new();
    plan.insert_before_line("/nonexistent/plan.md", 0, "x", "outline");
    assert!(matches!(plan.apply(), Err(Error::Io { .. })));
}

#[test]
fn test_plan_serializes() {
    let mut plan = EditPlan::new();
    plan.insert_before_line("doc.md", 3, "# New", "outline");
    let json = serde_json::to_string(&plan).unwrap();
    let back: EditPlan = serde_json::from_str(&json).unwrap();
    assert_eq!(back, plan);
}

#[test]
fn test_line_ending_detection() {
    assert_eq!(line_ending("a\r\nb\r\n"), "\r\n");
    assert_eq!(line_ending("a\nb\r\n"), "\n");
    assert_eq!(line_ending("single line"), "\n");
}

#[test]
fn test_crlf_file_keeps_crlf_on_insert() {
    let (_file, path) = temp_file("# Intro\r\n\r\nText\r\n\r\n# Methods\r\n\r\nMore\r\n");

    let mut plan = EditPlan::new();
    plan.insert_before_line(&path, 4, "# Background\n\n- point", "outline");
    plan.apply().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    println!("Result: {content:?}");
    assert!(content.contains("# Background\r\n\r\n- point\r\n"));
    assert!(content.contains("# Methods\r\n"));
    assert!(
        !content.replace("\r\n", "").contains('\n'),
        "every line should end in CRLF"
    );
}

#[test]
fn test_crlf_file_keeps_crlf_on_append() {
    let (_file, path) = temp_file("# Intro\r\nText");

    let mut plan = EditPlan::new();
    plan.insert_before_line(&path, usize::MAX, "# Appendix\n\nMore", "outline");
    plan.apply().unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "# Intro\r\nText\r\n\r\n# Appendix\r\n\r\nMore\r\n"
    );
}

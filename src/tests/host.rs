use super::{CommitListener, EditorHost};
use crate::document::{Block, Document, HostDocument};
use std::cell::RefCell;
use std::rc::Rc;

struct Recorder {
    seen: Rc<RefCell<Vec<(u64, Option<String>)>>>,
}

impl CommitListener for Recorder {
    fn on_commit(&mut self, revision: u64, snapshot: &Document) {
        self.seen
            .borrow_mut()
            .push((revision, snapshot.heading_number(0)));
    }
}

#[test]
fn test_new_host_numbers_document() {
    let host = EditorHost::new(Document::new(vec![
        Block::heading(1, "Intro"),
        Block::heading(2, "Background"),
    ]));
    assert_eq!(host.revision(), 0);
    assert_eq!(host.numbers().len(), 2);
    assert_eq!(host.document().heading_number(7).as_deref(), Some("1.1"));
}

#[test]
fn test_listeners_see_numbered_snapshot() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut host = EditorHost::new(Document::default());
    host.subscribe(Box::new(Recorder { seen: Rc::clone(&seen) }));

    host.commit(|document| document.content.push(Block::heading(1, "Intro")));
    host.commit(|document| document.content.push(Block::paragraph("text")));

    assert_eq!(
        *seen.borrow(),
        vec![(1, Some("1".to_string())), (2, Some("1".to_string()))]
    );
    assert_eq!(host.revision(), 2);
}

#[test]
fn test_commit_renumbers_after_insert() {
    let mut host = EditorHost::new(Document::new(vec![
        Block::heading(1, "Intro"),
        Block::heading(1, "Methods"),
    ]));
    let methods_at = host.document().content[0].node_size();
    host.insert_content(methods_at, vec![Block::heading(1, "Related work")]);

    let numbers: Vec<&str> = host
        .numbers()
        .entries
        .iter()
        .map(|entry| entry.number.as_str())
        .collect();
    assert_eq!(numbers, vec!["1", "2", "3"]);

    let document = host.into_document();
    assert_eq!(document.content[1].text_content(), "Related work");
    assert_eq!(document.content[2].text_content(), "Methods");
}

#[test]
fn test_failed_commit_leaves_metadata() {
    let mut host = EditorHost::new(Document::new(vec![Block::heading(1, "Intro")]));
    host.commit(|document| document.content.push(Block::heading(0, "Bad")));

    assert!(host.synchronizer().last_failure().is_some());
    assert_eq!(host.document().heading_number(0).as_deref(), Some("1"));
    assert_eq!(host.document().heading_number(7), None);
}

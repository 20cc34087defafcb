#![allow(clippy::float_cmp)]

use super::*;
use crate::camera::Point;
use crate::doc::Component;

// =============================================================
// Helpers
// =============================================================

/// A document holding `n` components, so snapshots are distinguishable by size.
fn doc_with(n: usize) -> DocStore {
    let mut doc = DocStore::new();
    for i in 0..n {
        #[allow(clippy::cast_precision_loss)]
        let x = i as f64 * 100.0;
        doc.add_component(Component::new("p".into(), "P".into(), String::new(), Point::new(x, 0.0)));
    }
    doc
}

// =============================================================
// Basics
// =============================================================

#[test]
fn empty_history_cannot_undo_or_redo() {
    let mut history = History::new();
    assert!(history.is_empty());
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert!(history.undo().is_none());
    assert!(history.redo().is_none());
}

#[test]
fn default_capacity_is_fifty() {
    assert_eq!(History::new().capacity(), 50);
}

#[test]
fn zero_capacity_is_raised_to_one() {
    let mut history = History::with_capacity(0);
    history.save(&doc_with(1));
    history.save(&doc_with(2));
    assert_eq!(history.len(), 1);
    assert_eq!(history.current().unwrap().doc.len(), 2);
}

#[test]
fn save_advances_cursor() {
    let mut history = History::new();
    history.save(&doc_with(1));
    assert_eq!(history.cursor(), 0);
    history.save(&doc_with(2));
    assert_eq!(history.cursor(), 1);
    assert!(history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn snapshot_has_timestamp() {
    let mut history = History::new();
    history.save(&doc_with(0));
    assert!(history.current().unwrap().ts > 0);
}

// =============================================================
// Undo / redo sequencing
// =============================================================

#[test]
fn three_actions_two_undos_then_redo() {
    let mut history = History::new();
    let (a1, a2, a3) = (doc_with(1), doc_with(2), doc_with(3));
    history.save(&a1);
    history.save(&a2);
    history.save(&a3);

    assert_eq!(history.undo().unwrap().len(), 2);
    assert_eq!(history.undo(), Some(&a1));
    assert!(history.undo().is_none());

    assert_eq!(history.redo(), Some(&a2));
}

#[test]
fn redo_at_end_is_noop() {
    let mut history = History::new();
    history.save(&doc_with(1));
    assert!(history.redo().is_none());
    assert_eq!(history.cursor(), 0);
}

#[test]
fn save_after_undo_truncates_redo_tail() {
    let mut history = History::new();
    history.save(&doc_with(1));
    history.save(&doc_with(2));
    history.save(&doc_with(3));
    history.undo();
    history.undo();
    history.save(&doc_with(7));

    assert_eq!(history.len(), 2);
    assert!(!history.can_redo());
    assert_eq!(history.current().unwrap().doc.len(), 7);
    assert_eq!(history.undo().unwrap().len(), 1);
}

// =============================================================
// Capacity
// =============================================================

#[test]
fn sixty_saves_keep_latest_fifty() {
    let mut history = History::new();
    for i in 1..=60 {
        history.save(&doc_with(i));
    }
    assert_eq!(history.len(), 50);
    let sizes: Vec<usize> = history.snapshots().map(|s| s.doc.len()).collect();
    assert_eq!(sizes, (11..=60).collect::<Vec<_>>());
    assert_eq!(history.cursor(), 49);

    let mut undos = 0;
    while history.undo().is_some() {
        undos += 1;
    }
    assert_eq!(undos, 49);
    assert_eq!(history.current().unwrap().doc.len(), 11);
}

// =============================================================
// Independence
// =============================================================

#[test]
fn snapshots_are_unaffected_by_later_mutation() {
    let mut history = History::new();
    let mut live = doc_with(1);
    history.save(&live);

    let id = live.components()[0].id;
    live.component_mut(&id).unwrap().x = 999.0;
    live.add_component(Component::new("q".into(), "Q".into(), String::new(), Point::new(1.0, 1.0)));

    let stored = &history.current().unwrap().doc;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored.component(&id).unwrap().x, 0.0);
}

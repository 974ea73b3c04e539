use anchorkit_core::{EditError, Error, Point, Transform};
use anchorkit_editor::PathEditor;
use anchorkit_settings::EditorConfig;

const SQUARE: &str = "M 0 0 L 10 0 L 10 10 L 0 10 Z";

fn square() -> PathEditor {
    let mut editor = PathEditor::new();
    editor.load(SQUARE, Transform::identity()).unwrap();
    editor
}

fn nudge(editor: &mut PathEditor, anchor: usize, x: f64, y: f64) {
    let id = editor.anchors()[anchor].id;
    editor.anchor_dragged(id, Point::new(x, y)).unwrap();
}

#[test]
fn test_undo_redo_walk() {
    let mut editor = square();
    let original = editor.path_string();
    nudge(&mut editor, 1, 12.0, 0.0);
    let after_first = editor.path_string();
    nudge(&mut editor, 2, 12.0, 12.0);
    let after_second = editor.path_string();

    assert_eq!(editor.undo().unwrap().path, after_first);
    assert_eq!(editor.undo().unwrap().path, original);
    assert!(matches!(
        editor.undo(),
        Err(Error::Edit(EditError::NothingToUndo))
    ));

    assert_eq!(editor.redo().unwrap().path, after_first);
    assert_eq!(editor.redo().unwrap().path, after_second);
    assert!(matches!(
        editor.redo(),
        Err(Error::Edit(EditError::NothingToRedo))
    ));
}

#[test]
fn test_new_edit_clears_redo() {
    let mut editor = square();
    nudge(&mut editor, 1, 12.0, 0.0);
    editor.undo().unwrap();
    assert!(editor.can_redo());
    nudge(&mut editor, 3, 0.0, 12.0);
    assert!(!editor.can_redo());
}

#[test]
fn test_undo_reports_structural_change() {
    let mut editor = square();
    nudge(&mut editor, 1, 12.0, 0.0);
    let outcome = editor.undo().unwrap();
    assert!(outcome.changed && outcome.structural);
    assert_eq!(outcome.anchors.len(), 4);
}

#[test]
fn test_restored_state_gets_fresh_ids() {
    let mut editor = square();
    let before: Vec<u64> = editor.path().nodes().iter().map(|n| n.id.0).collect();
    nudge(&mut editor, 1, 12.0, 0.0);
    editor.undo().unwrap();

    let newest = before.iter().copied().max().unwrap();
    assert!(editor.path().nodes().iter().all(|n| n.id.0 > newest));
    assert_eq!(editor.path_string(), SQUARE.replace(" Z", " L 0 0 Z"));
}

#[test]
fn test_gesture_collapses_to_one_record() {
    let mut editor = square();
    let original = editor.path_string();

    editor.begin_gesture("drag corner").unwrap();
    for step in 1..=5 {
        nudge(&mut editor, 2, 10.0 + step as f64, 10.0);
    }
    assert!(!editor.can_undo());
    assert!(matches!(
        editor.undo(),
        Err(Error::Edit(EditError::GestureInProgress))
    ));
    assert!(editor.end_gesture().unwrap());

    assert_eq!(editor.history().undo_count(), 1);
    assert_eq!(editor.history().undo_descriptions(), vec!["drag corner"]);
    assert_eq!(editor.undo().unwrap().path, original);
}

#[test]
fn test_gesture_without_change_records_nothing() {
    let mut editor = square();
    editor.begin_gesture("idle").unwrap();
    assert!(!editor.end_gesture().unwrap());
    assert!(!editor.can_undo());
}

#[test]
fn test_gesture_bookkeeping_errors() {
    let mut editor = square();
    assert!(editor.end_gesture().is_err());
    editor.begin_gesture("one").unwrap();
    assert!(matches!(
        editor.begin_gesture("two"),
        Err(Error::Edit(EditError::GestureInProgress))
    ));
}

#[test]
fn test_history_depth_from_config() {
    let config = EditorConfig {
        history_depth: 2,
        ..EditorConfig::default()
    };
    let mut editor = PathEditor::with_config(config);
    editor.load(SQUARE, Transform::identity()).unwrap();
    for x in [11.0, 12.0, 13.0, 14.0] {
        nudge(&mut editor, 1, x, 0.0);
    }
    editor.undo().unwrap();
    editor.undo().unwrap();
    assert!(editor.undo().is_err());
    assert_eq!(editor.anchors()[1].position, Point::new(12.0, 0.0));
}

#[test]
fn test_translation_is_part_of_history() {
    let mut editor = square();
    editor
        .set_transform(Transform::translation(30.0, 0.0))
        .unwrap();
    assert_eq!(editor.anchors()[0].position, Point::new(30.0, 0.0));

    editor.undo().unwrap();
    assert_eq!(editor.transform().translation_offset(), Point::ORIGIN);
    editor.redo().unwrap();
    assert_eq!(
        editor.transform().translation_offset(),
        Point::new(30.0, 0.0)
    );
}

#[test]
fn test_load_resets_history() {
    let mut editor = square();
    nudge(&mut editor, 1, 12.0, 0.0);
    editor.load("M 0 0 L 5 5", Transform::identity()).unwrap();
    assert!(!editor.can_undo());
    assert!(!editor.can_redo());
}

use anchorkit_core::{Point, RemovalMode, Transform};
use anchorkit_editor::{HandleDragOptions, PathEditor};
use anchorkit_settings::EditorConfig;
use tempfile::TempDir;

#[test]
fn test_persisted_settings_drive_the_editor() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("editor.toml");
    let config = EditorConfig {
        history_depth: 1,
        mirror_handles: false,
        removal_mode: RemovalMode::Weld,
        ..EditorConfig::default()
    };
    config.save_to_file(&path).unwrap();

    let mut editor = PathEditor::with_config(EditorConfig::load_from_file(&path).unwrap());
    editor
        .load("M 0 0 C 0 5 5 5 10 5 C 15 5 20 5 20 0", Transform::identity())
        .unwrap();

    let pre = editor.anchors()[1].pre_handle.unwrap();
    editor
        .handle_dragged(pre, Point::new(4.0, 8.0), HandleDragOptions::default())
        .unwrap();
    assert_eq!(
        editor.path_string(),
        "M 0 0 C 0 5 4 8 10 5 C 15 5 20 5 20 0"
    );

    let middle = editor.anchors()[1].id;
    editor.request_remove(&[middle]).unwrap();
    assert_eq!(editor.path_string(), "M 0 0 C 0 5 20 5 20 0");

    // depth 1: only the removal can be undone
    editor.undo().unwrap();
    assert!(!editor.can_undo());
}

use anchorkit_core::{Point, SegmentSide, Transform};
use anchorkit_editor::{HandleDragOptions, HandleId, PathEditor};
use anchorkit_path::ControlSlot;
use anchorkit_settings::EditorConfig;

// The anchor at (10, 5) is mirrored: (5, 5) and (15, 5) straddle it.
const SMOOTH: &str = "M 0 0 C 0 5 5 5 10 5 C 15 5 20 5 20 0";

fn smooth(config: EditorConfig) -> (PathEditor, HandleId) {
    let mut editor = PathEditor::with_config(config);
    editor.load(SMOOTH, Transform::identity()).unwrap();
    let pre = editor.anchors()[1].pre_handle.unwrap();
    (editor, pre)
}

#[test]
fn test_smooth_anchor_is_mirrored() {
    let (editor, pre) = smooth(EditorConfig::default());
    let anchor = &editor.anchors()[1];
    assert!(anchor.mirrored);
    assert_eq!(pre.slot, ControlSlot::Second);
    assert_eq!(anchor.next_handle.map(|h| h.slot), Some(ControlSlot::First));
    assert!(!editor.anchors()[0].mirrored);
}

#[test]
fn test_drag_moves_partner() {
    let (mut editor, pre) = smooth(EditorConfig::default());
    let outcome = editor
        .handle_dragged(pre, Point::new(4.0, 8.0), HandleDragOptions::default())
        .unwrap();

    assert_eq!(outcome.path, "M 0 0 C 0 5 4 8 10 5 C 16 2 20 5 20 0");
    assert_eq!(outcome.handles.len(), 2);
    assert!(outcome.handles.iter().all(|h| h.mirrored));
    let id = editor.anchors()[1].id;
    assert!(editor.mirror_status(id).unwrap());
}

#[test]
fn test_suppressed_drag_breaks_mirror() {
    let (mut editor, pre) = smooth(EditorConfig::default());
    editor
        .handle_dragged(pre, Point::new(4.0, 8.0), HandleDragOptions::suppressed())
        .unwrap();
    assert_eq!(
        editor.path_string(),
        "M 0 0 C 0 5 4 8 10 5 C 15 5 20 5 20 0"
    );
    assert!(!editor.anchors()[1].mirrored);
}

#[test]
fn test_mirroring_disabled_by_config() {
    let config = EditorConfig {
        mirror_handles: false,
        ..EditorConfig::default()
    };
    let (mut editor, pre) = smooth(config);
    editor
        .handle_dragged(pre, Point::new(4.0, 8.0), HandleDragOptions::default())
        .unwrap();
    assert_eq!(
        editor.path_string(),
        "M 0 0 C 0 5 4 8 10 5 C 15 5 20 5 20 0"
    );
}

#[test]
fn test_handle_views_carry_guides() {
    let mut editor = PathEditor::new();
    editor
        .load("M 0 0 C 0 5 5 5 10 5", Transform::translation(1.0, 1.0))
        .unwrap();
    let anchors = editor.anchors();
    let handles = editor.handles();
    assert_eq!(handles.len(), 2);

    assert_eq!(handles[0].anchor, anchors[0].id);
    assert_eq!(handles[0].side, SegmentSide::Next);
    assert_eq!(
        handles[0].guide(),
        (Point::new(1.0, 1.0), Point::new(1.0, 6.0))
    );

    assert_eq!(handles[1].anchor, anchors[1].id);
    assert_eq!(handles[1].side, SegmentSide::Pre);
    assert_eq!(handles[1].position, Point::new(6.0, 6.0));
}

#[test]
fn test_drag_across_closed_seam_reflects_through_move() {
    // the Move at (0, 0) takes its Pre handle from the closing cubic
    let mut editor = PathEditor::new();
    editor
        .load("M 0 0 C 5 -5 15 -5 20 0 C 25 5 -5 5 0 0 Z", Transform::identity())
        .unwrap();
    let start = editor.anchors()[0].clone();
    assert!(start.mirrored);

    let next = start.next_handle.unwrap();
    let outcome = editor
        .handle_dragged(next, Point::new(6.0, -2.0), HandleDragOptions::default())
        .unwrap();
    assert_eq!(outcome.path, "M 0 0 C 6 -2 15 -5 20 0 C 25 5 -6 2 0 0 Z");
    assert_eq!(outcome.handles.len(), 2);

    let pre = editor.anchors()[0].pre_handle.unwrap();
    assert_eq!(pre.slot, ControlSlot::Second);
    editor
        .handle_dragged(pre, Point::new(-4.0, 6.0), HandleDragOptions::default())
        .unwrap();
    assert_eq!(
        editor.path_string(),
        "M 0 0 C 4 -6 15 -5 20 0 C 25 5 -4 6 0 0 Z"
    );
    assert!(editor.mirror_status(start.id).unwrap());
}

use anchorkit_core::{EditError, Error, Point, RemovalMode, SegmentSide, Transform};
use anchorkit_editor::{HandleDragOptions, InsertMode, PathEditor};
use anchorkit_settings::EditorConfig;

fn loaded(data: &str, transform: Transform) -> PathEditor {
    let mut editor = PathEditor::new();
    editor.load(data, transform).unwrap();
    editor
}

#[test]
fn test_load_normalizes_and_exposes_anchors() {
    let editor = loaded("M 0 0 L 10 0 L 10 10 Z", Transform::translation(100.0, 100.0));
    assert_eq!(editor.path_string(), "M 0 0 L 10 0 L 10 10 L 0 0 Z");

    let anchors = editor.anchors();
    assert_eq!(anchors.len(), 3);
    assert_eq!(anchors[0].position, Point::new(100.0, 100.0));
    assert!(anchors.iter().all(|a| a.closed && !a.endpoint));
    assert!(!editor.can_undo());
}

#[test]
fn test_drag_uses_host_space() {
    let mut editor = loaded("M 0 0 L 10 0 L 10 10 Z", Transform::translation(100.0, 100.0));
    let id = editor.anchors()[1].id;

    let outcome = editor.anchor_dragged(id, Point::new(120.0, 100.0)).unwrap();
    assert!(outcome.changed);
    assert!(!outcome.structural);
    assert_eq!(outcome.anchors.len(), 1);
    assert_eq!(outcome.anchors[0].position, Point::new(120.0, 100.0));
    assert_eq!(outcome.path, "M 0 0 L 20 0 L 10 10 L 0 0 Z");
    assert!(editor.can_undo());
}

#[test]
fn test_drag_to_same_position_is_not_recorded() {
    let mut editor = loaded("M 0 0 L 10 0", Transform::identity());
    let id = editor.anchors()[1].id;
    let outcome = editor.anchor_dragged(id, Point::new(10.0, 0.0)).unwrap();
    assert!(!outcome.changed);
    assert!(!editor.can_undo());
}

#[test]
fn test_group_drag_is_all_or_nothing() {
    let mut editor = loaded("M 0 0 L 10 0 L 20 0", Transform::identity());
    let anchors = editor.anchors();
    let stale = anchors[2].id;
    editor.request_remove(&[stale]).unwrap();

    let result = editor.anchors_dragged(&[
        (anchors[0].id, Point::new(0.0, 5.0)),
        (stale, Point::new(20.0, 5.0)),
    ]);
    assert!(matches!(
        result,
        Err(Error::Edit(EditError::AnchorNotFound(id))) if id == stale
    ));
    assert_eq!(editor.path_string(), "M 0 0 L 10 0");
}

#[test]
fn test_rejected_merge_leaves_model_unchanged() {
    let mut editor = loaded("M 0 0 L 10 0 L 20 0 M 30 0 L 40 0", Transform::identity());
    let anchors = editor.anchors();
    let before = editor.path_string();

    let result = editor.request_merge(anchors[1].id, anchors[3].id);
    assert!(result.as_ref().is_err_and(|e| e.is_edit_error()));
    assert_eq!(editor.path_string(), before);
    assert!(!editor.can_undo());
}

#[test]
fn test_merge_endpoints_joins_subpaths() {
    let mut editor = loaded("M 0 0 L 10 0 M 10 0 L 20 0", Transform::identity());
    let anchors = editor.anchors();
    let outcome = editor.request_merge(anchors[1].id, anchors[2].id).unwrap();
    assert!(outcome.structural);
    assert_eq!(outcome.path, "M 0 0 L 10 0 L 20 0");
    assert_eq!(outcome.anchors.len(), 3);
}

#[test]
fn test_failed_load_keeps_previous_path() {
    let mut editor = loaded("M 0 0 L 1 1", Transform::identity());
    let result = editor.load("M 0 0 A 1", Transform::identity());
    assert!(result.as_ref().is_err_and(|e| e.is_parse_error()));
    assert_eq!(editor.path_string(), "M 0 0 L 1 1");
}

#[test]
fn test_singular_transform_rejected() {
    let mut editor = PathEditor::new();
    let result = editor.load("M 0 0 L 1 1", Transform::scale(0.0, 1.0));
    assert!(matches!(
        result,
        Err(Error::Edit(EditError::SingularTransform))
    ));
    assert!(editor.path().is_empty());
}

#[test]
fn test_load_with_offset_rebases() {
    let mut editor = PathEditor::new();
    editor
        .load_with_offset(
            "M 100 100 L 110 100",
            Transform::identity(),
            Point::new(100.0, 100.0),
        )
        .unwrap();
    assert_eq!(editor.path_string(), "M 0 0 L 10 0");
    assert_eq!(editor.anchors()[1].position, Point::new(110.0, 100.0));
    assert_eq!(
        editor.transform().translation_offset(),
        Point::new(100.0, 100.0)
    );
}

#[test]
fn test_configured_removal_mode() {
    let config = EditorConfig {
        removal_mode: RemovalMode::Weld,
        ..EditorConfig::default()
    };
    let mut editor = PathEditor::with_config(config);
    editor.load("M 0 0 L 10 0 L 20 0", Transform::identity()).unwrap();
    let middle = editor.anchors()[1].id;
    editor.request_remove(&[middle]).unwrap();
    assert_eq!(editor.path_string(), "M 0 0 L 20 0");

    editor.undo().unwrap();
    let middle = editor.anchors()[1].id;
    editor
        .request_remove_with(&[middle], RemovalMode::Cut)
        .unwrap();
    assert_eq!(editor.path_string(), "M 0 0 L 10 0 M 10 0 L 20 0");
}

#[test]
fn test_split_insert_in_host_space() {
    let mut editor = loaded("M 0 0 L 10 0", Transform::translation(5.0, 5.0));
    let segment = editor.anchors()[1].id;
    let outcome = editor
        .request_insert(segment, Point::new(9.0, 8.0), InsertMode::Split)
        .unwrap();
    assert!(outcome.structural);
    assert_eq!(outcome.path, "M 0 0 L 4 0 L 10 0");
}

#[test]
fn test_elevate_then_degrade_round_trip() {
    let mut editor = loaded("M 0 0 L 9 0", Transform::identity());
    let tail = editor.anchors()[1].id;

    editor.request_elevate(tail).unwrap();
    assert_eq!(editor.path_string(), "M 0 0 Q 9 -3 9 0");
    assert_eq!(editor.handles().len(), 1);

    editor.request_degrade(tail, SegmentSide::Pre).unwrap();
    assert_eq!(editor.path_string(), "M 0 0 L 9 0");
    assert!(editor.handles().is_empty());
}

#[test]
fn test_invert_and_cubic_requests() {
    let mut editor = loaded("M 0 0 L 3 0", Transform::identity());
    let tail = editor.anchors()[1].id;
    editor.request_cubic(tail).unwrap();
    assert_eq!(editor.path_string(), "M 0 0 C 1 0 2 0 3 0");

    editor.request_invert(tail).unwrap();
    assert_eq!(editor.path_string(), "M 3 0 C 2 0 1 0 0 0");
}

#[test]
fn test_outcome_serializes() {
    let mut editor = loaded("M 0 0 L 10 0", Transform::identity());
    let id = editor.anchors()[1].id;
    let outcome = editor.anchor_dragged(id, Point::new(12.0, 0.0)).unwrap();
    let json = outcome.to_json().unwrap();
    assert!(json.contains("\"structural\": false"));
    assert!(json.contains("\"path\": \"M 0 0 L 12 0\""));
}

#[test]
fn test_shared_editor_across_threads() {
    let shared = loaded("M 0 0 L 10 0", Transform::identity()).into_shared();
    let id = shared.lock().anchors()[1].id;

    let worker = {
        let shared = shared.clone();
        std::thread::spawn(move || {
            shared
                .lock()
                .anchor_dragged(id, Point::new(10.0, 10.0))
                .map(|o| o.changed)
        })
    };
    assert!(worker.join().unwrap().unwrap());
    assert_eq!(shared.lock().path_string(), "M 0 0 L 10 10");
}

#[test]
fn test_non_finite_positions_rejected() {
    let mut editor = loaded("M 0 0 Q 5 5 10 0", Transform::identity());
    let before = editor.path_string();
    let anchors = editor.anchors();
    let tail = anchors[1].id;
    let handle = anchors[1].pre_handle.unwrap();
    let nan = Point::new(f64::NAN, 0.0);
    let inf = Point::new(0.0, f64::INFINITY);

    let results = [
        editor.anchor_dragged(tail, nan),
        editor.anchors_dragged(&[(anchors[0].id, Point::new(1.0, 1.0)), (tail, inf)]),
        editor.handle_dragged(handle, inf, HandleDragOptions::default()),
        editor.request_insert(tail, nan, InsertMode::Split),
        editor.request_insert(tail, Point::new(20.0, 0.0), InsertMode::Append { handle: Some(inf) }),
    ];
    for result in results {
        assert!(matches!(
            result,
            Err(Error::Edit(EditError::NonFiniteCoordinate(_)))
        ));
    }
    assert_eq!(editor.path_string(), before);
    assert!(!editor.can_undo());
}

#[test]
fn test_overflowing_drag_rejected() {
    let mut editor = loaded("M 0 0 L 10 0", Transform::scale(1e-150, 1e-150));
    let tail = editor.anchors()[1].id;
    let result = editor.anchor_dragged(tail, Point::new(1e200, 0.0));
    assert!(matches!(
        result,
        Err(Error::Edit(EditError::NonFiniteCoordinate(_)))
    ));
    assert_eq!(editor.path_string(), "M 0 0 L 10 0");
}

#[test]
fn test_non_finite_load_inputs_rejected() {
    let mut editor = loaded("M 0 0 L 10 0", Transform::identity());

    let result = editor.load("M 1e400 0 L 0 0", Transform::identity());
    assert!(result.as_ref().is_err_and(|e| e.is_parse_error()));

    let result = editor.load_with_offset(
        "M 0 0 L 10 0",
        Transform::identity(),
        Point::new(f64::NAN, 0.0),
    );
    assert!(matches!(
        result,
        Err(Error::Edit(EditError::NonFiniteCoordinate(_)))
    ));

    let result = editor.load(
        "M 0 0 L 10 0",
        Transform::new(1.0, 0.0, 0.0, 1.0, f64::INFINITY, 0.0),
    );
    assert!(matches!(
        result,
        Err(Error::Edit(EditError::SingularTransform))
    ));

    assert_eq!(editor.path_string(), "M 0 0 L 10 0");
    assert_eq!(editor.transform(), Transform::identity());
}

use anchorkit_core::{Point, Transform};
use anchorkit_editor::PathEditor;
use proptest::prelude::*;

const SQUARE: &str = "M 0 0 L 10 0 L 10 10 L 0 10 Z";

fn drag() -> impl Strategy<Value = (usize, i32, i32)> {
    (0usize..4, -50i32..50, -50i32..50)
}

proptest! {
    #[test]
    fn undo_all_restores_load_state(drags in prop::collection::vec(drag(), 1..12)) {
        let mut editor = PathEditor::new();
        editor.load(SQUARE, Transform::translation(3.0, -7.0)).unwrap();
        let original = editor.path_string();

        for (anchor, x, y) in drags {
            let id = editor.anchors()[anchor].id;
            editor.anchor_dragged(id, Point::new(x as f64, y as f64)).unwrap();
        }
        while editor.can_undo() {
            editor.undo().unwrap();
        }
        prop_assert_eq!(editor.path_string(), original);
    }

    #[test]
    fn closed_subpath_stays_closed_under_drags(drags in prop::collection::vec(drag(), 1..12)) {
        let mut editor = PathEditor::new();
        editor.load(SQUARE, Transform::identity()).unwrap();

        for (anchor, x, y) in drags {
            let id = editor.anchors()[anchor].id;
            editor.anchor_dragged(id, Point::new(x as f64, y as f64)).unwrap();
            let ins: Vec<_> = editor.path().instructions().collect();
            prop_assert_eq!(ins.len(), 6);
            prop_assert_eq!(ins[0].anchor(), ins[4].anchor());
        }
    }
}

use anchorkit_core::Point;
use anchorkit_path::{
    invert, is_endpoint, neighbors, split_into_subpaths, subpath_of, Instruction, VectorPath,
};

fn ids(path: &VectorPath) -> Vec<anchorkit_core::InstructionId> {
    path.nodes().iter().map(|n| n.id).collect()
}

#[test]
fn test_subpath_ranges_and_flags() {
    let path = VectorPath::parse("M 0 0 L 5 0 M 10 0 L 15 0 L 15 5 Z").unwrap();
    let sps = split_into_subpaths(&path);
    assert_eq!(sps.len(), 2);
    assert_eq!(sps[0].range, 0..2);
    assert!(!sps[0].closed);
    assert_eq!(sps[1].range, 2..7);
    assert!(sps[1].closed);
    assert_eq!(subpath_of(&path, 4).map(|sp| sp.index), Some(1));
}

#[test]
fn test_closed_next_resolves_to_head() {
    let path = VectorPath::parse("M 0 0 L 10 0 L 10 10 Z").unwrap();
    let ids = ids(&path);
    // the closing duplicate at index 3 wraps to the move
    assert_eq!(neighbors(&path, ids[3]).unwrap().next, Some(ids[0]));
    // Close itself has no next
    assert_eq!(neighbors(&path, ids[4]).unwrap().next, None);
}

#[test]
fn test_unknown_id_has_no_neighbors() {
    let path = VectorPath::parse("M 0 0 L 1 1").unwrap();
    assert!(neighbors(&path, anchorkit_core::InstructionId(999)).is_none());
    assert!(!is_endpoint(&path, anchorkit_core::InstructionId(999)));
}

#[test]
fn test_single_move_is_endpoint() {
    let path = VectorPath::parse("M 3 3").unwrap();
    let ids = ids(&path);
    assert!(is_endpoint(&path, ids[0]));
}

#[test]
fn test_invert_quad_keeps_control() {
    let ins = vec![
        Instruction::Move(Point::new(0.0, 0.0)),
        Instruction::Quad {
            ctrl: Point::new(5.0, 5.0),
            to: Point::new(10.0, 0.0),
        },
    ];
    assert_eq!(
        invert(&ins),
        vec![
            Instruction::Move(Point::new(10.0, 0.0)),
            Instruction::Quad {
                ctrl: Point::new(5.0, 5.0),
                to: Point::new(0.0, 0.0),
            },
        ]
    );
}

use anchorkit_path::{invert, split_into_subpaths, VectorPath};
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = i32> {
    -50i32..50
}

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        (coord(), coord()).prop_map(|(x, y)| format!("L {} {}", x, y)),
        (coord(), coord(), coord(), coord())
            .prop_map(|(cx, cy, x, y)| format!("Q {} {} {} {}", cx, cy, x, y)),
        (coord(), coord(), coord(), coord(), coord(), coord()).prop_map(
            |(c1x, c1y, c2x, c2y, x, y)| format!("C {} {} {} {} {} {}", c1x, c1y, c2x, c2y, x, y)
        ),
    ]
}

fn subpath() -> impl Strategy<Value = String> {
    (
        coord(),
        coord(),
        prop::collection::vec(segment(), 1..6),
        any::<bool>(),
    )
        .prop_map(|(x, y, segments, closed)| {
            let mut s = format!("M {} {} {}", x, y, segments.join(" "));
            if closed {
                s.push_str(" Z");
            }
            s
        })
}

fn path_data() -> impl Strategy<Value = String> {
    prop::collection::vec(subpath(), 1..4).prop_map(|sps| sps.join(" "))
}

proptest! {
    #[test]
    fn normalization_is_idempotent(data in path_data()) {
        let path = VectorPath::parse(&data).unwrap();
        let mut again = path.clone();
        prop_assert!(!again.normalize());
        prop_assert_eq!(again.to_string(), path.to_string());
    }

    #[test]
    fn closed_subpaths_end_on_their_move(data in path_data()) {
        let path = VectorPath::parse(&data).unwrap();
        let nodes = path.nodes();
        for sp in split_into_subpaths(&path).into_iter().filter(|sp| sp.closed) {
            let start = nodes[sp.range.start].instruction.anchor();
            let last = nodes[sp.range.end - 2].instruction.anchor();
            prop_assert_eq!(start, last);
        }
    }

    #[test]
    fn invert_is_an_involution(data in path_data()) {
        let path = VectorPath::parse(&data).unwrap();
        let all: Vec<_> = path.instructions().collect();
        for sp in split_into_subpaths(&path) {
            let original = &all[sp.range.clone()];
            prop_assert_eq!(invert(&invert(original)), original.to_vec());
        }
    }

    #[test]
    fn serialization_reparses_to_same_path(data in path_data()) {
        let path = VectorPath::parse(&data).unwrap();
        let again = VectorPath::parse(&path.to_string()).unwrap();
        prop_assert_eq!(again, path);
    }
}

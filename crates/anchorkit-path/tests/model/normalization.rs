use anchorkit_core::{ParseError, Point};
use anchorkit_path::{Instruction, VectorPath};

#[test]
fn test_open_triangle_gets_closing_segment() {
    let path = VectorPath::parse("M 0 0 L 10 0 L 10 10 Z").unwrap();
    assert_eq!(path.to_string(), "M 0 0 L 10 0 L 10 10 L 0 0 Z");
}

#[test]
fn test_curve_closure_patched_with_line() {
    let path = VectorPath::parse("M 0 0 Q 5 -5 10 0 C 12 5 8 10 5 10 z").unwrap();
    assert_eq!(
        path.to_string(),
        "M 0 0 Q 5 -5 10 0 C 12 5 8 10 5 10 L 0 0 Z"
    );
}

#[test]
fn test_every_closed_subpath_is_patched() {
    let path = VectorPath::parse("M 0 0 L 1 0 L 1 1 Z M 5 5 L 6 5 L 6 6 Z").unwrap();
    assert_eq!(
        path.to_string(),
        "M 0 0 L 1 0 L 1 1 L 0 0 Z M 5 5 L 6 5 L 6 6 L 5 5 Z"
    );
}

#[test]
fn test_open_subpath_untouched() {
    let path = VectorPath::parse("M 0 0 L 10 0 L 10 10").unwrap();
    assert_eq!(path.to_string(), "M 0 0 L 10 0 L 10 10");
}

#[test]
fn test_relative_input_serializes_absolute() {
    let path = VectorPath::parse("m 10 10 l 5 0 v 5 h -5 z").unwrap();
    assert_eq!(path.to_string(), "M 10 10 L 15 10 L 15 15 L 10 15 L 10 10 Z");
}

#[test]
fn test_rebase_then_normalize() {
    let mut path = VectorPath::parse("M 110 110 L 120 110 L 120 120 Z").unwrap();
    path.rebase(Point::new(100.0, 100.0));
    assert_eq!(path.to_string(), "M 10 10 L 20 10 L 20 20 L 10 10 Z");
    assert!(!path.normalize());
}

#[test]
fn test_parse_failure_reports_offset() {
    let err = VectorPath::parse("M 0 0 L 10").unwrap_err();
    assert!(matches!(
        err,
        ParseError::MissingCoordinates {
            command: 'L',
            expected: 2,
            found: 1,
            ..
        }
    ));

    let err = VectorPath::parse("M 0 0 A 5 5 0 0 1 10 10").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnsupportedCommand {
            command: 'A',
            offset: 6
        }
    );
}

#[test]
fn test_from_str_matches_parse() {
    let a: VectorPath = "M 0 0 L 3 4".parse().unwrap();
    let b = VectorPath::from_instructions([
        Instruction::Move(Point::new(0.0, 0.0)),
        Instruction::Line(Point::new(3.0, 4.0)),
    ]);
    assert_eq!(a, b);
}

#[test]
fn test_fractional_values_survive_serialization() {
    let path = VectorPath::parse("M 0.1 0.2 L 1e-3 -2.5").unwrap();
    let again = VectorPath::parse(&path.to_string()).unwrap();
    assert_eq!(path, again);
    assert_eq!(path.to_string(), "M 0.1 0.2 L 0.001 -2.5");
}

#[test]
fn test_overflowing_literals_are_rejected() {
    assert!(matches!(
        VectorPath::parse("M 1e400 0 L 0 0"),
        Err(ParseError::InvalidNumber { offset: 2, .. })
    ));
    assert!(matches!(
        VectorPath::parse("M 0 0 l 1.7e308 0 l 1.7e308 0"),
        Err(ParseError::NonFiniteCoordinate { command: 'l', .. })
    ));
}

#[test]
fn test_extreme_finite_values_round_trip() {
    let path = VectorPath::parse("M 1e300 -1e-300 L -1.7976931348623157e308 5e-324").unwrap();
    assert!(path.is_finite());
    let reparsed = VectorPath::parse(&path.to_string()).unwrap();
    assert_eq!(reparsed.to_string(), path.to_string());
    assert_eq!(
        reparsed.instructions().collect::<Vec<_>>(),
        path.instructions().collect::<Vec<_>>()
    );
}

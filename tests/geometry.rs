use std::thread;

use svg2geometry::{parse_points, Error, PathCommand, PathData, Segment, Transform, Vector, Vertex};
use svgtypes::PathSegment;

const PATHS: &[&str] = &[
    "M0,0 L10,0 L10,10 Z",
    "M 10,100 40,70 h 10 m -20,40 10,-20",
    "M10 80 C 40 10, 65 10, 95 80 S 150 150, 180 80",
    "M10 80 Q 52.5 10, 95 80 T 180 80",
    concat!(
        "M 10 315 L 110 215 A 30 50 0 0 1 162.55 162.45 ",
        "L 172.55 152.45 A 30 50 -45 0 1 215.1 109.9 L 315 10",
    ),
    "m1.5-2.5e1.5.5l-.25-1e-2zM0 0",
    concat!(
        "M600,350 l 50,-25 a25,25 -30 0,1 50,-25 l 50,-25 a25,50 -30 0,1 50,-25 ",
        "l 50,-25 a25,75 -30 0,1 50,-25 l 50,-25 a25,100 -30 0,1 50,-25 l 50,-25",
    ),
];

fn segments(s: &str) -> Vec<Segment> {
    PathData::parse(s).unwrap().iter().collect()
}

#[test]
fn test_round_trip() {
    let _ = env_logger::try_init();
    for s in PATHS {
        let path = PathData::parse(s).unwrap();
        let written = path.to_string();
        let reparsed = PathData::parse(&written).unwrap();
        assert_eq!(reparsed.vertices(), path.vertices(), "{}", s);
        assert_eq!(reparsed.commands(), path.commands(), "{}", s);
        // Writing again gives the same text.
        assert_eq!(reparsed.to_string(), written);
    }
}

#[test]
fn test_arity_invariant() {
    for s in PATHS {
        let path = PathData::parse(s).unwrap();
        let consumed: usize = path.commands().iter().map(|c| c.arity()).sum();
        assert_eq!(consumed, path.vertices().len(), "{}", s);
        assert_eq!(path.iter().count(), path.commands().len(), "{}", s);
    }
}

#[test]
fn test_closed_square_returns_to_start() {
    assert_eq!(
        segments("M0,0 L10,0 L10,10 Z l0,5"),
        vec![
            Segment::MoveTo(Vertex::new(0.0, 0.0)),
            Segment::LineTo(Vertex::new(10.0, 0.0)),
            Segment::LineTo(Vertex::new(10.0, 10.0)),
            Segment::Close,
            Segment::LineTo(Vertex::new(0.0, 5.0)),
        ]
    );
}

#[test]
fn test_absolute_and_relative_agree() {
    let absolute = "M10,10 L20,10 H30 V20 C30,25 25,30 20,30 S10,25 10,20 Q10,15 15,15 T20,10 Z";
    let relative = "m10,10 l10,0 h10 v10 c0,5 -5,10 -10,10 s-10,-5 -10,-10 q0,-5 5,-5 t5,-5 z";
    assert_eq!(
        PathData::parse(absolute).unwrap(),
        PathData::parse(relative).unwrap()
    );
}

#[test]
fn test_transform_list() {
    let t = Transform::parse("translate(10,20) scale(2)").unwrap();
    assert_eq!(
        t.apply_point(Vector::new(0.0, 0.0)),
        Vector::new(10.0, 20.0)
    );
    assert_eq!(
        t.apply_point(Vector::new(1.0, 0.0)),
        Vector::new(12.0, 20.0)
    );
    // Offsets are not translated.
    assert_eq!(t.apply_vector(Vector::new(1.0, 0.0)), Vector::new(2.0, 0.0));
}

#[test]
fn test_transformed_path_matches_transformed_points() {
    let t = Transform::parse("rotate(30 5 5) skewX(10) translate(3,-4)").unwrap();
    let path = PathData::parse("M1,2 l3,4 a2,3 10 1 0 5,5").unwrap();
    let moved = path.transform(&t);
    for (original, mapped) in path.vertices().iter().zip(moved.vertices()) {
        assert_eq!(t.apply_point(*original), *mapped);
    }
}

#[test]
fn test_points() {
    assert_eq!(
        parse_points("0,0 10,0 10,10"),
        Ok(vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(10.0, 0.0),
            Vertex::new(10.0, 10.0)
        ])
    );
    assert_eq!(parse_points("0,0,10"), Err(Error::OddCoordinateCount(3)));
}

#[test]
fn test_errors_abort_without_partial_result() {
    assert_eq!(
        PathData::parse("M0,0 L10,0 L5"),
        Err(Error::InvalidArgumentCount {
            command: 'L',
            offset: 11,
        })
    );
    assert_eq!(
        PathData::parse("M0,0 L10,0 B5,5"),
        Err(Error::UnknownCommand('B', 11))
    );
    assert_eq!(PathData::parse("M0,0 L10,0 --5"), Err(Error::Syntax(11)));
}

#[test]
fn test_parallel_parsing() {
    let handles: Vec<_> = PATHS
        .iter()
        .map(|s| {
            let s = s.to_string();
            thread::spawn(move || PathData::parse(&s).unwrap())
        })
        .collect();
    for (handle, s) in handles.into_iter().zip(PATHS) {
        assert_eq!(handle.join().unwrap(), PathData::parse(s).unwrap());
    }
}

/// Every segment reported by svgtypes maps to exactly one command when the
/// path contains no arcs.
#[test]
fn test_command_count_matches_svgtypes() {
    for s in PATHS.iter().filter(|s| !s.contains(|c: char| c == 'a' || c == 'A')) {
        let expected = svgtypes::PathParser::from(*s)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
            .len();
        assert_eq!(
            PathData::parse(s).unwrap().commands().len(),
            expected,
            "{}",
            s
        );
    }
}

#[test]
fn test_curve_vertices_match_svgtypes() {
    let s = "M10 80 C 40 10, 65 10, 95 80 L 1e2 -5.5";
    let mut expected = Vec::new();
    for segment in svgtypes::PathParser::from(s) {
        match segment.unwrap() {
            PathSegment::MoveTo { x, y, .. } | PathSegment::LineTo { x, y, .. } => {
                expected.push(Vertex::new(x, y));
            }
            PathSegment::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
                ..
            } => {
                expected.extend_from_slice(&[
                    Vertex::new(x1, y1),
                    Vertex::new(x2, y2),
                    Vertex::new(x, y),
                ]);
            }
            other => panic!("unexpected segment {:?}", other),
        }
    }
    let path = PathData::parse(s).unwrap();
    assert_eq!(
        path.commands(),
        &[PathCommand::MoveTo, PathCommand::CurveTo, PathCommand::LineTo]
    );
    assert_eq!(path.vertices(), &expected[..]);
}

#[test]
fn test_transform_matches_svgtypes() {
    let lists = [
        "translate(10,20) scale(2)",
        "rotate(45)",
        "rotate(-30, 10, 20) scale(2 0.5)",
        "skewX(20) skewY(-10)",
        "matrix(1 2 3 4 5 6) translate(-3)",
    ];
    for s in &lists {
        let ours = Transform::parse(s).unwrap();
        let theirs: svgtypes::Transform = s.parse().unwrap();
        for (a, b) in [
            (ours.a, theirs.a),
            (ours.b, theirs.b),
            (ours.c, theirs.c),
            (ours.d, theirs.d),
            (ours.e, theirs.e),
            (ours.f, theirs.f),
        ]
        .iter()
        {
            assert!((a - b).abs() < 1e-9, "{}: {:?} vs {:?}", s, ours, theirs);
        }
    }
}

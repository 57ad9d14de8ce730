// Copyright 2024 the Pathstream Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of the interpreter and transform parser.

use pathstream::{
    parse_path, parse_transform, Affine, CloseStyle, Command, CommandKind, Commands, ErrorKind,
    ParseOptions, PathElement, Point,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn assert_near(p0: Point, p1: Point) {
    assert!(p0.is_near(p1, 1e-6), "{p0:?} != {p1:?}");
}

fn collect(data: &str, transform: Affine) -> Vec<Command> {
    parse_path(data, transform)
        .collect::<Result<_, _>>()
        .expect("valid path data")
}

#[test]
fn worked_examples() {
    let id = Affine::IDENTITY;

    let cmds = collect("M0,0 C10,0 10,10 20,10 s10,0 10,10", id);
    assert_eq!(cmds.len(), 3);
    assert_near(cmds[2].points[0], Point::new(30., 10.));

    let cmds = collect("M0,0 Q10,10 20,0", id);
    assert_eq!(cmds.len(), 2);
    assert_eq!(cmds[1].kind, CommandKind::CurveTo);
    assert_near(cmds[1].points[0], Point::new(20. / 3., 20. / 3.));
    assert_near(cmds[1].points[1], Point::new(40. / 3., 20. / 3.));
    assert_near(cmds[1].points[2], Point::new(20., 0.));

    assert_eq!(
        collect("M0,0 L10,10 20,20", id),
        [
            Command::move_to((0., 0.)),
            Command::line_to((10., 10.)),
            Command::line_to((20., 20.))
        ]
    );
    assert_eq!(
        collect("M10,10 l5,5", id)[1],
        Command::line_to((15., 15.))
    );

    let results: Vec<_> = parse_path("M10", id).collect();
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].as_ref().unwrap_err().kind(),
        &ErrorKind::MissingOperand
    );
}

#[test]
fn local_then_inherited_transform() {
    let path = PathElement::new("M1,0", "", parse_transform("translate(5,0)").unwrap())
        .with_transform_attr("scale(2,1)")
        .unwrap();
    assert_eq!(
        path.commands().next().unwrap().unwrap(),
        Command::move_to((7., 0.))
    );
}

/// Drain a stream, checking that the pen tracks the last emitted endpoint.
fn check_pen(data: &str, transform: Affine) {
    let inverse = transform.inverse();
    let mut commands = Commands::new(data, transform);
    let mut last_move = None;
    while let Some(cmd) = commands.next() {
        let cmd = cmd.unwrap();
        match cmd.kind {
            CommandKind::ClosePath => {
                let start = last_move.expect("close after a move");
                assert_near(commands.current_point(), start);
            }
            kind => {
                let end = inverse * cmd.end_point().unwrap();
                assert_near(commands.current_point(), end);
                if kind == CommandKind::MoveTo {
                    last_move = Some(end);
                }
            }
        }
    }
}

#[test]
fn pen_follows_emitted_points() {
    let transforms = [
        Affine::IDENTITY,
        parse_transform("translate(3 -4) rotate(30) scale(2 0.5)").unwrap(),
        parse_transform("skewX(20) matrix(1 2 3 4 5 6)").unwrap(),
    ];
    let paths = [
        "M1,2 l3,4 h5 v-6 H0 V1 z",
        "m10 10 c1 1 2 2 3 3 s4 0 5 5 S1 1 2 2 Z m1 1 l1 1",
        "M0 0 q1 1 2 0 t2 0 T10 10 z L3 3",
    ];
    for transform in transforms {
        for path in paths {
            check_pen(path, transform);
        }
    }
}

#[test]
fn composition_law() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let mut random_affine = || {
            Affine::new([(); 6].map(|()| rng.random_range(-10.0..10.0)))
        };
        let a = random_affine();
        let b = random_affine();
        let p = Point::new(rng.random_range(-10.0..10.0), rng.random_range(-10.0..10.0));
        let lhs = (a * b) * p;
        let rhs = a * (b * p);
        assert!(lhs.is_near(rhs, 1e-9 * (1. + lhs.to_vec2().hypot2())));
        assert_eq!(Affine::IDENTITY * p, p);
    }
}

#[test]
fn close_style_lineto() {
    let options = ParseOptions::new().with_close_style(CloseStyle::LineTo);
    let cmds: Vec<_> = Commands::with_options("M2,3 L5,5 z", Affine::scale(2.), options)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(cmds[2], Command::line_to((4., 6.)));
}

#[test]
fn early_drop_is_cancellation() {
    let long: String = core::iter::once("M0,0".to_string())
        .chain((0..10_000).map(|i| format!(" L{i},{i}")))
        .collect();
    let mut commands = parse_path(&long, Affine::IDENTITY);
    assert_eq!(commands.nth(2).unwrap().unwrap(), Command::line_to((1., 1.)));
    drop(commands);
}

#[test]
fn independent_parses_on_threads() {
    let paths = ["M0,0 L1,1 L2,2", "M5,5 h1 v1 z", "M0,0 Q1,1 2,0 T4,0", "M1"];
    let expected: Vec<Vec<_>> = paths
        .iter()
        .map(|p| parse_path(p, Affine::scale(3.)).collect())
        .collect();
    let results: Vec<Vec<_>> = std::thread::scope(|s| {
        let handles: Vec<_> = paths
            .iter()
            .map(|p| s.spawn(move || parse_path(p, Affine::scale(3.)).collect::<Vec<_>>()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(results, expected);
}

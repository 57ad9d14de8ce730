// Copyright 2024 the Pathstream Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized drawing commands.

use core::ops::Mul;

use arrayvec::ArrayVec;

use crate::{Affine, Point};

/// The kind of a [`Command`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandKind {
    /// Start a new subpath. One point.
    MoveTo,
    /// A straight line. One point.
    LineTo,
    /// A cubic Bézier curve. Three points: both control points, then the end point.
    CurveTo,
    /// Close the current subpath. No points.
    ClosePath,
}

/// One absolute drawing command, as produced by the path interpreter.
///
/// Every path data command is normalized to one of four kinds: relative
/// coordinates are resolved, horizontal and vertical lines become
/// [`LineTo`](CommandKind::LineTo), and smooth and quadratic curves are
/// expanded to cubic [`CurveTo`](CommandKind::CurveTo) commands. The points
/// are in the transformed space of the path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Command {
    /// What to draw.
    pub kind: CommandKind,
    /// The points of the command; how many depends on `kind`.
    pub points: ArrayVec<Point, 3>,
}

impl Command {
    /// A [`MoveTo`](CommandKind::MoveTo) command.
    pub fn move_to(p: impl Into<Point>) -> Command {
        Command::with_points(CommandKind::MoveTo, &[p.into()])
    }

    /// A [`LineTo`](CommandKind::LineTo) command.
    pub fn line_to(p: impl Into<Point>) -> Command {
        Command::with_points(CommandKind::LineTo, &[p.into()])
    }

    /// A [`CurveTo`](CommandKind::CurveTo) command.
    pub fn curve_to(
        ctrl1: impl Into<Point>,
        ctrl2: impl Into<Point>,
        to: impl Into<Point>,
    ) -> Command {
        Command::with_points(CommandKind::CurveTo, &[ctrl1.into(), ctrl2.into(), to.into()])
    }

    /// A [`ClosePath`](CommandKind::ClosePath) command.
    pub fn close_path() -> Command {
        Command::with_points(CommandKind::ClosePath, &[])
    }

    fn with_points(kind: CommandKind, points: &[Point]) -> Command {
        Command {
            kind,
            points: points.iter().copied().collect(),
        }
    }

    /// The point the pen is left at, or `None` for `ClosePath`.
    pub fn end_point(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

impl Mul<Command> for Affine {
    type Output = Command;

    fn mul(self, mut other: Command) -> Command {
        for p in &mut other.points {
            *p = self * *p;
        }
        other
    }
}

// Copyright 2024 the Pathstream Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positions in the plane.

use core::fmt;
use core::ops::{Add, Sub};

use crate::Vec2;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A position in the plane.
///
/// Every operand tuple of path data parses to a `Point`, and every
/// coordinate of an emitted [`Command`](crate::Command) is one.
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// The origin, where the pen starts.
    pub const ZERO: Point = Point::new(0., 0.);

    /// The point at (`x`, `y`).
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// The displacement from the origin to this point.
    #[inline]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// The point a fraction `t` of the way from `self` to `other`.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        self + t * (other - self)
    }

    /// Mirror this point through `center`.
    ///
    /// Smooth curves derive their implicit control point this way from the
    /// previous segment's control point.
    #[inline]
    pub fn reflect_about(self, center: Point) -> Point {
        center + (center - self)
    }

    /// Whether each coordinate differs from `other`'s by at most `accuracy`.
    #[inline]
    pub fn is_near(self, other: Point, accuracy: f64) -> bool {
        let d = self - other;
        d.x.abs() <= accuracy && d.y.abs() <= accuracy
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Point {
        Point::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    #[inline]
    fn from(p: Point) -> (f64, f64) {
        (p.x, p.y)
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    #[inline]
    fn add(self, offset: Vec2) -> Point {
        Point::new(self.x + offset.x, self.y + offset.y)
    }
}

impl Sub<Vec2> for Point {
    type Output = Point;

    #[inline]
    fn sub(self, offset: Vec2) -> Point {
        self + -offset
    }
}

impl Sub<Point> for Point {
    type Output = Vec2;

    #[inline]
    fn sub(self, origin: Point) -> Vec2 {
        Vec2::new(self.x - origin.x, self.y - origin.y)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

/// Formats as `(x, y)`, forwarding precision to both coordinates.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        fmt::Display::fmt(&self.x, f)?;
        f.write_str(", ")?;
        fmt::Display::fmt(&self.y, f)?;
        f.write_str(")")
    }
}

#[cfg(feature = "mint")]
impl From<Point> for mint::Point2<f64> {
    #[inline]
    fn from(p: Point) -> Self {
        mint::Point2 { x: p.x, y: p.y }
    }
}

#[cfg(feature = "mint")]
impl From<mint::Point2<f64>> for Point {
    #[inline]
    fn from(p: mint::Point2<f64>) -> Self {
        Point::new(p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets() {
        assert_eq!(Point::ZERO - Vec2::new(10., 0.), Point::new(-10., 0.));
        assert_eq!(Point::ZERO - Point::new(-5., 101.), Vec2::new(5., -101.));
        assert_eq!(Point::new(1., 2.) + Vec2::new(3., 4.), Point::new(4., 6.));
    }

    #[test]
    fn reflection() {
        let pen = Point::new(20., 10.);
        assert_eq!(Point::new(10., 10.).reflect_about(pen), Point::new(30., 10.));
        assert_eq!(pen.reflect_about(pen), pen);
    }

    #[test]
    fn lerp_two_thirds() {
        let p = Point::ZERO.lerp(Point::new(9., -3.), 2.0 / 3.0);
        assert!(p.is_near(Point::new(6., -2.), 1e-12));
    }

    #[test]
    fn display() {
        let p = Point::new(0.12345, 9.87654);
        assert_eq!(p.to_string(), "(0.12345, 9.87654)");
        assert_eq!(format!("{p:.2}"), "(0.12, 9.88)");
        assert_eq!(format!("{p:?}"), "(0.12345, 9.87654)");
    }

    #[test]
    fn nearness() {
        assert!(Point::ZERO.is_near(Point::ZERO, 0.));
        assert!(!Point::ZERO.is_near(Point::new(1., 1.), 0.));
        assert!(Point::ZERO.is_near(Point::new(0.1, -0.1), 0.1));
        assert!(!Point::ZERO.is_near(Point::new(0.05, 0.2), 0.1));
    }
}

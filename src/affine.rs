// Copyright 2024 the Pathstream Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Affine transforms.

use core::ops::{Mul, MulAssign};

use crate::{Point, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A 2D affine transform.
///
/// Composition follows the usual matrix convention: `a * b` applies `b`
/// first and then `a`, so `(a * b) * p == a * (b * p)`. A path element
/// nested in a group is drawn with `parent * local`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affine([f64; 6]);

impl Affine {
    /// The identity transform.
    pub const IDENTITY: Affine = Affine::scale(1.0);

    /// Construct an affine transform from coefficients.
    ///
    /// If the coefficients are `(a, b, c, d, e, f)`, then the resulting
    /// transformation represents this augmented matrix:
    ///
    /// ```text
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    /// ```
    ///
    /// This is the same order as the arguments of the SVG
    /// `matrix(a, b, c, d, e, f)` transform function.
    #[inline(always)]
    pub const fn new(c: [f64; 6]) -> Affine {
        Affine(c)
    }

    /// An affine transform representing uniform scaling.
    #[inline(always)]
    pub const fn scale(s: f64) -> Affine {
        Affine([s, 0.0, 0.0, s, 0.0, 0.0])
    }

    /// An affine transform representing non-uniform scaling
    /// with different scale values for x and y
    #[inline(always)]
    pub const fn scale_non_uniform(s_x: f64, s_y: f64) -> Affine {
        Affine([s_x, 0.0, 0.0, s_y, 0.0, 0.0])
    }

    /// An affine transform representing rotation about the origin.
    ///
    /// The convention for rotation is that a positive angle rotates a
    /// positive X direction into positive Y. Thus, in a Y-down coordinate
    /// system (as is common for graphics), it is a clockwise rotation, and
    /// in Y-up (traditional for math), it is anti-clockwise.
    ///
    /// The angle, `th`, is expressed in radians.
    #[inline]
    pub fn rotate(th: f64) -> Affine {
        let (s, c) = th.sin_cos();
        Affine([c, s, -s, c, 0.0, 0.0])
    }

    /// An affine transform representing a rotation of `th` radians about `center`.
    ///
    /// This is `translate(center) * rotate(th) * translate(-center)`.
    ///
    /// ```
    /// # use pathstream::{Affine, Point};
    /// let quarter = Affine::rotate_about(core::f64::consts::FRAC_PI_2, (10.0, 20.0));
    /// let p = quarter * Point::new(11.0, 20.0);
    /// assert!(p.is_near(Point::new(10.0, 21.0), 1e-9));
    /// ```
    #[inline]
    pub fn rotate_about(th: f64, center: impl Into<Point>) -> Affine {
        let center = center.into().to_vec2();
        Self::translate(center) * Self::rotate(th) * Self::translate(-center)
    }

    /// An affine transform representing translation.
    #[inline(always)]
    pub fn translate<V: Into<Vec2>>(p: V) -> Affine {
        let p = p.into();
        Affine([1.0, 0.0, 0.0, 1.0, p.x, p.y])
    }

    /// An affine transformation representing a skew by raw factors.
    ///
    /// The `skew_x` and `skew_y` parameters are the factors added to the
    /// horizontal and vertical directions, respectively. For angles, see
    /// [`Affine::skew_x`] and [`Affine::skew_y`].
    #[inline(always)]
    pub fn skew(skew_x: f64, skew_y: f64) -> Affine {
        Affine([1.0, skew_y, skew_x, 1.0, 0.0, 0.0])
    }

    /// A skew along the x axis by `th` radians.
    #[inline]
    pub fn skew_x(th: f64) -> Affine {
        Affine::skew(th.tan(), 0.0)
    }

    /// A skew along the y axis by `th` radians.
    #[inline]
    pub fn skew_y(th: f64) -> Affine {
        Affine::skew(0.0, th.tan())
    }

    /// The transform that applies `inner` first and then `outer`.
    ///
    /// Equivalent to `outer * inner`.
    #[inline]
    #[must_use]
    pub fn compose(outer: Affine, inner: Affine) -> Affine {
        outer * inner
    }

    /// Apply this transform to a point.
    ///
    /// Equivalent to `self * p`.
    #[inline]
    pub fn apply(self, p: impl Into<Point>) -> Point {
        self * p.into()
    }

    /// A [rotation] by `th` followed by `self`.
    ///
    /// Equivalent to `self * Affine::rotate(th)`
    ///
    /// [rotation]: Affine::rotate
    #[inline]
    #[must_use]
    pub fn pre_rotate(self, th: f64) -> Self {
        self * Affine::rotate(th)
    }

    /// A [scale] by `(scale_x, scale_y)` followed by `self`.
    ///
    /// Equivalent to `self * Affine::scale_non_uniform(scale_x, scale_y)`
    ///
    /// [scale]: Affine::scale_non_uniform
    #[inline]
    #[must_use]
    pub fn pre_scale_non_uniform(self, scale_x: f64, scale_y: f64) -> Self {
        self * Affine::scale_non_uniform(scale_x, scale_y)
    }

    /// A [translation] of `trans` followed by `self`.
    ///
    /// Equivalent to `self * Affine::translate(trans)`
    ///
    /// [translation]: Affine::translate
    #[inline]
    #[must_use]
    pub fn pre_translate(self, trans: Vec2) -> Self {
        self * Affine::translate(trans)
    }

    /// `self` followed by a [rotation] of `th` about `center`.
    ///
    /// Equivalent to `Affine::rotate_about(th, center) * self`
    ///
    /// [rotation]: Affine::rotate_about
    #[inline]
    #[must_use]
    pub fn then_rotate_about(self, th: f64, center: impl Into<Point>) -> Self {
        Affine::rotate_about(th, center) * self
    }

    /// `self` followed by a [scale] of `(scale_x, scale_y)`.
    ///
    /// Equivalent to `Affine::scale_non_uniform(scale_x, scale_y) * self`
    ///
    /// [scale]: Affine::scale_non_uniform
    #[inline]
    #[must_use]
    pub fn then_scale_non_uniform(self, scale_x: f64, scale_y: f64) -> Self {
        Affine::scale_non_uniform(scale_x, scale_y) * self
    }

    /// `self` followed by a translation of `trans`.
    ///
    /// Equivalent to `Affine::translate(trans) * self`
    #[inline]
    #[must_use]
    pub fn then_translate(mut self, trans: Vec2) -> Self {
        self.0[4] += trans.x;
        self.0[5] += trans.y;
        self
    }

    /// Get the coefficients of the transform.
    #[inline(always)]
    pub fn as_coeffs(self) -> [f64; 6] {
        self.0
    }

    /// The full homogeneous 3×3 matrix, row by row.
    ///
    /// The bottom row is always `[0, 0, 1]`.
    pub fn as_matrix(self) -> [[f64; 3]; 3] {
        let [a, b, c, d, e, f] = self.0;
        [[a, c, e], [b, d, f], [0.0, 0.0, 1.0]]
    }

    /// Compute the determinant of this transform.
    pub fn determinant(self) -> f64 {
        self.0[0] * self.0[3] - self.0[1] * self.0[2]
    }

    /// Compute the inverse transform.
    ///
    /// Produces NaN values when the determinant is zero.
    pub fn inverse(self) -> Affine {
        let inv_det = self.determinant().recip();
        Affine([
            inv_det * self.0[3],
            -inv_det * self.0[1],
            -inv_det * self.0[2],
            inv_det * self.0[0],
            inv_det * (self.0[2] * self.0[5] - self.0[3] * self.0[4]),
            inv_det * (self.0[1] * self.0[4] - self.0[0] * self.0[5]),
        ])
    }

    /// Is this map [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Returns the translation part of this affine map (`(self.0[4], self.0[5])`).
    #[inline(always)]
    pub fn translation(self) -> Vec2 {
        Vec2 {
            x: self.0[4],
            y: self.0[5],
        }
    }
}

impl Default for Affine {
    #[inline(always)]
    fn default() -> Affine {
        Affine::IDENTITY
    }
}

impl Mul<Point> for Affine {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Point {
        Point::new(
            self.0[0] * other.x + self.0[2] * other.y + self.0[4],
            self.0[1] * other.x + self.0[3] * other.y + self.0[5],
        )
    }
}

impl Mul for Affine {
    type Output = Affine;

    #[inline]
    fn mul(self, other: Affine) -> Affine {
        Affine([
            self.0[0] * other.0[0] + self.0[2] * other.0[1],
            self.0[1] * other.0[0] + self.0[3] * other.0[1],
            self.0[0] * other.0[2] + self.0[2] * other.0[3],
            self.0[1] * other.0[2] + self.0[3] * other.0[3],
            self.0[0] * other.0[4] + self.0[2] * other.0[5] + self.0[4],
            self.0[1] * other.0[4] + self.0[3] * other.0[5] + self.0[5],
        ])
    }
}

impl MulAssign for Affine {
    #[inline]
    fn mul_assign(&mut self, other: Affine) {
        *self = self.mul(other);
    }
}

// Conversions to and from mint
#[cfg(feature = "mint")]
impl From<Affine> for mint::ColumnMatrix2x3<f64> {
    #[inline(always)]
    fn from(a: Affine) -> mint::ColumnMatrix2x3<f64> {
        mint::ColumnMatrix2x3 {
            x: mint::Vector2 {
                x: a.0[0],
                y: a.0[1],
            },
            y: mint::Vector2 {
                x: a.0[2],
                y: a.0[3],
            },
            z: mint::Vector2 {
                x: a.0[4],
                y: a.0[5],
            },
        }
    }
}

#[cfg(feature = "mint")]
impl From<mint::ColumnMatrix2x3<f64>> for Affine {
    #[inline(always)]
    fn from(m: mint::ColumnMatrix2x3<f64>) -> Affine {
        Affine([m.x.x, m.x.y, m.y.x, m.y.y, m.z.x, m.z.y])
    }
}

#[cfg(test)]
mod tests {
    use crate::{Affine, Point, Vec2};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::PI;

    fn assert_near(p0: Point, p1: Point) {
        assert!((p1 - p0).hypot2() < 1e-18, "{p0:?} != {p1:?}");
    }

    fn affine_assert_near(a0: Affine, a1: Affine) {
        for i in 0..6 {
            assert!((a0.0[i] - a1.0[i]).abs() < 1e-9, "{a0:?} != {a1:?}");
        }
    }

    fn random_affine(rng: &mut StdRng) -> Affine {
        let mut c = [0.0; 6];
        for v in &mut c {
            *v = rng.random_range(-10.0..10.0);
        }
        Affine::new(c)
    }

    #[test]
    fn affine_basic() {
        let p = Point::new(3.0, 4.0);

        assert_near(Affine::default() * p, p);
        assert_near(Affine::IDENTITY.apply(p), p);
        assert_near(Affine::scale(2.0) * p, Point::new(6.0, 8.0));
        assert_near(Affine::rotate(0.0) * p, p);
        assert_near(Affine::rotate(PI / 2.0) * p, Point::new(-4.0, 3.0));
        assert_near(Affine::translate((5.0, 6.0)) * p, Point::new(8.0, 10.0));
        assert_near(Affine::skew(0.0, 0.0) * p, p);
        assert_near(Affine::skew(2.0, 4.0) * p, Point::new(11.0, 16.0));
    }

    #[test]
    fn skew_angles() {
        let p = Point::new(0.0, 2.0);
        assert_near(Affine::skew_x(PI / 4.0) * p, Point::new(2.0, 2.0));
        assert_near(Affine::skew_y(PI / 4.0) * Point::new(2.0, 0.0), Point::new(2.0, 2.0));
        assert_near(Affine::skew_y(PI / 4.0) * p, p);
    }

    #[test]
    fn rotate_about_uses_both_axes() {
        let a = Affine::rotate_about(PI, (1.0, 5.0));
        // The centre is a fixed point.
        assert_near(a * Point::new(1.0, 5.0), Point::new(1.0, 5.0));
        assert_near(a * Point::new(2.0, 5.0), Point::new(0.0, 5.0));
        assert_near(a * Point::new(1.0, 7.0), Point::new(1.0, 3.0));
        affine_assert_near(
            Affine::IDENTITY.then_rotate_about(PI, (1.0, 5.0)),
            a,
        );
    }

    #[test]
    fn affine_mul() {
        let a1 = Affine::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let a2 = Affine::new([0.1, 1.2, 2.3, 3.4, 4.5, 5.6]);

        let px = Point::new(1.0, 0.0);
        let py = Point::new(0.0, 1.0);
        let pxy = Point::new(1.0, 1.0);
        assert_near(a1 * (a2 * px), (a1 * a2) * px);
        assert_near(a1 * (a2 * py), (a1 * a2) * py);
        assert_near(a1 * (a2 * pxy), (a1 * a2) * pxy);
        affine_assert_near(Affine::compose(a1, a2), a1 * a2);
    }

    #[test]
    fn composition_law_random() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let a = random_affine(&mut rng);
            let b = random_affine(&mut rng);
            let p = Point::new(rng.random_range(-100.0..100.0), rng.random_range(-100.0..100.0));
            let lhs = Affine::compose(a, b).apply(p);
            let rhs = a.apply(b.apply(p));
            assert!(lhs.is_near(rhs, 1e-7), "{lhs:?} != {rhs:?}");
            assert_near(Affine::IDENTITY * p, p);
            affine_assert_near(a * Affine::IDENTITY, a);
            affine_assert_near(Affine::IDENTITY * a, a);
        }
    }

    #[test]
    fn chaining_helpers() {
        let base = Affine::translate((1.0, 2.0));
        affine_assert_near(base.pre_rotate(0.3), base * Affine::rotate(0.3));
        affine_assert_near(
            base.pre_scale_non_uniform(2.0, 3.0),
            base * Affine::scale_non_uniform(2.0, 3.0),
        );
        affine_assert_near(
            base.pre_translate(Vec2::new(4.0, 5.0)),
            base * Affine::translate((4.0, 5.0)),
        );
        affine_assert_near(
            base.then_scale_non_uniform(2.0, 3.0),
            Affine::scale_non_uniform(2.0, 3.0) * base,
        );
        affine_assert_near(
            base.then_translate(Vec2::new(4.0, 5.0)),
            Affine::translate((4.0, 5.0)) * base,
        );
    }

    #[test]
    fn affine_inv() {
        let a = Affine::new([0.1, 1.2, 2.3, 3.4, 4.5, 5.6]);
        let a_inv = a.inverse();

        let px = Point::new(1.0, 0.0);
        let py = Point::new(0.0, 1.0);
        let pxy = Point::new(1.0, 1.0);
        assert_near(a * (a_inv * px), px);
        assert_near(a * (a_inv * py), py);
        assert_near(a * (a_inv * pxy), pxy);
        assert_near(a_inv * (a * px), px);
        assert_near(a_inv * (a * py), py);
        assert_near(a_inv * (a * pxy), pxy);
    }

    #[test]
    fn matrix_layout() {
        let a = Affine::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(
            a.as_matrix(),
            [[1.0, 3.0, 5.0], [2.0, 4.0, 6.0], [0.0, 0.0, 1.0]]
        );
        assert_eq!(a.translation(), Vec2::new(5.0, 6.0));
        assert!(a.is_finite());
        assert!(!Affine::scale(0.0).inverse().is_finite());
    }
}

//! Path-local geometry and the host placement transform.
//!
//! All editing math runs in the path's own local frame using [`Point`].
//! Pointer positions supplied by the host live in its absolute frame and are
//! converted through [`Transform`] before they touch an instruction.

use lyon::geom::euclid::default::{Point2D, Transform2D};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{EditError, EditResult};

/// A 2-D point in path-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation, `t = 0` yields `self`.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Point reflection of `self` through `center`: `2 * center - self`.
    pub fn reflect_through(self, center: Point) -> Point {
        Point::new(2.0 * center.x - self.x, 2.0 * center.y - self.y)
    }

    /// Both coordinates are neither NaN nor infinite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn approx_eq(&self, other: &Point, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }

    pub fn to_lyon(self) -> lyon::math::Point {
        lyon::math::point(self.x as f32, self.y as f32)
    }

    pub(crate) fn to_point2d(self) -> Point2D<f64> {
        Point2D::new(self.x, self.y)
    }
}

impl From<Point2D<f64>> for Point {
    fn from(p: Point2D<f64>) -> Self {
        Point::new(p.x, p.y)
    }
}

impl From<Point> for Point2D<f64> {
    fn from(p: Point) -> Self {
        p.to_point2d()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Affine placement of a path inside the host's coordinate space.
///
/// Uses the SVG `matrix(a b c d e f)` convention:
/// `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 6]", into = "[f64; 6]")]
pub struct Transform {
    matrix: Transform2D<f64>,
}

impl Transform {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self {
            matrix: Transform2D::new(a, b, c, d, e, f),
        }
    }

    pub fn identity() -> Self {
        Self {
            matrix: Transform2D::identity(),
        }
    }

    pub fn translation(x: f64, y: f64) -> Self {
        Self {
            matrix: Transform2D::translation(x, y),
        }
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            matrix: Transform2D::scale(sx, sy),
        }
    }

    /// The six matrix entries in `a b c d e f` order.
    pub fn to_array(&self) -> [f64; 6] {
        let m = &self.matrix;
        [m.m11, m.m12, m.m21, m.m22, m.m31, m.m32]
    }

    /// The translation component (`e`, `f`).
    pub fn translation_offset(&self) -> Point {
        Point::new(self.matrix.m31, self.matrix.m32)
    }

    /// Same linear part, translation replaced.
    pub fn with_translation(&self, offset: Point) -> Self {
        let [a, b, c, d, _, _] = self.to_array();
        Self::new(a, b, c, d, offset.x, offset.y)
    }

    /// All six entries are finite.
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    pub fn is_invertible(&self) -> bool {
        self.matrix.is_invertible()
    }

    /// Path-local point to host space.
    pub fn to_absolute(&self, p: Point) -> Point {
        self.matrix.transform_point(p.to_point2d()).into()
    }

    /// Host-space point to path-local space.
    pub fn to_relative(&self, p: Point) -> EditResult<Point> {
        let inverse = self.matrix.inverse().ok_or(EditError::SingularTransform)?;
        Ok(inverse.transform_point(p.to_point2d()).into())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[f64; 6]> for Transform {
    fn from([a, b, c, d, e, f]: [f64; 6]) -> Self {
        Self::new(a, b, c, d, e, f)
    }
}

impl From<Transform> for [f64; 6] {
    fn from(t: Transform) -> Self {
        t.to_array()
    }
}

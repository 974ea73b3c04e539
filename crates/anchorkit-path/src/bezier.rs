//! Bezier helpers used by the edit operations.
//!
//! Evaluation and subdivision go through `lyon::geom` segments in `f64`.

use anchorkit_core::Point;
use lyon::geom::{CubicBezierSegment, LineSegment, QuadraticBezierSegment};

/// Exact degree elevation of a quadratic starting at `p0`.
///
/// Returns the cubic `(q1, q2, q3)` with `q1 = 2/3 p1 + 1/3 p0`,
/// `q2 = 2/3 p1 + 1/3 p2` and `q3 = p2`.
pub fn quadratic_to_cubic(p0: Point, p1: Point, p2: Point) -> (Point, Point, Point) {
    let q1 = p1 * (2.0 / 3.0) + p0 * (1.0 / 3.0);
    let q2 = p1 * (2.0 / 3.0) + p2 * (1.0 / 3.0);
    (q1, q2, p2)
}

fn quad_segment(from: Point, ctrl: Point, to: Point) -> QuadraticBezierSegment<f64> {
    QuadraticBezierSegment {
        from: from.into(),
        ctrl: ctrl.into(),
        to: to.into(),
    }
}

fn cubic_segment(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> CubicBezierSegment<f64> {
    CubicBezierSegment {
        from: from.into(),
        ctrl1: ctrl1.into(),
        ctrl2: ctrl2.into(),
        to: to.into(),
    }
}

/// Control point of the quadratic through `p0`, `mid` and `p2`.
///
/// `mid` is placed at the chord-length parameter
/// `t = |mid - p0| / (|mid - p0| + |p2 - mid|)`. Returns `None` when `t`
/// degenerates to 0 or 1 (coincident points).
pub fn fit_quadratic(p0: Point, mid: Point, p2: Point) -> Option<(Point, f64)> {
    let a = p0.distance_to(&mid);
    let b = mid.distance_to(&p2);
    if a <= f64::EPSILON || b <= f64::EPSILON {
        return None;
    }
    let t = a / (a + b);
    let u = 1.0 - t;
    // mid = u^2 p0 + 2ut c + t^2 p2
    let denom = 2.0 * u * t;
    let c = (mid - p0 * (u * u) - p2 * (t * t)) * (1.0 / denom);
    Some((c, t))
}

/// Parameter of the sample closest to `target`.
///
/// Coarse sampling followed by ternary refinement around the best sample,
/// stopping when the bracket is narrower than `tolerance`.
pub fn nearest_parameter(sample: impl Fn(f64) -> Point, target: Point, tolerance: f64) -> f64 {
    const COARSE: usize = 64;
    let dist = |t: f64| sample(t).distance_to(&target);

    let mut best = 0;
    let mut best_d = f64::MAX;
    for i in 0..=COARSE {
        let d = dist(i as f64 / COARSE as f64);
        if d < best_d {
            best_d = d;
            best = i;
        }
    }

    let step = 1.0 / COARSE as f64;
    let mut lo = (best as f64 * step - step).max(0.0);
    let mut hi = (best as f64 * step + step).min(1.0);
    let tolerance = tolerance.max(f64::EPSILON);
    let mut iterations = 0;
    while hi - lo > tolerance && iterations < 200 {
        let m1 = lo + (hi - lo) / 3.0;
        let m2 = hi - (hi - lo) / 3.0;
        if dist(m1) < dist(m2) {
            hi = m2;
        } else {
            lo = m1;
        }
        iterations += 1;
    }
    (lo + hi) * 0.5
}

/// Result of splitting a quadratic: controls of both halves and the split
/// point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadSplit {
    pub first_ctrl: Point,
    pub mid: Point,
    pub second_ctrl: Point,
}

/// De Casteljau split of a quadratic at `t`.
pub fn split_quadratic(from: Point, ctrl: Point, to: Point, t: f64) -> QuadSplit {
    let (a, b) = quad_segment(from, ctrl, to).split(t);
    QuadSplit {
        first_ctrl: a.ctrl.into(),
        mid: a.to.into(),
        second_ctrl: b.ctrl.into(),
    }
}

/// Parameter on the quadratic nearest `target`.
pub fn nearest_on_quadratic(from: Point, ctrl: Point, to: Point, target: Point, tolerance: f64) -> f64 {
    let seg = quad_segment(from, ctrl, to);
    nearest_parameter(|t| seg.sample(t).into(), target, tolerance)
}

/// Result of splitting a cubic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSplit {
    pub first: (Point, Point),
    pub mid: Point,
    pub second: (Point, Point),
}

/// De Casteljau split of a cubic at `t`.
pub fn split_cubic(from: Point, ctrl1: Point, ctrl2: Point, to: Point, t: f64) -> CubicSplit {
    let (a, b) = cubic_segment(from, ctrl1, ctrl2, to).split(t);
    CubicSplit {
        first: (a.ctrl1.into(), a.ctrl2.into()),
        mid: a.to.into(),
        second: (b.ctrl1.into(), b.ctrl2.into()),
    }
}

/// Parameter on the cubic nearest `target`.
pub fn nearest_on_cubic(
    from: Point,
    ctrl1: Point,
    ctrl2: Point,
    to: Point,
    target: Point,
    tolerance: f64,
) -> f64 {
    let seg = cubic_segment(from, ctrl1, ctrl2, to);
    nearest_parameter(|t| seg.sample(t).into(), target, tolerance)
}

/// Parameter on the line segment nearest `target`, clamped to `[0, 1]`.
pub fn nearest_on_line(from: Point, to: Point, target: Point) -> f64 {
    let seg = LineSegment {
        from: from.into(),
        to: to.into(),
    };
    let v = seg.to_vector();
    let len2 = v.square_length();
    if len2 <= f64::EPSILON {
        return 0.0;
    }
    let w = lyon::geom::euclid::default::Point2D::from(target) - seg.from;
    (w.dot(v) / len2).clamp(0.0, 1.0)
}

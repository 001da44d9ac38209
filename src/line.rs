// Copyright 2026 the Morphometry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines.

use crate::{ParamCurve, ParamCurveDeriv, Point, Vec2};

/// A single line.
///
/// This is the uniform-speed parametrization used when a length
/// measurement has exactly two points.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// The line's start point.
    pub p0: Point,
    /// The line's end point.
    pub p1: Point,
}

impl Line {
    /// Create a new line.
    #[inline(always)]
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Line {
        Line {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// The length of the line.
    #[inline]
    pub fn length(self) -> f64 {
        (self.p1 - self.p0).hypot()
    }

    /// The displacement from start to end.
    #[inline]
    pub fn direction(self) -> Vec2 {
        self.p1 - self.p0
    }
}

impl From<(Point, Point)> for Line {
    #[inline(always)]
    fn from((from, to): (Point, Point)) -> Self {
        Line::new(from, to)
    }
}

impl ParamCurve for Line {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }

    #[inline(always)]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Point {
        self.p1
    }
}

impl ParamCurveDeriv for Line {
    type DerivResult = ConstPoint;

    #[inline]
    fn deriv(&self) -> ConstPoint {
        ConstPoint((self.p1 - self.p0).to_point())
    }
}

/// A trivial "curve" that is just a constant.
#[derive(Clone, Copy, Debug)]
pub struct ConstPoint(pub Point);

impl ParamCurve for ConstPoint {
    #[inline(always)]
    fn eval(&self, _t: f64) -> Point {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use crate::{Line, ParamCurve, ParamCurveArclen, Point};

    #[test]
    fn line_arclen() {
        let l = Line::new((0.0, 0.0), (1.0, 1.0));
        let true_len = 2.0f64.sqrt();
        let epsilon = 1e-12;
        assert!(l.arclen() - true_len < epsilon);
        assert!((l.length() - true_len).abs() < epsilon);

        let t = l.inv_arclen_fraction(0.3, true_len).unwrap();
        assert!((t - 0.3).abs() < 1e-9, "t = {t}");
    }

    #[test]
    fn line_eval() {
        let l = Line::new((2.0, 4.0), (6.0, 0.0));
        assert_eq!(l.eval(0.5), Point::new(4.0, 2.0));
        assert_eq!(l.start(), Point::new(2.0, 4.0));
        assert_eq!(l.end(), Point::new(6.0, 0.0));
    }
}

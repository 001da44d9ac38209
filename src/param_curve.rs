// Copyright 2026 the Morphometry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traits for curves parametrized by a scalar.

use crate::{arclen, GeometryError, Point};

/// A curve parametrized by a scalar.
///
/// If the result is interpreted as a point, this represents a curve.
/// But the result can be interpreted as a vector as well; this is how
/// hodographs (derivative curves) are represented.
pub trait ParamCurve: Sized {
    /// Evaluate the curve at parameter `t`.
    ///
    /// Generally `t` is in the range [0..1].
    fn eval(&self, t: f64) -> Point;

    /// Evaluate the curve at each of the parameters in `ts`.
    fn eval_many(&self, ts: &[f64]) -> Vec<Point> {
        ts.iter().map(|&t| self.eval(t)).collect()
    }

    /// The start point.
    fn start(&self) -> Point {
        self.eval(0.0)
    }

    /// The end point.
    fn end(&self) -> Point {
        self.eval(1.0)
    }
}

/// A differentiable parametrized curve.
pub trait ParamCurveDeriv {
    /// The parametric curve obtained by taking the derivative of this one.
    type DerivResult: ParamCurve;

    /// The derivative of the curve.
    ///
    /// Note that the type of the return value is somewhat inaccurate, as
    /// the derivative of a curve (mapping of param to point) is a mapping
    /// of param to vector. We choose to accept this rather than have a
    /// more complex type scheme.
    fn deriv(&self) -> Self::DerivResult;
}

/// A parametrized curve that can have its arc length measured.
///
/// Every differentiable curve gets this through its hodograph, using the
/// fixed-order quadrature in [`arclen`](crate::arclen).
pub trait ParamCurveArclen: ParamCurve {
    /// The arc length of the curve over `t ∈ [0, 1]`.
    fn arclen(&self) -> f64;

    /// The arc length of the curve over `[0, t]`.
    fn arclen_to(&self, t: f64) -> f64;

    /// Solve for the parameter at which the arc length from the start is
    /// `fraction` of `total`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::RootBracket`] if `fraction` is outside
    /// `[0, 1]` or the curve has no positive length.
    fn inv_arclen_fraction(&self, fraction: f64, total: f64) -> Result<f64, GeometryError>;
}

impl<C: ParamCurve + ParamCurveDeriv> ParamCurveArclen for C {
    fn arclen(&self) -> f64 {
        arclen::total_length(&self.deriv())
    }

    fn arclen_to(&self, t: f64) -> f64 {
        arclen::partial_length(&self.deriv(), t)
    }

    fn inv_arclen_fraction(&self, fraction: f64, total: f64) -> Result<f64, GeometryError> {
        arclen::find_parameter_at_arc_fraction(&self.deriv(), fraction, total)
    }
}

// Copyright 2026 the Morphometry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bézier curves of arbitrary order in power-basis (matrix) form.

use smallvec::SmallVec;

use crate::common::pascal_row;
use crate::{GeometryError, ParamCurve, ParamCurveDeriv, Point, Vec2};

/// Control points are stored inline up to this count.
const INLINE_POINTS: usize = 8;

/// The highest order evaluated through power-basis coefficients.
///
/// Beyond this the coefficients of `C · P` grow like `C(k, k/2)²` and their
/// cancellation costs more than a millipixel on image-sized curves, so
/// higher orders are evaluated in the Bernstein basis instead.
pub const MAX_POWER_BASIS_ORDER: usize = 20;

/// A Bézier curve through `k + 1` control points, where `k` is the order.
///
/// The curve is evaluated in the matrix form `B(t) = T · C · P`, where `T`
/// is the row `[1, t, t², …, tᵏ]`, `C` is the Bernstein-to-power-basis
/// matrix (see [`BezierCurve::basis_matrix`]) and `P` the column of control
/// points. The product `C · P` is computed once at construction, so
/// evaluation is a single Horner pass per parameter. Curves of order above
/// [`MAX_POWER_BASIS_ORDER`] are evaluated by de Casteljau's algorithm.
///
/// The curve always passes exactly through its first and last control
/// points at `t = 0` and `t = 1`.
///
/// With the `serde` feature the curve is stored as its list of control
/// points and rebuilt through [`BezierCurve::new`] when deserialized.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Point>", into = "Vec<Point>")
)]
pub struct BezierCurve {
    points: SmallVec<[Point; INLINE_POINTS]>,
    // Power-basis coefficients, lowest degree first. Empty above
    // `MAX_POWER_BASIS_ORDER`.
    coeffs: SmallVec<[Vec2; INLINE_POINTS]>,
}

impl BezierCurve {
    /// Create a curve from its control points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyPath`] if there are no points, or
    /// [`GeometryError::NonFinitePoint`] if any coordinate is `NaN` or infinite.
    pub fn new(points: impl IntoIterator<Item = Point>) -> Result<Self, GeometryError> {
        let points: SmallVec<[Point; INLINE_POINTS]> = points.into_iter().collect();
        if points.is_empty() {
            return Err(GeometryError::EmptyPath);
        }
        if !points.iter().all(|p| p.is_finite()) {
            return Err(GeometryError::NonFinitePoint);
        }
        Ok(Self::from_points(points))
    }

    fn from_points(points: SmallVec<[Point; INLINE_POINTS]>) -> Self {
        let k = points.len() - 1;
        if k > MAX_POWER_BASIS_ORDER {
            log::debug!("order {k} curve, evaluating in the Bernstein basis");
            return BezierCurve {
                points,
                coeffs: SmallVec::new(),
            };
        }
        let c = Self::basis_matrix(k);
        let coeffs = (0..=k)
            .map(|i| {
                points[..=i]
                    .iter()
                    .enumerate()
                    .fold(Vec2::ZERO, |acc, (j, p)| acc + c[i * (k + 1) + j] * p.to_vec2())
            })
            .collect();
        BezierCurve { points, coeffs }
    }

    /// The Bernstein-to-power-basis matrix of order `k`, row-major, `(k + 1)²` entries.
    ///
    /// Entry `(i, j)` is `(-1)^(i - j) · C(k, i) · C(i, j)` for `j ≤ i` and zero
    /// above the diagonal: Pascal's-triangle coefficients combined with an
    /// alternating sign pattern. Row `i` gives the coefficient of `tⁱ`.
    pub fn basis_matrix(k: usize) -> Vec<f64> {
        let n = k + 1;
        let mut m = vec![0.0; n * n];
        let row_k = pascal_row(k);
        for i in 0..=k {
            let row_i = pascal_row(i);
            for j in 0..=i {
                let sign = if (i - j) % 2 == 0 { 1.0 } else { -1.0 };
                m[i * n + j] = sign * row_k[i] * row_i[j];
            }
        }
        m
    }

    /// The control points.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The order of the curve, one less than the number of control points.
    #[inline]
    pub fn order(&self) -> usize {
        self.points.len() - 1
    }

    /// A copy of this curve with the control points in reverse order.
    ///
    /// This traces the same curve with the opposite parametrization.
    #[must_use]
    pub fn reversed(&self) -> BezierCurve {
        Self::from_points(self.points.iter().rev().copied().collect())
    }

    /// De Casteljau evaluation on the control points.
    fn eval_bernstein(&self, t: f64) -> Point {
        let mut pts: SmallVec<[Vec2; 32]> = self.points.iter().map(|p| p.to_vec2()).collect();
        let mt = 1.0 - t;
        for n in (1..pts.len()).rev() {
            for i in 0..n {
                pts[i] = mt * pts[i] + t * pts[i + 1];
            }
        }
        pts[0].to_point()
    }
}

impl TryFrom<Vec<Point>> for BezierCurve {
    type Error = GeometryError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        BezierCurve::new(points)
    }
}

impl From<BezierCurve> for Vec<Point> {
    fn from(curve: BezierCurve) -> Self {
        curve.points.into_vec()
    }
}

impl ParamCurve for BezierCurve {
    fn eval(&self, t: f64) -> Point {
        if t == 0.0 {
            return self.points[0];
        }
        if t == 1.0 {
            return self.points[self.points.len() - 1];
        }
        if self.coeffs.is_empty() {
            return self.eval_bernstein(t);
        }
        self.coeffs
            .iter()
            .rev()
            .fold(Vec2::ZERO, |acc, &c| acc * t + c)
            .to_point()
    }

    #[inline]
    fn start(&self) -> Point {
        self.points[0]
    }

    #[inline]
    fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }
}

impl ParamCurveDeriv for BezierCurve {
    type DerivResult = BezierCurve;

    /// The hodograph: a curve of order `k - 1` with control points `k · (Pᵢ₊₁ - Pᵢ)`.
    ///
    /// A single point (order 0) has the constant zero curve as derivative.
    fn deriv(&self) -> BezierCurve {
        let k = self.order();
        if k == 0 {
            return Self::from_points(smallvec::smallvec![Point::ZERO]);
        }
        let scale = k as f64;
        let points = self
            .points
            .windows(2)
            .map(|w| (scale * (w[1] - w[0])).to_point())
            .collect();
        Self::from_points(points)
    }
}

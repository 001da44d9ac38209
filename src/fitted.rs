// Copyright 2026 the Morphometry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The curve produced when a length measurement is finished.

use crate::arclen::{equal_division_fractions, find_parameter_at_arc_fraction, total_length};
use crate::{
    BezierCurve, GeometryError, Line, MeasureConfig, ParamCurve, ParamCurveDeriv, Point,
    PolylinePath, RayIntersector, Rect, Vec2, WidthSpine, WidthSpines,
};

/// The geometric form of a [`FittedCurve`].
#[derive(Clone, Debug)]
pub enum CurveShape {
    /// A Bézier curve through all clicked points, with its hodograph.
    Bezier {
        /// The curve.
        curve: BezierCurve,
        /// Its derivative.
        hodograph: BezierCurve,
    },
    /// Exactly two points: a uniform-speed straight segment.
    Straight(Line),
    /// Curve fitting disabled: the clicked points joined by straight segments.
    ///
    /// The parameter of this shape is the arc-length fraction itself.
    Polyline(PolylinePath),
}

/// One entry of the sample table of a [`FittedCurve`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveSample {
    /// The curve parameter.
    pub t: f64,
    /// The point on the curve.
    pub position: Point,
    /// The derivative (or, for polylines, the unit segment direction).
    pub tangent: Vec2,
}

/// A frozen length measurement: its curve, total length and sample table.
#[derive(Clone, Debug)]
pub struct FittedCurve {
    shape: CurveShape,
    control_points: Vec<Point>,
    length: f64,
    samples: Vec<CurveSample>,
}

impl FittedCurve {
    /// Freeze `path` into a curve according to `config`.
    ///
    /// Two points always give [`CurveShape::Straight`]. Three or more give
    /// [`CurveShape::Bezier`] when [`MeasureConfig::fit_bezier`] is set and
    /// [`CurveShape::Polyline`] otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewVertices`] for fewer than two points.
    pub fn fit(path: &PolylinePath, config: &MeasureConfig) -> Result<Self, GeometryError> {
        let n = path.len();
        if n < 2 {
            return Err(GeometryError::TooFewVertices { found: n });
        }
        let shape = if n == 2 {
            let pts = path.points();
            CurveShape::Straight(Line::new(pts[0], pts[1]))
        } else if config.fit_bezier {
            let curve = BezierCurve::new(path.points().iter().copied())?;
            let hodograph = curve.deriv();
            CurveShape::Bezier { curve, hodograph }
        } else {
            CurveShape::Polyline(path.clone())
        };
        let length = match &shape {
            CurveShape::Bezier { hodograph, .. } => total_length(hodograph),
            CurveShape::Straight(line) => line.length(),
            CurveShape::Polyline(path) => path.length(),
        };
        if !(length > 0.0 && length.is_finite()) {
            return Err(GeometryError::DegenerateTangent);
        }
        let mut fitted = FittedCurve {
            shape,
            control_points: path.points().to_vec(),
            length,
            samples: Vec::new(),
        };
        fitted.samples = fitted.sample(config.sample_count())?;
        log::debug!(
            "fitted {} through {n} points, length {length:.3} px",
            fitted.kind()
        );
        Ok(fitted)
    }

    fn kind(&self) -> &'static str {
        match self.shape {
            CurveShape::Bezier { .. } => "bezier",
            CurveShape::Straight(_) => "straight line",
            CurveShape::Polyline(_) => "polyline",
        }
    }

    fn sample(&self, count: usize) -> Result<Vec<CurveSample>, GeometryError> {
        let last = (count.max(2) - 1) as f64;
        (0..count.max(2))
            .map(|i| {
                let t = i as f64 / last;
                let (position, tangent) = self.eval_with_tangent(t)?;
                Ok(CurveSample {
                    t,
                    position,
                    tangent,
                })
            })
            .collect()
    }

    fn eval_with_tangent(&self, t: f64) -> Result<(Point, Vec2), GeometryError> {
        match &self.shape {
            CurveShape::Bezier { curve, hodograph } => {
                Ok((curve.eval(t), hodograph.eval(t).to_vec2()))
            }
            CurveShape::Straight(line) => Ok((line.eval(t), line.direction())),
            CurveShape::Polyline(path) => path.point_at_fraction(t),
        }
    }

    /// The shape of the curve.
    #[inline]
    pub fn shape(&self) -> &CurveShape {
        &self.shape
    }

    /// The clicked points the curve was built from.
    #[inline]
    pub fn control_points(&self) -> &[Point] {
        &self.control_points
    }

    /// The order of the curve: one less than the number of clicked points.
    #[inline]
    pub fn order(&self) -> usize {
        self.control_points.len() - 1
    }

    /// Total length in pixels.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// The sample table, evenly spaced in the curve parameter.
    #[inline]
    pub fn samples(&self) -> &[CurveSample] {
        &self.samples
    }

    /// The curve parameter at which the arc length from the start is
    /// `fraction` of the total.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::RootBracket`] if `fraction` is outside
    /// `[0, 1]` or the inversion fails to bracket a root.
    pub fn parameter_at_fraction(&self, fraction: f64) -> Result<f64, GeometryError> {
        match &self.shape {
            CurveShape::Bezier { hodograph, .. } => {
                find_parameter_at_arc_fraction(hodograph, fraction, self.length)
            }
            CurveShape::Straight(_) | CurveShape::Polyline(_) => {
                if (0.0..=1.0).contains(&fraction) {
                    Ok(fraction)
                } else {
                    Err(GeometryError::RootBracket)
                }
            }
        }
    }

    /// The point and tangent at an arc-length fraction along the curve.
    ///
    /// # Errors
    ///
    /// See [`parameter_at_fraction`](Self::parameter_at_fraction).
    pub fn point_and_tangent_at_fraction(
        &self,
        fraction: f64,
    ) -> Result<(Point, Vec2), GeometryError> {
        let t = self.parameter_at_fraction(fraction)?;
        self.eval_with_tangent(t)
    }

    /// Place width spines at the interior equal-length division points.
    ///
    /// With `config.width_segments` segments there are
    /// `width_segments - 1` spines, at fractions `i / width_segments`.
    ///
    /// # Errors
    ///
    /// Fails if any spine cannot be built: a zero tangent yields
    /// [`GeometryError::DegenerateTangent`], a spine whose normal line does
    /// not cross `bounds` twice yields [`GeometryError::SpineOutOfBounds`].
    pub fn width_spines(
        &self,
        bounds: Rect,
        config: &MeasureConfig,
    ) -> Result<WidthSpines, GeometryError> {
        let intersector = RayIntersector::from_config(config);
        let spines = equal_division_fractions(config.spine_count())
            .into_iter()
            .map(|fraction| {
                let (anchor, tangent) = self.point_and_tangent_at_fraction(fraction)?;
                WidthSpine::new(fraction, anchor, tangent, bounds, &intersector)
            })
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("created {} width spines", spines.len());
        Ok(WidthSpines::new(spines))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::ParamCurveArclen;

    fn path(points: &[(f64, f64)]) -> PolylinePath {
        PolylinePath::from_points(points.iter().map(|&p| Point::from(p))).unwrap()
    }

    fn arch() -> PolylinePath {
        path(&[(100.0, 300.0), (250.0, 150.0), (450.0, 160.0), (600.0, 310.0)])
    }

    #[test]
    fn shape_selection() {
        let config = MeasureConfig::default();
        let two = FittedCurve::fit(&path(&[(0.0, 0.0), (3.0, 4.0)]), &config).unwrap();
        assert!(matches!(two.shape(), CurveShape::Straight(_)));
        assert_eq!(two.length(), 5.0);
        assert_eq!(two.order(), 1);

        let bez = FittedCurve::fit(&arch(), &config).unwrap();
        assert!(matches!(bez.shape(), CurveShape::Bezier { .. }));
        assert_eq!(bez.order(), 3);
        assert_eq!(bez.control_points().len(), 4);

        let no_fit = MeasureConfig {
            fit_bezier: false,
            ..config
        };
        let poly = FittedCurve::fit(&arch(), &no_fit).unwrap();
        assert!(matches!(poly.shape(), CurveShape::Polyline(_)));
        assert_relative_eq!(poly.length(), arch().length());
        // The smooth curve cuts the corners of its control polygon.
        assert!(bez.length() < poly.length());
    }

    #[test]
    fn too_few_points() {
        let config = MeasureConfig::default();
        assert_eq!(
            FittedCurve::fit(&path(&[(1.0, 1.0)]), &config).unwrap_err(),
            GeometryError::TooFewVertices { found: 1 }
        );
    }

    #[test]
    fn sample_table() {
        let config = MeasureConfig::default();
        let fitted = FittedCurve::fit(&arch(), &config).unwrap();
        let samples = fitted.samples();
        assert_eq!(samples.len(), config.sample_count());
        assert_eq!(samples[0].position, Point::new(100.0, 300.0));
        assert_eq!(samples[samples.len() - 1].position, Point::new(600.0, 310.0));
        assert_eq!(samples[samples.len() - 1].t, 1.0);
        // The polyline through the samples approaches the arc length from below.
        let chord: f64 = samples
            .windows(2)
            .map(|w| w[0].position.distance(w[1].position))
            .sum();
        assert!(chord <= fitted.length());
        assert_relative_eq!(chord, fitted.length(), max_relative = 1e-5);
    }

    #[test]
    fn equal_fractions_split_length_evenly() {
        let config = MeasureConfig::default();
        let fitted = FittedCurve::fit(&arch(), &config).unwrap();
        let CurveShape::Bezier { curve, .. } = fitted.shape() else {
            panic!("expected a bezier");
        };
        let mut params = vec![0.0];
        for f in equal_division_fractions(config.spine_count()) {
            params.push(fitted.parameter_at_fraction(f).unwrap());
        }
        params.push(1.0);
        let piece = fitted.length() / config.width_segments as f64;
        for w in params.windows(2) {
            let len = curve.arclen_to(w[1]) - curve.arclen_to(w[0]);
            assert_relative_eq!(len, piece, max_relative = 1e-9);
        }
    }

    #[test]
    fn straight_widths_are_perpendicular() {
        let config = MeasureConfig {
            width_segments: 4,
            ..MeasureConfig::default()
        };
        let bounds = Rect::from_size(400.0, 200.0);
        let fitted = FittedCurve::fit(&path(&[(0.0, 100.0), (400.0, 100.0)]), &config).unwrap();
        let spines = fitted.width_spines(bounds, &config).unwrap();
        assert_eq!(spines.len(), 3);
        let labels: Vec<String> = spines.iter().map(|(_, s)| s.label()).collect();
        assert_eq!(labels, ["25.00% Width", "50.00% Width", "75.00% Width"]);
        for (_, spine) in spines.iter() {
            let [a, b] = spine.handles();
            assert_relative_eq!(a.x, b.x);
            assert_relative_eq!(spine.width(), 200.0);
        }
        assert_relative_eq!(spines.get(crate::SpineId(1)).unwrap().anchor().x, 200.0);
    }

    #[test]
    fn curved_widths() {
        let config = MeasureConfig::default();
        let bounds = Rect::from_size(700.0, 400.0);
        let fitted = FittedCurve::fit(&arch(), &config).unwrap();
        let spines = fitted.width_spines(bounds, &config).unwrap();
        assert_eq!(spines.len(), 9);
        for (_, spine) in spines.iter() {
            let (_, tangent) = fitted.point_and_tangent_at_fraction(spine.fraction()).unwrap();
            assert!(spine.normal().dot(tangent).abs() < 1e-9 * tangent.hypot());
            for p in spine.handles() {
                assert!(bounds.contains_within(p, 1e-6));
            }
        }
    }

    #[test]
    fn polyline_fraction_out_of_range() {
        let config = MeasureConfig {
            fit_bezier: false,
            ..MeasureConfig::default()
        };
        let fitted = FittedCurve::fit(&arch(), &config).unwrap();
        assert_eq!(
            fitted.point_and_tangent_at_fraction(1.5),
            Err(GeometryError::RootBracket)
        );
    }
}

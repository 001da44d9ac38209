// Copyright 2026 the Morphometry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Angles between two rays that share a vertex.

use arrayvec::ArrayVec;

use crate::{GeometryError, Point};

/// The angle, in degrees, between the rays from `vertex` to `a` and to `b`.
///
/// The result is in `[0, 180]`. The cosine is clamped before `acos`, so
/// nearly collinear rays never produce `NaN`.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateVector`] if either ray end coincides
/// with the vertex, and [`GeometryError::NonFinitePoint`] for non-finite input.
pub fn angle_between(vertex: Point, a: Point, b: Point) -> Result<f64, GeometryError> {
    if !(vertex.is_finite() && a.is_finite() && b.is_finite()) {
        return Err(GeometryError::NonFinitePoint);
    }
    let u = a - vertex;
    let v = b - vertex;
    let denom = u.hypot() * v.hypot();
    if !(denom > 0.0) {
        return Err(GeometryError::DegenerateVector);
    }
    let cos = (u.dot(v) / denom).clamp(-1.0, 1.0);
    Ok(cos.acos().to_degrees())
}

/// A finished angle measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AngleMeasurement {
    /// The shared vertex.
    pub vertex: Point,
    /// The ends of the two rays.
    pub rays: [Point; 2],
    /// The angle between the rays, in degrees.
    pub degrees: f64,
}

impl AngleMeasurement {
    /// Measure the angle at `vertex` between the rays to `a` and `b`.
    ///
    /// # Errors
    ///
    /// See [`angle_between`].
    pub fn new(vertex: Point, a: Point, b: Point) -> Result<Self, GeometryError> {
        let degrees = angle_between(vertex, a, b)?;
        Ok(AngleMeasurement {
            vertex,
            rays: [a, b],
            degrees,
        })
    }
}

/// Collects the three clicks of an angle measurement.
///
/// The first point is the vertex, the next two are the ray ends.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AngleBuilder {
    points: ArrayVec<Point, 3>,
}

impl AngleBuilder {
    /// Start an empty angle.
    pub fn new() -> Self {
        AngleBuilder::default()
    }

    /// Place the next point.
    ///
    /// Returns the finished measurement once the second ray end is placed;
    /// the builder is then empty again.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonFinitePoint`] for non-finite input, or
    /// [`GeometryError::DegenerateVector`] if the final point leaves a ray
    /// of zero length. In the latter case the builder keeps its first two
    /// points so the user can retry the last click.
    pub fn add_point(&mut self, p: Point) -> Result<Option<AngleMeasurement>, GeometryError> {
        if !p.is_finite() {
            return Err(GeometryError::NonFinitePoint);
        }
        match self.points.as_slice() {
            &[vertex, a] => {
                let angle = AngleMeasurement::new(vertex, a, p)?;
                log::debug!("angle measured: {:.3} deg", angle.degrees);
                self.points.clear();
                Ok(Some(angle))
            }
            _ => {
                log::trace!("angle point {} at {p:?}", self.points.len());
                self.points.push(p);
                Ok(None)
            }
        }
    }

    /// Remove the most recently placed point.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyPath`] if nothing has been placed.
    pub fn undo(&mut self) -> Result<Point, GeometryError> {
        self.points.pop().ok_or(GeometryError::EmptyPath)
    }

    /// The vertex, if it has been placed.
    pub fn vertex(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// The points placed so far.
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_angle() {
        let deg = angle_between(Point::ZERO, Point::new(1.0, 0.0), Point::new(0.0, 1.0)).unwrap();
        assert!((deg - 90.0).abs() < 1e-12);
    }

    #[test]
    fn symmetric_and_bounded() {
        let v = Point::new(3.0, -2.0);
        let a = Point::new(10.0, 1.0);
        let b = Point::new(-4.0, 5.0);
        let ab = angle_between(v, a, b).unwrap();
        let ba = angle_between(v, b, a).unwrap();
        assert_eq!(ab, ba);
        assert!(ab > 0.0 && ab < 180.0);
    }

    #[test]
    fn collinear_rays() {
        let v = Point::new(1.0, 1.0);
        let same = angle_between(v, Point::new(2.0, 2.0), Point::new(7.0, 7.0)).unwrap();
        assert!(same.abs() < 1e-5);
        let opposite = angle_between(v, Point::new(0.0, 0.0), Point::new(3.0, 3.0)).unwrap();
        assert!((opposite - 180.0).abs() < 1e-5);
    }

    #[test]
    fn zero_length_ray() {
        let v = Point::new(1.0, 1.0);
        assert_eq!(
            angle_between(v, v, Point::new(2.0, 1.0)),
            Err(GeometryError::DegenerateVector)
        );
    }

    #[test]
    fn builder_sequence() {
        let mut builder = AngleBuilder::new();
        assert_eq!(builder.add_point(Point::new(5.0, 5.0)), Ok(None));
        assert_eq!(builder.add_point(Point::new(10.0, 5.0)), Ok(None));
        assert_eq!(builder.vertex(), Some(Point::new(5.0, 5.0)));
        // A click on the vertex is rejected and can be retried.
        assert_eq!(
            builder.add_point(Point::new(5.0, 5.0)),
            Err(GeometryError::DegenerateVector)
        );
        assert_eq!(builder.undo(), Ok(Point::new(10.0, 5.0)));
        builder.add_point(Point::new(5.0, 0.0)).unwrap();
        let angle = builder.add_point(Point::new(10.0, 5.0)).unwrap().unwrap();
        assert!((angle.degrees - 90.0).abs() < 1e-12);
        assert_eq!(angle.vertex, Point::new(5.0, 5.0));
        assert!(builder.points().is_empty());
        assert_eq!(builder.undo(), Err(GeometryError::EmptyPath));
    }
}

// Copyright 2026 the Morphometry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An editable sequence of clicked points.

use std::cell::OnceCell;

use crate::{GeometryError, Point, Vec2};

/// An ordered sequence of points in image space.
///
/// Insertion order defines the polyline topology and, when a curve is
/// fitted, the Bézier control points. Two consecutive points are never
/// equal: appending a point that coincides with the last one is a no-op.
#[derive(Clone, Debug, Default)]
pub struct PolylinePath {
    points: Vec<Point>,
    // Per-segment distances, computed on first use and dropped on edit.
    lengths: OnceCell<Vec<f64>>,
}

impl PolylinePath {
    /// Create an empty path.
    #[inline]
    pub fn new() -> PolylinePath {
        PolylinePath::default()
    }

    /// Create a path from a sequence of points.
    ///
    /// Consecutive duplicates are dropped, as with [`PolylinePath::append`].
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonFinitePoint`] if any point is not finite.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Result<Self, GeometryError> {
        let mut path = PolylinePath::new();
        for p in points {
            path.append(p)?;
        }
        Ok(path)
    }

    /// Add a point to the end of the path.
    ///
    /// Returns `false` if the point was dropped because it coincides with
    /// the current last point.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonFinitePoint`] if `p` is not finite.
    pub fn append(&mut self, p: Point) -> Result<bool, GeometryError> {
        if !p.is_finite() {
            return Err(GeometryError::NonFinitePoint);
        }
        if self.points.last() == Some(&p) {
            log::warn!("dropping point {p:?}, it coincides with the previous point");
            return Ok(false);
        }
        log::trace!("path point {} at {p:?}", self.points.len());
        self.points.push(p);
        self.lengths = OnceCell::new();
        Ok(true)
    }

    /// Remove and return the last point.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyPath`] if there are no points.
    pub fn remove_last(&mut self) -> Result<Point, GeometryError> {
        let p = self.points.pop().ok_or(GeometryError::EmptyPath)?;
        self.lengths = OnceCell::new();
        Ok(p)
    }

    /// The points, in insertion order.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the path has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recently appended point.
    #[inline]
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Euclidean distances between consecutive points; `n - 1` values for `n` points.
    pub fn segment_lengths(&self) -> &[f64] {
        self.lengths.get_or_init(|| {
            self.points
                .windows(2)
                .map(|w| w[0].distance(w[1]))
                .collect()
        })
    }

    /// Running sums of [`segment_lengths`](Self::segment_lengths).
    ///
    /// The last entry is the piecewise-linear length of the whole path.
    pub fn cumulative_lengths(&self) -> Vec<f64> {
        self.segment_lengths()
            .iter()
            .scan(0.0, |acc, &d| {
                *acc += d;
                Some(*acc)
            })
            .collect()
    }

    /// The piecewise-linear length of the path.
    pub fn length(&self) -> f64 {
        self.segment_lengths().iter().sum()
    }

    /// The point and unit direction at the given fraction of the
    /// piecewise-linear length.
    ///
    /// At an interior vertex the direction of the outgoing segment is used.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewVertices`] for fewer than two points,
    /// and [`GeometryError::RootBracket`] if `fraction` is outside `[0, 1]`.
    pub fn point_at_fraction(&self, fraction: f64) -> Result<(Point, Vec2), GeometryError> {
        if self.points.len() < 2 {
            return Err(GeometryError::TooFewVertices {
                found: self.points.len(),
            });
        }
        if !(0.0..=1.0).contains(&fraction) {
            return Err(GeometryError::RootBracket);
        }
        let lengths = self.segment_lengths();
        let mut remaining = fraction * self.length();
        let mut i = 0;
        while i + 1 < lengths.len() && remaining >= lengths[i] {
            remaining -= lengths[i];
            i += 1;
        }
        let (p0, p1) = (self.points[i], self.points[i + 1]);
        let dir = (p1 - p0).try_normalize()?;
        let t = (remaining / lengths[i]).clamp(0.0, 1.0);
        Ok((p0.lerp(p1, t), dir))
    }

    /// Consume the path, returning its points.
    #[inline]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_shape() -> PolylinePath {
        PolylinePath::from_points([
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(3.0, 10.0),
        ])
        .unwrap()
    }

    #[test]
    fn segment_and_cumulative_lengths() {
        let path = l_shape();
        assert_eq!(path.segment_lengths(), [5.0, 6.0]);
        assert_eq!(path.cumulative_lengths(), [5.0, 11.0]);
        assert_eq!(path.length(), 11.0);
    }

    #[test]
    fn append_invalidates_lengths() {
        let mut path = l_shape();
        assert_eq!(path.segment_lengths().len(), 2);
        path.append(Point::new(3.0, 12.0)).unwrap();
        assert_eq!(path.segment_lengths(), [5.0, 6.0, 2.0]);
        path.remove_last().unwrap();
        assert_eq!(path.segment_lengths(), [5.0, 6.0]);
    }

    #[test]
    fn duplicates_and_bad_points() {
        let mut path = PolylinePath::new();
        assert_eq!(path.append(Point::new(1.0, 1.0)), Ok(true));
        assert_eq!(path.append(Point::new(1.0, 1.0)), Ok(false));
        assert_eq!(path.len(), 1);
        assert_eq!(
            path.append(Point::new(f64::INFINITY, 1.0)),
            Err(GeometryError::NonFinitePoint)
        );
    }

    #[test]
    fn remove_from_empty() {
        let mut path = PolylinePath::new();
        assert_eq!(path.remove_last(), Err(GeometryError::EmptyPath));
        assert!(path.segment_lengths().is_empty());
        assert_eq!(path.length(), 0.0);
    }

    #[test]
    fn point_at_fraction() {
        let path = l_shape();
        let (p, dir) = path.point_at_fraction(0.5).unwrap();
        // Half of 11 is 5.5, half a unit into the vertical segment.
        assert!(p.distance(Point::new(3.0, 4.5)) < 1e-12);
        assert!((dir - Vec2::new(0.0, 1.0)).hypot() < 1e-12);
        let (end, _) = path.point_at_fraction(1.0).unwrap();
        assert!(end.distance(Point::new(3.0, 10.0)) < 1e-12);
        assert_eq!(
            path.point_at_fraction(-0.1),
            Err(GeometryError::RootBracket)
        );
    }
}

// Copyright 2026 the Morphometry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Area measurement: an open boundary that closes on self-intersection.

use crate::common::solve_linear_2x2;
use crate::{GeometryError, Point};

/// Where a new boundary segment crosses an existing one.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crossing {
    /// The crossing point.
    pub point: Point,
    /// Index of the crossed segment; segment `i` runs from vertex `i` to vertex `i + 1`.
    pub segment: usize,
}

impl Crossing {
    /// The first boundary vertex inside the loop closed by this crossing.
    #[inline]
    pub fn loop_start(&self) -> usize {
        self.segment + 1
    }
}

/// Accumulates the boundary of an area measurement.
///
/// Points are appended as the user clicks. Before each new point is
/// accepted, [`check_intersect`](Self::check_intersect) tests the segment
/// it would add against the existing boundary; a crossing closes the loop.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolygonAccumulator {
    points: Vec<Point>,
}

impl PolygonAccumulator {
    /// Create an empty boundary.
    #[inline]
    pub fn new() -> Self {
        PolygonAccumulator::default()
    }

    /// Add a point to the open boundary.
    ///
    /// Returns `false` if the point was dropped because it coincides with
    /// the last point.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonFinitePoint`] if `p` is not finite.
    pub fn append(&mut self, p: Point) -> Result<bool, GeometryError> {
        if !p.is_finite() {
            return Err(GeometryError::NonFinitePoint);
        }
        if self.points.last() == Some(&p) {
            log::warn!("dropping boundary point {p:?}, it coincides with the previous point");
            return Ok(false);
        }
        self.points.push(p);
        Ok(true)
    }

    /// Remove and return the last point.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyPath`] if the boundary is empty.
    pub fn remove_last(&mut self) -> Result<Point, GeometryError> {
        self.points.pop().ok_or(GeometryError::EmptyPath)
    }

    /// The boundary points so far.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The number of boundary points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no points have been added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Test the segment from the last point to `candidate` against every
    /// existing boundary segment.
    ///
    /// Each pair of segments is solved as a 2×2 system in terms of
    /// arc-length parameters along each segment. A crossing requires both
    /// parameters strictly inside their segments, so touching at an
    /// endpoint does not count. Parallel segments never cross. The first
    /// crossed segment in boundary order is reported.
    ///
    /// The segment ending at the last point shares its end with the new
    /// segment, so it is not tested.
    pub fn check_intersect(&self, candidate: Point) -> Option<Crossing> {
        let &v0 = self.points.last()?;
        let dv = candidate - v0;
        let tv = dv.hypot();
        if !(tv > 0.0) {
            return None;
        }
        let v_dir = dv / tv;
        let earlier = &self.points[..self.points.len() - 1];
        earlier.windows(2).enumerate().find_map(|(k, w)| {
            let u0 = w[0];
            let du = w[1] - u0;
            let tu = du.hypot();
            if !(tu > 0.0) {
                return None;
            }
            let u_dir = du / tu;
            // u0 + a * u_dir = v0 + b * v_dir
            let rhs = v0 - u0;
            let (a, b) =
                solve_linear_2x2(u_dir.x, -v_dir.x, u_dir.y, -v_dir.y, rhs.x, rhs.y).ok()?;
            if a > 0.0 && a < tu && b > 0.0 && b < tv {
                Some(Crossing {
                    point: v0 + b * v_dir,
                    segment: k,
                })
            } else {
                None
            }
        })
    }

    /// The vertices of the loop that `crossing` would close, for preview.
    pub fn loop_for(&self, crossing: &Crossing) -> Vec<Point> {
        let start = crossing.loop_start().min(self.points.len());
        let mut vertices = self.points[start..].to_vec();
        vertices.push(crossing.point);
        vertices
    }

    /// Close the boundary at the crossing point `at`, keeping the vertices
    /// from `from_index` onwards followed by `at`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewVertices`] if the loop would have
    /// fewer than three vertices.
    pub fn close_at(&self, at: Point, from_index: usize) -> Result<AreaPolygon, GeometryError> {
        let start = from_index.min(self.points.len());
        let mut vertices = self.points[start..].to_vec();
        if vertices.last() != Some(&at) {
            vertices.push(at);
        }
        AreaPolygon::new(vertices)
    }

    /// Close the loop formed by a crossing found with
    /// [`check_intersect`](Self::check_intersect).
    ///
    /// The loop starts at [`Crossing::loop_start`], the end vertex of the
    /// crossed segment; its start vertex lies outside the loop.
    ///
    /// # Errors
    ///
    /// See [`close_at`](Self::close_at).
    pub fn close_crossing(&self, crossing: &Crossing) -> Result<AreaPolygon, GeometryError> {
        self.close_at(crossing.point, crossing.loop_start())
    }

    /// Close the boundary as it stands, joining the last point to the first.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewVertices`] for fewer than three points.
    pub fn close(&self) -> Result<AreaPolygon, GeometryError> {
        AreaPolygon::new(self.points.clone())
    }

    /// The area enclosed by the boundary, treated as closed.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewVertices`] for fewer than three points.
    pub fn area(&self) -> Result<f64, GeometryError> {
        if self.points.len() < 3 {
            return Err(GeometryError::TooFewVertices {
                found: self.points.len(),
            });
        }
        Ok(signed_area(&self.points).abs())
    }
}

/// A closed region with its area computed once at closure.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaPolygon {
    vertices: Vec<Point>,
    signed_area: f64,
}

impl AreaPolygon {
    /// Close the polygon with the given vertices.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewVertices`] for fewer than three vertices.
    pub fn new(vertices: Vec<Point>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices {
                found: vertices.len(),
            });
        }
        let signed_area = signed_area(&vertices);
        Ok(AreaPolygon {
            vertices,
            signed_area,
        })
    }

    /// The ordered vertices; the last connects back to the first.
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// The signed area, positive for counter-clockwise vertices in a y-up space.
    #[inline]
    pub fn signed_area(&self) -> f64 {
        self.signed_area
    }

    /// The enclosed area in square pixels.
    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area.abs()
    }
}

/// The shoelace formula: `0.5 · Σ (xᵢ·yᵢ₊₁ − yᵢ·xᵢ₊₁)`, wrapping last to first.
pub fn signed_area(vertices: &[Point]) -> f64 {
    let n = vertices.len();
    let sum: f64 = (0..n)
        .map(|i| {
            let p = vertices[i];
            let q = vertices[(i + 1) % n];
            p.to_vec2().cross(q.to_vec2())
        })
        .sum();
    0.5 * sum
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::{AreaEvent, AreaMeasurement};

    fn accumulate(points: &[(f64, f64)]) -> PolygonAccumulator {
        let mut acc = PolygonAccumulator::new();
        for &p in points {
            acc.append(p.into()).unwrap();
        }
        acc
    }

    #[test]
    fn unit_square_area() {
        let acc = accumulate(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert_eq!(acc.area(), Ok(1.0));
        let poly = acc.close().unwrap();
        assert_eq!(poly.area(), 1.0);
        assert_eq!(poly.signed_area(), 1.0);
    }

    #[test]
    fn orientation_sign() {
        let cw = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 2.0),
            Point::new(3.0, 2.0),
            Point::new(3.0, 0.0),
        ];
        assert_eq!(signed_area(&cw), -6.0);
        assert_eq!(AreaPolygon::new(cw.to_vec()).unwrap().area(), 6.0);
    }

    #[test]
    fn detects_self_crossing() {
        let acc = accumulate(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let crossing = acc.check_intersect(Point::new(1.0, -1.0)).unwrap();
        assert_eq!(crossing.segment, 0);
        assert!(crossing.point.y.abs() < 1e-12);
        assert!(crossing.point.x > 0.0 && crossing.point.x < 2.0);
        assert!((crossing.point.x - 2.0 / 3.0).abs() < 1e-12);

        let poly = acc.close_crossing(&crossing).unwrap();
        assert_eq!(poly.vertices().len(), 4);
        assert_eq!(poly.vertices()[0], Point::new(2.0, 0.0));
        // Trapezoid with parallel sides 4/3 and 2, height 2.
        assert!((poly.area() - 10.0 / 3.0).abs() < 1e-12);
        assert_eq!(acc.loop_for(&crossing), poly.vertices());
    }

    #[test]
    fn first_crossing_wins() {
        // A zigzag; the new segment from (0, 4) crosses y = 2 and then y = 0.
        let acc = accumulate(&[(0.0, 0.0), (10.0, 0.0), (10.0, 2.0), (0.0, 2.0), (0.0, 4.0)]);
        let crossing = acc.check_intersect(Point::new(5.0, -4.0)).unwrap();
        assert_eq!(crossing.segment, 0);
        assert!(crossing.point.y.abs() < 1e-12);
        assert!((crossing.point.x - 2.5).abs() < 1e-12);
    }

    #[test]
    fn touching_and_parallel_do_not_cross() {
        let acc = accumulate(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)]);
        // Ends exactly on the first vertex.
        assert_eq!(acc.check_intersect(Point::new(0.0, 0.0)), None);
        // Runs back along the last segment.
        assert_eq!(acc.check_intersect(Point::new(2.0, 1.0)), None);
        // Parallel to the first segment.
        assert_eq!(acc.check_intersect(Point::new(-5.0, 2.0)), None);
        // Candidate equal to the last point.
        assert_eq!(acc.check_intersect(Point::new(2.0, 2.0)), None);
    }

    #[test]
    fn shared_vertex_is_not_a_crossing() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut random_point =
            || Point::new(rng.random_range(0.0..4000.0), rng.random_range(0.0..3000.0));
        for _ in 0..20_000 {
            let (p0, p1, p2) = (random_point(), random_point(), random_point());
            let mut area = AreaMeasurement::new();
            area.add_point(p0).unwrap();
            area.add_point(p1).unwrap();
            assert_eq!(area.preview(p2), None, "{p0:?} {p1:?} {p2:?}");
            assert_eq!(area.add_point(p2), Ok(AreaEvent::Added), "{p0:?} {p1:?} {p2:?}");
        }
        // A click that used to be mistaken for crossing at its own corner.
        let acc = accumulate(&[(3821.94, 895.58), (1014.20, 1283.36)]);
        assert_eq!(acc.check_intersect(Point::new(317.17, 651.13)), None);
    }

    #[test]
    fn too_few_vertices() {
        let acc = accumulate(&[(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(acc.area(), Err(GeometryError::TooFewVertices { found: 2 }));
        assert_eq!(acc.close(), Err(GeometryError::TooFewVertices { found: 2 }));
        assert_eq!(PolygonAccumulator::new().check_intersect(Point::ZERO), None);
    }
}

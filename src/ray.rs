// Copyright 2026 the Morphometry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intersecting a line through an anchor with the image bounds.

use arrayvec::ArrayVec;

use crate::common::solve_linear_2x2;
use crate::{GeometryError, MeasureConfig, Point, Rect, Vec2};

/// At most two points where a line meets a rectangle's boundary.
pub type BoundaryHits = ArrayVec<Point, 2>;

/// Finds where the line through an anchor point, in a given direction,
/// crosses the boundary of a rectangle.
///
/// Each of the four edges is solved as a 2×2 linear system. A candidate is
/// kept if it lies on the rectangle within `tolerance` pixels. Edges that
/// meet the direction at less than the minimum angle are skipped: a nearly
/// parallel edge would otherwise yield a point far outside the image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayIntersector {
    tolerance: f64,
    min_sin: f64,
}

impl Default for RayIntersector {
    fn default() -> Self {
        let config = MeasureConfig::default();
        RayIntersector::new(config.boundary_tolerance, config.min_ray_angle_deg)
    }
}

impl RayIntersector {
    /// Create an intersector with the given pixel tolerance and minimum
    /// edge angle in degrees.
    pub fn new(tolerance: f64, min_angle_deg: f64) -> Self {
        RayIntersector {
            tolerance: tolerance.max(0.0),
            min_sin: min_angle_deg.to_radians().sin().max(0.0),
        }
    }

    /// Create an intersector from the measurement configuration.
    pub fn from_config(config: &MeasureConfig) -> Self {
        RayIntersector::new(config.boundary_tolerance, config.min_ray_angle_deg)
    }

    /// Intersect the line `anchor + s · direction` with the boundary of `bounds`.
    ///
    /// The hits are sorted by `s`, so the first lies behind the anchor and
    /// the second ahead of it when the anchor is inside the rectangle. An
    /// anchor strictly inside yields exactly two hits; a line through a
    /// corner yields that corner once. Fewer than two hits are returned
    /// when the anchor sits on a corner or the line misses the rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateVector`] if `direction` has zero
    /// length, or [`GeometryError::NonFinitePoint`] if `anchor` is not finite.
    pub fn intersect_rect(
        &self,
        anchor: Point,
        direction: Vec2,
        bounds: Rect,
    ) -> Result<BoundaryHits, GeometryError> {
        if !anchor.is_finite() {
            return Err(GeometryError::NonFinitePoint);
        }
        let dir = direction.try_normalize()?;
        let corners = bounds.corners();
        let mut found: ArrayVec<(f64, Point), 4> = ArrayVec::new();
        for i in 0..4 {
            let e0 = corners[i];
            let edge = corners[(i + 1) % 4] - e0;
            let Ok(edge_dir) = edge.try_normalize() else {
                continue;
            };
            if dir.cross(edge_dir).abs() < self.min_sin {
                log::debug!("skipping edge {i}: nearly parallel to direction {dir:?}");
                continue;
            }
            // anchor + s * dir = e0 + u * edge_dir
            let rhs = e0 - anchor;
            let Ok((s, _u)) =
                solve_linear_2x2(dir.x, -edge_dir.x, dir.y, -edge_dir.y, rhs.x, rhs.y)
            else {
                continue;
            };
            let p = anchor + s * dir;
            if !bounds.contains_within(p, self.tolerance) {
                continue;
            }
            if found
                .iter()
                .any(|(_, q)| q.distance(p) <= self.tolerance.max(f64::EPSILON))
            {
                continue;
            }
            found.push((s, p));
        }
        found.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(found.into_iter().map(|(_, p)| p).take(2).collect())
    }
}

/// Intersect the line through `anchor` along `direction` with `bounds`,
/// using the default tolerance and angle threshold.
///
/// # Errors
///
/// See [`RayIntersector::intersect_rect`].
pub fn intersect_rect(
    anchor: Point,
    direction: Vec2,
    bounds: Rect,
) -> Result<BoundaryHits, GeometryError> {
    RayIntersector::default().intersect_rect(anchor, direction, bounds)
}

// Copyright 2026 the Morphometry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Width spines: lines across the body, perpendicular to the length curve.

use std::fmt;

use crate::normal::normal_at;
use crate::{GeometryError, Point, Rect, RayIntersector, Vec2};

/// One of the two handles of a [`WidthSpine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpineSide {
    /// The handle behind the anchor along the normal.
    Start,
    /// The handle ahead of the anchor along the normal.
    End,
}

impl SpineSide {
    #[inline]
    fn index(self) -> usize {
        match self {
            SpineSide::Start => 0,
            SpineSide::End => 1,
        }
    }
}

/// A width measurement line anchored on the length curve.
///
/// The spine runs through `anchor` along the unit `normal`. Its two
/// handles start where that line crosses the image bounds and can be
/// dragged by the user; a drag is constrained to the spine's line.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WidthSpine {
    fraction: f64,
    anchor: Point,
    normal: Vec2,
    bounds_hits: [Point; 2],
    handles: [Point; 2],
}

impl WidthSpine {
    /// Build a spine at `anchor`, perpendicular to `tangent`, reaching out
    /// to the image `bounds`.
    ///
    /// `fraction` is the arc-length fraction of the anchor along the curve
    /// and is only used for labelling.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateTangent`] for a zero tangent, and
    /// [`GeometryError::SpineOutOfBounds`] if the normal line does not cross
    /// the bounds in two distinct points.
    pub fn new(
        fraction: f64,
        anchor: Point,
        tangent: Vec2,
        bounds: Rect,
        intersector: &RayIntersector,
    ) -> Result<Self, GeometryError> {
        let normal = normal_at(tangent)?;
        let hits = intersector.intersect_rect(anchor, normal, bounds)?;
        if hits.len() < 2 {
            log::warn!(
                "spine at {:.2}% meets the bounds {} time(s)",
                fraction * 100.0,
                hits.len()
            );
            return Err(GeometryError::SpineOutOfBounds);
        }
        let bounds_hits = [hits[0], hits[1]];
        Ok(WidthSpine {
            fraction,
            anchor,
            normal,
            bounds_hits,
            handles: bounds_hits,
        })
    }

    /// The arc-length fraction at which the spine is anchored.
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// The point on the length curve the spine passes through.
    #[inline]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// The unit direction of the spine.
    #[inline]
    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    /// Where the spine line crosses the image bounds.
    #[inline]
    pub fn bounds_hits(&self) -> [Point; 2] {
        self.bounds_hits
    }

    /// The current position of a handle.
    #[inline]
    pub fn handle(&self, side: SpineSide) -> Point {
        self.handles[side.index()]
    }

    /// Both handle positions, start then end.
    #[inline]
    pub fn handles(&self) -> [Point; 2] {
        self.handles
    }

    /// The orthogonal projection of `p` onto the spine's line.
    pub fn project(&self, p: Point) -> Point {
        self.anchor + self.normal * (p - self.anchor).dot(self.normal)
    }

    /// Move a handle towards `to`, keeping it on the spine's line.
    ///
    /// Returns the handle's new position. Other spines and the curve are
    /// not affected.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonFinitePoint`] if `to` is not finite.
    pub fn drag_endpoint(&mut self, side: SpineSide, to: Point) -> Result<Point, GeometryError> {
        if !to.is_finite() {
            return Err(GeometryError::NonFinitePoint);
        }
        let p = self.project(to);
        log::trace!("spine {:.2}%: {side:?} handle to {p:?}", self.fraction * 100.0);
        self.handles[side.index()] = p;
        Ok(p)
    }

    /// Put both handles back on the image bounds.
    pub fn reset(&mut self) {
        self.handles = self.bounds_hits;
    }

    /// The width: distance between the two handles.
    #[inline]
    pub fn width(&self) -> f64 {
        self.handles[0].distance(self.handles[1])
    }

    /// Twice the distance from the anchor to one handle.
    ///
    /// Useful when only one flank of the animal is visible.
    #[inline]
    pub fn mirror_width(&self, side: SpineSide) -> f64 {
        2.0 * self.anchor.distance(self.handle(side))
    }

    /// A label such as `"10.00% Width"`.
    pub fn label(&self) -> String {
        WidthLabel(self.fraction).to_string()
    }
}

/// Formats an arc-length fraction as a width column heading.
#[derive(Clone, Copy, Debug)]
pub(crate) struct WidthLabel(pub(crate) f64);

impl fmt::Display for WidthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}% Width", self.0 * 100.0)
    }
}

/// Index of a spine in a [`WidthSpines`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpineId(pub usize);

/// The width spines of one length measurement, addressed by [`SpineId`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WidthSpines {
    spines: Vec<WidthSpine>,
}

impl WidthSpines {
    /// Create an arena from spines ordered along the curve.
    pub fn new(spines: Vec<WidthSpine>) -> Self {
        WidthSpines { spines }
    }

    /// The number of spines.
    #[inline]
    pub fn len(&self) -> usize {
        self.spines.len()
    }

    /// Returns `true` if there are no spines.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spines.is_empty()
    }

    /// Look up a spine.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnknownSpine`] if `id` is out of range.
    pub fn get(&self, id: SpineId) -> Result<&WidthSpine, GeometryError> {
        self.spines.get(id.0).ok_or(GeometryError::UnknownSpine)
    }

    /// Look up a spine for modification.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnknownSpine`] if `id` is out of range.
    pub fn get_mut(&mut self, id: SpineId) -> Result<&mut WidthSpine, GeometryError> {
        self.spines.get_mut(id.0).ok_or(GeometryError::UnknownSpine)
    }

    /// Drag one handle of one spine.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnknownSpine`] for a bad index, or the error
    /// from [`WidthSpine::drag_endpoint`].
    pub fn drag(&mut self, id: SpineId, side: SpineSide, to: Point) -> Result<Point, GeometryError> {
        self.get_mut(id)?.drag_endpoint(side, to)
    }

    /// Iterate over the spines with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (SpineId, &WidthSpine)> + '_ {
        self.spines.iter().enumerate().map(|(i, s)| (SpineId(i), s))
    }

    /// Current widths, in curve order.
    pub fn widths(&self) -> Vec<f64> {
        self.spines.iter().map(WidthSpine::width).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal_spine() -> WidthSpine {
        // Curve running left to right through the middle of a 200×100 image.
        let bounds = Rect::from_size(200.0, 100.0);
        WidthSpine::new(
            0.25,
            Point::new(50.0, 50.0),
            Vec2::new(10.0, 0.0),
            bounds,
            &RayIntersector::default(),
        )
        .unwrap()
    }

    #[test]
    fn spine_spans_image() {
        let spine = horizontal_spine();
        assert_eq!(spine.normal(), Vec2::new(0.0, 1.0));
        assert_eq!(spine.handles(), [Point::new(50.0, 0.0), Point::new(50.0, 100.0)]);
        assert_eq!(spine.width(), 100.0);
        assert_eq!(spine.label(), "25.00% Width");
    }

    #[test]
    fn drag_is_constrained_to_spine() {
        let mut spine = horizontal_spine();
        let p = spine.drag_endpoint(SpineSide::Start, Point::new(57.0, 30.0)).unwrap();
        assert_eq!(p, Point::new(50.0, 30.0));
        spine.drag_endpoint(SpineSide::End, Point::new(44.0, 62.0)).unwrap();
        assert!((spine.width() - 32.0).abs() < 1e-12);
        assert!((spine.mirror_width(SpineSide::Start) - 40.0).abs() < 1e-12);
        assert!((spine.mirror_width(SpineSide::End) - 24.0).abs() < 1e-12);
        spine.reset();
        assert_eq!(spine.width(), 100.0);
    }

    #[test]
    fn width_matches_handle_distance() {
        let bounds = Rect::from_size(300.0, 300.0);
        let mut spine = WidthSpine::new(
            0.5,
            Point::new(120.0, 140.0),
            Vec2::new(3.0, -1.0),
            bounds,
            &RayIntersector::default(),
        )
        .unwrap();
        let a = spine.drag_endpoint(SpineSide::Start, Point::new(100.0, 80.0)).unwrap();
        let b = spine.drag_endpoint(SpineSide::End, Point::new(150.0, 230.0)).unwrap();
        assert!((spine.width() - a.distance(b)).abs() < 1e-12);
        assert!((a - spine.anchor()).cross(spine.normal()).abs() < 1e-9);
    }

    #[test]
    fn arena_lookup() {
        let mut spines = WidthSpines::new(vec![horizontal_spine(), horizontal_spine()]);
        assert_eq!(spines.len(), 2);
        spines
            .drag(SpineId(1), SpineSide::End, Point::new(50.0, 70.0))
            .unwrap();
        assert_eq!(spines.widths(), [100.0, 70.0]);
        assert_eq!(
            spines.drag(SpineId(2), SpineSide::End, Point::ZERO),
            Err(GeometryError::UnknownSpine)
        );
    }

    #[test]
    fn degenerate_tangent() {
        let result = WidthSpine::new(
            0.5,
            Point::new(1.0, 1.0),
            Vec2::ZERO,
            Rect::from_size(2.0, 2.0),
            &RayIntersector::default(),
        );
        assert_eq!(result, Err(GeometryError::DegenerateTangent));
    }

    #[test]
    fn anchor_outside_bounds() {
        let result = WidthSpine::new(
            0.5,
            Point::new(-10.0, -10.0),
            Vec2::new(1.0, 1.0),
            Rect::from_size(5.0, 5.0),
            &RayIntersector::default(),
        );
        assert_eq!(result, Err(GeometryError::SpineOutOfBounds));
    }
}

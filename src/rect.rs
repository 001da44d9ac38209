// Copyright 2026 the Morphometry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rectangle.

use crate::Point;

/// An axis-aligned rectangle, typically the bounds of the measured image.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// The minimum x coordinate (left edge).
    pub x0: f64,
    /// The minimum y coordinate (top edge in y-down spaces).
    pub y0: f64,
    /// The maximum x coordinate (right edge).
    pub x1: f64,
    /// The maximum y coordinate (bottom edge in y-down spaces).
    pub y1: f64,
}

impl Rect {
    /// A new rectangle from minimum and maximum coordinates.
    #[inline(always)]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect { x0, y0, x1, y1 }
    }

    /// The bounds of an image of the given pixel dimensions, `[0, W] × [0, H]`.
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Rect {
        Rect::new(0.0, 0.0, width, height)
    }

    /// A new rectangle from two points.
    ///
    /// The result will have non-negative width and height.
    #[inline]
    pub fn from_points(p0: impl Into<Point>, p1: impl Into<Point>) -> Rect {
        let p0 = p0.into();
        let p1 = p1.into();
        Rect::new(p0.x, p0.y, p1.x, p1.y).abs()
    }

    /// The width of the rectangle.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// The height of the rectangle.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// The center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(0.5 * (self.x0 + self.x1), 0.5 * (self.y0 + self.y1))
    }

    /// The four corners, clockwise in a y-down space from the origin.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x0, self.y0),
            Point::new(self.x1, self.y0),
            Point::new(self.x1, self.y1),
            Point::new(self.x0, self.y1),
        ]
    }

    /// Take absolute value of width and height.
    ///
    /// The resulting rect has the same extents as the original, but is
    /// guaranteed to have non-negative width and height.
    #[inline]
    #[must_use]
    pub fn abs(&self) -> Rect {
        let Rect { x0, y0, x1, y1 } = *self;
        Rect::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
    }

    /// Returns `true` if `point` lies within the rectangle.
    ///
    /// The left and top edges are included, the right and bottom excluded.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x0 && point.x < self.x1 && point.y >= self.y0 && point.y < self.y1
    }

    /// Returns `true` if `point` lies within the rectangle grown by
    /// `tolerance` on every side, edges included.
    #[inline]
    pub fn contains_within(&self, point: Point, tolerance: f64) -> bool {
        point.x >= self.x0 - tolerance
            && point.x <= self.x1 + tolerance
            && point.y >= self.y0 - tolerance
            && point.y <= self.y1 + tolerance
    }

    /// Distance from `point` to the nearest edge of the rectangle's boundary.
    pub fn boundary_distance(&self, point: Point) -> f64 {
        let dx = if point.x < self.x0 {
            self.x0 - point.x
        } else if point.x > self.x1 {
            point.x - self.x1
        } else {
            0.0
        };
        let dy = if point.y < self.y0 {
            self.y0 - point.y
        } else if point.y > self.y1 {
            point.y - self.y1
        } else {
            0.0
        };
        if dx > 0.0 || dy > 0.0 {
            return dx.hypot(dy);
        }
        (point.x - self.x0)
            .min(self.x1 - point.x)
            .min(point.y - self.y0)
            .min(self.y1 - point.y)
    }

    /// Is this rectangle finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.x1.is_finite() && self.y0.is_finite() && self.y1.is_finite()
    }
}

impl From<(Point, Point)> for Rect {
    fn from(points: (Point, Point)) -> Rect {
        Rect::from_points(points.0, points.1)
    }
}

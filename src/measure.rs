// Copyright 2026 the Morphometry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-measurement state machines driven by user events.
//!
//! Each measurement owns its own state; nothing is shared between
//! measurements, so any number of them (for any number of images) can be
//! in progress at once.

use crate::{
    AreaPolygon, Crossing, FittedCurve, GeometryError, MeasureConfig, Point, PolygonAccumulator,
    PolylinePath,
};

/// The state of a [`LengthMeasurement`].
#[derive(Clone, Debug, Default)]
pub enum LengthState {
    /// No point placed yet.
    #[default]
    Idle,
    /// Points are being placed.
    Collecting(PolylinePath),
    /// The path has been frozen into a curve.
    Fitted(FittedCurve),
}

/// A length measurement: `Idle → Collecting → Fitted`.
#[derive(Clone, Debug, Default)]
pub struct LengthMeasurement {
    state: LengthState,
    config: MeasureConfig,
}

impl LengthMeasurement {
    /// Start a new length measurement.
    pub fn new(config: MeasureConfig) -> Self {
        LengthMeasurement {
            state: LengthState::Idle,
            config,
        }
    }

    /// The current state.
    #[inline]
    pub fn state(&self) -> &LengthState {
        &self.state
    }

    /// The settings used when the curve is fitted.
    #[inline]
    pub fn config(&self) -> &MeasureConfig {
        &self.config
    }

    /// Place a point.
    ///
    /// Returns `false` if the point was dropped as a duplicate of the last one.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidState`] once the curve is fitted, or
    /// [`GeometryError::NonFinitePoint`] for non-finite input.
    pub fn add_point(&mut self, p: Point) -> Result<bool, GeometryError> {
        match &mut self.state {
            LengthState::Idle => {
                let mut path = PolylinePath::new();
                let added = path.append(p)?;
                log::debug!("length measurement started at {p:?}");
                self.state = LengthState::Collecting(path);
                Ok(added)
            }
            LengthState::Collecting(path) => path.append(p),
            LengthState::Fitted(_) => Err(GeometryError::InvalidState),
        }
    }

    /// Remove the last placed point.
    ///
    /// Removing the only point returns the measurement to idle.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyPath`] when idle, and
    /// [`GeometryError::InvalidState`] once the curve is fitted.
    pub fn undo(&mut self) -> Result<Point, GeometryError> {
        match &mut self.state {
            LengthState::Idle => Err(GeometryError::EmptyPath),
            LengthState::Collecting(path) => {
                let p = path.remove_last()?;
                if path.is_empty() {
                    self.state = LengthState::Idle;
                }
                Ok(p)
            }
            LengthState::Fitted(_) => Err(GeometryError::InvalidState),
        }
    }

    /// Freeze the points into a curve.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewVertices`] with fewer than two points,
    /// leaving the measurement open, and [`GeometryError::InvalidState`] if
    /// it is already fitted.
    pub fn finish(&mut self) -> Result<&FittedCurve, GeometryError> {
        let fitted = match &self.state {
            LengthState::Idle => return Err(GeometryError::TooFewVertices { found: 0 }),
            LengthState::Collecting(path) => FittedCurve::fit(path, &self.config)?,
            LengthState::Fitted(_) => return Err(GeometryError::InvalidState),
        };
        self.state = LengthState::Fitted(fitted);
        match &self.state {
            LengthState::Fitted(curve) => Ok(curve),
            _ => Err(GeometryError::InvalidState),
        }
    }

    /// The points placed so far, or the control points once fitted.
    pub fn points(&self) -> &[Point] {
        match &self.state {
            LengthState::Idle => &[],
            LengthState::Collecting(path) => path.points(),
            LengthState::Fitted(curve) => curve.control_points(),
        }
    }

    /// The piecewise-linear length of the points placed so far, or the
    /// curve length once fitted.
    pub fn current_length(&self) -> f64 {
        match &self.state {
            LengthState::Idle => 0.0,
            LengthState::Collecting(path) => path.length(),
            LengthState::Fitted(curve) => curve.length(),
        }
    }

    /// The fitted curve, if finished.
    pub fn fitted(&self) -> Option<&FittedCurve> {
        match &self.state {
            LengthState::Fitted(curve) => Some(curve),
            _ => None,
        }
    }

    /// Consume the measurement, returning the fitted curve if finished.
    pub fn into_fitted(self) -> Option<FittedCurve> {
        match self.state {
            LengthState::Fitted(curve) => Some(curve),
            _ => None,
        }
    }
}

/// The state of an [`AreaMeasurement`].
#[derive(Clone, Debug)]
pub enum AreaState {
    /// Boundary points are being placed.
    Collecting(PolygonAccumulator),
    /// The boundary has been closed.
    Closed(AreaPolygon),
}

impl Default for AreaState {
    fn default() -> Self {
        AreaState::Collecting(PolygonAccumulator::new())
    }
}

/// What happened to a point given to [`AreaMeasurement::add_point`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AreaEvent {
    /// The point was added to the open boundary.
    Added,
    /// The point coincided with the last point and was dropped.
    Ignored,
    /// The new segment crossed the boundary, which is now closed.
    Closed(Crossing),
}

/// Hover feedback: the loop a candidate point would close.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaPreview {
    /// Where the candidate segment crosses the boundary.
    pub crossing: Crossing,
    /// The vertices of the loop that would be closed.
    pub vertices: Vec<Point>,
}

/// An area measurement: `Collecting → Closed`.
///
/// The boundary closes itself as soon as a new segment crosses an earlier
/// one, keeping only the loop cut off by the crossing. It can also be
/// closed explicitly with at least three points.
#[derive(Clone, Debug, Default)]
pub struct AreaMeasurement {
    state: AreaState,
}

impl AreaMeasurement {
    /// Start a new area measurement.
    pub fn new() -> Self {
        AreaMeasurement::default()
    }

    /// The current state.
    #[inline]
    pub fn state(&self) -> &AreaState {
        &self.state
    }

    /// Place a boundary point.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidState`] if the boundary is already
    /// closed, or [`GeometryError::NonFinitePoint`] for non-finite input.
    pub fn add_point(&mut self, p: Point) -> Result<AreaEvent, GeometryError> {
        let AreaState::Collecting(acc) = &mut self.state else {
            return Err(GeometryError::InvalidState);
        };
        if !p.is_finite() {
            return Err(GeometryError::NonFinitePoint);
        }
        if acc.len() >= 2 {
            if let Some(crossing) = acc.check_intersect(p) {
                let polygon = acc.close_crossing(&crossing)?;
                log::debug!(
                    "area closed by crossing segment {} at {:?}: {} vertices, {:.3} px^2",
                    crossing.segment,
                    crossing.point,
                    polygon.vertices().len(),
                    polygon.area()
                );
                self.state = AreaState::Closed(polygon);
                return Ok(AreaEvent::Closed(crossing));
            }
        }
        if acc.append(p)? {
            log::trace!("area point {} at {p:?}", acc.len() - 1);
            Ok(AreaEvent::Added)
        } else {
            Ok(AreaEvent::Ignored)
        }
    }

    /// The loop that placing `candidate` would close, if any.
    pub fn preview(&self, candidate: Point) -> Option<AreaPreview> {
        let AreaState::Collecting(acc) = &self.state else {
            return None;
        };
        let crossing = acc.check_intersect(candidate)?;
        Some(AreaPreview {
            crossing,
            vertices: acc.loop_for(&crossing),
        })
    }

    /// Close the boundary as it stands.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewVertices`] with fewer than three
    /// points, and [`GeometryError::InvalidState`] if already closed.
    pub fn close(&mut self) -> Result<&AreaPolygon, GeometryError> {
        let AreaState::Collecting(acc) = &self.state else {
            return Err(GeometryError::InvalidState);
        };
        let polygon = acc.close()?;
        log::debug!(
            "area closed explicitly: {} vertices, {:.3} px^2",
            polygon.vertices().len(),
            polygon.area()
        );
        self.state = AreaState::Closed(polygon);
        self.polygon().ok_or(GeometryError::InvalidState)
    }

    /// Remove the last boundary point.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyPath`] if there are no points, and
    /// [`GeometryError::InvalidState`] once closed.
    pub fn undo(&mut self) -> Result<Point, GeometryError> {
        match &mut self.state {
            AreaState::Collecting(acc) => acc.remove_last(),
            AreaState::Closed(_) => Err(GeometryError::InvalidState),
        }
    }

    /// The boundary points: the open boundary, or the closed loop.
    pub fn points(&self) -> &[Point] {
        match &self.state {
            AreaState::Collecting(acc) => acc.points(),
            AreaState::Closed(polygon) => polygon.vertices(),
        }
    }

    /// The closed polygon, if closed.
    pub fn polygon(&self) -> Option<&AreaPolygon> {
        match &self.state {
            AreaState::Closed(polygon) => Some(polygon),
            AreaState::Collecting(_) => None,
        }
    }

    /// Consume the measurement, returning the polygon if closed.
    pub fn into_polygon(self) -> Option<AreaPolygon> {
        match self.state {
            AreaState::Closed(polygon) => Some(polygon),
            AreaState::Collecting(_) => None,
        }
    }
}

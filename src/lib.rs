// Copyright 2026 the Morphometry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry for measuring animals in calibrated photographs.
//!
//! The morphometry library contains the numerical core of an image
//! measurement tool: fitting a Bézier curve through clicked points,
//! measuring its arc length, placing width spines perpendicular to it at
//! equal arc-length intervals, closing area boundaries on self-intersection
//! and measuring angles. Everything works in image pixels; conversion to
//! real units is a single scale factor applied on export.
//!
//! # Examples
//!
//! Measuring a length with widths:
//! ```
//! use morphometry::{LengthMeasurement, MeasureConfig, MeasurementSet, Point, Rect};
//!
//! let config = MeasureConfig::default();
//! let mut length = LengthMeasurement::new(config);
//! for p in [(100.0, 300.0), (250.0, 150.0), (450.0, 160.0), (600.0, 310.0)] {
//!     length.add_point(Point::from(p)).unwrap();
//! }
//! let curve = length.finish().unwrap();
//! let spines = curve.width_spines(Rect::from_size(700.0, 400.0), &config).unwrap();
//! assert_eq!(spines.len(), 9);
//!
//! let mut set = MeasurementSet::new();
//! let index = set.add_length("total length", curve.clone());
//! set.length_mut(index).unwrap().widths = Some(spines);
//! let rows = set.rows(0.01, "m");
//! assert_eq!(rows[1].name, "total length 10.00% Width");
//! ```
//!
//! Closing an area by crossing the boundary:
//! ```
//! use morphometry::{AreaEvent, AreaMeasurement, Point};
//!
//! let mut area = AreaMeasurement::new();
//! for p in [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)] {
//!     area.add_point(Point::from(p)).unwrap();
//! }
//! let event = area.add_point(Point::new(1.0, -1.0)).unwrap();
//! assert!(matches!(event, AreaEvent::Closed(_)));
//! let area_px = area.polygon().unwrap().area();
//! assert!((area_px - 10.0 / 3.0).abs() < 1e-12);
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for the value types, the settings
//!   and the exported rows.
//! - `mint`: conversions between [`Point`]/[`Vec2`] and [`mint`] types.
//! - `toml`: [`MeasureConfig::from_toml`] and [`MeasureConfig::to_toml`].
//!
//! [`mint`]: https://docs.rs/mint

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod angle;
pub mod arclen;
mod bezier;
pub mod common;
mod config;
mod error;
mod fitted;
mod line;
mod measure;
pub mod normal;
mod param_curve;
mod point;
mod polygon;
mod polyline;
mod ray;
mod rect;
mod spine;
mod table;
mod vec2;

pub use crate::angle::{angle_between, AngleBuilder, AngleMeasurement};
pub use crate::bezier::{BezierCurve, MAX_POWER_BASIS_ORDER};
pub use crate::config::*;
pub use crate::error::{ConfigError, GeometryError};
pub use crate::fitted::{CurveSample, CurveShape, FittedCurve};
pub use crate::line::{ConstPoint, Line};
pub use crate::measure::{
    AreaEvent, AreaMeasurement, AreaPreview, AreaState, LengthMeasurement, LengthState,
};
pub use crate::param_curve::*;
pub use crate::point::Point;
pub use crate::polygon::{signed_area, AreaPolygon, Crossing, PolygonAccumulator};
pub use crate::polyline::PolylinePath;
pub use crate::ray::{intersect_rect, BoundaryHits, RayIntersector};
pub use crate::rect::Rect;
pub use crate::spine::{SpineId, SpineSide, WidthSpine, WidthSpines};
pub use crate::table::{
    AngleEntry, AreaEntry, LengthEntry, MeasurementRow, MeasurementSet, DEGREE_UNIT, PIXEL_UNIT,
};
pub use crate::vec2::Vec2;

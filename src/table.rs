// Copyright 2026 the Morphometry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Finished measurements of one image, and their flat export.

use crate::spine::WidthLabel;
use crate::{AngleMeasurement, AreaPolygon, FittedCurve, WidthSpines};

/// Unit label used by [`MeasurementSet::rows_px`].
pub const PIXEL_UNIT: &str = "px";

/// Unit label of angle rows.
pub const DEGREE_UNIT: &str = "deg";

/// A named length measurement and its width spines, if any were placed.
#[derive(Clone, Debug)]
pub struct LengthEntry {
    /// The user-chosen name.
    pub name: String,
    /// The fitted curve.
    pub curve: FittedCurve,
    /// The width spines placed along the curve.
    pub widths: Option<WidthSpines>,
}

/// A named area measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaEntry {
    /// The user-chosen name.
    pub name: String,
    /// The closed polygon.
    pub polygon: AreaPolygon,
}

/// A named angle measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct AngleEntry {
    /// The user-chosen name.
    pub name: String,
    /// The measured angle.
    pub angle: AngleMeasurement,
}

/// One line of the exported table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasurementRow {
    /// The measurement name; width rows carry their position, for
    /// example `"body 50.00% Width"`.
    pub name: String,
    /// The value, scaled to `unit`.
    pub value: f64,
    /// The unit label.
    pub unit: String,
}

/// Every measurement made on one image.
///
/// The set works in pixels throughout. A pixel-to-unit scale is applied
/// only when [`rows`](Self::rows) are produced.
#[derive(Clone, Debug, Default)]
pub struct MeasurementSet {
    lengths: Vec<LengthEntry>,
    areas: Vec<AreaEntry>,
    angles: Vec<AngleEntry>,
}

impl MeasurementSet {
    /// Create an empty set.
    pub fn new() -> Self {
        MeasurementSet::default()
    }

    /// Record a length. Returns its index among the lengths.
    pub fn add_length(&mut self, name: impl Into<String>, curve: FittedCurve) -> usize {
        self.lengths.push(LengthEntry {
            name: name.into(),
            curve,
            widths: None,
        });
        self.lengths.len() - 1
    }

    /// Record an area.
    pub fn add_area(&mut self, name: impl Into<String>, polygon: AreaPolygon) {
        self.areas.push(AreaEntry {
            name: name.into(),
            polygon,
        });
    }

    /// Record an angle.
    pub fn add_angle(&mut self, name: impl Into<String>, angle: AngleMeasurement) {
        self.angles.push(AngleEntry {
            name: name.into(),
            angle,
        });
    }

    /// The recorded lengths, in the order they were added.
    pub fn lengths(&self) -> &[LengthEntry] {
        &self.lengths
    }

    /// A recorded length, for attaching or adjusting its widths.
    pub fn length_mut(&mut self, index: usize) -> Option<&mut LengthEntry> {
        self.lengths.get_mut(index)
    }

    /// The recorded areas.
    pub fn areas(&self) -> &[AreaEntry] {
        &self.areas
    }

    /// The recorded angles.
    pub fn angles(&self) -> &[AngleEntry] {
        &self.angles
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty() && self.areas.is_empty() && self.angles.is_empty()
    }

    /// Forget every measurement, as when a new image is opened.
    pub fn clear(&mut self) {
        log::debug!(
            "clearing {} lengths, {} areas, {} angles",
            self.lengths.len(),
            self.areas.len(),
            self.angles.len()
        );
        self.lengths.clear();
        self.areas.clear();
        self.angles.clear();
    }

    /// The flat table, with lengths and widths multiplied by `scale`.
    ///
    /// Rows come in this order: each length followed by its widths, then
    /// the angles, then the areas. Areas are multiplied by `scale²` and
    /// labelled `"{unit}^2"`; angles are left in degrees.
    pub fn rows(&self, scale: f64, unit: &str) -> Vec<MeasurementRow> {
        let mut rows = Vec::new();
        for entry in &self.lengths {
            rows.push(MeasurementRow {
                name: entry.name.clone(),
                value: entry.curve.length() * scale,
                unit: unit.to_owned(),
            });
            for (_, spine) in entry.widths.iter().flat_map(|spines| spines.iter()) {
                rows.push(MeasurementRow {
                    name: format!("{} {}", entry.name, WidthLabel(spine.fraction())),
                    value: spine.width() * scale,
                    unit: unit.to_owned(),
                });
            }
        }
        rows.extend(self.angles.iter().map(|entry| MeasurementRow {
            name: entry.name.clone(),
            value: entry.angle.degrees,
            unit: DEGREE_UNIT.to_owned(),
        }));
        let area_unit = format!("{unit}^2");
        rows.extend(self.areas.iter().map(|entry| MeasurementRow {
            name: entry.name.clone(),
            value: entry.polygon.area() * scale * scale,
            unit: area_unit.clone(),
        }));
        rows
    }

    /// The flat table in pixels.
    pub fn rows_px(&self) -> Vec<MeasurementRow> {
        self.rows(1.0, PIXEL_UNIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MeasureConfig, Point, PolylinePath, Rect, SpineId, SpineSide};

    fn straight(len: f64) -> FittedCurve {
        let path = PolylinePath::from_points([Point::new(0.0, 50.0), Point::new(len, 50.0)]).unwrap();
        FittedCurve::fit(&path, &MeasureConfig::default()).unwrap()
    }

    #[test]
    fn rows_are_scaled() {
        let mut set = MeasurementSet::new();
        assert!(set.is_empty());
        set.add_length("total", straight(80.0));
        set.add_area(
            "fluke",
            AreaPolygon::new(vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
            ])
            .unwrap(),
        );
        set.add_angle(
            "rostrum",
            AngleMeasurement::new(Point::ZERO, Point::new(1.0, 0.0), Point::new(1.0, 1.0)).unwrap(),
        );

        let rows = set.rows(0.5, "m");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "total");
        assert_eq!(rows[0].value, 40.0);
        assert_eq!(rows[0].unit, "m");
        assert_eq!(rows[1].name, "rostrum");
        assert!((rows[1].value - 45.0).abs() < 1e-12);
        assert_eq!(rows[1].unit, "deg");
        assert_eq!(rows[2].value, 12.5);
        assert_eq!(rows[2].unit, "m^2");

        let px = set.rows_px();
        assert_eq!(px[0].value, 80.0);
        assert_eq!(px[2].value, 50.0);
        assert_eq!(px[2].unit, "px^2");
    }

    #[test]
    fn width_rows_follow_their_length() {
        let config = MeasureConfig {
            width_segments: 2,
            ..MeasureConfig::default()
        };
        let mut set = MeasurementSet::new();
        let curve = straight(100.0);
        let mut spines = curve.width_spines(Rect::from_size(100.0, 100.0), &config).unwrap();
        spines
            .drag(SpineId(0), SpineSide::Start, Point::new(50.0, 40.0))
            .unwrap();
        let index = set.add_length("body", curve);
        set.length_mut(index).unwrap().widths = Some(spines);

        let rows = set.rows_px();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "body 50.00% Width");
        assert_eq!(rows[1].value, 60.0);

        set.clear();
        assert!(set.is_empty());
        assert!(set.rows_px().is_empty());
    }
}

// Copyright 2026 the Morphometry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settings for a measurement session.

use crate::ConfigError;

/// Default number of equal arc-length segments a length is split into.
pub const DEFAULT_WIDTH_SEGMENTS: usize = 10;
/// Default number of `(position, tangent)` samples kept for a fitted curve.
pub const DEFAULT_CURVE_SAMPLES: usize = 1000;
/// Minimum samples per width segment.
pub const SAMPLES_PER_SEGMENT: usize = 50;
/// Largest accepted `width_segments`.
pub const MAX_WIDTH_SEGMENTS: usize = 1000;
/// Largest accepted `curve_samples`, and the cap on the effective sample count.
pub const MAX_CURVE_SAMPLES: usize = 1_000_000;
/// Default pixel tolerance for accepting a point on the image boundary.
pub const DEFAULT_BOUNDARY_TOLERANCE: f64 = 1e-6;
/// Default minimum angle, in degrees, between a spine and an image edge.
pub const DEFAULT_MIN_RAY_ANGLE_DEG: f64 = 0.01;

/// Settings that control curve fitting and width spine placement.
///
/// With the `serde` feature, missing fields fall back to their defaults
/// when deserializing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MeasureConfig {
    /// Fit a Bézier curve through the points of a length measurement.
    ///
    /// When disabled, and always for two points, the piecewise-linear
    /// length is reported.
    pub fit_bezier: bool,
    /// Number of equal arc-length segments; one width spine is placed at
    /// each of the `width_segments - 1` interior division points.
    pub width_segments: usize,
    /// Number of `(position, tangent)` samples stored in a fitted curve.
    ///
    /// The effective count is never below `50 · width_segments`.
    pub curve_samples: usize,
    /// Pixel tolerance for intersections on the image boundary.
    pub boundary_tolerance: f64,
    /// Image edges closer than this angle (degrees) to a spine direction
    /// are not intersected.
    pub min_ray_angle_deg: f64,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        MeasureConfig {
            fit_bezier: true,
            width_segments: DEFAULT_WIDTH_SEGMENTS,
            curve_samples: DEFAULT_CURVE_SAMPLES,
            boundary_tolerance: DEFAULT_BOUNDARY_TOLERANCE,
            min_ray_angle_deg: DEFAULT_MIN_RAY_ANGLE_DEG,
        }
    }
}

impl MeasureConfig {
    /// The number of width spines, one per interior division point.
    #[inline]
    pub fn spine_count(&self) -> usize {
        self.width_segments.saturating_sub(1)
    }

    /// The number of curve samples actually taken.
    ///
    /// Never more than [`MAX_CURVE_SAMPLES`], even for settings that fail
    /// [`validate`](Self::validate).
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.curve_samples
            .max(SAMPLES_PER_SEGMENT.saturating_mul(self.width_segments))
            .clamp(2, MAX_CURVE_SAMPLES)
    }

    /// Check that every setting is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] naming the first bad setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_WIDTH_SEGMENTS).contains(&self.width_segments) {
            return Err(ConfigError::OutOfRange {
                field: "width_segments",
                value: self.width_segments as f64,
            });
        }
        if self.curve_samples > MAX_CURVE_SAMPLES {
            return Err(ConfigError::OutOfRange {
                field: "curve_samples",
                value: self.curve_samples as f64,
            });
        }
        if !(self.boundary_tolerance >= 0.0 && self.boundary_tolerance.is_finite()) {
            return Err(ConfigError::OutOfRange {
                field: "boundary_tolerance",
                value: self.boundary_tolerance,
            });
        }
        if !(0.0..45.0).contains(&self.min_ray_angle_deg) {
            return Err(ConfigError::OutOfRange {
                field: "min_ray_angle_deg",
                value: self.min_ray_angle_deg,
            });
        }
        Ok(())
    }

    /// Load settings from a TOML document.
    ///
    /// Keys that are absent keep their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is malformed, or
    /// [`ConfigError::OutOfRange`] if it parses but fails validation.
    #[cfg(feature = "toml")]
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: MeasureConfig =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        log::debug!("loaded measurement config: {config:?}");
        Ok(config)
    }

    /// Serialize the settings as a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MeasureConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.spine_count(), 9);
        assert_eq!(config.sample_count(), 1000);
    }

    #[test]
    fn sample_count_grows_with_segments() {
        let config = MeasureConfig {
            width_segments: 40,
            ..MeasureConfig::default()
        };
        assert_eq!(config.sample_count(), 2000);
    }

    #[test]
    fn huge_settings_are_bounded() {
        let config = MeasureConfig {
            width_segments: usize::MAX / 10,
            ..MeasureConfig::default()
        };
        assert_eq!(config.sample_count(), MAX_CURVE_SAMPLES);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "width_segments",
                ..
            })
        ));

        let config = MeasureConfig {
            curve_samples: MAX_CURVE_SAMPLES + 1,
            ..MeasureConfig::default()
        };
        assert_eq!(config.sample_count(), MAX_CURVE_SAMPLES);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "curve_samples",
                ..
            })
        ));

        let config = MeasureConfig {
            width_segments: MAX_WIDTH_SEGMENTS,
            ..MeasureConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.sample_count(), SAMPLES_PER_SEGMENT * MAX_WIDTH_SEGMENTS);
    }

    #[test]
    fn validation() {
        let config = MeasureConfig {
            width_segments: 0,
            ..MeasureConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "width_segments",
                ..
            })
        ));
        let config = MeasureConfig {
            min_ray_angle_deg: 90.0,
            ..MeasureConfig::default()
        };
        assert!(config.validate().is_err());
        let config = MeasureConfig {
            boundary_tolerance: f64::NAN,
            ..MeasureConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn toml_round_trip_with_defaults() {
        let config = MeasureConfig::from_toml("width_segments = 20\nfit_bezier = false\n").unwrap();
        assert_eq!(config.width_segments, 20);
        assert!(!config.fit_bezier);
        assert_eq!(config.curve_samples, DEFAULT_CURVE_SAMPLES);

        let text = config.to_toml().unwrap();
        assert_eq!(MeasureConfig::from_toml(&text).unwrap(), config);

        assert!(matches!(
            MeasureConfig::from_toml("width_segments = \"ten\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            MeasureConfig::from_toml("width_segments = 0"),
            Err(ConfigError::OutOfRange { .. })
        ));
    }
}

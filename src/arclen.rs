// Copyright 2026 the Morphometry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc length by fixed-order Gauss-Legendre quadrature.
//!
//! All functions here take the *hodograph* of a curve (its derivative,
//! see [`ParamCurveDeriv`](crate::ParamCurveDeriv)) and integrate its
//! speed `‖Q(t)‖`. The 24-point rule is applied once over the requested
//! interval with no adaptive refinement, so the cost is fixed and the
//! result is deterministic. For the smooth, gently curving outlines this
//! crate is meant for the error is far below a pixel.

use std::ops::Range;

use crate::common::{solve_itp, GAUSS_LEGENDRE_COEFFS_24};
use crate::{GeometryError, ParamCurve};

/// Convergence threshold for the parameter found by
/// [`find_parameter_at_arc_fraction`].
const PARAM_EPSILON: f64 = 1e-12;

/// Integrate the speed of `hodograph` over the parameter `range`.
///
/// The result is negative when `range.end < range.start`.
pub fn segment_length<H: ParamCurve>(hodograph: &H, range: Range<f64>) -> f64 {
    let half = 0.5 * (range.end - range.start);
    let mid = 0.5 * (range.end + range.start);
    let sum: f64 = GAUSS_LEGENDRE_COEFFS_24
        .iter()
        .map(|&(wi, xi)| wi * hodograph.eval(mid + half * xi).to_vec2().hypot())
        .sum();
    half * sum
}

/// Total arc length over `t ∈ [0, 1]` of the curve whose derivative is `hodograph`.
pub fn total_length<H: ParamCurve>(hodograph: &H) -> f64 {
    segment_length(hodograph, 0.0..1.0)
}

/// Arc length over `[0, t]` of the curve whose derivative is `hodograph`.
pub fn partial_length<H: ParamCurve>(hodograph: &H, t: f64) -> f64 {
    segment_length(hodograph, 0.0..t)
}

/// Find `t` such that `partial_length(hodograph, t) / total == fraction`.
///
/// The partial length is assumed to increase monotonically with `t`,
/// which holds for any curve whose speed never vanishes on an interval.
/// The endpoints are returned exactly: a fraction of 0 yields 0 and a
/// fraction of 1 yields 1.
///
/// # Errors
///
/// Returns [`GeometryError::RootBracket`] if `fraction` is outside
/// `[0, 1]`, if `total` is not a positive finite length, or if the
/// objective does not change sign over `[0, 1]`.
pub fn find_parameter_at_arc_fraction<H: ParamCurve>(
    hodograph: &H,
    fraction: f64,
    total: f64,
) -> Result<f64, GeometryError> {
    if !(0.0..=1.0).contains(&fraction) || !(total > 0.0 && total.is_finite()) {
        return Err(GeometryError::RootBracket);
    }
    if fraction == 0.0 {
        return Ok(0.0);
    }
    if fraction == 1.0 {
        return Ok(1.0);
    }
    let target = fraction * total;
    let ya = -target;
    let yb = total_length(hodograph) - target;
    if !(ya < 0.0 && yb > 0.0) {
        return Err(GeometryError::RootBracket);
    }
    let f = |t: f64| partial_length(hodograph, t) - target;
    let t = solve_itp(f, 0.0, 1.0, PARAM_EPSILON, 1, 0.2, ya, yb);
    if t.is_finite() {
        Ok(t)
    } else {
        Err(GeometryError::RootBracket)
    }
}

/// Arc-length fractions of `n` interior division points, `i / (n + 1)` for `i = 1..=n`.
///
/// These split a curve into `n + 1` pieces of equal length.
pub fn equal_division_fractions(n: usize) -> Vec<f64> {
    let denom = (n + 1) as f64;
    (1..=n).map(|i| i as f64 / denom).collect()
}

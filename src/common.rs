// Copyright 2026 the Morphometry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations

#![allow(missing_docs, reason = "tables and solvers are documented at the call sites")]

use crate::GeometryError;

/// Solve an arbitrary function for a zero-crossing.
///
/// This uses the [ITP method], as described in the paper
/// [An Enhancement of the Bisection Method Average Performance Preserving Minmax Optimality].
///
/// The values of `ya` and `yb` are given as arguments rather than
/// computed from `f`, as the values may already be known, or they may
/// be less expensive to compute as special cases.
///
/// It is assumed that `ya < 0.0` and `yb > 0.0`, otherwise unexpected
/// results may occur.
///
/// The value of `epsilon` must be larger than 2^-63 times `b - a`,
/// otherwise integer overflow may occur. The `a` and `b` parameters
/// represent the lower and upper bounds of the bracket searched for a
/// solution.
///
/// The ITP method has tuning parameters. This implementation hardwires
/// k2 to 2, both because it avoids an expensive floating point
/// exponentiation, and because this value has been tested to work well
/// with curve fitting problems.
///
/// The `n0` parameter controls the relative impact of the bisection and
/// secant components. When it is 0, the number of iterations is
/// guaranteed to be no more than the number required by bisection.
///
/// The `k1` parameter should be around `0.2 / (b - a)`.
///
/// When the function is monotonic, the returned result is guaranteed to
/// be within `epsilon` of the zero crossing.
///
/// [ITP method]: https://en.wikipedia.org/wiki/ITP_Method
/// [An Enhancement of the Bisection Method Average Performance Preserving Minmax Optimality]: https://dl.acm.org/doi/10.1145/3423597
#[allow(clippy::too_many_arguments, reason = "mirrors the paper's parameters")]
pub fn solve_itp(
    mut f: impl FnMut(f64) -> f64,
    mut a: f64,
    mut b: f64,
    epsilon: f64,
    n0: usize,
    k1: f64,
    mut ya: f64,
    mut yb: f64,
) -> f64 {
    let n1_2 = (((b - a) / epsilon).log2().ceil() - 1.0).max(0.0) as usize;
    let nmax = n0 + n1_2;
    let mut scaled_epsilon = epsilon * (1u64 << nmax) as f64;
    while b - a > 2.0 * epsilon {
        let x1_2 = 0.5 * (a + b);
        let r = scaled_epsilon - 0.5 * (b - a);
        let xf = (yb * a - ya * b) / (yb - ya);
        let sigma = x1_2 - xf;
        // This has k2 = 2 hardwired for efficiency.
        let delta = k1 * (b - a).powi(2);
        let xt = if delta <= (x1_2 - xf).abs() {
            xf + delta.copysign(sigma)
        } else {
            x1_2
        };
        let xitp = if (xt - x1_2).abs() <= r {
            xt
        } else {
            x1_2 - r.copysign(sigma)
        };
        let yitp = f(xitp);
        if yitp > 0.0 {
            b = xitp;
            yb = yitp;
        } else if yitp < 0.0 {
            a = xitp;
            ya = yitp;
        } else {
            return xitp;
        }
        scaled_epsilon *= 0.5;
    }
    0.5 * (a + b)
}

/// Solve the 2×2 linear system `[[a, b], [c, d]] · [x, y] = [e, f]`.
///
/// Uses Cramer's rule. The determinant is compared against a threshold
/// relative to the magnitude of the matrix entries, so that nearly
/// parallel systems are rejected instead of producing huge solutions.
///
/// # Errors
///
/// Returns [`GeometryError::SingularSystem`] if the system has no unique
/// solution.
pub fn solve_linear_2x2(
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
) -> Result<(f64, f64), GeometryError> {
    let det = a * d - b * c;
    let scale = (a.abs() + b.abs()) * (c.abs() + d.abs());
    if !det.is_finite() || det.abs() <= SINGULAR_EPSILON * scale || scale == 0.0 {
        return Err(GeometryError::SingularSystem);
    }
    let det_recip = det.recip();
    let x = (e * d - b * f) * det_recip;
    let y = (a * f - e * c) * det_recip;
    if x.is_finite() && y.is_finite() {
        Ok((x, y))
    } else {
        Err(GeometryError::SingularSystem)
    }
}

/// Relative determinant threshold below which a 2×2 system counts as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// Row `n` of Pascal's triangle, `C(n, 0) ..= C(n, n)`.
///
/// Computed with the multiplicative recurrence, so values are exact up to
/// the point where they exceed 2^53.
pub fn pascal_row(n: usize) -> Vec<f64> {
    let mut row = Vec::with_capacity(n + 1);
    let mut c = 1.0;
    row.push(c);
    for k in 1..=n {
        c = c * (n + 1 - k) as f64 / k as f64;
        row.push(c.round());
    }
    row
}

// Table of Legendre-Gauss quadrature coefficients, adapted from:
// <https://pomax.github.io/bezierinfo/legendre-gauss.html>
//
// Each entry is (weight, abscissa) on the interval [-1, 1].

pub const GAUSS_LEGENDRE_COEFFS_24: &[(f64, f64)] = &[
    (0.1279381953467522, -0.0640568928626056),
    (0.1279381953467522, 0.0640568928626056),
    (0.1258374563468283, -0.1911188674736163),
    (0.1258374563468283, 0.1911188674736163),
    (0.1216704729278034, -0.3150426796961634),
    (0.1216704729278034, 0.3150426796961634),
    (0.1155056680537256, -0.4337935076260451),
    (0.1155056680537256, 0.4337935076260451),
    (0.1074442701159656, -0.5454214713888396),
    (0.1074442701159656, 0.5454214713888396),
    (0.0976186521041139, -0.6480936519369755),
    (0.0976186521041139, 0.6480936519369755),
    (0.0861901615319533, -0.7401241915785544),
    (0.0861901615319533, 0.7401241915785544),
    (0.0733464814110803, -0.8200019859739029),
    (0.0733464814110803, 0.8200019859739029),
    (0.0592985849154368, -0.8864155270044011),
    (0.0592985849154368, 0.8864155270044011),
    (0.0442774388174198, -0.9382745520027328),
    (0.0442774388174198, 0.9382745520027328),
    (0.0285313886289337, -0.9747285559713095),
    (0.0285313886289337, 0.9747285559713095),
    (0.0123412297999872, -0.9951872199970213),
    (0.0123412297999872, 0.9951872199970213),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauss_legendre_weights_sum_to_two() {
        let sum: f64 = GAUSS_LEGENDRE_COEFFS_24.iter().map(|(w, _)| w).sum();
        assert!((sum - 2.0).abs() < 1e-12, "weights sum to {sum}");
    }

    #[test]
    fn gauss_legendre_integrates_polynomials() {
        // Exact for polynomials up to degree 47; x^6 on [-1, 1] is 2/7.
        let integral: f64 = GAUSS_LEGENDRE_COEFFS_24
            .iter()
            .map(|&(w, x)| w * x.powi(6))
            .sum();
        assert!((integral - 2.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn itp_finds_sqrt2() {
        let f = |x: f64| x * x - 2.0;
        let x = solve_itp(f, 0.0, 2.0, 1e-12, 0, 0.1, -2.0, 2.0);
        assert!((x - 2.0f64.sqrt()).abs() < 1e-11);
    }

    #[test]
    fn linear_2x2() {
        let (x, y) = solve_linear_2x2(2.0, 1.0, 1.0, 3.0, 3.0, 5.0).unwrap();
        assert!((x - 0.8).abs() < 1e-15);
        assert!((y - 1.4).abs() < 1e-15);
        assert_eq!(
            solve_linear_2x2(1.0, 2.0, 2.0, 4.0, 1.0, 1.0),
            Err(GeometryError::SingularSystem)
        );
        assert_eq!(
            solve_linear_2x2(0.0, 0.0, 0.0, 0.0, 1.0, 1.0),
            Err(GeometryError::SingularSystem)
        );
    }

    #[test]
    fn pascal() {
        assert_eq!(pascal_row(0), [1.0]);
        assert_eq!(pascal_row(4), [1.0, 4.0, 6.0, 4.0, 1.0]);
        assert_eq!(pascal_row(10)[5], 252.0);
    }
}

//! Descriptive-statistics kernels: mean, variance, Pearson r, z-scores.
//!
//! These helpers underpin the DTW distance metric (z-normalization), the
//! windowed correlation analyzer, and the lag grid search. They deliberately
//! return sentinels for zero-variance input instead of erroring: a flat
//! window is a valid observation whose correlation is simply undefined, and
//! the caller decides how to annotate it.

use ndarray::{Array1, ArrayView1};

/// Arithmetic mean of a non-empty view.
///
/// Callers guarantee non-emptiness; an empty view would divide by zero.
#[inline]
pub fn mean(x: ArrayView1<f64>) -> f64 {
    x.sum() / x.len() as f64
}

/// Population variance (denominator `n`) of a non-empty view.
#[inline]
pub fn variance(x: ArrayView1<f64>) -> f64 {
    let m = mean(x);
    x.iter().map(|&v| (v - m).powi(2)).sum::<f64>() / x.len() as f64
}

/// Pearson correlation coefficient between two equal-length views.
///
/// Parameters
/// ----------
/// - `x`, `y`: equal-length, non-empty views.
///
/// Returns
/// -------
/// `Option<f64>`
///   - `Some(r)` with `r ∈ [−1, 1]` (clamped against rounding overshoot).
///   - `None` when either view has zero variance, making the coefficient
///     undefined. The caller maps this to its documented sentinel (e.g. a
///     non-significant window with correlation 0.0).
///
/// Panics
/// ------
/// - Debug-asserts equal lengths; callers validate shape before invoking.
#[inline]
pub fn pearson(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Option<f64> {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len() as f64;
    let mx = mean(x);
    let my = mean(y);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&xv, &yv) in x.iter().zip(y.iter()) {
        let dx = xv - mx;
        let dy = yv - my;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / n / (var_x / n).sqrt() / (var_y / n).sqrt()).clamp(-1.0, 1.0))
}

/// Z-normalize a view: subtract the mean, divide by the standard deviation.
///
/// A zero-variance (constant) view normalizes to all zeros — the documented
/// sentinel for magnitude-free input — so alignment on constant segments
/// contributes zero distance rather than NaNs.
#[inline]
pub fn z_normalize(x: ArrayView1<f64>) -> Array1<f64> {
    let m = mean(x);
    let sd = variance(x).sqrt();
    if sd == 0.0 {
        return Array1::zeros(x.len());
    }
    x.iter().map(|&v| (v - m) / sd).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Pearson r on perfectly correlated, anti-correlated, and constant
    //   input.
    // - Z-normalization moments and the constant-input sentinel.
    //
    // They intentionally DO NOT cover:
    // - Significance of correlation values (window::significance) or any
    //   windowing policy.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a perfect linear relationship yields r = ±1 and that a
    // constant input yields the `None` sentinel.
    //
    // Given
    // -----
    // - y = 2x + 1 (positive slope), z = −x (negative slope), and a constant
    //   vector c.
    //
    // Expect
    // ------
    // - pearson(x, y) ≈ 1, pearson(x, z) ≈ −1, pearson(x, c) = None.
    fn pearson_recovers_sign_and_flags_zero_variance() {
        let x = array![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = array![3.0, 5.0, 7.0, 9.0, 11.0];
        let z = array![-1.0, -2.0, -3.0, -4.0, -5.0];
        let c = array![2.0, 2.0, 2.0, 2.0, 2.0];

        assert!((pearson(x.view(), y.view()).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(x.view(), z.view()).unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(pearson(x.view(), c.view()), None);
    }

    #[test]
    // Purpose
    // -------
    // Verify z-normalization produces zero mean and unit variance, and that
    // a constant vector maps to all zeros.
    //
    // Given
    // -----
    // - A short non-constant vector and a constant vector.
    //
    // Expect
    // ------
    // - Normalized mean ≈ 0 and variance ≈ 1; constant input → all zeros.
    fn z_normalize_standardizes_and_handles_constant_input() {
        let x = array![1.0, 2.0, 3.0, 4.0];
        let c = array![7.0, 7.0, 7.0];

        let zx = z_normalize(x.view());
        assert!(mean(zx.view()).abs() < 1e-12);
        assert!((variance(zx.view()) - 1.0).abs() < 1e-12);

        let zc = z_normalize(c.view());
        assert!(zc.iter().all(|&v| v == 0.0));
    }

    #[test]
    // Purpose
    // -------
    // Spot-check variance against a hand computation.
    //
    // Given
    // -----
    // - x = [2, 4, 6] with mean 4.
    //
    // Expect
    // ------
    // - Population variance (4 + 0 + 4) / 3.
    fn variance_matches_hand_computation() {
        let x = array![2.0, 4.0, 6.0];

        assert!((variance(x.view()) - 8.0 / 3.0).abs() < 1e-12);
    }
}

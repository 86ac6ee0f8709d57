//! Two-tailed t-test for Pearson correlation coefficients.
//!
//! Purpose
//! -------
//! Decide whether a windowed correlation is distinguishable from zero given
//! the window's sample count, via the exact t-statistic
//! `t = r·sqrt((n−2) / (1−r²))` referred to a Student-t distribution with
//! `n − 2` degrees of freedom.
//!
//! Key behaviors
//! -------------
//! - `n ≤ 2` leaves zero degrees of freedom: the result is pinned to
//!   `(p = 1.0, not significant)` no matter how perfect the correlation.
//!   Two points always fit a line exactly.
//! - `|r| = 1` (after clamping) makes the t-statistic unbounded; the result
//!   is pinned to `(p = 0.0, significant)` for `n ≥ 3`.
//! - Significance is the strict comparison `p < alpha`.
//!
//! Testing notes
//! -------------
//! - Boundary pins: n = 3 with r = 0.999 is significant at α = 0.05
//!   (p ≈ 0.029); n = 2 is never significant.

use crate::window::errors::{WindowError, WindowResult};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Default significance level.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// `SignificanceTester` — strict `p < alpha` decision on windowed r values.
///
/// Parameters
/// ----------
/// Constructed via [`SignificanceTester::new`] with:
/// - `alpha`: `f64`
///   Two-tailed significance level, strictly in (0, 1).
#[derive(Debug, Clone, PartialEq)]
pub struct SignificanceTester {
    alpha: f64,
}

impl Default for SignificanceTester {
    fn default() -> Self {
        SignificanceTester { alpha: DEFAULT_ALPHA }
    }
}

impl SignificanceTester {
    /// Construct a tester, validating the significance level.
    ///
    /// Errors
    /// ------
    /// - `WindowError::InvalidAlpha` when `alpha` is non-finite or outside
    ///   the open interval (0, 1).
    pub fn new(alpha: f64) -> WindowResult<Self> {
        if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
            return Err(WindowError::InvalidAlpha { value: alpha });
        }
        Ok(SignificanceTester { alpha })
    }

    /// Configured significance level.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Two-tailed p-value and significance verdict for a correlation `r`
    /// computed over `n` samples.
    ///
    /// Parameters
    /// ----------
    /// - `n`: sample count of the window.
    /// - `r`: Pearson coefficient; clamped into [−1, 1] before testing.
    ///
    /// Returns
    /// -------
    /// `(f64, bool)`
    ///   The p-value in [0, 1] and whether `p < alpha`.
    pub fn test(&self, n: usize, r: f64) -> (f64, bool) {
        if n <= 2 {
            return (1.0, false);
        }
        let r = r.clamp(-1.0, 1.0);
        if r.abs() >= 1.0 {
            return (0.0, true);
        }

        let df = (n - 2) as f64;
        let t = r * (df / (1.0 - r * r)).sqrt();
        // df ≥ 1 here, so the distribution parameters are always valid.
        let dist = StudentsT::new(0.0, 1.0, df).expect("degrees of freedom are >= 1");
        let p = (2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0);
        (p, p < self.alpha)
    }
}

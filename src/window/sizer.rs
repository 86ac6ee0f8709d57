//! Variance-stability heuristic for choosing a moving-window size.
//!
//! Purpose
//! -------
//! Pick the smallest window for which the series looks locally stationary:
//! chop the series into disjoint chunks of the candidate size and accept the
//! first size whose chunk means vary by no more than a configured fraction
//! of the overall variance. Small windows then capture genuinely fast
//! dynamics, while drifting series get windows long enough to smooth the
//! drift out of each chunk.
//!
//! Key behaviors
//! -------------
//! - Candidates run from the configured floor up to
//!   `max_window_fraction × len` (never below the floor); if no candidate
//!   stabilizes, the cap itself is returned, mirroring the all-candidates-
//!   failed fallback of the overlap tail policy.
//! - A series with zero overall variance has nothing to stabilize; the
//!   floor is returned immediately.
//!
//! Invariants & assumptions
//! ------------------------
//! - The returned size always lies in `[min_window, len]`.

use crate::stats::{mean, variance};
use crate::window::errors::{WindowError, WindowResult};
use ndarray::ArrayView1;

/// Default smallest admissible window (5 samples resolves a correlation
/// trend without being pure noise).
pub const DEFAULT_MIN_WINDOW: usize = 5;

/// Default cap as a fraction of the series length.
pub const DEFAULT_MAX_WINDOW_FRACTION: f64 = 0.5;

/// Default chunk-mean variance target, as a fraction of overall variance.
pub const DEFAULT_VARIANCE_TARGET: f64 = 0.1;

/// `AdaptiveWindowSizer` — smallest-stable-window selection.
///
/// Purpose
/// -------
/// Choose a data-driven window size for [`MovingWindowAnalyzer`]
/// (crate::window::MovingWindowAnalyzer) when the caller does not fix one.
///
/// Parameters
/// ----------
/// Constructed via [`AdaptiveWindowSizer::new`] with:
/// - `min_window`: `usize`
///   Smallest admissible window; at least 2.
/// - `max_window_fraction`: `f64`
///   Cap on the window as a fraction of the series length, in (0, 1].
/// - `variance_target`: `f64`
///   A candidate is stable when the variance of its disjoint-chunk means is
///   at most `variance_target × variance(series)`; finite and > 0.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveWindowSizer {
    min_window: usize,
    max_window_fraction: f64,
    variance_target: f64,
}

impl Default for AdaptiveWindowSizer {
    fn default() -> Self {
        AdaptiveWindowSizer {
            min_window: DEFAULT_MIN_WINDOW,
            max_window_fraction: DEFAULT_MAX_WINDOW_FRACTION,
            variance_target: DEFAULT_VARIANCE_TARGET,
        }
    }
}

impl AdaptiveWindowSizer {
    /// Construct a sizer, validating every knob.
    ///
    /// Errors
    /// ------
    /// - `WindowError::InvalidWindowFloor` when `min_window < 2`.
    /// - `WindowError::InvalidMaxWindowFraction` when the fraction is
    ///   non-finite or outside (0, 1].
    /// - `WindowError::InvalidVarianceTarget` when the target is non-finite
    ///   or ≤ 0.
    pub fn new(
        min_window: usize, max_window_fraction: f64, variance_target: f64,
    ) -> WindowResult<Self> {
        if min_window < 2 {
            return Err(WindowError::InvalidWindowFloor { value: min_window });
        }
        if !max_window_fraction.is_finite()
            || max_window_fraction <= 0.0
            || max_window_fraction > 1.0
        {
            return Err(WindowError::InvalidMaxWindowFraction { value: max_window_fraction });
        }
        if !variance_target.is_finite() || variance_target <= 0.0 {
            return Err(WindowError::InvalidVarianceTarget { value: variance_target });
        }
        Ok(AdaptiveWindowSizer { min_window, max_window_fraction, variance_target })
    }

    /// Configured window-size floor.
    pub fn min_window(&self) -> usize {
        self.min_window
    }

    /// Choose the smallest stable window for `values`.
    ///
    /// Parameters
    /// ----------
    /// - `values`: the series to size against (for a pair of aligned series,
    ///   the reference's values).
    ///
    /// Returns
    /// -------
    /// `WindowResult<usize>`
    ///   A window in `[min_window, max(min_window, len × fraction)]`.
    ///
    /// Errors
    /// ------
    /// - `WindowError::SeriesTooShort` when `len < min_window`.
    pub fn determine_window_size(&self, values: ArrayView1<f64>) -> WindowResult<usize> {
        let len = values.len();
        if len < self.min_window {
            return Err(WindowError::SeriesTooShort { len, min: self.min_window });
        }

        let overall = variance(values);
        if overall == 0.0 {
            return Ok(self.min_window);
        }

        let cap = ((len as f64 * self.max_window_fraction).floor() as usize)
            .max(self.min_window)
            .min(len);
        for candidate in self.min_window..=cap {
            if chunk_mean_variance(values, candidate) <= self.variance_target * overall {
                return Ok(candidate);
            }
        }
        Ok(cap)
    }
}

/// Variance of the means of disjoint `size`-sample chunks (tail remainder
/// dropped). A single full chunk has zero mean variance by definition.
fn chunk_mean_variance(values: ArrayView1<f64>, size: usize) -> f64 {
    let chunks: Vec<f64> = values
        .exact_chunks(size)
        .into_iter()
        .map(|chunk| mean(chunk))
        .collect();
    if chunks.len() < 2 {
        return 0.0;
    }
    variance(ArrayView1::from(&chunks))
}

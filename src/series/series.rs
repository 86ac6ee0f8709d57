//! Validated time-series container and interpolation queries.
//!
//! Purpose
//! -------
//! Provide the single, validated `(timestamp, value)` sequence type shared by
//! every component of the correlation engine: aligners, windowed analyzers,
//! the delayed-response model, and the cumulative-effect trajectory output.
//! Centralizing validation here lets downstream numerics assume clean,
//! strictly ordered, finite data.
//!
//! Key behaviors
//! -------------
//! - [`TimeSeries::new`] enforces basic data invariants (non-empty, equal
//!   buffer lengths, finite entries, strictly increasing timestamps).
//! - [`TimeSeries::value_at`] interpolates linearly between bracketing
//!   samples and refuses to extrapolate outside the observed span.
//! - Consumers never mutate a series; every transformation returns a new
//!   instance.
//!
//! Invariants & assumptions
//! ------------------------
//! - Timestamps are **strictly increasing** and finite; sampling may be
//!   irregular.
//! - Values are finite (`!NaN`, not ±∞).
//! - `timestamps.len() == values.len() > 0`.
//!
//! Conventions
//! -----------
//! - Timestamps are `f64` seconds, either absolute (since epoch) or relative
//!   to an experiment origin; the engine only ever uses differences and
//!   ordering, so the two conventions are interchangeable per call.
//! - Indexing is 0-based; index 0 holds the oldest sample.
//!
//! Downstream usage
//! ----------------
//! - Construct a `TimeSeries` at the boundary where raw sensor or loader
//!   output enters the engine, then pass it by reference into aligners and
//!   analyzers.
//! - Aligners rely on [`TimeSeries::value_at`] for grid resampling and on
//!   [`TimeSeries::mean_interval`] for rate inference.
//!
//! Testing notes
//! -------------
//! - Unit tests cover each construction error branch, exact-sample and
//!   midpoint interpolation, and the out-of-range rejection on both sides.

use crate::series::errors::{SeriesError, SeriesResult};
use ndarray::Array1;

/// `TimeSeries` — validated, immutable sequence of `(timestamp, value)` pairs.
///
/// Purpose
/// -------
/// Represent one irregularly or regularly sampled signal with invariants
/// enforced once at construction, so alignment and correlation code can
/// assume strictly ordered, finite data.
///
/// Fields
/// ------
/// - `timestamps`: `Array1<f64>`
///   Strictly increasing, finite sample times (seconds).
/// - `values`: `Array1<f64>`
///   Finite sample values, one per timestamp.
///
/// Invariants
/// ----------
/// - `timestamps.len() == values.len() > 0`.
/// - `timestamps[i] < timestamps[i + 1]` for every consecutive pair.
/// - All entries of both buffers are finite.
///
/// Notes
/// -----
/// - The container is logically immutable: no method mutates it after
///   construction, and consumers return new series rather than editing
///   inputs in place.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Array1<f64>,
    values: Array1<f64>,
}

impl TimeSeries {
    /// Construct a validated [`TimeSeries`] from parallel buffers.
    ///
    /// Parameters
    /// ----------
    /// - `timestamps`: `Array1<f64>`
    ///   Sample times; must be finite and strictly increasing.
    /// - `values`: `Array1<f64>`
    ///   Sample values; must be finite and of the same length as
    ///   `timestamps`.
    ///
    /// Returns
    /// -------
    /// `SeriesResult<TimeSeries>`
    ///   - `Ok(TimeSeries)` when all invariants hold.
    ///   - `Err(SeriesError)` describing the first violated invariant.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::EmptySeries` when `timestamps.len() == 0`.
    /// - `SeriesError::LengthMismatch` when buffer lengths differ.
    /// - `SeriesError::NonFiniteValue` at the first NaN/±∞ entry in either
    ///   buffer.
    /// - `SeriesError::NonMonotonicTimestamps` at the first index whose
    ///   timestamp does not strictly exceed its predecessor.
    ///
    /// Panics
    /// ------
    /// - Never panics; all invalid inputs are reported via `SeriesError`.
    pub fn new(timestamps: Array1<f64>, values: Array1<f64>) -> SeriesResult<Self> {
        if timestamps.is_empty() {
            return Err(SeriesError::EmptySeries);
        }
        if timestamps.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                timestamps: timestamps.len(),
                values: values.len(),
            });
        }

        for (index, &value) in timestamps.iter().enumerate() {
            if !value.is_finite() {
                return Err(SeriesError::NonFiniteValue { index, value });
            }
        }
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(SeriesError::NonFiniteValue { index, value });
            }
        }

        for index in 1..timestamps.len() {
            if timestamps[index] <= timestamps[index - 1] {
                return Err(SeriesError::NonMonotonicTimestamps {
                    index,
                    prev: timestamps[index - 1],
                    next: timestamps[index],
                });
            }
        }

        Ok(TimeSeries { timestamps, values })
    }

    /// Construct a series from `(timestamp, value)` pairs.
    ///
    /// Convenience wrapper over [`TimeSeries::new`] for callers that hold
    /// record-oriented rather than columnar data; applies identical
    /// validation.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> SeriesResult<Self> {
        let timestamps = Array1::from_iter(pairs.iter().map(|&(t, _)| t));
        let values = Array1::from_iter(pairs.iter().map(|&(_, v)| v));
        TimeSeries::new(timestamps, values)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Always `false`: an empty series cannot be constructed. Present for
    /// API completeness alongside [`TimeSeries::len`].
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Sample timestamps (strictly increasing).
    pub fn timestamps(&self) -> &Array1<f64> {
        &self.timestamps
    }

    /// Sample values, parallel to [`TimeSeries::timestamps`].
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Timestamp of the oldest sample.
    pub fn start_time(&self) -> f64 {
        self.timestamps[0]
    }

    /// Timestamp of the newest sample.
    pub fn end_time(&self) -> f64 {
        self.timestamps[self.timestamps.len() - 1]
    }

    /// Observed span `end_time − start_time` (zero for a single sample).
    pub fn span(&self) -> f64 {
        self.end_time() - self.start_time()
    }

    /// Mean sampling interval `span / (len − 1)`.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::InsufficientData` when the series holds fewer than
    ///   two samples, so no interval exists.
    pub fn mean_interval(&self) -> SeriesResult<f64> {
        if self.len() < 2 {
            return Err(SeriesError::InsufficientData { needed: 2, actual: self.len() });
        }
        Ok(self.span() / (self.len() - 1) as f64)
    }

    /// Value at time `t`, linearly interpolated between bracketing samples.
    ///
    /// Parameters
    /// ----------
    /// - `t`: `f64`
    ///   Query time; must lie within `[start_time, end_time]`.
    ///
    /// Returns
    /// -------
    /// `SeriesResult<f64>`
    ///   - `Ok(value)` — the exact sample value when `t` hits a sample time,
    ///     otherwise the linear interpolant between the two bracketing
    ///     samples.
    ///   - `Err(SeriesError::OutOfRange)` when `t` falls outside the
    ///     observed span (including non-finite `t`); the engine never
    ///     fabricates data beyond the endpoints.
    ///
    /// Notes
    /// -----
    /// - Lookup is a binary search over the timestamp buffer, O(log n).
    pub fn value_at(&self, t: f64) -> SeriesResult<f64> {
        if !t.is_finite() || t < self.start_time() || t > self.end_time() {
            return Err(SeriesError::OutOfRange {
                t,
                start: self.start_time(),
                end: self.end_time(),
            });
        }

        // Index of the first timestamp strictly greater than t.
        let upper = self.timestamps.as_slice().map_or_else(
            || self.timestamps.iter().position(|&ts| ts > t).unwrap_or(self.len()),
            |slice| slice.partition_point(|&ts| ts <= t),
        );

        if upper == 0 {
            return Ok(self.values[0]);
        }
        if upper == self.len() {
            return Ok(self.values[self.len() - 1]);
        }

        let (t0, t1) = (self.timestamps[upper - 1], self.timestamps[upper]);
        let (v0, v1) = (self.values[upper - 1], self.values[upper]);
        if t == t0 {
            return Ok(v0);
        }
        let frac = (t - t0) / (t1 - t0);
        Ok(v0 + frac * (v1 - v0))
    }

    /// Materialize the series as `(timestamp, value)` pairs.
    ///
    /// Intended for serialization layers and bindings; the engine itself
    /// works on the columnar buffers.
    pub fn to_pairs(&self) -> Vec<(f64, f64)> {
        self.timestamps.iter().copied().zip(self.values.iter().copied()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction behavior of `TimeSeries::new` / `from_pairs`.
    // - Enforcement of invariants: non-empty, equal lengths, finiteness,
    //   strictly increasing timestamps.
    // - Linear interpolation at sample times, between samples, and rejection
    //   outside the observed range.
    //
    // They intentionally DO NOT cover:
    // - Aligner/analyzer behavior built on top of this container; those are
    //   exercised by the respective module tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a well-formed irregular series constructs and reports its
    // shape and range correctly.
    //
    // Given
    // -----
    // - Timestamps [0, 1, 4, 9] with values [10, 20, 30, 40].
    //
    // Expect
    // ------
    // - Construction succeeds; len = 4, start = 0, end = 9, span = 9.
    fn timeseries_new_returns_ok_for_valid_irregular_input() {
        let series =
            TimeSeries::new(array![0.0, 1.0, 4.0, 9.0], array![10.0, 20.0, 30.0, 40.0]).unwrap();

        assert_eq!(series.len(), 4);
        assert_eq!(series.start_time(), 0.0);
        assert_eq!(series.end_time(), 9.0);
        assert_eq!(series.span(), 9.0);
    }

    #[test]
    // Purpose
    // -------
    // Ensure an empty series is rejected.
    //
    // Given
    // -----
    // - Two empty buffers.
    //
    // Expect
    // ------
    // - `Err(SeriesError::EmptySeries)`.
    fn timeseries_new_returns_error_for_empty_series() {
        let result = TimeSeries::new(array![], array![]);

        assert_eq!(result.unwrap_err(), SeriesError::EmptySeries);
    }

    #[test]
    // Purpose
    // -------
    // Ensure mismatched buffer lengths are rejected with both lengths in the
    // payload.
    //
    // Given
    // -----
    // - 3 timestamps and 2 values.
    //
    // Expect
    // ------
    // - `Err(SeriesError::LengthMismatch { timestamps: 3, values: 2 })`.
    fn timeseries_new_returns_error_for_length_mismatch() {
        let result = TimeSeries::new(array![0.0, 1.0, 2.0], array![1.0, 2.0]);

        assert_eq!(result.unwrap_err(), SeriesError::LengthMismatch { timestamps: 3, values: 2 });
    }

    #[test]
    // Purpose
    // -------
    // Ensure a non-finite value is rejected and reported with its index.
    //
    // Given
    // -----
    // - Values containing NaN at index 1.
    //
    // Expect
    // ------
    // - `Err(SeriesError::NonFiniteValue { index: 1, .. })`.
    fn timeseries_new_returns_error_for_non_finite_value() {
        let result = TimeSeries::new(array![0.0, 1.0, 2.0], array![1.0, f64::NAN, 3.0]);

        match result {
            Err(SeriesError::NonFiniteValue { index, value }) => {
                assert_eq!(index, 1);
                assert!(value.is_nan());
            }
            other => panic!("expected NonFiniteValue error, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure ties and regressions in the timestamp axis are rejected.
    //
    // Given
    // -----
    // - Timestamps [0, 2, 2] (tie at index 2).
    //
    // Expect
    // ------
    // - `Err(SeriesError::NonMonotonicTimestamps { index: 2, .. })`.
    fn timeseries_new_returns_error_for_non_monotonic_timestamps() {
        let result = TimeSeries::new(array![0.0, 2.0, 2.0], array![1.0, 2.0, 3.0]);

        assert_eq!(
            result.unwrap_err(),
            SeriesError::NonMonotonicTimestamps { index: 2, prev: 2.0, next: 2.0 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify exact-sample lookup and midpoint interpolation.
    //
    // Given
    // -----
    // - Samples (0, 0), (10, 100).
    //
    // Expect
    // ------
    // - value_at(0) = 0, value_at(10) = 100, value_at(5) = 50.
    fn timeseries_value_at_interpolates_linearly() {
        let series = TimeSeries::from_pairs(&[(0.0, 0.0), (10.0, 100.0)]).unwrap();

        assert_eq!(series.value_at(0.0).unwrap(), 0.0);
        assert_eq!(series.value_at(10.0).unwrap(), 100.0);
        assert!((series.value_at(5.0).unwrap() - 50.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify interpolation respects irregular spacing.
    //
    // Given
    // -----
    // - Samples (0, 0), (1, 10), (5, 50).
    //
    // Expect
    // ------
    // - value_at(3) interpolates on the [1, 5] segment: 10 + (2/4)·40 = 30.
    fn timeseries_value_at_handles_irregular_spacing() {
        let series = TimeSeries::from_pairs(&[(0.0, 0.0), (1.0, 10.0), (5.0, 50.0)]).unwrap();

        assert!((series.value_at(3.0).unwrap() - 30.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure queries outside the observed span fail instead of
    // extrapolating, on both sides and for non-finite times.
    //
    // Given
    // -----
    // - A series spanning [0, 10].
    //
    // Expect
    // ------
    // - value_at(-0.1), value_at(10.1), and value_at(NaN) all return
    //   `Err(SeriesError::OutOfRange { .. })`.
    fn timeseries_value_at_rejects_out_of_range_queries() {
        let series = TimeSeries::from_pairs(&[(0.0, 1.0), (10.0, 2.0)]).unwrap();

        for t in [-0.1, 10.1, f64::NAN] {
            match series.value_at(t) {
                Err(SeriesError::OutOfRange { .. }) => (),
                other => panic!("expected OutOfRange for t = {t}, got {other:?}"),
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify `mean_interval` on a regular grid and its rejection for a
    // single-sample series.
    //
    // Given
    // -----
    // - A 5-sample series on a 2-second grid, and a 1-sample series.
    //
    // Expect
    // ------
    // - mean_interval = 2.0 for the grid; `InsufficientData` for the
    //   singleton.
    fn timeseries_mean_interval_requires_two_samples() {
        let grid = TimeSeries::from_pairs(&[
            (0.0, 1.0),
            (2.0, 1.0),
            (4.0, 1.0),
            (6.0, 1.0),
            (8.0, 1.0),
        ])
        .unwrap();
        let single = TimeSeries::from_pairs(&[(0.0, 1.0)]).unwrap();

        assert!((grid.mean_interval().unwrap() - 2.0).abs() < 1e-12);
        assert_eq!(
            single.mean_interval().unwrap_err(),
            SeriesError::InsufficientData { needed: 2, actual: 1 }
        );
    }
}

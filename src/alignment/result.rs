//! Alignment result and diagnostic report value objects.
//!
//! Purpose
//! -------
//! Define the immutable output of every aligner: a pair of equal-length
//! aligned series on a shared time (or synthetic index) axis, plus a
//! diagnostic report that makes the alignment auditable — cost, warp path
//! and original timestamps (DTW), resample ratio (rate sync), and outlier
//! masks (noise-resistant pre-filtering).
//!
//! Key behaviors
//! -------------
//! - [`AlignmentResult::new`] enforces the equal-length invariant once, so
//!   every downstream consumer (windowed analysis in particular) can index
//!   both series in lockstep.
//! - [`AlignmentReport`] carries aligner-specific diagnostics as `Option`s;
//!   each aligner populates only the fields it can vouch for.
//!
//! Invariants & assumptions
//! ------------------------
//! - `aligned_reference.len() == aligned_target.len()` always.
//! - Results are immutable after construction; recomputation means a new
//!   `align` call.
//!
//! Testing notes
//! -------------
//! - The constructor's length check is unit-tested here; population of the
//!   report fields is exercised by each aligner's own tests.

use crate::alignment::errors::{AlignError, AlignResult};
use crate::series::TimeSeries;

/// Diagnostics accompanying an [`AlignmentResult`].
///
/// Each aligner fills the subset of fields it produces:
/// - all aligners: `cost` (path-length- or grid-length-normalized distance
///   on z-normalized values, so costs are comparable across aligners);
/// - [`DynamicTimeWarping`](crate::alignment::DynamicTimeWarping):
///   `warp_path` (index pairs, monotonic in both coordinates) and
///   `warp_timestamps` (the original timestamps along the path, kept for
///   traceability since the aligned series live on a synthetic index axis);
/// - [`SampleRateSynchronizer`](crate::alignment::SampleRateSynchronizer):
///   `resample_ratio` (reference mean interval over target mean interval);
/// - [`NoiseResistantAligner`](crate::alignment::NoiseResistantAligner):
///   `reference_outliers` / `target_outliers` masks over the *input* series,
///   `true` marking samples replaced by interpolation before delegation.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentReport {
    /// Normalized alignment distance on z-normalized values.
    pub cost: f64,
    /// DTW warp path as `(reference_index, target_index)` pairs.
    pub warp_path: Option<Vec<(usize, usize)>>,
    /// Original `(reference_time, target_time)` pairs along the warp path.
    pub warp_timestamps: Option<Vec<(f64, f64)>>,
    /// Reference mean interval divided by target mean interval.
    pub resample_ratio: Option<f64>,
    /// Mask over the input reference series; `true` = replaced as outlier.
    pub reference_outliers: Option<Vec<bool>>,
    /// Mask over the input target series; `true` = replaced as outlier.
    pub target_outliers: Option<Vec<bool>>,
}

impl AlignmentReport {
    /// Report for a uniform-grid resampling alignment.
    pub fn resampled(cost: f64, resample_ratio: f64) -> Self {
        AlignmentReport {
            cost,
            warp_path: None,
            warp_timestamps: None,
            resample_ratio: Some(resample_ratio),
            reference_outliers: None,
            target_outliers: None,
        }
    }

    /// Report for a dynamic-time-warping alignment.
    pub fn warped(cost: f64, warp_path: Vec<(usize, usize)>, warp_timestamps: Vec<(f64, f64)>) -> Self {
        AlignmentReport {
            cost,
            warp_path: Some(warp_path),
            warp_timestamps: Some(warp_timestamps),
            resample_ratio: None,
            reference_outliers: None,
            target_outliers: None,
        }
    }
}

/// `AlignmentResult` — equal-length aligned series pair plus diagnostics.
///
/// Purpose
/// -------
/// Carry the output of one `align` call: both series resampled or warped
/// onto a shared axis, ready for lockstep windowed analysis, together with
/// the [`AlignmentReport`] documenting how the axis was obtained.
///
/// Fields
/// ------
/// - `aligned_reference`, `aligned_target`: [`TimeSeries`]
///   Equal-length series on a shared timestamp (rate sync) or synthetic
///   index (DTW) axis.
/// - `report`: [`AlignmentReport`]
///   Aligner-specific diagnostics.
///
/// Invariants
/// ----------
/// - `aligned_reference.len() == aligned_target.len()`, enforced by
///   [`AlignmentResult::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentResult {
    /// Reference series on the shared axis.
    pub aligned_reference: TimeSeries,
    /// Target series on the shared axis.
    pub aligned_target: TimeSeries,
    /// Diagnostics for auditing the alignment.
    pub report: AlignmentReport,
}

impl AlignmentResult {
    /// Construct a result, enforcing the equal-length invariant.
    ///
    /// Errors
    /// ------
    /// - `AlignError::LengthMismatch` when the two aligned series differ in
    ///   length. This indicates an aligner bug rather than bad user input,
    ///   but it is surfaced as an error so it can never silently corrupt
    ///   downstream windowed statistics.
    pub fn new(
        aligned_reference: TimeSeries, aligned_target: TimeSeries, report: AlignmentReport,
    ) -> AlignResult<Self> {
        if aligned_reference.len() != aligned_target.len() {
            return Err(AlignError::LengthMismatch {
                reference: aligned_reference.len(),
                target: aligned_target.len(),
            });
        }
        Ok(AlignmentResult { aligned_reference, aligned_target, report })
    }

    /// Shared length of the aligned pair.
    pub fn len(&self) -> usize {
        self.aligned_reference.len()
    }

    /// Always `false`: aligned series are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Equal-length enforcement in `AlignmentResult::new`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure mismatched aligned lengths are rejected with both lengths in
    // the payload.
    //
    // Given
    // -----
    // - A 3-sample reference and a 2-sample target.
    //
    // Expect
    // ------
    // - `Err(AlignError::LengthMismatch { reference: 3, target: 2 })`.
    fn alignment_result_new_rejects_length_mismatch() {
        let reference =
            TimeSeries::from_pairs(&[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]).unwrap();
        let target = TimeSeries::from_pairs(&[(0.0, 1.0), (1.0, 2.0)]).unwrap();

        let result = AlignmentResult::new(reference, target, AlignmentReport::resampled(0.0, 1.0));

        assert_eq!(result.unwrap_err(), AlignError::LengthMismatch { reference: 3, target: 2 });
    }
}

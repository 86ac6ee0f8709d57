//! Uniform-grid resampling aligner for rate- and phase-mismatched series.
//!
//! Purpose
//! -------
//! Reconcile two series that differ in sample rate and start time by
//! resampling both onto a common uniform grid over the intersection of their
//! observed ranges, using linear interpolation between bracketing samples.
//! This is the workhorse aligner for series whose clocks agree but whose
//! sampling does not.
//!
//! Key behaviors
//! -------------
//! - Grid spacing defaults to the **coarser** of the two input rates so the
//!   alignment never fabricates resolution neither instrument delivered.
//! - The grid is confined to the overlap of the two time ranges; requests
//!   that would require extrapolation are structurally impossible here, and
//!   disjoint ranges fail with [`AlignError::EmptyOverlap`].
//! - The report carries the resample ratio (reference mean interval over
//!   target mean interval) and a cost comparable to the DTW cost: the mean
//!   absolute difference of the z-normalized aligned values.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both inputs satisfy the [`TimeSeries`] invariants; this module adds the
//!   ≥ 2 points requirement (a single sample defines no rate).
//! - The output pair shares one timestamp axis and has equal length ≥ 2.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the coarser-rate default, an explicit target spacing,
//!   the disjoint-range failure, and the equal-length/shared-axis invariant.

use crate::alignment::errors::{AlignError, AlignResult};
use crate::alignment::result::{AlignmentReport, AlignmentResult};
use crate::series::TimeSeries;
use crate::stats::z_normalize;
use ndarray::Array1;

/// Minimum points per input series; fewer cannot define a sampling rate.
const MIN_POINTS: usize = 2;

/// `SampleRateSynchronizer` — linear-interpolation resampler onto a shared
/// uniform grid.
///
/// Purpose
/// -------
/// Align two series whose timestamps are trustworthy but whose sampling
/// rates or phases differ, by resampling both onto one uniform grid over
/// their common time range.
///
/// Parameters
/// ----------
/// Constructed via [`SampleRateSynchronizer::new`] with:
/// - `target_rate`: `Option<f64>`
///   Grid spacing in seconds. `None` selects the coarser of the two input
///   mean intervals at `align` time.
///
/// Invariants
/// ----------
/// - When `Some`, the spacing is finite and strictly positive (validated at
///   construction, per the fail-fast configuration contract).
///
/// Notes
/// -----
/// - The synchronizer is stateless between calls; it is safe to reuse one
///   instance across threads as long as each call owns its inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRateSynchronizer {
    target_rate: Option<f64>,
}

impl SampleRateSynchronizer {
    /// Construct a synchronizer, validating the optional grid spacing.
    ///
    /// Errors
    /// ------
    /// - `AlignError::InvalidTargetRate` when `target_rate` is `Some` but
    ///   non-finite or ≤ 0.
    pub fn new(target_rate: Option<f64>) -> AlignResult<Self> {
        if let Some(rate) = target_rate {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(AlignError::InvalidTargetRate { value: rate });
            }
        }
        Ok(SampleRateSynchronizer { target_rate })
    }

    /// Resample both series onto a shared uniform grid.
    ///
    /// Parameters
    /// ----------
    /// - `reference`, `target`: input series; each needs ≥ 2 points.
    ///
    /// Returns
    /// -------
    /// `AlignResult<AlignmentResult>`
    ///   Equal-length aligned pair on the shared grid, with
    ///   `report.resample_ratio` set and `report.cost` equal to the mean
    ///   absolute z-normalized difference.
    ///
    /// Errors
    /// ------
    /// - `AlignError::InsufficientData` when either series has fewer than 2
    ///   points.
    /// - `AlignError::EmptyOverlap` when the two time ranges intersect in
    ///   less than one grid step (including disjoint ranges).
    /// - `AlignError::Series` on propagated interpolation failures.
    ///
    /// Notes
    /// -----
    /// - The last grid point is clamped onto the overlap's end so the full
    ///   observed intersection is covered without extrapolating.
    pub fn align(&self, reference: &TimeSeries, target: &TimeSeries) -> AlignResult<AlignmentResult> {
        for series in [reference, target] {
            if series.len() < MIN_POINTS {
                return Err(AlignError::InsufficientData { len: series.len(), min: MIN_POINTS });
            }
        }

        let ref_interval = reference.mean_interval()?;
        let tgt_interval = target.mean_interval()?;
        // Coarser rate = larger interval; never fabricate resolution.
        let spacing = self.target_rate.unwrap_or_else(|| ref_interval.max(tgt_interval));

        let start = reference.start_time().max(target.start_time());
        let end = reference.end_time().min(target.end_time());
        if end - start < spacing {
            return Err(AlignError::EmptyOverlap { start, end });
        }

        let eps = spacing * 1e-9;
        let mut grid: Vec<f64> = Vec::new();
        let mut ref_values: Vec<f64> = Vec::new();
        let mut tgt_values: Vec<f64> = Vec::new();
        let mut k: usize = 0;
        loop {
            let t = start + k as f64 * spacing;
            if t > end + eps {
                break;
            }
            let t = t.min(end);
            grid.push(t);
            ref_values.push(reference.value_at(t)?);
            tgt_values.push(target.value_at(t)?);
            k += 1;
        }

        let ref_values = Array1::from(ref_values);
        let tgt_values = Array1::from(tgt_values);
        let cost = {
            let zr = z_normalize(ref_values.view());
            let zt = z_normalize(tgt_values.view());
            zr.iter().zip(zt.iter()).map(|(&a, &b)| (a - b).abs()).sum::<f64>()
                / grid.len() as f64
        };

        let aligned_reference = TimeSeries::new(Array1::from(grid.clone()), ref_values)?;
        let aligned_target = TimeSeries::new(Array1::from(grid), tgt_values)?;
        AlignmentResult::new(
            aligned_reference,
            aligned_target,
            AlignmentReport::resampled(cost, ref_interval / tgt_interval),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Coarser-rate default grid selection and explicit target spacing.
    // - Shared-axis / equal-length invariants of the output pair.
    // - Rejection of disjoint ranges and single-point series.
    // - Zero cost on self-alignment.
    //
    // They intentionally DO NOT cover:
    // - Interpolation accuracy itself (series module tests).
    // -------------------------------------------------------------------------

    fn make_regular(start: f64, step: f64, values: &[f64]) -> TimeSeries {
        let pairs: Vec<(f64, f64)> =
            values.iter().enumerate().map(|(i, &v)| (start + i as f64 * step, v)).collect();
        TimeSeries::from_pairs(&pairs).expect("regular test series should be valid")
    }

    #[test]
    // Purpose
    // -------
    // Verify the default grid adopts the coarser of the two input rates and
    // spans only the overlapping range.
    //
    // Given
    // -----
    // - Reference sampled every 1 s on [0, 10]; target every 2 s on [1, 9].
    //
    // Expect
    // ------
    // - Aligned pair on a 2 s grid starting at t = 1, equal lengths, shared
    //   timestamp axes, resample_ratio = 0.5.
    fn rate_sync_defaults_to_coarser_rate_over_overlap() {
        let reference = make_regular(0.0, 1.0, &[0.0; 11]);
        let target = make_regular(1.0, 2.0, &[1.0; 5]);
        let sync = SampleRateSynchronizer::new(None).unwrap();

        let result = sync.align(&reference, &target).unwrap();

        assert_eq!(result.aligned_reference.len(), result.aligned_target.len());
        assert_eq!(result.aligned_reference.timestamps(), result.aligned_target.timestamps());
        assert_eq!(result.aligned_reference.start_time(), 1.0);
        assert!((result.aligned_reference.timestamps()[1] - 3.0).abs() < 1e-9);
        assert!((result.report.resample_ratio.unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify an explicit target spacing overrides the coarser-rate default.
    //
    // Given
    // -----
    // - Two 1 s series on [0, 10] and a configured 5 s spacing.
    //
    // Expect
    // ------
    // - Grid timestamps 0, 5, 10.
    fn rate_sync_honors_explicit_spacing() {
        let reference = make_regular(0.0, 1.0, &[2.0; 11]);
        let target = make_regular(0.0, 1.0, &[3.0; 11]);
        let sync = SampleRateSynchronizer::new(Some(5.0)).unwrap();

        let result = sync.align(&reference, &target).unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result.aligned_reference.timestamps().to_vec(), vec![0.0, 5.0, 10.0]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure disjoint time ranges fail with `EmptyOverlap` instead of
    // fabricating an alignment.
    //
    // Given
    // -----
    // - Reference on [0, 5], target on [10, 15].
    //
    // Expect
    // ------
    // - `Err(AlignError::EmptyOverlap { .. })`.
    fn rate_sync_rejects_disjoint_ranges() {
        let reference = make_regular(0.0, 1.0, &[1.0; 6]);
        let target = make_regular(10.0, 1.0, &[1.0; 6]);
        let sync = SampleRateSynchronizer::new(None).unwrap();

        match sync.align(&reference, &target) {
            Err(AlignError::EmptyOverlap { .. }) => (),
            other => panic!("expected EmptyOverlap, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure a single-point series is rejected with `InsufficientData`.
    //
    // Given
    // -----
    // - A 1-point reference and a valid target.
    //
    // Expect
    // ------
    // - `Err(AlignError::InsufficientData { len: 1, min: 2 })`.
    fn rate_sync_rejects_single_point_series() {
        let reference = TimeSeries::from_pairs(&[(0.0, 1.0)]).unwrap();
        let target = make_regular(0.0, 1.0, &[1.0; 6]);
        let sync = SampleRateSynchronizer::new(None).unwrap();

        assert_eq!(
            sync.align(&reference, &target).unwrap_err(),
            AlignError::InsufficientData { len: 1, min: 2 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify self-alignment reports zero cost (round-trip property).
    //
    // Given
    // -----
    // - One non-constant series aligned against itself.
    //
    // Expect
    // ------
    // - report.cost == 0 and resample_ratio == 1.
    fn rate_sync_self_alignment_has_zero_cost() {
        let series = make_regular(0.0, 1.0, &[1.0, 3.0, 2.0, 5.0, 4.0, 6.0]);
        let sync = SampleRateSynchronizer::new(None).unwrap();

        let result = sync.align(&series, &series).unwrap();

        assert!(result.report.cost.abs() < 1e-12);
        assert!((result.report.resample_ratio.unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a non-positive configured spacing is rejected at construction.
    //
    // Given
    // -----
    // - target_rate = 0.0.
    //
    // Expect
    // ------
    // - `Err(AlignError::InvalidTargetRate { value: 0.0 })`.
    fn rate_sync_new_rejects_non_positive_spacing() {
        assert_eq!(
            SampleRateSynchronizer::new(Some(0.0)).unwrap_err(),
            AlignError::InvalidTargetRate { value: 0.0 }
        );
    }
}

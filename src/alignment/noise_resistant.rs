//! Outlier-masking wrapper around the warp and resampling aligners.
//!
//! Purpose
//! -------
//! Harden alignment against sensor glitches by detecting point outliers with
//! a rolling median / rolling MAD (median absolute deviation) filter,
//! replacing them with time-weighted interpolation between surviving
//! neighbors, and only then delegating to a backend aligner.
//!
//! Key behaviors
//! -------------
//! - Detection is purely local: a sample is an outlier when it deviates from
//!   the median of its rolling neighborhood by more than `outlier_threshold`
//!   rolling MADs. Median/MAD are used instead of mean/stddev so a single
//!   spike cannot inflate the yardstick used to judge it.
//! - A neighborhood whose MAD is zero (locally constant data) flags nothing;
//!   any deviation there is already visible to the backend cost.
//! - Replaced samples are interpolated between the nearest surviving
//!   neighbors by timestamp; edge outliers take the nearest survivor's
//!   value. The timestamps themselves are never altered.
//! - The per-input outlier masks are attached to the delegated report so
//!   callers can audit exactly which samples were synthesized.
//!
//! Invariants & assumptions
//! ------------------------
//! - At least 2 samples per series must survive masking; otherwise there is
//!   no signal left to align and the call fails rather than aligning
//!   interpolation artifacts.
//!
//! Testing notes
//! -------------
//! - Tests plant a single spike in an otherwise smooth series and assert it
//!   is flagged, replaced near the local trend, and reported in the mask.

use crate::alignment::dtw::DynamicTimeWarping;
use crate::alignment::errors::{AlignError, AlignResult};
use crate::alignment::rate_sync::SampleRateSynchronizer;
use crate::alignment::result::AlignmentResult;
use crate::series::TimeSeries;
use ndarray::Array1;

/// Rolling neighborhood width for median/MAD estimation (centered, odd).
const ROLLING_WINDOW: usize = 5;

/// Minimum surviving samples per series after masking.
const MIN_SURVIVORS: usize = 2;

/// Backend an outlier-masked pair is delegated to.
#[derive(Debug, Clone, PartialEq)]
pub enum AlignerBackend {
    /// Banded dynamic time warping.
    Warp(DynamicTimeWarping),
    /// Uniform-grid resampling.
    RateSync(SampleRateSynchronizer),
}

/// `NoiseResistantAligner` — rolling-MAD outlier masking in front of a
/// backend aligner.
///
/// Purpose
/// -------
/// Keep glitchy samples from dominating warp paths or resampled grids by
/// replacing them with locally interpolated values before delegation.
///
/// Parameters
/// ----------
/// Constructed via [`NoiseResistantAligner::new`] with:
/// - `outlier_threshold`: `f64`
///   Flagging distance in rolling MADs; finite and > 0. Typical values are
///   3–5; smaller is more aggressive.
/// - `backend`: [`AlignerBackend`]
///   The aligner the cleaned pair is handed to.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseResistantAligner {
    outlier_threshold: f64,
    backend: AlignerBackend,
}

impl NoiseResistantAligner {
    /// Construct a masking aligner, validating the threshold.
    ///
    /// Errors
    /// ------
    /// - `AlignError::InvalidOutlierThreshold` when the threshold is
    ///   non-finite or ≤ 0.
    pub fn new(outlier_threshold: f64, backend: AlignerBackend) -> AlignResult<Self> {
        if !outlier_threshold.is_finite() || outlier_threshold <= 0.0 {
            return Err(AlignError::InvalidOutlierThreshold { value: outlier_threshold });
        }
        Ok(NoiseResistantAligner { outlier_threshold, backend })
    }

    /// Mask outliers in both series, then delegate to the backend.
    ///
    /// Returns
    /// -------
    /// `AlignResult<AlignmentResult>`
    ///   The backend's result with `report.reference_outliers` and
    ///   `report.target_outliers` masks over the *input* series attached.
    ///
    /// Errors
    /// ------
    /// - `AlignError::InsufficientData` when fewer than 2 samples of either
    ///   series survive masking.
    /// - Any error of the delegated backend.
    pub fn align(&self, reference: &TimeSeries, target: &TimeSeries) -> AlignResult<AlignmentResult> {
        let (clean_reference, reference_mask) = self.mask_outliers(reference)?;
        let (clean_target, target_mask) = self.mask_outliers(target)?;

        let mut result = match &self.backend {
            AlignerBackend::Warp(dtw) => dtw.align(&clean_reference, &clean_target)?,
            AlignerBackend::RateSync(sync) => sync.align(&clean_reference, &clean_target)?,
        };
        result.report.reference_outliers = Some(reference_mask);
        result.report.target_outliers = Some(target_mask);
        Ok(result)
    }

    /// Flag rolling-MAD outliers and rebuild the series with replacements.
    fn mask_outliers(&self, series: &TimeSeries) -> AlignResult<(TimeSeries, Vec<bool>)> {
        let values = series.values();
        let stamps = series.timestamps();
        let n = values.len();
        let half = ROLLING_WINDOW / 2;

        let mut mask = vec![false; n];
        for i in 0..n {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(n);
            let mut neighborhood: Vec<f64> = values.slice(ndarray::s![lo..hi]).to_vec();
            let med = median_in_place(&mut neighborhood);
            let mut deviations: Vec<f64> =
                values.slice(ndarray::s![lo..hi]).iter().map(|&v| (v - med).abs()).collect();
            let mad = median_in_place(&mut deviations);
            if mad > 0.0 && (values[i] - med).abs() > self.outlier_threshold * mad {
                mask[i] = true;
            }
        }

        let survivors: Vec<usize> = (0..n).filter(|&i| !mask[i]).collect();
        if survivors.len() < MIN_SURVIVORS {
            return Err(AlignError::InsufficientData {
                len: survivors.len(),
                min: MIN_SURVIVORS,
            });
        }

        let mut clean = values.to_owned();
        for i in 0..n {
            if !mask[i] {
                continue;
            }
            let prev = survivors.iter().rev().find(|&&s| s < i).copied();
            let next = survivors.iter().find(|&&s| s > i).copied();
            clean[i] = match (prev, next) {
                (Some(p), Some(q)) => {
                    // Time-weighted interpolation between surviving neighbors.
                    let w = (stamps[i] - stamps[p]) / (stamps[q] - stamps[p]);
                    values[p] + w * (values[q] - values[p])
                }
                (Some(p), None) => values[p],
                (None, Some(q)) => values[q],
                (None, None) => unreachable!("at least 2 survivors exist"),
            };
        }

        let series = TimeSeries::new(stamps.to_owned(), Array1::from(clean))?;
        Ok((series, mask))
    }
}

/// Median of a scratch slice (sorted in place). Callers pass non-empty input.
#[inline]
fn median_in_place(scratch: &mut [f64]) -> f64 {
    scratch.sort_by(|a, b| a.partial_cmp(b).expect("series values are finite"));
    let mid = scratch.len() / 2;
    if scratch.len() % 2 == 1 {
        scratch[mid]
    } else {
        (scratch[mid - 1] + scratch[mid]) / 2.0
    }
}

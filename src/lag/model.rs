//! Lag grid search between an exposure signal and a delayed response.
//!
//! Purpose
//! -------
//! Estimate the latency between cause and effect without assuming a single
//! fixed delay: for each caller-supplied candidate lag, shift the response
//! backward by interpolation (so irregular sampling is tolerated), compute
//! the Pearson correlation against the exposure over the overlapping range,
//! and keep the lag maximizing |correlation|. The confidence interval is
//! non-parametric: the min/max of all candidates whose correlation
//! magnitude reaches a configured fraction of the peak.
//!
//! Key behaviors
//! -------------
//! - Candidates that yield too few overlapping samples, or a zero-variance
//!   pairing, are skipped rather than scored; only if EVERY candidate is
//!   skipped does the fit fail.
//! - `fit` replaces the cached profile wholesale; there is no incremental
//!   update path.
//! - `predict_response` interpolates the exposure at `at_time − best_lag`
//!   and refuses to extrapolate outside the observed exposure range.
//!
//! Invariants & assumptions
//! ------------------------
//! - `confidence_interval.0 ≤ best_lag ≤ confidence_interval.1` always.
//! - Ties on |correlation| keep the earlier candidate in caller order.

use crate::lag::errors::{LagError, LagResult};
use crate::lag::profile::LatencyProfile;
use crate::series::TimeSeries;
use crate::stats::pearson;
use ndarray::Array1;

/// Default minimum overlapping samples per scored candidate.
pub const DEFAULT_MIN_OVERLAP: usize = 10;

/// Default near-peak tolerance for the confidence interval.
pub const DEFAULT_CI_TOLERANCE: f64 = 0.95;

/// `DelayedResponseModel` — grid-search latency estimation with cached fit.
///
/// Purpose
/// -------
/// Own the lag-search configuration and the last fitted [`LatencyProfile`],
/// and answer delayed-response predictions against it.
///
/// Parameters
/// ----------
/// Constructed via [`DelayedResponseModel::new`] with:
/// - `signal_id`: identifier carried into the fitted profile.
/// - `min_overlap`: `usize`
///   Minimum overlapping samples for a candidate to be scored; at least 3
///   (Pearson needs 3 points to say anything beyond a perfect line).
/// - `ci_tolerance`: `f64`
///   Fraction of the peak |correlation| a candidate must reach to enter the
///   confidence interval, in (0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct DelayedResponseModel {
    signal_id: String,
    min_overlap: usize,
    ci_tolerance: f64,
    fitted: Option<LatencyProfile>,
}

impl DelayedResponseModel {
    /// Construct a model, validating the overlap floor and CI tolerance.
    ///
    /// Errors
    /// ------
    /// - `LagError::InvalidMinOverlap` when `min_overlap < 3`.
    /// - `LagError::InvalidCiTolerance` when the tolerance is non-finite or
    ///   outside (0, 1].
    pub fn new(
        signal_id: impl Into<String>, min_overlap: usize, ci_tolerance: f64,
    ) -> LagResult<Self> {
        if min_overlap < 3 {
            return Err(LagError::InvalidMinOverlap { value: min_overlap });
        }
        if !ci_tolerance.is_finite() || ci_tolerance <= 0.0 || ci_tolerance > 1.0 {
            return Err(LagError::InvalidCiTolerance { value: ci_tolerance });
        }
        Ok(DelayedResponseModel {
            signal_id: signal_id.into(),
            min_overlap,
            ci_tolerance,
            fitted: None,
        })
    }

    /// Construct a model with the default overlap floor and CI tolerance.
    pub fn with_defaults(signal_id: impl Into<String>) -> Self {
        DelayedResponseModel {
            signal_id: signal_id.into(),
            min_overlap: DEFAULT_MIN_OVERLAP,
            ci_tolerance: DEFAULT_CI_TOLERANCE,
            fitted: None,
        }
    }

    /// The profile from the most recent successful fit, if any.
    pub fn fitted_profile(&self) -> Option<&LatencyProfile> {
        self.fitted.as_ref()
    }

    /// Grid-search the candidate lags and cache the winning profile.
    ///
    /// Parameters
    /// ----------
    /// - `exposure`, `response`: the cause and effect series; alignment is
    ///   not required, only overlapping time ranges at some candidate lag.
    /// - `candidate_lags`: lags (in the series' time unit) to score; a
    ///   positive lag means the response trails the exposure.
    ///
    /// Returns
    /// -------
    /// `LagResult<LatencyProfile>`
    ///   The fitted profile (also cached for `predict_response`). Its
    ///   `candidate_lags` lists only the candidates that were scored.
    ///
    /// Errors
    /// ------
    /// - `LagError::NoCandidates` on an empty candidate list.
    /// - `LagError::NonFiniteLag` on a NaN or infinite candidate.
    /// - `LagError::InsufficientOverlap` when every candidate was skipped
    ///   for lack of overlapping samples or for zero variance.
    pub fn fit(
        &mut self, exposure: &TimeSeries, response: &TimeSeries, candidate_lags: &[f64],
    ) -> LagResult<LatencyProfile> {
        if candidate_lags.is_empty() {
            return Err(LagError::NoCandidates);
        }
        if let Some(&bad) = candidate_lags.iter().find(|lag| !lag.is_finite()) {
            return Err(LagError::NonFiniteLag { value: bad });
        }

        let mut scored: Vec<(f64, f64)> = Vec::new();
        let mut max_observed = 0;
        for &lag in candidate_lags {
            // Exposure timestamps t for which response(t + lag) is observable.
            let lo = exposure.start_time().max(response.start_time() - lag);
            let hi = exposure.end_time().min(response.end_time() - lag);
            if hi <= lo {
                continue;
            }

            let mut xs: Vec<f64> = Vec::new();
            let mut ys: Vec<f64> = Vec::new();
            for (&t, &x) in exposure.timestamps().iter().zip(exposure.values().iter()) {
                if t < lo || t > hi {
                    continue;
                }
                // Clamp absorbs the last-sample rounding of `lo`/`hi`.
                let shifted =
                    (t + lag).clamp(response.start_time(), response.end_time());
                xs.push(x);
                ys.push(response.value_at(shifted)?);
            }

            max_observed = max_observed.max(xs.len());
            if xs.len() < self.min_overlap {
                continue;
            }
            let x = Array1::from(xs);
            let y = Array1::from(ys);
            if let Some(r) = pearson(x.view(), y.view()) {
                scored.push((lag, r));
            }
        }

        if scored.is_empty() {
            return Err(LagError::InsufficientOverlap {
                required: self.min_overlap,
                observed: max_observed,
            });
        }

        let (best_lag, best_r) = scored
            .iter()
            .copied()
            .fold(scored[0], |best, cand| if cand.1.abs() > best.1.abs() { cand } else { best });

        let near_peak: Vec<f64> = scored
            .iter()
            .filter(|(_, r)| r.abs() >= self.ci_tolerance * best_r.abs())
            .map(|&(lag, _)| lag)
            .collect();
        let ci_low = near_peak.iter().copied().fold(f64::INFINITY, f64::min);
        let ci_high = near_peak.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let profile = LatencyProfile {
            signal_id: self.signal_id.clone(),
            candidate_lags: scored.iter().map(|&(lag, _)| lag).collect(),
            best_lag,
            confidence_interval: (ci_low, ci_high),
            correlation_at_best_lag: best_r,
        };
        self.fitted = Some(profile.clone());
        Ok(profile)
    }

    /// Predict the response at `at_time` from the lag-shifted exposure.
    ///
    /// Returns
    /// -------
    /// `LagResult<f64>`
    ///   The exposure interpolated at `at_time − best_lag`.
    ///
    /// Errors
    /// ------
    /// - `LagError::ModelNotFitted` before the first successful `fit`.
    /// - `LagError::PredictionOutOfRange` when the shifted time leaves the
    ///   observed exposure range (no extrapolation).
    pub fn predict_response(&self, exposure: &TimeSeries, at_time: f64) -> LagResult<f64> {
        let profile = self.fitted.as_ref().ok_or(LagError::ModelNotFitted)?;
        let shifted = at_time - profile.best_lag;
        if !shifted.is_finite()
            || shifted < exposure.start_time()
            || shifted > exposure.end_time()
        {
            return Err(LagError::PredictionOutOfRange { at_time, shifted });
        }
        Ok(exposure.value_at(shifted)?)
    }
}

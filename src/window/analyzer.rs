//! Moving-window correlation profiling over an aligned series pair.
//!
//! Purpose
//! -------
//! Compose the window sizer, overlap manager, and significance tester into
//! the full local-correlation workflow: place windows over an equal-length
//! aligned pair, compute Pearson r per window, and annotate each window
//! with its two-tailed p-value and significance verdict. The output is a
//! correlation profile over time, not a single global coefficient.
//!
//! Key behaviors
//! -------------
//! - Callers may fix the window size and overlap per call; anything left
//!   unspecified falls back to the adaptive sizer and the configured
//!   default overlap.
//! - A zero-variance (flat) window is reported, not skipped: it carries the
//!   sentinel `(r = 0.0, p = 1.0, not significant)`, keeping the profile's
//!   window positions aligned with the overlap manager's output.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs must already be aligned: equal length, shared axis. Length is
//!   re-checked here; axis agreement is the aligner's contract.
//! - One `WindowStatistic` per placed window, in placement order.

use crate::series::TimeSeries;
use crate::stats::pearson;
use crate::window::errors::{WindowError, WindowResult};
use crate::window::overlap::WindowOverlapManager;
use crate::window::significance::SignificanceTester;
use crate::window::sizer::AdaptiveWindowSizer;
use ndarray::s;

/// Per-window correlation record produced by [`MovingWindowAnalyzer`].
///
/// Fields
/// ------
/// - `window_start`, `window_end`: `f64`
///   Timestamps of the first and last sample inside the window (inclusive
///   bounds on the shared axis).
/// - `n_samples`: `usize`
///   Samples in the window; partial tails carry fewer than the full size.
/// - `correlation`: `f64`
///   Pearson r, or the 0.0 sentinel for a zero-variance window.
/// - `p_value`: `f64`
///   Two-tailed p-value (1.0 for the zero-variance sentinel).
/// - `is_significant`: `bool`
///   Strict `p < alpha` verdict.
/// - `window_size_used`: `usize`
///   The full window size in force for this profile (adaptive or fixed);
///   identical across one `analyze` call.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowStatistic {
    pub window_start: f64,
    pub window_end: f64,
    pub n_samples: usize,
    pub correlation: f64,
    pub p_value: f64,
    pub is_significant: bool,
    pub window_size_used: usize,
}

/// `WindowAnalysisResult` — the ordered correlation profile of one
/// `analyze` call.
///
/// Purpose
/// -------
/// Hold the per-window records in placement order and answer the common
/// downstream questions (which windows are significant, how many) without
/// every consumer re-filtering the raw list.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowAnalysisResult {
    records: Vec<WindowStatistic>,
}

impl WindowAnalysisResult {
    fn new(records: Vec<WindowStatistic>) -> Self {
        WindowAnalysisResult { records }
    }

    /// All records, in placement order.
    pub fn records(&self) -> &[WindowStatistic] {
        &self.records
    }

    /// Consume the result, yielding the owned record list.
    pub fn into_records(self) -> Vec<WindowStatistic> {
        self.records
    }

    /// Number of placed windows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records whose correlation passed the significance test, in
    /// placement order.
    pub fn significant(&self) -> impl Iterator<Item = &WindowStatistic> {
        self.records.iter().filter(|stat| stat.is_significant)
    }

    /// Count of significant windows.
    pub fn significant_count(&self) -> usize {
        self.significant().count()
    }
}

/// `MovingWindowAnalyzer` — windowed Pearson correlation with significance
/// annotation.
///
/// Purpose
/// -------
/// Produce a time-resolved correlation profile for an aligned series pair,
/// delegating window sizing, placement, and significance to the dedicated
/// components.
///
/// Fields
/// ------
/// - `sizer`: [`AdaptiveWindowSizer`] used when no window size is given.
/// - `overlap`: [`WindowOverlapManager`] holding the default overlap and
///   tail policy.
/// - `tester`: [`SignificanceTester`] applied to every window.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovingWindowAnalyzer {
    sizer: AdaptiveWindowSizer,
    overlap: WindowOverlapManager,
    tester: SignificanceTester,
}

impl MovingWindowAnalyzer {
    /// Construct an analyzer from pre-validated components.
    pub fn new(
        sizer: AdaptiveWindowSizer, overlap: WindowOverlapManager, tester: SignificanceTester,
    ) -> Self {
        MovingWindowAnalyzer { sizer, overlap, tester }
    }

    /// Profile the local correlation of an aligned pair.
    ///
    /// Parameters
    /// ----------
    /// - `first`, `second`: equal-length aligned series.
    /// - `window_size`: `Option<usize>`
    ///   Fixed full-window size; `None` delegates to the adaptive sizer.
    /// - `overlap_fraction`: `Option<f64>`
    ///   Per-call overlap in [0, 1); `None` uses the configured default.
    ///
    /// Returns
    /// -------
    /// `WindowResult<WindowAnalysisResult>`
    ///   One record per placed window, in placement order, never empty.
    ///
    /// Errors
    /// ------
    /// - `WindowError::LengthMismatch` when the series differ in length.
    /// - `WindowError::SeriesTooShort` when the series cannot hold even the
    ///   minimum window.
    /// - `WindowError::WindowSizeExceedsSeries` for an oversized fixed
    ///   window, and `WindowError::InvalidOverlapFraction` for a bad
    ///   per-call override.
    pub fn analyze(
        &self, first: &TimeSeries, second: &TimeSeries, window_size: Option<usize>,
        overlap_fraction: Option<f64>,
    ) -> WindowResult<WindowAnalysisResult> {
        if first.len() != second.len() {
            return Err(WindowError::LengthMismatch { first: first.len(), second: second.len() });
        }
        let len = first.len();

        let size = match window_size {
            Some(size) => size,
            None => self.sizer.determine_window_size(first.values().view())?,
        };
        let manager = match overlap_fraction {
            Some(fraction) => WindowOverlapManager::new(fraction, self.overlap.min_tail())?,
            None => self.overlap.clone(),
        };

        let stamps = first.timestamps();
        let mut profile = Vec::new();
        for (start, end) in manager.windows(len, size)? {
            let x = first.values().slice(s![start..end]);
            let y = second.values().slice(s![start..end]);
            let n = end - start;
            let (correlation, p_value, is_significant) = match pearson(x, y) {
                Some(r) => {
                    let (p, verdict) = self.tester.test(n, r);
                    (r, p, verdict)
                }
                // Flat window: correlation undefined, reported as the
                // non-significant sentinel.
                None => (0.0, 1.0, false),
            };
            profile.push(WindowStatistic {
                window_start: stamps[start],
                window_end: stamps[end - 1],
                n_samples: n,
                correlation,
                p_value,
                is_significant,
                window_size_used: size,
            });
        }
        Ok(WindowAnalysisResult::new(profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Profile shape (one record per window, placement order, timestamps).
    // - Significance annotation on strongly correlated and independent
    //   segments.
    // - The flat-window sentinel and the length-mismatch rejection.
    //
    // They intentionally DO NOT cover:
    // - Sizer/overlap/tester internals (their own test modules).
    // -------------------------------------------------------------------------

    fn make_series(values: &[f64]) -> TimeSeries {
        let pairs: Vec<(f64, f64)> =
            values.iter().enumerate().map(|(i, &v)| (i as f64, v)).collect();
        TimeSeries::from_pairs(&pairs).expect("test series should be valid")
    }

    #[test]
    // Purpose
    // -------
    // Verify a perfectly co-moving pair yields all-significant windows with
    // r ≈ 1 and correct window timestamps.
    //
    // Given
    // -----
    // - y = 2x over 20 samples, fixed window 5, zero overlap.
    //
    // Expect
    // ------
    // - 4 windows, each with r ≈ 1, significant, n_samples = 5, and
    //   window_start/window_end matching the placement.
    fn analyzer_flags_co_moving_pair_significant() {
        let x: Vec<f64> = (0..20).map(|i| (i as f64).sin() + i as f64 * 0.1).collect();
        let y: Vec<f64> = x.iter().map(|&v| 2.0 * v).collect();
        let analyzer = MovingWindowAnalyzer::default();

        let profile = analyzer
            .analyze(&make_series(&x), &make_series(&y), Some(5), Some(0.0))
            .unwrap();

        assert_eq!(profile.len(), 4);
        assert_eq!(profile.significant_count(), 4);
        for (k, stat) in profile.records().iter().enumerate() {
            assert!((stat.correlation - 1.0).abs() < 1e-9);
            assert!(stat.is_significant);
            assert_eq!(stat.n_samples, 5);
            assert_eq!(stat.window_size_used, 5);
            assert_eq!(stat.window_start, (k * 5) as f64);
            assert_eq!(stat.window_end, (k * 5 + 4) as f64);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify a flat window is annotated with the sentinel, not skipped.
    //
    // Given
    // -----
    // - First 5 samples constant in `x`, varying afterwards; window 5,
    //   zero overlap.
    //
    // Expect
    // ------
    // - Window 0 carries (r = 0, p = 1, not significant); later windows
    //   carry real correlations.
    fn analyzer_reports_flat_window_sentinel() {
        let mut x: Vec<f64> = vec![3.0; 5];
        x.extend((0..10).map(|i| i as f64));
        let y: Vec<f64> = (0..15).map(|i| i as f64 * 0.5).collect();
        let analyzer = MovingWindowAnalyzer::default();

        let profile = analyzer
            .analyze(&make_series(&x), &make_series(&y), Some(5), Some(0.0))
            .unwrap();

        let records = profile.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].correlation, 0.0);
        assert_eq!(records[0].p_value, 1.0);
        assert!(!records[0].is_significant);
        assert!((records[1].correlation - 1.0).abs() < 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Verify the adaptive sizer is engaged when no window size is given.
    //
    // Given
    // -----
    // - A stationary alternating pair of length 40, window_size = None.
    //
    // Expect
    // ------
    // - All records agree on one window_size_used within the sizer's
    //   bounds [5, 20].
    fn analyzer_uses_adaptive_size_when_unspecified() {
        let x: Vec<f64> = (0..40).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let y = x.clone();
        let analyzer = MovingWindowAnalyzer::default();

        let profile = analyzer.analyze(&make_series(&x), &make_series(&y), None, None).unwrap();

        let size = profile.records()[0].window_size_used;
        assert!((5..=20).contains(&size));
        assert!(profile.records().iter().all(|stat| stat.window_size_used == size));
    }

    #[test]
    // Purpose
    // -------
    // Verify the significance helpers agree with the raw records.
    //
    // Given
    // -----
    // - A pair whose first window is flat (never significant) and whose
    //   remaining windows co-move perfectly; window 5, zero overlap.
    //
    // Expect
    // ------
    // - `significant_count` = len − 1, and `significant()` yields exactly
    //   the records flagged significant, in placement order.
    fn analyzer_result_significance_helpers_match_records() {
        let mut x: Vec<f64> = vec![3.0; 5];
        x.extend((0..10).map(|i| (i as f64).sin() + i as f64 * 0.1));
        let y: Vec<f64> = x.iter().map(|&v| 2.0 * v + 1.0).collect();
        let analyzer = MovingWindowAnalyzer::default();

        let profile = analyzer
            .analyze(&make_series(&x), &make_series(&y), Some(5), Some(0.0))
            .unwrap();

        assert_eq!(profile.significant_count(), profile.len() - 1);
        let flagged: Vec<_> = profile.significant().collect();
        let expected: Vec<_> =
            profile.records().iter().filter(|stat| stat.is_significant).collect();
        assert_eq!(flagged, expected);
        assert!(flagged.iter().all(|stat| stat.window_start > 0.0));
    }

    #[test]
    // Purpose
    // -------
    // Ensure unaligned (unequal-length) input is rejected.
    //
    // Given
    // -----
    // - Series of lengths 10 and 8.
    //
    // Expect
    // ------
    // - `WindowError::LengthMismatch { first: 10, second: 8 }`.
    fn analyzer_rejects_unequal_lengths() {
        let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let y: Vec<f64> = (0..8).map(|i| i as f64).collect();
        let analyzer = MovingWindowAnalyzer::default();

        assert_eq!(
            analyzer.analyze(&make_series(&x), &make_series(&y), Some(5), None).unwrap_err(),
            WindowError::LengthMismatch { first: 10, second: 8 }
        );
    }
}

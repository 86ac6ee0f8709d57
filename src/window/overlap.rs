//! Window placement with controlled overlap and tail handling.
//!
//! Purpose
//! -------
//! Turn a series length, a window size, and an overlap fraction into the
//! concrete list of half-open `[start, end)` index ranges the analyzer
//! evaluates. Overlap trades temporal resolution of the correlation profile
//! against per-window independence; this module owns that bookkeeping so
//! the analyzer never reimplements it.
//!
//! Key behaviors
//! -------------
//! - The stride is `max(1, round(window × (1 − overlap_fraction)))`, so
//!   fractions close to 1 still advance by at least one sample and
//!   enumeration always terminates.
//! - A partial tail window is kept when it still holds at least `min_tail`
//!   samples; shorter tails are dropped rather than padded, since padding
//!   would fabricate data.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every returned range satisfies `start < end ≤ len`; ranges are sorted
//!   by `start` and strictly increasing in `start`.
//! - For a fixed window size, a larger overlap fraction never yields fewer
//!   windows.

use crate::window::errors::{WindowError, WindowResult};

/// Default minimum samples for a kept partial tail window.
pub const DEFAULT_MIN_TAIL: usize = 5;

/// `WindowOverlapManager` — stride and tail policy for window placement.
///
/// Parameters
/// ----------
/// Constructed via [`WindowOverlapManager::new`] with:
/// - `overlap_fraction`: `f64`
///   Fraction of each window shared with its successor, in [0, 1). Zero
///   yields back-to-back disjoint windows.
/// - `min_tail`: `usize`
///   Minimum samples for the final partial window to be kept; at least 2.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowOverlapManager {
    overlap_fraction: f64,
    min_tail: usize,
}

impl Default for WindowOverlapManager {
    fn default() -> Self {
        WindowOverlapManager { overlap_fraction: 0.0, min_tail: DEFAULT_MIN_TAIL }
    }
}

impl WindowOverlapManager {
    /// Construct a manager, validating the overlap fraction and tail floor.
    ///
    /// Errors
    /// ------
    /// - `WindowError::InvalidOverlapFraction` when the fraction is
    ///   non-finite or outside [0, 1).
    /// - `WindowError::InvalidWindowFloor` when `min_tail < 2`.
    pub fn new(overlap_fraction: f64, min_tail: usize) -> WindowResult<Self> {
        if !overlap_fraction.is_finite() || !(0.0..1.0).contains(&overlap_fraction) {
            return Err(WindowError::InvalidOverlapFraction { value: overlap_fraction });
        }
        if min_tail < 2 {
            return Err(WindowError::InvalidWindowFloor { value: min_tail });
        }
        Ok(WindowOverlapManager { overlap_fraction, min_tail })
    }

    /// Configured tail floor.
    pub fn min_tail(&self) -> usize {
        self.min_tail
    }

    /// Enumerate window index ranges over a series of length `len`.
    ///
    /// Parameters
    /// ----------
    /// - `len`: series length.
    /// - `window_size`: samples per full window; must satisfy
    ///   `2 ≤ window_size ≤ len`.
    ///
    /// Returns
    /// -------
    /// `WindowResult<Vec<(usize, usize)>>`
    ///   Half-open `[start, end)` ranges, sorted by start, at least one.
    ///
    /// Errors
    /// ------
    /// - `WindowError::WindowSizeExceedsSeries` when `window_size > len`.
    /// - `WindowError::InvalidWindowFloor` when `window_size < 2`.
    pub fn windows(&self, len: usize, window_size: usize) -> WindowResult<Vec<(usize, usize)>> {
        if window_size < 2 {
            return Err(WindowError::InvalidWindowFloor { value: window_size });
        }
        if window_size > len {
            return Err(WindowError::WindowSizeExceedsSeries { window: window_size, len });
        }

        let stride = ((window_size as f64 * (1.0 - self.overlap_fraction)).round() as usize).max(1);
        let mut ranges = Vec::new();
        let mut start = 0;
        while start + window_size <= len {
            ranges.push((start, start + window_size));
            start += stride;
        }
        // Partial tail, kept only when the full windows left samples
        // uncovered and the tail still carries enough of them.
        let covered = ranges.last().map_or(0, |&(_, end)| end);
        if covered < len && len - start >= self.min_tail {
            ranges.push((start, len));
        }
        Ok(ranges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Disjoint placement at zero overlap and denser placement as overlap
    //   grows (count monotonicity).
    // - Tail keep/drop policy around `min_tail`.
    // - Range invariants (sorted, in-bounds) and configuration validation.
    // -------------------------------------------------------------------------

    fn assert_ranges_valid(ranges: &[(usize, usize)], len: usize) {
        assert!(!ranges.is_empty());
        for pair in ranges.windows(2) {
            assert!(pair[0].0 < pair[1].0, "starts must strictly increase: {pair:?}");
        }
        for &(s, e) in ranges {
            assert!(s < e && e <= len, "range out of bounds: ({s}, {e}) for len {len}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify zero overlap yields back-to-back disjoint full windows.
    //
    // Given
    // -----
    // - len = 20, window = 5, overlap = 0.
    //
    // Expect
    // ------
    // - Exactly [(0,5), (5,10), (10,15), (15,20)].
    fn overlap_zero_yields_disjoint_windows() {
        let manager = WindowOverlapManager::new(0.0, 2).unwrap();

        let ranges = manager.windows(20, 5).unwrap();

        assert_eq!(ranges, vec![(0, 5), (5, 10), (10, 15), (15, 20)]);
    }

    #[test]
    // Purpose
    // -------
    // Verify window count never decreases as overlap grows.
    //
    // Given
    // -----
    // - len = 50, window = 10, fractions 0.0, 0.25, 0.5, 0.75, 0.9.
    //
    // Expect
    // ------
    // - Counts form a non-decreasing sequence, every range set valid.
    fn overlap_count_is_monotone_in_fraction() {
        let mut last_count = 0;
        for fraction in [0.0, 0.25, 0.5, 0.75, 0.9] {
            let manager = WindowOverlapManager::new(fraction, 2).unwrap();
            let ranges = manager.windows(50, 10).unwrap();
            assert_ranges_valid(&ranges, 50);
            assert!(
                ranges.len() >= last_count,
                "fraction {fraction} produced fewer windows ({} < {last_count})",
                ranges.len()
            );
            last_count = ranges.len();
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the tail policy keeps a partial window at or above the floor
    // and drops one below it.
    //
    // Given
    // -----
    // - len = 23, window = 5, overlap = 0 (tail of 3), with min_tail 3 and
    //   then min_tail 4.
    //
    // Expect
    // ------
    // - Floor 3 keeps (20, 23); floor 4 stops at (15, 20).
    fn overlap_tail_respects_floor() {
        let keep = WindowOverlapManager::new(0.0, 3).unwrap();
        let drop = WindowOverlapManager::new(0.0, 4).unwrap();

        assert_eq!(keep.windows(23, 5).unwrap().last(), Some(&(20, 23)));
        assert_eq!(drop.windows(23, 5).unwrap().last(), Some(&(15, 20)));
    }

    #[test]
    // Purpose
    // -------
    // Verify oversized windows, degenerate windows, and bad fractions are
    // rejected.
    //
    // Given
    // -----
    // - window 30 on len 20; window 1; fraction 1.0.
    //
    // Expect
    // ------
    // - The matching error variant for each.
    fn overlap_validates_inputs() {
        let manager = WindowOverlapManager::default();

        assert_eq!(
            manager.windows(20, 30).unwrap_err(),
            WindowError::WindowSizeExceedsSeries { window: 30, len: 20 }
        );
        assert_eq!(manager.windows(20, 1).unwrap_err(), WindowError::InvalidWindowFloor { value: 1 });
        assert_eq!(
            WindowOverlapManager::new(1.0, 2).unwrap_err(),
            WindowError::InvalidOverlapFraction { value: 1.0 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify a high overlap fraction still advances (stride clamps to 1).
    //
    // Given
    // -----
    // - len = 12, window = 10, overlap = 0.99.
    //
    // Expect
    // ------
    // - Three windows: (0,10), (1,11), (2,12).
    fn overlap_near_one_advances_by_single_samples() {
        let manager = WindowOverlapManager::new(0.99, 2).unwrap();

        let ranges = manager.windows(12, 10).unwrap();

        assert_eq!(ranges, vec![(0, 10), (1, 11), (2, 12)]);
    }

    #[test]
    // Purpose
    // -------
    // Verify no redundant tail is emitted when the last full window already
    // reaches the end of the series.
    //
    // Given
    // -----
    // - len = 12, window = 4, overlap = 0.5 (stride 2), min_tail = 2: the
    //   full windows cover the series exactly, ending at (8, 12).
    //
    // Expect
    // ------
    // - No extra range after (8, 12); every start strictly increases and
    //   the final end equals len.
    fn overlap_skips_tail_when_fully_covered() {
        let manager = WindowOverlapManager::new(0.5, 2).unwrap();

        let ranges = manager.windows(12, 4).unwrap();

        assert_eq!(ranges, vec![(0, 4), (2, 6), (4, 8), (6, 10), (8, 12)]);
        assert_ranges_valid(&ranges, 12);
    }
}

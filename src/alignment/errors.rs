//! Errors for the aligner family (data sufficiency, overlap, warp-path
//! degeneracy, and aligner configuration).
//!
//! This module defines [`AlignError`] and the [`AlignResult`] alias used by
//! the three aligners and the [`AlignmentResult`](crate::alignment::AlignmentResult)
//! constructor. Series-level invariant violations bubble up through the
//! `From<SeriesError>` conversion rather than being re-detected here.
//!
//! ## Conventions
//! - Aligners **never** fall back to unaligned raw series on failure; every
//!   error is surfaced so a caller cannot mistake raw co-plotting for a real
//!   alignment.
//! - Configuration errors (`InvalidTargetRate`, `InvalidBandWidth`,
//!   `InvalidOutlierThreshold`) are raised at aligner construction, not at
//!   the first `align` call.

use crate::series::SeriesError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for alignment operations that may produce [`AlignError`].
pub type AlignResult<T> = Result<T, AlignError>;

/// Unified error type for the aligner family.
///
/// Covers propagated series errors, data-sufficiency failures, degenerate or
/// unreachable warp results, and invalid aligner configuration. Implements
/// `Display`/`Error` and converts to a Python `ValueError` at PyO3
/// boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum AlignError {
    /// Propagated series-level failure (construction or interpolation).
    Series(SeriesError),

    // ---- Data sufficiency ----
    /// A series holds fewer points than the aligner requires.
    InsufficientData { len: usize, min: usize },

    /// The two series' time ranges do not overlap by at least one grid step.
    EmptyOverlap { start: f64, end: f64 },

    // ---- Warp results ----
    /// The recovered warp path is too short to constitute an alignment.
    DegeneratePath { len: usize },

    /// The Sakoe–Chiba band left the terminal cell unreachable.
    UnreachableAlignment { window: usize },

    /// Aligned outputs disagree in length (internal invariant violation).
    LengthMismatch { reference: usize, target: usize },

    // ---- Configuration ----
    /// Requested resample spacing is non-positive or non-finite.
    InvalidTargetRate { value: f64 },

    /// Sakoe–Chiba band width must be at least 1 when given.
    InvalidBandWidth,

    /// Outlier threshold (in rolling MADs) must be finite and positive.
    InvalidOutlierThreshold { value: f64 },
}

impl std::error::Error for AlignError {}

impl std::fmt::Display for AlignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlignError::Series(err) => write!(f, "{err}"),
            AlignError::InsufficientData { len, min } => {
                write!(f, "Alignment needs at least {min} points per series; got {len}.")
            }
            AlignError::EmptyOverlap { start, end } => {
                write!(
                    f,
                    "Series time ranges share no usable overlap \
                     (intersection [{start}, {end}] is thinner than one grid step)."
                )
            }
            AlignError::DegeneratePath { len } => {
                write!(f, "Warp path of length {len} is degenerate; need at least 2 steps.")
            }
            AlignError::UnreachableAlignment { window } => {
                write!(
                    f,
                    "Sakoe–Chiba band of width {window} disconnects the warp lattice; \
                     widen the band."
                )
            }
            AlignError::LengthMismatch { reference, target } => {
                write!(
                    f,
                    "Aligned reference (len {reference}) and target (len {target}) \
                     must have equal length."
                )
            }
            AlignError::InvalidTargetRate { value } => {
                write!(f, "Invalid target resample spacing: {value}. Must be finite and > 0.")
            }
            AlignError::InvalidBandWidth => {
                write!(f, "Sakoe–Chiba band width must be at least 1.")
            }
            AlignError::InvalidOutlierThreshold { value } => {
                write!(f, "Invalid outlier threshold: {value}. Must be finite and > 0.")
            }
        }
    }
}

impl From<SeriesError> for AlignError {
    fn from(err: SeriesError) -> AlignError {
        AlignError::Series(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<AlignError> for PyErr {
    fn from(err: AlignError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Display` payload embedding and the `From<SeriesError>` wrapping.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a wrapped series error keeps its original message.
    //
    // Given
    // -----
    // - A `SeriesError::EmptySeries` converted into `AlignError`.
    //
    // Expect
    // ------
    // - The `AlignError` display equals the series error display.
    fn align_error_wraps_series_error_display() {
        let inner = SeriesError::EmptySeries;
        let wrapped: AlignError = inner.clone().into();

        assert_eq!(wrapped.to_string(), inner.to_string());
    }

    #[test]
    // Purpose
    // -------
    // Verify that `InsufficientData` embeds both the observed and required
    // lengths.
    //
    // Given
    // -----
    // - An `InsufficientData` error with len = 1, min = 2.
    //
    // Expect
    // ------
    // - The message contains "1" and "2".
    fn align_error_insufficient_data_includes_payload_in_display() {
        let err = AlignError::InsufficientData { len: 1, min: 2 };

        let msg = err.to_string();

        assert!(msg.contains('1') && msg.contains('2'), "payload missing.\nGot: {msg}");
    }
}

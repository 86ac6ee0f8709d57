//! Errors for the time-series primitive (construction validation, range
//! queries, and minimum-length requirements).
//!
//! This module defines [`SeriesError`] and the [`SeriesResult`] alias used by
//! the [`TimeSeries`](crate::series::TimeSeries) container and everything built
//! on top of it. Higher layers (alignment, lag estimation) wrap these errors
//! via `From` conversions rather than re-validating series invariants.
//!
//! ## Conventions
//! - **Indices are 0-based**.
//! - Timestamps must be **strictly increasing** and finite; values must be
//!   finite.
//! - Range queries never extrapolate: a query outside the observed span is an
//!   [`SeriesError::OutOfRange`], not an approximation.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for series-level operations that may produce [`SeriesError`].
pub type SeriesResult<T> = Result<T, SeriesError>;

/// Error conditions for time-series construction and queries.
///
/// Covers construction-time invariant violations (emptiness, shape mismatch,
/// non-finite or non-monotonic entries) and query-time failures (out-of-range
/// interpolation requests, too-few-points requirements). Implements
/// `Display`/`Error` and converts to a Python `ValueError` at PyO3 boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    // ---- Construction validation ----
    /// Series is empty.
    EmptySeries,

    /// Timestamp and value buffers differ in length.
    LengthMismatch { timestamps: usize, values: usize },

    /// A timestamp or value is NaN/±inf.
    NonFiniteValue { index: usize, value: f64 },

    /// Timestamps are not strictly increasing at `index`.
    NonMonotonicTimestamps { index: usize, prev: f64, next: f64 },

    // ---- Queries ----
    /// Requested time lies outside the observed span (no extrapolation).
    OutOfRange { t: f64, start: f64, end: f64 },

    /// Operation requires more points than the series contains.
    InsufficientData { needed: usize, actual: usize },
}

impl std::error::Error for SeriesError {}

impl std::fmt::Display for SeriesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesError::EmptySeries => {
                write!(f, "Time series must contain at least one sample.")
            }
            SeriesError::LengthMismatch { timestamps, values } => {
                write!(
                    f,
                    "Timestamp buffer (len {timestamps}) and value buffer (len {values}) \
                     must have equal length."
                )
            }
            SeriesError::NonFiniteValue { index, value } => {
                write!(f, "Non-finite entry {value} at index {index}. All entries must be finite.")
            }
            SeriesError::NonMonotonicTimestamps { index, prev, next } => {
                write!(
                    f,
                    "Timestamps must be strictly increasing: t[{index}] = {next} does not \
                     exceed t[{}] = {prev}.",
                    index - 1
                )
            }
            SeriesError::OutOfRange { t, start, end } => {
                write!(
                    f,
                    "Time {t} lies outside the observed range [{start}, {end}]; \
                     extrapolation is not performed."
                )
            }
            SeriesError::InsufficientData { needed, actual } => {
                write!(f, "Operation needs at least {needed} samples; series has {actual}.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SeriesError> for PyErr {
    fn from(err: SeriesError) -> PyErr {
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
    // - `Display` formatting embeds the payload of each variant.
    //
    // They intentionally DO NOT cover:
    // - The `From<SeriesError> for PyErr` conversion (requires the Python
    //   C API; exercised by Python-level tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `OutOfRange` embeds the requested time and the observed
    // range in its message.
    //
    // Given
    // -----
    // - An `OutOfRange` error for t = 99.0 over the range [0, 10].
    //
    // Expect
    // ------
    // - The message contains "99" and both range endpoints.
    fn series_error_out_of_range_includes_payload_in_display() {
        let err = SeriesError::OutOfRange { t: 99.0, start: 0.0, end: 10.0 };

        let msg = err.to_string();

        assert!(msg.contains("99"), "message should include requested time.\nGot: {msg}");
        assert!(msg.contains("0") && msg.contains("10"), "message should include range.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `NonMonotonicTimestamps` names the offending index.
    //
    // Given
    // -----
    // - A `NonMonotonicTimestamps` error at index 4.
    //
    // Expect
    // ------
    // - The message contains "4".
    fn series_error_non_monotonic_includes_index_in_display() {
        let err = SeriesError::NonMonotonicTimestamps { index: 4, prev: 2.0, next: 1.5 };

        let msg = err.to_string();

        assert!(msg.contains('4'), "message should include offending index.\nGot: {msg}");
    }
}

//! Errors for windowed correlation analysis (shape, sufficiency, and
//! configuration of the sizer, overlap manager, significance tester, and
//! analyzer).
//!
//! ## Conventions
//! - Configuration errors are raised at construction time; analysis-time
//!   errors are limited to shape and sufficiency of the supplied series.
//! - A flat (zero-variance) window is NOT an error: the analyzer annotates
//!   it with the documented non-significant sentinel instead.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for windowing operations that may produce [`WindowError`].
pub type WindowResult<T> = Result<T, WindowError>;

/// Unified error type for the windowed-analysis family.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowError {
    // ---- Input shape and sufficiency ----
    /// The two analyzed series differ in length (callers align first).
    LengthMismatch { first: usize, second: usize },

    /// The series is shorter than the smallest admissible window.
    SeriesTooShort { len: usize, min: usize },

    /// A requested window size exceeds the series length.
    WindowSizeExceedsSeries { window: usize, len: usize },

    // ---- Configuration ----
    /// Window-size floor must be at least 2 (correlation needs 2 points).
    InvalidWindowFloor { value: usize },

    /// Maximum window fraction must lie in (0, 1].
    InvalidMaxWindowFraction { value: f64 },

    /// Variance-stability target must be finite and > 0.
    InvalidVarianceTarget { value: f64 },

    /// Overlap fraction must lie in [0, 1).
    InvalidOverlapFraction { value: f64 },

    /// Significance level must lie strictly between 0 and 1.
    InvalidAlpha { value: f64 },
}

impl std::error::Error for WindowError {}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::LengthMismatch { first, second } => {
                write!(
                    f,
                    "Windowed analysis requires equal-length series; \
                     got {first} and {second}. Align the pair first."
                )
            }
            WindowError::SeriesTooShort { len, min } => {
                write!(f, "Series of length {len} is shorter than the minimum window {min}.")
            }
            WindowError::WindowSizeExceedsSeries { window, len } => {
                write!(f, "Window size {window} exceeds series length {len}.")
            }
            WindowError::InvalidWindowFloor { value } => {
                write!(f, "Invalid window-size floor: {value}. Must be at least 2.")
            }
            WindowError::InvalidMaxWindowFraction { value } => {
                write!(f, "Invalid max window fraction: {value}. Must lie in (0, 1].")
            }
            WindowError::InvalidVarianceTarget { value } => {
                write!(f, "Invalid variance-stability target: {value}. Must be finite and > 0.")
            }
            WindowError::InvalidOverlapFraction { value } => {
                write!(f, "Invalid overlap fraction: {value}. Must lie in [0, 1).")
            }
            WindowError::InvalidAlpha { value } => {
                write!(f, "Invalid significance level: {value}. Must lie in (0, 1).")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<WindowError> for PyErr {
    fn from(err: WindowError) -> PyErr {
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
    // - `Display` payload embedding for the shape and configuration variants.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the length-mismatch message names both lengths.
    //
    // Given
    // -----
    // - `LengthMismatch { first: 10, second: 7 }`.
    //
    // Expect
    // ------
    // - The message contains "10" and "7".
    fn window_error_length_mismatch_includes_payload() {
        let msg = WindowError::LengthMismatch { first: 10, second: 7 }.to_string();

        assert!(msg.contains("10") && msg.contains('7'), "payload missing.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify the invalid-alpha message embeds the rejected value.
    //
    // Given
    // -----
    // - `InvalidAlpha { value: 1.5 }`.
    //
    // Expect
    // ------
    // - The message contains "1.5".
    fn window_error_invalid_alpha_includes_value() {
        let msg = WindowError::InvalidAlpha { value: 1.5 }.to_string();

        assert!(msg.contains("1.5"), "value missing.\nGot: {msg}");
    }
}
